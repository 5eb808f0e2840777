//! Python bindings for spectrogram analysis

use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::audio::{build_time_axis, WaveformBuffer};
use crate::spectrum::{window_by_name, AnalysisParameters, SpectrogramEngine, SpectrumScale};

/// Spectrogram engine exposed to Python
#[pyclass(name = "Spectrogram", unsendable)]
pub struct PySpectrogram {
    engine: SpectrogramEngine,
    params: AnalysisParameters,
}

#[pymethods]
impl PySpectrogram {
    /// Create a new spectrogram engine
    ///
    /// Args:
    ///     window: Window name (hamming, triangular, blackman, hann, bartlett, flattop, bohman, barthann)
    ///     segment_length: Samples per frame
    ///     overlap_percent: Overlap between frames in percent (0-99)
    ///     scale: "magnitude", "power" or "density"
    #[new]
    #[pyo3(signature = (window="hamming", segment_length=256, overlap_percent=10, scale="magnitude"))]
    fn new(window: &str, segment_length: usize, overlap_percent: u32, scale: &str) -> PyResult<Self> {
        let params = AnalysisParameters::from_ui(window, segment_length, overlap_percent)?
            .with_scale(SpectrumScale::from_name(scale)?);

        Ok(Self {
            engine: SpectrogramEngine::new(),
            params,
        })
    }

    /// Compute the spectrogram of a mono signal
    ///
    /// Args:
    ///     samples: Signal as numpy array
    ///     sample_rate: Sample rate in Hz
    ///
    /// Returns:
    ///     (bins x frames) numpy array
    fn compute<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
        sample_rate: u32,
    ) -> PyResult<&'py PyArray2<f64>> {
        let buffer = WaveformBuffer::new(samples.as_array().to_vec(), sample_rate)?;
        let matrix = self.engine.compute(&buffer, &self.params)?;

        Ok(PyArray2::from_owned_array(py, matrix.into_values()))
    }

    /// Compute the spectrogram in dB
    ///
    /// Args:
    ///     samples: Signal as numpy array
    ///     sample_rate: Sample rate in Hz
    ///     floor: Smallest value before taking the logarithm
    #[pyo3(signature = (samples, sample_rate, floor=1e-10))]
    fn compute_db<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
        sample_rate: u32,
        floor: f64,
    ) -> PyResult<&'py PyArray2<f64>> {
        let buffer = WaveformBuffer::new(samples.as_array().to_vec(), sample_rate)?;
        let matrix = self.engine.compute(&buffer, &self.params)?;

        Ok(PyArray2::from_owned_array(py, matrix.to_db(floor)))
    }

    /// Row frequencies in Hz for a given sample rate
    fn frequencies<'py>(&self, py: Python<'py>, sample_rate: f64) -> &'py PyArray1<f64> {
        let length = self.params.segment_length();
        let freqs: Vec<f64> = (0..self.params.num_bins())
            .map(|i| i as f64 * sample_rate / length as f64)
            .collect();
        PyArray1::from_vec(py, freqs)
    }

    /// Samples advanced between frames
    fn hop(&self) -> usize {
        self.params.hop()
    }

    /// Number of frequency rows
    fn num_bins(&self) -> usize {
        self.params.num_bins()
    }

    /// Window name in use
    fn window(&self) -> &'static str {
        self.params.window().name()
    }

    /// Segment length in use
    fn segment_length(&self) -> usize {
        self.params.segment_length()
    }
}

/// Uniform time axis of `n` samples at `sample_rate`
#[pyfunction]
pub fn time_axis<'py>(py: Python<'py>, n: usize, sample_rate: f64) -> PyResult<&'py PyArray1<f64>> {
    let axis = build_time_axis(n, sample_rate)?;
    Ok(PyArray1::from_vec(py, axis.into_times()))
}

/// Window coefficients by name
#[pyfunction]
pub fn get_window<'py>(py: Python<'py>, name: &str, length: usize) -> PyResult<&'py PyArray1<f64>> {
    Ok(PyArray1::from_vec(py, window_by_name(name, length)?))
}
