//! Python bindings for the generate workflow

use numpy::{PyArray1, PyArray2};
use pyo3::prelude::*;
use std::path::PathBuf;

use crate::audio::{reduce_to_first_channel, SampleSource, WavSource};
use crate::session::AnalysisSession;
use crate::spectrum::{AnalysisParameters, SpectrumScale};

type GenerateOutput<'py> = (
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
    &'py PyArray2<f64>,
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
);

/// File selection plus generate, exposed to Python
#[pyclass(name = "Session", unsendable)]
pub struct PySession {
    session: AnalysisSession,
}

#[pymethods]
impl PySession {
    #[new]
    fn new() -> Self {
        Self {
            session: AnalysisSession::new(),
        }
    }

    /// Select the waveform file used by `generate`
    fn select_file(&mut self, path: PathBuf) {
        self.session.select_file(path);
    }

    /// Currently selected file, or None
    fn current_file(&self) -> Option<PathBuf> {
        self.session.current_file().map(|p| p.to_path_buf())
    }

    /// Read the selected file and compute both views
    ///
    /// Returns:
    ///     (time, waveform, spectrogram, frequencies, frame_times) numpy arrays,
    ///     frame_times being frame centers in seconds
    #[pyo3(signature = (window="hamming", segment_length=256, overlap_percent=10, scale="magnitude"))]
    fn generate<'py>(
        &mut self,
        py: Python<'py>,
        window: &str,
        segment_length: usize,
        overlap_percent: u32,
        scale: &str,
    ) -> PyResult<GenerateOutput<'py>> {
        let params = AnalysisParameters::from_ui(window, segment_length, overlap_percent)?
            .with_scale(SpectrumScale::from_name(scale)?);
        let analysis = self.session.generate(&params)?;

        Ok((
            PyArray1::from_slice(py, analysis.time_axis.times()),
            PyArray1::from_slice(py, analysis.waveform.samples()),
            PyArray2::from_array(py, analysis.spectrogram.values()),
            PyArray1::from_vec(py, analysis.spectrogram.frequencies()),
            PyArray1::from_vec(py, analysis.spectrogram.frame_center_times()),
        ))
    }
}

/// Read a WAV file and keep its first channel
///
/// Returns:
///     (sample_rate, samples)
#[pyfunction]
pub fn load_wav<'py>(py: Python<'py>, path: PathBuf) -> PyResult<(u32, &'py PyArray1<f64>)> {
    let audio = WavSource::new().read(&path)?;
    let waveform = reduce_to_first_channel(&audio)?;
    let sample_rate = waveform.sample_rate();

    Ok((sample_rate, PyArray1::from_vec(py, waveform.into_samples())))
}
