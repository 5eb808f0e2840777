//! Short-time Fourier transform over a whole recording
//!
//! Slides a window of `segment_length` samples across the buffer in steps of
//! `hop`, transforms each windowed frame and stores the positive-frequency
//! half as one column of a (bins × frames) matrix.

use log::{debug, warn};
use ndarray::{Array2, ArrayView1};
use realfft::RealFftPlanner;

use super::fft::FftEngine;
use super::params::{self, AnalysisParameters, SpectrumScale};
use super::windowing::{apply_window_into, power_sum};
use super::windows::generate_window;
use crate::audio::WaveformBuffer;
use crate::error::Result;

/// Time–frequency energy map
///
/// Row `i` holds frequency `i·Fs/L`, column `j` the frame starting at sample
/// `j·hop`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramMatrix {
    values: Array2<f64>,
    sample_rate: u32,
    segment_length: usize,
    hop: usize,
    scale: SpectrumScale,
}

impl SpectrogramMatrix {
    /// Raw (bins × frames) values
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    pub fn num_bins(&self) -> usize {
        self.values.nrows()
    }

    pub fn num_frames(&self) -> usize {
        self.values.ncols()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    pub fn scale(&self) -> SpectrumScale {
        self.scale
    }

    /// Value at (bin, frame)
    pub fn get(&self, bin: usize, frame: usize) -> Option<f64> {
        self.values.get((bin, frame)).copied()
    }

    /// One frame's spectrum
    pub fn column(&self, frame: usize) -> Option<ArrayView1<'_, f64>> {
        (frame < self.num_frames()).then(|| self.values.column(frame))
    }

    /// Row frequencies in Hz
    pub fn frequencies(&self) -> Vec<f64> {
        let resolution = self.sample_rate as f64 / self.segment_length as f64;
        (0..self.num_bins()).map(|i| i as f64 * resolution).collect()
    }

    /// Start time of every frame in seconds
    pub fn frame_start_times(&self) -> Vec<f64> {
        let fs = self.sample_rate as f64;
        (0..self.num_frames())
            .map(|j| (j * self.hop) as f64 / fs)
            .collect()
    }

    /// Center time of every frame in seconds
    pub fn frame_center_times(&self) -> Vec<f64> {
        let fs = self.sample_rate as f64;
        let half = self.segment_length as f64 / 2.0;
        (0..self.num_frames())
            .map(|j| ((j * self.hop) as f64 + half) / fs)
            .collect()
    }

    /// Bin with the largest value in `frame`
    pub fn peak_bin(&self, frame: usize) -> Option<usize> {
        let column = self.column(frame)?;
        column
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Values in dB, clamped to `floor` before taking the logarithm
    ///
    /// The engine keeps exact zeros; renderers that need a log scale pick
    /// their own floor here.
    pub fn to_db(&self, floor: f64) -> Array2<f64> {
        let factor = self.scale.db_factor();
        self.values.mapv(|v| factor * v.max(floor).log10())
    }
}

/// Number of frames produced for `n` samples
///
/// ⌊(n − L)/hop⌋ + 1 when the buffer holds a full segment, otherwise a
/// single zero-padded frame.
pub fn frame_count(n: usize, segment_length: usize, hop: usize) -> usize {
    if n < segment_length {
        1
    } else {
        (n - segment_length) / hop.max(1) + 1
    }
}

/// Reusable STFT engine
///
/// Keeps the FFT plan of the last segment length so repeated generates with
/// the same settings skip planning. Holds no analysis state between calls.
pub struct SpectrogramEngine {
    planner: RealFftPlanner<f64>,
    fft: Option<FftEngine>,
}

impl SpectrogramEngine {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
            fft: None,
        }
    }

    fn fft_for(&mut self, size: usize) -> &mut FftEngine {
        if self.fft.as_ref().map(FftEngine::fft_size) != Some(size) {
            self.fft = None;
        }
        let planner = &mut self.planner;
        self.fft
            .get_or_insert_with(|| FftEngine::with_planner(planner, size))
    }

    /// Compute the spectrogram of `samples`
    ///
    /// # Errors
    /// `InvalidParameter` for a zero segment length or an overlap outside
    /// [0, 1); window errors propagate unchanged.
    pub fn compute(
        &mut self,
        samples: &WaveformBuffer,
        params: &AnalysisParameters,
    ) -> Result<SpectrogramMatrix> {
        let segment_length = params.segment_length();
        params::validate(segment_length, params.overlap_fraction())?;
        let window = generate_window(params.window(), segment_length)?;

        let hop = params.hop();
        let data = samples.samples();
        let n = data.len();
        let frames = frame_count(n, segment_length, hop);
        let bins = segment_length / 2 + 1;

        if n < segment_length {
            warn!(
                "{} samples is shorter than segment length {}; analysing one zero-padded frame",
                n, segment_length
            );
        }
        debug!(
            "stft: {} samples @ {} Hz, window={}, L={}, hop={}, {} frames x {} bins",
            n,
            samples.sample_rate(),
            params.window(),
            segment_length,
            hop,
            frames,
            bins
        );

        let scale = params.scale();
        let density_norm = match scale {
            SpectrumScale::Density => {
                let energy = power_sum(&window) * samples.sample_rate() as f64;
                if energy > 0.0 {
                    1.0 / energy
                } else {
                    0.0
                }
            }
            _ => 1.0,
        };
        // Bins folded from the negative half; Nyquist exists only for even L
        let last_doubled = if segment_length % 2 == 0 { bins - 1 } else { bins };

        let mut values = Array2::<f64>::zeros((bins, frames));
        let fft = self.fft_for(segment_length);

        for (j, mut column) in values.columns_mut().into_iter().enumerate() {
            let start = j * hop;
            let end = (start + segment_length).min(n);
            apply_window_into(&data[start..end], &window, fft.input_mut());

            let spectrum = fft.process()?;

            for (k, (cell, c)) in column.iter_mut().zip(spectrum.iter()).enumerate() {
                *cell = match scale {
                    SpectrumScale::Magnitude => c.norm(),
                    SpectrumScale::Power => c.norm_sqr(),
                    SpectrumScale::Density => {
                        let folded = if k > 0 && k < last_doubled { 2.0 } else { 1.0 };
                        c.norm_sqr() * density_norm * folded
                    }
                };
            }
        }

        Ok(SpectrogramMatrix {
            values,
            sample_rate: samples.sample_rate(),
            segment_length,
            hop,
            scale,
        })
    }
}

impl Default for SpectrogramEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute a spectrogram with a fresh engine
pub fn compute_spectrogram(
    samples: &WaveformBuffer,
    params: &AnalysisParameters,
) -> Result<SpectrogramMatrix> {
    SpectrogramEngine::new().compute(samples, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::windows::WindowKind;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, sample_rate: u32, n: usize) -> WaveformBuffer {
        let samples = (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate as f64).sin())
            .collect();
        WaveformBuffer::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_scenario_thousand_samples() {
        let buffer = sine(440.0, 8000, 1000);
        let params = AnalysisParameters::from_ui("hamming", 256, 50).unwrap();

        let matrix = compute_spectrogram(&buffer, &params).unwrap();

        assert_eq!(matrix.hop(), 128);
        assert_eq!(matrix.num_frames(), 6);
        assert_eq!(matrix.num_bins(), 129);
        assert_eq!(matrix.values().dim(), (129, 6));
    }

    #[test]
    fn test_short_buffer_is_single_padded_frame() {
        let buffer = sine(440.0, 8000, 50);
        let params = AnalysisParameters::from_ui("hann", 256, 50).unwrap();

        let matrix = compute_spectrogram(&buffer, &params).unwrap();

        assert_eq!(matrix.num_frames(), 1);
        assert_eq!(matrix.num_bins(), 129);
        assert_eq!(matrix.frame_start_times(), vec![0.0]);
    }

    #[test]
    fn test_column_count_formula() {
        for &(n, length, percent) in &[
            (256, 256, 50),
            (257, 256, 50),
            (4096, 64, 90),
            (5000, 1024, 30),
            (17, 16, 10),
        ] {
            let buffer = sine(100.0, 8000, n);
            let params = AnalysisParameters::from_ui("blackman", length, percent).unwrap();
            let hop = params.hop();

            let matrix = compute_spectrogram(&buffer, &params).unwrap();

            assert_eq!(matrix.num_frames(), (n - length) / hop + 1);
            assert_eq!(matrix.num_bins(), length / 2 + 1);
        }
    }

    #[test]
    fn test_sinusoid_peak_in_every_frame() {
        let sample_rate = 8000;
        let length = 256;
        let freq_hz = 1000.0;
        let buffer = sine(freq_hz, sample_rate, 4000);

        for &kind in WindowKind::ALL.iter() {
            let params = AnalysisParameters::new(kind, length, 0.5).unwrap();
            let matrix = compute_spectrogram(&buffer, &params).unwrap();
            let expected = (freq_hz * length as f64 / sample_rate as f64).round() as i64;

            for frame in 0..matrix.num_frames() {
                let peak = matrix.peak_bin(frame).unwrap() as i64;
                assert!(
                    (peak - expected).abs() <= 1,
                    "{}: frame {} peaked at bin {}",
                    kind,
                    frame,
                    peak
                );
            }
        }
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let buffer = sine(733.0, 11025, 3000);
        let params = AnalysisParameters::from_ui("flattop", 512, 70).unwrap();
        let mut engine = SpectrogramEngine::new();

        let first = engine.compute(&buffer, &params).unwrap();
        let second = engine.compute(&buffer, &params).unwrap();
        let fresh = compute_spectrogram(&buffer, &params).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_engine_switches_segment_length() {
        let buffer = sine(500.0, 8000, 2048);
        let mut engine = SpectrogramEngine::new();

        let small = AnalysisParameters::from_ui("hann", 64, 50).unwrap();
        let large = AnalysisParameters::from_ui("hann", 1024, 50).unwrap();

        assert_eq!(engine.compute(&buffer, &small).unwrap().num_bins(), 33);
        assert_eq!(engine.compute(&buffer, &large).unwrap().num_bins(), 513);
        assert_eq!(engine.compute(&buffer, &small).unwrap().num_bins(), 33);
    }

    #[test]
    fn test_silence_keeps_exact_zeros() {
        let buffer = WaveformBuffer::new(vec![0.0; 1024], 8000).unwrap();
        let params = AnalysisParameters::default();

        let matrix = compute_spectrogram(&buffer, &params).unwrap();

        assert!(matrix.values().iter().all(|&v| v == 0.0));
        assert!(matrix.to_db(1e-10).iter().all(|&v| (v + 200.0).abs() < 1e-9));
    }

    #[test]
    fn test_values_are_non_negative() {
        let buffer = sine(321.0, 8000, 2000);
        for scale in [SpectrumScale::Magnitude, SpectrumScale::Power, SpectrumScale::Density] {
            for &kind in WindowKind::ALL.iter() {
                let params = AnalysisParameters::new(kind, 128, 0.25)
                    .unwrap()
                    .with_scale(scale);
                let matrix = compute_spectrogram(&buffer, &params).unwrap();
                assert!(matrix.values().iter().all(|&v| v >= 0.0));
            }
        }
    }

    #[test]
    fn test_power_and_density_scales() {
        let buffer = sine(1000.0, 8000, 2048);
        let base = AnalysisParameters::from_ui("hann", 256, 50).unwrap();

        let magnitude = compute_spectrogram(&buffer, &base).unwrap();
        let power = compute_spectrogram(&buffer, &base.with_scale(SpectrumScale::Power)).unwrap();
        let density =
            compute_spectrogram(&buffer, &base.with_scale(SpectrumScale::Density)).unwrap();

        let window = generate_window(WindowKind::Hann, 256).unwrap();
        let norm = 1.0 / (8000.0 * power_sum(&window));

        for frame in 0..magnitude.num_frames() {
            for bin in 0..magnitude.num_bins() {
                let m = magnitude.get(bin, frame).unwrap();
                let p = power.get(bin, frame).unwrap();
                let d = density.get(bin, frame).unwrap();
                let folded = if bin == 0 || bin == 128 { 1.0 } else { 2.0 };

                assert!((m * m - p).abs() <= 1e-9 * p.max(1.0));
                assert!((p * norm * folded - d).abs() <= 1e-12 * d.max(1.0));
            }
        }
    }

    #[test]
    fn test_matches_complex_fft() {
        use rustfft::{num_complex::Complex, FftPlanner};

        let buffer = sine(440.0, 8000, 300);
        let params = AnalysisParameters::from_ui("bartlett", 64, 0).unwrap();
        let matrix = compute_spectrogram(&buffer, &params).unwrap();
        let window = generate_window(WindowKind::Bartlett, 64).unwrap();

        let fft = FftPlanner::<f64>::new().plan_fft_forward(64);
        for frame in 0..matrix.num_frames() {
            let start = frame * 64;
            let mut data: Vec<Complex<f64>> = buffer.samples()[start..start + 64]
                .iter()
                .zip(window.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0))
                .collect();
            fft.process(&mut data);

            for bin in 0..33 {
                let expected = data[bin].norm();
                assert!((matrix.get(bin, frame).unwrap() - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_axes() {
        let buffer = sine(100.0, 8000, 1000);
        let params = AnalysisParameters::from_ui("hamming", 256, 50).unwrap();
        let matrix = compute_spectrogram(&buffer, &params).unwrap();

        let freqs = matrix.frequencies();
        assert_eq!(freqs.len(), 129);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[128], 4000.0);

        let starts = matrix.frame_start_times();
        assert_eq!(starts, vec![0.0, 0.016, 0.032, 0.048, 0.064, 0.08]);
        assert_eq!(matrix.frame_center_times()[0], 0.016);
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(1000, 256, 128), 6);
        assert_eq!(frame_count(50, 256, 128), 1);
        assert_eq!(frame_count(256, 256, 1), 1);
        assert_eq!(frame_count(300, 256, 0), 45);
    }
}
