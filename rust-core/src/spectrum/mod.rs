//! Windowed STFT analysis

pub mod windows;
pub mod windowing;
pub mod fft;
pub mod params;
pub mod spectrogram;

pub use windows::{WindowKind, generate_window, window_by_name};
pub use fft::FftEngine;
pub use params::{AnalysisParameters, SpectrumScale};
pub use spectrogram::{SpectrogramEngine, SpectrogramMatrix, compute_spectrogram};
