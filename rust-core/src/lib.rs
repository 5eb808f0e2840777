//! Sonogram - Waveform and Spectrogram Analysis Core
//! 
//! Turns a recorded waveform into a time axis with amplitude samples and a
//! windowed STFT time–frequency matrix, ready for an external renderer.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod audio;
pub mod spectrum;
pub mod session;
pub mod export;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SonogramError};
pub use audio::{WaveformBuffer, TimeAxis, PlaybackTransport};
pub use spectrum::{AnalysisParameters, SpectrogramEngine, SpectrogramMatrix, WindowKind, compute_spectrogram};
pub use session::{Analysis, AnalysisSession};
