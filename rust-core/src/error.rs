//! Error taxonomy shared by every analysis and playback operation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SonogramError {
    #[error("Failed to read waveform file {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("Invalid analysis parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown window function: {0:?}")]
    UnknownWindow(String),

    #[error("No waveform file has been selected")]
    NoFileSelected,

    #[error("Invalid sample data: {0}")]
    InvalidInput(String),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Failed to export spectrogram: {0}")]
    Export(String),
}

impl SonogramError {
    pub(crate) fn file_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SonogramError>;
