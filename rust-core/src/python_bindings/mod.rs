//! PyO3 bindings for a Python renderer

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::SonogramError;

mod spectrogram_bindings;
mod session_bindings;
mod transport_bindings;

impl From<SonogramError> for PyErr {
    fn from(err: SonogramError) -> Self {
        match err {
            SonogramError::FileRead { .. } | SonogramError::Export(_) => PyIOError::new_err(err.to_string()),
            SonogramError::InvalidParameter(_)
            | SonogramError::UnknownWindow(_)
            | SonogramError::InvalidInput(_) => PyValueError::new_err(err.to_string()),
            SonogramError::NoFileSelected | SonogramError::Playback(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
        }
    }
}

/// Python module definition
#[pymodule]
fn sonogram(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrogram_bindings::PySpectrogram>()?;
    m.add_class::<session_bindings::PySession>()?;
    m.add_class::<transport_bindings::PyTransport>()?;

    m.add_function(wrap_pyfunction!(spectrogram_bindings::time_axis, m)?)?;
    m.add_function(wrap_pyfunction!(spectrogram_bindings::get_window, m)?)?;
    m.add_function(wrap_pyfunction!(session_bindings::load_wav, m)?)?;

    m.add("WINDOWS", crate::spectrum::params::WINDOW_CHOICES.to_vec())?;
    m.add("SEGMENT_LENGTHS", crate::spectrum::params::SEGMENT_LENGTH_CHOICES.to_vec())?;
    m.add("OVERLAP_PERCENTS", crate::spectrum::params::OVERLAP_PERCENT_CHOICES.to_vec())?;

    Ok(())
}
