//! Python bindings for the playback transport

use pyo3::prelude::*;
use std::path::PathBuf;

use crate::audio::{PlaybackTransport, TransportState};

#[cfg(feature = "playback")]
type Sink = crate::audio::DeviceSink;
#[cfg(not(feature = "playback"))]
type Sink = crate::audio::NullSink;

/// Load/play/stop controller exposed to Python
#[pyclass(name = "Transport", unsendable)]
pub struct PyTransport {
    transport: PlaybackTransport<Sink>,
}

#[pymethods]
impl PyTransport {
    #[new]
    fn new() -> Self {
        Self {
            transport: PlaybackTransport::new(Sink::default()),
        }
    }

    /// Remember the file to play
    fn load(&mut self, path: PathBuf) -> PyResult<()> {
        Ok(self.transport.load(path)?)
    }

    /// Play the loaded file; raises RuntimeError when nothing is loaded
    fn play(&mut self) -> PyResult<()> {
        Ok(self.transport.play()?)
    }

    /// Stop playback
    fn stop(&mut self) -> PyResult<()> {
        Ok(self.transport.stop()?)
    }

    /// One of "idle", "loaded", "playing", "stopped"
    #[getter]
    fn state(&self) -> &'static str {
        match self.transport.state() {
            TransportState::Idle => "idle",
            TransportState::Loaded => "loaded",
            TransportState::Playing => "playing",
            TransportState::Stopped => "stopped",
        }
    }
}
