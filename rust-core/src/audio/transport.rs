//! Playback transport
//!
//! A small state machine around an external [`PlaybackSink`]:
//!
//! ```text
//! Idle --load--> Loaded --play--> Playing --stop--> Stopped --load--> Loaded
//!                                    ^                  |
//!                                    +------play--------+
//! ```
//!
//! Pause and seek do not exist.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::{Result, SonogramError};

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Loaded,
    Playing,
    Stopped,
}

/// Whatever actually turns a file into sound
pub trait PlaybackSink {
    /// Begin playing `path` from the start
    fn start(&mut self, path: &Path) -> Result<()>;

    /// Stop any playback in progress
    fn halt(&mut self) -> Result<()>;
}

/// Sink without a device, for headless use and tests
#[derive(Debug, Default)]
pub struct NullSink {
    started: Vec<PathBuf>,
    halts: usize,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths passed to `start`, in order
    pub fn started(&self) -> &[PathBuf] {
        &self.started
    }

    pub fn halts(&self) -> usize {
        self.halts
    }
}

impl PlaybackSink for NullSink {
    fn start(&mut self, path: &Path) -> Result<()> {
        self.started.push(path.to_path_buf());
        Ok(())
    }

    fn halt(&mut self) -> Result<()> {
        self.halts += 1;
        Ok(())
    }
}

/// Load/play/stop controller
pub struct PlaybackTransport<K: PlaybackSink> {
    sink: K,
    state: TransportState,
    file: Option<PathBuf>,
}

impl<K: PlaybackSink> PlaybackTransport<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            state: TransportState::Idle,
            file: None,
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Remember `path` as the file to play
    ///
    /// Loading while playing stops the current playback first.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        if self.state == TransportState::Playing {
            self.sink.halt()?;
        }

        let path = path.into();
        info!("Transport loaded {}", path.display());
        self.file = Some(path);
        self.state = TransportState::Loaded;
        Ok(())
    }

    /// Start playing the loaded file
    ///
    /// # Errors
    /// `NoFileSelected` if nothing was loaded; sink errors leave the state
    /// unchanged.
    pub fn play(&mut self) -> Result<()> {
        let path = match (&self.file, self.state) {
            (_, TransportState::Playing) => return Ok(()),
            (Some(path), TransportState::Loaded | TransportState::Stopped) => path,
            _ => return Err(SonogramError::NoFileSelected),
        };

        self.sink.start(path)?;
        debug!("Transport playing {}", path.display());
        self.state = TransportState::Playing;
        Ok(())
    }

    /// Stop playback; a no-op unless playing
    pub fn stop(&mut self) -> Result<()> {
        if self.state != TransportState::Playing {
            return Ok(());
        }

        self.sink.halt()?;
        debug!("Transport stopped");
        self.state = TransportState::Stopped;
        Ok(())
    }
}
