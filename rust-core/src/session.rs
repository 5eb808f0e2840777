//! The "generate" action
//!
//! Ties file selection, decoding, channel reduction, the time axis and the
//! spectrogram together. A failed generate leaves the previous result as it
//! was, so a renderer can keep showing it.

use log::info;
use std::path::{Path, PathBuf};

use crate::audio::{build_time_axis, reduce_to_first_channel, SampleSource, TimeAxis, WavSource, WaveformBuffer};
use crate::error::{Result, SonogramError};
use crate::spectrum::{AnalysisParameters, SpectrogramEngine, SpectrogramMatrix};

/// Everything a renderer needs for both views
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub waveform: WaveformBuffer,
    pub time_axis: TimeAxis,
    pub spectrogram: SpectrogramMatrix,
    pub params: AnalysisParameters,
}

impl Analysis {
    /// Analyse an already reduced buffer
    pub fn of_waveform(
        engine: &mut SpectrogramEngine,
        waveform: WaveformBuffer,
        params: &AnalysisParameters,
    ) -> Result<Self> {
        let time_axis = build_time_axis(waveform.len(), waveform.sample_rate() as f64)?;
        let spectrogram = engine.compute(&waveform, params)?;

        Ok(Self {
            waveform,
            time_axis,
            spectrogram,
            params: *params,
        })
    }
}

/// Current file plus the most recent analysis
pub struct AnalysisSession<S: SampleSource = WavSource> {
    source: S,
    engine: SpectrogramEngine,
    current_file: Option<PathBuf>,
    last: Option<Analysis>,
}

impl AnalysisSession<WavSource> {
    pub fn new() -> Self {
        Self::with_source(WavSource::new())
    }
}

impl Default for AnalysisSession<WavSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SampleSource> AnalysisSession<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            engine: SpectrogramEngine::new(),
            current_file: None,
            last: None,
        }
    }

    /// Select the file the next generate reads
    ///
    /// The only way the current-file reference changes.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        info!("Selected {}", path.display());
        self.current_file = Some(path);
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Result of the last successful generate
    pub fn last_analysis(&self) -> Option<&Analysis> {
        self.last.as_ref()
    }

    /// Read the current file and compute both views
    ///
    /// # Errors
    /// `NoFileSelected`, `FileRead`, `InvalidInput` or parameter errors; the
    /// previous analysis is kept on any of them.
    pub fn generate(&mut self, params: &AnalysisParameters) -> Result<&Analysis> {
        let path = self
            .current_file
            .as_deref()
            .ok_or(SonogramError::NoFileSelected)?;

        let audio = self.source.read(path)?;
        let waveform = reduce_to_first_channel(&audio)?;
        let analysis = Analysis::of_waveform(&mut self.engine, waveform, params)?;

        info!(
            "Generated {}: {} samples, {} frames x {} bins ({}, L={}, hop={})",
            path.display(),
            analysis.waveform.len(),
            analysis.spectrogram.num_frames(),
            analysis.spectrogram.num_bins(),
            params.window(),
            params.segment_length(),
            params.hop()
        );

        Ok(&*self.last.insert(analysis))
    }
}
