//! Waveform file decoding
//!
//! The analysis core only depends on the [`SampleSource`] contract;
//! [`WavSource`] is the PCM WAV implementation backed by hound.

use hound::{SampleFormat, WavReader};
use log::{debug, info};
use ndarray::ArrayView2;
use std::path::Path;

use crate::error::{Result, SonogramError};

/// Decoded samples, interleaved frame by frame
///
/// Integer PCM keeps its raw amplitude (no rescaling to ±1), float PCM is
/// passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f64>,
    /// Amplitude of a full-scale sample (2^(bits-1) for integer PCM, 1.0 for float)
    pub full_scale: f64,
}

impl DecodedAudio {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// View as a (frames × channels) array
    pub fn as_frames(&self) -> Result<ArrayView2<'_, f64>> {
        let channels = self.channels as usize;
        if channels == 0 || self.samples.len() % channels != 0 {
            return Err(SonogramError::InvalidInput(format!(
                "{} samples do not divide into {} channels",
                self.samples.len(),
                self.channels
            )));
        }
        ArrayView2::from_shape((self.samples.len() / channels, channels), &self.samples)
            .map_err(|e| SonogramError::InvalidInput(e.to_string()))
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Anything that can turn a path into decoded samples
pub trait SampleSource {
    /// Decode the file at `path`
    ///
    /// # Errors
    /// `FileRead` for missing, unreadable or non-waveform files.
    fn read(&self, path: &Path) -> Result<DecodedAudio>;
}

/// PCM WAV reader
#[derive(Debug, Clone, Copy, Default)]
pub struct WavSource;

impl WavSource {
    pub fn new() -> Self {
        Self
    }
}

impl SampleSource for WavSource {
    fn read(&self, path: &Path) -> Result<DecodedAudio> {
        let mut reader =
            WavReader::open(path).map_err(|e| SonogramError::file_read(path, e))?;

        let spec = reader.spec();
        debug!(
            "{}: {:?} {} bit, {} ch @ {} Hz",
            path.display(),
            spec.sample_format,
            spec.bits_per_sample,
            spec.channels,
            spec.sample_rate
        );

        let full_scale = match spec.sample_format {
            SampleFormat::Float => 1.0,
            SampleFormat::Int => (1u64 << (spec.bits_per_sample.max(1) - 1)) as f64,
        };

        let samples: Vec<f64> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<Vec<f64>, _>>(),
            SampleFormat::Int => match spec.bits_per_sample {
                8 => reader
                    .samples::<i8>()
                    .map(|s| s.map(f64::from))
                    .collect::<std::result::Result<Vec<f64>, _>>(),
                16 => reader
                    .samples::<i16>()
                    .map(|s| s.map(f64::from))
                    .collect::<std::result::Result<Vec<f64>, _>>(),
                24 | 32 => reader
                    .samples::<i32>()
                    .map(|s| s.map(f64::from))
                    .collect::<std::result::Result<Vec<f64>, _>>(),
                bits => {
                    return Err(SonogramError::file_read(
                        path,
                        format!("unsupported bit depth {}", bits),
                    ))
                }
            },
        }
        .map_err(|e| SonogramError::file_read(path, e))?;

        let audio = DecodedAudio {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
            full_scale,
        };

        info!(
            "Loaded {} ({} frames, {:.2} s)",
            path.display(),
            audio.frames(),
            audio.duration()
        );

        Ok(audio)
    }
}
