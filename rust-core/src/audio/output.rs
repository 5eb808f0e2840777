//! Device playback using cpal
//!
//! [`DeviceSink`] decodes the selected file, converts it to the output
//! device's channel layout and streams it from a pre-filled ring buffer.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use log::{error, info};
use std::path::Path;

use super::buffer::{AudioConsumer, AudioRingBuffer};
use super::source::{DecodedAudio, SampleSource, WavSource};
use super::transport::PlaybackSink;
use crate::error::{Result, SonogramError};

/// Audio output device information
#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Audio output stream
pub struct AudioOutput {
    stream: Stream,
    device_info: AudioDeviceInfo,
}

impl AudioOutput {
    /// Open a stream on `device` at the clip's sample rate
    ///
    /// # Arguments
    /// * `consumer` - Ring buffer holding interleaved samples in the device's channel count
    pub fn from_device(
        device: &Device,
        channels: u16,
        sample_rate: u32,
        consumer: AudioConsumer,
    ) -> Result<Self> {
        let name = device
            .name()
            .map_err(|e| SonogramError::Playback(e.to_string()))?;

        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut consumer = consumer;
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    consumer.read_or_silence(data);
                },
                move |err| {
                    error!("Audio output error: {}", err);
                },
                None,
            )
            .map_err(|e| SonogramError::Playback(format!("failed to build stream: {}", e)))?;

        Ok(Self {
            stream,
            device_info: AudioDeviceInfo {
                name,
                sample_rate,
                channels,
            },
        })
    }

    /// Start playing audio
    pub fn start(&self) -> Result<()> {
        self.stream
            .play()
            .map_err(|e| SonogramError::Playback(e.to_string()))
    }

    /// Pause audio playback
    pub fn pause(&self) -> Result<()> {
        self.stream
            .pause()
            .map_err(|e| SonogramError::Playback(e.to_string()))
    }

    /// Get device information
    pub fn device_info(&self) -> &AudioDeviceInfo {
        &self.device_info
    }
}

/// Normalise `audio` to ±1 and lay it out for `device_channels`
///
/// Extra device channels repeat the clip's last channel; surplus clip
/// channels are dropped.
pub fn remap_channels(audio: &DecodedAudio, device_channels: u16) -> Vec<f32> {
    let clip_channels = audio.channels.max(1) as usize;
    let device_channels = device_channels.max(1) as usize;
    let gain = if audio.full_scale > 0.0 {
        1.0 / audio.full_scale
    } else {
        1.0
    };

    let mut out = Vec::with_capacity(audio.frames() * device_channels);
    for frame in audio.samples.chunks_exact(clip_channels) {
        for c in 0..device_channels {
            out.push((frame[c.min(clip_channels - 1)] * gain) as f32);
        }
    }
    out
}

/// Default output device as a [`PlaybackSink`]
pub struct DeviceSink<S: SampleSource = WavSource> {
    source: S,
    output: Option<AudioOutput>,
}

impl DeviceSink<WavSource> {
    pub fn new() -> Self {
        Self::with_source(WavSource::new())
    }
}

impl Default for DeviceSink<WavSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SampleSource> DeviceSink<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            output: None,
        }
    }
}

impl<S: SampleSource> PlaybackSink for DeviceSink<S> {
    fn start(&mut self, path: &Path) -> Result<()> {
        self.halt()?;

        let audio = self.source.read(path)?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| SonogramError::Playback("no audio output device found".to_string()))?;
        let device_channels = device
            .default_output_config()
            .map_err(|e| SonogramError::Playback(e.to_string()))?
            .channels();

        let clip = remap_channels(&audio, device_channels);
        let consumer = AudioRingBuffer::with_clip(&clip);
        let output = AudioOutput::from_device(&device, device_channels, audio.sample_rate, consumer)?;
        output.start()?;

        info!(
            "Playing {} on {} ({} ch @ {} Hz)",
            path.display(),
            output.device_info().name,
            output.device_info().channels,
            output.device_info().sample_rate
        );
        self.output = Some(output);
        Ok(())
    }

    fn halt(&mut self) -> Result<()> {
        if let Some(output) = self.output.take() {
            output.pause()?;
        }
        Ok(())
    }
}
