//! Sample loading, channel reduction, time axis and playback transport

pub mod source;
pub mod waveform;
pub mod reducer;
pub mod timeline;
pub mod transport;
#[cfg(feature = "playback")]
pub mod buffer;
#[cfg(feature = "playback")]
pub mod output;

pub use source::{DecodedAudio, SampleSource, WavSource};
pub use waveform::WaveformBuffer;
pub use reducer::{first_channel_of, reduce_to_first_channel};
pub use timeline::{TimeAxis, build_time_axis};
pub use transport::{NullSink, PlaybackSink, PlaybackTransport, TransportState};
#[cfg(feature = "playback")]
pub use buffer::AudioRingBuffer;
#[cfg(feature = "playback")]
pub use output::{AudioOutput, DeviceSink};
