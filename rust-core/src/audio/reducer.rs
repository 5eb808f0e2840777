//! Channel reduction
//!
//! The analysis pipeline is single-channel. Instead of averaging channels,
//! which would change the spectral content, the first channel is kept.

use log::debug;
use ndarray::ArrayView2;

use super::source::DecodedAudio;
use super::waveform::WaveformBuffer;
use crate::error::{Result, SonogramError};

/// Keep channel 0 of decoded, interleaved audio
///
/// # Errors
/// `InvalidInput` for zero samples, zero channels, a zero sample rate or a
/// sample count that is not a whole number of frames.
pub fn reduce_to_first_channel(audio: &DecodedAudio) -> Result<WaveformBuffer> {
    if audio.samples.is_empty() {
        return Err(SonogramError::InvalidInput(
            "decoded audio contains no samples".to_string(),
        ));
    }
    if audio.channels == 0 {
        return Err(SonogramError::InvalidInput(
            "decoded audio reports zero channels".to_string(),
        ));
    }

    first_channel_of(audio.as_frames()?, audio.sample_rate)
}

/// Keep column 0 of a (frames × channels) array
pub fn first_channel_of(frames: ArrayView2<'_, f64>, sample_rate: u32) -> Result<WaveformBuffer> {
    let (n, channels) = frames.dim();
    if n == 0 || channels == 0 {
        return Err(SonogramError::InvalidInput(format!(
            "cannot reduce a {}x{} sample array",
            n, channels
        )));
    }
    if channels > 1 {
        debug!("keeping channel 0 of {}", channels);
    }

    WaveformBuffer::new(frames.column(0).to_vec(), sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_stereo_keeps_first_column() {
        let n = 500;
        let stereo = Array2::from_shape_fn((n, 2), |(i, c)| if c == 0 { i as f64 } else { -1.0 });

        let buffer = first_channel_of(stereo.view(), 44100).unwrap();

        assert_eq!(buffer.len(), n);
        assert_eq!(buffer.samples(), stereo.column(0).to_vec().as_slice());
    }

    #[test]
    fn test_interleaved_decoded_audio() {
        let audio = DecodedAudio {
            sample_rate: 8000,
            channels: 3,
            samples: vec![1.0, 10.0, 100.0, 2.0, 20.0, 200.0],
            full_scale: 1.0,
        };

        let buffer = reduce_to_first_channel(&audio).unwrap();

        assert_eq!(buffer.samples(), &[1.0, 2.0]);
        assert_eq!(buffer.sample_rate(), 8000);
    }

    #[test]
    fn test_mono_passes_through() {
        let audio = DecodedAudio {
            sample_rate: 16000,
            channels: 1,
            samples: vec![3.0, -4.0, 5.0],
            full_scale: 1.0,
        };

        let buffer = reduce_to_first_channel(&audio).unwrap();
        assert_eq!(buffer.samples(), &[3.0, -4.0, 5.0]);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        let empty = DecodedAudio {
            sample_rate: 8000,
            channels: 2,
            samples: Vec::new(),
            full_scale: 1.0,
        };
        assert!(matches!(
            reduce_to_first_channel(&empty),
            Err(SonogramError::InvalidInput(_))
        ));

        let no_channels = DecodedAudio {
            sample_rate: 8000,
            channels: 0,
            samples: vec![1.0],
            full_scale: 1.0,
        };
        assert!(matches!(
            reduce_to_first_channel(&no_channels),
            Err(SonogramError::InvalidInput(_))
        ));

        let ragged = DecodedAudio {
            sample_rate: 8000,
            channels: 2,
            samples: vec![1.0, 2.0, 3.0],
            full_scale: 1.0,
        };
        assert!(matches!(
            reduce_to_first_channel(&ragged),
            Err(SonogramError::InvalidInput(_))
        ));

        let zero_width = Array2::<f64>::zeros((4, 0));
        assert!(first_channel_of(zero_width.view(), 8000).is_err());
    }
}
