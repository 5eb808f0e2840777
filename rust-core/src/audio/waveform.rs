//! Single-channel analysis buffer

use crate::error::{Result, SonogramError};

/// Mono samples plus their sample rate
///
/// Never empty, never mutated after construction. A new file load replaces
/// the whole buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl WaveformBuffer {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(SonogramError::InvalidInput(
                "waveform must contain at least one sample".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(SonogramError::InvalidInput(
                "sample rate must be positive".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute amplitude, handy for scaling a waveform plot
    pub fn peak_amplitude(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc: f64, &s| acc.max(s.abs()))
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_and_peak() {
        let buffer = WaveformBuffer::new(vec![0.0, -3.0, 2.0, 1.0], 4).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.duration(), 1.0);
        assert_eq!(buffer.peak_amplitude(), 3.0);
    }

    #[test]
    fn test_rejects_empty_and_zero_rate() {
        assert!(matches!(
            WaveformBuffer::new(Vec::new(), 8000),
            Err(SonogramError::InvalidInput(_))
        ));
        assert!(matches!(
            WaveformBuffer::new(vec![1.0], 0),
            Err(SonogramError::InvalidInput(_))
        ));
    }
}
