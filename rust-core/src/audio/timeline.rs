//! Time axis for the waveform view

use crate::error::{Result, SonogramError};

/// One timestamp per sample, t[i] = i / Fs
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    times: Vec<f64>,
    sample_rate: f64,
}

impl TimeAxis {
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Spacing between consecutive stamps
    pub fn step(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// End of the covered interval [0, N/Fs)
    pub fn span(&self) -> f64 {
        self.times.len() as f64 / self.sample_rate
    }

    pub fn into_times(self) -> Vec<f64> {
        self.times
    }
}

/// Build a uniform time axis
///
/// # Arguments
/// * `n` - Number of samples
/// * `sample_rate` - Samples per second, must be positive and finite
pub fn build_time_axis(n: usize, sample_rate: f64) -> Result<TimeAxis> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(SonogramError::InvalidParameter(format!(
            "sample rate must be positive, got {}",
            sample_rate
        )));
    }

    // Per-index division; accumulating 1/Fs drifts on long files
    let times = (0..n).map(|i| i as f64 / sample_rate).collect();

    Ok(TimeAxis { times, sample_rate })
}
