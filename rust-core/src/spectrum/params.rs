//! Analysis parameters
//!
//! An immutable value built once per "generate" request. The UI offers only
//! enumerated choices, but every constructor re-checks the numeric invariants.

use super::windows::WindowKind;
use crate::error::{Result, SonogramError};

/// Segment lengths offered to the user
pub const SEGMENT_LENGTH_CHOICES: [usize; 8] = [16, 32, 64, 128, 256, 512, 1024, 2048];

/// Overlap percentages offered to the user
pub const OVERLAP_PERCENT_CHOICES: [u32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Window names offered to the user
pub const WINDOW_CHOICES: [&str; 8] = [
    "hamming",
    "triangular",
    "blackman",
    "hann",
    "bartlett",
    "flattop",
    "bohman",
    "barthann",
];

pub const DEFAULT_SEGMENT_LENGTH: usize = 256;
pub const DEFAULT_OVERLAP_PERCENT: u32 = 10;

/// Value stored in each spectrogram cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumScale {
    /// |X[k]|
    #[default]
    Magnitude,

    /// |X[k]|²
    Power,

    /// One-sided power spectral density: |X[k]|² / (Fs·Σw²), doubled
    /// except at DC and Nyquist
    Density,
}

impl SpectrumScale {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "magnitude" => Ok(SpectrumScale::Magnitude),
            "power" => Ok(SpectrumScale::Power),
            "density" | "psd" => Ok(SpectrumScale::Density),
            other => Err(SonogramError::InvalidParameter(format!(
                "unknown spectrum scale {:?}",
                other
            ))),
        }
    }

    /// Decibel factor: 20 for amplitude quantities, 10 for power quantities
    pub fn db_factor(&self) -> f64 {
        match self {
            SpectrumScale::Magnitude => 20.0,
            SpectrumScale::Power | SpectrumScale::Density => 10.0,
        }
    }
}

/// Validated STFT configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParameters {
    window: WindowKind,
    segment_length: usize,
    overlap_fraction: f64,
    scale: SpectrumScale,
}

impl AnalysisParameters {
    /// Build parameters from typed values
    ///
    /// # Arguments
    /// * `window` - Window applied to each segment
    /// * `segment_length` - Samples per frame (NFFT), positive
    /// * `overlap_fraction` - Share of a segment reused by the next, in [0, 1)
    pub fn new(window: WindowKind, segment_length: usize, overlap_fraction: f64) -> Result<Self> {
        validate(segment_length, overlap_fraction)?;

        Ok(Self {
            window,
            segment_length,
            overlap_fraction,
            scale: SpectrumScale::default(),
        })
    }

    /// Build parameters from the values a UI hands over
    ///
    /// # Arguments
    /// * `window_name` - Window name, e.g. `"hamming"`
    /// * `segment_length` - Samples per frame
    /// * `overlap_percent` - Overlap as an integer percentage, 0 ≤ p < 100
    pub fn from_ui(window_name: &str, segment_length: usize, overlap_percent: u32) -> Result<Self> {
        let window = WindowKind::from_name(window_name)?;

        if overlap_percent >= 100 {
            return Err(SonogramError::InvalidParameter(format!(
                "overlap must be below 100%, got {}%",
                overlap_percent
            )));
        }

        Self::new(window, segment_length, overlap_percent as f64 / 100.0)
    }

    /// Same parameters with a different cell scale
    pub fn with_scale(mut self, scale: SpectrumScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    pub fn overlap_fraction(&self) -> f64 {
        self.overlap_fraction
    }

    pub fn scale(&self) -> SpectrumScale {
        self.scale
    }

    /// Samples advanced between frames
    pub fn hop(&self) -> usize {
        hop_length(self.segment_length, self.overlap_fraction)
    }

    /// Overlap expressed in samples
    pub fn overlap_samples(&self) -> usize {
        self.segment_length - self.hop().min(self.segment_length)
    }

    /// Number of frequency rows produced for real input
    pub fn num_bins(&self) -> usize {
        self.segment_length / 2 + 1
    }
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            window: WindowKind::Hamming,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            overlap_fraction: DEFAULT_OVERLAP_PERCENT as f64 / 100.0,
            scale: SpectrumScale::default(),
        }
    }
}

/// hop = max(1, round(L·(1 − overlap)))
pub fn hop_length(segment_length: usize, overlap_fraction: f64) -> usize {
    let hop = (segment_length as f64 * (1.0 - overlap_fraction)).round();
    (hop as usize).max(1)
}

pub(crate) fn validate(segment_length: usize, overlap_fraction: f64) -> Result<()> {
    if segment_length == 0 {
        return Err(SonogramError::InvalidParameter(
            "segment length must be positive".to_string(),
        ));
    }
    if !overlap_fraction.is_finite() || !(0.0..1.0).contains(&overlap_fraction) {
        return Err(SonogramError::InvalidParameter(format!(
            "overlap fraction must lie in [0, 1), got {}",
            overlap_fraction
        )));
    }
    Ok(())
}
