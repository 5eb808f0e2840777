//! Window functions for STFT segmentation
//!
//! Closed catalog of the eight classical windows offered to the user.
//! All windows are generated in their symmetric form.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SonogramError};

/// Flat top window cosine-sum coefficients
const FLATTOP_COEFFS: [f64; 5] = [
    0.21557895,
    0.41663158,
    0.277263158,
    0.083578947,
    0.006947368,
];

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Triangular window with non-zero endpoints
    Triangular,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Bartlett window: triangle reaching zero at both ends
    Bartlett,

    /// Flat top window: 5-term cosine sum, edges dip slightly below zero
    Flattop,

    /// Bohman window: convolution of two half-cosines
    Bohman,

    /// Modified Bartlett-Hann window
    Barthann,
}

impl WindowKind {
    /// Every supported window, in the order presented to the user
    pub const ALL: [WindowKind; 8] = [
        WindowKind::Hamming,
        WindowKind::Triangular,
        WindowKind::Blackman,
        WindowKind::Hann,
        WindowKind::Bartlett,
        WindowKind::Flattop,
        WindowKind::Bohman,
        WindowKind::Barthann,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Hamming => "hamming",
            WindowKind::Triangular => "triangular",
            WindowKind::Blackman => "blackman",
            WindowKind::Hann => "hann",
            WindowKind::Bartlett => "bartlett",
            WindowKind::Flattop => "flattop",
            WindowKind::Bohman => "bohman",
            WindowKind::Barthann => "barthann",
        }
    }

    /// Resolve a window by name
    ///
    /// Accepts the canonical names plus `triang` and `hanning`, ignoring case
    /// and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hamming" => Ok(WindowKind::Hamming),
            "triangular" | "triang" => Ok(WindowKind::Triangular),
            "blackman" => Ok(WindowKind::Blackman),
            "hann" | "hanning" => Ok(WindowKind::Hann),
            "bartlett" => Ok(WindowKind::Bartlett),
            "flattop" => Ok(WindowKind::Flattop),
            "bohman" => Ok(WindowKind::Bohman),
            "barthann" => Ok(WindowKind::Barthann),
            _ => Err(SonogramError::UnknownWindow(name.to_string())),
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowKind {
    type Err = SonogramError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `kind` - Window function
/// * `length` - Number of samples (M), must be positive
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(kind: WindowKind, length: usize) -> Result<Vec<f64>> {
    if length == 0 {
        return Err(SonogramError::InvalidParameter(
            "window length must be positive".to_string(),
        ));
    }
    if length == 1 {
        return Ok(vec![1.0]);
    }

    let m = length as f64;
    let denom = m - 1.0;

    let window = match kind {
        WindowKind::Hamming => (0..length)
            .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
            .collect(),

        WindowKind::Hann => (0..length)
            .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f64 / denom).cos())
            .collect(),

        WindowKind::Blackman => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / denom;
                let w = 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos();
                // cos() rounding leaves tiny negatives at the edges
                w.max(0.0)
            })
            .collect(),

        WindowKind::Bartlett => (0..length)
            .map(|n| 1.0 - (2.0 * n as f64 / denom - 1.0).abs())
            .collect(),

        WindowKind::Triangular => triangular(length),

        WindowKind::Flattop => (0..length)
            .map(|n| {
                let x = -PI + 2.0 * PI * n as f64 / denom;
                FLATTOP_COEFFS
                    .iter()
                    .enumerate()
                    .map(|(k, &a)| a * (k as f64 * x).cos())
                    .sum()
            })
            .collect(),

        WindowKind::Bohman => (0..length)
            .map(|n| {
                if n == 0 || n == length - 1 {
                    return 0.0;
                }
                let x = (2.0 * n as f64 / denom - 1.0).abs();
                (1.0 - x) * (PI * x).cos() + (PI * x).sin() / PI
            })
            .collect(),

        WindowKind::Barthann => (0..length)
            .map(|n| {
                let f = (n as f64 / denom - 0.5).abs();
                0.62 - 0.48 * f + 0.38 * (2.0 * PI * f).cos()
            })
            .collect(),
    };

    Ok(window)
}

/// Resolve a window by name and generate it
pub fn window_by_name(name: &str, length: usize) -> Result<Vec<f64>> {
    generate_window(WindowKind::from_name(name)?, length)
}

/// Triangle whose endpoints stay above zero
fn triangular(length: usize) -> Vec<f64> {
    let m = length as f64;
    let half = (length + 1) / 2;

    let rising: Vec<f64> = if length % 2 == 0 {
        (1..=half).map(|k| (2.0 * k as f64 - 1.0) / m).collect()
    } else {
        (1..=half).map(|k| 2.0 * k as f64 / (m + 1.0)).collect()
    };

    let mut window = rising.clone();
    let mirrored = if length % 2 == 0 { half } else { half - 1 };
    window.extend(rising[..mirrored].iter().rev());
    window
}
