//! FFT engine using realfft for real-valued signals
//!
//! One engine per segment length; buffers are reused across frames.

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use crate::error::{Result, SonogramError};

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,

    /// Scratch space so `process` never allocates
    scratch: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine, reusing plans cached in `planner`
    pub fn with_planner(planner: &mut RealFftPlanner<f64>, fft_size: usize) -> Self {
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();
        let scratch = r2c.make_scratch_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
            scratch,
        }
    }

    /// Input buffer to fill before calling [`FftEngine::process`]
    pub fn input_mut(&mut self) -> &mut [f64] {
        &mut self.input_buffer
    }

    /// Transform the current input buffer
    ///
    /// # Returns
    /// Complex spectrum X[k] for k = 0..fft_size/2
    pub fn process(&mut self) -> Result<&[Complex<f64>]> {
        self.r2c
            .process_with_scratch(
                &mut self.input_buffer,
                &mut self.output_buffer,
                &mut self.scratch,
            )
            .map_err(|e| SonogramError::InvalidInput(format!("FFT processing failed: {}", e)))?;

        Ok(&self.output_buffer)
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}
