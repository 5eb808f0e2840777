//! Applying windows to analysis frames
//!
//! Windows are weighted onto each frame before the FFT to reduce spectral
//! leakage. The window energy normalises the density scale.

/// Multiply `frame` by `window` into `out`
///
/// `frame` may be shorter than `window`; the tail of `out` is zero-filled,
/// which is how a short recording is right-padded to a full segment.
pub fn apply_window_into(frame: &[f64], window: &[f64], out: &mut [f64]) {
    debug_assert_eq!(window.len(), out.len());

    let copy_len = frame.len().min(window.len());
    for ((o, &s), &w) in out.iter_mut().zip(&frame[..copy_len]).zip(window) {
        *o = s * w;
    }
    out[copy_len..].fill(0.0);
}

/// Window energy Σw², the normaliser of a power spectral density
pub fn power_sum(window: &[f64]) -> f64 {
    window.iter().map(|&w| w * w).sum()
}
