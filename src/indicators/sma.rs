// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the trailing `period` closes. Unlike the EMA there is
// no smoothing state — each value depends only on its own window.

/// Mean of the last `period` values of `closes`.
///
/// Returns `None` when `period` is zero, when fewer than `period` closes are
/// available, or when the mean is non-finite. A shorter window is never
/// substituted.
pub fn trailing_sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;

    if mean.is_finite() {
        Some(mean)
    } else {
        None
    }
}
