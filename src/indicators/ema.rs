// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The first EMA value is seeded with the SMA of the first `period` closes,
// so the output series starts at input index `period - 1`.

/// Compute the EMA series for `closes` with the given look-back `period`.
///
/// Returns an empty `Vec` when `period` is zero or the input is shorter than
/// `period`. If a non-finite value appears mid-series the series is truncated
/// there — downstream consumers should not trust a broken tail.
pub fn ema_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period + 1) as f64;

    let seed: f64 = closes[..period].iter().sum::<f64>() / period as f64;
    if !seed.is_finite() {
        return Vec::new();
    }

    let mut series = Vec::with_capacity(closes.len() - period + 1);
    series.push(seed);

    let mut prev = seed;
    for &close in &closes[period..] {
        let ema = close * multiplier + prev * (1.0 - multiplier);
        if !ema.is_finite() {
            break;
        }
        series.push(ema);
        prev = ema;
    }

    series
}

/// Most recent EMA value, or `None` when the series cannot be computed.
pub fn latest_ema(closes: &[f64], period: usize) -> Option<f64> {
    ema_series(closes, period).last().copied()
}
