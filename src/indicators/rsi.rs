// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — price deltas from consecutive closes.
// Step 2 — seed average gain / loss with the SMA of the first `period` deltas.
// Step 3 — Wilder smoothing:
//            avg = (prev_avg * (period - 1) + current) / period
// Step 4 — RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS).
//
// Edge conventions: all gains => 100, all losses => 0, no movement => 50.

/// Compute the RSI series for `closes` and `period`.
///
/// One value per close starting at index `period` (the first `period` closes
/// seed the averages). Empty when `period` is zero or fewer than
/// `period + 1` closes are available.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period + 1 {
        return Vec::new();
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;

    // Seed with plain averages of the first `period` deltas.
    let mut avg_gain = deltas[..period].iter().filter(|&&d| d > 0.0).sum::<f64>() / period_f;
    let mut avg_loss = deltas[..period]
        .iter()
        .filter(|&&d| d < 0.0)
        .map(|d| d.abs())
        .sum::<f64>()
        / period_f;

    let mut series = Vec::with_capacity(deltas.len() - period + 1);
    match index_value(avg_gain, avg_loss) {
        Some(rsi) => series.push(rsi),
        None => return Vec::new(),
    }

    for &delta in &deltas[period..] {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        match index_value(avg_gain, avg_loss) {
            Some(rsi) => series.push(rsi),
            None => break, // Non-finite — stop producing values.
        }
    }

    series
}

/// Most recent RSI value, or `None` on insufficient data.
pub fn latest_rsi(closes: &[f64], period: usize) -> Option<f64> {
    rsi_series(closes, period).last().copied()
}

/// Average gain / average loss -> RSI in [0, 100].
///
/// Both averages zero means no movement at all: neutral 50. Zero loss with
/// nonzero gain clamps to 100.
fn index_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}
