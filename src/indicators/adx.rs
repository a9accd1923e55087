// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX measures trend strength regardless of direction:
//   1. +DM / -DM (directional movement) and True Range per bar transition.
//   2. Wilder-smooth all three over `period`.
//   3. +DI = smoothed(+DM) / smoothed(TR) * 100, likewise -DI.
//   4. DX  = |+DI - -DI| / (+DI + -DI) * 100.
//   5. ADX = Wilder-smoothed average of DX over `period`.
//
// Producing a single ADX value needs 2 * period + 1 bars: `period`
// transitions for the initial smoothing, `period` DX values to seed the
// final average, plus the first bar which has no predecessor.

use crate::types::PriceBar;

/// Most recent ADX value for `bars`, or `None` when `period` is zero, the
/// history is shorter than `2 * period + 1` bars, or an intermediate value
/// goes non-finite.
///
/// A window whose smoothed true range is zero (every bar pinned to a single
/// price) also yields `None`: the directional index is undefined there, so
/// the series is treated as incomputable even when enough bars exist.
pub fn latest_adx(bars: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < 2 * period + 1 {
        return None;
    }

    let period_f = period as f64;
    let moves: Vec<BarMove> = bars.windows(2).map(|w| BarMove::from_pair(&w[0], &w[1])).collect();

    // Initial smoothing: plain sums over the first `period` transitions.
    let mut plus_dm: f64 = moves[..period].iter().map(|m| m.plus_dm).sum();
    let mut minus_dm: f64 = moves[..period].iter().map(|m| m.minus_dm).sum();
    let mut tr: f64 = moves[..period].iter().map(|m| m.true_range).sum();

    let mut dx_values = Vec::with_capacity(moves.len() - period + 1);
    dx_values.push(directional_index(plus_dm, minus_dm, tr)?);

    for m in &moves[period..] {
        plus_dm = plus_dm - plus_dm / period_f + m.plus_dm;
        minus_dm = minus_dm - minus_dm / period_f + m.minus_dm;
        tr = tr - tr / period_f + m.true_range;

        dx_values.push(directional_index(plus_dm, minus_dm, tr)?);
    }

    if dx_values.len() < period {
        return None;
    }

    // ADX seed: SMA of the first `period` DX values, then Wilder smoothing.
    let mut adx = dx_values[..period].iter().sum::<f64>() / period_f;
    for &dx in &dx_values[period..] {
        adx = (adx * (period_f - 1.0) + dx) / period_f;
    }

    adx.is_finite().then_some(adx)
}

/// Directional movement and true range for one bar-to-bar transition.
struct BarMove {
    plus_dm: f64,
    minus_dm: f64,
    true_range: f64,
}

impl BarMove {
    fn from_pair(prev: &PriceBar, cur: &PriceBar) -> Self {
        let true_range = (cur.high - cur.low)
            .max((cur.high - prev.close).abs())
            .max((cur.low - prev.close).abs());

        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;

        let plus_dm = if up_move > down_move && up_move > 0.0 { up_move } else { 0.0 };
        let minus_dm = if down_move > up_move && down_move > 0.0 { down_move } else { 0.0 };

        Self { plus_dm, minus_dm, true_range }
    }
}

/// DX from smoothed +DM / -DM / TR. Zero TR has no defined DI; both DIs
/// zero means no directional movement at all, which is a DX of 0.
fn directional_index(plus_dm: f64, minus_dm: f64, tr: f64) -> Option<f64> {
    if tr == 0.0 {
        return None;
    }

    let plus_di = plus_dm / tr * 100.0;
    let minus_di = minus_dm / tr * 100.0;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return Some(0.0);
    }

    let dx = (plus_di - minus_di).abs() / di_sum * 100.0;
    dx.is_finite().then_some(dx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::bars_from_closes;
    use chrono::NaiveDate;

    fn bar(i: u64, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i),
            open,
            high,
            low,
            close,
            volume: 1_000.0,
        }
    }

    #[test]
    fn adx_period_zero() {
        let bars = bars_from_closes(&vec![100.0; 60]);
        assert!(latest_adx(&bars, 0).is_none());
    }

    #[test]
    fn adx_insufficient_data() {
        // Needs 2*14 + 1 = 29 bars.
        let closes: Vec<f64> = (1..=28).map(|x| x as f64).collect();
        let bars = bars_from_closes(&closes);
        assert!(latest_adx(&bars, 14).is_none());
    }

    #[test]
    fn adx_minimum_bars_exact() {
        let period = 5;
        let min = 2 * period + 1;
        let bars: Vec<PriceBar> = (0..min as u64)
            .map(|i| {
                let base = 100.0 + i as f64;
                bar(i, base, base + 1.0, base - 0.5, base + 0.5)
            })
            .collect();

        assert!(latest_adx(&bars, period).is_some());
        assert!(latest_adx(&bars[..min - 1], period).is_none());
    }

    #[test]
    fn adx_strong_uptrend_exceeds_25() {
        let bars: Vec<PriceBar> = (0..60)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                bar(i, base, base + 1.5, base - 0.5, base + 1.0)
            })
            .collect();

        let adx = latest_adx(&bars, 14).unwrap();
        assert!(adx > 25.0, "expected ADX > 25 for strong trend, got {adx}");
    }

    #[test]
    fn adx_flat_market_near_zero() {
        // Identical bars: no directional movement, DX = 0 every step.
        let bars: Vec<PriceBar> = (0..60).map(|i| bar(i, 100.0, 101.0, 99.0, 100.0)).collect();
        let adx = latest_adx(&bars, 14).unwrap();
        assert!(adx < 1.0, "expected ADX near 0 for flat market, got {adx}");
    }

    #[test]
    fn adx_zero_range_series_is_incomputable() {
        // Every bar pinned to one price: true range is zero throughout, so
        // no DI exists and the result is None despite ample history.
        let bars: Vec<PriceBar> = (0..60).map(|i| bar(i, 100.0, 100.0, 100.0, 100.0)).collect();
        assert!(latest_adx(&bars, 14).is_none());
    }

    #[test]
    fn adx_within_bounds() {
        let bars: Vec<PriceBar> = (0..100)
            .map(|i| {
                let base = 50.0 + (i as f64 * 0.3).sin() * 10.0;
                bar(i, base - 0.5, base + 1.0, base - 1.0, base + 0.5)
            })
            .collect();

        if let Some(adx) = latest_adx(&bars, 14) {
            assert!((0.0..=100.0).contains(&adx), "ADX {adx} out of [0,100]");
        }
    }
}
