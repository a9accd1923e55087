// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line = EMA(close, 12) - EMA(close, 26). The scoring heuristic only
// consumes the line itself, so the 9-period signal line and histogram are
// not computed.

use super::ema::latest_ema;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;

/// Most recent MACD line value.
///
/// Requires at least `SLOW_PERIOD` closes (the slow EMA's seed window);
/// returns `None` otherwise or when either EMA is non-finite.
pub fn macd_line(closes: &[f64]) -> Option<f64> {
    let fast = latest_ema(closes, FAST_PERIOD)?;
    let slow = latest_ema(closes, SLOW_PERIOD)?;

    let macd = fast - slow;
    if macd.is_finite() {
        Some(macd)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_empty_input() {
        assert!(macd_line(&[]).is_none());
    }

    #[test]
    fn macd_insufficient_data() {
        // 25 closes: enough for EMA12, one short for EMA26.
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        assert!(macd_line(&closes).is_none());
    }

    #[test]
    fn macd_minimum_closes_exact() {
        let closes: Vec<f64> = (1..=26).map(|x| x as f64).collect();
        assert!(macd_line(&closes).is_some());
    }

    #[test]
    fn macd_zero_on_flat_series() {
        let closes = vec![50.0; 60];
        let macd = macd_line(&closes).unwrap();
        assert!(macd.abs() < 1e-10);
    }

    #[test]
    fn macd_positive_in_uptrend() {
        // Rising closes: the fast EMA sits above the slow EMA.
        let closes: Vec<f64> = (1..=80).map(|x| x as f64).collect();
        assert!(macd_line(&closes).unwrap() > 0.0);
    }

    #[test]
    fn macd_negative_in_downtrend() {
        let closes: Vec<f64> = (1..=80).rev().map(|x| x as f64).collect();
        assert!(macd_line(&closes).unwrap() < 0.0);
    }
}
