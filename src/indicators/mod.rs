// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator math over daily price bars. Every public
// function returns `Option<T>` (or an empty `Vec` for series) so callers are
// forced to handle insufficient-history and numerical-edge-case scenarios —
// a value is never fabricated from a shorter window than the indicator's
// look-back requires.

pub mod adx;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

use crate::types::{IndicatorSet, PriceBar};

/// Look-back periods fixed by the analysis heuristic.
pub const SMA_PERIOD: usize = 50;
pub const EMA_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;
pub const ADX_PERIOD: usize = 14;

/// Compute the full indicator set for the latest bar of `bars`.
///
/// Indicators whose look-back exceeds the available history come back as
/// `None` in the returned set. The caller decides whether that is fatal.
pub fn latest_indicator_set(bars: &[PriceBar]) -> IndicatorSet {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    IndicatorSet {
        sma50: sma::trailing_sma(&closes, SMA_PERIOD),
        ema20: ema::latest_ema(&closes, EMA_PERIOD),
        rsi14: rsi::latest_rsi(&closes, RSI_PERIOD),
        macd: macd::macd_line(&closes),
        adx14: adx::latest_adx(bars, ADX_PERIOD),
    }
}
