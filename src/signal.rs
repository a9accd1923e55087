// =============================================================================
// Signal Scorer — fixed five-condition threshold table
// =============================================================================
//
// Each condition flags a bearish-for-price reading and contributes exactly
// one point. The conditions are evaluated independently; none is mutually
// exclusive with another. The score-to-recommendation mapping is a fixed
// table, with low scores read as contrarian buy opportunities:
//
//   score <= 1  => BUY
//   score >= 4  => SELL
//   otherwise   => NEUTRAL

use crate::error::AnalysisError;
use crate::indicators::{ADX_PERIOD, EMA_PERIOD, RSI_PERIOD, SMA_PERIOD};
use crate::types::{ConditionCheck, IndicatorSet, Recommendation};

/// RSI below this reads as oversold.
const RSI_OVERSOLD: f64 = 30.0;
/// ADX above this reads as a strongly trending market.
const ADX_TRENDING: f64 = 25.0;

/// Outcome of scoring one indicator set against the latest close.
#[derive(Debug, Clone)]
pub struct Signal {
    pub score: u8,
    pub recommendation: Recommendation,
    pub breakdown: Vec<ConditionCheck>,
}

/// Score `indicators` against the latest close `price`.
///
/// Every indicator in the set must be present; a `None` value fails with
/// `InsufficientHistory` naming the indicator rather than being silently
/// counted as a pass or a fail. `history_len` is only used to report how
/// many bars were actually available.
pub fn evaluate(
    price: f64,
    indicators: &IndicatorSet,
    history_len: usize,
) -> Result<Signal, AnalysisError> {
    let have = history_len;
    let sma50 = require(indicators.sma50, "SMA50", SMA_PERIOD, have)?;
    let ema20 = require(indicators.ema20, "EMA20", EMA_PERIOD, have)?;
    let rsi14 = require(indicators.rsi14, "RSI14", RSI_PERIOD + 1, have)?;
    let macd = require(indicators.macd, "MACD", crate::indicators::macd::SLOW_PERIOD, have)?;
    let adx14 = require(indicators.adx14, "ADX14", 2 * ADX_PERIOD + 1, have)?;

    let breakdown = vec![
        ConditionCheck { name: "sma50_above_price", triggered: sma50 > price },
        ConditionCheck { name: "ema20_above_price", triggered: ema20 > price },
        ConditionCheck { name: "rsi_oversold", triggered: rsi14 < RSI_OVERSOLD },
        ConditionCheck { name: "macd_negative", triggered: macd < 0.0 },
        ConditionCheck { name: "adx_trending", triggered: adx14 > ADX_TRENDING },
    ];

    let score = breakdown.iter().filter(|c| c.triggered).count() as u8;

    Ok(Signal {
        score,
        recommendation: recommendation_for(score),
        breakdown,
    })
}

/// The fixed score-to-label table.
pub fn recommendation_for(score: u8) -> Recommendation {
    match score {
        0 | 1 => Recommendation::Buy,
        2 | 3 => Recommendation::Neutral,
        _ => Recommendation::Sell,
    }
}

fn require(
    value: Option<f64>,
    indicator: &'static str,
    required: usize,
    have: usize,
) -> Result<f64, AnalysisError> {
    value.ok_or(AnalysisError::InsufficientHistory { indicator, required, have })
}
