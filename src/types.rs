// =============================================================================
// Shared types used across the Equity Pulse analyzer
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar for an equity symbol.
///
/// Bar sequences are ordered by `date` ascending with no duplicate dates;
/// the most recent bar is the last element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Indicator values computed for the latest bar of a series.
///
/// Each field is `None` when the series is shorter than that indicator's
/// look-back requirement. A missing value is never backfilled from a
/// shorter window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma50: Option<f64>,
    pub ema20: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub adx14: Option<f64>,
}

/// Discrete outcome of the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Sell,
    Neutral,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Which side of the chain a contract belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// A single listed option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike: f64,
    pub last_price: f64,
    pub volume: i64,
    pub open_interest: i64,
    pub expiry: NaiveDate,
    pub side: OptionSide,
}

/// All contracts for one expiry, split by side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionChain {
    pub expiry: Option<NaiveDate>,
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

/// Outcome of one condition in the scoring table.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionCheck {
    pub name: &'static str,
    pub triggered: bool,
}

/// Full result of one `analyze` run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub current_price: f64,
    pub recommendation: Recommendation,
    /// Number of bearish-for-price conditions that fired, 0..=5.
    pub score: u8,
    pub breakdown: Vec<ConditionCheck>,
    pub indicators: IndicatorSet,
    /// Absent when the provider lists no option expiries for the symbol.
    pub option_suggestion: Option<OptionContract>,
}
