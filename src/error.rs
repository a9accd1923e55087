// =============================================================================
// Analysis error taxonomy
// =============================================================================
//
// `DataUnavailable` and `Provider` abort the whole request. A missing
// indicator aborts scoring via `InsufficientHistory`. An empty option-expiry
// list is NOT an error — the report simply carries no suggestion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The provider returned no price bars for the symbol.
    #[error("no price data available for symbol {symbol}")]
    DataUnavailable { symbol: String },

    /// A scoring-required indicator could not be computed from the
    /// available history — too few bars, or a series too degenerate for
    /// the indicator's math (e.g. a zero-range window for ADX).
    #[error("insufficient usable history for {indicator}: need {required} bars, have {have}")]
    InsufficientHistory {
        indicator: &'static str,
        required: usize,
        have: usize,
    },

    /// Transport or parse failure from the market-data provider; the inner
    /// error carries the request context.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl AnalysisError {
    /// Short stage label used in API responses and logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "data_unavailable",
            Self::InsufficientHistory { .. } => "insufficient_history",
            Self::Provider(_) => "provider_error",
        }
    }
}
