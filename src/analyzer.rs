// =============================================================================
// Analysis Pipeline — fetch, derive indicators, score, suggest an option
// =============================================================================
//
// One request runs one sequential pipeline:
//
//   daily bars -> IndicatorSet -> score -> recommendation
//   option expiries -> first-expiry chain -> nearest-strike call
//
// The two legs share no state beyond the latest close. A missing option
// market degrades the report (no suggestion) instead of failing it; missing
// price data fails the whole request.

use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::indicators;
use crate::options;
use crate::provider::MarketDataProvider;
use crate::signal;
use crate::types::{AnalysisReport, OptionContract};

/// Analyze one symbol against the given provider.
///
/// `range` uses the provider's history-range syntax (e.g. "6mo").
pub async fn analyze<P: MarketDataProvider>(
    provider: &P,
    symbol: &str,
    range: &str,
) -> Result<AnalysisReport, AnalysisError> {
    let bars = provider.fetch_daily_history(symbol, range).await?;

    let Some(latest) = bars.last() else {
        warn!(symbol, provider = provider.provider_name(), "no price data returned");
        return Err(AnalysisError::DataUnavailable { symbol: symbol.to_string() });
    };

    let current_price = latest.close;
    debug!(symbol, bars = bars.len(), current_price, "daily history loaded");

    let indicator_set = indicators::latest_indicator_set(&bars);
    let signal = signal::evaluate(current_price, &indicator_set, bars.len())?;

    let option_suggestion = suggest_option(provider, symbol, current_price).await?;

    info!(
        symbol,
        current_price,
        score = signal.score,
        recommendation = %signal.recommendation,
        has_option = option_suggestion.is_some(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        as_of: latest.date,
        current_price,
        recommendation: signal.recommendation,
        score: signal.score,
        breakdown: signal.breakdown,
        indicators: indicator_set,
        option_suggestion,
    })
}

/// Fetch the chain for the first listed expiry and pick the nearest-strike
/// call. An empty expiry list is a normal outcome (`None`); a transport
/// failure while fetching a listed chain is a provider error.
async fn suggest_option<P: MarketDataProvider>(
    provider: &P,
    symbol: &str,
    current_price: f64,
) -> Result<Option<OptionContract>, AnalysisError> {
    let expiries = provider.list_option_expiries(symbol).await?;

    let Some(&expiry) = expiries.first() else {
        debug!(symbol, "no option expiries listed, skipping suggestion");
        return Ok(None);
    };

    let chain = provider.fetch_option_chain(symbol, expiry).await?;
    Ok(options::nearest_strike_call(&chain.calls, current_price))
}
