// =============================================================================
// Option Suggestion — nearest-strike call selection
// =============================================================================

use crate::types::OptionContract;

/// Pick the call whose strike is closest to `price` by absolute distance.
///
/// Exact-distance ties go to the lower strike; the candidates are otherwise
/// taken in whatever order the provider returned them. Returns `None` for an
/// empty chain or when no contract has a finite strike.
pub fn nearest_strike_call(calls: &[OptionContract], price: f64) -> Option<OptionContract> {
    calls
        .iter()
        .filter(|c| c.strike.is_finite())
        .min_by(|a, b| {
            let da = (a.strike - price).abs();
            let db = (b.strike - price).abs();
            da.partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.strike.partial_cmp(&b.strike).unwrap_or(std::cmp::Ordering::Equal))
        })
        .cloned()
}
