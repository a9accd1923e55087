// =============================================================================
// Market-data provider seam
// =============================================================================
//
// The analyzer only talks to the outside world through this trait, so tests
// can drive the pipeline with canned data and the Yahoo client stays a thin
// transport detail.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::{OptionChain, PriceBar};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Daily bars for `symbol` over `range` (provider range syntax, e.g.
    /// "6mo"), ordered by date ascending. An empty vec means the provider
    /// knows no data for the symbol.
    async fn fetch_daily_history(&self, symbol: &str, range: &str) -> Result<Vec<PriceBar>>;

    /// Available option expiry dates in the provider's own ordering. The
    /// first element is the one the analyzer uses; the ordering is not
    /// re-sorted on our side.
    async fn list_option_expiries(&self, symbol: &str) -> Result<Vec<NaiveDate>>;

    /// The full chain for one expiry.
    async fn fetch_option_chain(&self, symbol: &str, expiry: NaiveDate) -> Result<OptionChain>;
}
