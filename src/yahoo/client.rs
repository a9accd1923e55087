// =============================================================================
// Yahoo Finance REST Client — public chart + options endpoints
// =============================================================================
//
// Both endpoints are unauthenticated. Yahoo rejects requests without a
// browser-ish User-Agent, so the client pins one as a default header. All
// requests share a 10 s timeout; retry policy, if ever needed, belongs here
// at the collaborator boundary and not in the analysis pipeline.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::provider::MarketDataProvider;
use crate::types::{OptionChain, OptionContract, OptionSide, PriceBar};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) equity-pulse/1.0";

/// Yahoo Finance REST client for daily history and option chains.
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(FALLBACK_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build reqwest client");

        let base_url = base_url.into();
        debug!(%base_url, "YahooClient initialised");

        Self { base_url, client }
    }

    async fn get_json(&self, url: &str, what: &str) -> Result<serde_json::Value> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {what} request failed"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("failed to parse {what} response"))?;

        if !status.is_success() {
            anyhow::bail!("Yahoo {what} returned {}: {}", status, body);
        }

        Ok(body)
    }

    /// GET /v7/finance/options/{symbol}[?date=...] — shared by the expiry
    /// list and the per-expiry chain fetch. `None` means the provider lists
    /// no options market for the symbol at all.
    async fn get_options_payload(
        &self,
        symbol: &str,
        expiry: Option<NaiveDate>,
    ) -> Result<Option<OptionsResult>> {
        let mut url = format!("{}/v7/finance/options/{}", self.base_url, symbol);
        if let Some(date) = expiry {
            url.push_str(&format!("?date={}", date_to_epoch(date)));
        }

        let body = self.get_json(&url, "/v7/finance/options").await?;

        let Some(result) = body.pointer("/optionChain/result/0").cloned() else {
            return Ok(None);
        };

        serde_json::from_value(result)
            .map(Some)
            .context("failed to decode option chain payload")
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    fn provider_name(&self) -> &'static str {
        "yahoo"
    }

    /// GET /v8/finance/chart/{symbol}?range=...&interval=1d
    #[instrument(skip(self), name = "yahoo::fetch_daily_history")]
    async fn fetch_daily_history(&self, symbol: &str, range: &str) -> Result<Vec<PriceBar>> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, range
        );

        let body = self.get_json(&url, "/v8/finance/chart").await?;
        let bars = decode_chart_bars(&body)?;

        debug!(symbol, range, count = bars.len(), "daily history fetched");
        Ok(bars)
    }

    #[instrument(skip(self), name = "yahoo::list_option_expiries")]
    async fn list_option_expiries(&self, symbol: &str) -> Result<Vec<NaiveDate>> {
        let Some(payload) = self.get_options_payload(symbol, None).await? else {
            debug!(symbol, "no options market listed");
            return Ok(Vec::new());
        };

        // Provider ordering is authoritative — no re-sort.
        let expiries: Vec<NaiveDate> = payload
            .expiration_dates
            .iter()
            .filter_map(|&epoch| epoch_to_date(epoch))
            .collect();

        debug!(symbol, count = expiries.len(), "option expiries listed");
        Ok(expiries)
    }

    #[instrument(skip(self), name = "yahoo::fetch_option_chain")]
    async fn fetch_option_chain(&self, symbol: &str, expiry: NaiveDate) -> Result<OptionChain> {
        // The expiry came from the provider's own list, so an absent result
        // here is a provider failure rather than an empty market.
        let payload = self
            .get_options_payload(symbol, Some(expiry))
            .await?
            .context("options response has no result entry for a listed expiry")?;

        let block = payload
            .options
            .into_iter()
            .next()
            .context("option chain payload has no options block")?;

        let convert = |quotes: Vec<OptionQuote>, side: OptionSide| -> Vec<OptionContract> {
            quotes
                .into_iter()
                .map(|q| OptionContract {
                    strike: q.strike,
                    last_price: q.last_price,
                    volume: q.volume.unwrap_or(0),
                    open_interest: q.open_interest.unwrap_or(0),
                    expiry,
                    side,
                })
                .collect()
        };

        let chain = OptionChain {
            expiry: Some(expiry),
            calls: convert(block.calls, OptionSide::Call),
            puts: convert(block.puts, OptionSide::Put),
        };

        debug!(
            symbol,
            %expiry,
            calls = chain.calls.len(),
            puts = chain.puts.len(),
            "option chain fetched"
        );
        Ok(chain)
    }
}

// =============================================================================
// Wire types (v7 options payload)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsResult {
    #[serde(default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<OptionsBlock>,
}

#[derive(Debug, Deserialize)]
struct OptionsBlock {
    #[serde(default)]
    calls: Vec<OptionQuote>,
    #[serde(default)]
    puts: Vec<OptionQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionQuote {
    strike: f64,
    #[serde(default)]
    last_price: f64,
    #[serde(default)]
    volume: Option<i64>,
    #[serde(default)]
    open_interest: Option<i64>,
}

// =============================================================================
// Chart decoding (v8 chart payload)
// =============================================================================

/// Decode a v8 chart response body into daily bars.
///
/// The payload is column-oriented: parallel `timestamp` and per-quote
/// `open/high/low/close/volume` arrays. Entries with a null close (halted
/// days) are skipped, as are duplicate or out-of-order timestamps, so the
/// returned bars are strictly ascending by date with no duplicates. A null
/// `result` envelope (Yahoo's answer for unknown symbols) decodes to an
/// empty vec — to the analyzer that is simply "no data".
fn decode_chart_bars(body: &serde_json::Value) -> Result<Vec<PriceBar>> {
    let Some(result) = body.pointer("/chart/result/0") else {
        return Ok(Vec::new());
    };

    let timestamps = result
        .pointer("/timestamp")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    let quote = result
        .pointer("/indicators/quote/0")
        .context("chart result has no quote block")?;

    let column = |name: &str| -> Vec<serde_json::Value> {
        quote
            .get(name)
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default()
    };

    let opens = column("open");
    let highs = column("high");
    let lows = column("low");
    let closes = column("close");
    let volumes = column("volume");

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut last_date: Option<NaiveDate> = None;

    for (i, ts) in timestamps.iter().enumerate() {
        let Some(epoch) = ts.as_i64() else { continue };
        let Some(date) = epoch_to_date(epoch) else {
            warn!(epoch, "skipping bar with unrepresentable timestamp");
            continue;
        };

        // Null close means no usable bar for that day.
        let Some(close) = closes.get(i).and_then(|v| v.as_f64()) else {
            debug!(%date, "skipping bar with null close");
            continue;
        };

        if last_date.is_some_and(|prev| date <= prev) {
            warn!(%date, "skipping out-of-order chart entry");
            continue;
        }
        last_date = Some(date);

        bars.push(PriceBar {
            date,
            open: opens.get(i).and_then(|v| v.as_f64()).unwrap_or(close),
            high: highs.get(i).and_then(|v| v.as_f64()).unwrap_or(close),
            low: lows.get(i).and_then(|v| v.as_f64()).unwrap_or(close),
            close,
            volume: volumes.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0),
        });
    }

    Ok(bars)
}

// =============================================================================
// Epoch helpers — Yahoo expresses every date as UTC unix seconds
// =============================================================================

fn epoch_to_date(epoch: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch, 0).map(|dt| dt.date_naive())
}

fn date_to_epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Seconds for the n-th day after the epoch, mid-session UTC.
    fn day_epoch(n: i64) -> i64 {
        n * 86_400 + 14 * 3_600
    }

    /// Assemble a chart body from parallel columns. `None` entries become
    /// JSON nulls, as Yahoo emits them.
    fn chart_body(timestamps: &[i64], closes: &[Option<f64>]) -> serde_json::Value {
        serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": { "quote": [{
                        "open": closes.iter().map(|c| c.map(|v| v - 1.0)).collect::<Vec<_>>(),
                        "high": closes.iter().map(|c| c.map(|v| v + 2.0)).collect::<Vec<_>>(),
                        "low": closes.iter().map(|c| c.map(|v| v - 2.0)).collect::<Vec<_>>(),
                        "close": closes,
                        "volume": closes.iter().map(|c| c.map(|_| 1000.0)).collect::<Vec<_>>(),
                    }]},
                }],
                "error": null,
            }
        })
    }

    #[test]
    fn chart_decodes_parallel_columns() {
        let body = chart_body(&[day_epoch(0), day_epoch(1)], &[Some(100.0), Some(101.0)]);
        let bars = decode_chart_bars(&body).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[0].open, 99.0);
        assert_eq!(bars[0].high, 102.0);
        assert_eq!(bars[0].low, 98.0);
        assert_eq!(bars[0].volume, 1000.0);
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn chart_null_close_is_skipped() {
        let body = chart_body(
            &[day_epoch(0), day_epoch(1), day_epoch(2)],
            &[Some(100.0), None, Some(102.0)],
        );
        let bars = decode_chart_bars(&body).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[1].close, 102.0);
    }

    #[test]
    fn chart_duplicate_date_is_dropped() {
        // Two timestamps on the same calendar day: the second must not
        // produce a duplicate-date bar.
        let body = chart_body(
            &[day_epoch(0), day_epoch(0) + 3_600, day_epoch(1)],
            &[Some(100.0), Some(999.0), Some(101.0)],
        );
        let bars = decode_chart_bars(&body).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[1].close, 101.0);
    }

    #[test]
    fn chart_out_of_order_entry_is_dropped() {
        let body = chart_body(
            &[day_epoch(5), day_epoch(3), day_epoch(6)],
            &[Some(100.0), Some(999.0), Some(101.0)],
        );
        let bars = decode_chart_bars(&body).unwrap();

        assert_eq!(bars.len(), 2);
        // Strictly ascending survivors only.
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
        assert!(bars.iter().all(|b| b.close != 999.0));
    }

    #[test]
    fn chart_missing_ohlv_falls_back_to_close() {
        // Quote block carrying only the close column.
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": [day_epoch(0)],
                    "indicators": { "quote": [{ "close": [100.0] }] },
                }],
                "error": null,
            }
        });
        let bars = decode_chart_bars(&body).unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 100.0);
        assert_eq!(bars[0].low, 100.0);
        assert_eq!(bars[0].volume, 0.0);
    }

    #[test]
    fn chart_null_result_envelope_is_empty() {
        // Yahoo's unknown-symbol answer: error envelope, null result.
        let body = serde_json::json!({
            "chart": { "result": null, "error": { "code": "Not Found" } }
        });
        let bars = decode_chart_bars(&body).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn chart_without_quote_block_is_an_error() {
        let body = serde_json::json!({
            "chart": { "result": [{ "timestamp": [day_epoch(0)] }], "error": null }
        });
        assert!(decode_chart_bars(&body).is_err());
    }

    #[test]
    fn epoch_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        assert_eq!(epoch_to_date(date_to_epoch(date)), Some(date));
    }

    #[test]
    fn epoch_mid_day_truncates_to_date() {
        // 2024-06-21 14:30:00 UTC.
        let epoch = date_to_epoch(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()) + 14 * 3600 + 1800;
        assert_eq!(
            epoch_to_date(epoch),
            Some(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
        );
    }

    #[test]
    fn option_quote_decodes_sparse_fields() {
        // Yahoo omits volume/openInterest on illiquid strikes.
        let quote: OptionQuote =
            serde_json::from_value(serde_json::json!({ "strike": 95.0, "lastPrice": 2.5 }))
                .unwrap();
        assert_eq!(quote.strike, 95.0);
        assert!(quote.volume.is_none());
        assert!(quote.open_interest.is_none());
    }

    #[test]
    fn options_result_decodes_without_options_block() {
        let result: OptionsResult = serde_json::from_value(serde_json::json!({
            "expirationDates": [1718928000i64, 1719532800i64],
        }))
        .unwrap();
        assert_eq!(result.expiration_dates.len(), 2);
        assert!(result.options.is_empty());
    }
}
