// =============================================================================
// Equity Pulse — Main Entry Point
// =============================================================================
//
// One binary, two surfaces: with a symbol argument it runs a single analysis
// and prints the report as JSON; with no arguments it serves the REST API.

// ── Module declarations ──────────────────────────────────────────────────────
mod analyzer;
mod api;
mod error;
mod indicators;
mod options;
mod provider;
mod runtime_config;
mod signal;
mod types;
mod yahoo;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::rest::ApiContext;
use crate::runtime_config::RuntimeConfig;
use crate::yahoo::YahooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = RuntimeConfig::load("runtime_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();

    let provider = YahooClient::new(config.provider_base_url.clone());

    // ── 2. One-shot mode: `equity-pulse AAPL` ────────────────────────────
    if let Some(arg) = std::env::args().nth(1) {
        let Some(symbol) = cli_symbol(&arg) else {
            eprintln!("usage: equity-pulse [SYMBOL]");
            eprintln!("  with SYMBOL: analyze once and print the report as JSON");
            eprintln!("  without:     serve the REST API");
            return Ok(());
        };
        info!(%symbol, range = %config.history_range, "running one-shot analysis");

        let report = analyzer::analyze(&provider, &symbol, &config.history_range).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // ── 3. Serve the REST API ────────────────────────────────────────────
    let ctx = Arc::new(ApiContext { provider, config: config.clone() });
    let app = api::rest::router(ctx);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Equity Pulse API listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Normalize a CLI argument into a ticker symbol. Flag-like or empty
/// arguments are not symbols and trigger the usage text instead.
fn cli_symbol(arg: &str) -> Option<String> {
    let arg = arg.trim();
    if arg.is_empty() || arg.starts_with('-') {
        return None;
    }
    Some(arg.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::cli_symbol;

    #[test]
    fn plain_ticker_is_uppercased() {
        assert_eq!(cli_symbol("aapl").as_deref(), Some("AAPL"));
        assert_eq!(cli_symbol(" tsla ").as_deref(), Some("TSLA"));
    }

    #[test]
    fn flags_are_not_symbols() {
        assert!(cli_symbol("--help").is_none());
        assert!(cli_symbol("-h").is_none());
    }

    #[test]
    fn empty_argument_is_not_a_symbol() {
        assert!(cli_symbol("").is_none());
        assert!(cli_symbol("   ").is_none());
    }
}
