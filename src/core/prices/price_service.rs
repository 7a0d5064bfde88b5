// Price alert service - decides when a price move is worth announcing.
//
// NO Discord dependencies here. The service fetches quotes through `PriceFeed`,
// compares them with the last snapshot in `PriceSnapshotStore` and hands back
// the alerts for the Discord layer to post.

use super::price_models::{Direction, PriceAlert, PriceEvaluation, PriceSnapshot, WatchedAsset};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Price API error: {0}")]
    Api(String),
}

// ============================================================================
// PORTS
// ============================================================================

/// Source of USD quotes.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the latest USD price for every symbol in one request.
    ///
    /// Symbols the upstream API did not price are simply absent from the map.
    async fn fetch_usd_prices(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, PriceError>;
}

/// Keeps the last observed price per symbol.
#[async_trait]
pub trait PriceSnapshotStore: Send + Sync {
    async fn last_snapshot(&self, symbol: &str) -> Result<Option<PriceSnapshot>, PriceError>;
    async fn record(&self, symbol: &str, snapshot: PriceSnapshot) -> Result<(), PriceError>;
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Compare a fresh price with the previous one.
///
/// - an unusable `new_price` (zero, negative, not finite) is `Skipped`
/// - no previous price, or a previous price of zero, yields `Baseline`
/// - otherwise `|change| >= threshold_pct` yields an `Alert`
pub fn evaluate_change(
    symbol: &str,
    previous: Option<f64>,
    new_price: f64,
    threshold_pct: f64,
) -> PriceEvaluation {
    if !new_price.is_finite() || new_price <= 0.0 {
        return PriceEvaluation::Skipped;
    }

    let previous = match previous {
        Some(p) if p.is_finite() && p != 0.0 => p,
        _ => return PriceEvaluation::Baseline,
    };

    let change_pct = (new_price - previous) / previous * 100.0;
    if change_pct.abs() < threshold_pct {
        return PriceEvaluation::Unchanged { change_pct };
    }

    let direction = if change_pct > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    PriceEvaluation::Alert(PriceAlert {
        symbol: symbol.to_string(),
        direction,
        change_pct: change_pct.abs(),
        price: new_price,
    })
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct PriceAlertService<F: PriceFeed, S: PriceSnapshotStore> {
    feed: F,
    store: S,
    watchlist: Vec<WatchedAsset>,
}

impl<F, S> PriceAlertService<F, S>
where
    F: PriceFeed,
    S: PriceSnapshotStore,
{
    pub fn new(feed: F, store: S, watchlist: Vec<WatchedAsset>) -> Self {
        Self {
            feed,
            store,
            watchlist,
        }
    }

    pub fn watchlist(&self) -> &[WatchedAsset] {
        &self.watchlist
    }

    /// Run one price-check pass over the whole watchlist.
    ///
    /// Assets are evaluated in watchlist order. Each snapshot is written right after
    /// its evaluation so a move is never reported twice. A failed fetch aborts the
    /// pass without touching any snapshot.
    pub async fn check_prices(&self) -> Result<Vec<PriceAlert>, PriceError> {
        if self.watchlist.is_empty() {
            return Ok(Vec::new());
        }

        let symbols: Vec<String> = self.watchlist.iter().map(|a| a.symbol.clone()).collect();
        let quotes = self.feed.fetch_usd_prices(&symbols).await?;
        let observed_at = Utc::now();
        let mut alerts = Vec::new();

        for asset in &self.watchlist {
            let Some(&price) = quotes.get(&asset.symbol) else {
                tracing::debug!(symbol = %asset.symbol, "No quote returned this tick");
                continue;
            };

            let previous = self.store.last_snapshot(&asset.symbol).await?;
            let evaluation = evaluate_change(
                &asset.symbol,
                previous.map(|snapshot| snapshot.price),
                price,
                asset.threshold_pct,
            );
            if !evaluation.records_price() {
                tracing::debug!(symbol = %asset.symbol, price, "Ignoring unusable price");
                continue;
            }

            self.store
                .record(&asset.symbol, PriceSnapshot { price, observed_at })
                .await?;

            match evaluation {
                PriceEvaluation::Alert(alert) => {
                    tracing::info!(
                        symbol = %alert.symbol,
                        change_pct = alert.change_pct,
                        since_secs = ?previous.map(|s| s.seconds_until(observed_at)),
                        "Price moved past threshold"
                    );
                    alerts.push(alert);
                }
                PriceEvaluation::Baseline => {
                    tracing::debug!(symbol = %asset.symbol, price, "Recorded price baseline");
                }
                PriceEvaluation::Unchanged { .. } | PriceEvaluation::Skipped => {}
            }
        }

        Ok(alerts)
    }
}

// ============================================================================
// TESTS
// ============================================================================
