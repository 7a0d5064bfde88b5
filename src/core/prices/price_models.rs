// Domain types for crypto price alerts.
// Symbols are CoinGecko coin ids ("bitcoin", "mog-coin", ...), prices are USD.

use chrono::{DateTime, Utc};
use std::fmt;

/// Threshold used for any asset configured without an explicit one.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 50.0;

/// Built-in watchlist: (coin id, alert threshold in percent).
const DEFAULT_WATCHLIST: &[(&str, f64)] = &[
    ("bitcoin", 10.0),
    ("ethereum", 10.0),
    ("solana", 10.0),
    ("pepe", 50.0),
    ("sui", 20.0),
    ("mog-coin", 50.0),
    ("moodeng", 50.0),
    ("brett", 50.0),
    ("housecoin", 50.0),
    ("kaspa", 50.0),
    ("space", 50.0),
    ("bellscoin", 50.0),
    ("clore", 50.0),
    ("xec", 50.0),
    ("octa", 50.0),
    ("rvn", 50.0),
    ("nexa", 50.0),
    ("dnx", 50.0),
    ("xna", 50.0),
    ("dingo", 50.0),
    ("soh", 50.0),
    ("bsv", 50.0),
    ("sdr", 50.0),
    ("satox", 50.0),
    ("neox", 50.0),
    ("ckb", 50.0),
    ("blockx", 50.0),
    ("etc", 50.0),
    ("alph", 50.0),
    ("ppc", 50.0),
    ("cau", 50.0),
    ("mewc", 50.0),
    ("dgb", 50.0),
    ("fren", 50.0),
    ("zeph", 50.0),
    ("btcz", 50.0),
    ("dvt", 50.0),
    ("fch", 50.0),
    ("pac", 50.0),
    ("zec", 50.0),
    ("aitpg", 50.0),
    ("kls", 50.0),
    ("nacho", 50.0),
    ("kaspy", 50.0),
    ("kango", 50.0),
    ("arrr", 50.0),
    ("kasper", 50.0),
    ("rxd", 50.0),
    ("beam", 50.0),
    ("fractal-bitcoin", 50.0),
    ("pepe-coin", 50.0),
    ("fartcoin", 50.0),
    ("spx6900", 50.0),
];

/// An asset we poll prices for. The threshold is fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedAsset {
    pub symbol: String,
    /// Minimum absolute percentage move between two polls that triggers an alert.
    pub threshold_pct: f64,
}

impl WatchedAsset {
    pub fn new(symbol: impl Into<String>, threshold_pct: f64) -> Self {
        Self {
            symbol: symbol.into(),
            threshold_pct,
        }
    }
}

/// The watchlist used when none is configured.
pub fn default_watchlist() -> Vec<WatchedAsset> {
    DEFAULT_WATCHLIST
        .iter()
        .map(|(symbol, threshold)| WatchedAsset::new(*symbol, *threshold))
        .collect()
}

/// Last observed price for a symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSnapshot {
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}

impl PriceSnapshot {
    /// Whole seconds between this observation and `later`.
    pub fn seconds_until(&self, later: DateTime<Utc>) -> i64 {
        (later - self.observed_at).num_seconds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted when a price moved at least `threshold_pct` since the previous poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAlert {
    pub symbol: String,
    pub direction: Direction,
    /// Absolute percentage change, always >= 0.
    pub change_pct: f64,
    pub price: f64,
}

impl fmt::Display for PriceAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {} {:.2}%: ${:.2}",
            self.symbol.to_uppercase(),
            self.direction,
            round_cents(self.change_pct),
            round_cents(self.price)
        )
    }
}

/// Round to two decimals with ties away from zero; `{:.2}` alone rounds ties to even.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Outcome of comparing a freshly fetched price against the stored one.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceEvaluation {
    /// No usable previous price. The new price becomes the baseline.
    Baseline,
    /// Moved less than the threshold.
    Unchanged { change_pct: f64 },
    /// The fetched price is unusable (zero, negative, NaN). Nothing is recorded.
    Skipped,
    Alert(PriceAlert),
}

impl PriceEvaluation {
    /// Whether the fetched price should overwrite the stored snapshot.
    pub fn records_price(&self) -> bool {
        !matches!(self, PriceEvaluation::Skipped)
    }
}
