pub mod price_models;
pub mod price_service;

pub use price_models::{
    default_watchlist, PriceAlert, PriceSnapshot, WatchedAsset, DEFAULT_ALERT_THRESHOLD,
};
pub use price_service::{PriceAlertService, PriceError, PriceFeed, PriceSnapshotStore};
