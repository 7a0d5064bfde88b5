use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::prices::{PriceError, PriceFeed};

/// Minimal CoinGecko client. Only the `simple/price` endpoint is needed.
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self, PriceError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("SignalRelayBot/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| PriceError::Api(e.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://api.coingecko.com".to_string(),
        })
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    async fn fetch_usd_prices(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, PriceError> {
        let url = format!("{}/api/v3/simple/price", self.base_url);
        let ids = symbols.join(",");

        let resp = self
            .client
            .get(url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| PriceError::Api(e.to_string()))?;

        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceError::Api("CoinGecko rate limit hit".to_string()));
        }
        if !resp.status().is_success() {
            return Err(PriceError::Api(format!(
                "CoinGecko returned {} for simple/price",
                resp.status()
            )));
        }

        let quotes: HashMap<String, ApiQuote> = resp
            .json()
            .await
            .map_err(|e| PriceError::Api(e.to_string()))?;

        Ok(usd_prices(quotes))
    }
}

/// Flatten `{"bitcoin": {"usd": 1.0}}` into `{"bitcoin": 1.0}`, dropping unpriced ids.
fn usd_prices(quotes: HashMap<String, ApiQuote>) -> HashMap<String, f64> {
    quotes
        .into_iter()
        .filter_map(|(symbol, quote)| quote.usd.map(|usd| (symbol, usd)))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ApiQuote {
    usd: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_price_payload() {
        let body = r#"{
            "bitcoin": {"usd": 64012.5},
            "pepe": {"usd": 0.0000123},
            "housecoin": {},
            "kaspa": {"usd": null}
        }"#;

        let quotes: HashMap<String, ApiQuote> = serde_json::from_str(body).unwrap();
        let prices = usd_prices(quotes);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices["bitcoin"], 64012.5);
        assert!((prices["pepe"] - 0.0000123).abs() < 1e-12);
        assert!(!prices.contains_key("housecoin"));
        assert!(!prices.contains_key("kaspa"));
    }

    #[test]
    fn test_empty_payload() {
        let quotes: HashMap<String, ApiQuote> = serde_json::from_str("{}").unwrap();
        assert!(usd_prices(quotes).is_empty());
    }
}
