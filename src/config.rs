// Startup configuration, read once from the environment.
//
// Required values must be present; `BotConfig::from_env` reports the first one
// that is missing so `main` can refuse to start. Optional values fall back to
// the defaults below.

use crate::core::posts::{default_accounts, ColdStartPolicy, WatchedAccount};
use crate::core::prices::{default_watchlist, WatchedAsset, DEFAULT_ALERT_THRESHOLD};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_POST_POLL_SECS: u64 = 60;
const DEFAULT_PRICE_POLL_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Whether the keepalive self-ping loop runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfPing {
    /// No `SELF_PING_URL` configured; the loop is never started.
    Disabled,
    Enabled { url: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub application_id: u64,
    pub guild_id: u64,
    pub announce_channel_id: u64,
    pub openai_api_key: String,
    pub openai_model: String,
    pub twitter_bearer_token: String,
    pub self_ping: SelfPing,
    pub port: u16,
    pub assets: Vec<WatchedAsset>,
    pub accounts: Vec<WatchedAccount>,
    pub post_cold_start: ColdStartPolicy,
    pub post_poll_interval: Duration,
    pub price_poll_interval: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key -> value source. Blank values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bot_token = require("BOT_TOKEN")?;
        let application_id = parse_id("CLIENT_ID", &require("CLIENT_ID")?)?;
        let guild_id = parse_id("GUILD_ID", &require("GUILD_ID")?)?;
        let openai_api_key = require("OPENAI_API_KEY")?;
        let twitter_bearer_token = require("TWITTER_BEARER_TOKEN")?;
        let announce_channel_id =
            parse_id("DISCORD_CHANNEL_ID", &require("DISCORD_CHANNEL_ID")?)?;

        let self_ping = match get("SELF_PING_URL") {
            Some(url) => SelfPing::Enabled { url },
            None => SelfPing::Disabled,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let openai_model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

        let assets = match get("WATCHED_ASSETS") {
            Some(raw) => parse_assets(&raw)?,
            None => default_watchlist(),
        };

        let accounts = match get("WATCHED_ACCOUNTS") {
            Some(raw) => parse_accounts(&raw)?,
            None => default_accounts(),
        };

        let post_cold_start = match get("POST_COLD_START") {
            Some(raw) => raw
                .parse::<ColdStartPolicy>()
                .map_err(|reason| ConfigError::Invalid {
                    key: "POST_COLD_START",
                    reason,
                })?,
            None => ColdStartPolicy::default(),
        };

        let post_poll_interval =
            parse_interval("POST_POLL_SECS", get("POST_POLL_SECS"), DEFAULT_POST_POLL_SECS)?;
        let price_poll_interval =
            parse_interval("PRICE_POLL_SECS", get("PRICE_POLL_SECS"), DEFAULT_PRICE_POLL_SECS)?;

        Ok(Self {
            bot_token,
            application_id,
            guild_id,
            announce_channel_id,
            openai_api_key,
            openai_model,
            twitter_bearer_token,
            self_ping,
            port,
            assets,
            accounts,
            post_cold_start,
            post_poll_interval,
            price_poll_interval,
        })
    }
}

/// Discord snowflakes are non-zero u64s.
fn parse_id(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            reason: "id must be non-zero".to_string(),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

fn parse_interval(
    key: &'static str,
    raw: Option<String>,
    default_secs: u64,
) -> Result<Duration, ConfigError> {
    let secs = match raw {
        Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })?,
        None => default_secs,
    };

    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: "interval must be at least one second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// `bitcoin:10,ethereum:10,pepe` - a missing threshold uses the default.
/// Symbols are CoinGecko ids, which are always lowercase.
fn parse_assets(raw: &str) -> Result<Vec<WatchedAsset>, ConfigError> {
    let mut assets = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (symbol, threshold) = match entry.split_once(':') {
            Some((symbol, threshold)) => {
                let threshold = threshold.trim().parse::<f64>().map_err(|e| {
                    ConfigError::Invalid {
                        key: "WATCHED_ASSETS",
                        reason: format!("{}: {}", entry, e),
                    }
                })?;
                (symbol.trim(), threshold)
            }
            None => (entry, DEFAULT_ALERT_THRESHOLD),
        };

        if symbol.is_empty() || !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "WATCHED_ASSETS",
                reason: format!("{}: expected symbol[:positive threshold]", entry),
            });
        }

        assets.push(WatchedAsset::new(symbol.to_lowercase(), threshold));
    }

    Ok(assets)
}

/// `WatcherGuru:1244160501793519616,arkham:1433001060820645895`
fn parse_accounts(raw: &str) -> Result<Vec<WatchedAccount>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|entry| {
            let parsed = entry
                .split_once(':')
                .map(|(name, id)| (name.trim(), id.trim()));
            match parsed {
                Some((name, id))
                    if !name.is_empty()
                        && !id.is_empty()
                        && id.chars().all(|c| c.is_ascii_digit()) =>
                {
                    Ok(WatchedAccount::new(name, id))
                }
                _ => Err(ConfigError::Invalid {
                    key: "WATCHED_ACCOUNTS",
                    reason: format!("{}: expected name:numeric_id", entry),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("BOT_TOKEN", "token"),
            ("CLIENT_ID", "1111"),
            ("GUILD_ID", "2222"),
            ("OPENAI_API_KEY", "sk-test"),
            ("TWITTER_BEARER_TOKEN", "bearer"),
            ("DISCORD_CHANNEL_ID", "3333"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<BotConfig, ConfigError> {
        BotConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();

        assert_eq!(config.application_id, 1111);
        assert_eq!(config.guild_id, 2222);
        assert_eq!(config.announce_channel_id, 3333);
        assert_eq!(config.self_ping, SelfPing::Disabled);
        assert_eq!(config.port, 3000);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.assets.len(), 53);
        assert_eq!(config.accounts.len(), 4);
        assert_eq!(config.post_cold_start, ColdStartPolicy::AnnounceLatest);
        assert_eq!(config.post_poll_interval, Duration::from_secs(60));
        assert_eq!(config.price_poll_interval, Duration::from_secs(120));
    }

    #[test]
    fn test_missing_required_value() {
        let mut vars = required();
        vars.remove("TWITTER_BEARER_TOKEN");
        assert_eq!(
            load(&vars).unwrap_err(),
            ConfigError::Missing("TWITTER_BEARER_TOKEN")
        );

        // Blank counts as missing
        let mut vars = required();
        vars.insert("BOT_TOKEN", "   ");
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn test_non_numeric_id_is_invalid() {
        let mut vars = required();
        vars.insert("GUILD_ID", "my-guild");
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid { key: "GUILD_ID", .. })
        ));
    }

    #[test]
    fn test_self_ping_enabled_when_url_set() {
        let mut vars = required();
        vars.insert("SELF_PING_URL", "https://bot.example.repl.co/");
        assert_eq!(
            load(&vars).unwrap().self_ping,
            SelfPing::Enabled {
                url: "https://bot.example.repl.co/".to_string()
            }
        );
    }

    #[test]
    fn test_watchlist_overrides() {
        let mut vars = required();
        vars.insert("WATCHED_ASSETS", "bitcoin:5, kaspa ,");
        vars.insert("WATCHED_ACCOUNTS", "arkham:1433001060820645895");
        vars.insert("POST_COLD_START", "silent");

        let config = load(&vars).unwrap();
        assert_eq!(
            config.assets,
            vec![
                WatchedAsset::new("bitcoin", 5.0),
                WatchedAsset::new("kaspa", DEFAULT_ALERT_THRESHOLD),
            ]
        );
        assert_eq!(
            config.accounts,
            vec![WatchedAccount::new("arkham", "1433001060820645895")]
        );
        assert_eq!(config.post_cold_start, ColdStartPolicy::Silent);
    }

    #[test]
    fn test_asset_symbols_are_lowercased() {
        assert_eq!(
            parse_assets("Bitcoin:10,PEPE").unwrap(),
            vec![
                WatchedAsset::new("bitcoin", 10.0),
                WatchedAsset::new("pepe", DEFAULT_ALERT_THRESHOLD),
            ]
        );
    }

    #[test]
    fn test_bad_watchlist_entries() {
        assert!(parse_assets("bitcoin:ten").is_err());
        assert!(parse_assets("bitcoin:0").is_err());
        assert!(parse_assets(":10").is_err());
        assert!(parse_accounts("arkham").is_err());
        assert!(parse_accounts("arkham:abc").is_err());
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let mut vars = required();
        vars.insert("PRICE_POLL_SECS", "0");
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid { key: "PRICE_POLL_SECS", .. })
        ));
    }
}
