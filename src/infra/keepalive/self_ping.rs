use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::task::JoinHandle;

use crate::core::scheduler::{spawn_polling, PollSchedule};

/// Just under the five minutes after which free hosts put an idle app to sleep.
pub const SELF_PING_PERIOD: Duration = Duration::from_secs(280);

pub struct SelfPingClient {
    client: Client,
    url: String,
}

impl SelfPingClient {
    pub fn new(url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one GET. Any response counts as a successful ping.
    pub async fn ping(&self) -> Result<StatusCode, reqwest::Error> {
        let resp = self.client.get(&self.url).send().await?;
        Ok(resp.status())
    }
}

/// Ping `client` every `SELF_PING_PERIOD`, starting one period from now.
pub fn spawn_self_ping(client: SelfPingClient) -> JoinHandle<()> {
    let client = std::sync::Arc::new(client);
    spawn_polling("self-ping", PollSchedule::delayed(SELF_PING_PERIOD), move || {
        let client = std::sync::Arc::clone(&client);
        async move {
            match client.ping().await {
                Ok(status) => tracing::info!(url = %client.url(), %status, "🔁 Self-ping sent"),
                Err(err) => tracing::warn!(url = %client.url(), error = %err, "⚠️ Self-ping failed"),
            }
        }
    })
}
