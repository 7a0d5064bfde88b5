// Background relays: run a core check on its schedule and announce the results.

use crate::core::posts::{PostFeed, PostWatchService, WatermarkStore};
use crate::core::prices::{PriceAlertService, PriceFeed, PriceSnapshotStore};
use crate::core::scheduler::{spawn_polling, PollSchedule};
use crate::discord::announcements::dispatcher;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub fn spawn_post_relay<C, S>(
    http: Arc<serenity::Http>,
    channel_id: serenity::ChannelId,
    service: Arc<PostWatchService<C, S>>,
    schedule: PollSchedule,
) -> JoinHandle<()>
where
    C: PostFeed + 'static,
    S: WatermarkStore + 'static,
{
    spawn_polling("post-check", schedule, move || {
        let http = Arc::clone(&http);
        let service = Arc::clone(&service);
        async move {
            let announcements = service.check_accounts().await;
            if announcements.is_empty() {
                tracing::debug!("No new posts found");
                return;
            }

            tracing::info!("Found {} new posts", announcements.len());
            dispatcher::send_post_announcements(&http, channel_id, &announcements).await;
        }
    })
}

pub fn spawn_price_relay<F, S>(
    http: Arc<serenity::Http>,
    channel_id: serenity::ChannelId,
    service: Arc<PriceAlertService<F, S>>,
    schedule: PollSchedule,
) -> JoinHandle<()>
where
    F: PriceFeed + 'static,
    S: PriceSnapshotStore + 'static,
{
    spawn_polling("price-check", schedule, move || {
        let http = Arc::clone(&http);
        let service = Arc::clone(&service);
        async move {
            match service.check_prices().await {
                Ok(alerts) if alerts.is_empty() => tracing::debug!("No price alerts this tick"),
                Ok(alerts) => {
                    tracing::info!("Triggered {} price alerts", alerts.len());
                    dispatcher::send_price_alerts(&http, channel_id, &alerts).await;
                }
                Err(err) => tracing::warn!("Price check failed: {}", err),
            }
        }
    })
}
