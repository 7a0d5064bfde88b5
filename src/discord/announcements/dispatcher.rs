use crate::core::posts::PostAnnouncement;
use crate::core::prices::PriceAlert;
use crate::discord::announcements::formatter::{format_post, format_price_alert};
use poise::serenity_prelude as serenity;

/// Post every price alert to the announcement channel, in order.
pub async fn send_price_alerts(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    alerts: &[PriceAlert],
) {
    for alert in alerts {
        if let Err(err) = channel_id.say(http, format_price_alert(alert)).await {
            tracing::warn!(
                channel_id = channel_id.get(),
                symbol = %alert.symbol,
                error = %err,
                "Failed to send price alert"
            );
        }
    }
}

/// Post every new social-media post to the announcement channel, in order.
pub async fn send_post_announcements(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    announcements: &[PostAnnouncement],
) {
    for announcement in announcements {
        if let Err(err) = channel_id.say(http, format_post(announcement)).await {
            tracing::warn!(
                channel_id = channel_id.get(),
                account = %announcement.account_name,
                post_id = %announcement.post.id,
                error = %err,
                "Failed to send post announcement"
            );
        }
    }
}
