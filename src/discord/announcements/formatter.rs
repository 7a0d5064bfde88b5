use crate::core::posts::PostAnnouncement;
use crate::core::prices::PriceAlert;

pub fn format_price_alert(alert: &PriceAlert) -> String {
    format!("📈 {}", alert)
}

pub fn format_post(announcement: &PostAnnouncement) -> String {
    format!(
        "🧠 NEW POST from @{}:\n{}\n🔗 {}",
        announcement.account_name,
        announcement.post.text,
        announcement.permalink()
    )
}
