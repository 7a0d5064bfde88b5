// Channel announcements.
// - `formatter.rs` turns core events into message text.
// - `dispatcher.rs` posts them to the announcement channel.
// - `relay.rs` wires the poll loops to the dispatcher.

#[path = "formatter.rs"]
pub mod formatter;

#[path = "dispatcher.rs"]
pub mod dispatcher;

#[path = "relay.rs"]
pub mod relay;

pub use relay::{spawn_post_relay, spawn_price_relay};
