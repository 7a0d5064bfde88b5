// Social feed infra layer.
// - `twitter_client.rs` reads user timelines from the Twitter v2 API.
// - `in_memory.rs` keeps per-account watermarks for the process lifetime.

#[path = "twitter_client.rs"]
pub mod twitter_client;

#[path = "in_memory.rs"]
pub mod in_memory;

pub use in_memory::InMemoryWatermarkStore;
pub use twitter_client::TwitterClient;
