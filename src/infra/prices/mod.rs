// Price infra layer.
// - `coingecko_client.rs` talks to the CoinGecko HTTP API.
// - `in_memory.rs` keeps the last snapshot per symbol for the process lifetime.

#[path = "coingecko_client.rs"]
pub mod coingecko_client;

#[path = "in_memory.rs"]
pub mod in_memory;

pub use coingecko_client::CoinGeckoClient;
pub use in_memory::InMemorySnapshotStore;
