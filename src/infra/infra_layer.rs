// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "prices/mod.rs"]
pub mod prices;

#[path = "posts/mod.rs"]
pub mod posts;

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "keepalive/mod.rs"]
pub mod keepalive;
