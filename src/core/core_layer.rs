// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "prices/mod.rs"]
pub mod prices;

#[path = "posts/mod.rs"]
pub mod posts;

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "scheduler/poll_schedule.rs"]
pub mod scheduler;
