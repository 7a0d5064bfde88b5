// Discord layer - commands and channel announcements.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "announcements/mod.rs"]
pub mod announcements;

// Re-export command types for convenience
pub use commands::{Data, Error};
