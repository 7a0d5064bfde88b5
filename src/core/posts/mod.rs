pub mod post_models;
pub mod post_service;

pub use post_models::{default_accounts, ColdStartPolicy, Post, PostAnnouncement, WatchedAccount};
pub use post_service::{FeedError, PostFeed, PostWatchService, WatermarkStore};
