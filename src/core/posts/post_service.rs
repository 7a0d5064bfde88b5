// Post watch service - relays the newest post of each watched account once.
//
// The polling logic lives here so it can be tested without Discord or HTTP concerns.
// Each account keeps a watermark (the id of the last relayed post); a fetched post
// is announced only when its id differs from that watermark.

use super::post_models::{ColdStartPolicy, Post, PostAnnouncement, WatchedAccount};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed API error: {0}")]
    Api(String),
}

/// Minimal timeline operation needed by the service.
#[async_trait]
pub trait PostFeed: Send + Sync {
    /// Recent posts for the account, newest first.
    async fn recent_posts(&self, account: &WatchedAccount) -> Result<Vec<Post>, FeedError>;
}

/// Remembers the last relayed post per account.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    async fn watermark(&self, account_id: &str) -> Result<Option<String>, FeedError>;
    async fn advance(&self, account_id: &str, post_id: &str) -> Result<(), FeedError>;
}

/// What the watermark check decided for the newest post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDecision {
    Announce,
    /// First observation under `ColdStartPolicy::Silent`: store it, say nothing.
    Baseline,
    AlreadySeen,
}

/// Compare the newest fetched post against the stored watermark.
pub fn decide(watermark: Option<&str>, newest: &Post, policy: ColdStartPolicy) -> PostDecision {
    match watermark {
        Some(seen) if seen == newest.id => PostDecision::AlreadySeen,
        Some(_) => PostDecision::Announce,
        None => match policy {
            ColdStartPolicy::AnnounceLatest => PostDecision::Announce,
            ColdStartPolicy::Silent => PostDecision::Baseline,
        },
    }
}

pub struct PostWatchService<C: PostFeed, S: WatermarkStore> {
    feed: C,
    store: S,
    accounts: Vec<WatchedAccount>,
    cold_start: ColdStartPolicy,
}

impl<C, S> PostWatchService<C, S>
where
    C: PostFeed,
    S: WatermarkStore,
{
    pub fn new(
        feed: C,
        store: S,
        accounts: Vec<WatchedAccount>,
        cold_start: ColdStartPolicy,
    ) -> Self {
        Self {
            feed,
            store,
            accounts,
            cold_start,
        }
    }

    pub fn accounts(&self) -> &[WatchedAccount] {
        &self.accounts
    }

    /// Run one post-check pass over every watched account, in configured order.
    ///
    /// A failure for one account is logged and skipped; it never hides
    /// announcements for the others.
    pub async fn check_accounts(&self) -> Vec<PostAnnouncement> {
        let mut announcements = Vec::new();

        for account in &self.accounts {
            match self.check_account(account).await {
                Ok(Some(announcement)) => announcements.push(announcement),
                Ok(None) => {}
                Err(err) => tracing::warn!(
                    account = %account.name,
                    error = %err,
                    "Failed to check account for new posts"
                ),
            }
        }

        announcements
    }

    async fn check_account(
        &self,
        account: &WatchedAccount,
    ) -> Result<Option<PostAnnouncement>, FeedError> {
        let posts = self.feed.recent_posts(account).await?;
        let Some(newest) = posts.into_iter().next() else {
            return Ok(None);
        };

        let watermark = self.store.watermark(&account.account_id).await?;
        match decide(watermark.as_deref(), &newest, self.cold_start) {
            PostDecision::AlreadySeen => Ok(None),
            PostDecision::Baseline => {
                self.store.advance(&account.account_id, &newest.id).await?;
                tracing::debug!(account = %account.name, post_id = %newest.id, "Stored post baseline");
                Ok(None)
            }
            PostDecision::Announce => {
                self.store.advance(&account.account_id, &newest.id).await?;
                Ok(Some(PostAnnouncement {
                    account_name: account.name.clone(),
                    post: newest,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Feed with a scripted queue of responses per account id.
    struct ScriptedFeed {
        responses: Mutex<HashMap<String, VecDeque<Result<Vec<Post>, FeedError>>>>,
    }

    impl ScriptedFeed {
        fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
            }
        }

        fn push(&self, account_id: &str, response: Result<Vec<Post>, FeedError>) {
            self.responses
                .lock()
                .unwrap()
                .entry(account_id.to_string())
                .or_default()
                .push_back(response);
        }
    }

    #[async_trait]
    impl PostFeed for ScriptedFeed {
        async fn recent_posts(&self, account: &WatchedAccount) -> Result<Vec<Post>, FeedError> {
            self.responses
                .lock()
                .unwrap()
                .get_mut(&account.account_id)
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    struct MockWatermarkStore {
        marks: DashMap<String, String>,
    }

    impl MockWatermarkStore {
        fn new() -> Self {
            Self {
                marks: DashMap::new(),
            }
        }
    }

    #[async_trait]
    impl WatermarkStore for MockWatermarkStore {
        async fn watermark(&self, account_id: &str) -> Result<Option<String>, FeedError> {
            Ok(self.marks.get(account_id).map(|m| m.clone()))
        }

        async fn advance(&self, account_id: &str, post_id: &str) -> Result<(), FeedError> {
            self.marks.insert(account_id.to_string(), post_id.to_string());
            Ok(())
        }
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            text: format!("post {}", id),
        }
    }

    fn service(
        feed: ScriptedFeed,
        accounts: Vec<WatchedAccount>,
        policy: ColdStartPolicy,
    ) -> PostWatchService<ScriptedFeed, MockWatermarkStore> {
        PostWatchService::new(feed, MockWatermarkStore::new(), accounts, policy)
    }

    fn watermark_of(
        service: &PostWatchService<ScriptedFeed, MockWatermarkStore>,
        account_id: &str,
    ) -> Option<String> {
        service.store.marks.get(account_id).map(|m| m.clone())
    }

    #[test]
    fn test_decide() {
        let newest = post("T2");
        let policy = ColdStartPolicy::AnnounceLatest;
        assert_eq!(decide(Some("T2"), &newest, policy), PostDecision::AlreadySeen);
        assert_eq!(decide(Some("T1"), &newest, policy), PostDecision::Announce);
        assert_eq!(decide(None, &newest, policy), PostDecision::Announce);
        assert_eq!(
            decide(None, &newest, ColdStartPolicy::Silent),
            PostDecision::Baseline
        );
    }

    #[tokio::test]
    async fn test_first_post_announced_once() {
        let feed = ScriptedFeed::new();
        feed.push("1", Ok(vec![post("T1")]));
        feed.push("1", Ok(vec![post("T1")]));
        let service = service(
            feed,
            vec![WatchedAccount::new("WatcherGuru", "1")],
            ColdStartPolicy::AnnounceLatest,
        );

        let first = service.check_accounts().await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].post.id, "T1");
        assert_eq!(first[0].account_name, "WatcherGuru");
        assert_eq!(watermark_of(&service, "1").as_deref(), Some("T1"));

        // Seeing the same newest post again is a no-op
        assert!(service.check_accounts().await.is_empty());
    }

    #[tokio::test]
    async fn test_only_newest_post_is_considered() {
        let feed = ScriptedFeed::new();
        feed.push("1", Ok(vec![post("T1")]));
        feed.push("1", Ok(vec![post("T3"), post("T2"), post("T1")]));
        let service = service(
            feed,
            vec![WatchedAccount::new("arkham", "1")],
            ColdStartPolicy::AnnounceLatest,
        );

        service.check_accounts().await;
        let second = service.check_accounts().await;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].post.id, "T3");
        assert_eq!(watermark_of(&service, "1").as_deref(), Some("T3"));
    }

    #[tokio::test]
    async fn test_silent_cold_start_sets_baseline() {
        let feed = ScriptedFeed::new();
        feed.push("1", Ok(vec![post("T1")]));
        feed.push("1", Ok(vec![post("T2"), post("T1")]));
        let service = service(
            feed,
            vec![WatchedAccount::new("arkham", "1")],
            ColdStartPolicy::Silent,
        );

        assert!(service.check_accounts().await.is_empty());
        assert_eq!(watermark_of(&service, "1").as_deref(), Some("T1"));

        let second = service.check_accounts().await;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].post.id, "T2");
    }

    #[tokio::test]
    async fn test_empty_timeline_is_noop() {
        let feed = ScriptedFeed::new();
        feed.push("1", Ok(vec![post("T1")]));
        feed.push("1", Ok(Vec::new()));
        let service = service(
            feed,
            vec![WatchedAccount::new("arkham", "1")],
            ColdStartPolicy::AnnounceLatest,
        );

        service.check_accounts().await;
        assert!(service.check_accounts().await.is_empty());
        assert_eq!(watermark_of(&service, "1").as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn test_failing_account_does_not_block_others() {
        let feed = ScriptedFeed::new();
        feed.push("1", Err(FeedError::Api("503 Service Unavailable".to_string())));
        feed.push("2", Ok(vec![post("B1")]));
        feed.push("3", Ok(vec![post("C1")]));
        let service = service(
            feed,
            vec![
                WatchedAccount::new("first", "1"),
                WatchedAccount::new("second", "2"),
                WatchedAccount::new("third", "3"),
            ],
            ColdStartPolicy::AnnounceLatest,
        );

        let announcements = service.check_accounts().await;
        let ids: Vec<&str> = announcements.iter().map(|a| a.post.id.as_str()).collect();
        assert_eq!(ids, vec!["B1", "C1"]);
        assert_eq!(watermark_of(&service, "1"), None);
    }
}
