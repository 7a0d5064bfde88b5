// In-memory implementation of WatermarkStore.
// Watermarks are lost on restart, so the cold-start policy applies again afterwards.

use crate::core::posts::{FeedError, WatermarkStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// Maps account id -> id of the last relayed post.
pub struct InMemoryWatermarkStore {
    marks: DashMap<String, String>,
}

impl InMemoryWatermarkStore {
    pub fn new() -> Self {
        Self {
            marks: DashMap::new(),
        }
    }
}

#[async_trait]
impl WatermarkStore for InMemoryWatermarkStore {
    async fn watermark(&self, account_id: &str) -> Result<Option<String>, FeedError> {
        Ok(self.marks.get(account_id).map(|entry| entry.value().clone()))
    }

    async fn advance(&self, account_id: &str, post_id: &str) -> Result<(), FeedError> {
        self.marks.insert(account_id.to_string(), post_id.to_string());
        Ok(())
    }
}

impl Default for InMemoryWatermarkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watermarks_are_per_account() {
        let store = InMemoryWatermarkStore::new();
        assert_eq!(store.watermark("25073877").await.unwrap(), None);

        store.advance("25073877", "T1").await.unwrap();
        store.advance("1433001060820645895", "A1").await.unwrap();
        store.advance("25073877", "T2").await.unwrap();

        assert_eq!(store.watermark("25073877").await.unwrap().as_deref(), Some("T2"));
        assert_eq!(
            store.watermark("1433001060820645895").await.unwrap().as_deref(),
            Some("A1")
        );
    }
}
