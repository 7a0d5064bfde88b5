// In-memory implementation of PriceSnapshotStore.
//
// Snapshots live only as long as the process. After a restart every symbol
// starts cold again and its first poll just records a baseline.

use crate::core::prices::{PriceError, PriceSnapshot, PriceSnapshotStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// Maps symbol -> last observed snapshot.
pub struct InMemorySnapshotStore {
    snapshots: DashMap<String, PriceSnapshot>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: DashMap::new(),
        }
    }
}

#[async_trait]
impl PriceSnapshotStore for InMemorySnapshotStore {
    async fn last_snapshot(&self, symbol: &str) -> Result<Option<PriceSnapshot>, PriceError> {
        Ok(self.snapshots.get(symbol).map(|entry| *entry.value()))
    }

    async fn record(&self, symbol: &str, snapshot: PriceSnapshot) -> Result<(), PriceError> {
        self.snapshots.insert(symbol.to_string(), snapshot);
        Ok(())
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_record_overwrites_previous_snapshot() {
        let store = InMemorySnapshotStore::new();
        assert_eq!(store.last_snapshot("bitcoin").await.unwrap(), None);

        let first = PriceSnapshot {
            price: 100.0,
            observed_at: Utc::now(),
        };
        store.record("bitcoin", first).await.unwrap();
        assert_eq!(store.last_snapshot("bitcoin").await.unwrap(), Some(first));

        let second = PriceSnapshot {
            price: 90.0,
            observed_at: Utc::now(),
        };
        store.record("bitcoin", second).await.unwrap();
        assert_eq!(
            store.last_snapshot("bitcoin").await.unwrap().map(|s| s.price),
            Some(90.0)
        );

        // Other symbols are untouched
        assert_eq!(store.last_snapshot("ethereum").await.unwrap(), None);
    }
}
