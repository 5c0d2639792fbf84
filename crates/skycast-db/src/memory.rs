//! In-process [`HistoryStore`] for local development and tests

use async_trait::async_trait;
use chrono::Utc;
use skycast_core::{HistoryEntry, HistoryStore, PersistenceResult};
use tokio::sync::RwLock;

/// Keeps every entry in memory; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn record(&self, city: &str) -> PersistenceResult<()> {
        let mut entries = self.entries.write().await;
        let id = entries.last().map_or(1, |e| e.id + 1);
        entries.push(HistoryEntry {
            id,
            city: city.to_string(),
            searched_at: Utc::now(),
        });
        Ok(())
    }

    async fn recent(&self, limit: usize) -> PersistenceResult<Vec<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn ids_increase_and_recent_is_newest_first() {
        let store = MemoryHistoryStore::new();
        for city in ["A", "B", "C", "D"] {
            store.record(city).await.unwrap();
        }

        let recent = store.recent(3).await.unwrap();
        let cities: Vec<_> = recent.iter().map(|e| e.city.as_str()).collect();
        assert_eq!(cities, ["D", "C", "B"]);
        assert!(recent.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn recent_is_bounded() {
        let store = MemoryHistoryStore::new();
        assert!(store.recent(10).await.unwrap().is_empty());

        store.record("Only").await.unwrap();
        assert_eq!(store.recent(10).await.unwrap().len(), 1);
        assert!(store.recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_records_get_unique_ids() {
        let store = Arc::new(MemoryHistoryStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.record(&format!("city-{i}")).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let all = store.recent(100).await.unwrap();
        assert_eq!(all.len(), 20);
        let mut ids: Vec<_> = all.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
