use super::{StorageError, TallyStore};
use crate::models::Tally;
use async_trait::async_trait;
use std::sync::Mutex;

/// Process-local tally for development and tests. Lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tally: Mutex<Tally>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tally> {
        // A poisoned map is still a valid map.
        self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TallyStore for MemoryStore {
    async fn load(&self) -> Result<Tally, StorageError> {
        Ok(self.lock().clone())
    }

    async fn save(&self, tally: &Tally) -> Result<(), StorageError> {
        *self.lock() = tally.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let tally: Tally = [("a".to_string(), 2), ("b".to_string(), 5)].into_iter().collect();

        store.save(&tally).await.unwrap();
        assert_eq!(store.load().await.unwrap(), tally);
    }

    #[tokio::test]
    async fn test_load_returns_a_copy() {
        let store = MemoryStore::new();
        store.save(&[("a".to_string(), 1)].into_iter().collect()).await.unwrap();

        let mut loaded = store.load().await.unwrap();
        loaded.insert("a".to_string(), 99);
        loaded.insert("rogue".to_string(), 1);

        let fresh = store.load().await.unwrap();
        assert_eq!(fresh.get("a"), Some(&1));
        assert!(!fresh.contains_key("rogue"));
    }

    #[tokio::test]
    async fn test_save_keeps_its_own_copy() {
        let store = MemoryStore::new();
        let mut tally: Tally = [("a".to_string(), 1)].into_iter().collect();

        store.save(&tally).await.unwrap();
        tally.insert("a".to_string(), 50);

        assert_eq!(store.load().await.unwrap().get("a"), Some(&1));
    }
}
