//! Tally persistence.
//!
//! Callers only see the [`TallyStore`] trait; the backend is chosen once at
//! startup from configuration.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::models::Tally;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored tally is unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Tally could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Vote count for option {0} is at its maximum")]
    CountOverflow(String),
}

#[async_trait]
pub trait TallyStore: Send + Sync {
    /// Current tally. An absent store yields an empty map, not an error.
    async fn load(&self) -> Result<Tally, StorageError>;

    /// Replace the whole tally.
    async fn save(&self, tally: &Tally) -> Result<(), StorageError>;

    /// Same as [`TallyStore::save`], named separately so resets read clearly in callers.
    async fn reset(&self, initial: &Tally) -> Result<(), StorageError> {
        self.save(initial).await
    }

    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<Tally>("not json").unwrap_err()
    }

    #[test]
    fn test_encode_and_decode_failures_read_differently() {
        let corrupt = StorageError::Corrupt(json_error()).to_string();
        let encode = StorageError::Encode(json_error()).to_string();

        assert!(corrupt.starts_with("Stored tally is unreadable"));
        assert!(encode.starts_with("Tally could not be encoded"));
    }
}
