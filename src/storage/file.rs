use super::{StorageError, TallyStore};
use crate::models::Tally;
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

/// Tally kept as a pretty-printed JSON object on disk. Survives restarts.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "votes".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TallyStore for FileStore {
    async fn load(&self) -> Result<Tally, StorageError> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(Tally::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&contents).map_err(StorageError::Corrupt)
    }

    async fn save(&self, tally: &Tally) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(tally).map_err(StorageError::Encode)?;

        // Readers only ever see the old file or the complete new one.
        let temp = self.temp_path();
        fs::write(&temp, &json).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file ({})", self.path.display())
    }
}
