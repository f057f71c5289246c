pub mod results;

use crate::auth::ResetAuth;
use crate::error::VoteError;
use crate::models::{Poll, Tally};
use crate::storage::{StorageError, TallyStore};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A vote that was counted. The caller is expected to set the visitor's
/// voted marker.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteReceipt {
    pub option_id: String,
    pub tally: Tally,
}

/// Ties the poll definition, tally storage and reset auth together.
pub struct VoteService {
    poll: Arc<Poll>,
    store: Arc<dyn TallyStore>,
    auth: Arc<dyn ResetAuth>,
    // Serializes every load-modify-save on the store.
    write_lock: Mutex<()>,
}

impl VoteService {
    pub fn new(poll: Arc<Poll>, store: Arc<dyn TallyStore>, auth: Arc<dyn ResetAuth>) -> Self {
        Self {
            poll,
            store,
            auth,
            write_lock: Mutex::new(()),
        }
    }

    pub fn poll(&self) -> &Poll {
        &self.poll
    }

    /// Stored tally with a zero entry for every option it is missing.
    pub async fn normalized_tally(&self) -> Result<Tally, StorageError> {
        let mut tally = self.store.load().await?;
        for option in self.poll.options() {
            tally.entry(option.id.clone()).or_insert(0);
        }
        Ok(tally)
    }

    /// Writes the all-zero tally when storage holds nothing yet.
    pub async fn seed_if_empty(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        if self.store.load().await?.is_empty() {
            info!("No stored votes found, seeding an empty tally");
            self.store.save(&self.poll.initial_tally()).await?;
        }
        Ok(())
    }

    pub async fn submit_vote(
        &self,
        option_id: &str,
        already_voted: bool,
    ) -> Result<VoteReceipt, VoteError> {
        if already_voted {
            warn!("Rejected repeat vote for {:?}", option_id);
            return Err(VoteError::DuplicateVote);
        }

        let Some(label) = self.poll.label_of(option_id) else {
            warn!("Rejected vote for unknown option {:?}", option_id);
            return Err(VoteError::InvalidOption(option_id.to_string()));
        };

        let _guard = self.write_lock.lock().await;
        let mut tally = self.normalized_tally().await?;
        if let Some(count) = tally.get_mut(option_id) {
            *count = count
                .checked_add(1)
                .ok_or_else(|| StorageError::CountOverflow(option_id.to_string()))?;
        }
        self.store.save(&tally).await?;

        info!("Counted vote for option {} ({})", label, option_id);
        Ok(VoteReceipt {
            option_id: option_id.to_string(),
            tally,
        })
    }

    pub async fn reset(&self, token: &str) -> Result<(), VoteError> {
        if !self.auth.verify(token) {
            warn!("Rejected reset with an invalid token");
            return Err(VoteError::Unauthorized);
        }

        let _guard = self.write_lock.lock().await;
        self.store.reset(&self.poll.initial_tally()).await?;

        info!("Tally reset by operator");
        Ok(())
    }
}
