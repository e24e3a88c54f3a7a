//! In-memory card store for tests and in-process hosts.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::adapters::store::{CardStore, StoredState};
use crate::error::CoreError;

/// Store that keeps state in memory. Cloning shares the same backing state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoredState>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoredState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            fail_saves: Arc::new(Mutex::new(false)),
        }
    }

    /// Snapshot of what has been persisted so far.
    pub fn snapshot(&self) -> StoredState {
        self.state.lock().clone()
    }

    /// Make subsequent saves fail, to exercise best-effort persistence paths.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn load(&self) -> Result<StoredState, CoreError> {
        Ok(self.state.lock().clone())
    }

    async fn save(&self, state: &StoredState) -> Result<(), CoreError> {
        if *self.fail_saves.lock() {
            return Err(CoreError::store("simulated save failure"));
        }
        *self.state.lock() = state.clone();
        Ok(())
    }
}
