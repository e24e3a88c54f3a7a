//! Persistence seam for the card pool.
//!
//! The store is an opaque key/value collaborator; the core only cares that
//! [`StoredState`] round-trips losslessly. Saves are best-effort: the pool
//! manager logs failures and keeps in-memory state authoritative.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::error::CoreError;

/// Everything the pool manager persists between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    /// Full card list, custom entries included. Seed cards are re-read from
    /// the bundled resource on load; only custom entries are trusted here.
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Cards reviewed as keepers. Retired from future pools.
    #[serde(default)]
    pub reviewed_good: Vec<Card>,
    /// Cards reviewed as discards. Retired from future pools.
    #[serde(default)]
    pub reviewed_bad: Vec<Card>,
    /// Cards drawn per session; 0 means "not persisted" (use the default).
    #[serde(default)]
    pub cards_per_game: usize,
    #[serde(default)]
    pub use_family_cards: bool,
}

#[async_trait]
pub trait CardStore: Send + Sync {
    async fn load(&self) -> Result<StoredState, CoreError>;
    async fn save(&self, state: &StoredState) -> Result<(), CoreError>;
}
