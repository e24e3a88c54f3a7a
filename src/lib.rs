//! Session core for the Monikers party card game.
//!
//! Three timed rounds (Taboo, One Word, Mime) over a shared deck that shrinks
//! as cards are guessed and is reshuffled between turns and rounds, plus the
//! post-game review that retires cards from future pools. This crate is the
//! state machine only: a view layer renders the exposed state, and a
//! persistence collaborator (the [`adapters::CardStore`] seam) holds the card
//! pool between runs.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;


// Re-exports for public API
pub use adapters::{BundledSeeds, CardStore, JsonFileStore, MemoryStore, SeedSource, StoredState};
pub use config::GameSettings;
pub use domain::{
    Card, CardId, CardKind, DeckVariant, Round, Session, SessionTransition, Shuffler,
};
pub use error::CoreError;
pub use services::{CardPoolManager, CardRating, ReviewSheet, SessionFlowService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
