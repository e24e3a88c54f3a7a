//! Domain layer: pure game logic types and helpers.

pub mod cards;
pub mod rules;
pub mod session;
pub mod shuffle;
pub mod status;
pub mod transition;

#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use cards::{Card, CardId, CardKind, DeckVariant};
pub use rules::{Round, CARDS_PER_GAME_CHOICES, DEFAULT_CARDS_PER_GAME, MAX_ROUNDS, TURN_SECONDS};
pub use session::{Session, TickOutcome};
pub use shuffle::{IdentityShuffler, OsShuffler, SeededShuffler, Shuffler};
pub use status::{status_message, title};
pub use transition::{derive_session_transitions, SessionLifecycleView, SessionTransition};
