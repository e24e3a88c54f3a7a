//! Pure display derivations: status line and screen title.

use crate::domain::rules::Round;
use crate::domain::session::Session;

/// Status line for the play screen, derived purely from session state.
///
/// Blank while a card is showing; otherwise tells the player what to do next.
pub fn status_message(session: &Session, pool_is_empty: bool) -> String {
    if session.is_idle() {
        if pool_is_empty {
            return "No cards available".to_string();
        }
        return "Press Start for Round 1".to_string();
    }

    if session.is_over() {
        return format!("Game over — {} turns taken", session.turn_count());
    }

    if session.is_running() {
        // A card is showing.
        return String::new();
    }

    if session.round_complete() {
        let completed = session.round().tier() - 1;
        return format!(
            "Round {} complete — press Start for {}",
            completed,
            session.round()
        );
    }

    "Time! Pass to the next player".to_string()
}

/// Screen title: the round in progress, or the terminal state.
pub fn title(session: &Session) -> String {
    match session.round() {
        Round::NotStarted => "Monikers".to_string(),
        Round::GameOver => "Game Over".to_string(),
        round => round.to_string(),
    }
}
