//! Edge-triggered session transitions derived from before/after views.
//!
//! The view layer and the persistence shim subscribe to these instead of
//! polling fields; the domain stays free of observer machinery.

use crate::domain::rules::Round;

/// Minimal lifecycle snapshot sufficient to derive transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLifecycleView {
    pub round: Round,
    pub is_running: bool,
    pub turn_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Edge-triggered: a session left the idle state.
    GameStarted,

    /// Edge-triggered: a turn countdown began.
    TurnStarted { turn_no: u32 },

    /// Edge-triggered: the running turn stopped (timer, empty deck, or caller).
    TurnEnded,

    /// Edge-triggered: play moved into the next round.
    RoundAdvanced { round: Round },

    /// Edge-triggered: the session became terminal.
    GameEnded { turns: u32 },

    /// Edge-triggered: the session was torn down back to idle.
    SessionReset,
}

/// Derive transitions from before/after lifecycle state.
pub fn derive_session_transitions(
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    // 1. Session start (idle or terminal -> playable). A restart after a
    // game-over is a fresh game, not a continuation.
    if !before.round.is_playable() && after.round.is_playable() {
        transitions.push(SessionTransition::GameStarted);
    }

    // 2. Turn edges
    if !before.is_running && after.is_running {
        transitions.push(SessionTransition::TurnStarted {
            turn_no: after.turn_count,
        });
    }
    if before.is_running && !after.is_running {
        transitions.push(SessionTransition::TurnEnded);
    }

    // 3. Round advance (playable -> next playable). Entering round 1 from
    // idle is a game start, not an advance.
    if before.round.is_playable()
        && after.round.is_playable()
        && after.round.tier() == before.round.tier() + 1
    {
        transitions.push(SessionTransition::RoundAdvanced { round: after.round });
    }

    // 4. Game end (!GameOver -> GameOver)
    if before.round != Round::GameOver && after.round == Round::GameOver {
        transitions.push(SessionTransition::GameEnded {
            turns: after.turn_count,
        });
    }

    // 5. Teardown (!NotStarted -> NotStarted)
    if before.round != Round::NotStarted && after.round == Round::NotStarted {
        transitions.push(SessionTransition::SessionReset);
    }

    transitions
}
