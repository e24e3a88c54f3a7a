//! Session aggregate: round/turn progression and working-deck mutation.
//!
//! All operations are pure state transitions (no I/O, no timers). The service
//! layer drives the once-per-second tick and publishes transitions; everything
//! here is synchronous and defensively guarded: illegal calls are no-ops,
//! never errors, because the caller (a UI) may race ahead of state changes.

use tracing::debug;

use crate::domain::cards::Card;
use crate::domain::rules::{Round, MAX_ROUNDS, TURN_SECONDS};
use crate::domain::shuffle::Shuffler;
use crate::domain::transition::SessionLifecycleView;

/// Outcome of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is active; the tick was stale.
    Idle,
    /// Countdown decremented; seconds remaining.
    Running(u32),
    /// The countdown would have gone below zero; the turn was ended.
    Expired,
}

/// One play-through of the game: three rounds over a fixed drawn card set.
///
/// Invariants held after every operation:
/// - `active_deck` is a permutation of a subset of `selected_cards`
/// - `cursor < active_deck.len()` whenever the deck is non-empty
/// - a turn is only running while the round tier is 1..=3
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) round_no: u8,
    pub(crate) selected_cards: Vec<Card>,
    pub(crate) active_deck: Vec<Card>,
    pub(crate) cursor: usize,
    pub(crate) turn_count: u32,
    pub(crate) correct_this_turn: u32,
    pub(crate) skipped_this_turn: u32,
    pub(crate) is_running: bool,
    pub(crate) time_remaining: u32,
    /// Set when `end_turn` advances the round; cleared on the next turn start.
    /// Supports the "round K complete" status line after the deck refill.
    pub(crate) round_complete: bool,
    /// Set by the review workflow once the session's cards have been reviewed.
    pub(crate) reviewed: bool,
}

impl Session {
    /// Canonical idle state. `end_game` resets to exactly this.
    pub fn idle() -> Self {
        Self {
            round_no: 0,
            selected_cards: Vec::new(),
            active_deck: Vec::new(),
            cursor: 0,
            turn_count: 0,
            correct_this_turn: 0,
            skipped_this_turn: 0,
            is_running: false,
            time_remaining: 0,
            round_complete: false,
            reviewed: false,
        }
    }

    pub fn round(&self) -> Round {
        Round::from_tier(self.round_no)
    }

    pub fn selected_cards(&self) -> &[Card] {
        &self.selected_cards
    }

    pub fn active_deck(&self) -> &[Card] {
        &self.active_deck
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn correct_this_turn(&self) -> u32 {
        self.correct_this_turn
    }

    pub fn skipped_this_turn(&self) -> u32 {
        self.skipped_this_turn
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn round_complete(&self) -> bool {
        self.round_complete
    }

    pub fn is_reviewed(&self) -> bool {
        self.reviewed
    }

    pub fn mark_reviewed(&mut self) {
        self.reviewed = true;
    }

    pub fn is_idle(&self) -> bool {
        self.round_no == 0
    }

    pub fn is_over(&self) -> bool {
        self.round_no > MAX_ROUNDS
    }

    /// The card currently shown, if any.
    pub fn current_card(&self) -> Option<&Card> {
        self.active_deck.get(self.cursor)
    }

    pub fn lifecycle_view(&self) -> SessionLifecycleView {
        SessionLifecycleView {
            round: self.round(),
            is_running: self.is_running,
            turn_count: self.turn_count,
        }
    }

    /// Start a turn, initializing a fresh session first when idle or game-over.
    ///
    /// Initialization draws `min(cards_per_game, pool.len())` cards uniformly
    /// at random without replacement. An empty pool leaves the session idle.
    /// Guards (already running, unplayable round) make the call a no-op.
    /// Returns whether a turn actually started.
    pub fn start_turn(
        &mut self,
        pool: &[Card],
        cards_per_game: usize,
        shuffler: &mut dyn Shuffler,
    ) -> bool {
        if self.is_idle() || self.is_over() {
            if pool.is_empty() {
                debug!("start_turn: no eligible cards, staying idle");
                return false;
            }
            *self = Self::idle();
            let mut drawn = pool.to_vec();
            shuffler.shuffle(&mut drawn);
            drawn.truncate(cards_per_game.min(drawn.len()));
            debug!(drawn = drawn.len(), "start_turn: new session");
            self.selected_cards = drawn;
            self.active_deck = self.selected_cards.clone();
            self.round_no = 1;
        }

        if self.is_running || !self.round().is_playable() {
            return false;
        }

        self.correct_this_turn = 0;
        self.skipped_this_turn = 0;
        shuffler.shuffle(&mut self.active_deck);
        self.cursor = 0;
        self.is_running = true;
        self.turn_count += 1;
        self.time_remaining = TURN_SECONDS;
        self.round_complete = false;
        debug!(
            round = self.round_no,
            turn = self.turn_count,
            deck = self.active_deck.len(),
            "turn started"
        );
        true
    }

    /// Advance the countdown by one second.
    ///
    /// Decrements `time_remaining`; when it would go below zero the turn is
    /// ended instead (which may cascade into a round advance).
    pub fn tick(&mut self, shuffler: &mut dyn Shuffler) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }
        if self.time_remaining == 0 {
            self.end_turn(shuffler);
            return TickOutcome::Expired;
        }
        self.time_remaining -= 1;
        TickOutcome::Running(self.time_remaining)
    }

    /// End the running turn. No-op (and `false`) when no turn is running.
    ///
    /// An empty deck advances the round by exactly one: rounds <= 3 refill and
    /// reshuffle the deck from `selected_cards`; round 4 is terminal game-over
    /// and the deck stays empty.
    pub fn end_turn(&mut self, shuffler: &mut dyn Shuffler) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;

        if self.active_deck.is_empty() {
            self.round_no += 1;
            self.round_complete = true;
            if self.round_no <= MAX_ROUNDS {
                self.active_deck = self.selected_cards.clone();
                shuffler.shuffle(&mut self.active_deck);
                self.cursor = 0;
                self.time_remaining = TURN_SECONDS;
                debug!(round = self.round_no, "round advanced");
            } else {
                debug!(turns = self.turn_count, "game over");
            }
        }
        true
    }

    /// Record a correct guess: remove the shown card from the deck.
    ///
    /// Emptying the deck ends the turn synchronously, so callers never observe
    /// an "empty but still running" state.
    pub fn correct_guess(&mut self, shuffler: &mut dyn Shuffler) -> bool {
        if !self.is_running || self.cursor >= self.active_deck.len() {
            return false;
        }
        self.correct_this_turn += 1;
        let card = self.active_deck.remove(self.cursor);
        debug!(card = %card.id, remaining = self.active_deck.len(), "correct guess");

        if self.active_deck.is_empty() {
            self.end_turn(shuffler);
        } else if self.cursor >= self.active_deck.len() {
            self.cursor = 0;
        }
        true
    }

    /// Skip the shown card: move it to the back of the deck. Deck size is
    /// unchanged; only the order shifts.
    pub fn skip_card(&mut self) -> bool {
        if !self.is_running || self.cursor >= self.active_deck.len() {
            return false;
        }
        self.skipped_this_turn += 1;
        let card = self.active_deck.remove(self.cursor);
        self.active_deck.push(card);
        if self.cursor >= self.active_deck.len() {
            self.cursor = 0;
        }
        true
    }

    /// Forcibly terminate the session from any state, back to canonical idle.
    pub fn reset(&mut self) {
        debug!(turns = self.turn_count, "session reset");
        *self = Self::idle();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}
