use std::fmt;

/// Number of playable rounds in a game.
pub const MAX_ROUNDS: u8 = 3;

/// Fixed length of a single turn, in seconds.
pub const TURN_SECONDS: u32 = 10;

/// Default number of cards drawn for a session.
pub const DEFAULT_CARDS_PER_GAME: usize = 20;

/// Caller-selectable cards-per-game values.
pub const CARDS_PER_GAME_CHOICES: [usize; 6] = [5, 10, 15, 20, 25, 30];

pub fn valid_cards_per_game(n: usize) -> bool {
    CARDS_PER_GAME_CHOICES.contains(&n)
}

/// Game progression phases, ordered as integer tiers.
///
/// Tiers 1..=3 are the playable rounds; 0 is pre-game and anything past
/// [`MAX_ROUNDS`] is terminal until the session is reset.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Round {
    /// Session created but no game started.
    NotStarted,
    /// Round 1: any clue except the card text itself.
    Taboo,
    /// Round 2: a single word.
    OneWord,
    /// Round 3: gestures only.
    Mime,
    /// All three rounds complete.
    GameOver,
}

impl Round {
    pub fn from_tier(tier: u8) -> Self {
        match tier {
            0 => Round::NotStarted,
            1 => Round::Taboo,
            2 => Round::OneWord,
            3 => Round::Mime,
            _ => Round::GameOver,
        }
    }

    pub fn tier(self) -> u8 {
        match self {
            Round::NotStarted => 0,
            Round::Taboo => 1,
            Round::OneWord => 2,
            Round::Mime => 3,
            Round::GameOver => MAX_ROUNDS + 1,
        }
    }

    /// Display label for playable rounds only.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Round::Taboo => Some("Taboo"),
            Round::OneWord => Some("One Word"),
            Round::Mime => Some("Mime"),
            Round::NotStarted | Round::GameOver => None,
        }
    }

    pub fn is_playable(self) -> bool {
        matches!(self, Round::Taboo | Round::OneWord | Round::Mime)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "Round {}: {}", self.tier(), label),
            None if *self == Round::NotStarted => write!(f, "Not started"),
            None => write!(f, "Game over"),
        }
    }
}
