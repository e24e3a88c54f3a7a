//! Caller-selectable game settings.
//!
//! Settings are persisted through the card store alongside the pool; the env
//! accessors exist so a host process can override the defaults at startup.

use std::env;

use crate::domain::cards::DeckVariant;
use crate::domain::rules::{self, DEFAULT_CARDS_PER_GAME};
use crate::error::CoreError;

/// Validated session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    cards_per_game: usize,
    use_family_cards: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            cards_per_game: DEFAULT_CARDS_PER_GAME,
            use_family_cards: false,
        }
    }
}

impl GameSettings {
    pub fn new(cards_per_game: usize, use_family_cards: bool) -> Result<Self, CoreError> {
        let mut settings = Self {
            cards_per_game: DEFAULT_CARDS_PER_GAME,
            use_family_cards,
        };
        settings.set_cards_per_game(cards_per_game)?;
        Ok(settings)
    }

    /// Build settings from `MONIKERS_CARDS_PER_GAME` / `MONIKERS_FAMILY_CARDS`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut settings = Self::default();
        if let Ok(raw) = env::var("MONIKERS_CARDS_PER_GAME") {
            let n: usize = raw.parse().map_err(|_| {
                CoreError::config(format!("MONIKERS_CARDS_PER_GAME is not a number: '{raw}'"))
            })?;
            settings.set_cards_per_game(n)?;
        }
        if let Ok(raw) = env::var("MONIKERS_FAMILY_CARDS") {
            settings.use_family_cards = matches!(raw.as_str(), "1" | "true" | "yes");
        }
        Ok(settings)
    }

    pub fn cards_per_game(&self) -> usize {
        self.cards_per_game
    }

    pub fn use_family_cards(&self) -> bool {
        self.use_family_cards
    }

    pub fn variant(&self) -> DeckVariant {
        if self.use_family_cards {
            DeckVariant::Family
        } else {
            DeckVariant::Base
        }
    }

    pub fn set_cards_per_game(&mut self, n: usize) -> Result<(), CoreError> {
        if !rules::valid_cards_per_game(n) {
            return Err(CoreError::config(format!(
                "cards_per_game must be one of {:?}, got {n}",
                rules::CARDS_PER_GAME_CHOICES
            )));
        }
        self.cards_per_game = n;
        Ok(())
    }

    pub fn set_use_family_cards(&mut self, on: bool) {
        self.use_family_cards = on;
    }
}
