//! Core card types: CardId, Card, CardKind, DeckVariant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable card identity. Never changes once assigned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a card came from and which pool it belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Bundled seed card (reloaded from the seed resource each startup).
    Seed,
    /// Manually entered card for the base deck.
    CustomBase,
    /// Manually entered card for the family-friendly deck.
    CustomFamily,
}

impl CardKind {
    pub fn is_custom(self) -> bool {
        matches!(self, CardKind::CustomBase | CardKind::CustomFamily)
    }
}

/// Which seed deck (and which custom cards) a session draws from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DeckVariant {
    Base,
    Family,
}

/// A single game card.
///
/// `text` and `kind` are mutable through the pool manager; `id` is fixed for
/// the card's lifetime and is the sole basis for equality.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub text: String,
    pub kind: CardKind,
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Card {
    pub fn seed(text: impl Into<String>) -> Self {
        Self {
            id: CardId::new(),
            text: text.into(),
            kind: CardKind::Seed,
        }
    }

    pub fn custom(text: impl Into<String>, variant: DeckVariant) -> Self {
        let kind = match variant {
            DeckVariant::Base => CardKind::CustomBase,
            DeckVariant::Family => CardKind::CustomFamily,
        };
        Self {
            id: CardId::new(),
            text: text.into(),
            kind,
        }
    }

    /// The variant whose pool this card is eligible for.
    pub fn variant(&self) -> Option<DeckVariant> {
        match self.kind {
            CardKind::Seed => None,
            CardKind::CustomBase => Some(DeckVariant::Base),
            CardKind::CustomFamily => Some(DeckVariant::Family),
        }
    }
}
