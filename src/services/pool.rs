//! Card Pool Manager: the universe of available cards.
//!
//! Owns the seed pool (filtered by the reviewed-card exclusion set and the
//! deck-variant toggle) plus manually entered custom cards. Every mutation
//! triggers a fire-and-forget save through the store; a failed save is logged
//! and tolerated, leaving in-memory state authoritative.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::adapters::seed::SeedSource;
use crate::adapters::store::{CardStore, StoredState};
use crate::config::settings::GameSettings;
use crate::domain::cards::{Card, CardId, CardKind, DeckVariant};
use crate::error::CoreError;

struct PoolState {
    /// Cards eligible for the current variant: filtered seeds + matching customs.
    pool: Vec<Card>,
    /// All custom cards, both variants.
    custom: Vec<Card>,
    reviewed_good: Vec<Card>,
    reviewed_bad: Vec<Card>,
    settings: GameSettings,
}

pub struct CardPoolManager {
    inner: Mutex<PoolState>,
    store: Arc<dyn CardStore>,
    seeds: Arc<dyn SeedSource>,
}

impl CardPoolManager {
    /// Load persisted state and build the pool for the persisted variant.
    ///
    /// A failed load starts from defaults; seed cards are always re-read from
    /// the seed source, so only custom entries are trusted from the store.
    pub async fn bootstrap(store: Arc<dyn CardStore>, seeds: Arc<dyn SeedSource>) -> Self {
        let stored = match store.load().await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "failed to load card store, starting empty");
                StoredState::default()
            }
        };

        let mut settings = GameSettings::default();
        if stored.cards_per_game > 0 {
            if let Err(err) = settings.set_cards_per_game(stored.cards_per_game) {
                warn!(error = %err, "ignoring persisted cards_per_game");
            }
        }
        settings.set_use_family_cards(stored.use_family_cards);

        let custom: Vec<Card> = stored
            .cards
            .into_iter()
            .filter(|c| c.kind.is_custom())
            .collect();

        let mut state = PoolState {
            pool: Vec::new(),
            custom,
            reviewed_good: stored.reviewed_good,
            reviewed_bad: stored.reviewed_bad,
            settings,
        };
        Self::rebuild_pool(&mut state, seeds.as_ref());
        info!(
            pool = state.pool.len(),
            custom = state.custom.len(),
            variant = ?state.settings.variant(),
            "card pool loaded"
        );

        Self {
            inner: Mutex::new(state),
            store,
            seeds,
        }
    }

    /// Rebuild the pool from the seed source for the current variant,
    /// dropping anything whose text is in the exclusion set.
    fn rebuild_pool(state: &mut PoolState, seeds: &dyn SeedSource) {
        let variant = state.settings.variant();
        let excluded: HashSet<&str> = state
            .reviewed_good
            .iter()
            .chain(state.reviewed_bad.iter())
            .map(|c| c.text.as_str())
            .collect();

        let mut pool: Vec<Card> = seeds
            .phrases(variant)
            .into_iter()
            .filter(|text| !excluded.contains(text.as_str()))
            .map(|text| Card::seed(text))
            .collect();
        pool.extend(
            state
                .custom
                .iter()
                .filter(|c| c.variant() == Some(variant))
                .filter(|c| !excluded.contains(c.text.as_str()))
                .cloned(),
        );
        debug!(variant = ?variant, pool = pool.len(), excluded = excluded.len(), "pool rebuilt");
        state.pool = pool;
    }

    /// All cards eligible for a new session under the current variant.
    pub fn eligible_cards(&self) -> Vec<Card> {
        self.inner.lock().pool.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().pool.is_empty()
    }

    pub fn cards_per_game(&self) -> usize {
        self.inner.lock().settings.cards_per_game()
    }

    pub fn settings(&self) -> GameSettings {
        self.inner.lock().settings
    }

    /// Manually entered cards, both variants.
    pub fn custom_cards(&self) -> Vec<Card> {
        self.inner.lock().custom.clone()
    }

    pub fn reviewed_good(&self) -> Vec<Card> {
        self.inner.lock().reviewed_good.clone()
    }

    pub fn reviewed_bad(&self) -> Vec<Card> {
        self.inner.lock().reviewed_bad.clone()
    }

    pub fn set_cards_per_game(&self, n: usize) -> Result<(), CoreError> {
        {
            let mut state = self.inner.lock();
            state.settings.set_cards_per_game(n)?;
        }
        self.persist();
        Ok(())
    }

    /// Toggle the family deck. Switching variant always reloads the pool.
    pub fn set_use_family_cards(&self, on: bool) {
        {
            let mut state = self.inner.lock();
            if state.settings.use_family_cards() == on {
                return;
            }
            state.settings.set_use_family_cards(on);
            Self::rebuild_pool(&mut state, self.seeds.as_ref());
        }
        self.persist();
    }

    /// Add a manually entered card for the given variant.
    pub fn add_custom_card(&self, text: impl Into<String>, variant: DeckVariant) -> Card {
        let card = Card::custom(text, variant);
        {
            let mut state = self.inner.lock();
            state.custom.push(card.clone());
            if state.settings.variant() == variant {
                state.pool.push(card.clone());
            }
        }
        info!(card = %card.id, "custom card added");
        self.persist();
        card
    }

    /// Move a custom card between the base and family decks.
    /// Returns false (and does nothing) for unknown or non-custom ids.
    pub fn update_custom_card_family(&self, id: CardId, family: bool) -> bool {
        {
            let mut guard = self.inner.lock();
            let state = &mut *guard;
            let kind = if family {
                CardKind::CustomFamily
            } else {
                CardKind::CustomBase
            };
            let Some(card) = state.custom.iter_mut().find(|c| c.id == id) else {
                return false;
            };
            card.kind = kind;
            let eligible = card.variant() == Some(state.settings.variant());
            let card = card.clone();
            state.pool.retain(|c| c.id != id);
            if eligible {
                state.pool.push(card);
            }
        }
        self.persist();
        true
    }

    /// Remove a custom card entirely.
    pub fn remove_custom_card(&self, id: CardId) -> bool {
        let removed = {
            let mut state = self.inner.lock();
            let before = state.custom.len();
            state.custom.retain(|c| c.id != id);
            state.pool.retain(|c| c.id != id);
            state.custom.len() != before
        };
        if removed {
            self.persist();
        }
        removed
    }

    /// Fold a finished review into the pool: both buckets are retired from
    /// future sessions; only the good/bad classification differs for display.
    pub fn record_review(&self, kept: &[Card], discarded: &[Card]) {
        {
            let mut state = self.inner.lock();
            let retired: HashSet<CardId> = kept
                .iter()
                .chain(discarded.iter())
                .map(|c| c.id)
                .collect();
            state.reviewed_good.extend_from_slice(kept);
            state.reviewed_bad.extend_from_slice(discarded);
            state.pool.retain(|c| !retired.contains(&c.id));
            state.custom.retain(|c| !retired.contains(&c.id));
        }
        info!(kept = kept.len(), discarded = discarded.len(), "review recorded");
        self.persist();
    }

    /// Clear both reviewed lists and reload the pool for the current variant.
    pub fn reset_reviews(&self) {
        {
            let mut state = self.inner.lock();
            state.reviewed_good.clear();
            state.reviewed_bad.clear();
            Self::rebuild_pool(&mut state, self.seeds.as_ref());
        }
        info!("reviews reset");
        self.persist();
    }

    /// Best-effort save of the current state on a background task.
    fn persist(&self) {
        let snapshot = {
            let state = self.inner.lock();
            let mut cards = state.custom.clone();
            cards.extend(
                state
                    .pool
                    .iter()
                    .filter(|c| c.kind == CardKind::Seed)
                    .cloned(),
            );
            StoredState {
                cards,
                reviewed_good: state.reviewed_good.clone(),
                reviewed_bad: state.reviewed_bad.clone(),
                cards_per_game: state.settings.cards_per_game(),
                use_family_cards: state.settings.use_family_cards(),
            }
        };
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(err) = store.save(&snapshot).await {
                warn!(error = %err, "card store save failed, keeping in-memory state");
            }
        });
    }
}
