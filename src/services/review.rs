//! Post-game review workflow: classify the session's cards as keep/discard.
//!
//! Both buckets are retired from future pools; "undecided" cards stay
//! eligible. Submitting folds the result into the pool manager's exclusion
//! set and flags the session as reviewed.

use tracing::info;

use crate::domain::cards::{Card, CardId};
use crate::services::pool::CardPoolManager;
use crate::services::session_flow::SessionFlowService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardRating {
    Good,
    Bad,
    #[default]
    Undecided,
}

#[derive(Debug, Clone)]
pub struct ReviewEntry {
    pub card: Card,
    pub rating: CardRating,
}

/// One rating per selected card of the just-ended session.
#[derive(Debug, Clone, Default)]
pub struct ReviewSheet {
    entries: Vec<ReviewEntry>,
}

impl ReviewSheet {
    /// Sheet over the session's fixed card list, everything Undecided.
    pub fn for_session(flow: &SessionFlowService) -> Self {
        Self::new(flow.session().selected_cards().to_vec())
    }

    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            entries: cards
                .into_iter()
                .map(|card| ReviewEntry {
                    card,
                    rating: CardRating::default(),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    /// Rate a card on the sheet. Unknown ids are ignored (returns false).
    pub fn rate(&mut self, id: CardId, rating: CardRating) -> bool {
        match self.entries.iter_mut().find(|e| e.card.id == id) {
            Some(entry) => {
                entry.rating = rating;
                true
            }
            None => false,
        }
    }

    /// Partition into good/bad, retire both through the pool manager, and
    /// mark the session as reviewed. Undecided cards are left untouched.
    pub fn submit(self, pool: &CardPoolManager, flow: &SessionFlowService) {
        let mut good = Vec::new();
        let mut bad = Vec::new();
        let mut undecided = 0usize;
        for entry in self.entries {
            match entry.rating {
                CardRating::Good => good.push(entry.card),
                CardRating::Bad => bad.push(entry.card),
                CardRating::Undecided => undecided += 1,
            }
        }
        info!(
            good = good.len(),
            bad = bad.len(),
            undecided,
            "review submitted"
        );
        pool.record_review(&good, &bad);
        flow.mark_reviewed();
    }
}
