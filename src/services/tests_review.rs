#![cfg(test)]

//! Review workflow tests: rating, partitioning, and fold-in to the pool.

use std::sync::Arc;

use crate::adapters::memory_store::MemoryStore;
use crate::adapters::seed::SeedSource;
use crate::domain::cards::{Card, DeckVariant};
use crate::domain::shuffle::SeededShuffler;
use crate::services::pool::CardPoolManager;
use crate::services::review::{CardRating, ReviewSheet};
use crate::services::session_flow::SessionFlowService;

struct Seeds(usize);

impl SeedSource for Seeds {
    fn phrases(&self, variant: DeckVariant) -> Vec<String> {
        match variant {
            DeckVariant::Base => (0..self.0).map(|i| format!("phrase {i}")).collect(),
            DeckVariant::Family => Vec::new(),
        }
    }
}

async fn played_out(pool_size: usize) -> (CardPoolManager, SessionFlowService) {
    let pool = CardPoolManager::bootstrap(Arc::new(MemoryStore::new()), Arc::new(Seeds(pool_size)))
        .await;
    let flow = SessionFlowService::with_shuffler(SeededShuffler::new(9));
    // Play a full game so the session sits at game over with its card list.
    while !flow.session().is_over() {
        flow.start_turn(&pool);
        while flow.session().is_running() {
            flow.correct_guess();
        }
    }
    (pool, flow)
}

#[tokio::test]
async fn sheet_defaults_every_card_to_undecided() {
    let (_pool, flow) = played_out(6).await;
    let sheet = ReviewSheet::for_session(&flow);
    assert_eq!(sheet.entries().len(), 6);
    assert!(sheet
        .entries()
        .iter()
        .all(|e| e.rating == CardRating::Undecided));
}

#[tokio::test]
async fn rate_targets_one_card_and_rejects_unknown_ids() {
    let (_pool, flow) = played_out(4).await;
    let mut sheet = ReviewSheet::for_session(&flow);
    let id = sheet.entries()[2].card.id;

    assert!(sheet.rate(id, CardRating::Bad));
    assert_eq!(sheet.entries()[2].rating, CardRating::Bad);
    assert!(sheet.entries()[0].rating == CardRating::Undecided);

    assert!(!sheet.rate(Card::seed("stranger").id, CardRating::Good));
}

#[tokio::test]
async fn submit_partitions_and_retires_exactly_the_rated_cards() {
    // 5 good, 3 bad, 2 undecided out of 10 selected cards.
    let (pool, flow) = played_out(10).await;
    assert_eq!(flow.session().selected_cards().len(), 10);

    let mut sheet = ReviewSheet::for_session(&flow);
    let ids: Vec<_> = sheet.entries().iter().map(|e| e.card.id).collect();
    for id in &ids[0..5] {
        sheet.rate(*id, CardRating::Good);
    }
    for id in &ids[5..8] {
        sheet.rate(*id, CardRating::Bad);
    }
    sheet.submit(&pool, &flow);

    assert_eq!(pool.reviewed_good().len(), 5);
    assert_eq!(pool.reviewed_bad().len(), 3);
    // The exclusion set grew by exactly 8; the 2 undecided stay eligible.
    let eligible = pool.eligible_cards();
    assert_eq!(eligible.len(), 2);
    let eligible_ids: Vec<_> = eligible.iter().map(|c| c.id).collect();
    assert!(ids[8..].iter().all(|id| eligible_ids.contains(id)));

    assert!(flow.is_reviewed());
}

#[tokio::test]
async fn submitting_an_untouched_sheet_retires_nothing() {
    let (pool, flow) = played_out(5).await;
    let sheet = ReviewSheet::for_session(&flow);
    sheet.submit(&pool, &flow);

    assert_eq!(pool.eligible_cards().len(), 5);
    assert!(pool.reviewed_good().is_empty());
    assert!(pool.reviewed_bad().is_empty());
    assert!(flow.is_reviewed());
}

#[tokio::test]
async fn reviewed_flag_clears_with_the_session() {
    let (pool, flow) = played_out(3).await;
    ReviewSheet::for_session(&flow).submit(&pool, &flow);
    assert!(flow.is_reviewed());

    flow.end_game();
    assert!(!flow.is_reviewed());
}
