#![cfg(test)]

//! Unit tests for the session state machine: turn lifecycle, deck mutation,
//! round progression, countdown semantics, and defensive guards.

use crate::domain::rules::{Round, TURN_SECONDS};
use crate::domain::session::{Session, TickOutcome};
use crate::domain::shuffle::{IdentityShuffler, SeededShuffler};
use crate::domain::test_state_helpers::numbered_cards;

fn started(pool_size: usize, cards_per_game: usize) -> (Session, SeededShuffler) {
    let mut shuffler = SeededShuffler::new(42);
    let mut session = Session::idle();
    let pool = numbered_cards(pool_size);
    assert!(session.start_turn(&pool, cards_per_game, &mut shuffler));
    (session, shuffler)
}

#[test]
fn start_turn_draws_and_starts_round_one() {
    // Pool of 25, 20 per game: selection clamps to the configured size.
    let (session, _) = started(25, 20);
    assert_eq!(session.selected_cards().len(), 20);
    assert_eq!(session.active_deck().len(), 20);
    assert_eq!(session.round(), Round::Taboo);
    assert!(session.is_running());
    assert_eq!(session.time_remaining(), 10);
    assert_eq!(session.turn_count(), 1);
    assert_eq!(session.cursor(), 0);
}

#[test]
fn draw_clamps_to_pool_size() {
    let (session, _) = started(8, 20);
    assert_eq!(session.selected_cards().len(), 8);
}

#[test]
fn start_turn_with_empty_pool_stays_idle() {
    let mut shuffler = IdentityShuffler;
    let mut session = Session::idle();
    assert!(!session.start_turn(&[], 20, &mut shuffler));
    assert_eq!(session, Session::idle());
}

#[test]
fn start_turn_while_running_is_a_no_op() {
    let (mut session, mut shuffler) = started(10, 10);
    let before = session.clone();
    let pool = numbered_cards(10);
    assert!(!session.start_turn(&pool, 10, &mut shuffler));
    assert_eq!(session, before);
}

#[test]
fn draw_is_a_subset_of_the_pool_without_replacement() {
    let pool = numbered_cards(25);
    let mut shuffler = SeededShuffler::new(7);
    let mut session = Session::idle();
    session.start_turn(&pool, 20, &mut shuffler);

    let mut seen = std::collections::HashSet::new();
    for card in session.selected_cards() {
        assert!(pool.contains(card), "drawn card must come from the pool");
        assert!(seen.insert(card.id), "no card drawn twice");
    }
}

#[test]
fn correct_guess_removes_exactly_one_card() {
    let (mut session, mut shuffler) = started(10, 10);
    let shown = session.current_card().unwrap().id;
    assert!(session.correct_guess(&mut shuffler));
    assert_eq!(session.active_deck().len(), 9);
    assert_eq!(session.correct_this_turn(), 1);
    assert!(!session.active_deck().iter().any(|c| c.id == shown));
}

#[test]
fn skip_keeps_deck_size_and_moves_card_to_back() {
    let (mut session, _) = started(10, 10);
    let shown = session.current_card().unwrap().id;
    assert!(session.skip_card());
    assert_eq!(session.active_deck().len(), 10);
    assert_eq!(session.skipped_this_turn(), 1);
    assert_eq!(session.active_deck().last().unwrap().id, shown);
}

#[test]
fn skip_on_last_index_keeps_cursor_in_range() {
    let mut shuffler = IdentityShuffler;
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(3), 30, &mut shuffler);
    // Guess down to a cursor at the tail, then skip.
    session.correct_guess(&mut shuffler);
    session.correct_guess(&mut shuffler);
    assert_eq!(session.active_deck().len(), 1);
    assert_eq!(session.cursor(), 0);
    session.skip_card();
    assert!(session.cursor() < session.active_deck().len());
}

#[test]
fn guarded_ops_are_no_ops_when_idle() {
    let mut shuffler = IdentityShuffler;
    let mut session = Session::idle();
    assert!(!session.correct_guess(&mut shuffler));
    assert!(!session.skip_card());
    assert!(!session.end_turn(&mut shuffler));
    assert_eq!(session.tick(&mut shuffler), TickOutcome::Idle);
    assert_eq!(session, Session::idle());
}

#[test]
fn emptying_the_deck_ends_the_turn_and_advances_the_round() {
    // 3-card deck: three consecutive correct guesses cascade into round 2.
    let mut shuffler = SeededShuffler::new(5);
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(3), 20, &mut shuffler);

    session.correct_guess(&mut shuffler);
    session.correct_guess(&mut shuffler);
    assert!(session.is_running());
    session.correct_guess(&mut shuffler);

    assert!(!session.is_running(), "third guess must end the turn");
    assert_eq!(session.round(), Round::OneWord);
    assert_eq!(
        session.active_deck().len(),
        session.selected_cards().len(),
        "round 2 deck is repopulated with all selected cards"
    );
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.time_remaining(), TURN_SECONDS);
    assert!(session.round_complete());
}

#[test]
fn round_deck_is_a_permutation_of_selected_cards() {
    let mut shuffler = SeededShuffler::new(11);
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(5), 5, &mut shuffler);
    // The fifth guess cascades into round 2 and stops the turn; the refilled
    // deck means current_card() is Some again, so bound the loop on the turn.
    while session.is_running() {
        session.correct_guess(&mut shuffler);
    }
    assert_eq!(session.round(), Round::OneWord);
    assert_eq!(session.correct_this_turn(), 5);

    let mut selected: Vec<_> = session.selected_cards().iter().map(|c| c.id).collect();
    let mut deck: Vec<_> = session.active_deck().iter().map(|c| c.id).collect();
    selected.sort();
    deck.sort();
    assert_eq!(selected, deck);
}

#[test]
fn rounds_never_skip_and_terminate_at_game_over() {
    let mut shuffler = SeededShuffler::new(3);
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(2), 5, &mut shuffler);

    let mut tiers = vec![session.round().tier()];
    while !session.is_over() {
        if !session.is_running() {
            assert!(session.start_turn(&[], 5, &mut shuffler));
        }
        session.correct_guess(&mut shuffler);
        let tier = session.round().tier();
        if *tiers.last().unwrap() != tier {
            tiers.push(tier);
        }
    }
    assert_eq!(tiers, vec![1, 2, 3, 4]);
    assert!(session.active_deck().is_empty(), "terminal deck stays empty");
    assert!(session.selected_cards().len() == 2, "selection survives game over");
}

#[test]
fn end_turn_is_idempotent() {
    let (mut session, mut shuffler) = started(10, 10);
    assert!(session.end_turn(&mut shuffler));
    let after_first = session.clone();
    assert!(!session.end_turn(&mut shuffler));
    assert_eq!(session, after_first);
}

#[test]
fn tick_counts_down_then_expires_the_turn() {
    let (mut session, mut shuffler) = started(10, 10);
    for expected in (0..TURN_SECONDS).rev() {
        assert_eq!(session.tick(&mut shuffler), TickOutcome::Running(expected));
    }
    assert_eq!(session.time_remaining(), 0);
    assert!(session.is_running());

    // The tick that would go below zero ends the turn instead.
    assert_eq!(session.tick(&mut shuffler), TickOutcome::Expired);
    assert!(!session.is_running());
    assert_eq!(session.tick(&mut shuffler), TickOutcome::Idle);
}

#[test]
fn expiry_with_empty_deck_still_advances() {
    // Timer expiring exactly as the deck empties must not strand the round.
    let mut shuffler = IdentityShuffler;
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(1), 5, &mut shuffler);
    for _ in 0..TURN_SECONDS {
        session.tick(&mut shuffler);
    }
    session.correct_guess(&mut shuffler);
    assert_eq!(session.round(), Round::OneWord);
    assert!(!session.is_running());
}

#[test]
fn end_game_resets_to_canonical_idle_from_any_state() {
    // Mid-turn.
    let (mut session, mut shuffler) = started(10, 10);
    session.correct_guess(&mut shuffler);
    session.skip_card();
    session.reset();
    assert_eq!(session, Session::idle());

    // Game over.
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(1), 5, &mut shuffler);
    session.correct_guess(&mut shuffler); // r2
    session.start_turn(&[], 5, &mut shuffler);
    session.correct_guess(&mut shuffler); // r3
    session.start_turn(&[], 5, &mut shuffler);
    session.correct_guess(&mut shuffler); // game over
    assert!(session.is_over());
    session.reset();
    assert_eq!(session, Session::idle());
}

#[test]
fn start_turn_after_game_over_begins_a_fresh_session() {
    let mut shuffler = SeededShuffler::new(17);
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(1), 5, &mut shuffler);
    for _ in 0..3 {
        session.correct_guess(&mut shuffler);
        if !session.is_over() {
            session.start_turn(&[], 5, &mut shuffler);
        }
    }
    assert!(session.is_over());

    let pool = numbered_cards(6);
    assert!(session.start_turn(&pool, 5, &mut shuffler));
    assert_eq!(session.round(), Round::Taboo);
    assert_eq!(session.turn_count(), 1);
    assert_eq!(session.selected_cards().len(), 5);
}

#[test]
fn per_turn_counters_reset_on_turn_start() {
    let (mut session, mut shuffler) = started(10, 10);
    session.correct_guess(&mut shuffler);
    session.skip_card();
    session.end_turn(&mut shuffler);
    assert!(session.start_turn(&[], 10, &mut shuffler));
    assert_eq!(session.correct_this_turn(), 0);
    assert_eq!(session.skipped_this_turn(), 0);
    assert_eq!(session.turn_count(), 2);
}

#[test]
fn turn_start_reshuffles_in_place_without_losing_cards() {
    let (mut session, mut shuffler) = started(30, 30);
    let mut before: Vec<_> = session.active_deck().iter().map(|c| c.id).collect();
    session.end_turn(&mut shuffler);
    session.start_turn(&[], 30, &mut shuffler);
    let mut after: Vec<_> = session.active_deck().iter().map(|c| c.id).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn running_turn_only_in_playable_rounds() {
    let mut shuffler = IdentityShuffler;
    let mut session = Session::idle();
    session.start_turn(&numbered_cards(4), 4, &mut shuffler);
    assert!(session.round().is_playable());
    assert!(session.is_running());
    while !session.is_over() {
        if !session.is_running() {
            session.start_turn(&[], 4, &mut shuffler);
        }
        assert!(
            !session.is_running() || session.round().is_playable(),
            "a turn may only run during rounds 1..=3"
        );
        session.correct_guess(&mut shuffler);
    }
    assert!(!session.is_running());
}
