//! Session flow service: drives the domain session and owns the countdown.
//!
//! All caller-facing operations are synchronous; the only asynchronous piece
//! is the once-per-second countdown task. Cancellation is belt-and-braces:
//! a per-turn `CancellationToken` stops the task, and an epoch counter makes
//! any in-flight tick from a superseded turn a no-op even if it raced past
//! the cancellation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::domain::cards::Card;
use crate::domain::session::{Session, TickOutcome};
use crate::domain::shuffle::{OsShuffler, Shuffler};
use crate::domain::status;
use crate::domain::transition::{
    derive_session_transitions, SessionLifecycleView, SessionTransition,
};
use crate::services::pool::CardPoolManager;

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct FlowState {
    session: Session,
    shuffler: Box<dyn Shuffler>,
    countdown: Option<CancellationToken>,
}

struct FlowInner {
    state: Mutex<FlowState>,
    /// Bumped on every turn start, turn end, and teardown. A countdown task
    /// compares its captured epoch on each tick and bails out when stale.
    epoch: AtomicU64,
    events: broadcast::Sender<SessionTransition>,
}

#[derive(Clone)]
pub struct SessionFlowService {
    inner: Arc<FlowInner>,
}

impl SessionFlowService {
    pub fn new() -> Self {
        Self::with_shuffler(OsShuffler)
    }

    /// Build with an injected shuffle source (deterministic in tests).
    pub fn with_shuffler(shuffler: impl Shuffler + 'static) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(FlowInner {
                state: Mutex::new(FlowState {
                    session: Session::idle(),
                    shuffler: Box::new(shuffler),
                    countdown: None,
                }),
                epoch: AtomicU64::new(0),
                events,
            }),
        }
    }

    /// Subscribe to edge-triggered session transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionTransition> {
        self.inner.events.subscribe()
    }

    /// Snapshot of the current session state.
    pub fn session(&self) -> Session {
        self.inner.state.lock().session.clone()
    }

    /// The card currently shown, if any.
    pub fn current_card(&self) -> Option<Card> {
        self.inner.state.lock().session.current_card().cloned()
    }

    pub fn status_message(&self, pool: &CardPoolManager) -> String {
        status::status_message(&self.inner.state.lock().session, pool.is_empty())
    }

    pub fn title(&self) -> String {
        status::title(&self.inner.state.lock().session)
    }

    /// Start a turn (initializing a fresh session from the pool if needed)
    /// and spawn its countdown. No-op when a turn is already running or the
    /// session is not in a playable state and the pool is empty.
    pub fn start_turn(&self, pool: &CardPoolManager) {
        let pool_cards = pool.eligible_cards();
        let cards_per_game = pool.cards_per_game();

        let mut countdown_start = None;
        let (before, after);
        {
            let mut guard = self.inner.state.lock();
            before = guard.session.lifecycle_view();
            let state = &mut *guard;
            if state
                .session
                .start_turn(&pool_cards, cards_per_game, state.shuffler.as_mut())
            {
                // A new turn owns the countdown; supersede any previous one.
                if let Some(token) = state.countdown.take() {
                    token.cancel();
                }
                let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
                let token = CancellationToken::new();
                state.countdown = Some(token.clone());
                countdown_start = Some((epoch, token));
            }
            after = guard.session.lifecycle_view();
        }
        self.emit(&before, &after);
        if let Some((epoch, token)) = countdown_start {
            self.spawn_countdown(epoch, token);
        }
    }

    /// Stop the running turn. Safe to call repeatedly; the second call is a
    /// no-op.
    pub fn end_turn(&self) {
        let (before, after);
        {
            let mut guard = self.inner.state.lock();
            before = guard.session.lifecycle_view();
            let state = &mut *guard;
            if state.session.end_turn(state.shuffler.as_mut()) {
                self.inner.epoch.fetch_add(1, Ordering::SeqCst);
                if let Some(token) = state.countdown.take() {
                    token.cancel();
                }
            }
            after = guard.session.lifecycle_view();
        }
        self.emit(&before, &after);
    }

    /// Record a correct guess. Emptying the deck ends the turn (and possibly
    /// the round) synchronously before this returns.
    pub fn correct_guess(&self) {
        let (before, after);
        {
            let mut guard = self.inner.state.lock();
            before = guard.session.lifecycle_view();
            let state = &mut *guard;
            state.session.correct_guess(state.shuffler.as_mut());
            if !state.session.is_running() {
                // The guess cascaded into end_turn; retire the countdown.
                self.inner.epoch.fetch_add(1, Ordering::SeqCst);
                if let Some(token) = state.countdown.take() {
                    token.cancel();
                }
            }
            after = guard.session.lifecycle_view();
        }
        self.emit(&before, &after);
    }

    /// Skip the shown card (moves it to the back of the deck).
    pub fn skip_card(&self) {
        self.inner.state.lock().session.skip_card();
    }

    /// Forcibly terminate the session from any state, including mid-turn.
    pub fn end_game(&self) {
        let (before, after);
        {
            let mut guard = self.inner.state.lock();
            before = guard.session.lifecycle_view();
            self.inner.epoch.fetch_add(1, Ordering::SeqCst);
            if let Some(token) = guard.countdown.take() {
                token.cancel();
            }
            guard.session.reset();
            after = guard.session.lifecycle_view();
        }
        self.emit(&before, &after);
    }

    /// Flag set by the review workflow once this session's cards were rated.
    pub fn is_reviewed(&self) -> bool {
        self.inner.state.lock().session.is_reviewed()
    }

    pub(crate) fn mark_reviewed(&self) {
        self.inner.state.lock().session.mark_reviewed();
    }

    fn emit(&self, before: &SessionLifecycleView, after: &SessionLifecycleView) {
        emit_transitions(&self.inner.events, before, after);
    }

    fn spawn_countdown(&self, epoch: u64, token: CancellationToken) {
        let inner = Arc::clone(&self.inner);
        debug!(epoch, "countdown started");
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                }

                let (before, after, still_running);
                {
                    let mut guard = inner.state.lock();
                    if inner.epoch.load(Ordering::SeqCst) != epoch {
                        // Stale tick: another lifecycle change superseded this
                        // turn between the sleep and the lock.
                        trace!(epoch, "stale countdown tick ignored");
                        break;
                    }
                    before = guard.session.lifecycle_view();
                    let state = &mut *guard;
                    let outcome = state.session.tick(state.shuffler.as_mut());
                    trace!(epoch, ?outcome, "countdown tick");
                    if matches!(outcome, TickOutcome::Expired | TickOutcome::Idle) {
                        inner.epoch.fetch_add(1, Ordering::SeqCst);
                        if let Some(token) = state.countdown.take() {
                            token.cancel();
                        }
                    }
                    still_running = state.session.is_running();
                    after = guard.session.lifecycle_view();
                }
                emit_transitions(&inner.events, &before, &after);
                if !still_running {
                    break;
                }
            }
        });
    }
}

impl Default for SessionFlowService {
    fn default() -> Self {
        Self::new()
    }
}

fn emit_transitions(
    events: &broadcast::Sender<SessionTransition>,
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) {
    for transition in derive_session_transitions(before, after) {
        debug!(?transition, "session transition");
        // Nobody listening is fine.
        let _ = events.send(transition);
    }
}
