//! Shared match session and the paced driver for everything that is not a
//! human click: dice animation, policy players and turn hand-off.
//!
//! Every delayed task captures the controller generation when it is
//! scheduled. When it wakes it takes the session lock and does nothing if
//! the generation has moved on (undo, reset, a new match or any other
//! accepted action), so stale work can never land.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use ludo_core::{AutoAction, MoveResult, PieceId, RollOutcome, TurnController, TurnPhase};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::Pacing;
use crate::oracle::Advisor;

/// One match plus the dice and the latest flavor text.
pub struct Session {
    pub controller: TurnController,
    rng: StdRng,
    pub flavor: Option<String>,
}

impl Session {
    pub fn new(rng: StdRng) -> Self {
        Self {
            controller: TurnController::new(),
            rng,
            flavor: None,
        }
    }

    fn throw_dice(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

/// Shared application state
pub struct AppStateInner {
    session: Mutex<Session>,
    pub advisor: Advisor,
    pub pacing: Pacing,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn new(advisor: Advisor, pacing: Pacing) -> AppState {
        Self::with_rng(advisor, pacing, StdRng::from_os_rng())
    }

    pub fn with_rng(advisor: Advisor, pacing: Pacing, rng: StdRng) -> AppState {
        Arc::new(Self {
            session: Mutex::new(Session::new(rng)),
            advisor,
            pacing,
        })
    }

    /// Lock the session. A panic in another holder leaves the controller in
    /// a consistent state, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Scheduling
// =============================================================================

/// Run `action` after `delay` if the controller is still at `generation`.
fn after<F>(state: &AppState, delay: Duration, generation: u64, action: F)
where
    F: FnOnce(&AppState, &mut Session) + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut session = state.lock();
        if session.controller.generation() != generation {
            debug!(generation, "discarding stale scheduled action");
            return;
        }
        action(&state, &mut *session);
    });
}

/// Schedule whatever the controller is waiting on that no human will do.
///
/// `advance_delay` is the pause before a pending turn hand-off; it differs
/// between an empty roll and a completed move.
pub fn drive(state: &AppState, session: &Session, advance_delay: Duration) {
    let generation = session.controller.generation();
    match session.controller.next_action() {
        None => {}
        Some(AutoAction::Advance) => after(state, advance_delay, generation, |state, session| {
            if session.controller.advance_turn() {
                if let Some(player) = session.controller.current_player() {
                    debug!(color = %player.color, "turn passed");
                }
                drive(state, session, state.pacing.move_advance);
            }
        }),
        Some(AutoAction::Roll) => after(state, state.pacing.policy, generation, |state, session| {
            start_roll(state, session);
        }),
        Some(AutoAction::ChooseMove) => choose_for_policy(state, generation),
    }
}

/// Put the dice in the air and reveal them after the roll delay.
pub fn start_roll(state: &AppState, session: &mut Session) -> bool {
    if !session.controller.begin_roll() {
        return false;
    }
    let generation = session.controller.generation();
    after(state, state.pacing.roll, generation, |state, session| {
        let value = session.throw_dice();
        if let Some(outcome) = session.controller.complete_roll(value) {
            log_roll(&outcome);
            if outcome.rolled_six() {
                refresh_flavor(state);
            }
            drive(state, session, state.pacing.empty_roll_advance);
        }
    });
    true
}

/// Apply a move for whoever holds the turn and schedule what follows.
pub fn commit_move(state: &AppState, session: &mut Session, id: PieceId) -> Option<MoveResult> {
    let result = session.controller.select_move(id)?;
    info!(
        piece = %result.piece,
        dice = result.dice,
        from = %result.from,
        to = %result.to,
        "moved"
    );
    if result.is_capture() {
        let captured: Vec<String> = result.captured.iter().map(|id| id.to_string()).collect();
        info!(piece = %result.piece, captured = %captured.join(","), "capture");
        refresh_flavor(state);
    }
    if let Some(winner) = result.winner {
        info!(%winner, "game over");
        refresh_flavor(state);
    }
    drive(state, session, state.pacing.move_advance);
    Some(result)
}

/// Ask the advisor for a policy player's move without holding the lock
/// across the call.
fn choose_for_policy(state: &AppState, generation: u64) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        tokio::time::sleep(state.pacing.policy).await;
        let pending = {
            let session = state.lock();
            if session.controller.generation() != generation {
                return;
            }
            let tier = session
                .controller
                .current_player()
                .and_then(|p| p.tier())
                .unwrap_or_default();
            session.controller.advice_request().map(|req| (tier, req))
        };
        let Some((tier, request)) = pending else {
            return;
        };

        let choice = state
            .advisor
            .choose(tier, &request)
            .await
            .or_else(|| request.legal_move_ids.first().copied());

        let mut session = state.lock();
        if session.controller.generation() != generation {
            debug!(generation, "discarding stale advisor answer");
            return;
        }
        if let Some(id) = choice {
            commit_move(&state, &mut session, id);
        }
    });
}

/// Fetch fresh trivia in the background; the game never waits on it.
fn refresh_flavor(state: &AppState) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let fact = state.advisor.fun_fact().await;
        state.lock().flavor = Some(fact);
    });
}

fn log_roll(outcome: &RollOutcome) {
    match outcome.next {
        TurnPhase::AwaitingMove => info!(
            color = %outcome.color,
            value = outcome.value,
            moves = outcome.legal_moves.len(),
            "rolled"
        ),
        TurnPhase::AwaitingRoll => {
            info!(color = %outcome.color, value = outcome.value, "rolled a six with no moves, rolling again")
        }
        _ => info!(color = %outcome.color, value = outcome.value, "rolled with no moves"),
    }
}
