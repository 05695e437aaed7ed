//! Turn controller: the per-turn protocol on top of the rules engine.
//!
//! ```text
//! Idle --initialize--> AwaitingRoll --begin_roll--> Rolling --complete_roll--+
//!                          ^                                                 |
//!                          |   six, no legal moves                           |
//!                          +-------------------------------------------------+
//!                          |                                                 |
//!                          |   six, moved         legal moves                v
//!                          +------------------- AwaitingMove <---------------+
//!                          |                        | not a six              | no legal moves
//!                          |   advance_turn         v                        v
//!                          +------------------ AdvancePending <--------------+
//!
//! GameOver is entered from select_move as soon as a color has all pieces home.
//! ```
//!
//! Rejected calls (rolling twice, selecting an illegal piece, undoing with an
//! empty history) leave the state untouched and report `false` / `None`.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::advisor::{AdviceRequest, MoveAdvisor, PieceView};
use crate::error::ConfigError;
use crate::rules::{Board, GameStats, MoveResult};
use crate::{Piece, PieceId, Player, PlayerColor, PlayerKind, Tier};

/// Maximum number of undo snapshots kept.
pub const UNDO_CAPACITY: usize = 5;

/// Players allowed in one match.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Where the turn protocol currently stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnPhase {
    /// No match in progress.
    Idle,
    AwaitingRoll,
    /// Dice are in the air; `complete_roll` resolves them.
    Rolling,
    AwaitingMove,
    /// The turn is over and the next player is up once `advance_turn` runs.
    AdvancePending,
    GameOver,
}

/// What a driver should do next on the controller's behalf.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AutoAction {
    /// Policy-driven player needs to roll.
    Roll,
    /// Policy-driven player needs to pick a piece.
    ChooseMove,
    /// Turn is finished; advance to the next player.
    Advance,
}

/// Pre-move state saved for undo.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnSnapshot {
    pub pieces: Vec<Piece>,
    pub current_player_index: usize,
    pub stats: GameStats,
}

/// A validated roster for a new match.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MatchConfig {
    players: Vec<Player>,
}

impl MatchConfig {
    /// Seat `humans` human players followed by `policies` policy players of
    /// the given tier, on the first colors in turn order.
    pub fn generated(humans: usize, policies: usize, tier: Tier) -> Result<MatchConfig, ConfigError> {
        let total = humans + policies;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&total) {
            return Err(ConfigError::PlayerCount(total));
        }

        let players = PlayerColor::ALL
            .into_iter()
            .take(total)
            .enumerate()
            .map(|(i, color)| {
                let (name, kind) = if i < humans {
                    (format!("Player {}", i + 1), PlayerKind::Human)
                } else {
                    (format!("AI {}", i - humans + 1), PlayerKind::Policy(tier))
                };
                Player { id: i as u8, color, name, kind }
            })
            .collect();

        Ok(MatchConfig { players })
    }

    /// Use a predefined roster, seated in the given order.
    pub fn roster(players: Vec<Player>) -> Result<MatchConfig, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(ConfigError::PlayerCount(players.len()));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.color == player.color) {
                return Err(ConfigError::DuplicateColor(player.color));
            }
        }
        Ok(MatchConfig { players })
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }
}

/// Result of a resolved roll.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub color: PlayerColor,
    pub value: u8,
    pub legal_moves: Vec<PieceId>,
    /// Phase the controller moved to after the roll.
    pub next: TurnPhase,
}

impl RollOutcome {
    /// Sixes are flavor events for the presentation layer.
    #[inline]
    pub fn rolled_six(&self) -> bool {
        self.value == 6
    }
}

/// Everything the presentation layer needs to draw the match.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub phase: TurnPhase,
    pub players: Vec<Player>,
    pub pieces: Vec<Piece>,
    pub current_player_index: usize,
    pub current_player: Option<Player>,
    pub dice_value: Option<u8>,
    pub is_rolling: bool,
    pub legal_moves: Vec<PieceId>,
    pub winner: Option<PlayerColor>,
    pub stats: GameStats,
    pub can_undo: bool,
    pub generation: u64,
}

/// Orchestrates roll, move selection, extra turns, undo and turn order.
#[derive(Clone, Debug)]
pub struct TurnController {
    players: Vec<Player>,
    board: Board,
    current: usize,
    phase: TurnPhase,
    dice: Option<u8>,
    legal: Vec<PieceId>,
    history: VecDeque<TurnSnapshot>,
    generation: u64,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnController {
    /// An idle controller with no match.
    pub fn new() -> TurnController {
        TurnController {
            players: Vec::new(),
            board: Board::new(&[]),
            current: 0,
            phase: TurnPhase::Idle,
            dice: None,
            legal: Vec::new(),
            history: VecDeque::with_capacity(UNDO_CAPACITY),
            generation: 0,
        }
    }

    /// A controller with a match already set up.
    pub fn with_match(config: MatchConfig) -> TurnController {
        let mut controller = TurnController::new();
        controller.initialize(config);
        controller
    }

    /// Start a new match, discarding any previous one.
    pub fn initialize(&mut self, config: MatchConfig) {
        let colors: Vec<PlayerColor> = config.players.iter().map(|p| p.color).collect();
        self.board = Board::new(&colors);
        self.players = config.players;
        self.current = 0;
        self.phase = TurnPhase::AwaitingRoll;
        self.dice = None;
        self.legal.clear();
        self.history.clear();
        self.generation += 1;
    }

    /// Drop the match and return to idle.
    pub fn reset(&mut self) {
        self.players.clear();
        self.board = Board::new(&[]);
        self.current = 0;
        self.phase = TurnPhase::Idle;
        self.dice = None;
        self.legal.clear();
        self.history.clear();
        self.generation += 1;
    }

    // ========== Accessors ==========

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    #[inline]
    pub fn stats(&self) -> &GameStats {
        self.board.stats()
    }

    #[inline]
    pub fn dice(&self) -> Option<u8> {
        self.dice
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.phase == TurnPhase::Rolling
    }

    /// The legal-move set exposed for selection (empty unless awaiting a move).
    #[inline]
    pub fn legal_moves(&self) -> &[PieceId] {
        &self.legal
    }

    #[inline]
    pub fn winner(&self) -> Option<PlayerColor> {
        self.board.winner()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty() && !matches!(self.phase, TurnPhase::Idle | TurnPhase::GameOver)
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Counter bumped on every accepted mutation.
    ///
    /// Work started against one generation must be dropped if the counter
    /// has moved on by the time it completes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ========== Roll ==========

    /// Put the dice in the air. Rejected unless the current player is due to roll.
    pub fn begin_roll(&mut self) -> bool {
        if self.phase != TurnPhase::AwaitingRoll || self.current_player().is_none() {
            return false;
        }
        self.phase = TurnPhase::Rolling;
        self.dice = None;
        self.legal.clear();
        self.generation += 1;
        true
    }

    /// Resolve a roll started with `begin_roll`.
    pub fn complete_roll(&mut self, value: u8) -> Option<RollOutcome> {
        if self.phase != TurnPhase::Rolling || !(1..=6).contains(&value) {
            return None;
        }
        let color = self.current_player()?.color;

        self.board.record_roll(color, value);
        let legal = self.board.legal_moves(color, value);

        self.phase = if !legal.is_empty() {
            self.dice = Some(value);
            TurnPhase::AwaitingMove
        } else if value == 6 {
            // A six always earns another roll, even when nothing can move.
            self.dice = None;
            TurnPhase::AwaitingRoll
        } else {
            self.dice = Some(value);
            TurnPhase::AdvancePending
        };
        self.legal = legal.clone();
        self.generation += 1;

        Some(RollOutcome {
            color,
            value,
            legal_moves: legal,
            next: self.phase,
        })
    }

    /// Roll a uniformly random value in 1..=6 in one step.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RollOutcome> {
        if !self.begin_roll() {
            return None;
        }
        let value = rng.random_range(1..=6);
        self.complete_roll(value)
    }

    // ========== Move ==========

    /// Move one of the exposed legal pieces.
    pub fn select_move(&mut self, id: PieceId) -> Option<MoveResult> {
        if self.phase != TurnPhase::AwaitingMove || !self.legal.contains(&id) {
            return None;
        }
        let dice = self.dice?;

        let snapshot = TurnSnapshot {
            pieces: self.board.pieces().to_vec(),
            current_player_index: self.current,
            stats: self.board.stats().clone(),
        };

        let result = match self.board.apply_move(id, dice) {
            Ok(result) => result,
            Err(err) => unreachable!("exposed legal move {id} rejected by rules engine: {err}"),
        };

        if self.history.len() == UNDO_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);

        self.legal.clear();
        self.phase = if result.winner.is_some() {
            TurnPhase::GameOver
        } else if dice == 6 {
            self.dice = None;
            TurnPhase::AwaitingRoll
        } else {
            TurnPhase::AdvancePending
        };
        self.generation += 1;

        Some(result)
    }

    /// Hand the turn to the next player in seating order.
    pub fn advance_turn(&mut self) -> bool {
        if self.phase != TurnPhase::AdvancePending || self.players.is_empty() {
            return false;
        }
        self.dice = None;
        self.legal.clear();
        self.current = (self.current + 1) % self.players.len();
        self.phase = TurnPhase::AwaitingRoll;
        self.generation += 1;
        true
    }

    /// Roll back to the state before the most recent move.
    ///
    /// Restores pieces, stats and current player exactly; any pending dice
    /// or legal moves are dropped, including a roll still in the air.
    pub fn undo(&mut self) -> bool {
        if matches!(self.phase, TurnPhase::Idle | TurnPhase::GameOver) {
            return false;
        }
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };

        self.board.restore(snapshot.pieces, snapshot.stats);
        self.current = snapshot.current_player_index;
        self.dice = None;
        self.legal.clear();
        self.phase = TurnPhase::AwaitingRoll;
        self.generation += 1;
        true
    }

    // ========== Drivers ==========

    /// What the machine is waiting on that a driver, not a human, must do.
    pub fn next_action(&self) -> Option<AutoAction> {
        let policy = self.current_player().is_some_and(|p| !p.is_human());
        match self.phase {
            TurnPhase::AdvancePending => Some(AutoAction::Advance),
            TurnPhase::AwaitingRoll if policy => Some(AutoAction::Roll),
            TurnPhase::AwaitingMove if policy => Some(AutoAction::ChooseMove),
            _ => None,
        }
    }

    /// The advisor request for the pending move selection.
    pub fn advice_request(&self) -> Option<AdviceRequest> {
        if self.phase != TurnPhase::AwaitingMove {
            return None;
        }
        Some(AdviceRequest {
            pieces: self.board.pieces().iter().map(PieceView::from).collect(),
            legal_move_ids: self.legal.clone(),
            dice_value: self.dice?,
            color: self.current_player()?.color,
        })
    }

    /// Perform the next driver action immediately, choosing moves with `advisor`.
    ///
    /// Returns the action taken, or `None` if the controller is waiting on a
    /// human or the match is over.
    pub fn auto_step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        advisor: &dyn MoveAdvisor,
    ) -> Option<AutoAction> {
        let action = self.next_action()?;
        match action {
            AutoAction::Roll => {
                self.roll(rng);
            }
            AutoAction::ChooseMove => {
                let request = self.advice_request()?;
                let choice = advisor
                    .choose(&request)
                    .filter(|id| request.legal_move_ids.contains(id))
                    .or_else(|| request.legal_move_ids.first().copied())?;
                self.select_move(choice);
            }
            AutoAction::Advance => {
                self.advance_turn();
            }
        }
        Some(action)
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> GameView {
        GameView {
            phase: self.phase,
            players: self.players.clone(),
            pieces: self.board.pieces().to_vec(),
            current_player_index: self.current,
            current_player: self.current_player().cloned(),
            dice_value: self.dice,
            is_rolling: self.is_rolling(),
            legal_moves: self.legal.clone(),
            winner: self.winner(),
            stats: self.board.stats().clone(),
            can_undo: self.can_undo(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, PIECES_PER_COLOR};

    fn humans(n: usize) -> TurnController {
        TurnController::with_match(MatchConfig::generated(n, 0, Tier::FirstAvailable).unwrap())
    }

    fn red(slot: u8) -> PieceId {
        PieceId::new(PlayerColor::Red, slot)
    }

    fn green(slot: u8) -> PieceId {
        PieceId::new(PlayerColor::Green, slot)
    }

    fn roll(c: &mut TurnController, value: u8) -> RollOutcome {
        assert!(c.begin_roll(), "roll rejected in {:?}", c.phase());
        c.complete_roll(value).unwrap()
    }

    #[test]
    fn test_generated_roster() {
        let config = MatchConfig::generated(1, 2, Tier::ProgressGreedy).unwrap();
        let players = config.players();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].name, "Player 1");
        assert!(players[0].is_human());
        assert_eq!(players[1].name, "AI 1");
        assert_eq!(players[2].color, PlayerColor::Blue);
        assert_eq!(players[2].tier(), Some(Tier::ProgressGreedy));
    }

    #[test]
    fn test_config_rejects_bad_counts() {
        assert_eq!(
            MatchConfig::generated(1, 0, Tier::FirstAvailable),
            Err(ConfigError::PlayerCount(1))
        );
        assert_eq!(
            MatchConfig::generated(3, 2, Tier::FirstAvailable),
            Err(ConfigError::PlayerCount(5))
        );
    }

    #[test]
    fn test_roster_rejects_duplicate_colors() {
        let mut players = MatchConfig::generated(2, 0, Tier::FirstAvailable)
            .unwrap()
            .players()
            .to_vec();
        players[1].color = PlayerColor::Red;
        assert_eq!(
            MatchConfig::roster(players),
            Err(ConfigError::DuplicateColor(PlayerColor::Red))
        );
    }

    #[test]
    fn test_idle_rejects_everything() {
        let mut c = TurnController::new();
        assert_eq!(c.phase(), TurnPhase::Idle);
        assert!(!c.begin_roll());
        assert!(c.select_move(red(0)).is_none());
        assert!(!c.undo());
        assert!(!c.advance_turn());
        assert_eq!(c.next_action(), None);
    }

    #[test]
    fn test_entry_on_six_grants_extra_roll() {
        let mut c = humans(2);
        let outcome = roll(&mut c, 6);
        assert_eq!(outcome.legal_moves.len(), 4);
        assert!(outcome.rolled_six());
        assert_eq!(c.phase(), TurnPhase::AwaitingMove);

        let result = c.select_move(red(0)).unwrap();
        assert_eq!(result.to, Position(0));
        assert_eq!(c.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(c.current_player().unwrap().color, PlayerColor::Red);
        assert_eq!(c.dice(), None);
    }

    #[test]
    fn test_no_legal_moves_schedules_advance() {
        let mut c = humans(2);
        let outcome = roll(&mut c, 3);
        assert!(outcome.legal_moves.is_empty());
        assert_eq!(c.phase(), TurnPhase::AdvancePending);
        assert_eq!(c.next_action(), Some(AutoAction::Advance));
        assert!(!c.begin_roll());

        assert!(c.advance_turn());
        assert_eq!(c.current_player().unwrap().color, PlayerColor::Green);
        assert_eq!(c.dice(), None);
    }

    #[test]
    fn test_six_without_moves_keeps_turn() {
        let mut c = humans(2);
        for slot in 0..PIECES_PER_COLOR {
            c.board.place_piece(red(slot), Position(55)).unwrap();
        }
        let outcome = roll(&mut c, 6);
        assert!(outcome.legal_moves.is_empty());
        assert_eq!(outcome.next, TurnPhase::AwaitingRoll);
        assert_eq!(c.current_player_index(), 0);
        assert!(c.begin_roll());
    }

    #[test]
    fn test_roll_rejected_while_rolling_or_selecting() {
        let mut c = humans(2);
        assert!(c.begin_roll());
        assert!(!c.begin_roll());
        c.complete_roll(6).unwrap();
        assert!(!c.begin_roll());
        assert!(c.complete_roll(4).is_none());
    }

    #[test]
    fn test_complete_roll_rejects_out_of_range() {
        let mut c = humans(2);
        c.begin_roll();
        assert!(c.complete_roll(0).is_none());
        assert!(c.complete_roll(7).is_none());
        assert!(c.is_rolling());
        assert!(c.complete_roll(2).is_some());
    }

    #[test]
    fn test_select_rejects_pieces_outside_legal_set() {
        let mut c = humans(2);
        roll(&mut c, 6);
        let before = c.view();
        assert!(c.select_move(green(0)).is_none());
        assert_eq!(c.view(), before);
    }

    #[test]
    fn test_non_six_move_passes_turn() {
        let mut c = humans(2);
        c.board.place_piece(red(0), Position(3)).unwrap();
        roll(&mut c, 2);
        c.select_move(red(0)).unwrap();
        assert_eq!(c.phase(), TurnPhase::AdvancePending);
        assert!(c.advance_turn());
        assert_eq!(c.current_player_index(), 1);
        roll(&mut c, 1);
        c.advance_turn();
        assert_eq!(c.current_player_index(), 0);
    }

    #[test]
    fn test_roll_stats() {
        let mut c = humans(2);
        roll(&mut c, 6);
        c.select_move(red(0));
        roll(&mut c, 4);
        let stats = c.stats().get(PlayerColor::Red);
        assert_eq!(stats.rolls, 2);
        assert_eq!(stats.sixes, 1);
    }

    #[test]
    fn test_undo_restores_exactly() {
        let mut c = humans(2);
        c.board.place_piece(green(0), Position(5)).unwrap();
        c.board.place_piece(red(0), Position(3)).unwrap();
        roll(&mut c, 2);
        let before_pieces = c.pieces().to_vec();
        let before_stats = c.stats().clone();

        let result = c.select_move(red(0)).unwrap();
        assert!(result.is_capture());
        c.advance_turn();

        assert!(c.undo());
        assert_eq!(c.pieces(), before_pieces.as_slice());
        assert_eq!(c.stats(), &before_stats);
        assert_eq!(c.current_player_index(), 0);
        assert_eq!(c.phase(), TurnPhase::AwaitingRoll);
        assert!(c.legal_moves().is_empty());
        assert_eq!(c.dice(), None);
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut c = humans(2);
        let before = c.view();
        assert!(!c.undo());
        assert_eq!(c.view(), before);
    }

    #[test]
    fn test_undo_cancels_roll_in_flight() {
        let mut c = humans(2);
        roll(&mut c, 6);
        c.select_move(red(0));
        assert!(c.begin_roll());
        assert!(c.undo());
        assert!(c.complete_roll(3).is_none());
        assert!(c.pieces().iter().all(|p| p.position.is_base()));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut c = humans(2);
        for slot in 0..PIECES_PER_COLOR {
            roll(&mut c, 6);
            c.select_move(red(slot)).unwrap();
        }
        for _ in 0..3 {
            roll(&mut c, 6);
            c.select_move(red(0)).unwrap();
        }
        assert_eq!(c.history_len(), UNDO_CAPACITY);

        let mut undone = 0;
        while c.undo() {
            undone += 1;
        }
        assert_eq!(undone, UNDO_CAPACITY);
        // The two oldest snapshots were dropped: two pieces stay entered.
        let entered = c.pieces().iter().filter(|p| !p.position.is_base()).count();
        assert_eq!(entered, 2);
    }

    #[test]
    fn test_win_ends_game() {
        let mut c = humans(2);
        for slot in 0..3 {
            c.board.place_piece(red(slot), Position::FINAL).unwrap();
        }
        c.board.place_piece(red(3), Position(56)).unwrap();
        roll(&mut c, 1);
        let result = c.select_move(red(3)).unwrap();
        assert_eq!(result.winner, Some(PlayerColor::Red));
        assert_eq!(c.phase(), TurnPhase::GameOver);
        assert_eq!(c.winner(), Some(PlayerColor::Red));
        assert!(!c.begin_roll());
        assert!(!c.undo());
        assert!(!c.can_undo());
        assert_eq!(c.next_action(), None);
    }

    #[test]
    fn test_generation_moves_on_every_mutation() {
        let mut c = humans(2);
        let g0 = c.generation();
        c.begin_roll();
        let g1 = c.generation();
        c.complete_roll(6);
        let g2 = c.generation();
        assert!(g0 < g1 && g1 < g2);
        c.begin_roll();
        assert_eq!(c.generation(), g2);
    }

    #[test]
    fn test_next_action_for_policy_players() {
        let mut c = TurnController::with_match(
            MatchConfig::generated(1, 1, Tier::FirstAvailable).unwrap(),
        );
        assert_eq!(c.next_action(), None);
        roll(&mut c, 2);
        assert_eq!(c.next_action(), Some(AutoAction::Advance));
        c.advance_turn();
        assert_eq!(c.next_action(), Some(AutoAction::Roll));
        roll(&mut c, 6);
        assert_eq!(c.next_action(), Some(AutoAction::ChooseMove));
    }

    #[test]
    fn test_advice_request_shape() {
        let mut c = humans(2);
        assert!(c.advice_request().is_none());
        roll(&mut c, 6);
        let request = c.advice_request().unwrap();
        assert_eq!(request.color, PlayerColor::Red);
        assert_eq!(request.dice_value, 6);
        assert_eq!(request.legal_move_ids.len(), 4);
        assert_eq!(request.pieces.len(), 8);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut c = humans(3);
        roll(&mut c, 6);
        c.reset();
        assert_eq!(c.phase(), TurnPhase::Idle);
        assert!(c.players().is_empty());
        assert!(c.pieces().is_empty());
        assert!(c.current_player().is_none());
        assert!(!c.begin_roll());
    }

    #[test]
    fn test_view_serializes() {
        let mut c = humans(2);
        roll(&mut c, 6);
        let json = serde_json::to_value(c.view()).unwrap();
        assert_eq!(json["phase"], "awaiting-move");
        assert_eq!(json["diceValue"], 6);
        assert_eq!(json["legalMoves"][0], "RED-0");
        assert_eq!(json["stats"]["RED"]["rolls"], 1);
    }
}
