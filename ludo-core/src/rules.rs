//! Rules engine: legal moves, move application, captures and victory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::geometry::{self, ENTRY_ROLL, TRACK_LEN};
use crate::{Piece, PieceId, PlayerColor, Position, PIECES_PER_COLOR};

/// Per-color counters for end-of-match reporting.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ColorStats {
    pub rolls: u32,
    pub sixes: u32,
    pub captures: u32,
}

/// Counters for every active color.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameStats(BTreeMap<PlayerColor, ColorStats>);

impl GameStats {
    /// Zeroed counters for the given colors.
    pub fn new(colors: &[PlayerColor]) -> GameStats {
        GameStats(colors.iter().map(|&c| (c, ColorStats::default())).collect())
    }

    /// Counters for a color (zero if the color is not playing).
    pub fn get(&self, color: PlayerColor) -> ColorStats {
        self.0.get(&color).copied().unwrap_or_default()
    }

    /// Iterate over active colors and their counters.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerColor, ColorStats)> + '_ {
        self.0.iter().map(|(&c, &s)| (c, s))
    }

    fn entry(&mut self, color: PlayerColor) -> &mut ColorStats {
        self.0.entry(color).or_default()
    }
}

/// Outcome of applying a move.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub piece: PieceId,
    pub dice: u8,
    pub from: Position,
    pub to: Position,
    /// Opposing pieces sent back to base by this move.
    pub captured: Vec<PieceId>,
    /// The piece reached the final home-lane cell.
    pub reached_home: bool,
    /// Set when this move won the game.
    pub winner: Option<PlayerColor>,
}

impl MoveResult {
    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Compute where `piece` lands with `dice`, or `None` if it cannot move.
///
/// Shared by legal-move generation and move application so the two can
/// never disagree.
pub fn move_target(piece: &Piece, dice: u8) -> Option<Position> {
    if piece.is_home || !(1..=6).contains(&dice) {
        return None;
    }

    let pos = piece.position;
    let target = if pos.is_base() {
        if dice != ENTRY_ROLL {
            return None;
        }
        Position(piece.color.start_index() as i8)
    } else if pos.is_in_home_lane() {
        let next = pos.0 + dice as i8;
        if next > Position::FINAL.0 {
            return None;
        }
        Position(next)
    } else {
        let current = i16::from(pos.0);
        let raw = current + i16::from(dice);
        let entrance = i16::from(piece.color.home_entrance_index());
        let start = i16::from(piece.color.start_index());

        // Red's entrance sits on the wrap point and is tested without the
        // "behind own start" guard the other colors carry.
        let crosses = current <= entrance && raw > entrance;
        let entering = if piece.color.entrance_wraps() {
            crosses
        } else {
            crosses && current < start
        };

        if entering {
            let lane = i16::from(Position::HOME_LANE_START.0) + (raw - entrance - 1);
            if lane > i16::from(Position::FINAL.0) {
                return None;
            }
            Position(lane as i8)
        } else {
            Position((raw % i16::from(TRACK_LEN)) as i8)
        }
    };

    assert!(
        target.is_valid(),
        "rules engine computed out-of-range target {target} for {} from {pos} with {dice}",
        piece.id
    );
    Some(target)
}

/// Authoritative piece state for one match.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    stats: GameStats,
    winner: Option<PlayerColor>,
}

impl Board {
    /// Create a board with every piece of the given colors in base.
    pub fn new(colors: &[PlayerColor]) -> Board {
        let pieces = colors
            .iter()
            .flat_map(|&color| PieceId::all_for(color).map(Piece::in_base))
            .collect();
        Board {
            pieces,
            stats: GameStats::new(colors),
            winner: None,
        }
    }

    /// All pieces, grouped by color in seating order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// The recorded winner, if any.
    #[inline]
    pub fn winner(&self) -> Option<PlayerColor> {
        self.winner
    }

    /// Look up a piece by id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Pieces of one color.
    pub fn pieces_of(&self, color: PlayerColor) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    /// Number of pieces of `color` that reached home.
    pub fn home_count(&self, color: PlayerColor) -> usize {
        self.pieces_of(color).filter(|p| p.is_home).count()
    }

    /// Pieces of any color standing on a shared-track cell.
    pub fn occupants(&self, track_index: u8) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces
            .iter()
            .filter(move |p| p.position.is_on_track() && p.position.0 as u8 == track_index)
    }

    /// Put a piece on an arbitrary position.
    ///
    /// Does NOT validate against the rules; used to set up positions.
    /// `is_home` follows the position.
    pub fn place_piece(&mut self, id: PieceId, position: Position) -> Result<(), RulesError> {
        debug_assert!(position.is_valid());
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RulesError::UnknownPiece(id))?;
        piece.position = position;
        piece.is_home = position.is_final();
        Ok(())
    }

    // ========== Legal Moves ==========

    /// Ids of the pieces of `color` that may move with `dice`, in slot order.
    ///
    /// An empty result means the turn must pass.
    pub fn legal_moves(&self, color: PlayerColor, dice: u8) -> Vec<PieceId> {
        let mut ids: Vec<PieceId> = self
            .pieces_of(color)
            .filter(|p| move_target(p, dice).is_some())
            .map(|p| p.id)
            .collect();
        ids.dedup();
        ids
    }

    /// Check whether a single piece may move with `dice`.
    pub fn is_legal(&self, id: PieceId, dice: u8) -> bool {
        self.piece(id)
            .is_some_and(|p| move_target(p, dice).is_some())
    }

    // ========== Apply ==========

    /// Count a roll for `color`.
    pub fn record_roll(&mut self, color: PlayerColor, dice: u8) {
        let stats = self.stats.entry(color);
        stats.rolls += 1;
        if dice == 6 {
            stats.sixes += 1;
        }
    }

    /// Move a piece, resolving captures and victory.
    ///
    /// Landing on a non-safe track cell sends every opposing piece there back
    /// to base; the mover's capture counter goes up once per capturing move,
    /// however many pieces were hit.
    pub fn apply_move(&mut self, id: PieceId, dice: u8) -> Result<MoveResult, RulesError> {
        if let Some(winner) = self.winner {
            return Err(RulesError::GameOver(winner));
        }
        if !(1..=6).contains(&dice) {
            return Err(RulesError::InvalidDice(dice));
        }

        let idx = self
            .pieces
            .iter()
            .position(|p| p.id == id)
            .ok_or(RulesError::UnknownPiece(id))?;
        let piece = self.pieces[idx];
        let to = move_target(&piece, dice).ok_or(RulesError::IllegalMove { piece: id, dice })?;

        let moved = &mut self.pieces[idx];
        moved.position = to;
        moved.is_home = to.is_final();

        let mut captured = Vec::new();
        if to.is_on_track() && !geometry::is_safe(to) {
            for other in self.pieces.iter_mut() {
                if other.color != piece.color && other.position == to {
                    other.position = Position::BASE;
                    other.is_home = false;
                    captured.push(other.id);
                }
            }
        }
        if !captured.is_empty() {
            self.stats.entry(piece.color).captures += 1;
        }

        let winner = self.check_winner(piece.color);

        Ok(MoveResult {
            piece: id,
            dice,
            from: piece.position,
            to,
            captured,
            reached_home: to.is_final(),
            winner,
        })
    }

    /// Record `color` as winner if all its pieces are home and nobody has won yet.
    ///
    /// Returns the winner only on the call that records it.
    pub fn check_winner(&mut self, color: PlayerColor) -> Option<PlayerColor> {
        if self.winner.is_none() && self.home_count(color) == PIECES_PER_COLOR as usize {
            self.winner = Some(color);
            return Some(color);
        }
        None
    }

    /// Replace pieces and stats with a saved copy.
    pub fn restore(&mut self, pieces: Vec<Piece>, stats: GameStats) {
        self.pieces = pieces;
        self.stats = stats;
    }
}
