//! Error types for the rules engine and turn controller.

use thiserror::Error;

use crate::{PieceId, PlayerColor};

/// A move the rules engine refused to apply.
///
/// Callers are expected to check the legal-move set first; these errors mark
/// a precondition violation, never a reachable game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),
    #[error("piece {piece} cannot move {dice}")]
    IllegalMove { piece: PieceId, dice: u8 },
    #[error("dice value {0} is outside 1..=6")]
    InvalidDice(u8),
    #[error("game already won by {0}")]
    GameOver(PlayerColor),
}

/// An invalid match setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a match needs 2 to 4 players, got {0}")]
    PlayerCount(usize),
    #[error("color {0} is seated twice")]
    DuplicateColor(PlayerColor),
}

/// A string that is not a valid piece id such as `RED-2`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePieceIdError {
    #[error("expected COLOR-SLOT, got {0:?}")]
    Format(String),
    #[error("unknown color {0:?}")]
    Color(String),
    #[error("invalid slot {0:?}")]
    Slot(String),
}
