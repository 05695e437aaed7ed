//! Move advisors: pick a piece from a legal-move set.
//!
//! Local tiers answer synchronously. The advisory oracle is an external,
//! untrusted collaborator; this module owns its request shape and the
//! validation of whatever it answers. Transport lives with the caller.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::geometry::{self, SAFE_SQUARES};
use crate::{Piece, PieceId, PlayerColor, Position, Tier};

/// Hint reason when no oracle is configured.
pub const REASON_NO_ORACLE: &str = "Ludo is a game of luck and strategy!";
/// Hint reason when the oracle answered with something unusable.
pub const REASON_INVALID_ANSWER: &str = "Every move is a step towards victory.";
/// Hint reason when the oracle call failed outright.
pub const REASON_CALL_FAILED: &str = "Sometimes the simplest move is best.";

/// Piece as sent to the oracle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PieceView {
    pub id: PieceId,
    pub color: PlayerColor,
    pub position: Position,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        PieceView {
            id: piece.id,
            color: piece.color,
            position: piece.position,
        }
    }
}

/// Everything an advisor needs to choose a move.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub pieces: Vec<PieceView>,
    pub legal_move_ids: Vec<PieceId>,
    pub dice_value: u8,
    pub color: PlayerColor,
}

impl AdviceRequest {
    fn position_of(&self, id: PieceId) -> Position {
        self.pieces
            .iter()
            .find(|p| p.id == id)
            .map_or(Position::BASE, |p| p.position)
    }

    /// Check an id is one of the legal moves.
    #[inline]
    pub fn is_legal(&self, id: PieceId) -> bool {
        self.legal_move_ids.contains(&id)
    }

    /// Natural-language description of the decision for a reasoning service.
    pub fn prompt(&self) -> String {
        let mut out = String::new();
        let color = self.color;
        let _ = writeln!(out, "You are advising a Ludo player. Pick the best piece to move.");
        let _ = writeln!(out, "Player color: {color}. Dice roll: {}.", self.dice_value);
        let _ = writeln!(
            out,
            "Positions: -1 is base, 0-51 the shared track, 52-57 the player's own home lane (57 is home)."
        );
        let _ = writeln!(
            out,
            "Start square: {}. Home entrance: {}. Safe squares: {:?}.",
            color.start_index(),
            color.home_entrance_index(),
            SAFE_SQUARES
        );
        let _ = writeln!(out, "Board:");
        for piece in &self.pieces {
            let _ = writeln!(out, "  {} at {}", piece.id, piece.position);
        }
        let legal: Vec<String> = self.legal_move_ids.iter().map(|id| id.to_string()).collect();
        let _ = writeln!(out, "Movable pieces: {}.", legal.join(", "));
        let _ = writeln!(
            out,
            "Prefer finishing a piece, then capturing on a non-safe square, then leaving base on a six, \
             then advancing the piece closest to home; avoid leaving a safe square when there is a choice."
        );
        out
    }
}

/// A suggested move with a short justification for a human player.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub piece_id: PieceId,
    pub reason: String,
}

impl Hint {
    /// First legal piece with a canned reason.
    pub fn canned(request: &AdviceRequest, reason: &str) -> Option<Hint> {
        Some(Hint {
            piece_id: *request.legal_move_ids.first()?,
            reason: reason.to_string(),
        })
    }
}

/// Chooses a piece to move.
pub trait MoveAdvisor {
    /// Pick a piece from `request.legal_move_ids`, or `None` if the set is empty.
    fn choose(&self, request: &AdviceRequest) -> Option<PieceId>;
}

/// Always the first legal piece.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailable;

impl MoveAdvisor for FirstAvailable {
    fn choose(&self, request: &AdviceRequest) -> Option<PieceId> {
        request.legal_move_ids.first().copied()
    }
}

/// The legal piece furthest along its own path; ties keep legal-set order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressGreedy;

impl MoveAdvisor for ProgressGreedy {
    fn choose(&self, request: &AdviceRequest) -> Option<PieceId> {
        let mut ranked = request.legal_move_ids.clone();
        ranked.sort_by_key(|&id| {
            std::cmp::Reverse(geometry::progress(id.color, request.position_of(id)))
        });
        ranked.first().copied()
    }
}

/// Local advisor for a tier. The oracle tier maps to its offline fallback.
pub fn local_advisor(tier: Tier) -> &'static dyn MoveAdvisor {
    match tier {
        Tier::FirstAvailable => &FirstAvailable,
        Tier::ProgressGreedy | Tier::Oracle => &ProgressGreedy,
    }
}

/// Accept a plain-text oracle answer only if it names a legal piece.
pub fn accept_choice(request: &AdviceRequest, raw: &str) -> Option<PieceId> {
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`' || c == '.');
    let id: PieceId = cleaned.parse().ok()?;
    request.is_legal(id).then_some(id)
}

/// Accept a JSON hint only if it parses, names a legal piece and has a reason.
pub fn accept_hint(request: &AdviceRequest, raw: &str) -> Option<Hint> {
    let hint: Hint = serde_json::from_str(raw.trim()).ok()?;
    (request.is_legal(hint.piece_id) && !hint.reason.trim().is_empty()).then_some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(positions: &[(PieceId, i8)], legal: &[PieceId]) -> AdviceRequest {
        AdviceRequest {
            pieces: positions
                .iter()
                .map(|&(id, p)| PieceView {
                    id,
                    color: id.color,
                    position: Position(p),
                })
                .collect(),
            legal_move_ids: legal.to_vec(),
            dice_value: 3,
            color: legal.first().map_or(PlayerColor::Red, |id| id.color),
        }
    }

    fn g(slot: u8) -> PieceId {
        PieceId::new(PlayerColor::Green, slot)
    }

    #[test]
    fn test_first_available() {
        let req = request(&[(g(0), 20), (g(1), 40)], &[g(0), g(1)]);
        assert_eq!(FirstAvailable.choose(&req), Some(g(0)));
        assert_eq!(FirstAvailable.choose(&request(&[], &[])), None);
    }

    #[test]
    fn test_progress_greedy_uses_own_path() {
        // Green at 5 has gone round (44 steps); at 40 it has done 27.
        let req = request(&[(g(0), 40), (g(1), 5)], &[g(0), g(1)]);
        assert_eq!(ProgressGreedy.choose(&req), Some(g(1)));
    }

    #[test]
    fn test_progress_greedy_prefers_home_lane() {
        let req = request(&[(g(0), 12), (g(1), 53), (g(2), -1)], &[g(2), g(0), g(1)]);
        assert_eq!(ProgressGreedy.choose(&req), Some(g(1)));
    }

    #[test]
    fn test_progress_greedy_tie_keeps_order() {
        let req = request(&[(g(0), 20), (g(1), 20)], &[g(1), g(0)]);
        assert_eq!(ProgressGreedy.choose(&req), Some(g(1)));
    }

    #[test]
    fn test_accept_choice() {
        let req = request(&[(g(0), 20), (g(1), 30)], &[g(1)]);
        assert_eq!(accept_choice(&req, " GREEN-1\n"), Some(g(1)));
        assert_eq!(accept_choice(&req, "'GREEN-1'."), Some(g(1)));
        assert_eq!(accept_choice(&req, "GREEN-0"), None);
        assert_eq!(accept_choice(&req, "move green one"), None);
        assert_eq!(accept_choice(&req, ""), None);
    }

    #[test]
    fn test_accept_hint() {
        let req = request(&[(g(0), 20)], &[g(0)]);
        let hint = accept_hint(&req, r#"{"pieceId": "GREEN-0", "reason": "Closest to home!"}"#).unwrap();
        assert_eq!(hint.piece_id, g(0));
        assert_eq!(hint.reason, "Closest to home!");

        assert!(accept_hint(&req, r#"{"pieceId": "GREEN-3", "reason": "x"}"#).is_none());
        assert!(accept_hint(&req, r#"{"pieceId": "GREEN-0", "reason": " "}"#).is_none());
        assert!(accept_hint(&req, r#"{"pieceId": "GREEN-0"}"#).is_none());
        assert!(accept_hint(&req, "not json").is_none());
    }

    #[test]
    fn test_canned_hint() {
        let req = request(&[(g(0), 20)], &[g(0)]);
        let hint = Hint::canned(&req, REASON_CALL_FAILED).unwrap();
        assert_eq!(hint.piece_id, g(0));
        assert_eq!(hint.reason, REASON_CALL_FAILED);
        assert!(Hint::canned(&request(&[], &[]), REASON_CALL_FAILED).is_none());
    }

    #[test]
    fn test_request_wire_shape() {
        let req = request(&[(g(0), 20)], &[g(0)]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["legalMoveIds"][0], "GREEN-0");
        assert_eq!(json["diceValue"], 3);
        assert_eq!(json["pieces"][0]["position"], 20);
        assert_eq!(json["color"], "GREEN");
    }

    #[test]
    fn test_prompt_mentions_legal_moves() {
        let req = request(&[(g(0), 20), (g(1), 30)], &[g(1)]);
        let prompt = req.prompt();
        assert!(prompt.contains("Movable pieces: GREEN-1."));
        assert!(prompt.contains("Start square: 13"));
    }

    #[test]
    fn test_local_advisor_for_oracle_tier_is_greedy() {
        let req = request(&[(g(0), 20), (g(1), 30)], &[g(0), g(1)]);
        assert_eq!(local_advisor(Tier::Oracle).choose(&req), Some(g(1)));
        assert_eq!(local_advisor(Tier::FirstAvailable).choose(&req), Some(g(0)));
    }
}
