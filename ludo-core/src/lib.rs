//! Ludo game logic: board geometry, rules engine, turn controller and move advisors.
//!
//! # Position Encoding
//!
//! ```text
//! -1       Base (not yet entered, or captured)
//! 0..=51   Shared cyclic track, absolute coordinates for every color
//! 52..=57  The piece's own home lane (57 = final cell, piece is home)
//! ```
//!
//! Home lane cells are private per color: a Red piece at 53 and a Blue piece
//! at 53 do not share a square.
//!
//! # Track Layout
//!
//! ```text
//! Color    Start  Home entrance
//! RED        0        51
//! GREEN     13        12
//! BLUE      26        25
//! YELLOW    39        38
//!
//! Safe squares: 0 8 13 21 26 34 39 47
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod advisor;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod rules;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use advisor::{AdviceRequest, FirstAvailable, Hint, MoveAdvisor, ProgressGreedy};
pub use controller::{
    AutoAction, GameView, MatchConfig, RollOutcome, TurnController, TurnPhase, TurnSnapshot,
};
pub use error::{ConfigError, ParsePieceIdError, RulesError};
pub use rules::{Board, ColorStats, GameStats, MoveResult};

/// Number of pieces each color plays with.
pub const PIECES_PER_COLOR: u8 = 4;

/// Player color, in turn order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerColor {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
}

impl PlayerColor {
    /// All colors in seating order.
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Green,
        PlayerColor::Blue,
        PlayerColor::Yellow,
    ];

    /// Index 0..=3 of this color.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert from index (0..=3) to a color.
    #[inline]
    pub fn from_index(idx: usize) -> Option<PlayerColor> {
        Self::ALL.get(idx).copied()
    }

    /// Upper-case name used in piece ids and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerColor::Red => "RED",
            PlayerColor::Green => "GREEN",
            PlayerColor::Blue => "BLUE",
            PlayerColor::Yellow => "YELLOW",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerColor {
    type Err = ParsePieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePieceIdError::Color(s.to_string()))
    }
}

/// Position of a piece. See the module documentation for the encoding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub i8);

impl Position {
    /// In base.
    pub const BASE: Position = Position(-1);
    /// First cell of the home lane.
    pub const HOME_LANE_START: Position = Position(52);
    /// Last cell of the home lane. A piece here is home.
    pub const FINAL: Position = Position(57);

    #[inline]
    pub fn is_base(self) -> bool {
        self.0 == -1
    }

    /// On the shared track (0..=51).
    #[inline]
    pub fn is_on_track(self) -> bool {
        (0..geometry::TRACK_LEN as i8).contains(&self.0)
    }

    /// In the color's private home lane (52..=57).
    #[inline]
    pub fn is_in_home_lane(self) -> bool {
        (Self::HOME_LANE_START.0..=Self::FINAL.0).contains(&self.0)
    }

    #[inline]
    pub fn is_final(self) -> bool {
        self == Self::FINAL
    }

    /// Check the position lies in exactly one of the three ranges.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.is_base() || self.is_on_track() || self.is_in_home_lane()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable piece identifier: color plus slot 0..=3, written `RED-2`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct PieceId {
    pub color: PlayerColor,
    pub slot: u8,
}

impl PieceId {
    #[inline]
    pub fn new(color: PlayerColor, slot: u8) -> PieceId {
        debug_assert!(slot < PIECES_PER_COLOR);
        PieceId { color, slot }
    }

    /// Iterate over the four ids of a color.
    pub fn all_for(color: PlayerColor) -> impl Iterator<Item = PieceId> {
        (0..PIECES_PER_COLOR).map(move |slot| PieceId { color, slot })
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.color, self.slot)
    }
}

impl FromStr for PieceId {
    type Err = ParsePieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (color, slot) = s
            .rsplit_once('-')
            .ok_or_else(|| ParsePieceIdError::Format(s.to_string()))?;
        let color: PlayerColor = color.parse()?;
        let slot: u8 = slot
            .parse()
            .map_err(|_| ParsePieceIdError::Slot(slot.to_string()))?;
        if slot >= PIECES_PER_COLOR {
            return Err(ParsePieceIdError::Slot(slot.to_string()));
        }
        Ok(PieceId { color, slot })
    }
}

impl Serialize for PieceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single game piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: PieceId,
    pub color: PlayerColor,
    pub position: Position,
    /// True iff `position` is the final home-lane cell.
    pub is_home: bool,
}

impl Piece {
    /// A fresh piece waiting in base.
    pub fn in_base(id: PieceId) -> Piece {
        Piece {
            id,
            color: id.color,
            position: Position::BASE,
            is_home: false,
        }
    }
}

/// Strength of a policy-driven player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// First legal piece.
    #[default]
    FirstAvailable,
    /// Most advanced legal piece.
    ProgressGreedy,
    /// Ask the external advisory oracle, falling back to progress-greedy.
    Oracle,
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-available" | "easy" => Ok(Tier::FirstAvailable),
            "progress-greedy" | "medium" => Ok(Tier::ProgressGreedy),
            "oracle" | "hard" => Ok(Tier::Oracle),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

/// Who drives a seat.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tier", rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Policy(Tier),
}

/// A seat in the match.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: u8,
    pub color: PlayerColor,
    pub name: String,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

impl Player {
    #[inline]
    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    /// Tier of a policy-driven player.
    #[inline]
    pub fn tier(&self) -> Option<Tier> {
        match self.kind {
            PlayerKind::Human => None,
            PlayerKind::Policy(tier) => Some(tier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_roundtrip() {
        for color in PlayerColor::ALL {
            assert_eq!(PlayerColor::from_index(color.index()), Some(color));
        }
        assert_eq!(PlayerColor::from_index(4), None);
    }

    #[test]
    fn test_position_ranges() {
        assert!(Position::BASE.is_base());
        assert!(!Position::BASE.is_on_track());
        assert!(Position(0).is_on_track());
        assert!(Position(51).is_on_track());
        assert!(!Position(52).is_on_track());
        assert!(Position(52).is_in_home_lane());
        assert!(Position(57).is_final());
        assert!(!Position(58).is_valid());
        assert!(!Position(-2).is_valid());

        for p in -1..=57 {
            let pos = Position(p);
            let ranges = [pos.is_base(), pos.is_on_track(), pos.is_in_home_lane()];
            assert_eq!(ranges.iter().filter(|&&r| r).count(), 1, "position {p}");
        }
    }

    #[test]
    fn test_piece_id_display_and_parse() {
        let id = PieceId::new(PlayerColor::Green, 3);
        assert_eq!(id.to_string(), "GREEN-3");
        assert_eq!("GREEN-3".parse::<PieceId>(), Ok(id));
        assert_eq!(" red-0 ".parse::<PieceId>(), Ok(PieceId::new(PlayerColor::Red, 0)));
    }

    #[test]
    fn test_piece_id_parse_errors() {
        assert!(matches!("RED".parse::<PieceId>(), Err(ParsePieceIdError::Format(_))));
        assert!(matches!("PINK-1".parse::<PieceId>(), Err(ParsePieceIdError::Color(_))));
        assert!(matches!("RED-4".parse::<PieceId>(), Err(ParsePieceIdError::Slot(_))));
        assert!(matches!("RED-x".parse::<PieceId>(), Err(ParsePieceIdError::Slot(_))));
    }

    #[test]
    fn test_piece_serializes_as_wire_shape() {
        let piece = Piece::in_base(PieceId::new(PlayerColor::Blue, 1));
        let json = serde_json::to_value(piece).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "BLUE-1", "color": "BLUE", "position": -1, "isHome": false})
        );
    }

    #[test]
    fn test_player_kind_serialization() {
        let player = Player {
            id: 1,
            color: PlayerColor::Green,
            name: "AI 1".into(),
            kind: PlayerKind::Policy(Tier::ProgressGreedy),
        };
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["kind"], "policy");
        assert_eq!(json["tier"], "progress-greedy");
        let back: Player = serde_json::from_value(json).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn test_tier_parse_accepts_legacy_names() {
        assert_eq!("easy".parse::<Tier>(), Ok(Tier::FirstAvailable));
        assert_eq!("MEDIUM".parse::<Tier>(), Ok(Tier::ProgressGreedy));
        assert_eq!("oracle".parse::<Tier>(), Ok(Tier::Oracle));
        assert!("impossible".parse::<Tier>().is_err());
    }
}
