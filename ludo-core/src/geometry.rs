//! Static board geometry: start squares, home entrances and safe squares.

use crate::{PlayerColor, Position};

/// Cells on the shared cyclic track.
pub const TRACK_LEN: u8 = 52;

/// Cells in each color's home lane.
pub const HOME_LANE_LEN: u8 = 6;

/// Distance between consecutive start squares.
pub const START_SPACING: u8 = TRACK_LEN / 4;

/// Track cells on which no piece can be captured: the four start squares and
/// the star square eight cells past each of them.
pub const SAFE_SQUARES: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Dice value needed to leave base.
pub const ENTRY_ROLL: u8 = 6;

impl PlayerColor {
    /// Track index where this color's pieces enter.
    #[inline]
    pub fn start_index(self) -> u8 {
        self as u8 * START_SPACING
    }

    /// Last shared-track cell before this color's home lane.
    #[inline]
    pub fn home_entrance_index(self) -> u8 {
        (self.start_index() + TRACK_LEN - 1) % TRACK_LEN
    }

    /// The color whose home entrance sits on the wrap point (51 -> 0).
    #[inline]
    pub fn entrance_wraps(self) -> bool {
        self.home_entrance_index() == TRACK_LEN - 1
    }
}

/// Check if a track index is a safe square.
#[inline]
pub fn is_safe_square(track_index: u8) -> bool {
    SAFE_SQUARES.contains(&track_index)
}

/// Check if a position is on a safe track square.
#[inline]
pub fn is_safe(position: Position) -> bool {
    position.is_on_track() && is_safe_square(position.0 as u8)
}

/// Steps a piece of `color` has travelled from its start square.
///
/// Base is -1, track cells count 0..=51 from the start square, and home lane
/// cells keep their absolute value (52..=57), so the scale is monotonic along
/// the piece's path.
pub fn progress(color: PlayerColor, position: Position) -> i16 {
    if position.is_on_track() {
        let start = i16::from(color.start_index());
        (i16::from(position.0) - start).rem_euclid(i16::from(TRACK_LEN))
    } else {
        i16::from(position.0)
    }
}
