use serde::{Deserialize, Serialize};

use crate::TileIndex;

/// Canonical player-visible state of a single board cell.
///
/// `Empty` and `Matched` are terminal for a given board instance; `FaceUp`
/// reverts to `FaceDown` when the pair it belongs to does not match.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardCell {
    Empty,
    FaceDown(TileIndex),
    FaceUp(TileIndex),
    Matched(TileIndex),
}

impl BoardCell {
    pub const fn tile_index(self) -> Option<TileIndex> {
        match self {
            Self::Empty => None,
            Self::FaceDown(tile) | Self::FaceUp(tile) | Self::Matched(tile) => Some(tile),
        }
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::FaceUp(_))
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Whether a flip attempt can turn this cell face-up.
    pub const fn is_flippable(self) -> bool {
        matches!(self, Self::FaceDown(_))
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Empty
    }
}
