use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Outcome of a flip attempt.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlipOutcome {
    /// Two cells are already face-up awaiting resolution; the attempt is
    /// rejected outright, with no re-comparison of the open pair.
    Locked,
    /// The target cell cannot be flipped (empty, matched, already face-up,
    /// or out of bounds). The generic flip cue still sounds.
    Rejected,
    /// A single cell turned face-up.
    Flipped(Coord2),
    /// The second cell turned face-up and both tiles carry the same index.
    /// The match sound plays now; the state change waits for `resolve`.
    MatchFound([Coord2; 2]),
    /// The second cell turned face-up and the tiles differ. The flip sound
    /// plays now and again when `resolve` turns the pair back over.
    Mismatch([Coord2; 2]),
}

impl FlipOutcome {
    /// Whether this outcome changed any cell.
    pub const fn has_update(self) -> bool {
        matches!(
            self,
            Self::Flipped(_) | Self::MatchFound(_) | Self::Mismatch(_)
        )
    }

    /// Whether a delayed resolution must be scheduled for this outcome.
    pub const fn needs_resolution(self) -> bool {
        matches!(self, Self::MatchFound(_) | Self::Mismatch(_))
    }
}

/// Outcome of firing the scheduled resolution.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    /// Nothing was pending, e.g. a timer that outlived its board.
    NoChange,
    /// The face-up pair matched and is locked in.
    Matched([Coord2; 2]),
    /// The pair matched and every pair slot is now matched; the board is
    /// due for a rebuild.
    BoardComplete([Coord2; 2]),
    /// The mismatched pair turned back face-down.
    Reverted([Coord2; 2]),
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
enum PendingKind {
    Match,
    Mismatch,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Pending {
    kind: PendingKind,
    cells: [Coord2; 2],
}

/// The live grid of cells and the two-flip state machine.
///
/// A board is built from a consumed deck and replaced wholesale when every
/// pair has been found; it is never resized in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    cells: Array2<BoardCell>,
    pair_count: TileCount,
    matched_count: Saturating<CellCount>,
    face_up: SmallVec<[Coord2; 2]>,
    pending: Option<Pending>,
}

impl BoardState {
    /// Deals the deck onto cells in row-major order; cells beyond the deck
    /// stay permanently empty.
    pub fn from_deck(board: Coord2, deck: Deck) -> Self {
        let pair_count = (deck.len() / 2) as TileCount;
        let mut cells: Array2<BoardCell> = Array2::default(board.to_nd_index());

        let (width, height) = board;
        let mut tiles = deck.into_tiles().into_iter();
        for y in 0..height {
            for x in 0..width {
                if let Some(tile) = tiles.next() {
                    cells[(x, y).to_nd_index()] = BoardCell::FaceDown(tile);
                }
            }
        }

        Self {
            cells,
            pair_count,
            matched_count: Saturating(0),
            face_up: SmallVec::new(),
            pending: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn pair_count(&self) -> TileCount {
        self.pair_count
    }

    /// Total cells taking part in matching, `2 * pair_count`.
    pub fn pair_slots(&self) -> CellCount {
        self.pair_count * 2
    }

    pub fn matched_count(&self) -> CellCount {
        self.matched_count.0
    }

    pub fn is_complete(&self) -> bool {
        self.matched_count == Saturating(self.pair_slots())
    }

    pub fn face_up_count(&self) -> usize {
        self.face_up.len()
    }

    pub fn has_pending_resolution(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cell_at(&self, coords: Coord2) -> BoardCell {
        self.cells[coords.to_nd_index()]
    }

    /// Linear id stamped into the rendered markup, `y * board_height + x`.
    pub fn cell_id(&self, (x, y): Coord2) -> CellId {
        CellId::from(y) * CellId::from(self.height()) + CellId::from(x)
    }

    /// Inverse of [`BoardState::cell_id`]. On boards wider than tall the
    /// stamp is not injective: columns at `x >= height` have no reachable
    /// id, and such ids resolve to `None` or a lower column.
    pub fn coords_of(&self, id: CellId) -> Option<Coord2> {
        let (width, height) = self.size();
        let stride = CellId::from(height);
        if stride == 0 {
            return None;
        }
        let (y, x) = (id / stride, id % stride);
        (x < CellId::from(width) && y < stride).then(|| (x as Coord, y as Coord))
    }

    /// Attempts to turn the cell at `coords` face-up.
    ///
    /// The two-cell limit is enforced synchronously here: from the moment a
    /// second cell goes face-up until `resolve` fires, every further
    /// attempt returns `Locked`, including attempts on a third cell.
    pub fn flip(&mut self, coords: Coord2) -> FlipOutcome {
        if self.pending.is_some() {
            return FlipOutcome::Locked;
        }

        let Some(index) = self.checked_index(coords) else {
            return FlipOutcome::Rejected;
        };
        let BoardCell::FaceDown(tile) = self.cells[index] else {
            return FlipOutcome::Rejected;
        };

        self.cells[index] = BoardCell::FaceUp(tile);
        self.face_up.push(coords);

        if self.face_up.len() < 2 {
            return FlipOutcome::Flipped(coords);
        }

        let pair = [self.face_up[0], self.face_up[1]];
        let first_tile = self.cell_at(pair[0]).tile_index();
        let kind = if first_tile == Some(tile) {
            PendingKind::Match
        } else {
            PendingKind::Mismatch
        };
        self.pending = Some(Pending { kind, cells: pair });

        match kind {
            PendingKind::Match => FlipOutcome::MatchFound(pair),
            PendingKind::Mismatch => FlipOutcome::Mismatch(pair),
        }
    }

    /// Applies the resolution scheduled when the second cell went face-up:
    /// a matched pair locks in, a mismatched pair turns back over. Safe to
    /// call at any time; with nothing pending it reports `NoChange`.
    pub fn resolve(&mut self) -> ResolveOutcome {
        let Some(Pending { kind, cells }) = self.pending.take() else {
            return ResolveOutcome::NoChange;
        };
        self.face_up.clear();

        match kind {
            PendingKind::Match => {
                for coords in cells {
                    if let BoardCell::FaceUp(tile) = self.cell_at(coords) {
                        self.cells[coords.to_nd_index()] = BoardCell::Matched(tile);
                        self.matched_count += 1;
                    }
                }
                if self.is_complete() {
                    ResolveOutcome::BoardComplete(cells)
                } else {
                    ResolveOutcome::Matched(cells)
                }
            }
            PendingKind::Mismatch => {
                for coords in cells {
                    if let BoardCell::FaceUp(tile) = self.cell_at(coords) {
                        self.cells[coords.to_nd_index()] = BoardCell::FaceDown(tile);
                    }
                }
                ResolveOutcome::Reverted(cells)
            }
        }
    }

    fn checked_index(&self, (x, y): Coord2) -> Option<[usize; 2]> {
        let (width, height) = self.size();
        (x < width && y < height).then(|| (x, y).to_nd_index())
    }
}
