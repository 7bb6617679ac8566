/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for cell counts and matched-cell totals.
pub type CellCount = u16;

/// Count type for distinct tile values a board may hold.
pub type TileCount = u16;

/// Tile value dealt onto the board, `0..pair_count`; every value appears on
/// exactly two cells.
pub type TileIndex = u16;

/// Linear cell identifier stamped into the rendered markup.
pub type CellId = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
