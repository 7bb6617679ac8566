use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Sub-rectangle of the source sheet backing a single tile, in pixels.
///
/// Coordinates are kept as floats because the sheet is divided evenly and
/// the host canvas positions fragments at fractional offsets.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Partitions a loaded sheet into `columns x rows` equal sub-rectangles in
/// row-major order (row 0 left to right, then row 1, ...), stopping after
/// `limit` tiles even when the grid has more cells.
///
/// Must be sequenced after the sheet image has finished loading; a sheet
/// with unavailable dimensions is rejected here rather than producing
/// zero-sized fragments downstream.
pub fn slice_sheet(
    sheet_width: f64,
    sheet_height: f64,
    grid: Coord2,
    limit: TileCount,
) -> Result<Vec<TileRect>> {
    let (columns, rows) = grid;
    if !(sheet_width > 0.0 && sheet_height > 0.0) {
        return Err(GameError::InvalidSheet);
    }
    if columns == 0 || rows == 0 {
        return Err(GameError::InvalidSheet);
    }

    let tile_width = sheet_width / f64::from(columns);
    let tile_height = sheet_height / f64::from(rows);

    let mut tiles = Vec::with_capacity(usize::from(limit).min(usize::from(mult(columns, rows))));
    'sheet: for y in 0..rows {
        for x in 0..columns {
            if tiles.len() >= usize::from(limit) {
                break 'sheet;
            }
            tiles.push(TileRect {
                x: f64::from(x) * tile_width,
                y: f64::from(y) * tile_height,
                width: tile_width,
                height: tile_height,
            });
        }
    }

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_are_row_major_and_bounded() {
        let tiles = slice_sheet(500.0, 500.0, (10, 10), 40).unwrap();

        assert_eq!(tiles.len(), 40);
        assert!(tiles.iter().all(|t| t.width == 50.0 && t.height == 50.0));
        // Row-major: tile 9 ends row 0, tile 10 starts row 1.
        assert_eq!((tiles[0].x, tiles[0].y), (0.0, 0.0));
        assert_eq!((tiles[9].x, tiles[9].y), (450.0, 0.0));
        assert_eq!((tiles[10].x, tiles[10].y), (0.0, 50.0));
        assert_eq!((tiles[39].x, tiles[39].y), (450.0, 150.0));
    }

    #[test]
    fn limit_beyond_grid_yields_full_grid() {
        let tiles = slice_sheet(100.0, 100.0, (2, 2), 40).unwrap();
        assert_eq!(tiles.len(), 4);
    }

    #[test]
    fn unavailable_sheet_dimensions_are_rejected() {
        assert_eq!(
            slice_sheet(0.0, 500.0, (10, 10), 40),
            Err(GameError::InvalidSheet)
        );
        assert_eq!(
            slice_sheet(500.0, -1.0, (10, 10), 40),
            Err(GameError::InvalidSheet)
        );
        assert_eq!(
            slice_sheet(500.0, 500.0, (0, 10), 40),
            Err(GameError::InvalidSheet)
        );
    }
}
