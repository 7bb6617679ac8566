#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use deck::*;
pub use error::*;
pub use setup::*;
pub use slicer::*;
pub use types::*;

mod board;
mod cell;
mod deck;
mod error;
mod setup;
mod slicer;
mod types;

/// Canonical resource names declared to the load barriers and used as keys
/// of the by-name asset maps.
pub mod asset_names {
    pub const CLOSED_TILE: &str = "closed_tile";
    pub const TILE_SHEET: &str = "tile_sheet";
    pub const FLIP_SOUND: &str = "flip";
    pub const MATCH_SOUND: &str = "match";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetPaths {
    pub gfx_base: String,
    pub sfx_base: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GfxFiles {
    pub closed_tile_image: String,
    pub tile_sheet_image: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SfxFiles {
    pub flip_sound: String,
    pub match_sound: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetFiles {
    pub gfx: GfxFiles,
    pub sfx: SfxFiles,
}

/// Immutable game configuration, fixed at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Columns and rows the tile sheet is cut into.
    pub grid_tiles: Coord2,
    /// Delay before a face-up pair resolves, in milliseconds.
    pub tile_reveal_delay_ms: u32,
    /// Board width and height in cells.
    pub board: Coord2,
    /// Upper bound on distinct tile values per board.
    pub max_unique_tiles: TileCount,
    pub asset_paths: AssetPaths,
    pub asset_files: AssetFiles,
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.board;
        if width == 0 || height == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        if self.max_unique_tiles == 0 || pair_count(self.board, self.max_unique_tiles) == 0 {
            return Err(GameError::NoTilePairs);
        }
        Ok(())
    }

    /// Declared graphics resources with resolved URLs, in a fixed order.
    pub fn gfx_manifest(&self) -> [(&'static str, String); 2] {
        [
            (
                asset_names::CLOSED_TILE,
                resolve_url(&self.asset_paths.gfx_base, &self.asset_files.gfx.closed_tile_image),
            ),
            (
                asset_names::TILE_SHEET,
                resolve_url(&self.asset_paths.gfx_base, &self.asset_files.gfx.tile_sheet_image),
            ),
        ]
    }

    /// Declared sound resources with resolved URLs, in a fixed order.
    pub fn sfx_manifest(&self) -> [(&'static str, String); 2] {
        [
            (
                asset_names::FLIP_SOUND,
                resolve_url(&self.asset_paths.sfx_base, &self.asset_files.sfx.flip_sound),
            ),
            (
                asset_names::MATCH_SOUND,
                resolve_url(&self.asset_paths.sfx_base, &self.asset_files.sfx.match_sound),
            ),
        ]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_tiles: (10, 10),
            tile_reveal_delay_ms: 750,
            board: (3, 3),
            max_unique_tiles: 40,
            asset_paths: AssetPaths {
                gfx_base: String::from("gfx/"),
                sfx_base: String::from("sfx/"),
            },
            asset_files: AssetFiles {
                gfx: GfxFiles {
                    closed_tile_image: String::from("closed.png"),
                    tile_sheet_image: String::from("pics.png"),
                },
                sfx: SfxFiles {
                    flip_sound: String::from("flip.wav"),
                    match_sound: String::from("found.wav"),
                },
            },
        }
    }
}

/// Asset URLs are plain base-path + filename concatenation.
fn resolve_url(base: &str, file: &str) -> String {
    format!("{base}{file}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn degenerate_configs_are_rejected() {
        let mut config = GameConfig::default();
        config.board = (0, 3);
        assert_eq!(config.validate(), Err(GameError::InvalidBoardSize));

        let mut config = GameConfig::default();
        config.max_unique_tiles = 0;
        assert_eq!(config.validate(), Err(GameError::NoTilePairs));

        // A one-cell board cannot hold a single pair.
        let mut config = GameConfig::default();
        config.board = (1, 1);
        assert_eq!(config.validate(), Err(GameError::NoTilePairs));
    }

    #[test]
    fn manifests_concatenate_base_and_filename() {
        let config = GameConfig::default();

        let [closed, sheet] = config.gfx_manifest();
        assert_eq!(closed, (asset_names::CLOSED_TILE, String::from("gfx/closed.png")));
        assert_eq!(sheet, (asset_names::TILE_SHEET, String::from("gfx/pics.png")));

        let [flip, found] = config.sfx_manifest();
        assert_eq!(flip.1, "sfx/flip.wav");
        assert_eq!(found.1, "sfx/found.wav");
    }

    #[test]
    fn config_survives_serde_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
