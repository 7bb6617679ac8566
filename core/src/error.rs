use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    InvalidBoardSize,
    #[error("Configuration yields zero tile pairs")]
    NoTilePairs,
    #[error("Tile sheet dimensions are not available")]
    InvalidSheet,
}

pub type Result<T> = core::result::Result<T, GameError>;
