use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid direction, expected one of north, east, south or west")]
    InvalidDirection,
    #[error("Board of {width}x{height} is too small, both sides must be at least 5")]
    BoardTooSmall { width: Coord, height: Coord },
    #[error("Mine density must be a number between 0 and 1")]
    InvalidDensity,
    #[error("Too many mines, requested {requested} but only {available} cells are eligible")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
