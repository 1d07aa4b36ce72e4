use crate::grid::{CellState, Coordinate};
use thiserror::Error;

/// Reasons a cell placement is refused. The grid is left unchanged whenever
/// one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("{0} is outside the grid")]
    OutOfBounds(Coordinate),

    #[error("cannot set the {role} on an obstacle at {at}")]
    OnObstacle { role: CellState, at: Coordinate },

    #[error("{at} already holds the {occupant}")]
    OccupiedByEndpoint { at: Coordinate, occupant: CellState },

    #[error("{role} is already set at {at}")]
    AlreadyAssigned { role: CellState, at: Coordinate },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("layout row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("unknown glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: Coordinate },

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("expected `click <row> <col>`, got: {0}")]
    BadClick(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,

    #[error("banner width must be at least 1")]
    EmptyBanner,
}
