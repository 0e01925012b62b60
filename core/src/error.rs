use thiserror::Error;

use crate::{Coord, Delta, Entity, EntityId, Position};

/// Rejected attempt to put an entity on a cell.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Position {0} is outside the board")]
    OutsideBoard(Position),
    #[error("Cell at {0} cannot hold entities")]
    NotEntityCell(Position),
    #[error("Cell at {0} already holds an entity")]
    Occupied(Position),
    #[error("Stop cell at {position} does not accept {entity:?}")]
    StopCellRejects { position: Position, entity: Entity },
    #[error("Entity {0:?} does not belong to this board")]
    UnknownEntity(EntityId),
}

/// Reasons a board is refused at construction.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Expected {expected} rows, got {actual}")]
    RowCountMismatch { expected: Coord, actual: usize },
    #[error("Expected {expected} columns in row {row}, got {actual}")]
    ColumnCountMismatch {
        row: Coord,
        expected: Coord,
        actual: usize,
    },
    #[error("Missing cell at {0}")]
    MissingCell(Position),
    #[error("Expected exactly one player, found {0}")]
    PlayerCount(usize),
    #[error("Board has no gems")]
    NoGems,
    #[error("Only {reachable} of {total} gems are reachable from the player")]
    UnreachableGems { reachable: usize, total: usize },
    #[error("Invalid placement: {0}")]
    Placement(#[from] PlacementError),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates ({row}, {col})")]
    InvalidCoords { row: Delta, col: Delta },
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Row {0} is out of bounds")]
    RowOutOfBounds(Coord),
    #[error("Column {0} is out of bounds")]
    ColumnOutOfBounds(Coord),
    #[error("Move history is empty")]
    EmptyHistory,
    #[error("Move does not match the current board state")]
    UndoMismatch,
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = core::result::Result<T, GameError>;
