use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Signed displacement along one axis.
pub type Delta = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Location of a cell on the board, `row` grows downwards and `col` grows to the right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: Coord,
    col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Builds a position from signed components, failing when either is negative or too large.
    pub fn try_new(row: Delta, col: Delta) -> Result<Self> {
        match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(r), Ok(c)) => Ok(Self::new(r, c)),
            _ => Err(GameError::InvalidCoords { row, col }),
        }
    }

    pub const fn row(self) -> Coord {
        self.row
    }

    pub const fn col(self) -> Coord {
        self.col
    }

    pub fn offset_by(self, d_row: Delta, d_col: Delta) -> Result<Self> {
        Self::try_new(
            Delta::from(self.row).saturating_add(d_row),
            Delta::from(self.col).saturating_add(d_col),
        )
    }

    /// Applies `offset`, returning a value only when it remains inside `bounds`.
    pub fn offset_by_or_none(self, offset: PositionOffset, bounds: BoardSize) -> Option<Self> {
        let row = self.row.checked_add_signed(offset.d_row.try_into().ok()?)?;
        if row >= bounds.rows {
            return None;
        }

        let col = self.col.checked_add_signed(offset.d_col.try_into().ok()?)?;
        if col >= bounds.cols {
            return None;
        }

        Some(Self::new(row, col))
    }

    /// Single step in `direction`, `None` when that leaves the board.
    pub fn step(self, direction: Direction, bounds: BoardSize) -> Option<Self> {
        self.offset_by_or_none(direction.offset(), bounds)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionOffset {
    pub d_row: Delta,
    pub d_col: Delta,
}

impl PositionOffset {
    pub const fn new(d_row: Delta, d_col: Delta) -> Self {
        Self { d_row, d_col }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn offset(self) -> PositionOffset {
        match self {
            Self::Up => PositionOffset::new(-1, 0),
            Self::Down => PositionOffset::new(1, 0),
            Self::Left => PositionOffset::new(0, -1),
            Self::Right => PositionOffset::new(0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Declared dimensions of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub rows: Coord,
    pub cols: Coord,
}

impl BoardSize {
    pub const fn new(rows: Coord, cols: Coord) -> Self {
        Self { rows, cols }
    }

    pub const fn contains(self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub const fn total_cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Longest straight line on the board, an upper bound on the length of any slide.
    pub const fn max_extent(self) -> usize {
        if self.rows > self.cols {
            self.rows as usize
        } else {
            self.cols as usize
        }
    }

    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }
}

impl ToNdIndex for BoardSize {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.rows.into(), self.cols.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: BoardSize = BoardSize::new(3, 4);

    #[test]
    fn negative_components_are_rejected() {
        assert_eq!(
            Position::try_new(-1, 2),
            Err(GameError::InvalidCoords { row: -1, col: 2 })
        );
        assert_eq!(Position::try_new(2, 3), Ok(Position::new(2, 3)));
        assert!(Position::new(0, 1).offset_by(0, -2).is_err());
        assert_eq!(Position::new(1, 1).offset_by(1, -1), Ok(Position::new(2, 0)));
    }

    #[test]
    fn offset_or_none_stays_on_grid() {
        let corner = Position::new(0, 3);

        assert_eq!(corner.step(Direction::Up, BOUNDS), None);
        assert_eq!(corner.step(Direction::Right, BOUNDS), None);
        assert_eq!(corner.step(Direction::Down, BOUNDS), Some(Position::new(1, 3)));
        assert_eq!(corner.step(Direction::Left, BOUNDS), Some(Position::new(0, 2)));
        assert_eq!(
            Position::new(2, 0).offset_by_or_none(PositionOffset::new(1, 0), BOUNDS),
            None
        );
    }

    #[test]
    fn opposite_offsets_cancel_out() {
        for direction in Direction::ALL {
            let there = direction.offset();
            let back = direction.opposite().offset();
            assert_eq!(there.d_row + back.d_row, 0);
            assert_eq!(there.d_col + back.d_col, 0);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn positions_iterate_row_major() {
        let size = BoardSize::new(2, 2);
        let mut positions = size.positions();

        assert_eq!(positions.next(), Some(Position::new(0, 0)));
        assert_eq!(positions.next(), Some(Position::new(0, 1)));
        assert_eq!(positions.next(), Some(Position::new(1, 0)));
        assert_eq!(positions.next(), Some(Position::new(1, 1)));
        assert_eq!(positions.next(), None);
        assert_eq!(size.max_extent(), 2);
    }
}
