#![no_std]

//! Turn-based sliding-puzzle board engine.
//!
//! A single player slides across a rectangular [`Board`] until a wall, a stop cell, the board edge or a mine ends the
//! slide, collecting gems and extra lives on the way. [`Board::try_move`] resolves one slide into a [`MoveResult`],
//! [`MoveHistoryStack`] keeps undoable results, and [`Reachability`] answers where the player can ever stop or pass.

extern crate alloc;

use alloc::vec::Vec;
use ndarray::ArrayView1;
use serde::Serialize;

pub use analysis::*;
pub use cell::*;
pub use engine::*;
pub use entity::*;
pub use error::*;
pub use grid::*;
pub use history::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod cell;
mod engine;
mod entity;
mod error;
mod grid;
mod history;
mod tile;
mod types;

/// Validated puzzle board with exactly one player and at least one gem, every gem reachable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    grid: Grid,
    player: EntityId,
}

impl Board {
    /// Builds a board from loader-supplied `tiles`, indexed `[row][col]`.
    pub fn new(
        num_rows: Coord,
        num_cols: Coord,
        tiles: Vec<Vec<Option<Tile>>>,
    ) -> core::result::Result<Self, ConfigurationError> {
        let result = Self::assemble(BoardSize::new(num_rows, num_cols), &tiles);
        match &result {
            Ok(board) => log::debug!(
                "board {}x{} ready, player at {}, {} gems",
                num_rows,
                num_cols,
                board.player_position(),
                board.num_gems()
            ),
            Err(err) => log::warn!("board rejected: {}", err),
        }
        result
    }

    fn assemble(size: BoardSize, tiles: &[Vec<Option<Tile>>]) -> core::result::Result<Self, ConfigurationError> {
        check_shape(size, tiles)?;

        let grid = Grid::from_fn(size, |pos| {
            tiles[usize::from(pos.row())][usize::from(pos.col())].unwrap_or(Tile::Wall)
        })?;

        let players: Vec<EntityId> = grid
            .entities()
            .filter(|&(_, entity, _)| entity.is_player())
            .map(|(id, _, _)| id)
            .collect();
        let &[player] = players.as_slice() else {
            return Err(ConfigurationError::PlayerCount(players.len()));
        };

        let total = grid.count_placed(Entity::Gem);
        if total == 0 {
            return Err(ConfigurationError::NoGems);
        }

        let start = grid.owner(player).expect("placed player should have an owner");
        let reachable = Reachability::analyze(&grid, start).count_reachable(&grid, Entity::Gem);
        if reachable != total {
            return Err(ConfigurationError::UnreachableGems { reachable, total });
        }

        Ok(Self { grid, player })
    }

    pub fn size(&self) -> BoardSize {
        self.grid.size()
    }

    pub fn num_rows(&self) -> Coord {
        self.size().rows
    }

    pub fn num_cols(&self) -> Coord {
        self.size().cols
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn player_position(&self) -> Position {
        self.grid
            .owner(self.player)
            .expect("player should always occupy a cell")
    }

    pub fn cell(&self, position: Position) -> Result<&Cell> {
        self.grid.cell(position).ok_or(GameError::OutOfBounds(position))
    }

    pub fn entity_at(&self, position: Position) -> Result<Option<Entity>> {
        self.cell(position)?;
        Ok(self.grid.entity_at(position))
    }

    pub fn row(&self, row: Coord) -> Result<ArrayView1<'_, Cell>> {
        if row < self.num_rows() {
            Ok(self.grid.cells().row(row.into()))
        } else {
            Err(GameError::RowOutOfBounds(row))
        }
    }

    pub fn col(&self, col: Coord) -> Result<ArrayView1<'_, Cell>> {
        if col < self.num_cols() {
            Ok(self.grid.cells().column(col.into()))
        } else {
            Err(GameError::ColumnOutOfBounds(col))
        }
    }

    /// Gems still on the board.
    pub fn num_gems(&self) -> usize {
        self.grid.count_placed(Entity::Gem)
    }

    pub fn num_extra_lives(&self) -> usize {
        self.grid.count_placed(Entity::ExtraLife)
    }

    pub fn is_cleared(&self) -> bool {
        self.num_gems() == 0
    }

    /// Reachability from where the player stands now.
    pub fn reachability(&self) -> Reachability {
        Reachability::analyze(&self.grid, self.player_position())
    }
}

fn check_shape(size: BoardSize, tiles: &[Vec<Option<Tile>>]) -> core::result::Result<(), ConfigurationError> {
    if tiles.len() != usize::from(size.rows) {
        return Err(ConfigurationError::RowCountMismatch {
            expected: size.rows,
            actual: tiles.len(),
        });
    }

    for (row, cols) in (0..size.rows).zip(tiles) {
        if cols.len() != usize::from(size.cols) {
            return Err(ConfigurationError::ColumnCountMismatch {
                row,
                expected: size.cols,
                actual: cols.len(),
            });
        }
        if let Some(col) = cols.iter().position(Option::is_none) {
            let col = Coord::try_from(col).expect("column index fits the declared width");
            return Err(ConfigurationError::MissingCell(Position::new(row, col)));
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use alloc::vec::Vec;

    use crate::*;

    /// `#` wall, `.` floor, `S` stop cell, `P` player, `G` gem, `M` mine, `L` extra life, `?` missing.
    pub(crate) fn tiles(rows: &[&str]) -> Vec<Vec<Option<Tile>>> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|symbol| match symbol {
                        '#' => Some(Tile::Wall),
                        '.' => Some(Tile::EMPTY),
                        'S' => Some(Tile::STOP),
                        'P' => Some(Tile::with(Entity::Player)),
                        'G' => Some(Tile::with(Entity::Gem)),
                        'M' => Some(Tile::with(Entity::Mine)),
                        'L' => Some(Tile::with(Entity::ExtraLife)),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    fn size_of(rows: &[&str]) -> BoardSize {
        let cols = rows.first().map_or(0, |row| row.chars().count());
        BoardSize::new(Coord::try_from(rows.len()).unwrap(), Coord::try_from(cols).unwrap())
    }

    pub(crate) fn grid(rows: &[&str]) -> Grid {
        let tiles = tiles(rows);
        Grid::from_fn(size_of(rows), |pos| {
            tiles[usize::from(pos.row())][usize::from(pos.col())].unwrap_or(Tile::Wall)
        })
        .unwrap()
    }

    pub(crate) fn try_board(rows: &[&str]) -> core::result::Result<Board, ConfigurationError> {
        let size = size_of(rows);
        Board::new(size.rows, size.cols, tiles(rows))
    }

    pub(crate) fn board(rows: &[&str]) -> Board {
        try_board(rows).unwrap()
    }
}
