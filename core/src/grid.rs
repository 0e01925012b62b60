use alloc::vec::Vec;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

type PlacementResult<T> = core::result::Result<T, PlacementError>;

/// Cell array plus the arena of every entity that was ever put on it.
///
/// Cells refer to entities by [`EntityId`] and entities refer back to the owning cell by [`Position`]. Both sides are
/// only ever changed together through [`Grid::set_owner`], so for every entity cell holding `id`, the owner of `id`
/// is that cell, and vice versa.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    size: BoardSize,
    cells: Array2<Cell>,
    entities: Vec<EntitySlot>,
}

impl Grid {
    /// Builds the cells described by `tile_at` and places their entities.
    pub fn from_fn(size: BoardSize, mut tile_at: impl FnMut(Position) -> Tile) -> PlacementResult<Self> {
        let tiles: Vec<(Position, Tile)> = size.positions().map(|pos| (pos, tile_at(pos))).collect();
        let cells: Vec<Cell> = tiles
            .iter()
            .map(|&(position, tile)| match tile {
                Tile::Wall => Cell::Wall(position),
                Tile::Open(_) => Cell::Entity(EntityCell::new(position, EntityCellKind::Open)),
                Tile::Stop(_) => Cell::Entity(EntityCell::new(position, EntityCellKind::Stop)),
            })
            .collect();
        let cells = Array2::from_shape_vec(size.to_nd_index(), cells).expect("cell count should match board size");

        let mut grid = Self {
            size,
            cells,
            entities: Vec::new(),
        };
        for (position, tile) in tiles {
            if let Some(entity) = tile.entity() {
                let id = grid.spawn(entity);
                grid.place(position, id)?;
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        if self.size.contains(position) {
            self.cells.get(position.to_nd_index())
        } else {
            None
        }
    }

    pub fn is_entity_cell(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_entity_cell)
    }

    pub fn entity_id_at(&self, position: Position) -> Option<EntityId> {
        self.cell(position).and_then(Cell::entity_id)
    }

    pub fn entity_at(&self, position: Position) -> Option<Entity> {
        self.entity_id_at(position).and_then(|id| self.entity(id))
    }

    /// Kind of `id`, `None` when the id was not spawned on this grid.
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        self.entities.get(id.0).map(|slot| slot.entity)
    }

    /// Cell currently holding `id`, `None` while it is off the board or when this grid never spawned it.
    pub fn owner(&self, id: EntityId) -> Option<Position> {
        self.entities.get(id.0).and_then(|slot| slot.owner)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, Entity, Option<Position>)> + '_ {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, slot)| (EntityId(index), slot.entity, slot.owner))
    }

    /// Number of `entity` currently sitting on the board.
    pub fn count_placed(&self, entity: Entity) -> usize {
        self.entities
            .iter()
            .filter(|slot| slot.entity == entity && slot.owner.is_some())
            .count()
    }

    /// Adds an unowned entity to the arena.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.entities.push(EntitySlot::unowned(entity));
        EntityId(self.entities.len() - 1)
    }

    /// Moves `id` to `owner` (or off the board when `None`), returning the cell that held it before.
    ///
    /// Nothing changes when the new owner is rejected.
    pub fn set_owner(&mut self, id: EntityId, owner: Option<Position>) -> PlacementResult<Option<Position>> {
        let EntitySlot { entity, owner: previous } = self.slot(id)?;
        if previous == owner {
            return Ok(previous);
        }

        if let Some(position) = owner {
            let cell = self.entity_cell(position)?;
            cell.check_accepts(entity)?;
            if !cell.is_empty() {
                return Err(PlacementError::Occupied(position));
            }
        }

        if let Some(cell) = previous.and_then(|pos| self.entity_cell_mut(pos)) {
            cell.set_entity(None);
        }
        if let Some(cell) = owner.and_then(|pos| self.entity_cell_mut(pos)) {
            cell.set_entity(Some(id));
        }
        if let Some(slot) = self.entities.get_mut(id.0) {
            slot.owner = owner;
        }

        log::trace!("{:?} {:?} owner {:?} -> {:?}", id, entity, previous, owner);
        Ok(previous)
    }

    /// Puts `id` on an empty cell.
    pub fn place(&mut self, position: Position, id: EntityId) -> PlacementResult<()> {
        self.set_owner(id, Some(position)).map(|_| ())
    }

    /// Clears the cell at `position`, returning the entity it held.
    pub fn take(&mut self, position: Position) -> Option<EntityId> {
        let id = self.entity_id_at(position)?;
        self.set_owner(id, None).ok()?;
        Some(id)
    }

    /// Puts `id` on the cell at `position`, evicting and returning whatever was there.
    pub fn swap(&mut self, position: Position, id: EntityId) -> PlacementResult<Option<EntityId>> {
        let entity = self.slot(id)?.entity;
        let cell = self.entity_cell(position)?;
        cell.check_accepts(entity)?;

        let displaced = cell.entity();
        if displaced == Some(id) {
            return Ok(None);
        }
        if let Some(displaced) = displaced {
            self.set_owner(displaced, None)?;
        }
        self.set_owner(id, Some(position))?;
        Ok(displaced)
    }

    fn slot(&self, id: EntityId) -> PlacementResult<EntitySlot> {
        self.entities
            .get(id.0)
            .copied()
            .ok_or(PlacementError::UnknownEntity(id))
    }

    fn entity_cell(&self, position: Position) -> PlacementResult<&EntityCell> {
        self.cell(position)
            .ok_or(PlacementError::OutsideBoard(position))?
            .as_entity_cell()
            .ok_or(PlacementError::NotEntityCell(position))
    }

    fn entity_cell_mut(&mut self, position: Position) -> Option<&mut EntityCell> {
        if !self.size.contains(position) {
            return None;
        }
        self.cells
            .get_mut(position.to_nd_index())
            .and_then(Cell::as_entity_cell_mut)
    }
}
