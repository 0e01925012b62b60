use serde::{Deserialize, Serialize};

use crate::*;

/// Static structure of one board square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Cell {
    Wall(Position),
    Entity(EntityCell),
}

impl Cell {
    pub const fn position(&self) -> Position {
        match self {
            Self::Wall(position) => *position,
            Self::Entity(cell) => cell.position,
        }
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, Self::Wall(_))
    }

    pub const fn is_entity_cell(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    pub const fn is_stop_cell(&self) -> bool {
        matches!(
            self,
            Self::Entity(EntityCell {
                kind: EntityCellKind::Stop,
                ..
            })
        )
    }

    pub const fn as_entity_cell(&self) -> Option<&EntityCell> {
        match self {
            Self::Wall(_) => None,
            Self::Entity(cell) => Some(cell),
        }
    }

    pub(crate) fn as_entity_cell_mut(&mut self) -> Option<&mut EntityCell> {
        match self {
            Self::Wall(_) => None,
            Self::Entity(cell) => Some(cell),
        }
    }

    pub const fn entity_id(&self) -> Option<EntityId> {
        match self {
            Self::Wall(_) => None,
            Self::Entity(cell) => cell.entity,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCellKind {
    /// Plain floor, slides pass over it.
    Open,
    /// Halts any slide entering it, holds nothing but the player.
    Stop,
}

/// Traversable cell holding at most one entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityCell {
    position: Position,
    kind: EntityCellKind,
    entity: Option<EntityId>,
}

impl EntityCell {
    pub(crate) const fn new(position: Position, kind: EntityCellKind) -> Self {
        Self {
            position,
            kind,
            entity: None,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn kind(&self) -> EntityCellKind {
        self.kind
    }

    pub const fn is_stop(&self) -> bool {
        matches!(self.kind, EntityCellKind::Stop)
    }

    pub const fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub const fn is_empty(&self) -> bool {
        self.entity.is_none()
    }

    pub(crate) fn check_accepts(&self, entity: Entity) -> core::result::Result<(), PlacementError> {
        if self.is_stop() && !entity.is_player() {
            Err(PlacementError::StopCellRejects {
                position: self.position,
                entity,
            })
        } else {
            Ok(())
        }
    }

    /// Raw forward reference, only the grid's ownership primitive may call this.
    pub(crate) fn set_entity(&mut self, entity: Option<EntityId>) {
        self.entity = entity;
    }
}
