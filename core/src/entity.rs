use serde::{Deserialize, Serialize};

use crate::Position;

/// Movable object that can sit on an entity cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Player,
    Gem,
    Mine,
    ExtraLife,
}

impl Entity {
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }

    /// Whether a sliding player picks this entity up on the way.
    pub const fn is_collectible(self) -> bool {
        matches!(self, Self::Gem | Self::ExtraLife)
    }
}

/// Stable index of an entity inside a board's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub(crate) usize);

impl EntityId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Arena entry: the entity and the cell currently holding it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub(crate) struct EntitySlot {
    pub(crate) entity: Entity,
    pub(crate) owner: Option<Position>,
}

impl EntitySlot {
    pub(crate) const fn unowned(entity: Entity) -> Self {
        Self {
            entity,
            owner: None,
        }
    }
}
