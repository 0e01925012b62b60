use serde::{Deserialize, Serialize};

use crate::Entity;

/// Loader-facing description of a cell, turned into real cells by [`Board::new`](crate::Board::new).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Open(Option<Entity>),
    Stop(Option<Entity>),
}

impl Tile {
    pub const EMPTY: Self = Self::Open(None);
    pub const STOP: Self = Self::Stop(None);

    pub const fn with(entity: Entity) -> Self {
        Self::Open(Some(entity))
    }

    pub const fn entity(self) -> Option<Entity> {
        match self {
            Self::Wall => None,
            Self::Open(entity) | Self::Stop(entity) => entity,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::EMPTY
    }
}
