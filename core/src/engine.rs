use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of one slide attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// Wall or board edge right next to the player, nothing happened.
    Invalid { unchanged_position: Position },
    /// Slide completed, loot passed over is listed in the order it was reached.
    Alive {
        new_position: Position,
        original_position: Position,
        collected_gems: Vec<Position>,
        collected_extra_lives: Vec<Position>,
    },
    /// Slide ran into a mine, the player stays where the move started.
    Dead {
        unchanged_position: Position,
        mine_position: Position,
    },
}

impl MoveResult {
    /// Where the player stands after this result.
    pub const fn position(&self) -> Position {
        match self {
            Self::Invalid { unchanged_position } | Self::Dead { unchanged_position, .. } => *unchanged_position,
            Self::Alive { new_position, .. } => *new_position,
        }
    }

    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }

    pub const fn is_alive(&self) -> bool {
        matches!(self, Self::Alive { .. })
    }

    pub const fn is_dead(&self) -> bool {
        matches!(self, Self::Dead { .. })
    }

    /// Whether applying this result changed the board.
    pub const fn has_update(&self) -> bool {
        self.is_alive()
    }
}

impl Board {
    /// Works out what sliding in `direction` would do, without touching the board.
    pub fn resolve_move(&self, direction: Direction) -> MoveResult {
        let size = self.grid.size();
        let origin = self.player_position();
        let mut current = origin;
        let mut collected_gems = Vec::new();
        let mut collected_extra_lives = Vec::new();

        for _ in 0..size.max_extent() {
            let Some(next) = current.step(direction, size) else {
                break;
            };
            let Some(cell) = self.grid.cell(next).and_then(Cell::as_entity_cell) else {
                break;
            };

            match cell.entity().and_then(|id| self.grid.entity(id)) {
                Some(Entity::Mine) => {
                    return MoveResult::Dead {
                        unchanged_position: origin,
                        mine_position: next,
                    };
                }
                Some(Entity::Gem) => collected_gems.push(next),
                Some(Entity::ExtraLife) => collected_extra_lives.push(next),
                Some(Entity::Player) | None => {}
            }
            log::trace!("slide {:?} passes {}", direction, next);

            current = next;
            if cell.is_stop() {
                break;
            }
        }

        if current == origin {
            MoveResult::Invalid {
                unchanged_position: origin,
            }
        } else {
            MoveResult::Alive {
                new_position: current,
                original_position: origin,
                collected_gems,
                collected_extra_lives,
            }
        }
    }

    /// Slides the player in `direction`, collecting loot on the way.
    ///
    /// Only an [`MoveResult::Alive`] result changes the board.
    pub fn try_move(&mut self, direction: Direction) -> MoveResult {
        let result = self.resolve_move(direction);

        if let MoveResult::Alive {
            new_position,
            collected_gems,
            collected_extra_lives,
            ..
        } = &result
        {
            for &position in collected_gems.iter().chain(collected_extra_lives) {
                let taken = self.grid.take(position);
                debug_assert!(taken.is_some(), "collected cell {} should hold loot", position);
            }
            self.grid
                .set_owner(self.player, Some(*new_position))
                .expect("slide should end on a cell accepting the player");
        }

        log::debug!("move {:?}: {:?}", direction, result);
        result
    }

    /// Directions that lead to a completed slide, with where each one ends.
    pub fn legal_destinations(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| match self.resolve_move(direction) {
                MoveResult::Alive { new_position, .. } => Some((direction, new_position)),
                _ => None,
            })
    }

    /// Reverts an alive `result`, putting the player and the collected loot back.
    ///
    /// Invalid and dead results never changed the board, so undoing them does nothing.
    pub fn undo(&mut self, result: &MoveResult) -> Result<()> {
        let MoveResult::Alive {
            new_position,
            original_position,
            collected_gems,
            collected_extra_lives,
        } = result
        else {
            return Ok(());
        };

        let origin_vacant = self
            .grid
            .cell(*original_position)
            .and_then(Cell::as_entity_cell)
            .is_some_and(EntityCell::is_empty);
        if self.player_position() != *new_position || !origin_vacant {
            return Err(GameError::UndoMismatch);
        }

        // every restored cell must be distinct and clear of the player's return cell
        let mut claimed = HashSet::new();
        claimed.insert(*original_position);
        let mut restore = Vec::new();
        for (kind, positions) in [
            (Entity::Gem, collected_gems),
            (Entity::ExtraLife, collected_extra_lives),
        ] {
            let mut unowned = self
                .grid
                .entities()
                .filter(move |&(_, entity, owner)| entity == kind && owner.is_none())
                .map(|(id, _, _)| id);
            for &position in positions {
                let free = position == *new_position
                    || self
                        .grid
                        .cell(position)
                        .and_then(Cell::as_entity_cell)
                        .is_some_and(|cell| cell.is_empty() && !cell.is_stop());
                let vacant = free && claimed.insert(position);
                let (true, Some(id)) = (vacant, unowned.next()) else {
                    return Err(GameError::UndoMismatch);
                };
                restore.push((position, id));
            }
        }

        self.grid.set_owner(self.player, Some(*original_position))?;
        for (position, id) in restore {
            self.grid.place(position, id)?;
        }

        log::debug!("undo: player back at {}", original_position);
        Ok(())
    }
}
