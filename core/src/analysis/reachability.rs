use alloc::vec;
use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::*;

type Ray = SmallVec<[Position; 16]>;

/// Where a player starting at `start` can come to rest and what it can pass over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reachability {
    start: Position,
    stoppable: HashSet<Position>,
    reachable: HashSet<Position>,
}

impl Reachability {
    pub fn analyze(grid: &Grid, start: Position) -> Self {
        let stoppable = stoppable_positions(grid, start);
        let reachable = passable_from(grid, &stoppable);
        log::debug!(
            "reachability from {}: {} stoppable, {} reachable",
            start,
            stoppable.len(),
            reachable.len()
        );
        Self {
            start,
            stoppable,
            reachable,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn stoppable(&self) -> &HashSet<Position> {
        &self.stoppable
    }

    pub fn reachable(&self) -> &HashSet<Position> {
        &self.reachable
    }

    pub fn can_stop_at(&self, position: Position) -> bool {
        self.stoppable.contains(&position)
    }

    pub fn can_reach(&self, position: Position) -> bool {
        self.reachable.contains(&position)
    }

    /// Number of `entity` on `grid` lying on a reachable position.
    pub fn count_reachable(&self, grid: &Grid, entity: Entity) -> usize {
        self.reachable
            .iter()
            .filter(|&&pos| grid.entity_at(pos) == Some(entity))
            .count()
    }
}

/// Every entity cell the player can end a slide on, starting from `start` and sliding any number of times.
pub fn stoppable_positions(grid: &Grid, start: Position) -> HashSet<Position> {
    let mut stoppable = HashSet::new();
    let mut queued = HashSet::new();
    queued.insert(start);
    let mut frontier = vec![start];

    while let Some(position) = frontier.pop() {
        if !grid.is_entity_cell(position) || !stoppable.insert(position) {
            continue;
        }

        for direction in Direction::ALL {
            let ray = cast_ray(grid, position, direction, true);
            if let Some(&target) = ray.last() {
                if queued.insert(target) {
                    log::trace!("{} {:?} stops at {}", position, direction, target);
                    frontier.push(target);
                }
            }
        }
    }

    stoppable
}

/// Every position some slide passes over, starting from any position stoppable from `start`.
pub fn reachable_positions(grid: &Grid, start: Position) -> HashSet<Position> {
    passable_from(grid, &stoppable_positions(grid, start))
}

fn passable_from(grid: &Grid, stoppable: &HashSet<Position>) -> HashSet<Position> {
    let mut reachable = stoppable.clone();
    for &position in stoppable {
        for direction in Direction::ALL {
            reachable.extend(cast_ray(grid, position, direction, false));
        }
    }
    reachable
}

/// Entity cells entered when leaving `from` in `direction`, ending before the first wall or the board edge.
///
/// With `halt_at_stop` the ray also ends on the first stop cell, so its last element is where a slide comes to rest.
fn cast_ray(grid: &Grid, from: Position, direction: Direction, halt_at_stop: bool) -> Ray {
    let size = grid.size();
    let mut ray = Ray::new();
    let mut current = from;

    for _ in 0..size.max_extent() {
        let Some(next) = current.step(direction, size) else {
            break;
        };
        let Some(cell) = grid.cell(next).filter(|cell| cell.is_entity_cell()) else {
            break;
        };
        ray.push(next);
        if halt_at_stop && cell.is_stop_cell() {
            break;
        }
        current = next;
    }

    ray
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::grid;

    fn set(positions: &[(Coord, Coord)]) -> HashSet<Position> {
        positions.iter().map(|&(row, col)| Position::new(row, col)).collect()
    }

    #[test]
    fn stop_cell_splits_corridor() {
        let grid = grid(&["P.S.#"]);
        let start = Position::new(0, 0);

        let analysis = Reachability::analyze(&grid, start);

        assert_eq!(analysis.stoppable(), &set(&[(0, 0), (0, 2), (0, 3)]));
        assert_eq!(analysis.reachable(), &set(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
        assert!(!analysis.can_stop_at(Position::new(0, 1)));
        assert!(analysis.can_reach(Position::new(0, 1)));
        assert!(!analysis.can_reach(Position::new(0, 4)));
    }

    #[test]
    fn walls_cut_off_the_far_side() {
        let grid = grid(&["P#G"]);

        let reachable = reachable_positions(&grid, Position::new(0, 0));

        assert_eq!(reachable, set(&[(0, 0)]));
    }

    #[test]
    fn open_room_stops_on_border_cells() {
        let grid = grid(&[
            ".....", //
            ".....",
            "..P..",
            ".....",
            ".....",
        ]);

        let stoppable = stoppable_positions(&grid, Position::new(2, 2));

        assert_eq!(
            stoppable,
            set(&[
                (2, 2),
                (0, 2),
                (4, 2),
                (2, 0),
                (2, 4),
                (0, 0),
                (0, 4),
                (4, 0),
                (4, 4),
            ])
        );

        // rows and columns 1 and 3 cross only where no slide ever runs
        let reachable = reachable_positions(&grid, Position::new(2, 2));
        assert_eq!(reachable.len(), 21);
        assert!(!reachable.contains(&Position::new(1, 1)));
        assert!(!reachable.contains(&Position::new(3, 3)));
        assert!(reachable.contains(&Position::new(1, 2)));
    }

    #[test]
    fn mines_do_not_block_analysis() {
        let grid = grid(&["PM.G"]);

        let analysis = Reachability::analyze(&grid, Position::new(0, 0));

        assert!(analysis.can_stop_at(Position::new(0, 3)));
        assert_eq!(analysis.count_reachable(&grid, Entity::Gem), 1);
    }

    #[test]
    fn start_on_wall_reaches_nothing() {
        let grid = grid(&["#.G"]);

        let analysis = Reachability::analyze(&grid, Position::new(0, 0));

        assert!(analysis.stoppable().is_empty());
        assert!(analysis.reachable().is_empty());
    }

    #[test]
    fn reachable_is_superset_of_stoppable() {
        let grid = grid(&[
            "P..#..", //
            ".S..#.",
            "#..G..",
            "..L.S.",
            "M.#...",
        ]);

        for position in grid.size().positions() {
            let analysis = Reachability::analyze(&grid, position);
            assert!(analysis.stoppable().is_subset(analysis.reachable()));
        }
    }
}
