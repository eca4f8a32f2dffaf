#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that routes enemies toward the player.
//!
//! Each enemy re-plans a full A* search every time the system runs; paths
//! are never cached across ticks because the player and the terrain can
//! change under them. Searches share one scratch workspace so the flat
//! bookkeeping arrays are allocated once per [`Pursuit`] instance.

use std::{cmp::Ordering, collections::BinaryHeap};

use dungeon_chase_core::{CellCoord, Command, Direction};
use dungeon_chase_world::{query, TileGrid, World};

/// Sentinel marking a cell with no recorded predecessor.
const NO_PREDECESSOR: u32 = u32::MAX;
/// Sentinel cost for cells the search has not reached.
const INFINITY: u32 = u32::MAX;

/// Expansion order for the four cardinal neighbors.
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// Pure system that plans one shortest-path step per enemy per run.
#[derive(Debug, Default)]
pub struct Pursuit {
    workspace: SearchWorkspace,
}

impl Pursuit {
    /// Emits a [`Command::StepEnemy`] for every enemy with a usable route.
    ///
    /// Enemies are visited in deterministic snapshot order. A route shorter
    /// than three cells (the enemy already stands on or next to the player,
    /// or the player is unreachable) produces no command for that enemy, so
    /// pursuers close in but never overlap their quarry.
    pub fn plan(&mut self, world: &World, out: &mut Vec<Command>) {
        let grid = query::tile_grid(world);
        let goal = query::player(world);

        for enemy in query::enemy_view(world).iter() {
            let path = self.workspace.search(grid, enemy.cell, goal);
            let Some(next_cell) = next_step(&path) else {
                continue;
            };
            if let Some(direction) = direction_between(enemy.cell, next_cell) {
                out.push(Command::StepEnemy {
                    enemy_id: enemy.id,
                    direction,
                });
            }
        }
    }
}

/// Computes the shortest 4-connected route from `start` to `goal`.
///
/// The returned cells run from the goal back to the start, both endpoints
/// included; an unreachable goal yields an empty vector. Ties between
/// equal-cost frontier cells break by insertion order, so repeated searches
/// over an unchanged world return identical paths.
#[must_use]
pub fn find_path(grid: &TileGrid, start: CellCoord, goal: CellCoord) -> Vec<CellCoord> {
    SearchWorkspace::default().search(grid, start, goal)
}

/// Reusable flat-array bookkeeping for one A* search at a time.
#[derive(Debug, Default)]
struct SearchWorkspace {
    g_score: Vec<u32>,
    came_from: Vec<u32>,
    open: BinaryHeap<OpenEntry>,
}

impl SearchWorkspace {
    fn search(&mut self, grid: &TileGrid, start: CellCoord, goal: CellCoord) -> Vec<CellCoord> {
        let Some(start_index) = grid.index_of(start) else {
            return Vec::new();
        };
        let Some(goal_index) = grid.index_of(goal) else {
            return Vec::new();
        };

        let cell_count = grid.tiles().len();
        self.reset(cell_count);

        let mut sequence = 0u64;
        self.g_score[start_index] = 0;
        self.open.push(OpenEntry {
            f_score: start.manhattan_distance(goal),
            g_score: 0,
            sequence,
            index: start_index as u32,
        });

        while let Some(entry) = self.open.pop() {
            let index = entry.index as usize;

            // A duplicate insertion whose cost was beaten since it was
            // queued; the fresher entry already handled this cell.
            if entry.g_score != self.g_score[index] {
                continue;
            }

            if index == goal_index {
                return self.reconstruct(grid, start_index, goal_index);
            }

            let cell = cell_at(grid, index);
            for direction in NEIGHBOR_ORDER {
                let Some(neighbor) = direction.offset_from(cell) else {
                    continue;
                };
                if !grid.is_passable(neighbor) {
                    continue;
                }
                let Some(neighbor_index) = grid.index_of(neighbor) else {
                    continue;
                };

                let tentative = entry.g_score + 1;
                if tentative < self.g_score[neighbor_index] {
                    self.g_score[neighbor_index] = tentative;
                    self.came_from[neighbor_index] = index as u32;
                    sequence += 1;
                    self.open.push(OpenEntry {
                        f_score: tentative.saturating_add(neighbor.manhattan_distance(goal)),
                        g_score: tentative,
                        sequence,
                        index: neighbor_index as u32,
                    });
                }
            }
        }

        Vec::new()
    }

    fn reset(&mut self, cell_count: usize) {
        if self.g_score.len() != cell_count {
            self.g_score = vec![INFINITY; cell_count];
            self.came_from = vec![NO_PREDECESSOR; cell_count];
        } else {
            self.g_score.fill(INFINITY);
            self.came_from.fill(NO_PREDECESSOR);
        }
        self.open.clear();
    }

    fn reconstruct(
        &self,
        grid: &TileGrid,
        start_index: usize,
        goal_index: usize,
    ) -> Vec<CellCoord> {
        let mut path = Vec::new();
        let mut index = goal_index;

        while index != start_index {
            path.push(cell_at(grid, index));
            let predecessor = self.came_from[index];
            if predecessor == NO_PREDECESSOR {
                return Vec::new();
            }
            index = predecessor as usize;
        }
        path.push(cell_at(grid, start_index));

        path
    }
}

/// Frontier entry ordered for min-extraction by `f_score`, then insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    f_score: u32,
    g_score: u32,
    sequence: u64,
    index: u32,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn cell_at(grid: &TileGrid, index: usize) -> CellCoord {
    let width = grid.columns() as usize;
    CellCoord::new((index % width) as u32, (index / width) as u32)
}

/// The cell adjacent to the route's start, if the route is long enough for
/// a step that stops short of the goal.
fn next_step(path: &[CellCoord]) -> Option<CellCoord> {
    if path.len() < 3 {
        return None;
    }
    path.get(path.len() - 2).copied()
}

fn direction_between(from: CellCoord, to: CellCoord) -> Option<Direction> {
    let column_diff = from.column().abs_diff(to.column());
    let row_diff = from.row().abs_diff(to.row());
    if column_diff + row_diff != 1 {
        return None;
    }

    if column_diff == 1 {
        if to.column() > from.column() {
            Some(Direction::East)
        } else {
            Some(Direction::West)
        }
    } else if to.row() > from.row() {
        Some(Direction::South)
    } else {
        Some(Direction::North)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_between_neighbors() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            direction_between(origin, CellCoord::new(3, 2)),
            Some(Direction::North)
        );
        assert_eq!(
            direction_between(origin, CellCoord::new(4, 3)),
            Some(Direction::East)
        );
        assert_eq!(
            direction_between(origin, CellCoord::new(3, 4)),
            Some(Direction::South)
        );
        assert_eq!(
            direction_between(origin, CellCoord::new(2, 3)),
            Some(Direction::West)
        );
        assert_eq!(direction_between(origin, origin), None);
        assert_eq!(direction_between(origin, CellCoord::new(5, 3)), None);
    }

    #[test]
    fn next_step_requires_room_to_stop_short_of_the_goal() {
        assert_eq!(next_step(&[]), None);
        assert_eq!(next_step(&[CellCoord::new(0, 0)]), None);
        assert_eq!(
            next_step(&[CellCoord::new(0, 0), CellCoord::new(1, 0)]),
            None,
            "an adjacent start has nowhere to go but the goal itself"
        );
        assert_eq!(
            next_step(&[
                CellCoord::new(2, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 0),
            ]),
            Some(CellCoord::new(1, 0))
        );
    }

    #[test]
    fn open_entries_pop_lowest_f_then_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry {
            f_score: 4,
            g_score: 0,
            sequence: 0,
            index: 0,
        });
        heap.push(OpenEntry {
            f_score: 2,
            g_score: 0,
            sequence: 2,
            index: 1,
        });
        heap.push(OpenEntry {
            f_score: 2,
            g_score: 0,
            sequence: 1,
            index: 2,
        });

        assert_eq!(heap.pop().map(|entry| entry.index), Some(2));
        assert_eq!(heap.pop().map(|entry| entry.index), Some(1));
        assert_eq!(heap.pop().map(|entry| entry.index), Some(0));
    }
}
