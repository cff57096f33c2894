//! Grid A* over known cells, retargeting hidden destinations to the nearest known cell.

use alloc::collections::{BinaryHeap, VecDeque};
use alloc::vec::Vec;
use core::cmp::Reverse;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Decides which cells the player may walk through.
pub trait Traversable {
    fn is_traversable(&self, cell: &Cell) -> bool;
}

impl<F: Fn(&Cell) -> bool> Traversable for F {
    fn is_traversable(&self, cell: &Cell) -> bool {
        self(cell)
    }
}

/// Walls and hidden cells always block, flagged cells block unless `flags_block` is off.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalPolicy {
    pub flags_block: bool,
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        Self { flags_block: true }
    }
}

impl Traversable for TraversalPolicy {
    fn is_traversable(&self, cell: &Cell) -> bool {
        match (cell.content, cell.state) {
            (CellContent::Wall, _) => false,
            (_, CellState::Hidden) => false,
            (_, CellState::Flagged) => !self.flags_block,
            (_, CellState::Visible | CellState::Revealed) => true,
        }
    }
}

pub struct Pathfinder<'a, T = TraversalPolicy> {
    grid: &'a Grid,
    policy: T,
}

impl<'a, T: Traversable> Pathfinder<'a, T> {
    pub fn new(grid: &'a Grid, policy: T) -> Self {
        Self { grid, policy }
    }

    fn walkable(&self, coords: Coord2) -> bool {
        self.policy.is_traversable(&self.grid[coords])
    }

    /// Shortest 4-directional path from `start` to `target`, both ends included.
    ///
    /// A target the player can not see into is swapped for the nearest walkable cell around it
    /// that can be reached from `start`. Returns an empty path when either end is out of bounds or
    /// nothing is reachable.
    pub fn find_path(&self, start: Coord2, target: Coord2) -> Vec<Coord2> {
        if !self.grid.contains(start) || !self.grid.contains(target) {
            return Vec::new();
        }

        let mut target = target;
        if self.grid[target].state.is_concealed() && !self.walkable(target) {
            let reachable = self.reachable_from(start);
            let Some(closest) = self.closest_where(target, |coords| reachable[coords.to_nd_index()])
            else {
                log::trace!("No reachable known cell around {:?}", target);
                return Vec::new();
            };
            log::trace!("Retargeted hidden {:?} to {:?}", target, closest);
            target = closest;
        }

        self.astar(start, target)
    }

    /// Nearest walkable cell to `target`, reachable or not.
    pub fn find_closest_visible(&self, target: Coord2) -> Option<Coord2> {
        self.closest_where(target, |coords| self.walkable(coords))
    }

    /// Breadth-first search outward from `target` for the first cell passing `accept`.
    ///
    /// The search expands through every cell regardless of content, so a wall between the target
    /// and the known area does not hide it.
    fn closest_where(&self, target: Coord2, accept: impl Fn(Coord2) -> bool) -> Option<Coord2> {
        if !self.grid.contains(target) {
            return None;
        }

        let mut visited: Array2<bool> = Array2::default(self.grid.size().to_nd_index());
        let mut to_visit = VecDeque::from([target]);
        visited[target.to_nd_index()] = true;

        while let Some(coords) = to_visit.pop_front() {
            if accept(coords) {
                return Some(coords);
            }

            for pos in self.grid.iter_orthogonal(coords) {
                if !visited[pos.to_nd_index()] {
                    visited[pos.to_nd_index()] = true;
                    to_visit.push_back(pos);
                }
            }
        }

        None
    }

    /// Walkable cells connected to `start`.
    fn reachable_from(&self, start: Coord2) -> Array2<bool> {
        let mut reachable: Array2<bool> = Array2::default(self.grid.size().to_nd_index());
        let mut to_visit = VecDeque::from([start]);
        reachable[start.to_nd_index()] = self.walkable(start);

        while let Some(coords) = to_visit.pop_front() {
            for pos in self.grid.iter_orthogonal(coords) {
                if !reachable[pos.to_nd_index()] && self.walkable(pos) {
                    reachable[pos.to_nd_index()] = true;
                    to_visit.push_back(pos);
                }
            }
        }

        reachable
    }

    fn astar(&self, start: Coord2, target: Coord2) -> Vec<Coord2> {
        let shape = self.grid.size().to_nd_index();
        let mut g_score: Array2<u32> = Array2::from_elem(shape, u32::MAX);
        let mut came_from: Array2<Option<Coord2>> = Array2::default(shape);
        let mut closed: Array2<bool> = Array2::default(shape);
        // ties on f-score go to whichever node was queued first
        let mut open = BinaryHeap::new();
        let mut sequence: u32 = 0;

        g_score[start.to_nd_index()] = 0;
        open.push(Reverse((manhattan(start, target), sequence, start)));

        while let Some(Reverse((_, _, current))) = open.pop() {
            if current == target {
                return reconstruct_path(&came_from, current);
            }

            if closed[current.to_nd_index()] {
                continue;
            }
            closed[current.to_nd_index()] = true;

            let tentative = g_score[current.to_nd_index()] + 1;
            for neighbor in self.grid.iter_orthogonal(current) {
                if closed[neighbor.to_nd_index()] || !self.walkable(neighbor) {
                    continue;
                }

                if tentative < g_score[neighbor.to_nd_index()] {
                    g_score[neighbor.to_nd_index()] = tentative;
                    came_from[neighbor.to_nd_index()] = Some(current);
                    sequence += 1;
                    open.push(Reverse((
                        tentative + manhattan(neighbor, target),
                        sequence,
                        neighbor,
                    )));
                }
            }
        }

        Vec::new()
    }
}

fn reconstruct_path(came_from: &Array2<Option<Coord2>>, end: Coord2) -> Vec<Coord2> {
    let mut path = Vec::from([end]);
    let mut current = end;
    while let Some(previous) = came_from[current.to_nd_index()] {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
