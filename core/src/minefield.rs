//! Hazard placement and adjacency counting.

use alloc::vec::Vec;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::*;

/// Number of hazards a board of `size` gets at `density`, rounded down.
pub fn mine_quota(size: Coord2, density: f64) -> Result<CellCount> {
    if !density.is_finite() || !(0.0..=1.0).contains(&density) {
        log::warn!("Rejected mine density {}", density);
        return Err(GameError::InvalidDensity);
    }

    let total = f64::from(mult(size.0, size.1));
    // truncation is floor for non-negative values
    Ok((total * density) as CellCount)
}

/// Whether `coords` is inside the block around `start` that never receives a hazard.
pub fn in_safety_zone(coords: Coord2, start: Coord2) -> bool {
    chebyshev(coords, start) <= 1
}

/// Interior empty cells outside the safety zone, in grid order.
fn candidates(grid: &Grid, start: Coord2) -> Vec<Coord2> {
    grid.coords()
        .filter(|&coords| grid.is_interior(coords))
        .filter(|&coords| !in_safety_zone(coords, start))
        .filter(|&coords| grid[coords].content == CellContent::Empty)
        .collect()
}

/// How many hazards the grid can still take with `start` kept clear.
pub fn mine_capacity(grid: &Grid, start: Coord2) -> CellCount {
    candidates(grid, start)
        .len()
        .try_into()
        .unwrap_or(CellCount::MAX)
}

/// Places exactly `count` hazards on distinct interior empty cells outside the safety zone.
///
/// Every eligible subset of the right size is equally likely. Fails without touching the grid
/// when there are not enough eligible cells.
pub fn place_mines<R: Rng + ?Sized>(
    grid: &mut Grid,
    start: Coord2,
    count: CellCount,
    rng: &mut R,
) -> Result<()> {
    let mut free_cells = candidates(grid, start);
    let available: CellCount = free_cells.len().try_into().unwrap_or(CellCount::MAX);

    if count > available {
        log::warn!(
            "Cannot place {} mines on a {:?} board, only {} cells are eligible",
            count,
            grid.size(),
            available
        );
        return Err(GameError::TooManyMines {
            requested: count,
            available,
        });
    }

    let (chosen, _) = free_cells.partial_shuffle(rng, count.into());
    for &coords in chosen.iter() {
        grid[coords].content = CellContent::Hazard;
    }

    Ok(())
}

/// Puts a single potion on a random eligible cell, returning where it went.
pub fn place_potion<R: Rng + ?Sized>(grid: &mut Grid, start: Coord2, rng: &mut R) -> Option<Coord2> {
    let coords = *candidates(grid, start).choose(rng)?;
    grid[coords].content = CellContent::Potion;
    Some(coords)
}

pub fn count_adjacent_mines(grid: &Grid, coords: Coord2) -> u8 {
    grid.iter_neighbors(coords)
        .filter(|&pos| grid[pos].content.is_hazard())
        .count()
        .try_into()
        .unwrap_or(u8::MAX)
}

/// Stores the adjacent hazard count on every cell. Must run after all hazards are placed.
pub fn calculate_adjacency(grid: &mut Grid) {
    for coords in grid.coords() {
        grid[coords].adjacent_mines = if grid[coords].content.is_hazard() {
            0
        } else {
            count_adjacent_mines(grid, coords)
        };
    }
}
