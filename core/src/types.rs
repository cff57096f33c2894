use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Chebyshev (king-move) distance between two cells.
pub const fn chebyshev(a: Coord2, b: Coord2) -> Coord {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    if dx > dy { dx } else { dy }
}

/// Manhattan distance between two cells, in 4-directional steps.
pub const fn manhattan(a: Coord2, b: Coord2) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

/// Edge of the board, used for exits and the sealed entrance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    North,
    East,
    South,
    West,
}

impl Compass {
    pub const ALL: [Compass; 4] = [Self::North, Self::East, Self::South, Self::West];
}

impl Default for Compass {
    fn default() -> Self {
        Self::South
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        })
    }
}

impl core::str::FromStr for Compass {
    type Err = crate::GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" | "north" | "N" | "North" | "NORTH" => Ok(Self::North),
            "e" | "east" | "E" | "East" | "EAST" => Ok(Self::East),
            "s" | "south" | "S" | "South" | "SOUTH" => Ok(Self::South),
            "w" | "west" | "W" | "West" | "WEST" => Ok(Self::West),
            _ => Err(crate::GameError::InvalidDirection),
        }
    }
}

pub trait NeighborIterExt {
    /// Clipped 8-neighbourhood of `index`.
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;

    /// Clipped 4-neighbourhood of `index`.
    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self), &DISPLACEMENTS)
    }

    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self), &ORTHOGONAL_DISPLACEMENTS)
    }
}

/// Size of a board-backing array as `(width, height)`.
pub(crate) fn array_size<T>(array: &Array2<T>) -> Coord2 {
    let dim = array.dim();
    (
        Coord::try_from(dim.0).unwrap_or(Coord::MAX),
        Coord::try_from(dim.1).unwrap_or(Coord::MAX),
    )
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ORTHOGONAL_DISPLACEMENTS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(
        center: Coord2,
        bounds: Coord2,
        displacements: &'static [(isize, isize)],
    ) -> Self {
        Self {
            center,
            bounds,
            displacements,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.displacements.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
