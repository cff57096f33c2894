use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size two-dimensional array of cells indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.cells)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Whether `coords` lies on the outer ring of the board.
    pub fn is_border(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x == 0 || y == 0 || x + 1 == width || y + 1 == height
    }

    /// Whether `coords` lies strictly inside the outer ring.
    pub fn is_interior(&self, coords: Coord2) -> bool {
        self.contains(coords) && !self.is_border(coords)
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_orthogonal(coords)
    }

    /// All coordinates in column-major order, matching the backing array.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn count_content(&self, content: CellContent) -> CellCount {
        self.count_where(|cell| cell.content == content)
    }

    pub fn count_state(&self, state: CellState) -> CellCount {
        self.count_where(|cell| cell.state == state)
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_and_interior() {
        let grid = Grid::new((5, 6));

        assert!(grid.is_border((0, 3)));
        assert!(grid.is_border((4, 3)));
        assert!(grid.is_border((2, 5)));
        assert!(grid.is_interior((1, 1)));
        assert!(grid.is_interior((3, 4)));
        assert!(!grid.is_interior((5, 1)));
    }

    #[test]
    fn validate_coords_rejects_out_of_bounds() {
        let grid = Grid::new((5, 5));

        assert_eq!(grid.validate_coords((4, 4)), Ok((4, 4)));
        assert_eq!(grid.validate_coords((5, 0)), Err(GameError::InvalidCoords));
        assert!(grid.get((0, 5)).is_none());
    }

    #[test]
    fn coords_visits_every_cell_once() {
        let grid = Grid::new((3, 4));

        assert_eq!(grid.coords().count(), 12);
        assert_eq!(grid.count_state(CellState::Hidden), 12);
        assert_eq!(grid.count_content(CellContent::Empty), 12);
    }
}
