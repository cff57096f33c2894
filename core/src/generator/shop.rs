use super::*;

/// Shop level: an open, fully revealed room without hazards and two exits on the middle row.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShopBoardGenerator;

impl ShopBoardGenerator {
    pub fn exit_positions((width, height): Coord2) -> [Coord2; 2] {
        let row = height / 2;
        let three_quarters = (u16::from(width) * 3 / 4) as Coord;
        [(width / 4, row), (three_quarters, row)]
    }
}

impl BoardGenerator for ShopBoardGenerator {
    fn generate(self, config: LevelConfig) -> Result<Board> {
        config.validate()?;

        let mut grid = Grid::new(config.size);
        for coords in ShopBoardGenerator::exit_positions(config.size) {
            grid[coords] = Cell::exit(None);
        }
        for cell in grid.cells_mut() {
            cell.state = CellState::Revealed;
        }

        let (width, height) = config.size;
        let start = (width / 2, height / 2);
        log::debug!("Generated {}x{} shop, start {:?}", width, height, start);

        Ok(Board::from_parts(grid, config, None, start, None))
    }
}
