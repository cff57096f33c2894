use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Cavern level generator: a walled room with an exit on every edge but the entrance, a potion
/// and randomly placed hazards that always leave the area around the start clear.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: LevelConfig) -> Result<Board> {
        config.validate()?;
        let quota = config.mine_quota()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let exit_anchors = random_exit_anchors(config.size, &mut rng);

        let mut grid = Grid::new(config.size);
        lay_out_border(&mut grid, &exit_anchors, config.entrance);
        let start = exit_anchors.start_position(config.size, config.entrance);

        // hazards take priority over the potion on crowded boards
        let potion = if config.potion && mine_capacity(&grid, start) > quota {
            place_potion(&mut grid, start, &mut rng)
        } else {
            if config.potion {
                log::debug!("No room left for a potion next to {} mines", quota);
            }
            None
        };

        place_mines(&mut grid, start, quota, &mut rng)?;
        calculate_adjacency(&mut grid);

        log::debug!(
            "Generated {}x{} board, seed {}, entrance {}, start {:?}, {} mines",
            config.size.0,
            config.size.1,
            self.seed,
            config.entrance,
            start,
            quota
        );

        Ok(Board::from_parts(
            grid,
            config,
            Some(exit_anchors),
            start,
            potion,
        ))
    }
}

/// Draws one anchor per edge so that both cells of each opening avoid the corners.
fn random_exit_anchors<R: Rng + ?Sized>((width, height): Coord2, rng: &mut R) -> ExitAnchors {
    ExitAnchors {
        north: rng.random_range(1..=width - 4),
        east: rng.random_range(1..=height - 4),
        south: rng.random_range(1..=width - 4),
        west: rng.random_range(1..=height - 4),
    }
}

/// Walls the outer ring and opens every exit pair except the one on `entrance`.
fn lay_out_border(grid: &mut Grid, exit_anchors: &ExitAnchors, entrance: Compass) {
    for coords in grid.coords() {
        if grid.is_border(coords) {
            grid[coords] = Cell::new(CellContent::Wall);
        }
    }

    let size = grid.size();
    for edge in Compass::ALL {
        if edge == entrance {
            continue;
        }
        for (coords, label) in exit_anchors.exit_cells(size, edge) {
            grid[coords] = Cell::exit(Some(label));
        }
    }
}
