use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Ready
    }
}

/// First cell of the two-cell exit opening on each edge.
///
/// North and south anchors are columns, east and west anchors are rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitAnchors {
    pub north: Coord,
    pub east: Coord,
    pub south: Coord,
    pub west: Coord,
}

impl ExitAnchors {
    pub const fn get(&self, edge: Compass) -> Coord {
        match edge {
            Compass::North => self.north,
            Compass::East => self.east,
            Compass::South => self.south,
            Compass::West => self.west,
        }
    }

    /// Both cells of the opening on `edge` with their labels.
    pub const fn exit_cells(&self, (width, height): Coord2, edge: Compass) -> [(Coord2, ExitLabel); 2] {
        let anchor = self.get(edge);
        match edge {
            Compass::North => [
                ((anchor, 0), ExitLabel::TopLeft),
                ((anchor + 1, 0), ExitLabel::TopRight),
            ],
            Compass::East => [
                ((width - 1, anchor), ExitLabel::RightTop),
                ((width - 1, anchor + 1), ExitLabel::RightBottom),
            ],
            Compass::South => [
                ((anchor, height - 1), ExitLabel::BottomLeft),
                ((anchor + 1, height - 1), ExitLabel::BottomRight),
            ],
            Compass::West => [
                ((0, anchor), ExitLabel::LeftTop),
                ((0, anchor + 1), ExitLabel::LeftBottom),
            ],
        }
    }

    /// Cell one step inside the sealed opening on `entrance`.
    pub const fn start_position(&self, (width, height): Coord2, entrance: Compass) -> Coord2 {
        let anchor = self.get(entrance);
        match entrance {
            Compass::North => (anchor, 1),
            Compass::East => (width - 2, anchor),
            Compass::South => (anchor, height - 2),
            Compass::West => (1, anchor),
        }
    }
}

/// One level: the cells plus everything the reveal engine and pathfinder need.
///
/// Boards are never resized. A restart or a new level builds a fresh value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) config: LevelConfig,
    pub(crate) exit_anchors: Option<ExitAnchors>,
    pub(crate) start: Coord2,
    pub(crate) player: Coord2,
    pub(crate) mine_count: CellCount,
    pub(crate) potion: Option<Coord2>,
    pub(crate) state: BoardState,
    pub(crate) triggered_hazard: Option<Coord2>,
}

impl Board {
    pub(crate) fn from_parts(
        grid: Grid,
        config: LevelConfig,
        exit_anchors: Option<ExitAnchors>,
        start: Coord2,
        potion: Option<Coord2>,
    ) -> Self {
        let mine_count = grid.count_content(CellContent::Hazard);
        Self {
            grid,
            config,
            exit_anchors,
            start,
            player: start,
            mine_count,
            potion,
            state: BoardState::default(),
            triggered_hazard: None,
        }
    }

    /// Builds a board from hand-placed contents, for custom rooms and tests.
    ///
    /// Adjacency counts are recomputed, cell states are kept as given.
    pub fn from_layout(mut grid: Grid, start: Coord2) -> Result<Self> {
        let start = grid.validate_coords(start)?;
        calculate_adjacency(&mut grid);

        let config = LevelConfig {
            size: grid.size(),
            ..Default::default()
        };
        let potion = grid
            .coords()
            .find(|&coords| grid[coords].content == CellContent::Potion);

        Ok(Self::from_parts(grid, config, None, start, potion))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn width(&self) -> Coord {
        self.grid.width()
    }

    pub fn height(&self) -> Coord {
        self.grid.height()
    }

    pub fn entrance(&self) -> Compass {
        self.config.entrance
    }

    pub fn exit_anchors(&self) -> Option<ExitAnchors> {
        self.exit_anchors
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn potion(&self) -> Option<Coord2> {
        self.potion
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.grid.get(coords)
    }

    /// Content of a cell without changing any state, `None` when out of bounds.
    pub fn check_cell(&self, coords: Coord2) -> Option<CellContent> {
        self.grid.get(coords).map(|cell| cell.content)
    }

    pub fn movement_policy(&self) -> TraversalPolicy {
        self.config.movement
    }

    pub fn set_movement_policy(&mut self, policy: TraversalPolicy) {
        self.config.movement = policy;
    }

    /// Plans a walk from the player to `target` and moves the player to where it ends.
    ///
    /// Hidden targets are replaced by the nearest reachable known cell. Returns the path including
    /// the player's current cell first, or an empty path when there is nowhere to go or the level
    /// is over.
    pub fn move_player(&mut self, target: Coord2) -> Vec<Coord2> {
        if self.is_game_over() {
            return Vec::new();
        }

        let path = Pathfinder::new(&self.grid, self.config.movement).find_path(self.player, target);
        if let Some(&last) = path.last() {
            log::debug!("Player moves {:?} -> {:?} in {} steps", self.player, last, path.len() - 1);
            self.player = last;
        }
        path
    }
}
