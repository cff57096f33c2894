#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use minefield::*;
pub use pathfinder::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod minefield;
mod pathfinder;
mod types;

/// Smallest width or height that leaves room for exits and the safety zone.
pub const MIN_SIDE: Coord = 5;

pub const DEFAULT_MINE_DENSITY: f64 = 0.15;

/// Everything needed to generate one level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub size: Coord2,
    /// Pixel size of a cell, carried for the presentation layer only.
    pub cell_size: (u16, u16),
    /// Edge the player arrives through. Its exit stays sealed.
    pub entrance: Compass,
    pub mine_density: f64,
    /// Whether a cavern level gets its single potion.
    pub potion: bool,
    pub movement: TraversalPolicy,
}

impl LevelConfig {
    pub fn new(size: Coord2, entrance: Compass) -> Self {
        Self {
            size,
            entrance,
            ..Default::default()
        }
    }

    pub fn with_density(self, mine_density: f64) -> Self {
        Self {
            mine_density,
            ..self
        }
    }

    pub fn without_potion(self) -> Self {
        Self {
            potion: false,
            ..self
        }
    }

    /// Number of hazards this configuration asks for.
    pub fn mine_quota(&self) -> Result<CellCount> {
        mine_quota(self.size, self.mine_density)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width < MIN_SIDE || height < MIN_SIDE {
            log::warn!("Rejected board size {}x{}", width, height);
            return Err(GameError::BoardTooSmall { width, height });
        }
        self.mine_quota()?;
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            size: (10, 10),
            cell_size: (32, 32),
            entrance: Compass::South,
            mine_density: DEFAULT_MINE_DENSITY,
            potion: true,
            movement: TraversalPolicy::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// A hazard was entered, the level is lost.
    HitHazard,
    /// An exit was entered, the level is complete.
    ReachedExit,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitHazard => true,
            ReachedExit => true,
        }
    }

    /// Whether this outcome ended the level.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitHazard | Self::ReachedExit)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitHazard, _) => HitHazard,
            (_, HitHazard) => HitHazard,
            (ReachedExit, _) => ReachedExit,
            (_, ReachedExit) => ReachedExit,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
