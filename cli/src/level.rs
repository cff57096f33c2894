use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use cavern_core::*;
use clap::Args;

/// Options describing the level to generate. Flags override values from `--config`.
#[derive(Args, Debug, Default)]
pub struct LevelArgs {
    /// TOML file holding a level configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub width: Option<Coord>,

    #[arg(long, global = true)]
    pub height: Option<Coord>,

    /// Edge the player enters through: north, east, south or west
    #[arg(long, global = true)]
    pub entrance: Option<Compass>,

    /// Fraction of the board covered by hazards
    #[arg(long, global = true)]
    pub density: Option<f64>,

    #[arg(long, global = true)]
    pub no_potion: bool,

    /// Let the player walk over flagged cells
    #[arg(long, global = true)]
    pub walk_on_flags: bool,

    /// Seed for the generator, random when omitted
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Generate a shop instead of a cavern
    #[arg(long, global = true)]
    pub shop: bool,
}

impl LevelArgs {
    pub fn level_config(&self) -> Result<LevelConfig> {
        let base = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                parse_config(&text).with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => LevelConfig::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut config: LevelConfig) -> LevelConfig {
        if let Some(width) = self.width {
            config.size.0 = width;
        }
        if let Some(height) = self.height {
            config.size.1 = height;
        }
        if let Some(entrance) = self.entrance {
            config.entrance = entrance;
        }
        if let Some(density) = self.density {
            config.mine_density = density;
        }
        if self.no_potion {
            config.potion = false;
        }
        if self.walk_on_flags {
            config.movement.flags_block = false;
        }
        config
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    pub fn generate(&self) -> Result<Board> {
        let config = self.level_config()?;
        let board = if self.shop {
            ShopBoardGenerator.generate(config)
        } else {
            let seed = self.seed();
            log::info!("Using seed {}", seed);
            RandomBoardGenerator::new(seed).generate(config)
        };
        board.context("Failed to generate board")
    }
}

pub fn parse_config(text: &str) -> Result<LevelConfig> {
    let config: LevelConfig = toml::from_str(text)?;
    Ok(config)
}
