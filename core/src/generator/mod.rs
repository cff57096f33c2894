use crate::*;
pub use random::*;
pub use shop::*;

mod random;
mod shop;

pub trait BoardGenerator {
    fn generate(self, config: LevelConfig) -> Result<Board>;
}
