//! Map generation - Sequential, lazily created levels

mod level;
mod tile;

pub use level::Level;
pub use tile::{Tile, TileKind};

use crate::config::MapConstants;
use crate::error::{EngineError, Result};
use crate::rng::GameRng;

/// Owns every level of a dungeon, indexed by level number
#[derive(Debug, Clone)]
pub struct MapGenerator {
    height: usize,
    width: usize,
    hallway_density: f64,
    rng: GameRng,
    levels: Vec<Level>,
}

impl MapGenerator {
    pub fn new(height: usize, width: usize, seed: u64) -> Self {
        MapGenerator {
            height,
            width,
            hallway_density: MapConstants::default().hallway_density,
            rng: GameRng::new(seed),
            levels: Vec::new(),
        }
    }

    pub fn from_constants(constants: &MapConstants, seed: u64) -> Self {
        MapGenerator {
            height: constants.height,
            width: constants.width,
            hallway_density: constants.hallway_density,
            rng: GameRng::new(seed),
            levels: Vec::new(),
        }
    }

    /// (height, width) shared by every level
    pub fn bounds(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Generate the next level and return it
    pub fn add_level(&mut self) -> &mut Level {
        let level = Level::generate(self.height, self.width, self.hallway_density, &mut self.rng);
        self.levels.push(level);
        tracing::debug!(index = self.levels.len() - 1, "level added");
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }

    /// Fetch a level, creating it if it is the next one in sequence
    pub fn get_level(&mut self, index: usize) -> Result<&mut Level> {
        let next = self.levels.len();
        if index == next {
            return Ok(self.add_level());
        }
        self.levels
            .get_mut(index)
            .ok_or(EngineError::LevelNotFound { requested: index, next })
    }

    /// Fetch an existing level without creating one
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }
}
