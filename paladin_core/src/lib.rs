//! paladin_core - Character, roll and level engine for a turn-based roguelike
//!
//! This library provides:
//! - Entity: Attributes, resists, status effects and derived stats
//! - CharacterClass: Warrior, Mage and Rogue archetypes
//! - RollEngine: Attribute-modulated range rolls for checks, attacks and resists
//! - Allocation: Class-biased attribute seeding under a point budget
//! - MapGenerator: Lazily generated tile grids, one per dungeon level

pub mod allocation;
pub mod class;
pub mod config;
pub mod entity;
pub mod error;
pub mod map;
pub mod prelude;
pub mod rng;
pub mod roll;
pub mod types;

// Re-export core types for convenience
pub use allocation::{reroll, seed_attributes, SeedReport};
pub use class::CharacterClass;
pub use config::{ConfigError, GameConstants};
pub use entity::{Entity, EntitySnapshot, SnapshotMeta, StatName};
pub use error::{AllocationError, EngineError, Result};
pub use map::{Level, MapGenerator, Tile, TileKind};
pub use rng::GameRng;
pub use roll::{classify_attack, AttackOutcome, CheckSource, RollEngine};
pub use types::{Attribute, Check, EntityId, ItemId, Resist, StatusEffect};
