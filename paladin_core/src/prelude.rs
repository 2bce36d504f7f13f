//! Prelude module for convenient imports
//!
//! ```rust
//! use paladin_core::prelude::*;
//! ```

// Entity model
pub use crate::class::CharacterClass;
pub use crate::entity::{Entity, EntitySnapshot, StatName};
pub use crate::types::{Attribute, Check, Resist, StatusEffect};

// Rolls and allocation
pub use crate::allocation::{reroll, seed_attributes, SeedReport};
pub use crate::rng::GameRng;
pub use crate::roll::{AttackOutcome, CheckSource, RollEngine};

// Maps
pub use crate::map::{Level, MapGenerator, Tile, TileKind};

// Config and errors
pub use crate::config::GameConstants;
pub use crate::error::{AllocationError, EngineError};
