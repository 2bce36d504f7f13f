//! Attribute allocation - Class-biased seeding of a fresh entity
//!
//! Seeding runs in three steps:
//! 1. Roll every base attribute with the seed roller until the free points
//!    land strictly inside the seed window (rejection sampling, capped).
//! 2. Spend free points above the reserve on random base attributes, keeping
//!    only draws that hit the class's preferred attributes or health.
//! 3. Apply the class's base resists if they are not applied yet.
//!
//! The reserve is left for the player to spend through
//! `Entity::increment_attribute`.

use crate::config::GameConstants;
use crate::entity::Entity;
use crate::error::{AllocationError, EngineError, Result};
use crate::roll::RollEngine;
use crate::types::Attribute;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a seeding pass did, for UI messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Rejection-sampling attempts used by the base roll
    pub attempts: u32,
    /// Free points right after the base roll
    pub free_after_roll: i32,
    /// Free points left for the player
    pub free_after_distribution: i32,
    /// Whether class resists were added by this pass
    pub resists_applied: bool,
}

/// Roll all base attributes until free points fall inside the seed window
///
/// Returns the number of attempts used. On failure the base attributes are
/// reset to their defaults.
pub fn roll_base_attributes<R: Rng>(
    entity: &mut Entity,
    constants: &GameConstants,
    rng: &mut R,
) -> Result<u32> {
    ensure_unlocked(entity)?;

    let seeding = &constants.seeding;
    let roller = RollEngine::new(seeding.upper_bound).with_constants(constants.roll.clone());

    for attempt in 1..=seeding.max_attempts {
        for attribute in Attribute::BASE {
            let value = roller.roll(&*entity, None, true, rng)?;
            entity.set_attribute(attribute, value);
        }

        let free = entity.free_attribute_points();
        if free > seeding.window_min && free < seeding.window_max {
            tracing::debug!(attempts = attempt, free, "base attributes rolled");
            return Ok(attempt);
        }
    }

    for attribute in Attribute::BASE {
        entity.set_attribute(attribute, Attribute::DEFAULT_VALUE);
    }
    tracing::warn!(
        attempts = seeding.max_attempts,
        window_min = seeding.window_min,
        window_max = seeding.window_max,
        "seed window never reached"
    );
    Err(EngineError::Seeding {
        attempts: seeding.max_attempts,
    })
}

/// Funnel free points above the reserve into preferred attributes
///
/// Health is always preferred once a class is chosen. Without a class nothing
/// is distributed. Returns the number of points spent.
pub fn distribute_remainder<R: Rng>(
    entity: &mut Entity,
    constants: &GameConstants,
    rng: &mut R,
) -> Result<u32> {
    ensure_unlocked(entity)?;

    let Some(class) = entity.class() else {
        tracing::debug!("no class selected, skipping remainder distribution");
        return Ok(0);
    };

    let preferred = class.preferred_attributes();
    let mut spent = 0;
    while entity.free_attribute_points() > constants.seeding.reserve {
        let attribute = Attribute::BASE[rng.gen_range(0..Attribute::BASE.len())];
        if attribute == Attribute::Health || preferred.contains(&attribute) {
            entity.set_attribute(attribute, entity.attribute(attribute) + 1);
            spent += 1;
        }
    }

    tracing::debug!(%class, spent, "remainder distributed");
    Ok(spent)
}

/// Run the full seed phase on the entity's current attributes
pub fn seed_attributes<R: Rng>(
    entity: &mut Entity,
    constants: &GameConstants,
    rng: &mut R,
) -> Result<SeedReport> {
    let attempts = roll_base_attributes(entity, constants, rng)?;
    let free_after_roll = entity.free_attribute_points();
    distribute_remainder(entity, constants, rng)?;
    let resists_applied = entity.apply_class_resists();

    Ok(SeedReport {
        attempts,
        free_after_roll,
        free_after_distribution: entity.free_attribute_points(),
        resists_applied,
    })
}

/// Reset to defaults and seed again; the class is kept
pub fn reroll<R: Rng>(
    entity: &mut Entity,
    constants: &GameConstants,
    rng: &mut R,
) -> Result<SeedReport> {
    ensure_unlocked(entity)?;
    entity.initialize_attributes();
    seed_attributes(entity, constants, rng)
}

fn ensure_unlocked(entity: &Entity) -> Result<()> {
    if entity.is_initialized() {
        return Err(AllocationError::Locked.into());
    }
    Ok(())
}
