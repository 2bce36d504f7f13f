//! Entity - Simulation state for a player or NPC
//!
//! Attributes, resists and status effects are keyed by enum. Derived stats are
//! computed on demand from the formula table, except hit points and magic,
//! which are snapshotted once allocation is finalized.

mod formula;
mod snapshot;

pub use formula::{FormulaMode, StatFormula, StatName};
pub use snapshot::{EntitySnapshot, SnapshotMeta};

use crate::class::CharacterClass;
use crate::error::{AllocationError, EngineError, Result};
use crate::roll::CheckSource;
use crate::types::{Attribute, Check, Resist, StatusEffect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Attribute points granted per level
pub const POINTS_PER_LEVEL: i32 = 10;
/// Attribute points granted regardless of level
pub const BASE_ATTRIBUTE_POINTS: i32 = 15;
/// Highest level an entity can reach
pub const MAX_LEVEL: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    // === Identity ===
    /// Display name, assigned when the entity is saved
    pub name: String,
    level: u32,
    class: Option<CharacterClass>,

    // === Allocatable state ===
    attributes: BTreeMap<Attribute, i32>,
    resists: BTreeMap<Resist, i32>,
    status_effects: BTreeMap<StatusEffect, i32>,
    /// Whether the current class's base resists are already in `resists`
    class_resists_applied: bool,

    // === Play state ===
    init_complete: bool,
    hitpoints: i32,
    magic: i32,
    max_hitpoints: i32,
    max_magic: i32,
    /// Total damage taken through `apply_damage`
    damage: i32,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Create a level 1 entity with default attributes and no class
    pub fn new() -> Self {
        Self::with_level(1)
    }

    /// Create an entity at a given level, clamped to `1..=MAX_LEVEL`
    pub fn with_level(level: u32) -> Self {
        let mut entity = Entity {
            name: String::new(),
            level: level.clamp(1, MAX_LEVEL),
            class: None,
            attributes: BTreeMap::new(),
            resists: BTreeMap::new(),
            status_effects: BTreeMap::new(),
            class_resists_applied: false,
            init_complete: false,
            hitpoints: 0,
            magic: 0,
            // Placeholders until complete_initialization
            max_hitpoints: 1,
            max_magic: 1,
            damage: 0,
        };
        entity.initialize_attributes();
        entity
    }

    /// Reset attributes to 1 and resists/status effects to 0
    ///
    /// Class resists are cleared too; the next seed or class selection
    /// re-applies them.
    pub fn initialize_attributes(&mut self) {
        self.attributes = Attribute::iter()
            .map(|a| (a, Attribute::DEFAULT_VALUE))
            .collect();
        self.resists = Resist::iter().map(|r| (r, 0)).collect();
        self.status_effects = StatusEffect::iter().map(|s| (s, 0)).collect();
        self.class_resists_applied = false;
    }

    // === Accessors ===

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn class(&self) -> Option<CharacterClass> {
        self.class
    }

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(&attribute).copied().unwrap_or(0)
    }

    pub fn attributes(&self) -> &BTreeMap<Attribute, i32> {
        &self.attributes
    }

    pub fn resist(&self, resist: Resist) -> i32 {
        self.resists.get(&resist).copied().unwrap_or(0)
    }

    pub fn resists(&self) -> &BTreeMap<Resist, i32> {
        &self.resists
    }

    pub fn status(&self, effect: StatusEffect) -> i32 {
        self.status_effects.get(&effect).copied().unwrap_or(0)
    }

    pub fn status_effects(&self) -> &BTreeMap<StatusEffect, i32> {
        &self.status_effects
    }

    pub fn is_initialized(&self) -> bool {
        self.init_complete
    }

    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    pub fn magic(&self) -> i32 {
        self.magic
    }

    pub fn max_hitpoints(&self) -> i32 {
        self.max_hitpoints
    }

    pub fn max_magic(&self) -> i32 {
        self.max_magic
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    // === Point budget ===

    /// Sum of all attribute values, luck included
    pub fn attribute_sum(&self) -> i32 {
        self.attributes
            .values()
            .fold(0i32, |sum, value| sum.saturating_add(*value))
    }

    /// `level * 10 + 15`
    pub fn attribute_point_limit(&self) -> i32 {
        self.level.min(MAX_LEVEL) as i32 * POINTS_PER_LEVEL + BASE_ATTRIBUTE_POINTS
    }

    pub fn free_attribute_points(&self) -> i32 {
        self.attribute_point_limit().saturating_sub(self.attribute_sum())
    }

    /// Spend one free point on an attribute, returning its new value
    pub fn increment_attribute(&mut self, attribute: Attribute) -> Result<i32> {
        if self.init_complete {
            return Err(AllocationError::Locked.into());
        }
        if self.free_attribute_points() <= 0 {
            return Err(AllocationError::NoFreePoints.into());
        }
        let value = self.attributes.entry(attribute).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    pub(crate) fn set_attribute(&mut self, attribute: Attribute, value: i32) {
        self.attributes.insert(attribute, value);
    }

    // === Class ===

    /// Take a class; it cannot be changed afterwards
    pub fn select_class(&mut self, class: CharacterClass) -> Result<()> {
        if self.class.is_some() {
            return Err(EngineError::ClassAlreadySelected);
        }
        self.class = Some(class);
        self.apply_class_resists();
        tracing::debug!(%class, "class selected");
        Ok(())
    }

    /// Add the class's base resists unless they are already applied
    ///
    /// Returns whether anything was added.
    pub(crate) fn apply_class_resists(&mut self) -> bool {
        let Some(class) = self.class else {
            return false;
        };
        if self.class_resists_applied {
            return false;
        }
        for (resist, bonus) in class.base_resists() {
            *self.resists.entry(*resist).or_insert(0) += bonus;
        }
        self.class_resists_applied = true;
        true
    }

    /// Whether the class grants a spellbook
    pub fn spells(&self) -> bool {
        self.class.is_some_and(|c| c.spellbook_enabled())
    }

    /// Whether the class can sneak
    pub fn sneaks(&self) -> bool {
        self.class.is_some_and(|c| c.sneak_enabled())
    }

    /// Stats that evaluate through the formula table for this entity
    pub fn enabled_stats(&self) -> BTreeSet<StatName> {
        let mut enabled: BTreeSet<StatName> = StatName::CORE.into_iter().collect();
        if let Some(class) = self.class {
            enabled.extend(class.granted_skills().iter().copied());
        }
        enabled
    }

    // === Derived stats ===

    /// Evaluate a derived stat; locked stats report 1
    pub fn get_stat(&self, stat: StatName) -> i32 {
        if !self.enabled_stats().contains(&stat) {
            return StatName::LOCKED_VALUE;
        }
        let formula = stat.formula();
        let raw_sum: i32 = formula.attributes.iter().map(|a| self.attribute(*a)).sum();
        formula.evaluate(raw_sum, self.level, self.attribute_point_limit())
    }

    /// Evaluate a derived stat by its snake_case name
    pub fn stat_by_name(&self, name: &str) -> Result<i32> {
        let stat = StatName::from_str(name).map_err(|_| EngineError::UnknownStat(name.to_string()))?;
        Ok(self.get_stat(stat))
    }

    /// Lock the allocation and snapshot hit points and magic
    ///
    /// Calling this again after success is a no-op.
    pub fn complete_initialization(&mut self) -> Result<()> {
        if self.init_complete {
            return Ok(());
        }
        let free = self.free_attribute_points();
        if free != 0 {
            return Err(AllocationError::PointsRemaining(free).into());
        }
        self.hitpoints = self.get_stat(StatName::Hitpoints);
        self.magic = self.get_stat(StatName::Magic);
        self.max_hitpoints = self.hitpoints;
        self.max_magic = self.magic;
        self.init_complete = true;
        tracing::debug!(
            hitpoints = self.hitpoints,
            magic = self.magic,
            "entity initialization complete"
        );
        Ok(())
    }

    // === Turn processing ===

    /// Pre-turn hook: tick every active status effect down by one
    pub fn advance_turn(&mut self) {
        for turns in self.status_effects.values_mut() {
            if *turns > 0 {
                *turns -= 1;
            }
        }
    }

    /// Set a status countdown, keeping the longer of current and new
    pub fn apply_status(&mut self, effect: StatusEffect, turns: i32) {
        let current = self.status_effects.entry(effect).or_insert(0);
        *current = (*current).max(turns);
    }

    pub fn is_status_active(&self, effect: StatusEffect) -> bool {
        self.status(effect) > 0
    }

    // === Resources ===

    /// Heal by `points`, capped at max; 0 means a full heal
    pub fn heal(&mut self, points: u32) {
        if points == 0 {
            self.hitpoints = self.max_hitpoints;
        } else {
            self.hitpoints = self.max_hitpoints.min(self.hitpoints.saturating_add(points as i32));
        }
    }

    /// Restore magic by `points`, capped at max; 0 means a full restore
    pub fn restore_magic(&mut self, points: u32) {
        if points == 0 {
            self.magic = self.max_magic;
        } else {
            self.magic = self.max_magic.min(self.magic.saturating_add(points as i32));
        }
    }

    /// Take damage, never dropping below 0 hit points; returns remaining hit points
    pub fn apply_damage(&mut self, points: u32) -> i32 {
        let points = points.min(i32::MAX as u32) as i32;
        self.damage = self.damage.saturating_add(points);
        self.hitpoints = (self.hitpoints - points).max(0);
        self.hitpoints
    }

    pub fn is_alive(&self) -> bool {
        self.hitpoints > 0
    }

    /// Bring the entity back at 1 hit point
    pub fn revive(&mut self) {
        self.hitpoints = 1;
    }

    pub fn kill(&mut self) {
        self.hitpoints = 0;
    }

    /// Hit points as a fraction of max; `None` until initialized
    pub fn hit_percent(&self) -> Option<f64> {
        self.init_complete
            .then(|| ratio(self.hitpoints, self.max_hitpoints))
    }

    /// Magic as a fraction of max; `None` until initialized
    pub fn magic_percent(&self) -> Option<f64> {
        self.init_complete.then(|| ratio(self.magic, self.max_magic))
    }
}

fn ratio(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    current as f64 / max as f64
}

impl CheckSource for Entity {
    fn check_value(&self, check: Check) -> i32 {
        match check {
            Check::Attribute(attribute) => self.attribute(attribute),
            Check::Resist(resist) => self.resist(resist),
        }
    }

    fn attribute_point_limit(&self) -> i32 {
        Entity::attribute_point_limit(self)
    }
}
