//! Persistence snapshot of an entity
//!
//! The engine performs no file I/O; the save layer stores this structure
//! however it likes (JSON helpers are provided).

use super::{Entity, MAX_LEVEL};
use crate::class::CharacterClass;
use crate::error::{EngineError, Result};
use crate::types::{Attribute, Resist, StatusEffect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub name: String,
    pub class_name: Option<String>,
    pub attributes: BTreeMap<Attribute, i32>,
    pub resists: BTreeMap<Resist, i32>,
    pub meta: SnapshotMeta,
    pub status: BTreeMap<StatusEffect, i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub level: u32,
    pub spells: bool,
    pub sneaks: bool,
    pub damage: i32,
}

impl EntitySnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(EngineError::InvalidSnapshot(msg));

        if self.meta.level == 0 || self.meta.level > MAX_LEVEL {
            return invalid(format!("level {} outside 1..={}", self.meta.level, MAX_LEVEL));
        }
        if self.meta.damage < 0 {
            return invalid(format!("negative damage {}", self.meta.damage));
        }
        if let Some((attribute, value)) = self.attributes.iter().find(|(_, v)| **v < 0) {
            return invalid(format!("negative {} attribute {}", attribute, value));
        }
        if let Some((resist, value)) = self.resists.iter().find(|(_, v)| **v < 0) {
            return invalid(format!("negative {} resist {}", resist, value));
        }
        if let Some((effect, value)) = self.status.iter().find(|(_, v)| **v < 0) {
            return invalid(format!("negative {} countdown {}", effect, value));
        }
        Ok(())
    }
}

impl Entity {
    pub fn to_snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            name: self.name.clone(),
            class_name: self.class.map(|c| c.name().to_string()),
            attributes: self.attributes.clone(),
            resists: self.resists.clone(),
            meta: SnapshotMeta {
                level: self.level,
                spells: self.spells(),
                sneaks: self.sneaks(),
                damage: self.damage,
            },
            status: self.status_effects.clone(),
        }
    }

    /// Rebuild an entity from a snapshot
    ///
    /// Stored resists already include the class bonus, so it is not applied
    /// again. Entities whose points are fully allocated come back finalized.
    /// Current hit points and magic are not part of a snapshot: a finalized
    /// entity is restored at full hit points and magic.
    ///
    /// Levels outside `1..=MAX_LEVEL`, negative values and attributes that
    /// spend more than the point limit are rejected.
    pub fn from_snapshot(snapshot: &EntitySnapshot) -> Result<Self> {
        snapshot.validate()?;

        let mut entity = Entity::with_level(snapshot.meta.level);
        entity.name = snapshot.name.clone();

        if let Some(name) = &snapshot.class_name {
            let class = CharacterClass::from_str(name)
                .map_err(|_| EngineError::UnknownClass(name.clone()))?;
            entity.class = Some(class);
            entity.class_resists_applied = true;
        }

        entity.attributes.extend(snapshot.attributes.iter().map(|(k, v)| (*k, *v)));
        entity.resists.extend(snapshot.resists.iter().map(|(k, v)| (*k, *v)));
        entity.status_effects.extend(snapshot.status.iter().map(|(k, v)| (*k, *v)));
        entity.damage = snapshot.meta.damage;

        let free = entity.free_attribute_points();
        if free < 0 {
            return Err(EngineError::InvalidSnapshot(format!(
                "attributes exceed the level {} point limit by {}",
                entity.level,
                -free
            )));
        }
        if free == 0 {
            entity.complete_initialization()?;
        } else {
            tracing::debug!(
                free = entity.free_attribute_points(),
                "restored entity still allocating"
            );
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use crate::{allocation, config::GameConstants};

    #[test]
    fn test_round_trip() {
        let mut rng = GameRng::new(11);
        let constants = GameConstants::default();
        let mut entity = Entity::new();
        entity.name = "Pallindrome".to_string();
        entity.select_class(CharacterClass::Rogue).unwrap();
        allocation::seed_attributes(&mut entity, &constants, &mut rng).unwrap();
        entity.apply_status(crate::types::StatusEffect::Fast, 3);

        let snapshot = entity.to_snapshot();
        let restored = Entity::from_snapshot(&snapshot).unwrap();

        assert_eq!(restored.name, entity.name);
        assert_eq!(restored.class(), Some(CharacterClass::Rogue));
        assert_eq!(restored.attributes(), entity.attributes());
        assert_eq!(restored.resists(), entity.resists());
        assert_eq!(restored.status_effects(), entity.status_effects());
        assert_eq!(restored.resist(Resist::Detection), 10);
        assert!(!restored.is_initialized());
    }

    #[test]
    fn test_json_shape() {
        let mut entity = Entity::new();
        entity.name = "Jeff".to_string();
        entity.select_class(CharacterClass::Mage).unwrap();

        let json = entity.to_snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Jeff");
        assert_eq!(value["class_name"], "Mage");
        assert_eq!(value["attributes"]["wisdom"], 1);
        assert_eq!(value["resists"]["frost"], 5);
        assert_eq!(value["meta"]["spells"], true);
        assert_eq!(value["meta"]["sneaks"], false);
        assert_eq!(value["status"]["blind"], 0);

        let parsed = EntitySnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, entity.to_snapshot());
    }

    #[test]
    fn test_unknown_class_rejected() {
        let mut snapshot = Entity::new().to_snapshot();
        snapshot.class_name = Some("Necromancer".to_string());
        assert!(matches!(
            Entity::from_snapshot(&snapshot),
            Err(EngineError::UnknownClass(name)) if name == "Necromancer"
        ));
    }

    #[test]
    fn test_fully_allocated_snapshot_restores_initialized() {
        let mut entity = Entity::new();
        entity.select_class(CharacterClass::Warrior).unwrap();
        while entity.free_attribute_points() > 0 {
            entity.increment_attribute(Attribute::Strength).unwrap();
        }
        entity.complete_initialization().unwrap();
        entity.apply_damage(3);

        assert!(entity.hitpoints() < entity.max_hitpoints());

        let restored = Entity::from_snapshot(&entity.to_snapshot()).unwrap();
        assert!(restored.is_initialized());
        assert_eq!(restored.max_hitpoints(), entity.max_hitpoints());
        // Current hit points are not saved
        assert_eq!(restored.hitpoints(), restored.max_hitpoints());
        assert_eq!(restored.damage(), 3);
        assert_eq!(restored.resist(Resist::Death), 10);
    }

    #[test]
    fn test_classless_snapshot() {
        let snapshot = Entity::new().to_snapshot();
        assert!(snapshot.class_name.is_none());
        let restored = Entity::from_snapshot(&snapshot).unwrap();
        assert!(restored.class().is_none());
    }

    #[test]
    fn test_out_of_range_level_rejected() {
        let mut snapshot = Entity::new().to_snapshot();
        for level in [0, MAX_LEVEL + 1, 1_000_000_000, u32::MAX] {
            snapshot.meta.level = level;
            assert!(
                matches!(Entity::from_snapshot(&snapshot), Err(EngineError::InvalidSnapshot(_))),
                "level {} accepted",
                level
            );
        }

        snapshot.meta.level = MAX_LEVEL;
        let restored = Entity::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored.level(), MAX_LEVEL);
    }

    #[test]
    fn test_over_allocated_snapshot_rejected() {
        let mut snapshot = Entity::new().to_snapshot();
        snapshot.attributes.insert(Attribute::Health, 100);
        assert!(matches!(
            Entity::from_snapshot(&snapshot),
            Err(EngineError::InvalidSnapshot(_))
        ));

        snapshot.attributes.insert(Attribute::Health, i32::MAX);
        snapshot.attributes.insert(Attribute::Attack, i32::MAX);
        assert!(matches!(
            Entity::from_snapshot(&snapshot),
            Err(EngineError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_negative_values_rejected() {
        let base = Entity::new().to_snapshot();

        let mut snapshot = base.clone();
        snapshot.attributes.insert(Attribute::Focus, -3);
        assert!(matches!(Entity::from_snapshot(&snapshot), Err(EngineError::InvalidSnapshot(_))));

        let mut snapshot = base.clone();
        snapshot.resists.insert(Resist::Fire, -1);
        assert!(matches!(Entity::from_snapshot(&snapshot), Err(EngineError::InvalidSnapshot(_))));

        let mut snapshot = base.clone();
        snapshot.status.insert(StatusEffect::Blind, -2);
        assert!(matches!(Entity::from_snapshot(&snapshot), Err(EngineError::InvalidSnapshot(_))));

        let mut snapshot = base;
        snapshot.meta.damage = -5;
        assert!(matches!(Entity::from_snapshot(&snapshot), Err(EngineError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_restored_budget_never_negative() {
        let mut snapshot = Entity::with_level(2).to_snapshot();
        snapshot.attributes.insert(Attribute::Strength, 20);
        let restored = Entity::from_snapshot(&snapshot).unwrap();
        assert!(restored.free_attribute_points() >= 0);
        assert_eq!(restored.free_attribute_points(), 35 - 26);
    }
}
