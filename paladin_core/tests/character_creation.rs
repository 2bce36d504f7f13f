//! Integration test: Select class -> Seed -> Allocate -> Finalize -> Play -> Save
//!
//! Walks an entity through the whole creation flow the menus drive.

use paladin_core::allocation::{reroll, roll_base_attributes, seed_attributes};
use paladin_core::prelude::*;
use strum::IntoEnumIterator;

/// Spend the remaining points round-robin over the base attributes
fn spend_remaining(entity: &mut Entity) {
    let mut attributes = Attribute::BASE.iter().cycle();
    while entity.free_attribute_points() > 0 {
        let attribute = attributes.next().copied().unwrap_or(Attribute::Health);
        entity.increment_attribute(attribute).unwrap();
    }
}

#[test]
fn test_full_creation_flow() {
    let constants = GameConstants::bundled();
    let mut rng = GameRng::new(2017);

    let mut player = Entity::new();
    player.select_class(CharacterClass::Warrior).unwrap();
    let report = seed_attributes(&mut player, &constants, &mut rng).unwrap();
    assert!(report.free_after_roll > 10 && report.free_after_roll < 16);
    assert_eq!(report.free_after_distribution, 5);

    // Not finished until every point is spent
    assert!(matches!(
        player.complete_initialization(),
        Err(EngineError::Allocation(AllocationError::PointsRemaining(5)))
    ));

    spend_remaining(&mut player);
    player.complete_initialization().unwrap();

    assert!(player.is_alive());
    assert_eq!(player.hitpoints(), player.max_hitpoints());
    assert_eq!(player.magic(), player.max_magic());
    assert_eq!(player.resist(Resist::Death), 10);
    assert!(player.get_stat(StatName::Bash) > 1);
    assert_eq!(player.get_stat(StatName::Conjuration), 1);

    // Play a few turns
    player.apply_status(StatusEffect::Paralyzed, 2);
    let roller = RollEngine::new(10);
    let outcome = roller.attack_roll(&player, 10, &mut rng).unwrap();
    assert_ne!(outcome, AttackOutcome::Zero);
    player.advance_turn();
    player.advance_turn();
    assert_eq!(player.status(StatusEffect::Paralyzed), 0);

    player.apply_damage(3);
    player.heal(0);
    assert_eq!(player.hitpoints(), player.max_hitpoints());

    // Save and restore
    player.name = "Flargin".to_string();
    let json = player.to_snapshot().to_json().unwrap();
    let restored = Entity::from_snapshot(&EntitySnapshot::from_json(&json).unwrap()).unwrap();
    assert_eq!(restored.name, "Flargin");
    assert_eq!(restored.class(), Some(CharacterClass::Warrior));
    assert_eq!(restored.attributes(), player.attributes());
    assert_eq!(restored.resists(), player.resists());
    assert_eq!(restored.status_effects(), player.status_effects());
    assert!(restored.is_initialized());
}

#[test]
fn test_seed_loop_always_lands_in_window() {
    let constants = GameConstants::default();
    let mut rng = GameRng::new(1000);

    for _ in 0..1000 {
        let mut entity = Entity::new();
        roll_base_attributes(&mut entity, &constants, &mut rng).unwrap();
        let free = entity.free_attribute_points();
        assert!(free > 10 && free < 16, "free points {}", free);
    }
}

#[test]
fn test_every_class_seeds_to_reserve() {
    let constants = GameConstants::default();
    let mut rng = GameRng::new(31);

    for class in CharacterClass::iter() {
        let mut entity = Entity::new();
        entity.select_class(class).unwrap();
        seed_attributes(&mut entity, &constants, &mut rng).unwrap();
        assert_eq!(entity.free_attribute_points(), constants.seeding.reserve);

        for (resist, bonus) in class.base_resists() {
            assert_eq!(entity.resist(*resist), *bonus, "{} {}", class, resist);
        }
        for skill in class.granted_skills() {
            assert!(entity.get_stat(*skill) > 1, "{} {}", class, skill);
        }
    }
}

#[test]
fn test_rerolls_never_stack_resists() {
    let constants = GameConstants::default();
    let mut rng = GameRng::new(64);

    let mut entity = Entity::new();
    entity.select_class(CharacterClass::Mage).unwrap();
    for _ in 0..10 {
        reroll(&mut entity, &constants, &mut rng).unwrap();
        assert_eq!(entity.resist(Resist::Fire), 5);
        assert_eq!(entity.resist(Resist::Frost), 5);
        assert_eq!(entity.resist(Resist::Death), 0);
    }
    assert!(entity.spells());
}

#[test]
fn test_entity_on_generated_map() {
    let constants = GameConstants::default();
    let mut maps = MapGenerator::from_constants(&constants.map, 7);

    let level = maps.get_level(0).unwrap();
    let (row, col) = level.hallway_tiles()[0];
    let tile = level.get_mut(row, col).unwrap();
    tile.occupants.push(paladin_core::EntityId(0));
    tile.visited = true;

    let level = maps.get_level(0).unwrap();
    assert!(level.get(row, col).unwrap().has_occupants());
    assert!(matches!(
        maps.get_level(5),
        Err(EngineError::LevelNotFound { requested: 5, next: 1 })
    ));
}
