//! Character sheet statistics on top of the creature-level engine

use super::{compute_derived_stats_with_rules, stored_passive_matches, DerivedStats};
use crate::config::RulesConfig;
use crate::error::ValidationError;
use crate::records::{Character, DiceRoll, HitDie, Weapon, WeaponProperty};
use crate::source::StatSource;
use crate::types::{Ability, DamageType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Death saving throw progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum DeathSaveState {
    /// Above zero hit points
    Alive,
    Dying { successes: u8, failures: u8 },
    Stable,
    Dead,
}

/// Hit dice of one size across all classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HitDicePool {
    pub remaining: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingStats {
    pub class_name: String,
    pub ability: Ability,
    pub save_dc: i32,
    pub attack_bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttack {
    pub name: String,
    pub ability: Ability,
    pub is_proficient: bool,
    pub is_equipped: bool,
    pub attack_bonus: i32,
    /// Weapon dice with the ability modifier folded in
    pub damage: DiceRoll,
    pub damage_type: DamageType,
}

/// Everything a full character sheet displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    #[serde(flatten)]
    pub base: DerivedStats,
    pub level: u32,
    /// Bonus the total level calls for; the stored bonus stays authoritative
    pub expected_proficiency_bonus: i32,
    pub hit_dice: BTreeMap<HitDie, HitDicePool>,
    pub spellcasting: Vec<SpellcastingStats>,
    pub weapon_attacks: Vec<WeaponAttack>,
    pub treasure_copper: u64,
    /// Pounds carried in weapons and equipment
    pub carried_weight: f64,
    pub death_saves: DeathSaveState,
    /// False when the stored passive perception disagrees with the derived one
    pub passive_perception_matches: bool,
}

/// Compute the full sheet for a character
pub fn compute_character_stats(
    character: &Character,
    rules: &RulesConfig,
) -> Result<CharacterStats, ValidationError> {
    let base = compute_derived_stats_with_rules(&character.creature_input(), rules)?;
    let level = total_level(character, rules)?;
    let hit_dice = hit_dice_pools(character)?;
    let death_saves = death_save_state(character)?;

    let mut weapon_attacks = Vec::with_capacity(character.weapons.len());
    for (index, weapon) in character.weapons.iter().enumerate() {
        weapon
            .damage
            .dice_roll
            .validate(&format!("weapons[{index}].damage.diceRoll"))?;
        weapon_attacks.push(weapon_attack(character, weapon, &base));
    }

    let spellcasting = character
        .classes
        .iter()
        .filter_map(|class| {
            let ability = class.spellcasting_ability?;
            let modifier = base.modifier(ability);
            Some(SpellcastingStats {
                class_name: class.name.clone(),
                ability,
                save_dc: rules
                    .spellcasting
                    .save_dc_base
                    .saturating_add(base.proficiency_bonus)
                    .saturating_add(modifier),
                attack_bonus: base.proficiency_bonus.saturating_add(modifier),
            })
        })
        .collect();

    let expected_proficiency_bonus = rules.proficiency.bonus_for_level(level);
    if expected_proficiency_bonus != character.proficiency_bonus {
        tracing::warn!(
            "{} has proficiency bonus {} but level {} calls for {}",
            character.creature.name,
            character.proficiency_bonus,
            level,
            expected_proficiency_bonus
        );
    }
    let passive_perception_matches = stored_passive_matches(&character.creature, &base);

    let carried_weight: f64 = character
        .weapons
        .iter()
        .map(|w| w.item.weight_or_zero())
        .chain(character.equipment.iter().map(|e| e.total_weight()))
        .sum();

    tracing::debug!(
        "Computed sheet for {} (level {}, {} weapon attacks)",
        character.creature.name,
        level,
        weapon_attacks.len()
    );

    Ok(CharacterStats {
        base,
        level,
        expected_proficiency_bonus,
        hit_dice,
        spellcasting,
        weapon_attacks,
        treasure_copper: character.treasure.value_in_copper(),
        carried_weight,
        death_saves,
        passive_perception_matches,
    })
}

fn total_level(character: &Character, rules: &RulesConfig) -> Result<u32, ValidationError> {
    let max_level = rules.proficiency.max_level;
    if character.classes.is_empty() {
        return Err(ValidationError::missing("classes"));
    }

    let mut total: u32 = 0;
    for (index, class) in character.classes.iter().enumerate() {
        if class.level == 0 || class.level > max_level {
            return Err(ValidationError::out_of_range(
                format!("classes[{index}].level"),
                i64::from(class.level),
                1,
                i64::from(max_level),
            ));
        }
        total += class.level;
    }

    if total > max_level {
        return Err(ValidationError::out_of_range(
            "classes",
            i64::from(total),
            1,
            i64::from(max_level),
        ));
    }
    Ok(total)
}

fn hit_dice_pools(character: &Character) -> Result<BTreeMap<HitDie, HitDicePool>, ValidationError> {
    let mut pools: BTreeMap<HitDie, HitDicePool> = BTreeMap::new();
    for (index, class) in character.classes.iter().enumerate() {
        if class.hit_dice.current > class.level {
            return Err(ValidationError::inconsistent(
                format!("classes[{index}].hitDice.current"),
                format!(
                    "{} remaining hit dice exceed class level {}",
                    class.hit_dice.current, class.level
                ),
            ));
        }
        let pool = pools.entry(class.hit_dice.sides).or_default();
        pool.remaining += class.hit_dice.current;
        pool.total += class.level;
    }
    Ok(pools)
}

fn death_save_state(character: &Character) -> Result<DeathSaveState, ValidationError> {
    let saves = character.death_saves;
    if saves.successes > 3 {
        return Err(ValidationError::out_of_range(
            "deathSaves.successes",
            i64::from(saves.successes),
            0,
            3,
        ));
    }
    if saves.failures > 3 {
        return Err(ValidationError::out_of_range(
            "deathSaves.failures",
            i64::from(saves.failures),
            0,
            3,
        ));
    }

    let state = if saves.failures == 3 {
        DeathSaveState::Dead
    } else if character.creature.hit_points.current > 0 {
        DeathSaveState::Alive
    } else if saves.successes == 3 {
        DeathSaveState::Stable
    } else {
        DeathSaveState::Dying {
            successes: saves.successes,
            failures: saves.failures,
        }
    };
    Ok(state)
}

fn weapon_attack(character: &Character, weapon: &Weapon, base: &DerivedStats) -> WeaponAttack {
    let strength = base.modifier(Ability::Strength);
    let dexterity = base.modifier(Ability::Dexterity);

    let (ability, modifier) = if weapon.has_property(WeaponProperty::Finesse) {
        if dexterity > strength {
            (Ability::Dexterity, dexterity)
        } else {
            (Ability::Strength, strength)
        }
    } else if weapon.item.is_ranged() {
        (Ability::Dexterity, dexterity)
    } else {
        (Ability::Strength, strength)
    };

    let is_proficient = character.is_proficient_with(weapon);
    let proficiency = if is_proficient {
        base.proficiency_bonus
    } else {
        0
    };
    let dice = weapon.damage.dice_roll;

    WeaponAttack {
        name: weapon.item.name.clone(),
        ability,
        is_proficient,
        is_equipped: weapon.is_equipped,
        attack_bonus: modifier.saturating_add(proficiency),
        damage: dice.with_modifier(dice.flat().saturating_add(modifier)),
        damage_type: weapon.damage.damage_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use crate::records::{Class, Creature, Equipment, Item, Race, SkillProficiency, WeaponDamage};
    use crate::types::{Alignment, ItemType, Skill};

    fn weapon(name: &str, item_type: ItemType, sides: u32) -> Weapon {
        Weapon {
            item: Item::new(name).with_type(item_type).with_weight(2.0),
            weapon_category: "martial".to_string(),
            damage: WeaponDamage {
                dice_roll: DiceRoll::new(1, sides),
                damage_type: DamageType::Piercing,
            },
            range: Default::default(),
            throw_range: Default::default(),
            is_equipped: false,
            properties: Vec::new(),
        }
    }

    fn bard() -> Character {
        let creature = Creature::new("Lyra")
            .with_score(Ability::Strength, 10)
            .with_score(Ability::Dexterity, 16)
            .with_score(Ability::Constitution, 12)
            .with_score(Ability::Intelligence, 11)
            .with_score(Ability::Wisdom, 12)
            .with_score(Ability::Charisma, 18);
        let mut character = Character::new(creature, Race::new("Half-Elf"), Alignment::ChaoticGood)
            .with_class(Class::new("Bard", 5, HitDie::D8).with_spellcasting(Ability::Charisma));
        character.proficiency_bonus = 3;
        character.is_jack_of_all_trades = true;
        character.creature.hit_points.current = 30;
        character.creature.hit_points.max = 33;
        character.creature.skills.insert(Skill::Performance, SkillProficiency::expertise());
        character.weapon_proficiencies = vec!["simple".to_string(), "Rapier".to_string()];

        let mut rapier = weapon("Rapier", ItemType::Melee, 8);
        rapier.properties.push(WeaponProperty::Finesse);
        rapier.is_equipped = true;
        character.weapons.push(rapier);
        character.weapons.push(weapon("Longbow", ItemType::Ranged, 8));
        character.equipment.push(Equipment {
            item: Item::new("Rations").with_weight(2.0),
            quantity: 5,
        });
        character.treasure.gold = 15;
        character.treasure.silver = 4;
        character
    }

    #[test]
    fn test_bard_sheet() {
        let stats = compute_character_stats(&bard(), &RulesConfig::default()).unwrap();

        assert_eq!(stats.level, 5);
        assert_eq!(stats.expected_proficiency_bonus, 3);
        // 4 + 3 * 2
        assert_eq!(stats.base.skill(Skill::Performance), 10);
        // 0 + floor(3 / 2)
        assert_eq!(stats.base.skill(Skill::Athletics), 1);

        assert_eq!(stats.spellcasting.len(), 1);
        assert_eq!(stats.spellcasting[0].save_dc, 8 + 3 + 4);
        assert_eq!(stats.spellcasting[0].attack_bonus, 7);

        assert_eq!(stats.hit_dice[&HitDie::D8], HitDicePool { remaining: 5, total: 5 });
        assert_eq!(stats.treasure_copper, 1540);
        assert!((stats.carried_weight - 14.0).abs() < f64::EPSILON);
        assert_eq!(stats.death_saves, DeathSaveState::Alive);
        assert!(stats.passive_perception_matches);
    }

    #[test]
    fn test_stored_passive_mismatch_reported() {
        let mut character = bard();
        // 10 + 1 (wis) + 1 (half of 3)
        character.creature.passive_perception = Some(12);
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert_eq!(stats.base.passive_perception, 12);
        assert!(stats.passive_perception_matches);

        character.creature.passive_perception = Some(15);
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert!(!stats.passive_perception_matches);
    }

    #[test]
    fn test_extreme_weapon_modifier_saturates() {
        let mut character = bard();
        character.weapons[0].damage.dice_roll = DiceRoll::new(1, 8).with_modifier(i32::MAX);
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert_eq!(stats.weapon_attacks[0].damage.modifier, Some(i32::MAX));
    }

    #[test]
    fn test_weapon_attacks() {
        let stats = compute_character_stats(&bard(), &RulesConfig::default()).unwrap();

        let rapier = &stats.weapon_attacks[0];
        assert_eq!(rapier.ability, Ability::Dexterity);
        assert!(rapier.is_proficient);
        assert_eq!(rapier.attack_bonus, 6);
        assert_eq!(rapier.damage.to_string(), "1d8+3");

        // Not proficient with martial ranged weapons
        let longbow = &stats.weapon_attacks[1];
        assert_eq!(longbow.ability, Ability::Dexterity);
        assert!(!longbow.is_proficient);
        assert_eq!(longbow.attack_bonus, 3);
    }

    #[test]
    fn test_missing_classes_rejected() {
        let mut character = bard();
        character.classes.clear();
        let err = compute_character_stats(&character, &RulesConfig::default()).unwrap_err();
        assert_eq!(err.field, "classes");
    }

    #[test]
    fn test_multiclass_level_cap() {
        let character = bard().with_class(Class::new("Warlock", 16, HitDie::D8));
        let err = compute_character_stats(&character, &RulesConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("classes", 21, 1, 20));
    }

    #[test]
    fn test_multiclass_hit_dice_pools() {
        let mut character = bard().with_class(Class::new("Fighter", 2, HitDie::D10));
        character.classes[0].hit_dice.current = 3;
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert_eq!(stats.level, 7);
        assert_eq!(stats.hit_dice[&HitDie::D8], HitDicePool { remaining: 3, total: 5 });
        assert_eq!(stats.hit_dice[&HitDie::D10], HitDicePool { remaining: 2, total: 2 });
    }

    #[test]
    fn test_too_many_hit_dice_rejected() {
        let mut character = bard();
        character.classes[0].hit_dice.current = 6;
        let err = compute_character_stats(&character, &RulesConfig::default()).unwrap_err();
        assert_eq!(err.field, "classes[0].hitDice.current");
        assert!(matches!(err.reason, ValidationReason::Inconsistent(_)));
    }

    #[test]
    fn test_bad_weapon_dice_rejected() {
        let mut character = bard();
        character.weapons[1].damage.dice_roll.sides = 0;
        let err = compute_character_stats(&character, &RulesConfig::default()).unwrap_err();
        assert_eq!(err.field, "weapons[1].damage.diceRoll.sides");
    }

    #[test]
    fn test_death_saves() {
        let mut character = bard();
        character.creature.hit_points.current = 0;
        character.death_saves.successes = 1;
        character.death_saves.failures = 2;
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert_eq!(
            stats.death_saves,
            DeathSaveState::Dying {
                successes: 1,
                failures: 2
            }
        );

        character.death_saves.successes = 3;
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert_eq!(stats.death_saves, DeathSaveState::Stable);

        character.death_saves.failures = 3;
        let stats = compute_character_stats(&character, &RulesConfig::default()).unwrap();
        assert_eq!(stats.death_saves, DeathSaveState::Dead);

        character.death_saves.failures = 4;
        let err = compute_character_stats(&character, &RulesConfig::default()).unwrap_err();
        assert_eq!(err.field, "deathSaves.failures");
    }
}
