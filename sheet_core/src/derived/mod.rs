//! Derived statistics - everything a sheet displays that is not stored
//!
//! Stored records hold only raw inputs (scores, flags, bonus). The engine
//! turns a [`CreatureInput`] into a complete [`DerivedStats`] or rejects
//! the input with a [`ValidationError`]; it never returns partial results.

mod character;
mod check_value;
mod defenses;
mod input;
mod modifier;

pub use character::{
    compute_character_stats, CharacterStats, DeathSaveState, SpellcastingStats, WeaponAttack,
};
pub use check_value::CheckValue;
pub use defenses::DamageResponse;
pub use input::{AbilityScores, CreatureInput};
pub use modifier::{
    ability_modifier, passive_perception, passive_score, saving_throw_check, saving_throw_value,
    skill_check, skill_value, ProficiencyLevel,
};

use crate::config::{default_rules, RulesConfig};
use crate::error::ValidationError;
use crate::records::{Creature, HitPoints};
use crate::types::{Ability, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display-ready statistics for one creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub ability_scores: AbilityScores,
    pub ability_modifiers: BTreeMap<Ability, i32>,
    pub proficiency_bonus: i32,
    pub skills: BTreeMap<Skill, CheckValue>,
    pub saving_throws: BTreeMap<Ability, CheckValue>,
    pub passive_perception: i32,
    /// DEX modifier
    pub initiative: i32,
    pub armor_class: i32,
    pub hit_points: HitPoints,
    /// Current plus temporary
    pub effective_hit_points: i32,
}

impl DerivedStats {
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.ability_scores.get(ability))
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).map(CheckValue::total).unwrap_or(0)
    }

    pub fn saving_throw(&self, ability: Ability) -> i32 {
        self.saving_throws
            .get(&ability)
            .map(CheckValue::total)
            .unwrap_or(0)
    }
}

/// Compute derived statistics with the bundled rules table
pub fn compute_derived_stats(input: &CreatureInput) -> Result<DerivedStats, ValidationError> {
    compute_derived_stats_with_rules(input, &default_rules())
}

/// Compute derived statistics with a custom rules table
pub fn compute_derived_stats_with_rules(
    input: &CreatureInput,
    rules: &RulesConfig,
) -> Result<DerivedStats, ValidationError> {
    let scores = input.validate(rules)?;
    let bonus = input.proficiency_bonus;

    let ability_modifiers: BTreeMap<Ability, i32> = Ability::all()
        .iter()
        .map(|a| (*a, ability_modifier(scores.get(*a))))
        .collect();
    let modifier_of = |ability: Ability| ability_modifiers.get(&ability).copied().unwrap_or(0);

    let skills: BTreeMap<Skill, CheckValue> = Skill::all()
        .iter()
        .map(|skill| {
            let check = skill_check(
                modifier_of(skill.ability()),
                &input.skill(*skill),
                bonus,
                input.jack_of_all_trades,
            );
            (*skill, check)
        })
        .collect();

    let saving_throws: BTreeMap<Ability, CheckValue> = Ability::all()
        .iter()
        .map(|ability| {
            let check = saving_throw_check(modifier_of(*ability), &input.saving_throw(*ability), bonus);
            (*ability, check)
        })
        .collect();

    let perception = skills
        .get(&Skill::Perception)
        .map(CheckValue::total)
        .unwrap_or(0);
    let passive_perception = passive_score(perception, input.perception_mode, &rules.passive);
    let initiative = modifier_of(Ability::Dexterity);

    tracing::debug!(
        "Derived stats: passive perception {}, initiative {}, proficiency bonus {}",
        passive_perception,
        initiative,
        bonus
    );

    Ok(DerivedStats {
        ability_scores: scores,
        ability_modifiers,
        proficiency_bonus: bonus,
        skills,
        saving_throws,
        passive_perception,
        initiative,
        armor_class: input.armor_class,
        hit_points: input.hit_points,
        effective_hit_points: input.hit_points.effective(),
    })
}

/// Compare a creature's cached passive perception with the derived one,
/// returning false (and logging) when they disagree
pub fn stored_passive_matches(creature: &Creature, derived: &DerivedStats) -> bool {
    match creature.passive_perception {
        Some(stored) if stored != derived.passive_perception => {
            tracing::warn!(
                "Stored passive perception {} for {} disagrees with derived {}",
                stored,
                creature.name,
                derived.passive_perception
            );
            false
        }
        _ => true,
    }
}
