//! Modifier formulas - ability modifiers, skills, saving throws, passives
//!
//! Formulas:
//! - ability modifier = floor((score - 10) / 2)
//! - skill = ability modifier + proficiency share + misc
//! - saving throw = ability modifier + (bonus if proficient) + misc
//! - passive = base + check total, ± adjustment for advantage/disadvantage

use super::CheckValue;
use crate::config::PassiveRules;
use crate::records::{SavingThrowProficiency, SkillProficiency};
use crate::types::RollMode;

/// Modifier for an ability score
pub fn ability_modifier(score: i32) -> i32 {
    // Widened so the subtraction cannot overflow; the result always fits
    ((i64::from(score) - 10).div_euclid(2)) as i32
}

/// How much of the proficiency bonus a skill receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProficiencyLevel {
    None,
    /// Half the bonus, rounded down (Jack of All Trades)
    Half,
    Proficient,
    /// Double the bonus
    Expertise,
}

impl ProficiencyLevel {
    /// Resolve stored flags
    ///
    /// Expertise implies proficiency. The half-proficiency flag only
    /// applies when the skill is not otherwise proficient.
    pub fn from_flags(is_proficient: bool, is_expertise: bool, jack_of_all_trades: bool) -> Self {
        if is_expertise {
            ProficiencyLevel::Expertise
        } else if is_proficient {
            ProficiencyLevel::Proficient
        } else if jack_of_all_trades {
            ProficiencyLevel::Half
        } else {
            ProficiencyLevel::None
        }
    }

    /// Share of `proficiency_bonus` this level grants
    pub fn bonus(&self, proficiency_bonus: i32) -> i32 {
        match self {
            ProficiencyLevel::None => 0,
            ProficiencyLevel::Half => proficiency_bonus.div_euclid(2),
            ProficiencyLevel::Proficient => proficiency_bonus,
            ProficiencyLevel::Expertise => proficiency_bonus.saturating_mul(2),
        }
    }
}

/// Breakdown of a skill check
pub fn skill_check(
    ability_modifier: i32,
    proficiency: &SkillProficiency,
    proficiency_bonus: i32,
    jack_of_all_trades: bool,
) -> CheckValue {
    let level = ProficiencyLevel::from_flags(
        proficiency.is_proficient,
        proficiency.is_expertise,
        jack_of_all_trades,
    );
    CheckValue::new(
        ability_modifier,
        level.bonus(proficiency_bonus),
        proficiency.misc_modifier.unwrap_or(0),
    )
}

/// Total skill check modifier
pub fn skill_value(
    ability_modifier: i32,
    proficiency: &SkillProficiency,
    proficiency_bonus: i32,
    jack_of_all_trades: bool,
) -> i32 {
    skill_check(ability_modifier, proficiency, proficiency_bonus, jack_of_all_trades).total()
}

/// Breakdown of a saving throw
pub fn saving_throw_check(
    ability_modifier: i32,
    proficiency: &SavingThrowProficiency,
    proficiency_bonus: i32,
) -> CheckValue {
    let share = if proficiency.is_proficient {
        proficiency_bonus
    } else {
        0
    };
    CheckValue::new(ability_modifier, share, proficiency.misc_modifier.unwrap_or(0))
}

/// Total saving throw modifier
pub fn saving_throw_value(
    ability_modifier: i32,
    proficiency: &SavingThrowProficiency,
    proficiency_bonus: i32,
) -> i32 {
    saving_throw_check(ability_modifier, proficiency, proficiency_bonus).total()
}

/// Passive score for a check using configured constants
pub fn passive_score(check_total: i32, mode: RollMode, rules: &PassiveRules) -> i32 {
    let adjustment = match mode {
        RollMode::Normal => 0,
        RollMode::Advantage => rules.advantage_adjustment,
        RollMode::Disadvantage => rules.advantage_adjustment.saturating_neg(),
    };
    rules
        .base
        .saturating_add(check_total)
        .saturating_add(adjustment)
}

/// Passive perception: 10 + perception skill, ±5 with advantage/disadvantage
pub fn passive_perception(perception_skill_value: i32, mode: RollMode) -> i32 {
    passive_score(perception_skill_value, mode, &PassiveRules::default())
}
