//! sheet_core - Campaign records and derived character sheet statistics
//!
//! This library provides:
//! - Records: Campaigns, notes, maps, creatures, characters, items and spells
//!   in the JSON shapes the application stores
//! - Derived stats: Ability modifiers, skill and saving throw totals,
//!   passive perception and full character sheets, computed from raw inputs
//! - StatSource: Anything that can feed the stat engine
//! - Legacy: Flat record shapes and their migration to current records

pub mod config;
pub mod derived;
pub mod error;
pub mod legacy;
pub mod prelude;
pub mod records;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use config::{default_rules, RulesConfig};
pub use derived::{
    ability_modifier, compute_character_stats, compute_derived_stats,
    compute_derived_stats_with_rules, passive_perception, saving_throw_value, skill_value,
    CharacterStats, CheckValue, CreatureInput, DerivedStats,
};
pub use error::{ValidationError, ValidationReason};
pub use records::{Character, Creature, DiceRoll, Item, Spell};
pub use source::{compute_from_source, SourcedCreature, StatSource};
pub use types::{Ability, Condition, DamageType, Skill};
