//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Ability, Alignment, Condition, DamageType, RollMode, Sense, Size, Skill};

// Records
pub use crate::records::{
    Campaign, Character, Class, Creature, DiceRoll, Equipment, HitDie, Item, Note, RecordMeta,
    SavingThrowProficiency, SkillProficiency, Spell, Weapon,
};

// Stat engine
pub use crate::derived::{
    compute_character_stats, compute_derived_stats, CharacterStats, CreatureInput, DerivedStats,
};

// Sources
pub use crate::source::{compute_from_source, SourcedCreature, StatSource};

// Config and errors
pub use crate::config::{default_rules, RulesConfig};
pub use crate::error::{ValidationError, ValidationReason};
