//! Stored record shapes
//!
//! JSON field names follow the documents the application stores
//! (camelCase keys, literal enum strings). Only raw inputs are stored;
//! sheet totals come from [`crate::derived`].

mod campaign;
mod creature;
mod item;
mod map;
mod meta;
mod spell;

pub use campaign::{
    Audio, Campaign, CampaignMode, CampaignRole, CampaignUserSummaries, LogItem, LogKind, Note,
    UserSummary,
};
pub use creature::{
    Character, Class, ClassFeature, Creature, DeathSaves, HitDice, HitDie, HitPoints, Personality,
    Physical, Race, RaceSpeed, SavingThrowProficiency, SkillProficiency, Speed, Treasure,
};
pub use item::{
    DiceRoll, Equipment, Feat, Item, Range, Weapon, WeaponDamage, WeaponProperty,
};
pub use map::{
    BattleMap, BattleMapBackgroundImage, BattleMapToken, PinLocation, TokenKind, WorldMap,
    WorldMapPin, FEET_PER_CELL,
};
pub use meta::{entries_text, Entries, Entry, RecordMeta, Sharing, Source, Timestamps, UserId, Visibility};
pub use spell::{
    AreaShape, CastingTime, CastingUnit, ComponentRequirement, DistanceKind, DurationKind,
    DurationUnit, Spell, SpellDistance, SpellDuration, SpellMeta, SpellRange, TimedDuration,
};
