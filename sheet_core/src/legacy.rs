//! Legacy - Flat record shapes that store computed totals
//!
//! Older documents keep skill and saving throw totals next to the raw
//! scores, with proficiencies as plain lists. They are only read: each
//! shape migrates to its current record, and stored totals are checked
//! against the engine instead of being trusted.

use crate::derived::{compute_derived_stats, CreatureInput};
use crate::error::ValidationError;
use crate::records::{
    Campaign, Character, Class, Creature, DeathSaves, Entry, Equipment, Feat, HitDie, HitPoints,
    Item, Note, Personality, Physical, Race, Range, RecordMeta, SavingThrowProficiency, Sharing,
    SkillProficiency, Source, Speed, Spell, Timestamps, Treasure, UserId, Visibility, Weapon,
    WeaponDamage,
};
use crate::types::{Ability, Alignment, Condition, DamageType, ItemType, Rarity, Sense, Size, Skill};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Creature with stored totals and proficiency lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCreature {
    pub name: String,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub speed: Speed,
    pub ability_scores: BTreeMap<Ability, f64>,
    pub hit_points: HitPoints,
    pub armor_class: i32,
    pub passive_perception: i32,
    /// Stored skill totals
    #[serde(default)]
    pub skills: BTreeMap<Skill, i32>,
    #[serde(default)]
    pub skill_proficiencies: Vec<Skill>,
    #[serde(default)]
    pub skill_expertises: Vec<Skill>,
    /// Stored saving throw totals
    #[serde(default)]
    pub saving_throws: BTreeMap<Ability, i32>,
    #[serde(default)]
    pub saving_throw_proficiencies: Vec<Ability>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub senses: BTreeMap<Sense, u32>,
    /// Kept as text since old documents list names no longer recognized
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub condition_immunities: Vec<String>,
    #[serde(default)]
    pub damage_immunities: Vec<DamageType>,
    #[serde(default)]
    pub damage_resistances: Vec<DamageType>,
    #[serde(default)]
    pub damage_vulnerabilities: Vec<DamageType>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A stored total that disagrees with the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTotalMismatch {
    /// Stored path, e.g. `skills.stealth`
    pub field: String,
    pub stored: i32,
    pub derived: i32,
}

impl LegacyCreature {
    /// Convert to the current shape; stored totals are dropped
    pub fn migrate(&self, meta: RecordMeta) -> Creature {
        let mut skills: BTreeMap<Skill, SkillProficiency> = BTreeMap::new();
        for skill in &self.skill_proficiencies {
            skills.entry(*skill).or_default().is_proficient = true;
        }
        for skill in &self.skill_expertises {
            let entry = skills.entry(*skill).or_default();
            entry.is_proficient = true;
            entry.is_expertise = true;
        }

        let saving_throws = self
            .saving_throw_proficiencies
            .iter()
            .map(|ability| (*ability, SavingThrowProficiency::proficient()))
            .collect();

        Creature {
            meta,
            source: None,
            name: self.name.clone(),
            size: self.size,
            speed: self.speed,
            initiative: None,
            ability_scores: self.ability_scores.clone(),
            hit_points: self.hit_points,
            armor_class: self.armor_class,
            passive_perception: Some(self.passive_perception),
            skills,
            saving_throws,
            languages: self.languages.clone(),
            senses: self.senses.clone(),
            conditions: known_conditions(&self.name, &self.conditions),
            condition_immunities: known_conditions(&self.name, &self.condition_immunities),
            damage_immunities: self.damage_immunities.iter().copied().collect(),
            damage_resistances: self.damage_resistances.iter().copied().collect(),
            damage_vulnerabilities: self.damage_vulnerabilities.iter().copied().collect(),
            tags: self.tags.clone(),
        }
    }

    /// Recompute every stored total and report the ones that disagree
    pub fn stored_total_mismatches(
        &self,
        proficiency_bonus: i32,
    ) -> Result<Vec<StoredTotalMismatch>, ValidationError> {
        let creature = self.migrate(RecordMeta::default());
        let derived =
            compute_derived_stats(&CreatureInput::from_creature(&creature, proficiency_bonus))?;

        let mut mismatches = Vec::new();
        for (skill, stored) in &self.skills {
            push_mismatch(
                &mut mismatches,
                format!("skills.{}", skill.key()),
                *stored,
                derived.skill(*skill),
            );
        }
        for (ability, stored) in &self.saving_throws {
            push_mismatch(
                &mut mismatches,
                format!("savingThrows.{}", ability.key()),
                *stored,
                derived.saving_throw(*ability),
            );
        }
        push_mismatch(
            &mut mismatches,
            "passivePerception".to_string(),
            self.passive_perception,
            derived.passive_perception,
        );

        for mismatch in &mismatches {
            tracing::warn!(
                "{}: stored {} is {} but derives to {}",
                self.name,
                mismatch.field,
                mismatch.stored,
                mismatch.derived
            );
        }
        Ok(mismatches)
    }
}

fn push_mismatch(out: &mut Vec<StoredTotalMismatch>, field: String, stored: i32, derived: i32) {
    if stored != derived {
        out.push(StoredTotalMismatch {
            field,
            stored,
            derived,
        });
    }
}

fn known_conditions(owner: &str, names: &[String]) -> BTreeSet<Condition> {
    names
        .iter()
        .filter_map(|name| {
            match serde_json::from_value::<Condition>(serde_json::Value::String(name.clone())) {
                Ok(condition) => Some(condition),
                Err(_) => {
                    tracing::warn!("{}: dropping unknown condition '{}'", owner, name);
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyClass {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcasting_ability: Option<Ability>,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// Hit dice as a single pool across all classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyHitDice {
    pub current: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_magic: bool,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl LegacyItem {
    pub fn migrate(&self, meta: RecordMeta) -> Item {
        let mut item = Item::new(self.name.clone()).with_weight(self.weight);
        item.meta = meta;
        // Old documents only flag magic, not how rare it is
        item.rarity = if self.is_magic {
            Rarity::Unknown
        } else {
            Rarity::None
        };
        if !self.description.is_empty() {
            item.entries.push(Entry::Text(self.description.clone()));
        }
        item.source = self.source.clone();
        item
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWeapon {
    #[serde(flatten)]
    pub item: LegacyItem,
    pub category: String,
    pub damage: WeaponDamage,
    #[serde(default)]
    pub range: Range,
    #[serde(default)]
    pub throw_range: Range,
    #[serde(default)]
    pub is_equipped: bool,
}

impl LegacyWeapon {
    /// A weapon with a range and no throw range is treated as ranged
    pub fn migrate(&self, meta: RecordMeta) -> Weapon {
        let ranged = self.range.normal > 0 && self.throw_range.normal == 0;
        let item_type = if ranged {
            ItemType::Ranged
        } else {
            ItemType::Melee
        };
        Weapon {
            item: self.item.migrate(meta).with_type(item_type),
            weapon_category: self.category.clone(),
            damage: self.damage.clone(),
            range: self.range,
            throw_range: self.throw_range,
            is_equipped: self.is_equipped,
            properties: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEquipment {
    #[serde(flatten)]
    pub item: LegacyItem,
    #[serde(default)]
    pub quantity: u32,
}

impl LegacyEquipment {
    pub fn migrate(&self, meta: RecordMeta) -> Equipment {
        Equipment {
            item: self.item.migrate(meta),
            quantity: self.quantity,
        }
    }
}

/// Character with a single hit dice pool and stored totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCharacter {
    #[serde(flatten)]
    pub creature: LegacyCreature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default)]
    pub xp: u64,
    pub race: Race,
    pub classes: Vec<LegacyClass>,
    pub alignment: Alignment,
    pub proficiency_bonus: i32,
    #[serde(default)]
    pub has_inspiration: bool,
    #[serde(default)]
    pub hit_dice: LegacyHitDice,
    #[serde(default)]
    pub death_saves: DeathSaves,
    #[serde(default)]
    pub physical: Physical,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub feats: Vec<Feat>,
    #[serde(default)]
    pub weapon_proficiencies: Vec<String>,
    #[serde(default)]
    pub armor_proficiencies: Vec<String>,
    #[serde(default)]
    pub tool_proficiencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spells: Option<Vec<Spell>>,
    #[serde(default)]
    pub weapons: Vec<LegacyWeapon>,
    #[serde(default)]
    pub equipment: Vec<LegacyEquipment>,
    #[serde(default)]
    pub treasure: Treasure,
}

impl LegacyCharacter {
    /// Convert to the current shape. The shared hit dice pool is split
    /// across classes in listed order, each taking up to its level.
    pub fn migrate(&self, meta: RecordMeta) -> Character {
        let mut remaining_dice = self.hit_dice.current;
        let classes: Vec<Class> = self
            .classes
            .iter()
            .map(|legacy| {
                let mut class = Class::new(
                    legacy.name.clone(),
                    legacy.level,
                    HitDie::for_class_name(&legacy.name),
                );
                class.spellcasting_ability = legacy.spellcasting_ability;
                class.source = legacy.source.clone();
                class.hit_dice.current = remaining_dice.min(legacy.level);
                remaining_dice -= class.hit_dice.current;
                class
            })
            .collect();
        if remaining_dice > 0 {
            tracing::warn!(
                "{}: dropping {} hit dice beyond total class level",
                self.creature.name,
                remaining_dice
            );
        }

        let item_meta = RecordMeta {
            owner_user_id: meta.owner_user_id.clone(),
            ..RecordMeta::default()
        };

        let mut character = Character::new(
            self.creature.migrate(meta),
            self.race.clone(),
            self.alignment,
        );
        character.nickname = self.nickname.clone();
        character.xp = self.xp;
        character.classes = classes;
        character.proficiency_bonus = self.proficiency_bonus;
        character.has_inspiration = self.has_inspiration;
        character.death_saves = self.death_saves;
        character.physical = self.physical.clone();
        character.personality = self.personality.clone();
        character.feats = self.feats.clone();
        character.weapon_proficiencies = self.weapon_proficiencies.clone();
        character.armor_proficiencies = self.armor_proficiencies.clone();
        character.tool_proficiencies = self.tool_proficiencies.clone();
        character.spells = self.spells.clone();
        character.weapons = self
            .weapons
            .iter()
            .map(|w| w.migrate(item_meta.clone()))
            .collect();
        character.equipment = self
            .equipment
            .iter()
            .map(|e| e.migrate(item_meta.clone()))
            .collect();
        character.treasure = self.treasure;
        character
    }

    pub fn stored_total_mismatches(&self) -> Result<Vec<StoredTotalMismatch>, ValidationError> {
        self.creature
            .stored_total_mismatches(self.proficiency_bonus)
    }
}

/// Note with a single author and creation instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyNote {
    pub author_user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl LegacyNote {
    pub fn migrate(&self) -> Note {
        self.migrate_shared(Sharing {
            visibility: self.visibility,
            shared_with_user_ids: Vec::new(),
        })
    }

    fn migrate_shared(&self, sharing: Sharing) -> Note {
        Note {
            meta: RecordMeta {
                owner_user_id: self.author_user_id.clone(),
                sharing,
                timestamps: Timestamps::new(self.timestamp),
            },
            title: self.title.clone(),
            body: self.body.clone(),
            tags: Vec::new(),
        }
    }
}

/// Campaign with embedded note lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCampaign {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub world_map_urls: Vec<String>,
    #[serde(default)]
    pub dm_user_ids: Vec<UserId>,
    #[serde(default)]
    pub dm_invite_emails: Vec<String>,
    /// Readable by DMs only
    #[serde(default)]
    pub dm_notes: Vec<LegacyNote>,
    #[serde(default)]
    pub player_user_ids: Vec<UserId>,
    #[serde(default)]
    pub player_invite_emails: Vec<String>,
    #[serde(default)]
    pub player_notes: Vec<LegacyNote>,
}

/// Result of splitting a legacy campaign into current records
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignMigration {
    pub campaign: Campaign,
    pub notes: Vec<Note>,
    /// Map images have no counterpart on the current campaign record
    pub world_map_urls: Vec<String>,
}

impl LegacyCampaign {
    /// DM notes become notes shared only with the campaign's DMs;
    /// player notes keep their own visibility
    pub fn migrate(&self, timestamps: Timestamps) -> CampaignMigration {
        let mut campaign = Campaign::new(self.name.clone(), timestamps);
        campaign.description = self.description.clone();
        campaign.dm_user_ids = self.dm_user_ids.clone();
        campaign.dm_invite_emails = self.dm_invite_emails.clone();
        campaign.player_user_ids = self.player_user_ids.clone();
        campaign.player_invite_emails = self.player_invite_emails.clone();

        let dm_only = Sharing {
            visibility: Visibility::Owners,
            shared_with_user_ids: self.dm_user_ids.clone(),
        };
        let notes = self
            .dm_notes
            .iter()
            .map(|note| note.migrate_shared(dm_only.clone()))
            .chain(self.player_notes.iter().map(LegacyNote::migrate))
            .collect();

        CampaignMigration {
            campaign,
            notes,
            world_map_urls: self.world_map_urls.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn legacy_rogue_json() -> &'static str {
        r#"{
            "name": "Vex",
            "size": "small",
            "speed": { "walking": 25, "climbing": 0, "swimming": 0, "flying": 0, "burrowing": 0 },
            "abilityScores": { "str": 8, "dex": 16, "con": 12, "int": 10, "wis": 14, "cha": 12 },
            "hitPoints": { "current": 9, "temporary": 0, "max": 9 },
            "armorClass": 14,
            "passivePerception": 14,
            "skills": { "stealth": 7, "perception": 4, "sleight of Hand": 6 },
            "skillProficiencies": ["perception", "sleight of Hand"],
            "skillExpertises": ["stealth"],
            "savingThrows": { "dex": 5, "int": 0 },
            "savingThrowProficiencies": ["dex", "int"],
            "languages": ["Common"],
            "senses": { "darkvision": 60 },
            "conditions": ["necrotic", "prone"],
            "conditionImmunities": [],
            "damageImmunities": [],
            "damageResistances": ["posion"],
            "damageVulnerabilities": [],
            "tags": []
        }"#
    }

    #[test]
    fn test_migrate_creature() {
        let legacy: LegacyCreature = serde_json::from_str(legacy_rogue_json()).unwrap();
        let creature = legacy.migrate(RecordMeta::default());

        let stealth = creature.skills[&Skill::Stealth];
        assert!(stealth.is_proficient && stealth.is_expertise);
        assert!(creature.skills[&Skill::SleightOfHand].is_proficient);
        assert!(!creature.skills.contains_key(&Skill::Arcana));
        assert!(creature.saving_throws[&Ability::Intelligence].is_proficient);
        assert_eq!(creature.passive_perception, Some(14));
        // "necrotic" is not a condition
        assert_eq!(creature.conditions.len(), 1);
        assert!(creature.has_condition(Condition::Prone));
        assert!(creature.damage_resistances.contains(&DamageType::Poison));
    }

    #[test]
    fn test_stored_total_mismatches() {
        let legacy: LegacyCreature = serde_json::from_str(legacy_rogue_json()).unwrap();
        let mismatches = legacy.stored_total_mismatches(2).unwrap();

        // Stealth 3 + 4 and perception 2 + 2 agree; sleight of hand is 3 + 2, not 6,
        // and the intelligence save is 0 + 2
        let fields: Vec<&str> = mismatches.iter().map(|m| m.field.as_str()).collect();
        assert_eq!(fields, vec!["skills.sleight of hand", "savingThrows.int"]);
        assert_eq!(mismatches[1].stored, 0);
        assert_eq!(mismatches[1].derived, 2);
    }

    #[test]
    fn test_stored_totals_reject_bad_scores() {
        let mut legacy: LegacyCreature = serde_json::from_str(legacy_rogue_json()).unwrap();
        legacy.ability_scores.insert(Ability::Wisdom, 12.5);
        let err = legacy.stored_total_mismatches(2).unwrap_err();
        assert_eq!(err.field, "abilityScores.wis");
    }

    #[test]
    fn test_migrate_character_splits_hit_dice() {
        let mut value: serde_json::Value = serde_json::from_str(legacy_rogue_json()).unwrap();
        let extra = serde_json::json!({
            "xp": 900,
            "race": { "name": "Halfling" },
            "classes": [
                { "name": "Fighter", "level": 2 },
                { "name": "Wizard", "spellcastingAbility": "int", "level": 1 }
            ],
            "alignment": "chaotic good",
            "proficiencyBonus": 2,
            "hasInspiration": false,
            "hitDice": { "current": 2, "max": 3 },
            "deathSaves": { "successes": 0, "failures": 0 },
            "weapons": [{
                "name": "Shortbow",
                "description": "A simple bow",
                "isMagic": false,
                "weight": 2,
                "category": "simple",
                "damage": { "diceRoll": { "sides": 6, "count": 1, "modifier": 0 }, "type": "piercing" },
                "range": { "normal": 80, "long": 320 },
                "throwRange": { "normal": 0, "long": 0 },
                "isEquipped": true
            }],
            "equipment": [{
                "name": "Cloak of Elvenkind",
                "description": "",
                "isMagic": true,
                "weight": 1,
                "quantity": 1
            }],
            "treasure": { "platinum": 0, "gold": 15, "silver": 3, "copper": 0 }
        });
        if let (Some(target), Some(source)) = (value.as_object_mut(), extra.as_object()) {
            target.extend(source.clone());
        }

        let legacy: LegacyCharacter = serde_json::from_value(value).unwrap();
        let meta = RecordMeta {
            owner_user_id: "u1".to_string(),
            ..RecordMeta::default()
        };
        let character = legacy.migrate(meta);

        assert_eq!(character.classes[0].hit_dice.sides, HitDie::D10);
        assert_eq!(character.classes[0].hit_dice.current, 2);
        assert_eq!(character.classes[1].hit_dice.sides, HitDie::D6);
        assert_eq!(character.classes[1].hit_dice.current, 0);
        assert_eq!(character.classes[1].spellcasting_ability, Some(Ability::Intelligence));

        let bow = &character.weapons[0];
        assert!(bow.item.is_ranged());
        assert_eq!(bow.item.entries, vec![Entry::Text("A simple bow".to_string())]);
        assert!(bow.item.meta.is_owned_by("u1"));

        let cloak = &character.equipment[0].item;
        assert_eq!(cloak.rarity, Rarity::Unknown);
        assert!(cloak.entries.is_empty());
        assert_eq!(character.treasure.value_in_copper(), 1530);
    }

    #[test]
    fn test_migrate_character_caps_hit_dice() {
        let mut value: serde_json::Value = serde_json::from_str(legacy_rogue_json()).unwrap();
        let extra = serde_json::json!({
            "race": { "name": "Gnome" },
            "classes": [
                { "name": "Rogue", "level": 2 },
                { "name": "Cleric", "level": 1 }
            ],
            "alignment": "true neutral",
            "proficiencyBonus": 2,
            "hitDice": { "current": 9, "max": 3 }
        });
        if let (Some(target), Some(source)) = (value.as_object_mut(), extra.as_object()) {
            target.extend(source.clone());
        }

        let legacy: LegacyCharacter = serde_json::from_value(value).unwrap();
        let character = legacy.migrate(RecordMeta::default());
        let remaining: Vec<u32> = character
            .classes
            .iter()
            .map(|class| class.hit_dice.current)
            .collect();
        assert_eq!(remaining, vec![2, 1]);
    }

    #[test]
    fn test_migrate_campaign_notes() {
        let json = r#"{
            "ref": null,
            "id": "c1",
            "name": "Curse of the Vale",
            "worldMapUrls": ["https://maps.example/vale.png"],
            "dmUserIds": ["dm1"],
            "dmNotes": [
                { "authorUserId": "dm1", "body": "The mayor is a vampire", "timestamp": 1700000000000, "visibility": "all" }
            ],
            "playerUserIds": ["p1"],
            "playerNotes": [
                { "authorUserId": "p1", "title": "Day 1", "body": "Arrived", "timestamp": 1700000100000, "visibility": "all" }
            ]
        }"#;
        let legacy: LegacyCampaign = serde_json::from_str(json).unwrap();
        let at = Utc.timestamp_millis_opt(1_700_000_200_000).unwrap();
        let migration = legacy.migrate(Timestamps::new(at));

        assert_eq!(migration.campaign.name, "Curse of the Vale");
        assert_eq!(migration.campaign.dm_user_ids, vec!["dm1".to_string()]);
        assert_eq!(migration.world_map_urls.len(), 1);
        assert_eq!(migration.notes.len(), 2);

        let secret = &migration.notes[0];
        assert_eq!(secret.meta.sharing.visibility, Visibility::Owners);
        assert_eq!(secret.meta.sharing.shared_with_user_ids, vec!["dm1".to_string()]);
        assert_eq!(
            secret.meta.timestamps.created_at.timestamp_millis(),
            1_700_000_000_000
        );

        let journal = &migration.notes[1];
        assert_eq!(journal.meta.sharing.visibility, Visibility::All);
        assert_eq!(journal.title.as_deref(), Some("Day 1"));
    }
}
