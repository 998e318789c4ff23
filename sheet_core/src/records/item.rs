//! Items, weapons, equipment, feats and dice

use super::meta::{Entries, RecordMeta, Source};
use crate::error::ValidationError;
use crate::types::{DamageType, ItemType, Rarity};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_alt: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_class: Option<i32>,
    /// Whether the item uses ammunition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammunition: Option<bool>,
    /// Weight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Value in copper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default)]
    pub entries: Entries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Item {
            meta: RecordMeta::default(),
            name: name.into(),
            rarity: Rarity::None,
            item_type: None,
            type_alt: None,
            armor_class: None,
            ammunition: None,
            weight: None,
            value: None,
            entries: Vec::new(),
            source: None,
        }
    }

    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Whether either type code marks this as ranged
    pub fn is_ranged(&self) -> bool {
        self.item_type == Some(ItemType::Ranged) || self.type_alt == Some(ItemType::Ranged)
    }

    /// Weight in pounds, absent weight counting as zero
    pub fn weight_or_zero(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }
}

/// Weapon property codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponProperty {
    #[serde(rename = "A")]
    Ammunition,
    #[serde(rename = "F")]
    Finesse,
    #[serde(rename = "H")]
    Heavy,
    #[serde(rename = "L")]
    Light,
    #[serde(rename = "LD")]
    Loading,
    #[serde(rename = "R")]
    Reach,
    #[serde(rename = "S")]
    Special,
    #[serde(rename = "T")]
    Thrown,
    #[serde(rename = "2H")]
    TwoHanded,
    #[serde(rename = "V")]
    Versatile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDamage {
    pub dice_roll: DiceRoll,
    #[serde(rename = "type")]
    pub damage_type: DamageType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    #[serde(flatten)]
    pub item: Item,
    pub weapon_category: String,
    pub damage: WeaponDamage,
    #[serde(default)]
    pub range: Range,
    #[serde(default)]
    pub throw_range: Range,
    #[serde(default)]
    pub is_equipped: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<WeaponProperty>,
}

impl Weapon {
    pub fn has_property(&self, property: WeaponProperty) -> bool {
        self.properties.contains(&property)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Equipment {
    /// Weight of the whole stack
    pub fn total_weight(&self) -> f64 {
        self.item.weight_or_zero() * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feat {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// Normal and long range in feet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub normal: u32,
    pub long: u32,
}

/// `count`d`sides` + `modifier`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The dice to roll
    pub sides: u32,
    /// The number of times to roll the `sides`-sided dice
    pub count: u32,
    /// The modifier to add onto the roll value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<i32>,
}

impl DiceRoll {
    pub fn new(count: u32, sides: u32) -> Self {
        DiceRoll {
            sides,
            count,
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Modifier, absent counting as zero
    pub fn flat(&self) -> i32 {
        self.modifier.unwrap_or(0)
    }

    /// Reject dice that cannot be rolled
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.sides == 0 {
            return Err(ValidationError::out_of_range(
                format!("{field}.sides"),
                0,
                1,
                i64::from(u32::MAX),
            ));
        }
        if self.count == 0 {
            return Err(ValidationError::out_of_range(
                format!("{field}.count"),
                0,
                1,
                i64::from(u32::MAX),
            ));
        }
        Ok(())
    }

    pub fn min(&self) -> i64 {
        i64::from(self.count) + i64::from(self.flat())
    }

    pub fn max(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.flat())
    }

    /// Mean result, rounded down
    pub fn average(&self) -> i64 {
        let dice = i64::from(self.count) * (i64::from(self.sides) + 1);
        (dice + 2 * i64::from(self.flat())).div_euclid(2)
    }

    /// Roll every die and add the modifier
    pub fn roll(&self, rng: &mut impl Rng) -> i64 {
        let mut total = i64::from(self.flat());
        if self.sides == 0 {
            return total;
        }
        for _ in 0..self.count {
            total += i64::from(rng.gen_range(1..=self.sides));
        }
        total
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.flat() {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn make_test_rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(12345)
    }

    #[test]
    fn test_dice_bounds() {
        let dice = DiceRoll::new(2, 6).with_modifier(3);
        assert_eq!(dice.min(), 5);
        assert_eq!(dice.max(), 15);
        assert_eq!(dice.average(), 10);
        assert_eq!(DiceRoll::new(1, 8).average(), 4);
    }

    #[test]
    fn test_roll_stays_in_bounds() {
        let dice = DiceRoll::new(3, 8).with_modifier(-2);
        let mut rng = make_test_rng();
        for _ in 0..200 {
            let value = dice.roll(&mut rng);
            assert!(value >= dice.min() && value <= dice.max());
        }
    }

    #[test]
    fn test_roll_is_repeatable_with_seed() {
        let dice = DiceRoll::new(4, 6);
        let first = dice.roll(&mut make_test_rng());
        let second = dice.roll(&mut make_test_rng());
        assert_eq!(first, second);
    }

    #[test]
    fn test_dice_display() {
        assert_eq!(DiceRoll::new(1, 8).to_string(), "1d8");
        assert_eq!(DiceRoll::new(2, 6).with_modifier(3).to_string(), "2d6+3");
        assert_eq!(DiceRoll::new(1, 4).with_modifier(-1).to_string(), "1d4-1");
    }

    #[test]
    fn test_zero_sided_dice_rejected() {
        let err = DiceRoll::new(1, 0).validate("damage.diceRoll").unwrap_err();
        assert_eq!(err.field, "damage.diceRoll.sides");
        assert!(DiceRoll::new(0, 6).validate("d").is_err());
        assert!(DiceRoll::new(1, 6).validate("d").is_ok());
    }

    #[test]
    fn test_parse_weapon() {
        let json = r#"{
            "ownerUserId": "u1",
            "createdAt": 0,
            "updatedAt": 0,
            "name": "Rapier",
            "rarity": "none",
            "type": "M",
            "weight": 2,
            "value": 2500,
            "entries": [],
            "weaponCategory": "martial",
            "damage": {"diceRoll": {"sides": 8, "count": 1}, "type": "piercing"},
            "range": {"normal": 5, "long": 5},
            "throwRange": {"normal": 0, "long": 0},
            "isEquipped": true,
            "properties": ["F"]
        }"#;

        let weapon: Weapon = serde_json::from_str(json).unwrap();
        assert_eq!(weapon.item.name, "Rapier");
        assert_eq!(weapon.item.item_type, Some(ItemType::Melee));
        assert_eq!(weapon.damage.damage_type, DamageType::Piercing);
        assert!(weapon.has_property(WeaponProperty::Finesse));
        assert!(!weapon.item.is_ranged());
    }

    #[test]
    fn test_equipment_weight() {
        let torch = Equipment {
            item: Item::new("Torch").with_weight(1.0),
            quantity: 10,
        };
        assert!((torch.total_weight() - 10.0).abs() < f64::EPSILON);
    }
}
