//! Combat section: weapons and armor, edited as two independent tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::editors::input::{int_or, split_tags};
use crate::editors::list::{append_named, ListEditor};
use crate::entities::{Armor, Weapon};
use crate::ids::ItemKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum WeaponField {
    Name(String),
    Group(String),
    Encumbrance(String),
    Range(String),
    Damage(String),
    /// Comma-separated
    Qualities(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ArmorField {
    Name(String),
    /// Comma-separated
    Locations(String),
    Encumbrance(String),
    Ap(String),
    /// Comma-separated
    Qualities(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponEditor {
    draft_name: String,
}

impl WeaponEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    /// Append a weapon with the default profile, keyed by `now`.
    pub fn add(&mut self, weapons: &[Weapon], now: DateTime<Utc>) -> Option<Vec<Weapon>> {
        append_named(weapons, &mut self.draft_name, |name| {
            Weapon::new(ItemKey::stamped(now), name)
        })
    }
}

impl ListEditor for WeaponEditor {
    type Item = Weapon;
    type Field = WeaponField;

    const LIST: &'static str = "weapons";

    fn apply_field(weapon: &mut Weapon, field: WeaponField) {
        match field {
            WeaponField::Name(v) => weapon.name = v,
            WeaponField::Group(v) => weapon.group = v,
            WeaponField::Encumbrance(input) => weapon.encumbrance = int_or(&input, 0),
            WeaponField::Range(v) => weapon.range = v,
            WeaponField::Damage(v) => weapon.damage = v,
            WeaponField::Qualities(csv) => weapon.qualities = split_tags(&csv),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorEditor {
    draft_name: String,
}

impl ArmorEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    /// Append body armor with 1 AP, keyed by `now`.
    pub fn add(&mut self, armor: &[Armor], now: DateTime<Utc>) -> Option<Vec<Armor>> {
        append_named(armor, &mut self.draft_name, |name| {
            Armor::new(ItemKey::stamped(now), name)
        })
    }
}

impl ListEditor for ArmorEditor {
    type Item = Armor;
    type Field = ArmorField;

    const LIST: &'static str = "armor";

    fn apply_field(armor: &mut Armor, field: ArmorField) {
        match field {
            ArmorField::Name(v) => armor.name = v,
            ArmorField::Locations(csv) => armor.locations = split_tags(&csv),
            ArmorField::Encumbrance(input) => armor.encumbrance = int_or(&input, 0),
            ArmorField::Ap(input) => armor.ap = int_or(&input, 0),
            ArmorField::Qualities(csv) => armor.qualities = split_tags(&csv),
        }
    }
}
