use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::editors::input::int_or;
use crate::editors::list::{append_named, ListEditor};
use crate::entities::{Prayer, Spell};
use crate::ids::ItemKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SpellField {
    Name(String),
    Cn(String),
    Range(String),
    Target(String),
    Duration(String),
    Effect(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PrayerField {
    Name(String),
    Range(String),
    Target(String),
    Duration(String),
    Effect(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEditor {
    draft_name: String,
}

impl SpellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    pub fn add(&mut self, spells: &[Spell], now: DateTime<Utc>) -> Option<Vec<Spell>> {
        append_named(spells, &mut self.draft_name, |name| {
            Spell::new(ItemKey::stamped(now), name)
        })
    }
}

impl ListEditor for SpellEditor {
    type Item = Spell;
    type Field = SpellField;

    const LIST: &'static str = "spells";

    fn apply_field(spell: &mut Spell, field: SpellField) {
        match field {
            SpellField::Name(v) => spell.name = v,
            SpellField::Cn(input) => spell.cn = int_or(&input, 0),
            SpellField::Range(v) => spell.range = v,
            SpellField::Target(v) => spell.target = v,
            SpellField::Duration(v) => spell.duration = v,
            SpellField::Effect(v) => spell.effect = v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerEditor {
    draft_name: String,
}

impl PrayerEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    pub fn add(&mut self, prayers: &[Prayer], now: DateTime<Utc>) -> Option<Vec<Prayer>> {
        append_named(prayers, &mut self.draft_name, |name| {
            Prayer::new(ItemKey::stamped(now), name)
        })
    }
}

impl ListEditor for PrayerEditor {
    type Item = Prayer;
    type Field = PrayerField;

    const LIST: &'static str = "prayers";

    fn apply_field(prayer: &mut Prayer, field: PrayerField) {
        match field {
            PrayerField::Name(v) => prayer.name = v,
            PrayerField::Range(v) => prayer.range = v,
            PrayerField::Target(v) => prayer.target = v,
            PrayerField::Duration(v) => prayer.duration = v,
            PrayerField::Effect(v) => prayer.effect = v,
        }
    }
}
