//! Characteristics - the ten fixed stats of a character.
//!
//! Each characteristic stores only `initial` and `advances`. The total is
//! always derived as `initial + advances` and is never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The ten characteristic names, in sheet order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CharacteristicName {
    #[default]
    #[serde(rename = "WS")]
    WeaponSkill,
    #[serde(rename = "BS")]
    BallisticSkill,
    #[serde(rename = "S")]
    Strength,
    #[serde(rename = "T")]
    Toughness,
    #[serde(rename = "I")]
    Initiative,
    #[serde(rename = "Ag")]
    Agility,
    #[serde(rename = "Dex")]
    Dexterity,
    #[serde(rename = "Int")]
    Intelligence,
    #[serde(rename = "WP")]
    Willpower,
    #[serde(rename = "Fel")]
    Fellowship,
}

impl CharacteristicName {
    pub const ALL: [CharacteristicName; 10] = [
        Self::WeaponSkill,
        Self::BallisticSkill,
        Self::Strength,
        Self::Toughness,
        Self::Initiative,
        Self::Agility,
        Self::Dexterity,
        Self::Intelligence,
        Self::Willpower,
        Self::Fellowship,
    ];

    /// Sheet abbreviation ("WS", "BS", ...). Also the serialized form.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::WeaponSkill => "WS",
            Self::BallisticSkill => "BS",
            Self::Strength => "S",
            Self::Toughness => "T",
            Self::Initiative => "I",
            Self::Agility => "Ag",
            Self::Dexterity => "Dex",
            Self::Intelligence => "Int",
            Self::Willpower => "WP",
            Self::Fellowship => "Fel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WeaponSkill => "Weapon Skill",
            Self::BallisticSkill => "Ballistic Skill",
            Self::Strength => "Strength",
            Self::Toughness => "Toughness",
            Self::Initiative => "Initiative",
            Self::Agility => "Agility",
            Self::Dexterity => "Dexterity",
            Self::Intelligence => "Intelligence",
            Self::Willpower => "Willpower",
            Self::Fellowship => "Fellowship",
        }
    }
}

impl fmt::Display for CharacteristicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for CharacteristicName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.abbreviation() == trimmed)
            .ok_or_else(|| DomainError::parse(format!("unknown characteristic: {trimmed:?}")))
    }
}

/// Which stored half of a characteristic an edit touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicField {
    Initial,
    Advances,
}

/// One characteristic. No bounds: any integer, including negative, is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Characteristic {
    pub initial: i32,
    pub advances: i32,
}

impl Characteristic {
    pub fn new(initial: i32, advances: i32) -> Self {
        Self { initial, advances }
    }

    /// Widened so that two `i32` halves at the extremes never overflow.
    pub fn total(&self) -> i64 {
        i64::from(self.initial) + i64::from(self.advances)
    }

    pub fn get(&self, field: CharacteristicField) -> i32 {
        match field {
            CharacteristicField::Initial => self.initial,
            CharacteristicField::Advances => self.advances,
        }
    }

    pub fn with(mut self, field: CharacteristicField, value: i32) -> Self {
        match field {
            CharacteristicField::Initial => self.initial = value,
            CharacteristicField::Advances => self.advances = value,
        }
        self
    }
}

/// The full ten-entry characteristic set, keyed in storage by abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    #[serde(rename = "WS")]
    pub weapon_skill: Characteristic,
    #[serde(rename = "BS")]
    pub ballistic_skill: Characteristic,
    #[serde(rename = "S")]
    pub strength: Characteristic,
    #[serde(rename = "T")]
    pub toughness: Characteristic,
    #[serde(rename = "I")]
    pub initiative: Characteristic,
    #[serde(rename = "Ag")]
    pub agility: Characteristic,
    #[serde(rename = "Dex")]
    pub dexterity: Characteristic,
    #[serde(rename = "Int")]
    pub intelligence: Characteristic,
    #[serde(rename = "WP")]
    pub willpower: Characteristic,
    #[serde(rename = "Fel")]
    pub fellowship: Characteristic,
}

impl Characteristics {
    /// Every characteristic starts at the same value with no advances.
    pub fn uniform(initial: i32) -> Self {
        let c = Characteristic::new(initial, 0);
        Self {
            weapon_skill: c,
            ballistic_skill: c,
            strength: c,
            toughness: c,
            initiative: c,
            agility: c,
            dexterity: c,
            intelligence: c,
            willpower: c,
            fellowship: c,
        }
    }

    pub fn get(&self, name: CharacteristicName) -> Characteristic {
        match name {
            CharacteristicName::WeaponSkill => self.weapon_skill,
            CharacteristicName::BallisticSkill => self.ballistic_skill,
            CharacteristicName::Strength => self.strength,
            CharacteristicName::Toughness => self.toughness,
            CharacteristicName::Initiative => self.initiative,
            CharacteristicName::Agility => self.agility,
            CharacteristicName::Dexterity => self.dexterity,
            CharacteristicName::Intelligence => self.intelligence,
            CharacteristicName::Willpower => self.willpower,
            CharacteristicName::Fellowship => self.fellowship,
        }
    }

    pub fn get_mut(&mut self, name: CharacteristicName) -> &mut Characteristic {
        match name {
            CharacteristicName::WeaponSkill => &mut self.weapon_skill,
            CharacteristicName::BallisticSkill => &mut self.ballistic_skill,
            CharacteristicName::Strength => &mut self.strength,
            CharacteristicName::Toughness => &mut self.toughness,
            CharacteristicName::Initiative => &mut self.initiative,
            CharacteristicName::Agility => &mut self.agility,
            CharacteristicName::Dexterity => &mut self.dexterity,
            CharacteristicName::Intelligence => &mut self.intelligence,
            CharacteristicName::Willpower => &mut self.willpower,
            CharacteristicName::Fellowship => &mut self.fellowship,
        }
    }

    pub fn total(&self, name: CharacteristicName) -> i64 {
        self.get(name).total()
    }

    /// Entries in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (CharacteristicName, Characteristic)> + '_ {
        CharacteristicName::ALL
            .into_iter()
            .map(move |name| (name, self.get(name)))
    }
}

impl Default for Characteristics {
    fn default() -> Self {
        Self::uniform(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_initial_plus_advances() {
        assert_eq!(Characteristic::new(30, 10).total(), 40);
        assert_eq!(Characteristic::new(0, 0).total(), 0);
        assert_eq!(Characteristic::new(-5, 3).total(), -2);
        assert_eq!(Characteristic::new(25, -30).total(), -5);
    }

    #[test]
    fn total_is_exact_at_the_integer_extremes() {
        assert_eq!(Characteristic::new(i32::MAX, 5).total(), i64::from(i32::MAX) + 5);
        assert_eq!(Characteristic::new(i32::MIN, i32::MIN).total(), 2 * i64::from(i32::MIN));
        assert_eq!(Characteristic::new(i32::MAX, i32::MIN).total(), -1);
    }

    #[test]
    fn names_round_trip_through_abbreviations() {
        for name in CharacteristicName::ALL {
            assert_eq!(name.abbreviation().parse::<CharacteristicName>().unwrap(), name);
        }
        assert!("Str".parse::<CharacteristicName>().is_err());
        assert!("ws".parse::<CharacteristicName>().is_err());
    }

    #[test]
    fn serializes_keyed_by_abbreviation_in_sheet_order() {
        let json = serde_json::to_value(Characteristics::default()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 10);
        for name in CharacteristicName::ALL {
            assert_eq!(json[name.abbreviation()]["initial"], 30);
            assert_eq!(json[name.abbreviation()]["advances"], 0);
        }
    }

    #[test]
    fn get_mut_touches_only_the_named_entry() {
        let mut chars = Characteristics::default();
        chars.get_mut(CharacteristicName::Fellowship).advances = 5;

        for (name, value) in chars.iter() {
            if name == CharacteristicName::Fellowship {
                assert_eq!(value, Characteristic::new(30, 5));
            } else {
                assert_eq!(value, Characteristic::new(30, 0));
            }
        }
    }
}
