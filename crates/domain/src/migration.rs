//! Load-time backfill for older character documents.
//!
//! Documents written by earlier versions may be missing whole lists or
//! sub-records. `CharacterDocument` is the lenient read shape; `backfill`
//! turns it into a strict [`Character`] so nothing downstream has to handle
//! absence. Missing pieces take their template values.

use serde::{Deserialize, Serialize};

use crate::aggregates::{Character, Experience, Movement, Pool};
use crate::characteristics::{Characteristic, CharacteristicName, Characteristics};
use crate::entities::{Armor, Money, Prayer, Skill, Spell, Talent, Trapping, Weapon};
use crate::error::DomainError;
use crate::ids::UserId;

/// Characteristics where individual entries may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialCharacteristics {
    #[serde(rename = "WS", default)]
    pub weapon_skill: Option<Characteristic>,
    #[serde(rename = "BS", default)]
    pub ballistic_skill: Option<Characteristic>,
    #[serde(rename = "S", default)]
    pub strength: Option<Characteristic>,
    #[serde(rename = "T", default)]
    pub toughness: Option<Characteristic>,
    #[serde(rename = "I", default)]
    pub initiative: Option<Characteristic>,
    #[serde(rename = "Ag", default)]
    pub agility: Option<Characteristic>,
    #[serde(rename = "Dex", default)]
    pub dexterity: Option<Characteristic>,
    #[serde(rename = "Int", default)]
    pub intelligence: Option<Characteristic>,
    #[serde(rename = "WP", default)]
    pub willpower: Option<Characteristic>,
    #[serde(rename = "Fel", default)]
    pub fellowship: Option<Characteristic>,
}

impl PartialCharacteristics {
    fn entry(&self, name: CharacteristicName) -> Option<Characteristic> {
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

    /// Fill missing entries from `fallback`; returns whether any were missing.
    fn complete(&self, fallback: Characteristics) -> (Characteristics, bool) {
        let mut out = fallback;
        let mut missing = false;
        for name in CharacteristicName::ALL {
            match self.entry(name) {
                Some(value) => *out.get_mut(name) = value,
                None => missing = true,
            }
        }
        (out, missing)
    }
}

/// A stored character body as it may appear in older documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterDocument {
    pub user_id: Option<UserId>,

    pub name: Option<String>,
    pub species: Option<String>,
    pub class: Option<String>,
    pub career: Option<String>,
    pub career_level: Option<String>,
    pub status: Option<String>,
    pub age: Option<String>,
    pub height: Option<String>,
    pub hair: Option<String>,
    pub eyes: Option<String>,

    pub characteristics: Option<PartialCharacteristics>,

    pub fate: Option<Pool>,
    pub fortune: Option<i32>,
    pub resilience: Option<Pool>,
    pub resolve: Option<i32>,
    pub experience: Option<Experience>,
    pub movement: Option<Movement>,

    pub basic_skills: Option<Vec<Skill>>,
    pub advanced_skills: Option<Vec<Skill>>,
    pub talents: Option<Vec<Talent>>,

    pub weapons: Option<Vec<Weapon>>,
    pub armor: Option<Vec<Armor>>,
    pub trappings: Option<Vec<Trapping>>,
    pub money: Option<Money>,

    pub spells: Option<Vec<Spell>>,
    pub prayers: Option<Vec<Prayer>>,

    pub notes: Option<String>,
}

/// Result of backfilling a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Backfilled {
    pub character: Character,
    /// Document fields that were absent and took template values.
    pub defaulted: Vec<&'static str>,
}

impl Backfilled {
    pub fn was_complete(&self) -> bool {
        self.defaulted.is_empty()
    }
}

impl CharacterDocument {
    /// Produce a strict character, defaulting every absent field.
    ///
    /// The owner is the one field that cannot be defaulted.
    pub fn backfill(self) -> Result<Backfilled, DomainError> {
        let owner = self
            .user_id
            .ok_or_else(|| DomainError::validation("character document has no owner"))?;

        let template = Character::from_template(owner.clone());
        let mut defaulted = Vec::new();

        // Identity strings default to empty rather than to template text: an
        // absent name on an old record is not "New Character".
        let mut text = |value: Option<String>, field: &'static str| {
            value.unwrap_or_else(|| {
                defaulted.push(field);
                String::new()
            })
        };
        let name = text(self.name, "name");
        let species = text(self.species, "species");
        let class = text(self.class, "class");
        let career = text(self.career, "career");
        let career_level = text(self.career_level, "careerLevel");
        let status = text(self.status, "status");
        let age = text(self.age, "age");
        let height = text(self.height, "height");
        let hair = text(self.hair, "hair");
        let eyes = text(self.eyes, "eyes");
        let notes = text(self.notes, "notes");

        let characteristics = match self.characteristics {
            Some(partial) => {
                let (chars, missing) = partial.complete(template.characteristics);
                if missing {
                    defaulted.push("characteristics");
                }
                chars
            }
            None => {
                defaulted.push("characteristics");
                template.characteristics
            }
        };

        fn or_template<T>(
            value: Option<T>,
            fallback: T,
            field: &'static str,
            defaulted: &mut Vec<&'static str>,
        ) -> T {
            value.unwrap_or_else(|| {
                defaulted.push(field);
                fallback
            })
        }

        let character = Character {
            user_id: owner,
            name,
            species,
            class,
            career,
            career_level,
            status,
            age,
            height,
            hair,
            eyes,
            characteristics,
            fate: or_template(self.fate, template.fate, "fate", &mut defaulted),
            fortune: or_template(self.fortune, template.fortune, "fortune", &mut defaulted),
            resilience: or_template(self.resilience, template.resilience, "resilience", &mut defaulted),
            resolve: or_template(self.resolve, template.resolve, "resolve", &mut defaulted),
            experience: or_template(self.experience, template.experience, "experience", &mut defaulted),
            movement: or_template(self.movement, template.movement, "movement", &mut defaulted),
            basic_skills: or_template(self.basic_skills, Vec::new(), "basicSkills", &mut defaulted),
            advanced_skills: or_template(self.advanced_skills, Vec::new(), "advancedSkills", &mut defaulted),
            talents: or_template(self.talents, Vec::new(), "talents", &mut defaulted),
            weapons: or_template(self.weapons, Vec::new(), "weapons", &mut defaulted),
            armor: or_template(self.armor, Vec::new(), "armor", &mut defaulted),
            trappings: or_template(self.trappings, Vec::new(), "trappings", &mut defaulted),
            money: or_template(self.money, template.money, "money", &mut defaulted),
            spells: or_template(self.spells, Vec::new(), "spells", &mut defaulted),
            prayers: or_template(self.prayers, Vec::new(), "prayers", &mut defaulted),
            notes,
        };

        Ok(Backfilled {
            character,
            defaulted,
        })
    }
}

impl From<Character> for CharacterDocument {
    fn from(c: Character) -> Self {
        let chars = c.characteristics;
        Self {
            user_id: Some(c.user_id),
            name: Some(c.name),
            species: Some(c.species),
            class: Some(c.class),
            career: Some(c.career),
            career_level: Some(c.career_level),
            status: Some(c.status),
            age: Some(c.age),
            height: Some(c.height),
            hair: Some(c.hair),
            eyes: Some(c.eyes),
            characteristics: Some(PartialCharacteristics {
                weapon_skill: Some(chars.weapon_skill),
                ballistic_skill: Some(chars.ballistic_skill),
                strength: Some(chars.strength),
                toughness: Some(chars.toughness),
                initiative: Some(chars.initiative),
                agility: Some(chars.agility),
                dexterity: Some(chars.dexterity),
                intelligence: Some(chars.intelligence),
                willpower: Some(chars.willpower),
                fellowship: Some(chars.fellowship),
            }),
            fate: Some(c.fate),
            fortune: Some(c.fortune),
            resilience: Some(c.resilience),
            resolve: Some(c.resolve),
            experience: Some(c.experience),
            movement: Some(c.movement),
            basic_skills: Some(c.basic_skills),
            advanced_skills: Some(c.advanced_skills),
            talents: Some(c.talents),
            weapons: Some(c.weapons),
            armor: Some(c.armor),
            trappings: Some(c.trappings),
            money: Some(c.money),
            spells: Some(c.spells),
            prayers: Some(c.prayers),
            notes: Some(c.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_document_needs_no_backfill() {
        let original = Character::from_template(UserId::new("u1"));
        let doc = CharacterDocument::from(original.clone());

        let result = doc.backfill().unwrap();

        assert!(result.was_complete());
        assert_eq!(result.character, original);
    }

    #[test]
    fn missing_lists_become_empty() {
        let doc: CharacterDocument = serde_json::from_value(json!({
            "userId": "u1",
            "name": "Gunther",
            "characteristics": {
                "WS": {"initial": 41, "advances": 5}
            },
            "talents": [{"name": "Strike Mighty Blow", "timesTaken": 2}]
        }))
        .unwrap();

        let result = doc.backfill().unwrap();
        let c = result.character;

        assert_eq!(c.name, "Gunther");
        assert_eq!(c.characteristics.total(CharacteristicName::WeaponSkill), 46);
        assert_eq!(c.characteristics.get(CharacteristicName::Fellowship), Characteristic::new(30, 0));
        assert_eq!(c.talents.len(), 1);
        assert!(c.basic_skills.is_empty());
        assert!(c.weapons.is_empty());
        assert!(c.prayers.is_empty());
        assert_eq!(c.money, Money::default());

        assert!(result.defaulted.contains(&"basicSkills"));
        assert!(result.defaulted.contains(&"characteristics"));
        assert!(!result.defaulted.contains(&"talents"));
        assert!(!result.defaulted.contains(&"name"));
    }

    #[test]
    fn document_without_owner_is_rejected() {
        let doc: CharacterDocument = serde_json::from_value(json!({"name": "Orphan"})).unwrap();
        assert!(matches!(doc.backfill(), Err(DomainError::Validation(_))));
    }
}
