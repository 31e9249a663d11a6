//! Character aggregate - the root of a character sheet.
//!
//! # Design
//!
//! - The record body never carries its own storage key. `StoredCharacter`
//!   pairs the two for callers that need both, and only the body is written.
//! - Every list is non-optional. Older documents with missing lists are
//!   backfilled at load time (see `crate::migration`).
//! - Field names serialize in camelCase to match the stored document layout.

use serde::{Deserialize, Serialize};

use crate::characteristics::Characteristics;
use crate::entities::{Armor, Money, Prayer, Skill, Spell, Talent, Trapping, Weapon};
use crate::ids::{CharacterId, UserId};

/// Current/total pair used by fate and resilience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    pub total: i32,
    pub current: i32,
}

impl Pool {
    pub fn full(total: i32) -> Self {
        Self {
            total,
            current: total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Experience {
    pub current: i32,
    pub spent: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    #[serde(rename = "move")]
    pub move_rate: i32,
    pub walk: i32,
    pub run: i32,
}

/// A character record as stored in the `characters` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Owning user. Exactly one per record.
    pub user_id: UserId,

    // Identity
    pub name: String,
    pub species: String,
    pub class: String,
    pub career: String,
    pub career_level: String,
    /// e.g. "Silver 3"
    pub status: String,
    pub age: String,
    pub height: String,
    pub hair: String,
    pub eyes: String,

    pub characteristics: Characteristics,

    pub fate: Pool,
    pub fortune: i32,
    pub resilience: Pool,
    pub resolve: i32,
    pub experience: Experience,
    pub movement: Movement,

    pub basic_skills: Vec<Skill>,
    pub advanced_skills: Vec<Skill>,
    pub talents: Vec<Talent>,

    pub weapons: Vec<Weapon>,
    pub armor: Vec<Armor>,
    pub trappings: Vec<Trapping>,
    pub money: Money,

    pub spells: Vec<Spell>,
    pub prayers: Vec<Prayer>,

    pub notes: String,
}

impl Character {
    /// The fixed creation template, owned by `owner`.
    ///
    /// All characteristics at 30 with no advances, every list empty, an empty
    /// purse.
    pub fn from_template(owner: UserId) -> Self {
        Self {
            user_id: owner,
            name: "New Character".to_string(),
            species: "Human".to_string(),
            class: "Burgher".to_string(),
            career: "Agitator".to_string(),
            career_level: "1".to_string(),
            status: "Brass 1".to_string(),
            age: "25".to_string(),
            height: "5'9".to_string(),
            hair: "Brown".to_string(),
            eyes: "Brown".to_string(),

            characteristics: Characteristics::uniform(30),

            fate: Pool::full(3),
            fortune: 3,
            resilience: Pool::full(3),
            resolve: 3,
            experience: Experience::default(),
            movement: Movement {
                move_rate: 4,
                walk: 8,
                run: 16,
            },

            basic_skills: Vec::new(),
            advanced_skills: Vec::new(),
            talents: Vec::new(),

            weapons: Vec::new(),
            armor: Vec::new(),
            trappings: Vec::new(),
            money: Money::default(),

            spells: Vec::new(),
            prayers: Vec::new(),

            notes: String::new(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// A character together with its storage-assigned key.
///
/// Serializes flat (`id` alongside the body fields) for display. Storage
/// adapters write only `character`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCharacter {
    pub id: CharacterId,
    #[serde(flatten)]
    pub character: Character,
}

impl StoredCharacter {
    pub fn new(id: CharacterId, character: Character) -> Self {
        Self { id, character }
    }

    /// Split into the storage key and the body to persist.
    pub fn into_parts(self) -> (CharacterId, Character) {
        (self.id, self.character)
    }
}
