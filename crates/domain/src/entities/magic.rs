//! Spells and prayers known by the character.

use serde::{Deserialize, Serialize};

use crate::ids::ItemKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: ItemKey,
    pub name: String,
    /// Casting number
    pub cn: i32,
    pub range: String,
    pub target: String,
    pub duration: String,
    pub effect: String,
}

impl Spell {
    pub fn new(id: ItemKey, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cn: 0,
            range: String::new(),
            target: String::new(),
            duration: String::new(),
            effect: String::new(),
        }
    }
}

/// A blessing or miracle. Same shape as a spell, minus the casting number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prayer {
    pub id: ItemKey,
    pub name: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub effect: String,
}

impl Prayer {
    pub fn new(id: ItemKey, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            range: String::new(),
            target: String::new(),
            duration: String::new(),
            effect: String::new(),
        }
    }
}
