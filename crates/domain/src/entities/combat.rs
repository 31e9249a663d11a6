//! Combat gear - weapons and armor.

use serde::{Deserialize, Serialize};

use crate::ids::ItemKey;

/// A weapon carried by the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: ItemKey,
    pub name: String,
    pub group: String,
    pub encumbrance: i32,
    pub range: String,
    /// Free-text damage expression, e.g. "SB+4"
    pub damage: String,
    pub qualities: Vec<String>,
}

impl Weapon {
    pub const DEFAULT_GROUP: &'static str = "Basic";
    pub const DEFAULT_RANGE: &'static str = "Average";
    pub const DEFAULT_DAMAGE: &'static str = "SB+4";

    /// A new weapon with the add-row defaults.
    pub fn new(id: ItemKey, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            group: Self::DEFAULT_GROUP.to_string(),
            encumbrance: 0,
            range: Self::DEFAULT_RANGE.to_string(),
            damage: Self::DEFAULT_DAMAGE.to_string(),
            qualities: Vec::new(),
        }
    }
}

/// A piece of armor covering one or more hit locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Armor {
    pub id: ItemKey,
    pub name: String,
    /// "Head", "Body", "Arms", "Legs", ...
    pub locations: Vec<String>,
    pub encumbrance: i32,
    pub ap: i32,
    pub qualities: Vec<String>,
}

impl Armor {
    pub const DEFAULT_LOCATION: &'static str = "Body";

    pub fn new(id: ItemKey, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            locations: vec![Self::DEFAULT_LOCATION.to_string()],
            encumbrance: 0,
            ap: 1,
            qualities: Vec::new(),
        }
    }
}
