use serde::{Deserialize, Serialize};

use crate::ids::ItemKey;

/// An inventory item. Encumbrance may be fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trapping {
    pub id: ItemKey,
    pub name: String,
    pub amount: i32,
    pub encumbrance: f64,
}

impl Trapping {
    pub fn new(id: ItemKey, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            amount: 1,
            encumbrance: 0.0,
        }
    }
}
