//! Skill entity - a trained ability governed by one characteristic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::characteristics::CharacteristicName;

/// A basic or advanced skill on the sheet.
///
/// Skills carry no identifier: their position in the list is their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub characteristic: CharacteristicName,
    pub advances: i32,
    /// Grouped skills like "Art (Painting)" versus plain "Art"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>, characteristic: CharacteristicName) -> Self {
        Self {
            name: name.into(),
            characteristic,
            advances: 0,
            is_group: None,
            group: None,
        }
    }

    pub fn with_advances(mut self, advances: i32) -> Self {
        self.advances = advances;
        self
    }
}

/// Which of the two skill lists a skill editor works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Basic,
    Advanced,
}

impl SkillKind {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Skills",
            Self::Advanced => "Advanced Skills",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "Basic"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}
