use serde::{Deserialize, Serialize};

/// A talent, possibly taken more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talent {
    pub name: String,
    pub times_taken: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Talent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            times_taken: 1,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
