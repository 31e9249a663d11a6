//! Trappings and the coin purse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::editors::input::{float_or, int_or};
use crate::editors::list::{append_named, ListEditor};
use crate::entities::{Denomination, Money, Trapping};
use crate::ids::ItemKey;

/// Set one denomination; the others are untouched and nothing converts.
pub fn edit_money(money: &Money, denomination: Denomination, input: &str) -> Money {
    money.with(denomination, int_or(input, 0))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TrappingField {
    Name(String),
    Amount(String),
    /// Fractional, e.g. "0.5"
    Encumbrance(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrappingEditor {
    draft_name: String,
}

impl TrappingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    pub fn add(&mut self, trappings: &[Trapping], now: DateTime<Utc>) -> Option<Vec<Trapping>> {
        append_named(trappings, &mut self.draft_name, |name| {
            Trapping::new(ItemKey::stamped(now), name)
        })
    }
}

impl ListEditor for TrappingEditor {
    type Item = Trapping;
    type Field = TrappingField;

    const LIST: &'static str = "trappings";

    fn apply_field(trapping: &mut Trapping, field: TrappingField) {
        match field {
            TrappingField::Name(v) => trapping.name = v,
            TrappingField::Amount(input) => trapping.amount = int_or(&input, 0),
            TrappingField::Encumbrance(input) => trapping.encumbrance = float_or(&input, 0.0),
        }
    }
}
