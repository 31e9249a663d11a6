//! Characteristics table: initial, advances and total across the ten columns.

use serde::{Deserialize, Serialize};

use crate::characteristics::{CharacteristicField, CharacteristicName, Characteristics};
use crate::editors::input::int_or;

/// One column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicColumn {
    pub name: CharacteristicName,
    pub initial: i32,
    pub advances: i32,
    pub total: i64,
}

/// The rendered table, columns in sheet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicTable {
    pub columns: Vec<CharacteristicColumn>,
}

impl CharacteristicTable {
    pub fn initial_row(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.iter().map(|c| c.initial)
    }

    pub fn advances_row(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.iter().map(|c| c.advances)
    }

    pub fn total_row(&self) -> impl Iterator<Item = i64> + '_ {
        self.columns.iter().map(|c| c.total)
    }

    pub fn column(&self, name: CharacteristicName) -> Option<&CharacteristicColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl From<&Characteristics> for CharacteristicTable {
    fn from(chars: &Characteristics) -> Self {
        let columns = chars
            .iter()
            .map(|(name, c)| CharacteristicColumn {
                name,
                initial: c.initial,
                advances: c.advances,
                total: c.total(),
            })
            .collect();
        Self { columns }
    }
}

/// Apply one cell edit. Unparseable input becomes 0.
pub fn edit_characteristic(
    chars: &Characteristics,
    name: CharacteristicName,
    field: CharacteristicField,
    input: &str,
) -> Characteristics {
    let mut next = *chars;
    let value = int_or(input, 0);
    *next.get_mut(name) = chars.get(name).with(field, value);
    next
}
