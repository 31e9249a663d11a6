//! Character document store adapters.
//!
//! Both adapters keep the body as a JSON object and implement `update` as a
//! top-level field merge: every field of the new body replaces the stored
//! field of the same name, and stored fields the new body lacks are kept.

mod memory;
mod sqlite;

pub use memory::InMemoryCharacterStore;
pub use sqlite::SqliteCharacterStore;

use serde_json::{Map, Value};
use sheetkeep_domain::{Character, CharacterDocument};

use crate::infrastructure::ports::RepoError;

/// Serialize a body to a JSON object.
fn body_object(character: &Character) -> Result<Map<String, Value>, RepoError> {
    match serde_json::to_value(character).map_err(RepoError::serialization)? {
        Value::Object(map) => Ok(map),
        other => Err(RepoError::serialization(format!(
            "character body serialized to {other}, expected an object"
        ))),
    }
}

fn merge_top_level(stored: &mut Map<String, Value>, update: Map<String, Value>) {
    for (field, value) in update {
        stored.insert(field, value);
    }
}

fn parse_document(body: Value) -> Result<CharacterDocument, RepoError> {
    serde_json::from_value(body).map_err(RepoError::serialization)
}
