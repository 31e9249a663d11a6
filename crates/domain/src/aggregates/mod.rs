//! Aggregates - roots that own their embedded entities.

pub mod character;
pub mod update;

pub use character::{Character, Experience, Movement, Pool, StoredCharacter};
pub use update::{CharacterUpdate, IdentityField};
