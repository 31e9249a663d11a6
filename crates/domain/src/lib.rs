//! Sheetkeep domain: the character record, its creation template, load-time
//! backfill, and the pure section editors that produce record updates.

pub mod aggregates;
pub mod characteristics;
pub mod editors;
pub mod entities;
pub mod error;
pub mod ids;
pub mod migration;

pub use aggregates::{
    Character, CharacterUpdate, Experience, IdentityField, Movement, Pool, StoredCharacter,
};
pub use characteristics::{
    Characteristic, CharacteristicField, CharacteristicName, Characteristics,
};
pub use entities::{
    Armor, Denomination, Money, Prayer, Skill, SkillKind, Spell, Talent, Trapping, Weapon,
};
pub use error::DomainError;
pub use ids::{CharacterId, ItemKey, UserId};
pub use migration::{Backfilled, CharacterDocument, PartialCharacteristics};
