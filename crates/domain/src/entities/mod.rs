//! Entities embedded in a character record.
//!
//! None of these has a lifecycle outside the owning character's lists.

pub mod combat;
pub mod magic;
pub mod money;
pub mod skill;
pub mod talent;
pub mod trapping;

pub use combat::{Armor, Weapon};
pub use magic::{Prayer, Spell};
pub use money::{Denomination, Money};
pub use skill::{Skill, SkillKind};
pub use talent::Talent;
pub use trapping::Trapping;
