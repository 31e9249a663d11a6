//! Section editors.
//!
//! Each editor takes the current slice of a character plus one user input
//! and returns the new whole slice. Editors hold only add-row drafts; the
//! record itself lives with the caller.

pub mod characteristics;
pub mod combat;
pub mod input;
pub mod list;
pub mod magic;
pub mod skills;
pub mod status;
pub mod talents;
pub mod trappings;

pub use characteristics::{edit_characteristic, CharacteristicColumn, CharacteristicTable};
pub use combat::{ArmorEditor, ArmorField, WeaponEditor, WeaponField};
pub use input::{join_tags, split_tags};
pub use list::ListEditor;
pub use magic::{PrayerEditor, PrayerField, SpellEditor, SpellField};
pub use skills::{SkillField, SkillListEditor};
pub use status::{
    edit_experience, edit_movement, edit_pool, ExperienceField, MovementField, PoolField,
};
pub use talents::{TalentField, TalentListEditor};
pub use trappings::{edit_money, TrappingEditor, TrappingField};
