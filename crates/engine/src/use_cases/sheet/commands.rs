//! Route one sheet command to its section editor.

use chrono::{DateTime, Utc};
use sheetkeep_domain::editors::input::int_or;
use sheetkeep_domain::editors::{
    edit_characteristic, edit_experience, edit_money, edit_movement, edit_pool, ArmorEditor,
    ListEditor, PrayerEditor, SkillListEditor, SpellEditor, TalentListEditor, TrappingEditor,
    WeaponEditor,
};
use sheetkeep_domain::{CharacterUpdate, DomainError};
use sheetkeep_shared::SheetCommand;

use super::session::ReadySheet;

/// Apply `command` to the sheet's editors and produce the section update it
/// implies, if any.
///
/// Draft edits and adds with an empty draft name change no record section and
/// return `None`. The record itself is left for the caller to merge.
pub(crate) fn route(
    sheet: &mut ReadySheet,
    command: SheetCommand,
    now: DateTime<Utc>,
) -> Result<Option<CharacterUpdate>, DomainError> {
    let ReadySheet { character, editors } = sheet;

    let update = match command {
        // =====================================================================
        // Main tab
        // =====================================================================
        SheetCommand::SetIdentity { field, value } => CharacterUpdate::Identity(field, value),
        SheetCommand::EditCharacteristic { name, field, value } => CharacterUpdate::Characteristics(
            edit_characteristic(&character.characteristics, name, field, &value),
        ),
        SheetCommand::EditFate { field, value } => {
            CharacterUpdate::Fate(edit_pool(&character.fate, field, &value))
        }
        SheetCommand::EditResilience { field, value } => {
            CharacterUpdate::Resilience(edit_pool(&character.resilience, field, &value))
        }
        SheetCommand::SetFortune { value } => CharacterUpdate::Fortune(int_or(&value, 0)),
        SheetCommand::SetResolve { value } => CharacterUpdate::Resolve(int_or(&value, 0)),
        SheetCommand::EditExperience { field, value } => {
            CharacterUpdate::Experience(edit_experience(&character.experience, field, &value))
        }
        SheetCommand::EditMovement { field, value } => {
            CharacterUpdate::Movement(edit_movement(&character.movement, field, &value))
        }
        SheetCommand::SetNotes { value } => CharacterUpdate::Notes(value),

        // =====================================================================
        // Skills
        // =====================================================================
        SheetCommand::SetSkillDraft {
            kind,
            name,
            characteristic,
        } => {
            let editor = editors.skills_mut(kind);
            if let Some(name) = name {
                editor.set_draft_name(name);
            }
            if let Some(characteristic) = characteristic {
                editor.set_draft_characteristic(characteristic);
            }
            return Ok(None);
        }
        SheetCommand::AddSkill { kind } => match editors.skills_mut(kind).add(character.skills(kind)) {
            Some(skills) => CharacterUpdate::Skills(kind, skills),
            None => return Ok(None),
        },
        SheetCommand::UpdateSkill { kind, index, edit } => CharacterUpdate::Skills(
            kind,
            SkillListEditor::update(character.skills(kind), index, edit)?,
        ),
        SheetCommand::DeleteSkill { kind, index } => {
            CharacterUpdate::Skills(kind, SkillListEditor::delete(character.skills(kind), index)?)
        }

        // =====================================================================
        // Talents
        // =====================================================================
        SheetCommand::SetTalentDraft { name, description } => {
            if let Some(name) = name {
                editors.talents.set_draft_name(name);
            }
            if let Some(description) = description {
                editors.talents.set_draft_description(description);
            }
            return Ok(None);
        }
        SheetCommand::AddTalent => match editors.talents.add(&character.talents) {
            Some(talents) => CharacterUpdate::Talents(talents),
            None => return Ok(None),
        },
        SheetCommand::UpdateTalent { index, edit } => {
            CharacterUpdate::Talents(TalentListEditor::update(&character.talents, index, edit)?)
        }
        SheetCommand::DeleteTalent { index } => {
            CharacterUpdate::Talents(TalentListEditor::delete(&character.talents, index)?)
        }

        // =====================================================================
        // Combat
        // =====================================================================
        SheetCommand::SetWeaponDraft { name } => {
            editors.weapons.set_draft_name(name);
            return Ok(None);
        }
        SheetCommand::AddWeapon => match editors.weapons.add(&character.weapons, now) {
            Some(weapons) => CharacterUpdate::Weapons(weapons),
            None => return Ok(None),
        },
        SheetCommand::UpdateWeapon { index, edit } => {
            CharacterUpdate::Weapons(WeaponEditor::update(&character.weapons, index, edit)?)
        }
        SheetCommand::DeleteWeapon { index } => {
            CharacterUpdate::Weapons(WeaponEditor::delete(&character.weapons, index)?)
        }
        SheetCommand::SetArmorDraft { name } => {
            editors.armor.set_draft_name(name);
            return Ok(None);
        }
        SheetCommand::AddArmor => match editors.armor.add(&character.armor, now) {
            Some(armor) => CharacterUpdate::Armor(armor),
            None => return Ok(None),
        },
        SheetCommand::UpdateArmor { index, edit } => {
            CharacterUpdate::Armor(ArmorEditor::update(&character.armor, index, edit)?)
        }
        SheetCommand::DeleteArmor { index } => {
            CharacterUpdate::Armor(ArmorEditor::delete(&character.armor, index)?)
        }

        // =====================================================================
        // Trappings & money
        // =====================================================================
        SheetCommand::SetMoney {
            denomination,
            value,
        } => CharacterUpdate::Money(edit_money(&character.money, denomination, &value)),
        SheetCommand::SetTrappingDraft { name } => {
            editors.trappings.set_draft_name(name);
            return Ok(None);
        }
        SheetCommand::AddTrapping => match editors.trappings.add(&character.trappings, now) {
            Some(trappings) => CharacterUpdate::Trappings(trappings),
            None => return Ok(None),
        },
        SheetCommand::UpdateTrapping { index, edit } => CharacterUpdate::Trappings(
            TrappingEditor::update(&character.trappings, index, edit)?,
        ),
        SheetCommand::DeleteTrapping { index } => {
            CharacterUpdate::Trappings(TrappingEditor::delete(&character.trappings, index)?)
        }

        // =====================================================================
        // Spells & prayers
        // =====================================================================
        SheetCommand::SetSpellDraft { name } => {
            editors.spells.set_draft_name(name);
            return Ok(None);
        }
        SheetCommand::AddSpell => match editors.spells.add(&character.spells, now) {
            Some(spells) => CharacterUpdate::Spells(spells),
            None => return Ok(None),
        },
        SheetCommand::UpdateSpell { index, edit } => {
            CharacterUpdate::Spells(SpellEditor::update(&character.spells, index, edit)?)
        }
        SheetCommand::DeleteSpell { index } => {
            CharacterUpdate::Spells(SpellEditor::delete(&character.spells, index)?)
        }
        SheetCommand::SetPrayerDraft { name } => {
            editors.prayers.set_draft_name(name);
            return Ok(None);
        }
        SheetCommand::AddPrayer => match editors.prayers.add(&character.prayers, now) {
            Some(prayers) => CharacterUpdate::Prayers(prayers),
            None => return Ok(None),
        },
        SheetCommand::UpdatePrayer { index, edit } => {
            CharacterUpdate::Prayers(PrayerEditor::update(&character.prayers, index, edit)?)
        }
        SheetCommand::DeletePrayer { index } => {
            CharacterUpdate::Prayers(PrayerEditor::delete(&character.prayers, index)?)
        }
    };

    Ok(Some(update))
}
