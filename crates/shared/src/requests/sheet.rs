//! Sheet commands - one per user gesture on an open sheet.

use serde::{Deserialize, Serialize};
use sheetkeep_domain::editors::{
    ArmorField, ExperienceField, MovementField, PoolField, PrayerField, SkillField, SpellField,
    TalentField, TrappingField, WeaponField,
};
use sheetkeep_domain::{
    CharacteristicField, CharacteristicName, Denomination, IdentityField, SkillKind,
};

/// A single edit sent by the browser.
///
/// Numeric values travel as the raw text the user typed; the engine coerces
/// them the same way for every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SheetCommand {
    // =========================================================================
    // Main tab
    // =========================================================================
    SetIdentity {
        field: IdentityField,
        value: String,
    },
    EditCharacteristic {
        name: CharacteristicName,
        field: CharacteristicField,
        value: String,
    },
    EditFate {
        field: PoolField,
        value: String,
    },
    EditResilience {
        field: PoolField,
        value: String,
    },
    SetFortune {
        value: String,
    },
    SetResolve {
        value: String,
    },
    EditExperience {
        field: ExperienceField,
        value: String,
    },
    EditMovement {
        field: MovementField,
        value: String,
    },
    SetNotes {
        value: String,
    },

    // =========================================================================
    // Skills
    // =========================================================================
    /// Update the add-row draft; absent parts are left as they are
    SetSkillDraft {
        kind: SkillKind,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        characteristic: Option<CharacteristicName>,
    },
    AddSkill {
        kind: SkillKind,
    },
    UpdateSkill {
        kind: SkillKind,
        index: usize,
        edit: SkillField,
    },
    DeleteSkill {
        kind: SkillKind,
        index: usize,
    },

    // =========================================================================
    // Talents
    // =========================================================================
    SetTalentDraft {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    AddTalent,
    UpdateTalent {
        index: usize,
        edit: TalentField,
    },
    DeleteTalent {
        index: usize,
    },

    // =========================================================================
    // Combat
    // =========================================================================
    SetWeaponDraft {
        name: String,
    },
    AddWeapon,
    UpdateWeapon {
        index: usize,
        edit: WeaponField,
    },
    DeleteWeapon {
        index: usize,
    },
    SetArmorDraft {
        name: String,
    },
    AddArmor,
    UpdateArmor {
        index: usize,
        edit: ArmorField,
    },
    DeleteArmor {
        index: usize,
    },

    // =========================================================================
    // Trappings & money
    // =========================================================================
    SetMoney {
        denomination: Denomination,
        value: String,
    },
    SetTrappingDraft {
        name: String,
    },
    AddTrapping,
    UpdateTrapping {
        index: usize,
        edit: TrappingField,
    },
    DeleteTrapping {
        index: usize,
    },

    // =========================================================================
    // Spells & prayers
    // =========================================================================
    SetSpellDraft {
        name: String,
    },
    AddSpell,
    UpdateSpell {
        index: usize,
        edit: SpellField,
    },
    DeleteSpell {
        index: usize,
    },
    SetPrayerDraft {
        name: String,
    },
    AddPrayer,
    UpdatePrayer {
        index: usize,
        edit: PrayerField,
    },
    DeletePrayer {
        index: usize,
    },
}

impl SheetCommand {
    /// Draft changes touch only the editor state, never the record.
    pub fn is_draft_only(&self) -> bool {
        matches!(
            self,
            Self::SetSkillDraft { .. }
                | Self::SetTalentDraft { .. }
                | Self::SetWeaponDraft { .. }
                | Self::SetArmorDraft { .. }
                | Self::SetTrappingDraft { .. }
                | Self::SetSpellDraft { .. }
                | Self::SetPrayerDraft { .. }
        )
    }
}
