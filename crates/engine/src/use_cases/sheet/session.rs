//! One open sheet: its load state, the editable record, and save status.

use sheetkeep_domain::editors::{
    ArmorEditor, CharacteristicTable, PrayerEditor, SkillListEditor, SpellEditor,
    TalentListEditor, TrappingEditor, WeaponEditor,
};
use sheetkeep_domain::{Character, CharacterId, SkillKind, StoredCharacter, UserId};
use sheetkeep_shared::{
    DraftsView, RedirectTarget, SaveStatusView, SheetStateView, SheetView, SkillDraftView,
    TalentDraftView,
};
use tokio::time::Instant;

/// Sessions are per user and per character.
pub type SessionKey = (UserId, CharacterId);

/// Add-row drafts for every list section of one sheet.
pub(crate) struct SheetEditors {
    pub basic_skills: SkillListEditor,
    pub advanced_skills: SkillListEditor,
    pub talents: TalentListEditor,
    pub weapons: WeaponEditor,
    pub armor: ArmorEditor,
    pub trappings: TrappingEditor,
    pub spells: SpellEditor,
    pub prayers: PrayerEditor,
}

impl SheetEditors {
    pub fn new() -> Self {
        Self {
            basic_skills: SkillListEditor::new(SkillKind::Basic),
            advanced_skills: SkillListEditor::new(SkillKind::Advanced),
            talents: TalentListEditor::new(),
            weapons: WeaponEditor::new(),
            armor: ArmorEditor::new(),
            trappings: TrappingEditor::new(),
            spells: SpellEditor::new(),
            prayers: PrayerEditor::new(),
        }
    }

    pub fn skills_mut(&mut self, kind: SkillKind) -> &mut SkillListEditor {
        match kind {
            SkillKind::Basic => &mut self.basic_skills,
            SkillKind::Advanced => &mut self.advanced_skills,
        }
    }

    fn drafts(&self) -> DraftsView {
        let skill = |editor: &SkillListEditor| SkillDraftView {
            name: editor.draft_name().to_string(),
            characteristic: editor.draft_characteristic(),
        };
        DraftsView {
            basic_skill: skill(&self.basic_skills),
            advanced_skill: skill(&self.advanced_skills),
            talent: TalentDraftView {
                name: self.talents.draft_name().to_string(),
                description: self.talents.draft_description().to_string(),
            },
            weapon: self.weapons.draft_name().to_string(),
            armor: self.armor.draft_name().to_string(),
            trapping: self.trappings.draft_name().to_string(),
            spell: self.spells.draft_name().to_string(),
            prayer: self.prayers.draft_name().to_string(),
        }
    }
}

pub(crate) struct ReadySheet {
    pub character: Character,
    pub editors: SheetEditors,
}

pub(crate) enum SheetState {
    Loading,
    Ready(Box<ReadySheet>),
    /// Terminal
    Redirecting(RedirectTarget),
}

pub(crate) struct SheetSession {
    pub id: CharacterId,
    pub state: SheetState,
    /// The document is fetched at most once per mount
    pub fetch_attempted: bool,
    /// Bumped on every record change; a save only reports `Saved` if no
    /// newer change arrived while it ran
    pub revision: u64,
    pub save_status: SaveStatusView,
    pub last_touched: Instant,
}

impl SheetSession {
    pub fn new(id: CharacterId) -> Self {
        Self {
            id,
            state: SheetState::Loading,
            fetch_attempted: false,
            revision: 0,
            save_status: SaveStatusView::Idle,
            last_touched: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    /// Loading after a fetch that failed.
    pub fn is_stuck_loading(&self) -> bool {
        self.fetch_attempted && matches!(self.state, SheetState::Loading)
    }

    pub fn ready(&mut self, character: Character) {
        self.state = SheetState::Ready(Box::new(ReadySheet {
            character,
            editors: SheetEditors::new(),
        }));
    }

    pub fn redirect(&mut self, target: RedirectTarget) {
        self.state = SheetState::Redirecting(target);
    }

    pub fn is_redirecting(&self) -> bool {
        matches!(self.state, SheetState::Redirecting(_))
    }

    pub fn view(&self) -> SheetStateView {
        match &self.state {
            SheetState::Loading => SheetStateView::Loading {
                id: self.id.clone(),
            },
            SheetState::Redirecting(target) => SheetStateView::redirecting(*target),
            SheetState::Ready(sheet) => SheetStateView::Ready(Box::new(SheetView {
                character: StoredCharacter::new(self.id.clone(), sheet.character.clone()),
                characteristics: CharacteristicTable::from(&sheet.character.characteristics),
                drafts: sheet.editors.drafts(),
                save_label: self.save_status.label(),
                save_status: self.save_status.clone(),
            })),
        }
    }
}
