//! Basic and advanced skill lists.

use serde::{Deserialize, Serialize};

use crate::characteristics::CharacteristicName;
use crate::editors::input::int_or;
use crate::editors::list::{append_named, ListEditor};
use crate::entities::{Skill, SkillKind};

/// One editable cell of a skill row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SkillField {
    Name(String),
    Characteristic(CharacteristicName),
    /// Raw text; coerced to an integer, fallback 0
    Advances(String),
}

/// Editor for one of the two skill lists, with its add-row draft.
///
/// The draft characteristic starts at WS and is kept between adds so a run
/// of skills under the same characteristic needs one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillListEditor {
    kind: SkillKind,
    draft_name: String,
    draft_characteristic: CharacteristicName,
}

impl SkillListEditor {
    pub fn new(kind: SkillKind) -> Self {
        Self {
            kind,
            draft_name: String::new(),
            draft_characteristic: CharacteristicName::WeaponSkill,
        }
    }

    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn draft_characteristic(&self) -> CharacteristicName {
        self.draft_characteristic
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    pub fn set_draft_characteristic(&mut self, characteristic: CharacteristicName) {
        self.draft_characteristic = characteristic;
    }

    /// Append the draft as a new skill with 0 advances.
    ///
    /// Returns `None` when the draft name is empty.
    pub fn add(&mut self, skills: &[Skill]) -> Option<Vec<Skill>> {
        let characteristic = self.draft_characteristic;
        append_named(skills, &mut self.draft_name, |name| {
            Skill::new(name, characteristic)
        })
    }
}

impl ListEditor for SkillListEditor {
    type Item = Skill;
    type Field = SkillField;

    const LIST: &'static str = "skills";

    fn apply_field(skill: &mut Skill, field: SkillField) {
        match field {
            SkillField::Name(name) => skill.name = name,
            SkillField::Characteristic(c) => skill.characteristic = c,
            SkillField::Advances(input) => skill.advances = int_or(&input, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn sample() -> Vec<Skill> {
        vec![
            Skill::new("Athletics", CharacteristicName::Agility).with_advances(5),
            Skill::new("Charm", CharacteristicName::Fellowship),
            Skill::new("Endurance", CharacteristicName::Toughness).with_advances(3),
        ]
    }

    #[test]
    fn add_with_empty_name_does_nothing() {
        let mut editor = SkillListEditor::new(SkillKind::Basic);
        assert_eq!(editor.add(&sample()), None);
    }

    #[test]
    fn add_appends_and_clears_the_name_but_not_the_characteristic() {
        let mut editor = SkillListEditor::new(SkillKind::Advanced);
        assert_eq!(editor.draft_characteristic(), CharacteristicName::WeaponSkill);

        editor.set_draft_name("Channelling");
        editor.set_draft_characteristic(CharacteristicName::Willpower);
        let skills = editor.add(&sample()).unwrap();

        assert_eq!(skills.len(), 4);
        assert_eq!(skills[3], Skill::new("Channelling", CharacteristicName::Willpower));
        assert_eq!(&skills[..3], sample().as_slice());
        assert_eq!(editor.draft_name(), "");
        assert_eq!(editor.draft_characteristic(), CharacteristicName::Willpower);

        editor.set_draft_name("Language (Magick)");
        let skills = editor.add(&skills).unwrap();
        assert_eq!(skills[4].characteristic, CharacteristicName::Willpower);
    }

    #[test]
    fn update_touches_one_field_of_one_row() {
        let before = sample();
        let after =
            SkillListEditor::update(&before, 1, SkillField::Advances("7".to_string())).unwrap();

        assert_eq!(after[1].advances, 7);
        assert_eq!(after[1].name, "Charm");
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn non_numeric_advances_become_zero() {
        let after =
            SkillListEditor::update(&sample(), 0, SkillField::Advances("lots".to_string()))
                .unwrap();
        assert_eq!(after[0].advances, 0);
    }

    #[test]
    fn characteristic_can_be_changed_per_row() {
        let after = SkillListEditor::update(
            &sample(),
            2,
            SkillField::Characteristic(CharacteristicName::Willpower),
        )
        .unwrap();
        assert_eq!(after[2].characteristic, CharacteristicName::Willpower);
    }

    #[test]
    fn delete_removes_that_position() {
        let after = SkillListEditor::delete(&sample(), 0).unwrap();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].name, "Charm");
        assert_eq!(after[1].name, "Endurance");
    }

    #[test]
    fn out_of_range_delete_is_rejected() {
        assert!(matches!(
            SkillListEditor::delete(&sample(), 3),
            Err(DomainError::IndexOutOfRange { len: 3, .. })
        ));
    }

    #[test]
    fn field_wire_shape() {
        let json = serde_json::to_value(SkillField::Advances("4".into())).unwrap();
        assert_eq!(json, serde_json::json!({"field": "advances", "value": "4"}));

        let field: SkillField =
            serde_json::from_value(serde_json::json!({"field": "characteristic", "value": "Int"}))
                .unwrap();
        assert_eq!(field, SkillField::Characteristic(CharacteristicName::Intelligence));
    }
}
