use serde::{Deserialize, Serialize};

use crate::editors::input::int_or;
use crate::editors::list::{append_named, ListEditor};
use crate::entities::Talent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TalentField {
    Name(String),
    Description(String),
    /// Raw text; falls back to 1, so "0" also becomes 1
    TimesTaken(String),
}

/// Talent list editor. The draft carries a name and a description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentListEditor {
    draft_name: String,
    draft_description: String,
}

impl TalentListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn draft_description(&self) -> &str {
        &self.draft_description
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.draft_description = description.into();
    }

    /// Append the draft as a talent taken once. Both draft fields are cleared.
    pub fn add(&mut self, talents: &[Talent]) -> Option<Vec<Talent>> {
        let description = &mut self.draft_description;
        append_named(talents, &mut self.draft_name, |name| {
            let talent = Talent::new(name);
            match std::mem::take(description) {
                d if d.is_empty() => talent,
                d => talent.with_description(d),
            }
        })
    }
}

impl ListEditor for TalentListEditor {
    type Item = Talent;
    type Field = TalentField;

    const LIST: &'static str = "talents";

    fn apply_field(talent: &mut Talent, field: TalentField) {
        match field {
            TalentField::Name(name) => talent.name = name,
            TalentField::Description(d) => talent.description = Some(d),
            TalentField::TimesTaken(input) => talent.times_taken = int_or(&input, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_uses_both_drafts_and_clears_them() {
        let mut editor = TalentListEditor::new();
        editor.set_draft_name("Luck");
        editor.set_draft_description("Extra Fortune point");

        let talents = editor.add(&[]).unwrap();

        assert_eq!(
            talents,
            vec![Talent::new("Luck").with_description("Extra Fortune point")]
        );
        assert_eq!(talents[0].times_taken, 1);
        assert_eq!(editor.draft_name(), "");
        assert_eq!(editor.draft_description(), "");
    }

    #[test]
    fn add_without_name_keeps_description_draft() {
        let mut editor = TalentListEditor::new();
        editor.set_draft_description("orphan text");

        assert_eq!(editor.add(&[]), None);
        assert_eq!(editor.draft_description(), "orphan text");
    }

    #[test]
    fn times_taken_falls_back_to_one() {
        let talents = vec![Talent::new("Marksman"), Talent::new("Sharp")];

        let zero = TalentListEditor::update(&talents, 0, TalentField::TimesTaken("0".into())).unwrap();
        assert_eq!(zero[0].times_taken, 1);

        let junk = TalentListEditor::update(&talents, 0, TalentField::TimesTaken("x".into())).unwrap();
        assert_eq!(junk[0].times_taken, 1);

        let three = TalentListEditor::update(&talents, 1, TalentField::TimesTaken("3".into())).unwrap();
        assert_eq!(three[1].times_taken, 3);
        assert_eq!(three[0], talents[0]);
    }

    #[test]
    fn delete_keeps_order() {
        let talents = vec![Talent::new("A"), Talent::new("B"), Talent::new("C")];
        let after = TalentListEditor::delete(&talents, 1).unwrap();
        assert_eq!(after, vec![Talent::new("A"), Talent::new("C")]);
    }
}
