//! Whole-section updates merged into a character.
//!
//! Section editors never mutate a character directly. They produce one of
//! these, and the owner of the record merges it with [`Character::apply`].
//! Every variant replaces exactly one section; nothing else changes.

use serde::{Deserialize, Serialize};

use crate::aggregates::character::{Character, Experience, Movement, Pool};
use crate::characteristics::Characteristics;
use crate::entities::{Armor, Money, Prayer, Skill, SkillKind, Spell, Talent, Trapping, Weapon};

/// Free-text identity fields on the main tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    Name,
    Species,
    Class,
    Career,
    CareerLevel,
    Status,
    Age,
    Height,
    Hair,
    Eyes,
}

impl IdentityField {
    pub const ALL: [IdentityField; 10] = [
        Self::Name,
        Self::Species,
        Self::Class,
        Self::Career,
        Self::CareerLevel,
        Self::Status,
        Self::Age,
        Self::Height,
        Self::Hair,
        Self::Eyes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Species => "Species",
            Self::Class => "Class",
            Self::Career => "Career",
            Self::CareerLevel => "Career Level",
            Self::Status => "Status",
            Self::Age => "Age",
            Self::Height => "Height",
            Self::Hair => "Hair",
            Self::Eyes => "Eyes",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CharacterUpdate {
    Identity(IdentityField, String),
    Characteristics(Characteristics),
    Skills(SkillKind, Vec<Skill>),
    Talents(Vec<Talent>),
    Weapons(Vec<Weapon>),
    Armor(Vec<Armor>),
    Trappings(Vec<Trapping>),
    Money(Money),
    Spells(Vec<Spell>),
    Prayers(Vec<Prayer>),
    Fate(Pool),
    Fortune(i32),
    Resilience(Pool),
    Resolve(i32),
    Experience(Experience),
    Movement(Movement),
    Notes(String),
}

impl CharacterUpdate {
    /// Section name for logging.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Identity(..) => "identity",
            Self::Characteristics(_) => "characteristics",
            Self::Skills(SkillKind::Basic, _) => "basic_skills",
            Self::Skills(SkillKind::Advanced, _) => "advanced_skills",
            Self::Talents(_) => "talents",
            Self::Weapons(_) => "weapons",
            Self::Armor(_) => "armor",
            Self::Trappings(_) => "trappings",
            Self::Money(_) => "money",
            Self::Spells(_) => "spells",
            Self::Prayers(_) => "prayers",
            Self::Fate(_) => "fate",
            Self::Fortune(_) => "fortune",
            Self::Resilience(_) => "resilience",
            Self::Resolve(_) => "resolve",
            Self::Experience(_) => "experience",
            Self::Movement(_) => "movement",
            Self::Notes(_) => "notes",
        }
    }
}

impl Character {
    pub fn identity(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::Name => &self.name,
            IdentityField::Species => &self.species,
            IdentityField::Class => &self.class,
            IdentityField::Career => &self.career,
            IdentityField::CareerLevel => &self.career_level,
            IdentityField::Status => &self.status,
            IdentityField::Age => &self.age,
            IdentityField::Height => &self.height,
            IdentityField::Hair => &self.hair,
            IdentityField::Eyes => &self.eyes,
        }
    }

    fn identity_mut(&mut self, field: IdentityField) -> &mut String {
        match field {
            IdentityField::Name => &mut self.name,
            IdentityField::Species => &mut self.species,
            IdentityField::Class => &mut self.class,
            IdentityField::Career => &mut self.career,
            IdentityField::CareerLevel => &mut self.career_level,
            IdentityField::Status => &mut self.status,
            IdentityField::Age => &mut self.age,
            IdentityField::Height => &mut self.height,
            IdentityField::Hair => &mut self.hair,
            IdentityField::Eyes => &mut self.eyes,
        }
    }

    pub fn skills(&self, kind: SkillKind) -> &[Skill] {
        match kind {
            SkillKind::Basic => &self.basic_skills,
            SkillKind::Advanced => &self.advanced_skills,
        }
    }

    /// Merge one section replacement into the record.
    pub fn apply(&mut self, update: CharacterUpdate) {
        match update {
            CharacterUpdate::Identity(field, value) => *self.identity_mut(field) = value,
            CharacterUpdate::Characteristics(chars) => self.characteristics = chars,
            CharacterUpdate::Skills(SkillKind::Basic, skills) => self.basic_skills = skills,
            CharacterUpdate::Skills(SkillKind::Advanced, skills) => self.advanced_skills = skills,
            CharacterUpdate::Talents(talents) => self.talents = talents,
            CharacterUpdate::Weapons(weapons) => self.weapons = weapons,
            CharacterUpdate::Armor(armor) => self.armor = armor,
            CharacterUpdate::Trappings(trappings) => self.trappings = trappings,
            CharacterUpdate::Money(money) => self.money = money,
            CharacterUpdate::Spells(spells) => self.spells = spells,
            CharacterUpdate::Prayers(prayers) => self.prayers = prayers,
            CharacterUpdate::Fate(fate) => self.fate = fate,
            CharacterUpdate::Fortune(fortune) => self.fortune = fortune,
            CharacterUpdate::Resilience(resilience) => self.resilience = resilience,
            CharacterUpdate::Resolve(resolve) => self.resolve = resolve,
            CharacterUpdate::Experience(experience) => self.experience = experience,
            CharacterUpdate::Movement(movement) => self.movement = movement,
            CharacterUpdate::Notes(notes) => self.notes = notes,
        }
    }

    /// `apply` without mutating `self`.
    pub fn with_update(&self, update: CharacterUpdate) -> Self {
        let mut next = self.clone();
        next.apply(update);
        next
    }
}
