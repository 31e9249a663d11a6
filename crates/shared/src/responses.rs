//! Response bodies returned to the browser.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheetkeep_domain::editors::CharacteristicTable;
use sheetkeep_domain::{CharacterId, CharacteristicName, StoredCharacter, UserId};

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserView {
    pub uid: UserId,
    pub email: String,
    /// Local part of the email, shown in the sidebar
    pub display_name: String,
}

impl AuthUserView {
    pub fn new(uid: UserId, email: impl Into<String>) -> Self {
        let email = email.into();
        let display_name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            uid,
            email,
            display_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrantView {
    pub token: String,
    pub user: AuthUserView,
}

// =============================================================================
// Roster
// =============================================================================

/// One card on the roster page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCard {
    pub id: CharacterId,
    pub name: String,
    pub species: String,
    pub class: String,
    pub career: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCharacter {
    pub id: CharacterId,
}

// =============================================================================
// Sheet
// =============================================================================

/// Where a sheet that cannot be shown sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    Login,
    Roster,
}

impl RedirectTarget {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Roster => "/dashboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SaveStatusView {
    Idle,
    Pending,
    Saving,
    Saved { at: DateTime<Utc> },
    Failed { error: String, at: DateTime<Utc> },
}

impl SaveStatusView {
    /// Toolbar text.
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "All changes saved".to_string(),
            Self::Pending => "Unsaved changes".to_string(),
            Self::Saving => "Saving...".to_string(),
            Self::Saved { at } => format!("Saved {}", at.format("%H:%M:%S")),
            Self::Failed { at, .. } => format!("Save failed at {}", at.format("%H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDraftView {
    pub name: String,
    pub characteristic: CharacteristicName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentDraftView {
    pub name: String,
    pub description: String,
}

/// Add-row drafts of every list section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftsView {
    pub basic_skill: SkillDraftView,
    pub advanced_skill: SkillDraftView,
    pub talent: TalentDraftView,
    pub weapon: String,
    pub armor: String,
    pub trapping: String,
    pub spell: String,
    pub prayer: String,
}

/// An editable sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetView {
    pub character: StoredCharacter,
    pub characteristics: CharacteristicTable,
    pub drafts: DraftsView,
    pub save_status: SaveStatusView,
    pub save_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SheetStateView {
    Loading { id: CharacterId },
    Ready(Box<SheetView>),
    Redirecting { target: RedirectTarget, redirect: String },
}

impl SheetStateView {
    pub fn redirecting(target: RedirectTarget) -> Self {
        Self::Redirecting {
            target,
            redirect: target.path().to_string(),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, target: RedirectTarget) -> Self {
        self.redirect = Some(target.path().to_string());
        self
    }
}
