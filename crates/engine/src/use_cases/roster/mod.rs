//! Roster use cases - the signed-in user's list of characters.

use std::sync::Arc;

use sheetkeep_domain::{Character, CharacterDocument, CharacterId};
use sheetkeep_shared::CharacterCard;

use crate::infrastructure::ports::{CharacterStore, RepoError};
use crate::use_cases::auth::AuthContext;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct RosterUseCases {
    store: Arc<dyn CharacterStore>,
}

fn card(id: CharacterId, document: CharacterDocument) -> CharacterCard {
    CharacterCard {
        id,
        name: document.name.unwrap_or_default(),
        species: document.species.unwrap_or_default(),
        class: document.class.unwrap_or_default(),
        career: document.career.unwrap_or_default(),
    }
}

impl RosterUseCases {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    /// Cards for every character the user owns, oldest first.
    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<CharacterCard>, RosterError> {
        let user = ctx.user().ok_or(RosterError::Unauthenticated)?;
        let documents = self.store.list_by_owner(&user.uid).await.map_err(|e| {
            tracing::warn!(uid = %user.uid, error = %e, "Failed to list characters");
            e
        })?;
        Ok(documents
            .into_iter()
            .map(|(id, document)| card(id, document))
            .collect())
    }

    /// Create a character from the default template, owned by the user.
    pub async fn create(&self, ctx: &AuthContext) -> Result<CharacterId, RosterError> {
        let user = ctx.user().ok_or(RosterError::Unauthenticated)?;
        let character = Character::from_template(user.uid.clone());
        let id = self.store.create(&character).await.map_err(|e| {
            tracing::error!(uid = %user.uid, error = %e, "Failed to create character");
            e
        })?;
        tracing::info!(uid = %user.uid, character_id = %id, "Character created");
        Ok(id)
    }

    /// Delete one of the user's characters.
    ///
    /// An id that no longer exists is already deleted. An id owned by someone
    /// else is reported as not found.
    pub async fn delete(&self, ctx: &AuthContext, id: &CharacterId) -> Result<(), RosterError> {
        let user = ctx.user().ok_or(RosterError::Unauthenticated)?;
        match self.store.get(id).await? {
            None => return Ok(()),
            Some(document) if document.user_id.as_ref() != Some(&user.uid) => {
                return Err(RosterError::NotFound(id.clone()));
            }
            Some(_) => {}
        }

        self.store.delete(id).await.map_err(|e| {
            tracing::error!(character_id = %id, error = %e, "Failed to delete character");
            e
        })?;
        tracing::info!(uid = %user.uid, character_id = %id, "Character deleted");
        Ok(())
    }
}
