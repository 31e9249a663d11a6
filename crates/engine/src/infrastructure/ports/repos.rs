//! Repository port traits for the document store.

use async_trait::async_trait;
use sheetkeep_domain::{Character, CharacterDocument, CharacterId, UserId};

use super::error::RepoError;

/// Name of the collection holding character documents.
pub const CHARACTERS_COLLECTION: &str = "characters";

// =============================================================================
// Character Store Port
// =============================================================================

/// Character documents keyed by a storage-assigned id.
///
/// Reads return the lenient [`CharacterDocument`] shape because stored bodies
/// may predate fields the record has since gained. Writes take the strict
/// body; the id is never part of it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn get(&self, id: &CharacterId) -> Result<Option<CharacterDocument>, RepoError>;

    /// Insert a new document and return the id assigned to it.
    async fn create(&self, character: &Character) -> Result<CharacterId, RepoError>;

    /// Merge the top-level fields of `character` into the stored document.
    ///
    /// Fails with `NotFound` when no document has this id.
    async fn update(&self, id: &CharacterId, character: &Character) -> Result<(), RepoError>;

    /// Remove a document. Deleting an absent id is not an error.
    async fn delete(&self, id: &CharacterId) -> Result<(), RepoError>;

    /// Documents whose `userId` equals `owner`, oldest first.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<(CharacterId, CharacterDocument)>, RepoError>;
}
