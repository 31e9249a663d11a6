//! Sheetkeep Shared - wire contract between the browser and the engine
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **Domain vocabulary** - field enums and ids come straight from the domain crate
//! 3. **Raw input** - numeric edits carry the typed text; coercion happens in the engine

pub mod requests;
pub mod responses;

pub use requests::{CredentialsRequest, SheetCommand};
pub use responses::{
    AuthGrantView, AuthUserView, CharacterCard, CreatedCharacter, DraftsView, ErrorBody,
    RedirectTarget, SaveStatusView, SheetStateView, SheetView, SkillDraftView, TalentDraftView,
};
