//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. Every operation takes
//! the caller's [`auth::AuthContext`] explicitly.

pub mod auth;
pub mod roster;
pub mod sheet;

pub use auth::{AuthContext, AuthError, AuthUseCases};
pub use roster::{RosterError, RosterUseCases};
pub use sheet::{SheetError, SheetUseCases};
