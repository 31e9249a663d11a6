//! Request payloads sent by the browser.

pub mod auth;
pub mod sheet;

pub use auth::CredentialsRequest;
pub use sheet::SheetCommand;
