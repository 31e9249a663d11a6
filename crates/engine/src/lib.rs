//! Sheetkeep Engine library.
//!
//! This crate contains all server-side code for the character sheet manager.
//!
//! ## Structure
//!
//! - `use_cases/` - Auth, roster and open-sheet orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::{AppConfig, StoreConfig};
