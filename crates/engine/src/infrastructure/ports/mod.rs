//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document storage (could swap SQLite -> a hosted document database)
//! - Identity (could swap the local provider -> a hosted one)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CharacterStore, CHARACTERS_COLLECTION};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{AuthGrant, AuthUser, IdentityPort};

// =============================================================================
// Errors
// =============================================================================
pub use error::{IdentityError, RepoError};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockIdentityPort;
#[cfg(test)]
pub use repos::MockCharacterStore;
#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};
