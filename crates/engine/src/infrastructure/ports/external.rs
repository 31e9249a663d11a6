//! External service ports.

use async_trait::async_trait;
use sheetkeep_domain::UserId;

use super::error::IdentityError;

// =============================================================================
// Identity Port
// =============================================================================

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: UserId,
    pub email: String,
}

/// A bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user: AuthUser,
}

/// Email/password identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Bring the provider up. Called once at application start.
    async fn init(&self) -> Result<(), IdentityError>;

    /// Tear the provider down. Outstanding tokens stop resolving.
    async fn shutdown(&self);

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, IdentityError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, IdentityError>;

    /// The user a token belongs to, if the token is live.
    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>, IdentityError>;

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError>;
}
