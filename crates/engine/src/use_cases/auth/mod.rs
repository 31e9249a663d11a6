//! Auth use cases.
//!
//! Every request resolves its bearer token into an [`AuthContext`] once, and
//! that value is handed explicitly to the roster and sheet use cases. Nothing
//! downstream looks the current user up on its own.

use std::sync::Arc;

use crate::infrastructure::ports::{AuthGrant, AuthUser, IdentityError, IdentityPort};

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    Anonymous,
    SignedIn(AuthUser),
}

impl AuthContext {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Anonymous => None,
            Self::SignedIn(user) => Some(user),
        }
    }

    /// The signed-in user, or `Unauthenticated`.
    pub fn require(&self) -> Result<&AuthUser, AuthError> {
        self.user().ok_or(AuthError::Unauthenticated)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

pub struct AuthUseCases {
    identity: Arc<dyn IdentityPort>,
}

impl AuthUseCases {
    pub fn new(identity: Arc<dyn IdentityPort>) -> Self {
        Self { identity }
    }

    /// Bring the identity provider up at application start.
    pub async fn init(&self) -> Result<(), AuthError> {
        self.identity.init().await?;
        Ok(())
    }

    /// Tear the identity provider down at application stop.
    pub async fn teardown(&self) {
        self.identity.shutdown().await;
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        let grant = self.identity.sign_in(email, password).await.map_err(|e| {
            tracing::info!(error = %e, "Sign-in rejected");
            e
        })?;
        tracing::info!(uid = %grant.user.uid, "Signed in");
        Ok(grant)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        Ok(self.identity.sign_up(email, password).await?)
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.identity.sign_out(token).await?;
        Ok(())
    }

    /// Resolve an optional bearer token into a context.
    ///
    /// Missing, unknown and unresolvable tokens all yield `Anonymous`.
    pub async fn context_for(&self, token: Option<&str>) -> AuthContext {
        let Some(token) = token else {
            return AuthContext::Anonymous;
        };
        match self.identity.resolve(token).await {
            Ok(Some(user)) => AuthContext::SignedIn(user),
            Ok(None) => AuthContext::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve bearer token");
                AuthContext::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockIdentityPort;
    use sheetkeep_domain::UserId;

    fn user() -> AuthUser {
        AuthUser {
            uid: UserId::new("u1"),
            email: "reiner@altdorf.example".to_string(),
        }
    }

    #[tokio::test]
    async fn no_token_is_anonymous_without_asking_the_provider() {
        let identity = MockIdentityPort::new();
        let auth = AuthUseCases::new(Arc::new(identity));

        assert_eq!(auth.context_for(None).await, AuthContext::Anonymous);
    }

    #[tokio::test]
    async fn live_token_resolves_to_signed_in() {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_resolve()
            .withf(|token| token == "tok")
            .returning(|_| Ok(Some(user())));
        let auth = AuthUseCases::new(Arc::new(identity));

        let ctx = auth.context_for(Some("tok")).await;
        assert_eq!(ctx.user(), Some(&user()));
        assert!(ctx.require().is_ok());
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_anonymous() {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_resolve()
            .returning(|_| Err(IdentityError::Unavailable("down".to_string())));
        let auth = AuthUseCases::new(Arc::new(identity));

        let ctx = auth.context_for(Some("tok")).await;
        assert_eq!(ctx, AuthContext::Anonymous);
        assert!(matches!(ctx.require(), Err(AuthError::Unauthenticated)));
    }

    #[tokio::test]
    async fn sign_in_passes_provider_errors_through() {
        let mut identity = MockIdentityPort::new();
        identity
            .expect_sign_in()
            .returning(|_, _| Err(IdentityError::InvalidCredentials));
        let auth = AuthUseCases::new(Arc::new(identity));

        let err = auth.sign_in("a@b.example", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::Identity(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn init_and_teardown_reach_the_provider() {
        let mut identity = MockIdentityPort::new();
        identity.expect_init().times(1).returning(|| Ok(()));
        identity.expect_shutdown().times(1).returning(|| ());
        let auth = AuthUseCases::new(Arc::new(identity));

        auth.init().await.unwrap();
        auth.teardown().await;
    }
}
