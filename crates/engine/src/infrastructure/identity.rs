//! Bundled email/password identity provider.
//!
//! Accounts live in memory for the lifetime of the process. Passwords are
//! kept as argon2id PHC strings, which carry their own salt and parameters.
//! Bearer tokens are random UUIDs and stop resolving after sign-out or
//! shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use dashmap::DashMap;
use sheetkeep_domain::UserId;

use crate::infrastructure::ports::{AuthGrant, AuthUser, IdentityError, IdentityPort, RandomPort};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: UserId,
    email: String,
    password_hash: String,
}

pub struct LocalIdentityProvider {
    /// Keyed by lowercased email
    accounts: DashMap<String, Account>,
    tokens: DashMap<String, AuthUser>,
    random: Arc<dyn RandomPort>,
    ready: AtomicBool,
}

impl LocalIdentityProvider {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self {
            accounts: DashMap::new(),
            tokens: DashMap::new(),
            random,
            ready: AtomicBool::new(false),
        }
    }

    fn ensure_ready(&self) -> Result<(), IdentityError> {
        if self.ready.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(IdentityError::Unavailable("not initialized".to_string()))
        }
    }

    fn issue(&self, user: AuthUser) -> AuthGrant {
        let token = self.random.gen_uuid().to_string();
        self.tokens.insert(token.clone(), user.clone());
        AuthGrant { token, user }
    }
}

/// Hash a password with argon2id and a fresh random salt.
fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash is malformed.
fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

fn hashing_unavailable(e: argon2::password_hash::Error) -> IdentityError {
    tracing::error!(error = %e, "Password hashing failed");
    IdentityError::Unavailable(format!("password hashing: {e}"))
}

/// Deliberately minimal: one `@` with something on each side. Deliverability
/// is not checked.
fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[async_trait]
impl IdentityPort for LocalIdentityProvider {
    async fn init(&self) -> Result<(), IdentityError> {
        self.ready.store(true, Ordering::Release);
        tracing::info!("Local identity provider ready");
        Ok(())
    }

    async fn shutdown(&self) {
        self.ready.store(false, Ordering::Release);
        let revoked = self.tokens.len();
        self.tokens.clear();
        tracing::info!(revoked, "Local identity provider shut down");
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, IdentityError> {
        self.ensure_ready()?;
        let user = {
            let account = self
                .accounts
                .get(&email.trim().to_lowercase())
                .ok_or(IdentityError::InvalidCredentials)?;
            if !verify_password(password, &account.password_hash).map_err(hashing_unavailable)? {
                return Err(IdentityError::InvalidCredentials);
            }
            AuthUser {
                uid: account.uid.clone(),
                email: account.email.clone(),
            }
        };
        Ok(self.issue(user))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, IdentityError> {
        self.ensure_ready()?;
        let email = email.trim();
        if !valid_email(email) {
            return Err(IdentityError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let key = email.to_lowercase();
        let user = match self.accounts.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(IdentityError::EmailInUse(email.to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let password_hash = hash_password(password).map_err(hashing_unavailable)?;
                let user = AuthUser {
                    uid: UserId::new(self.random.gen_uuid().simple().to_string()),
                    email: email.to_string(),
                };
                slot.insert(Account {
                    uid: user.uid.clone(),
                    email: user.email.clone(),
                    password_hash,
                });
                user
            }
        };

        tracing::info!(uid = %user.uid, "Account created");
        Ok(self.issue(user))
    }

    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>, IdentityError> {
        self.ensure_ready()?;
        Ok(self.tokens.get(token).map(|user| user.clone()))
    }

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        self.ensure_ready()?;
        self.tokens.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SequentialRandom;

    async fn provider() -> LocalIdentityProvider {
        let provider = LocalIdentityProvider::new(Arc::new(SequentialRandom::new()));
        provider.init().await.unwrap();
        provider
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_resolves_to_the_same_user() {
        let provider = provider().await;
        let created = provider.sign_up("Reiner@Altdorf.example", "hunter22").await.unwrap();

        let grant = provider.sign_in("reiner@altdorf.example", "hunter22").await.unwrap();
        assert_eq!(grant.user.uid, created.user.uid);
        assert_ne!(grant.token, created.token);

        let resolved = provider.resolve(&grant.token).await.unwrap().unwrap();
        assert_eq!(resolved.email, "Reiner@Altdorf.example");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let provider = provider().await;
        provider.sign_up("a@b.example", "correct-horse").await.unwrap();

        let err = provider.sign_in("a@b.example", "battery").await.unwrap_err();
        assert_eq!(err, IdentityError::InvalidCredentials);
        let err = provider.sign_in("nobody@b.example", "battery").await.unwrap_err();
        assert_eq!(err, IdentityError::InvalidCredentials);
    }

    #[tokio::test]
    async fn sign_up_validates_input() {
        let provider = provider().await;
        assert_eq!(
            provider.sign_up("no-at-sign", "longenough").await.unwrap_err(),
            IdentityError::InvalidEmail
        );
        assert_eq!(
            provider.sign_up("a@b.example", "short").await.unwrap_err(),
            IdentityError::WeakPassword { min: 6 }
        );

        provider.sign_up("a@b.example", "longenough").await.unwrap();
        assert!(matches!(
            provider.sign_up("A@B.example", "longenough").await.unwrap_err(),
            IdentityError::EmailInUse(_)
        ));
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_clear() {
        let provider = provider().await;
        provider.sign_up("a@b.example", "longenough").await.unwrap();

        let account = provider.accounts.get("a@b.example").unwrap();
        assert!(account.password_hash.starts_with("$argon2id$"));
        assert!(!account.password_hash.contains("longenough"));
        assert!(verify_password("longenough", &account.password_hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let first = hash_password("longenough").unwrap();
        let second = hash_password("longenough").unwrap();
        assert_ne!(first, second);
        assert!(!verify_password("longenougH", &first).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("longenough", "not-a-phc-string").is_err());
    }

    #[test]
    fn email_check_only_requires_one_at_with_both_sides() {
        assert!(valid_email("a@b"));
        assert!(!valid_email("@b.example"));
        assert!(!valid_email("a@"));
        assert!(!valid_email("a@b@c"));
    }

    #[tokio::test]
    async fn sign_out_revokes_the_token() {
        let provider = provider().await;
        let grant = provider.sign_up("a@b.example", "longenough").await.unwrap();

        provider.sign_out(&grant.token).await.unwrap();
        assert!(provider.resolve(&grant.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_before_init_and_after_shutdown() {
        let provider = LocalIdentityProvider::new(Arc::new(SequentialRandom::new()));
        assert!(matches!(
            provider.sign_in("a@b.example", "x").await,
            Err(IdentityError::Unavailable(_))
        ));

        provider.init().await.unwrap();
        let grant = provider.sign_up("a@b.example", "longenough").await.unwrap();
        provider.shutdown().await;

        assert!(matches!(
            provider.resolve(&grant.token).await,
            Err(IdentityError::Unavailable(_))
        ));
        provider.init().await.unwrap();
        assert!(provider.resolve(&grant.token).await.unwrap().is_none());
    }
}
