//! # Auth Provider
//!
//! The seam to whatever issues account ids and checks passwords.
//! [`LocalAuthProvider`] keeps argon2 hashes in memory and is what the system
//! runs with.

use crate::model::UserId;
use crate::session::SessionError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{info, instrument, warn};

/// Shortest password the provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Registers new credentials and signs them in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, SessionError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, SessionError>;

    async fn sign_out(&self) -> Result<(), SessionError>;

    /// Deletes the credentials of `user_id` and signs it out if it is the
    /// signed-in account. Used to undo a sign-up whose documents could not be
    /// written. Unknown ids are a no-op.
    async fn remove_account(&self, user_id: &UserId) -> Result<(), SessionError>;

    /// Fires whenever the signed-in account changes.
    fn changes(&self) -> watch::Receiver<Option<UserId>>;
}

struct Credential {
    user_id: UserId,
    password_hash: String,
}

/// In-process credential registry.
#[derive(Clone)]
pub struct LocalAuthProvider {
    accounts: Arc<RwLock<HashMap<String, Credential>>>,
    signed_in: Arc<watch::Sender<Option<UserId>>>,
}

impl LocalAuthProvider {
    pub fn new() -> Self {
        let (signed_in, _) = watch::channel(None);
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            signed_in: Arc::new(signed_in),
        }
    }
}

impl Default for LocalAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, SessionError> {
        let email = normalize_email(email)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(SessionError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password_hash =
            hash_password(password).map_err(|e| SessionError::Store(e.to_string()))?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(SessionError::Validation(format!("{email} is already registered")));
        }
        let user_id = UserId::generate();
        accounts.insert(
            email,
            Credential {
                user_id: user_id.clone(),
                password_hash,
            },
        );
        drop(accounts);

        info!(%user_id, "Account registered");
        self.signed_in.send_replace(Some(user_id.clone()));
        Ok(user_id)
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, SessionError> {
        let rejected = || SessionError::Auth("invalid email or password".into());
        let email = normalize_email(email).map_err(|_| rejected())?;

        let user_id = {
            let accounts = self.accounts.read().await;
            let credential = accounts.get(&email).ok_or_else(rejected)?;
            if !verify_password(password, &credential.password_hash) {
                warn!("Wrong password");
                return Err(rejected());
            }
            credential.user_id.clone()
        };

        info!(%user_id, "Signed in");
        self.signed_in.send_replace(Some(user_id.clone()));
        Ok(user_id)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.signed_in.send_replace(None);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_account(&self, user_id: &UserId) -> Result<(), SessionError> {
        let removed = {
            let mut accounts = self.accounts.write().await;
            let before = accounts.len();
            accounts.retain(|_, credential| &credential.user_id != user_id);
            before != accounts.len()
        };

        self.signed_in.send_if_modified(|current| {
            let signed_in = current.as_ref() == Some(user_id);
            if signed_in {
                *current = None;
            }
            signed_in
        });
        if removed {
            info!("Account removed");
        }
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<Option<UserId>> {
        self.signed_in.subscribe()
    }
}

fn normalize_email(email: &str) -> Result<String, SessionError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(SessionError::Validation(format!("invalid email '{email}'")));
    }
    Ok(email)
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = LocalAuthProvider::new();
        let id = auth.sign_up("Chef@Example.com ", "secret1").await.unwrap();
        assert_eq!(auth.sign_in("chef@example.com", "secret1").await.unwrap(), id);
    }

    #[tokio::test]
    async fn test_wrong_credentials_are_auth_errors() {
        let auth = LocalAuthProvider::new();
        auth.sign_up("a@b.c", "secret1").await.unwrap();

        assert!(matches!(
            auth.sign_in("a@b.c", "secret2").await,
            Err(SessionError::Auth(_))
        ));
        assert!(matches!(
            auth.sign_in("nobody@b.c", "secret1").await,
            Err(SessionError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let auth = LocalAuthProvider::new();
        assert!(matches!(
            auth.sign_up("", "secret1").await,
            Err(SessionError::Validation(_))
        ));
        assert!(matches!(
            auth.sign_up("a@b.c", "").await,
            Err(SessionError::Validation(_))
        ));
        auth.sign_up("a@b.c", "secret1").await.unwrap();
        assert!(matches!(
            auth.sign_up("A@B.C", "secret9").await,
            Err(SessionError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_changes_follow_sign_in_and_out() {
        let auth = LocalAuthProvider::new();
        let changes = auth.changes();
        assert!(changes.borrow().is_none());

        let id = auth.sign_up("a@b.c", "secret1").await.unwrap();
        assert_eq!(changes.borrow().as_ref(), Some(&id));

        auth.sign_out().await.unwrap();
        assert!(changes.borrow().is_none());
    }

    #[tokio::test]
    async fn test_remove_account_frees_the_email() {
        let auth = LocalAuthProvider::new();
        let changes = auth.changes();
        let id = auth.sign_up("a@b.c", "secret1").await.unwrap();

        auth.remove_account(&id).await.unwrap();
        assert!(changes.borrow().is_none());
        assert!(matches!(
            auth.sign_in("a@b.c", "secret1").await,
            Err(SessionError::Auth(_))
        ));

        let again = auth.sign_up("a@b.c", "secret1").await.unwrap();
        assert_ne!(again, id);
        auth.remove_account(&id).await.unwrap();
        assert_eq!(changes.borrow().as_ref(), Some(&again));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-hash"));
    }
}
