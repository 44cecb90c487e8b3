//! # Session State
//!
//! Who is signed in and with which role. A [`SessionState`] is created by the
//! system and passed to whoever needs it; there is no global session.
//!
//! Sign-up writes the `users` document, plus the `restaurants` document when the
//! new account is a restaurant. If either write fails the account is removed
//! from the auth provider again. Sign-in loads the `users` document to learn the
//! role. Observers follow changes through [`SessionState::changes`].
//!
//! The auth provider has the last word: when it reports that the signed-in
//! account went away, the session drops its identity too.

pub mod auth;
pub mod error;

pub use auth::*;
pub use error::*;

use crate::clients::{RestaurantClient, UserClient};
use crate::model::{Identity, Profile, Restaurant, RestaurantId, Role, UserId};
use chrono::Utc;
use doc_actor::ActorClient;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

pub struct SessionState {
    auth: Arc<dyn AuthProvider>,
    users: UserClient,
    restaurants: RestaurantClient,
    current: Arc<watch::Sender<Option<Identity>>>,
}

impl SessionState {
    /// Must be called inside a tokio runtime: it spawns the task that follows
    /// the provider's sign-in state.
    pub fn new(auth: Arc<dyn AuthProvider>, users: UserClient, restaurants: RestaurantClient) -> Self {
        let (current, _) = watch::channel(None);
        let current = Arc::new(current);
        tokio::spawn(follow_provider(auth.changes(), current.clone()));
        Self {
            auth,
            users,
            restaurants,
            current,
        }
    }

    /// Registers an account and signs it in.
    #[instrument(skip(self, password, profile), fields(role = %profile.role()))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Identity, SessionError> {
        let user_id = self.auth.sign_up(email, password).await?;
        let identity = Identity {
            id: user_id,
            email: email.trim().to_lowercase(),
            profile,
            created_at: Utc::now(),
        };

        if let Err(e) = self.write_documents(&identity).await {
            warn!(id = %identity.id, error = %e, "Sign-up failed, removing account");
            if let Err(undo) = self.auth.remove_account(&identity.id).await {
                error!(id = %identity.id, error = %undo, "Could not remove account");
            }
            return Err(e);
        }

        info!(id = %identity.id, "Signed up");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Writes the identity, then the restaurant document for restaurant accounts.
    /// A failed restaurant write deletes the identity again.
    async fn write_documents(&self, identity: &Identity) -> Result<(), SessionError> {
        self.users.put_identity(identity.clone()).await?;

        let Profile::Restaurant {
            business_name,
            phone,
            address,
        } = &identity.profile
        else {
            return Ok(());
        };
        let written = self
            .restaurants
            .put(Restaurant {
                id: RestaurantId::from(&identity.id),
                business_name: business_name.clone(),
                email: identity.email.clone(),
                phone: phone.clone(),
                address: address.clone(),
                created_at: identity.created_at,
            })
            .await;

        if written.is_err() {
            if let Err(undo) = self.users.delete(identity.id.clone()).await {
                error!(id = %identity.id, error = %undo, "Could not delete identity");
            }
        }
        written.map_err(SessionError::from)
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let user_id = self.auth.sign_in(email, password).await?;
        let identity = match self.users.identity(user_id).await {
            Ok(identity) => identity,
            Err(e) => {
                self.auth.sign_out().await?;
                return Err(e.into());
            }
        };
        info!(id = %identity.id, role = %identity.role(), "Session started");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.auth.sign_out().await?;
        if self.current.send_replace(None).is_some() {
            info!("Signed out");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.borrow().as_ref().map(Identity::role)
    }

    /// The restaurant the signed-in account owns, if it is a restaurant.
    pub fn restaurant_id(&self) -> Option<RestaurantId> {
        self.current
            .borrow()
            .as_ref()
            .filter(|identity| identity.role() == Role::Restaurant)
            .map(|identity| RestaurantId::from(&identity.id))
    }

    /// Receives the new identity on every sign-in, sign-up and sign-out,
    /// including sign-outs that start at the auth provider.
    pub fn changes(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }
}

/// Clears the session identity whenever the provider no longer has that
/// account signed in. Ends when the provider goes away.
async fn follow_provider(
    mut provider: watch::Receiver<Option<UserId>>,
    current: Arc<watch::Sender<Option<Identity>>>,
) {
    while provider.changed().await.is_ok() {
        let signed_in = provider.borrow_and_update().clone();
        current.send_if_modified(|identity| {
            let stale = identity
                .as_ref()
                .is_some_and(|i| Some(&i.id) != signed_in.as_ref());
            if stale {
                info!("Signed out by the auth provider");
                *identity = None;
            }
            stale
        });
    }
}
