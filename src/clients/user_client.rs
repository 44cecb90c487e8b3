use crate::model::{Identity, Profile, UserId};
use crate::user_actor::UserError;
use async_trait::async_trait;
use doc_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<Identity>,
}

#[async_trait]
impl ActorClient<Identity> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<Identity> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::from_framework(e)
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<Identity>) -> Self {
        Self { inner }
    }

    /// Writes the identity document under its own id.
    #[instrument(skip(self, identity), fields(id = %identity.id, role = %identity.role()))]
    pub async fn put_identity(&self, identity: Identity) -> Result<(), UserError> {
        debug!("Sending request");
        self.inner
            .set(identity.id.clone(), identity)
            .await
            .map_err(UserError::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn identity(&self, id: UserId) -> Result<Identity, UserError> {
        debug!("Sending request");
        self.inner
            .get(id.clone())
            .await
            .map_err(UserError::from_framework)?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Replaces the profile; fails if it belongs to a different role.
    #[instrument(skip(self, profile))]
    pub async fn update_profile(&self, id: UserId, profile: Profile) -> Result<Identity, UserError> {
        self.inner
            .update(id, profile)
            .await
            .map_err(UserError::from_framework)
    }
}
