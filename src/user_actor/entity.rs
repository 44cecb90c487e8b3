//! [`ActorEntity`] implementation for [`Identity`].

use crate::model::{Identity, Profile, UserId};
use crate::user_actor::UserError;
use async_trait::async_trait;
use doc_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Identity {
    type Id = UserId;
    // Ids come from the auth provider; documents are written with `set`.
    type Create = Infallible;
    type Update = Profile;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(_id: UserId, params: Infallible) -> Result<Self, UserError> {
        match params {}
    }

    /// Replaces the profile. The role is fixed at registration.
    async fn on_update(&mut self, profile: Profile, _ctx: &()) -> Result<(), UserError> {
        if profile.role() != self.role() {
            return Err(UserError::Validation(format!(
                "role is {} and cannot change to {}",
                self.role(),
                profile.role()
            )));
        }
        self.profile = profile;
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), UserError> {
        match action {}
    }
}
