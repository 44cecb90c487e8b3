use crate::model::{Restaurant, RestaurantId};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use doc_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RestaurantError::from_framework(e)
    }
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, restaurant), fields(id = %restaurant.id))]
    pub async fn put(&self, restaurant: Restaurant) -> Result<(), RestaurantError> {
        self.inner
            .set(restaurant.id.clone(), restaurant)
            .await
            .map_err(RestaurantError::from_framework)
    }

    /// Public details for the ordering page.
    #[instrument(skip(self))]
    pub async fn restaurant(&self, id: RestaurantId) -> Result<Restaurant, RestaurantError> {
        self.inner
            .get(id.clone())
            .await
            .map_err(RestaurantError::from_framework)?
            .ok_or_else(|| RestaurantError::NotFound(id.to_string()))
    }
}
