//! # Menu Client
//!
//! Load and save a restaurant's menu. Every write replaces the whole item list;
//! concurrent editors follow last-write-wins.

use crate::menu_actor::{validate_items, MenuError};
use crate::model::{Menu, MenuItem, MenuItemId, RestaurantId};
use async_trait::async_trait;
use doc_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<Menu>,
}

#[async_trait]
impl ActorClient<Menu> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<Menu> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        MenuError::from_framework(e)
    }
}

impl MenuClient {
    pub fn new(inner: ResourceClient<Menu>) -> Self {
        Self { inner }
    }

    /// The restaurant's menu; empty when it has never been saved.
    #[instrument(skip(self))]
    pub async fn load(&self, restaurant_id: RestaurantId) -> Result<Menu, MenuError> {
        debug!("Sending request");
        let stored = self
            .inner
            .get(restaurant_id.clone())
            .await
            .map_err(MenuError::from_framework)?;
        Ok(stored.unwrap_or_else(|| Menu::new(restaurant_id, Vec::new())))
    }

    /// Overwrites the stored item list.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn save(
        &self,
        restaurant_id: RestaurantId,
        items: Vec<MenuItem>,
    ) -> Result<Menu, MenuError> {
        validate_items(&items)?;
        let menu = Menu::new(restaurant_id.clone(), items);
        self.inner
            .set(restaurant_id, menu.clone())
            .await
            .map_err(MenuError::from_framework)?;
        info!("Menu saved");
        Ok(menu)
    }

    /// Replaces the item with the same id, or appends it.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn upsert_item(
        &self,
        restaurant_id: RestaurantId,
        item: MenuItem,
    ) -> Result<Menu, MenuError> {
        let mut items = self.load(restaurant_id.clone()).await?.items;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item,
            None => items.push(item),
        }
        self.save(restaurant_id, items).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
    ) -> Result<Menu, MenuError> {
        let mut items = self.load(restaurant_id.clone()).await?.items;
        items.retain(|i| i.id != item_id);
        self.save(restaurant_id, items).await
    }
}
