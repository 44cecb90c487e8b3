//! [`ActorEntity`] implementation for [`Menu`].
//!
//! Menus are keyed by restaurant and only ever written whole with `set`, so the
//! create, update and action payloads are uninhabited.

use crate::menu_actor::MenuError;
use crate::model::{Menu, MenuItem, RestaurantId};
use async_trait::async_trait;
use doc_actor::ActorEntity;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Menu {
    type Id = RestaurantId;
    type Create = Infallible;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(_id: RestaurantId, params: Infallible) -> Result<Self, MenuError> {
        match params {}
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), MenuError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), MenuError> {
        match action {}
    }
}

/// Checks a full item list before it replaces the stored one.
pub fn validate_items(items: &[MenuItem]) -> Result<(), MenuError> {
    let mut ids = HashSet::new();
    for item in items {
        if item.name.trim().is_empty() {
            return Err(MenuError::Validation(format!("item {} has no name", item.id)));
        }
        if item.price < Decimal::ZERO {
            return Err(MenuError::Validation(format!(
                "{} has a negative price",
                item.name
            )));
        }
        if !ids.insert(&item.id) {
            return Err(MenuError::Validation(format!("duplicate item id {}", item.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MenuItemId;

    fn item(id: &str, name: &str, cents: i64) -> MenuItem {
        MenuItem {
            id: MenuItemId::from(id),
            name: name.into(),
            price: Decimal::new(cents, 2),
            description: String::new(),
            category: "Drinks".into(),
        }
    }

    #[test]
    fn test_validate_items() {
        assert!(validate_items(&[]).is_ok());
        assert!(validate_items(&[item("a", "Cola", 0), item("b", "Beer", 500)]).is_ok());

        assert!(matches!(
            validate_items(&[item("a", "Cola", -1)]),
            Err(MenuError::Validation(_))
        ));
        assert!(matches!(
            validate_items(&[item("a", "  ", 100)]),
            Err(MenuError::Validation(_))
        ));
        assert!(matches!(
            validate_items(&[item("a", "Cola", 100), item("a", "Beer", 100)]),
            Err(MenuError::Validation(_))
        ));
    }
}
