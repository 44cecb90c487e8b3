use crate::model::RestaurantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub String);

impl MenuItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for MenuItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub category: String,
}

impl MenuItem {
    /// New item with a generated id.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: MenuItemId::generate(),
            name: name.into(),
            price,
            description: description.into(),
            category: category.into(),
        }
    }
}

/// The `menus` document: one ordered item list per restaurant.
///
/// Always written whole; there is no per-item write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub restaurant_id: RestaurantId,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(restaurant_id: RestaurantId, items: Vec<MenuItem>) -> Self {
        Self {
            restaurant_id,
            items,
        }
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn find(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem::new(name, Decimal::new(450, 2), "", category)
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let menu = Menu::new(
            RestaurantId::from("r1"),
            vec![
                item("Soup", "Starters"),
                item("Steak", "Mains"),
                item("Salad", "Starters"),
            ],
        );
        assert_eq!(menu.categories(), vec!["Starters", "Mains"]);

        let starters: Vec<_> = menu.in_category("Starters").map(|i| i.name.as_str()).collect();
        assert_eq!(starters, vec!["Soup", "Salad"]);
        assert_eq!(menu.in_category("Desserts").count(), 0);
    }

    #[test]
    fn test_find_by_id() {
        let soup = item("Soup", "Starters");
        let menu = Menu::new(RestaurantId::from("r1"), vec![soup.clone()]);
        assert_eq!(menu.find(&soup.id), Some(&soup));
        assert!(menu.find(&MenuItemId::from("nope")).is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(item("A", "x").id, item("A", "x").id);
    }
}
