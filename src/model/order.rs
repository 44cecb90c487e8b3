//! Orders and their lifecycle.
//!
//! An [`Order`] lives inside its table's document (see [`Table`](crate::model::Table)).
//! Its lines are a snapshot of the menu at submission time and are never
//! re-resolved against the menu afterwards.

use crate::model::{MenuItem, MenuItemId, TableId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Stable unique identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Where an order is in the kitchen.
///
/// ```text
/// pending ──Accept──▶ preparing ──Complete──▶ completed
///    │
///    └────Cancel────▶ cancelled
/// ```
///
/// `completed` and `cancelled` are terminal. There is no path from `preparing` to
/// `cancelled`, and customers cannot cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Preparing)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Preparing, OrderStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Pending or preparing: still needs the kitchen's attention.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Buttons an operator gets for an order in this status.
    pub fn available_actions(self) -> &'static [OperatorAction] {
        match self {
            OrderStatus::Pending => &[OperatorAction::Accept, OperatorAction::Cancel],
            OrderStatus::Preparing => &[OperatorAction::Complete],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Operator actions on the restaurant dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorAction {
    Accept,
    Cancel,
    Complete,
}

impl OperatorAction {
    pub fn target(self) -> OrderStatus {
        match self {
            OperatorAction::Accept => OrderStatus::Preparing,
            OperatorAction::Cancel => OrderStatus::Cancelled,
            OperatorAction::Complete => OrderStatus::Completed,
        }
    }
}

/// One line of an order: a denormalized copy of a menu item plus a quantity.
///
/// The cart uses the same shape (see [`CartLine`](crate::cart::CartLine)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    /// Snapshot of `item` with quantity 1.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A customer's submitted set of items for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    pub customer_name: String,
    pub table_id: TableId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    /// Account that placed the order. Anonymous table-side orders have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<UserId>,
}

impl Order {
    /// Creates a new pending Order with a fresh id.
    ///
    /// `total` is always derived from the lines, never taken from the caller.
    pub fn new(
        table_id: TableId,
        customer_name: impl Into<String>,
        items: Vec<OrderLine>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = items.iter().map(OrderLine::subtotal).sum();
        Self {
            id: OrderId::generate(),
            items,
            customer_name: customer_name.into(),
            table_id,
            status: OrderStatus::Pending,
            total,
            created_at,
            customer_id: None,
        }
    }

    pub fn placed_by(self, customer_id: UserId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..self
        }
    }

    /// Copy of this order with a different status; everything else is unchanged.
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
