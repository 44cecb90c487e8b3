use crate::model::{Order, RestaurantId};
use crate::routes::QrPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Table ids are generated by the table actor's counter and render as `table_N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(pub u32);

impl Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table_{}", self.0)
    }
}

impl FromStr for TableId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("table_").unwrap_or(s).parse().map(TableId)
    }
}

/// A physical table. Its orders are embedded in the document, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub number: u32,
    pub restaurant_id: RestaurantId,
    pub orders: Vec<Order>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new Table.
#[derive(Debug, Clone)]
pub struct TableCreate {
    pub restaurant_id: RestaurantId,
    pub number: u32,
}

impl Table {
    /// Orders still pending or preparing.
    pub fn active_order_count(&self) -> usize {
        self.orders.iter().filter(|o| o.status.is_active()).count()
    }

    /// What the printed QR code for this table encodes.
    pub fn qr_payload(&self) -> QrPayload {
        QrPayload {
            restaurant_id: self.restaurant_id.clone(),
            table_id: self.id,
        }
    }
}
