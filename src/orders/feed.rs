//! # Live Order Feed
//!
//! Turns the live query over a restaurant's tables into the dashboard's view:
//! one flat list of orders, newest first, rebuilt from scratch on every change.
//! A dashboard that reads slowly skips straight to the newest board.
//!
//! The feed also remembers which pending orders it has already announced, so a
//! [`PendingNotice`] only ever names orders the dashboard has not seen yet.

use crate::model::{Order, OrderId, OrderStatus, Table};
use doc_actor::Subscription;
use std::collections::HashSet;
use tracing::{debug, info};

/// Pending orders that appeared since the previous delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNotice {
    pub orders: Vec<Order>,
}

impl PendingNotice {
    pub fn count(&self) -> usize {
        self.orders.len()
    }
}

/// One delivery of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBoard {
    /// Every order of the restaurant, sorted by `created_at` descending.
    pub orders: Vec<Order>,
    pub notice: Option<PendingNotice>,
}

impl OrderBoard {
    pub fn with_status(&self, status: OrderStatus) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter().filter(move |o| o.status == status)
    }
}

/// A restaurant's open live query. Dropping it (or calling [`OrderFeed::close`])
/// ends the subscription.
pub struct OrderFeed {
    tables: Subscription<Table>,
    announced: HashSet<OrderId>,
}

impl OrderFeed {
    pub fn new(tables: Subscription<Table>) -> Self {
        Self {
            tables,
            announced: HashSet::new(),
        }
    }

    /// Waits for the next delivery. `None` once the store has shut down.
    pub async fn next(&mut self) -> Option<OrderBoard> {
        let tables = self.tables.next().await?;
        Some(self.board(tables))
    }

    /// The next delivery if one is already pending.
    pub fn try_next(&mut self) -> Option<OrderBoard> {
        let tables = self.tables.try_next()?;
        Some(self.board(tables))
    }

    pub fn close(self) {
        self.tables.close();
    }

    fn board(&mut self, tables: Vec<Table>) -> OrderBoard {
        let orders = flatten(tables);
        let notice = self.notice_for(&orders);
        debug!(count = orders.len(), "Order snapshot");
        OrderBoard { orders, notice }
    }

    fn notice_for(&mut self, orders: &[Order]) -> Option<PendingNotice> {
        let pending: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .collect();

        let fresh: Vec<Order> = pending
            .iter()
            .filter(|o| !self.announced.contains(&o.id))
            .map(|o| (*o).clone())
            .collect();

        // An order never returns to pending, so anything else can be forgotten.
        self.announced = pending.iter().map(|o| o.id).collect();

        if fresh.is_empty() {
            return None;
        }
        info!(count = fresh.len(), "New pending orders");
        Some(PendingNotice { orders: fresh })
    }
}

/// All embedded orders, newest first. Ties keep table order.
fn flatten(mut tables: Vec<Table>) -> Vec<Order> {
    tables.sort_by_key(|t| t.id);
    let mut orders: Vec<Order> = tables.into_iter().flat_map(|t| t.orders).collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}
