//! Atomic mutations of a table's embedded order list.
//!
//! Both actions run inside the table actor, so two operators (or two customers)
//! hitting the same table are serialized and neither can lose the other's write.

use crate::model::{Order, OrderId, OrderStatus, Table};
use crate::table_actor::TableError;

#[derive(Debug, Clone)]
pub enum TableAction {
    /// Array-union append: adding an order that is already present is a no-op.
    AppendOrder(Order),
    /// Keyed in-place status change. `from` is the status the caller saw.
    TransitionOrder {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// One variant per [`TableAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableActionResult {
    /// `false` when the order was already present.
    AppendOrder(bool),
    TransitionOrder(Order),
}

impl Table {
    pub(crate) fn append_order(&mut self, order: Order) -> bool {
        if self.orders.contains(&order) {
            return false;
        }
        self.orders.push(order);
        true
    }

    pub(crate) fn transition_order(
        &mut self,
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, TableError> {
        let slot = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(TableError::OrderNotFound(order_id))?;

        // Someone else already moved it, or the move itself is illegal.
        if slot.status != from || !slot.status.can_transition_to(to) {
            return Err(TableError::InvalidTransition {
                from: slot.status,
                to,
            });
        }

        slot.status = to;
        Ok(slot.clone())
    }
}
