//! The customer's cart: a purely local list of selected items.
//!
//! Nothing here touches the store. The cart is handed to
//! [`OrderLifecycle::submit`](crate::clients::OrderLifecycle::submit), which empties
//! it once the order has been written.

use crate::model::{MenuItem, MenuItemId, OrderLine};
use rust_decimal::Decimal;

/// A cart line has exactly the shape of an order line.
pub type CartLine = OrderLine;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, merging with an existing line for the same id.
    pub fn add(&mut self, item: &MenuItem) {
        self.add_line(OrderLine::from_menu_item(item));
    }

    /// Adds one unit of whatever `line` describes.
    ///
    /// The line's own quantity is ignored; a fresh line starts at 1.
    pub fn add_line(&mut self, line: CartLine) {
        match self
            .lines
            .iter_mut()
            .find(|l| l.menu_item_id == line.menu_item_id)
        {
            Some(existing) => existing.quantity += 1,
            None => self.lines.push(CartLine { quantity: 1, ..line }),
        }
    }

    /// Takes one unit away; the line disappears when it reaches zero.
    pub fn remove(&mut self, menu_item_id: &MenuItemId) {
        if let Some(pos) = self
            .lines
            .iter()
            .position(|l| &l.menu_item_id == menu_item_id)
        {
            if self.lines[pos].quantity > 1 {
                self.lines[pos].quantity -= 1;
            } else {
                self.lines.remove(pos);
            }
        }
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
