//! # Order Lifecycle
//!
//! Submit, move and watch orders. Orders are embedded in their table's document,
//! so every write here is a single atomic action on one table.

use crate::cart::Cart;
use crate::clients::TableClient;
use crate::model::{OperatorAction, Order, OrderStatus, RestaurantId, Table, TableId, UserId};
use crate::orders::{customer_history, OrderError, OrderFeed, PastOrder};
use chrono::Utc;
use doc_actor::ActorClient;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct OrderLifecycle {
    tables: TableClient,
}

impl OrderLifecycle {
    pub fn new(tables: TableClient) -> Self {
        Self { tables }
    }

    /// Places the cart as a new pending order on `table_id` and empties the cart.
    ///
    /// The customer name is stored trimmed. On any error the cart and the table
    /// are left as they were.
    pub async fn submit(
        &self,
        table_id: TableId,
        customer_name: &str,
        cart: &mut Cart,
    ) -> Result<Order, OrderError> {
        self.place(table_id, None, customer_name, cart).await
    }

    /// Same as [`OrderLifecycle::submit`], recording the signed-in customer so
    /// the order shows up in their [`history`](OrderLifecycle::history).
    pub async fn submit_as(
        &self,
        table_id: TableId,
        customer_id: UserId,
        customer_name: &str,
        cart: &mut Cart,
    ) -> Result<Order, OrderError> {
        self.place(table_id, Some(customer_id), customer_name, cart).await
    }

    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    async fn place(
        &self,
        table_id: TableId,
        customer_id: Option<UserId>,
        customer_name: &str,
        cart: &mut Cart,
    ) -> Result<Order, OrderError> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(OrderError::Validation("customer name is required".into()));
        }
        if cart.is_empty() {
            return Err(OrderError::Validation("cart is empty".into()));
        }

        let mut order = Order::new(table_id, customer_name, cart.lines().to_vec(), Utc::now());
        if let Some(customer_id) = customer_id {
            order = order.placed_by(customer_id);
        }
        debug!(?order, "submit called");
        self.tables.append_order(table_id, order.clone()).await?;
        info!(order_id = %order.id, total = %order.total, "Order submitted");

        cart.clear();
        Ok(order)
    }

    /// Moves `order` to `to`.
    ///
    /// Fails with `InvalidTransition` if the move is illegal from the order's
    /// status, or if the stored order is no longer in the status the caller saw.
    #[instrument(skip(self, order), fields(order_id = %order.id, from = %order.status))]
    pub async fn transition(
        &self,
        table_id: TableId,
        order: &Order,
        to: OrderStatus,
    ) -> Result<Order, OrderError> {
        if !order.status.can_transition_to(to) {
            warn!(%to, "Rejected transition");
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to,
            });
        }
        let updated = self
            .tables
            .transition_order(table_id, order.id, order.status, to)
            .await?;
        info!(%to, "Order moved");
        Ok(updated)
    }

    /// Dashboard button handler.
    pub async fn apply(
        &self,
        order: &Order,
        action: OperatorAction,
    ) -> Result<Order, OrderError> {
        self.transition(order.table_id, order, action.target()).await
    }

    /// Opens the live order feed for a restaurant. The first delivery is
    /// available immediately.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, restaurant_id: RestaurantId) -> Result<OrderFeed, OrderError> {
        let tables = self.tables.watch_restaurant(restaurant_id).await?;
        Ok(OrderFeed::new(tables))
    }

    /// Every order of the restaurant at this moment, in no particular order.
    #[instrument(skip(self))]
    pub async fn orders(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>, OrderError> {
        let tables = self.tables.list(restaurant_id).await?;
        Ok(tables.into_iter().flat_map(|t: Table| t.orders).collect())
    }

    /// Orders a signed-in customer placed anywhere, newest first.
    #[instrument(skip(self))]
    pub async fn history(&self, customer_id: UserId) -> Result<Vec<PastOrder>, OrderError> {
        let wanted = customer_id.clone();
        let tables = self
            .tables
            .query(move |t: &Table| {
                t.orders
                    .iter()
                    .any(|o| o.customer_id.as_ref() == Some(&wanted))
            })
            .await?;
        Ok(customer_history(tables, &customer_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuItem, MenuItemId};
    use crate::table_actor::{TableAction, TableActionResult, TableError};
    use doc_actor::mock::{create_mock_client, expect_action, MockClient};
    use doc_actor::FrameworkError;
    use rust_decimal::Decimal;

    fn cart_with_soup() -> Cart {
        let mut cart = Cart::new();
        cart.add(&MenuItem {
            id: MenuItemId::from("soup"),
            name: "Soup".into(),
            price: Decimal::new(650, 2),
            description: String::new(),
            category: "Starters".into(),
        });
        cart
    }

    #[tokio::test]
    async fn test_submit_validation_never_touches_the_table() {
        let mock = MockClient::<Table>::new();
        let lifecycle = OrderLifecycle::new(TableClient::new(mock.client()));

        let mut cart = cart_with_soup();
        let blank = lifecycle.submit(TableId(1), "   ", &mut cart).await;
        assert!(matches!(blank, Err(OrderError::Validation(_))));
        assert!(!cart.is_empty());

        let mut empty = Cart::new();
        let no_items = lifecycle.submit(TableId(1), "Gus", &mut empty).await;
        assert!(matches!(no_items, Err(OrderError::Validation(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_builds_pending_order_and_clears_cart() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let lifecycle = OrderLifecycle::new(TableClient::new(client));

        let task = tokio::spawn(async move {
            let mut cart = cart_with_soup();
            let order = lifecycle.submit(TableId(3), "  Hana ", &mut cart).await;
            (order, cart)
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, TableId(3));
        let TableAction::AppendOrder(sent) = action else {
            panic!("Expected AppendOrder");
        };
        assert_eq!(sent.status, OrderStatus::Pending);
        assert_eq!(sent.customer_name, "Hana");
        assert_eq!(sent.total, Decimal::new(650, 2));
        responder
            .send(Ok(TableActionResult::AppendOrder(true)))
            .unwrap();

        let (order, cart) = task.await.unwrap();
        assert_eq!(order.unwrap().id, sent.id);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_cart() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_action(TableId(9))
            .return_err(FrameworkError::NotFound("table_9".into()));
        let lifecycle = OrderLifecycle::new(TableClient::new(mock.client()));

        let mut cart = cart_with_soup();
        let result = lifecycle.submit(TableId(9), "Ivy", &mut cart).await;
        assert_eq!(result, Err(OrderError::NotFound("table_9".into())));
        assert_eq!(cart.item_count(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_illegal_transition_is_rejected_locally() {
        let mock = MockClient::<Table>::new();
        let lifecycle = OrderLifecycle::new(TableClient::new(mock.client()));
        let mut cart = cart_with_soup();
        let order = Order::new(TableId(1), "Jo", cart.lines().to_vec(), Utc::now())
            .with_status(OrderStatus::Preparing);
        cart.clear();

        let result = lifecycle
            .transition(TableId(1), &order, OrderStatus::Cancelled)
            .await;
        assert_eq!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Preparing,
                to: OrderStatus::Cancelled
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_stale_transition_surfaces_stored_status() {
        let mut mock = MockClient::<Table>::new();
        let stale = TableError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Preparing,
        };
        mock.expect_action(TableId(1))
            .return_err(FrameworkError::EntityError(Box::new(stale)));
        let lifecycle = OrderLifecycle::new(TableClient::new(mock.client()));

        let order = Order::new(TableId(1), "Kai", cart_with_soup().lines().to_vec(), Utc::now());
        let result = lifecycle.apply(&order, OperatorAction::Accept).await;
        assert_eq!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Preparing
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_subscribe_failure_is_store_error() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_subscribe()
            .return_err(FrameworkError::ActorClosed);
        let lifecycle = OrderLifecycle::new(TableClient::new(mock.client()));

        let result = lifecycle.subscribe(RestaurantId::from("r1")).await;
        assert!(matches!(result, Err(OrderError::Store(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_as_records_customer() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let lifecycle = OrderLifecycle::new(TableClient::new(client));

        let task = tokio::spawn(async move {
            let mut cart = cart_with_soup();
            lifecycle
                .submit_as(TableId(2), UserId("u7".into()), "Lea", &mut cart)
                .await
        });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let TableAction::AppendOrder(sent) = action else {
            panic!("Expected AppendOrder");
        };
        assert_eq!(sent.customer_id, Some(UserId("u7".into())));
        responder
            .send(Ok(TableActionResult::AppendOrder(true)))
            .unwrap();

        let order = task.await.unwrap().unwrap();
        assert_eq!(order.customer_id, Some(UserId("u7".into())));
    }

    #[tokio::test]
    async fn test_history_failure_is_store_error() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_query().return_err(FrameworkError::ActorDropped);
        let lifecycle = OrderLifecycle::new(TableClient::new(mock.client()));

        let result = lifecycle.history(UserId("u7".into())).await;
        assert!(matches!(result, Err(OrderError::Store(_))));
        mock.verify();
    }
}
