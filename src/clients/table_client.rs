//! # Table Client
//!
//! The table registry plus the two atomic order mutations the lifecycle manager
//! needs. Wraps a `ResourceClient<Table>`.

use crate::model::{Order, OrderId, OrderStatus, RestaurantId, Table, TableCreate, TableId};
use crate::table_actor::{TableAction, TableActionResult, TableError};
use async_trait::async_trait;
use doc_actor::{ActorClient, FrameworkError, ResourceClient, Subscription};
use tracing::{debug, info, instrument};

/// Client for interacting with the Table actor.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Table>,
}

#[async_trait]
impl ActorClient<Table> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Table> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TableError::from_framework(e)
    }
}

impl TableClient {
    pub fn new(inner: ResourceClient<Table>) -> Self {
        Self { inner }
    }

    /// Adds a table with an empty order list and returns it.
    #[instrument(skip(self))]
    pub async fn create(&self, restaurant_id: RestaurantId, number: u32) -> Result<Table, TableError> {
        let id = self
            .inner
            .create(TableCreate {
                restaurant_id,
                number,
            })
            .await
            .map_err(TableError::from_framework)?;
        info!(%id, number, "Table created");
        self.get(id).await
    }

    /// Like [`ActorClient::get`], but a missing table is an error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: TableId) -> Result<Table, TableError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(TableError::from_framework)?
            .ok_or_else(|| TableError::NotFound(id.to_string()))
    }

    /// The restaurant's tables in ascending number order.
    #[instrument(skip(self))]
    pub async fn list(&self, restaurant_id: RestaurantId) -> Result<Vec<Table>, TableError> {
        let mut tables = self
            .query(move |t: &Table| t.restaurant_id == restaurant_id)
            .await?;
        tables.sort_by_key(|t| (t.number, t.id));
        Ok(tables)
    }

    /// Appends `order` unless an identical order is already stored.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn append_order(&self, table_id: TableId, order: Order) -> Result<bool, TableError> {
        match self
            .inner
            .perform_action(table_id, TableAction::AppendOrder(order))
            .await
        {
            Ok(TableActionResult::AppendOrder(appended)) => Ok(appended),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(TableError::from_framework(e)),
        }
    }

    /// Moves one embedded order from `from` to `to` in a single step.
    #[instrument(skip(self))]
    pub async fn transition_order(
        &self,
        table_id: TableId,
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, TableError> {
        match self
            .inner
            .perform_action(table_id, TableAction::TransitionOrder { order_id, from, to })
            .await
        {
            Ok(TableActionResult::TransitionOrder(order)) => Ok(order),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(TableError::from_framework(e)),
        }
    }

    /// Live query over every table of one restaurant.
    #[instrument(skip(self))]
    pub async fn watch_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Subscription<Table>, TableError> {
        self.inner
            .subscribe(move |t: &Table| t.restaurant_id == restaurant_id)
            .await
            .map_err(TableError::from_framework)
    }
}

fn unexpected(result: TableActionResult) -> TableError {
    TableError::Store(format!("unexpected action result {result:?}"))
}
