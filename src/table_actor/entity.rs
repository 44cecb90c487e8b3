//! [`ActorEntity`] implementation for [`Table`].

use crate::model::{Table, TableCreate, TableId};
use crate::table_actor::{TableAction, TableActionResult, TableError};
use async_trait::async_trait;
use chrono::Utc;
use doc_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Table {
    type Id = TableId;
    type Create = TableCreate;
    // Tables are never edited; orders change through actions.
    type Update = Infallible;
    type Action = TableAction;
    type ActionResult = TableActionResult;
    type Context = ();
    type Error = TableError;

    fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, TableError> {
        if params.number == 0 {
            return Err(TableError::Validation(
                "table number must be a positive integer".into(),
            ));
        }
        Ok(Self {
            id,
            number: params.number,
            restaurant_id: params.restaurant_id,
            orders: Vec::new(),
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), TableError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: TableAction,
        _ctx: &(),
    ) -> Result<TableActionResult, TableError> {
        match action {
            TableAction::AppendOrder(order) => {
                Ok(TableActionResult::AppendOrder(self.append_order(order)))
            }
            TableAction::TransitionOrder { order_id, from, to } => self
                .transition_order(order_id, from, to)
                .map(TableActionResult::TransitionOrder),
        }
    }
}
