//! Order lifecycle support: the error taxonomy, the live dashboard feed, customer
//! history and the sales aggregations. The write side is [`OrderLifecycle`](crate::clients::OrderLifecycle).

pub mod analytics;
pub mod error;
pub mod feed;
pub mod history;

pub use analytics::*;
pub use error::*;
pub use feed::*;
pub use history::*;
