//! Type-safe wrappers around [`ResourceClient`](doc_actor::ResourceClient).
//!
//! Each wrapper owns one collection's client and speaks in that collection's
//! error type. [`OrderLifecycle`] sits on top of [`TableClient`], since orders live
//! inside table documents.

pub mod menu_client;
pub mod order_client;
pub mod restaurant_client;
pub mod table_client;
pub mod user_client;

pub use menu_client::*;
pub use order_client::*;
pub use restaurant_client::*;
pub use table_client::*;
pub use user_client::*;
