//! Pure data structures stored as documents by the collection actors.
//!
//! Field names serialize in camelCase, the shape the documents have in the
//! backing store.

pub mod identity;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod table;

pub use identity::*;
pub use menu::*;
pub use order::*;
pub use restaurant::*;
pub use table::*;
