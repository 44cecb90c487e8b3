//! Starting and stopping the whole system.

pub mod restaurant_system;

pub use restaurant_system::*;
