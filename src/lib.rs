//! # Tableside
//!
//! Restaurant table ordering on top of an actor-backed document store.
//!
//! Restaurants manage tables, menus and QR codes; customers scan a table's QR code,
//! fill a cart and submit an order; the restaurant dashboard sees orders arrive
//! through a live feed and moves them through the kitchen.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per collection
//! `users`, `restaurants`, `menus` and `tables` are each owned by a
//! [`doc_actor::ResourceActor`]. Requests to one collection are processed one at a
//! time, so a table's embedded order list can never lose a concurrent write.
//!
//! ### 2. Orders live inside tables
//! Submitting appends to the table document; a status change is a keyed in-place
//! replace of one element. Both are single actor actions
//! (see [`table_actor::TableAction`]).
//!
//! ### 3. Live feed
//! [`clients::OrderLifecycle::subscribe`] opens a live query over a restaurant's
//! tables and turns each snapshot into a newest-first [`orders::OrderBoard`], with a
//! [`orders::PendingNotice`] for orders the dashboard has not seen yet.
//!
//! ### 4. Explicit state
//! There is no global state. [`lifecycle::RestaurantSystem`] wires the actors and
//! owns the [`session::SessionState`].
//!
//! ## Module Tour
//!
//! - [`model`]: documents and value types
//! - [`table_actor`], [`menu_actor`], [`user_actor`], [`restaurant_actor`]: entity rules
//! - [`clients`]: typed clients per collection, plus [`clients::OrderLifecycle`]
//! - [`orders`]: order errors, live feed, analytics
//! - [`cart`]: the customer's local cart
//! - [`session`]: auth provider seam and the signed-in identity
//! - [`routes`]: role-gated routes and QR payloads
//! - [`config`], [`lifecycle`]: configuration and system startup/shutdown
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod orders;
pub mod restaurant_actor;
pub mod routes;
pub mod session;
pub mod table_actor;
pub mod user_actor;
