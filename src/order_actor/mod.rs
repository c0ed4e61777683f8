//! # Order Actor
//!
//! Hosts every open order form. Each session keeps its own configuration,
//! prices it against the shared catalog after every change and submits it to
//! the order service in the background.
//!
//! ## Structure
//!
//! - [`entity`] - [`SessionEntity`](session_actor::SessionEntity) implementation for [`OrderSession`]
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use pizzeria::order_actor::{self, OrderContext};
//! use pizzeria::model::PriceCatalog;
//! use pizzeria::services::SimulatedOrderService;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = order_actor::new(32);
//!     tokio::spawn(actor.run(OrderContext {
//!         catalog: Arc::new(PriceCatalog::builtin()),
//!         service: Arc::new(SimulatedOrderService::new(Duration::from_millis(10))),
//!     }));
//!
//!     let id = client.open().await?;
//!     let edit = client.toggle_topping(id, "Paneer").await?;
//!     assert_eq!(edit.total, 559);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::clients::OrderClient;
use session_actor::SessionActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (SessionActor<OrderSession>, OrderClient) {
    let (actor, generic_client) = SessionActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
