//! # Pizzeria
//!
//! State and logic behind two customer-facing forms of a pizza shop, each
//! hosted by its own session actor:
//!
//! - **Order configurator** ([`order_actor`]): size, crust, toppings, sides and
//!   quantity, priced against a shared [`PriceCatalog`](model::PriceCatalog)
//!   after every change, then submitted to an order service.
//! - **Registration validator** ([`registration_actor`]): seven fields validated
//!   together on every change, errors shown once a field has been touched, a
//!   valid form sent to a registration service.
//!
//! ## Module Tour
//!
//! - [`model`]: plain data and pure rules (catalog, configuration, form, validation)
//! - [`services`]: the collaborator traits and their simulated implementations
//! - [`order_actor`] / [`registration_actor`]: the session entities, their actions and errors
//! - [`clients`]: typed wrappers, one method per form control
//! - [`lifecycle`]: [`Pizzeria`](lifecycle::Pizzeria), which starts, wires and stops the actors
//! - [`config`]: layered [`Settings`](config::Settings)
//!
//! ## Sessions
//!
//! Opening a session is mounting a form; closing it is navigating away. Each
//! session owns its state; sessions never see each other. Submissions run in the
//! background, so a snapshot taken mid-flight shows the form as `Submitting`.
//! `settled(id)` waits for the background work of one session to finish.
//!
//! ## Testing
//!
//! See [`session_actor::mock`] for testing clients without spawning actors, and
//! the `tests/` directory for full-system tests under a paused Tokio clock.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod registration_actor;
pub mod services;
