//! # Registration Actor
//!
//! Hosts every open registration form. Each session holds the field values,
//! the derived error map and the set of touched fields, and talks to the
//! registration service in the background.
//!
//! ## Structure
//!
//! - [`entity`] - [`SessionEntity`](session_actor::SessionEntity) implementation for [`RegistrationSession`]
//! - [`actions`] - [`RegistrationAction`] and [`RegistrationActionResult`]
//! - [`error`] - [`RegistrationError`] plus the re-exported [`ValidationError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Error display
//!
//! Errors are computed for every field on every change, but a form only shows
//! the ones for fields the user has left ([`RegistrationSession::visible_errors`]).
//! Submitting touches every field, so a rejected submit shows everything.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::clients::RegistrationClient;
use session_actor::SessionActor;

/// Creates a new Registration actor and its client.
pub fn new(buffer_size: usize) -> (SessionActor<RegistrationSession>, RegistrationClient) {
    let (actor, generic_client) = SessionActor::new(buffer_size);
    (actor, RegistrationClient::new(generic_client))
}
