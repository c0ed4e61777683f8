//! Type-safe wrappers around [`SessionClient`](session_actor::SessionClient).
//!
//! Each wrapper turns form controls into actions, unpacks the matching reply
//! and recovers the session's typed error. Snapshot, settle and close come from
//! [`ActorClient`](session_actor::ActorClient).

pub mod order_client;
pub mod registration_client;

pub use order_client::*;
pub use registration_client::*;
