//! # System Lifecycle & Orchestration
//!
//! Starts, wires and stops the two session actors.
//!
//! ## The Pizzeria Pattern
//!
//! [`Pizzeria`] is the conductor:
//!
//! 1. **Actor Creation**: `order_actor::new` and `registration_actor::new`
//!    return an actor and its typed client.
//! 2. **Dependency Injection**: the catalog, the collaborators and the banner
//!    duration go into each actor's context at `run(context)` time.
//! 3. **Graceful Shutdown**: dropping the clients closes the request channels;
//!    each actor then aborts any background work still in flight and exits.
//!
//! The two actors never talk to each other, so shutdown order does not matter.
//!
//! ## Observability
//!
//! Call [`setup_tracing`](session_actor::tracing::setup_tracing) once at
//! startup:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Lifecycle events
//! RUST_LOG=debug cargo run     # Plus action and completion payloads (passwords redacted)
//! ```

pub mod pizzeria;

pub use pizzeria::*;
