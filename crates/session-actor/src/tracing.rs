//! # Observability & Tracing
//!
//! Structured logging bootstrap shared by every binary built on the runtime.
//!
//! The actor loop emits one event per lifecycle step with `entity_type` and the
//! session id as fields:
//!
//! ```text
//! INFO Actor started entity_type="OrderSession"
//! INFO Opened entity_type="OrderSession" id=order_session_1 size=1
//! INFO Action ok entity_type="OrderSession" id=order_session_1
//! INFO Completed entity_type="OrderSession" id=order_session_1 follow_up=false
//! ```
//!
//! With `RUST_LOG=debug` the payloads (`?action`, `?completion`) are logged once
//! when they enter the actor.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=session_actor=debug,pizzeria=info cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the compact fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn setup_tracing() {
    setup_tracing_with("info");
}

/// Installs the compact fmt subscriber, falling back to `default_directive`
/// when `RUST_LOG` is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed.
pub fn setup_tracing_with(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already names the source
        .compact()
        .try_init()
        .is_ok()
}
