//! # Session Actor
//!
//! A small runtime for hosting many independent, stateful *sessions* (an open
//! form, a checkout in progress, a registration attempt) behind a single Tokio
//! task, following the actor pattern: isolated state, message passing, and
//! sequential processing.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`SessionEntity`]): your state and its command handler.
//! 2. **Runtime Layer** ([`SessionActor`]): the message loop plus background work.
//! 3. **Interface Layer** ([`SessionClient`], [`ActorClient`]): typed requests.
//!
//! ## Commands vs Background Work
//!
//! Command handlers mutate state synchronously from the caller's point of view
//! and reply immediately. When a command has to wait on something slow (a
//! remote collaborator, a timer) it returns an [`Outcome`] carrying a [`Task`].
//! The actor polls these tasks in a `JoinSet` next to its request channel and
//! routes each output back into the session through
//! [`SessionEntity::on_complete`], so
//!
//! - the session can be observed mid-flight (e.g. a "submitting" phase),
//! - other sessions are never blocked by one session's collaborator,
//! - completions are applied on the actor task, still without locks.
//!
//! [`SessionClient::settled`] waits until a session has nothing in flight.
//!
//! ## Context Injection
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at
//! construction time, so collaborators and shared configuration can be wired
//! after every actor and client exists.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `SessionClient` from scripted
//! expectations. Time-based behaviour is best tested under a paused Tokio clock
//! (`#[tokio::test(start_paused = true)]`).

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::SessionActor;
pub use client::SessionClient;
pub use client_trait::ActorClient;
pub use entity::{Outcome, SessionEntity, Task};
pub use error::FrameworkError;
pub use message::{Response, SessionRequest};
