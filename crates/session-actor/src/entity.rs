//! # SessionEntity Trait
//!
//! The `SessionEntity` trait is the contract every hosted session (an open order
//! form, a registration attempt, …) implements to be driven by the generic
//! [`SessionActor`](crate::SessionActor). It names the associated types for ids,
//! commands, replies, background completions, context and errors, and provides
//! the lifecycle hooks (`on_create`, `handle_action`, `on_complete`, `on_close`).
//!
//! # Background Work
//! A command handler never awaits a slow collaborator directly. Instead it
//! returns an [`Outcome`] carrying an optional [`Task`]. The actor runs the task
//! off the command loop, so other sessions (and snapshots of this one) stay
//! responsive, and hands the task's output back through
//! [`SessionEntity::on_complete`] on the actor task.
//!
//! # Provided Methods (Hooks)
//! - [`SessionEntity::on_create`]
//! - [`SessionEntity::on_close`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;

/// Background work started by a session, resolved off the command loop.
pub type Task<C> = Pin<Box<dyn Future<Output = C> + Send + 'static>>;

/// What a command produced: the reply for the caller and, optionally, a task
/// whose output is delivered later to [`SessionEntity::on_complete`].
pub struct Outcome<T: SessionEntity> {
    pub reply: T::ActionResult,
    pub task: Option<Task<T::Completion>>,
}

impl<T: SessionEntity> Outcome<T> {
    /// A reply with no background work attached.
    pub fn reply(reply: T::ActionResult) -> Self {
        Self { reply, task: None }
    }

    /// Attaches background work to this outcome.
    pub fn with_task<F>(mut self, task: F) -> Self
    where
        F: Future<Output = T::Completion> + Send + 'static,
    {
        self.task = Some(Box::pin(task));
        self
    }
}

impl<T: SessionEntity> Debug for Outcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outcome")
            .field("reply", &self.reply)
            .field("task", &self.task.is_some())
            .finish()
    }
}

/// Trait that any session state must implement to be hosted by a `SessionActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so implementations may await cheap work, and all of
/// them receive the actor's `Context`, injected at `run()` time ("late binding").
/// Shared read-only configuration and collaborator handles belong there.
#[async_trait]
pub trait SessionEntity: Clone + Send + Sync + 'static {
    /// Session identifier, generated by the actor from a counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Data needed to open a new session.
    type Create: Send + Sync + Debug;

    /// Commands the session understands.
    type Action: Send + Sync + Debug;

    /// Reply returned for every command.
    type ActionResult: Send + Sync + Debug;

    /// Output of background work started by a command.
    type Completion: Send + Debug + 'static;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The per-session error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the initial session state. Called before `on_create`.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called once the session has been built, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a command to the session.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Outcome<Self>, Self::Error>;

    /// Receives the output of a background task started by this session.
    /// May return a follow-up task (e.g. a timer).
    async fn on_complete(
        &mut self,
        completion: Self::Completion,
        ctx: &Self::Context,
    ) -> Option<Task<Self::Completion>>;

    /// Called immediately before the session is removed.
    async fn on_close(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
