//! # Generic Client
//!
//! The sending half of a [`SessionActor`](crate::SessionActor).

use crate::entity::SessionEntity;
use crate::error::FrameworkError;
use crate::message::SessionRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe, cheaply cloneable handle for talking to a `SessionActor`.
///
/// Every method sends one request and waits for its oneshot reply. Once all
/// clones are dropped the actor's loop ends.
pub struct SessionClient<T: SessionEntity> {
    sender: mpsc::Sender<SessionRequest<T>>,
}

// Manual impl: `derive(Clone)` would require `T: Clone` on the entity's associated types.
impl<T: SessionEntity> Clone for SessionClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: SessionEntity> std::fmt::Debug for SessionClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<T: SessionEntity> SessionClient<T> {
    pub fn new(sender: mpsc::Sender<SessionRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> SessionRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Opens a new session and returns its id.
    pub async fn open(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| SessionRequest::Open { params, respond_to })
            .await
    }

    /// Returns a copy of the session, or `None` if it does not exist.
    pub async fn snapshot(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| SessionRequest::Snapshot { id, respond_to })
            .await
    }

    /// Applies a command to the session.
    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| SessionRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Waits until the session has no background work in flight, then returns it.
    pub async fn settled(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| SessionRequest::Settle { id, respond_to })
            .await
    }

    /// Closes the session.
    pub async fn close(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| SessionRequest::Close { id, respond_to })
            .await
    }
}
