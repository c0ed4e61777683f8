//! # ActorClient Trait
//!
//! Common surface for domain-specific clients: snapshot, settle and close come
//! for free on top of the wrapped [`SessionClient`].
use crate::{FrameworkError, SessionClient, SessionEntity};
use async_trait::async_trait;

/// Trait for session-specific clients to inherit the standard operations.
///
/// The client's error type converts from [`FrameworkError`], which is where a
/// domain error recovers its typed entity failures (see
/// [`FrameworkError::into_entity_error`]).
#[async_trait]
pub trait ActorClient<T: SessionEntity>: Send + Sync {
    /// The session-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic `SessionClient`.
    fn inner(&self) -> &SessionClient<T>;

    /// Fetch a copy of a session by id.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot(id).await.map_err(Self::Error::from)
    }

    /// Wait for a session's background work to finish.
    #[tracing::instrument(skip(self))]
    async fn settled(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().settled(id).await.map_err(Self::Error::from)
    }

    /// Close a session.
    #[tracing::instrument(skip(self))]
    async fn close(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().close(id).await.map_err(Self::Error::from)
    }
}
