//! # Session Messages
//!
//! Requests sent from a [`SessionClient`](crate::SessionClient) to a
//! [`SessionActor`](crate::SessionActor). Every request carries a oneshot
//! responder.

use crate::entity::SessionEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// The variants follow the life of a form on screen:
///
/// - **Open**: mount a fresh session from [`SessionEntity::Create`].
/// - **Snapshot**: read a copy of the current state.
/// - **Action**: apply a [`SessionEntity::Action`].
/// - **Settle**: wait until the session has no background work in flight.
/// - **Close**: unmount the session.
#[derive(Debug)]
pub enum SessionRequest<T: SessionEntity> {
    Open {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Snapshot {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Settle {
        id: T::Id,
        respond_to: Response<T>,
    },
    Close {
        id: T::Id,
        respond_to: Response<()>,
    },
}
