//! # Generic Session Actor
//!
//! `SessionActor` is the server side of the runtime. It owns every open session
//! of one entity type, applies commands to them one at a time, and polls the
//! background work those commands start.

use crate::client::SessionClient;
use crate::entity::{Outcome, SessionEntity, Task};
use crate::error::FrameworkError;
use crate::message::{Response, SessionRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, info, warn};

/// One hosted session plus its bookkeeping.
struct Slot<T: SessionEntity> {
    entity: T,
    in_flight: usize,
    waiters: Vec<Response<T>>,
}

impl<T: SessionEntity> Slot<T> {
    fn new(entity: T) -> Self {
        Self {
            entity,
            in_flight: 0,
            waiters: Vec::new(),
        }
    }

    /// Answers pending `Settle` requests once nothing is in flight.
    fn release_waiters(&mut self) {
        if self.in_flight > 0 {
            return;
        }
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(Ok(self.entity.clone()));
        }
    }
}

/// The generic actor that hosts every session of one entity type.
///
/// # Concurrency Model
/// Commands are processed sequentially inside a single Tokio task, so session
/// state needs no `Mutex`. Slow work (collaborator calls, timers) runs in a
/// `JoinSet` owned by the actor; the loop `select!`s between new requests and
/// finished tasks, and each finished task is routed back to the session that
/// started it.
///
/// # Usage Pattern
///
/// 1. **Create**: `SessionActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use session_actor::{Outcome, SessionActor, SessionEntity, Task};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl SessionEntity for Counter {
///     type Id = u32;
///     type Create = ();
///     type Action = ();
///     type ActionResult = u32;
///     type Completion = ();
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: (), _: &()) -> Result<Self, Self::Error> {
///         Ok(Self { id, hits: 0 })
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<Outcome<Self>, Self::Error> {
///         self.hits += 1;
///         Ok(Outcome::reply(self.hits))
///     }
///     async fn on_complete(&mut self, _: (), _: &()) -> Option<Task<()>> { None }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = SessionActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.open(()).await.unwrap();
///     assert_eq!(client.perform_action(id, ()).await.unwrap(), 1);
/// }
/// ```
pub struct SessionActor<T: SessionEntity> {
    receiver: mpsc::Receiver<SessionRequest<T>>,
    sessions: HashMap<T::Id, Slot<T>>,
    background: JoinSet<T::Completion>,
    owners: HashMap<task::Id, T::Id>,
    next_id: u32,
}

impl<T: SessionEntity> SessionActor<T> {
    /// Creates a new `SessionActor` and its associated `SessionClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait for
    /// space when it is full.
    pub fn new(buffer_size: usize) -> (Self, SessionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            sessions: HashMap::new(),
            background: JoinSet::new(),
            owners: HashMap::new(),
            next_id: 1,
        };
        (actor, SessionClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// Background work still in flight at that point is aborted.
    pub async fn run(mut self, context: T::Context) {
        // "OrderSession" instead of "pizzeria::order_actor::entity::OrderSession"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request, &context, entity_type).await,
                    None => break,
                },
                Some(joined) = self.background.join_next_with_id() => {
                    let (task_id, result) = match joined {
                        Ok((task_id, completion)) => (task_id, Ok(completion)),
                        Err(e) => (e.id(), Err(e)),
                    };
                    self.complete(task_id, result, &context, entity_type).await;
                }
            }
        }

        info!(
            entity_type,
            size = self.sessions.len(),
            pending = self.background.len(),
            "Shutdown"
        );
        self.background.shutdown().await;
    }

    async fn handle_request(
        &mut self,
        request: SessionRequest<T>,
        context: &T::Context,
        entity_type: &str,
    ) {
        match request {
            SessionRequest::Open { params, respond_to } => {
                debug!(entity_type, ?params, "Open");
                let id = T::Id::from(self.next_id);
                self.next_id += 1;

                match T::from_create_params(id.clone(), params, context) {
                    Ok(mut entity) => {
                        if let Err(e) = entity.on_create(context).await {
                            warn!(entity_type, error = %e, "on_create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            return;
                        }
                        self.sessions.insert(id.clone(), Slot::new(entity));
                        info!(entity_type, %id, size = self.sessions.len(), "Opened");
                        let _ = respond_to.send(Ok(id));
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Open failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    }
                }
            }
            SessionRequest::Snapshot { id, respond_to } => {
                let entity = self.sessions.get(&id).map(|slot| slot.entity.clone());
                debug!(entity_type, %id, found = entity.is_some(), "Snapshot");
                let _ = respond_to.send(Ok(entity));
            }
            SessionRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                let Some(slot) = self.sessions.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                match slot.entity.handle_action(action, context).await {
                    Ok(Outcome { reply, task }) => {
                        if let Some(task) = task {
                            self.spawn(id.clone(), task);
                        }
                        info!(entity_type, %id, "Action ok");
                        let _ = respond_to.send(Ok(reply));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Action failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    }
                }
            }
            SessionRequest::Settle { id, respond_to } => {
                let Some(slot) = self.sessions.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                debug!(entity_type, %id, in_flight = slot.in_flight, "Settle");
                slot.waiters.push(respond_to);
                slot.release_waiters();
            }
            SessionRequest::Close { id, respond_to } => {
                debug!(entity_type, %id, "Close");
                let Some(slot) = self.sessions.get(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                if let Err(e) = slot.entity.on_close(context).await {
                    warn!(entity_type, %id, error = %e, "on_close failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                if let Some(mut slot) = self.sessions.remove(&id) {
                    if slot.in_flight > 0 {
                        warn!(entity_type, %id, in_flight = slot.in_flight, "Closed with work in flight");
                    }
                    for waiter in slot.waiters.drain(..) {
                        let _ = waiter.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                info!(entity_type, %id, size = self.sessions.len(), "Closed");
                let _ = respond_to.send(Ok(()));
            }
        }
    }

    fn spawn(&mut self, id: T::Id, task: Task<T::Completion>) {
        let handle = self.background.spawn(task);
        self.owners.insert(handle.id(), id.clone());
        if let Some(slot) = self.sessions.get_mut(&id) {
            slot.in_flight += 1;
        }
    }

    async fn complete(
        &mut self,
        task_id: task::Id,
        result: Result<T::Completion, JoinError>,
        context: &T::Context,
        entity_type: &str,
    ) {
        let Some(id) = self.owners.remove(&task_id) else {
            return;
        };
        let Some(slot) = self.sessions.get_mut(&id) else {
            warn!(entity_type, %id, "Completion for closed session discarded");
            return;
        };
        slot.in_flight = slot.in_flight.saturating_sub(1);

        let follow_up = match result {
            Ok(completion) => {
                debug!(entity_type, %id, ?completion, "Complete");
                let next = slot.entity.on_complete(completion, context).await;
                info!(entity_type, %id, follow_up = next.is_some(), "Completed");
                next
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Background task failed");
                None
            }
        };

        if let Some(task) = follow_up {
            self.spawn(id.clone(), task);
        }
        if let Some(slot) = self.sessions.get_mut(&id) {
            slot.release_waiters();
        }
    }
}
