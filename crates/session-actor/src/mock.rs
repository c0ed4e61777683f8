//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`SessionClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a running actor.
//! Use it to test client wrappers and orchestration code without spawning
//! sessions.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real session state |
//! | **Use Case** | Logic *around* the client | The session itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! 1. **Pure mock**: script the replies a client wrapper should see.
//! 2. **Single actor**: spawn one `SessionActor` with a test context.
//! 3. **Actor with test collaborators**: real actor, scripted services in the context.
//! 4. **Full system**: the orchestrator with simulated services under a paused clock.
//!
//! ## Simulating Failures
//!
//! ```rust
//! use session_actor::mock::MockClient;
//! use session_actor::{FrameworkError, Outcome, SessionEntity, Task};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Form { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("form error")] struct FormError;
//!
//! #[async_trait]
//! impl SessionEntity for Form {
//!     type Id = u32; type Create = (); type Action = (); type ActionResult = ();
//!     type Completion = (); type Context = (); type Error = FormError;
//!     fn from_create_params(id: u32, _: (), _: &()) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<Outcome<Self>, Self::Error> {
//!         Ok(Outcome::reply(()))
//!     }
//!     async fn on_complete(&mut self, _: (), _: &()) -> Option<Task<()>> { None }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Form>::new();
//!     mock.expect_snapshot(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().snapshot(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::SessionClient;
use crate::entity::SessionEntity;
use crate::error::FrameworkError;
use crate::message::SessionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// A scripted reply for the next request.
enum Expectation<T: SessionEntity> {
    Open {
        response: Result<T::Id, FrameworkError>,
    },
    Snapshot {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Settle {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Close {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<E>(mutex: &Mutex<E>) -> MutexGuard<'_, E> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking.
///
/// Requests must arrive in the order the expectations were queued and address
/// the expected session id; anything else fails the background responder,
/// which surfaces to the caller as [`FrameworkError::ActorDropped`] and leaves
/// the expectation in place for [`MockClient::verify`] to report.
///
/// Every action received is recorded (as its `Debug` text) and available from
/// [`MockClient::actions`].
pub struct MockClient<T: SessionEntity> {
    client: SessionClient<T>,
    expectations: Queue<T>,
    actions: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SessionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SessionEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<SessionRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let actions = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let log = actions.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                if let SessionRequest::Action { action, .. } = &request {
                    lock(&log).push(format!("{action:?}"));
                }
                let mut exps = lock(&queue);
                let Some(expectation) = exps.pop_front() else {
                    continue;
                };
                let mismatch = match (request, expectation) {
                    (SessionRequest::Open { respond_to, .. }, Expectation::Open { response }) => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (
                        SessionRequest::Snapshot { id, respond_to },
                        Expectation::Snapshot { id: want, response },
                    ) if id == want => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (
                        SessionRequest::Action { id, respond_to, .. },
                        Expectation::Action { id: want, response },
                    ) if id == want => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (
                        SessionRequest::Settle { id, respond_to },
                        Expectation::Settle { id: want, response },
                    ) if id == want => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (
                        SessionRequest::Close { id, respond_to },
                        Expectation::Close { id: want, response },
                    ) if id == want => {
                        let _ = respond_to.send(response);
                        None
                    }
                    // The request's responder is dropped here; the caller sees ActorDropped.
                    (_, expectation) => Some(expectation),
                };
                if let Some(expectation) = mismatch {
                    exps.push_front(expectation);
                }
            }
        });

        Self {
            client: SessionClient::new(sender),
            expectations,
            actions,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SessionClient<T> {
        self.client.clone()
    }

    /// `Debug` renderings of every action received so far, in arrival order.
    pub fn actions(&self) -> Vec<String> {
        lock(&self.actions).clone()
    }

    /// Expects an `open` request.
    pub fn expect_open(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Open { response })
    }

    /// Expects a `snapshot` request for `id`.
    pub fn expect_snapshot(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Snapshot {
            id,
            response,
        })
    }

    /// Expects an action for session `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Action {
            id,
            response,
        })
    }

    /// Expects a `settled` request for `id`.
    pub fn expect_settle(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Settle {
            id,
            response,
        })
    }

    /// Expects a `close` request for `id`.
    pub fn expect_close(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Close {
            id,
            response,
        })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        assert!(
            remaining == 0,
            "Not all expectations were met. {remaining} remaining"
        );
    }
}

/// Completes an expectation with its scripted response.
pub struct ExpectationBuilder<T: SessionEntity, R> {
    expectations: Queue<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: SessionEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Replies with a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.build)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Outcome, Task};
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Draft {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    enum DraftAction {
        Append(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("draft error")]
    struct DraftError;

    #[async_trait]
    impl SessionEntity for Draft {
        type Id = u32;
        type Create = ();
        type Action = DraftAction;
        type ActionResult = usize;
        type Completion = ();
        type Context = ();
        type Error = DraftError;

        fn from_create_params(id: u32, _: (), _: &()) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                text: String::new(),
            })
        }

        async fn handle_action(
            &mut self,
            action: DraftAction,
            _ctx: &(),
        ) -> Result<Outcome<Self>, Self::Error> {
            let DraftAction::Append(more) = action;
            self.text.push_str(&more);
            Ok(Outcome::reply(self.text.len()))
        }

        async fn on_complete(&mut self, _: (), _: &()) -> Option<Task<()>> {
            None
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Draft>::new();
        mock.expect_open().return_ok(7);
        mock.expect_action(7).return_ok(5);
        mock.expect_snapshot(7).return_ok(Some(Draft {
            id: 7,
            text: "hello".to_string(),
        }));

        let client = mock.client();
        let id = client.open(()).await.unwrap();
        assert_eq!(id, 7);
        let len = client
            .perform_action(id, DraftAction::Append("hello".into()))
            .await
            .unwrap();
        assert_eq!(len, 5);
        let draft = client.snapshot(id).await.unwrap().unwrap();
        assert_eq!(draft.text, "hello");

        assert_eq!(mock.actions(), vec![r#"Append("hello")"#.to_string()]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_is_dropped() {
        let mut mock = MockClient::<Draft>::new();
        mock.expect_close(1).return_ok(());

        let result = mock.client().snapshot(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        // The unmatched expectation is still queued and can be consumed later.
        mock.client().close(1).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_unscripted_request_is_dropped() {
        let mock = MockClient::<Draft>::new();
        let result = mock.client().settled(3).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
