//! # Order Client
//!
//! Provides a high‑level API for interacting with the Order actor.
//! It wraps a `SessionClient<OrderSession>` and exposes one method per form control.
use crate::model::Price;
use crate::order_actor::{Edit, OrderAction, OrderActionResult, OrderError, OrderSession, OrderSessionId};
use async_trait::async_trait;
use session_actor::{ActorClient, SessionClient};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: SessionClient<OrderSession>,
}

impl OrderClient {
    pub fn new(inner: SessionClient<OrderSession>) -> Self {
        Self { inner }
    }

    /// Opens a fresh order form with the default configuration.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<OrderSessionId, OrderError> {
        debug!("Sending request");
        Ok(self.inner.open(()).await?)
    }

    /// The current state of an order form.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderSessionId) -> Result<OrderSession, OrderError> {
        self.snapshot(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    pub async fn set_size(&self, id: OrderSessionId, size: &str) -> Result<Edit, OrderError> {
        self.edit(id, OrderAction::SetSize(size.to_string())).await
    }

    pub async fn set_crust(&self, id: OrderSessionId, crust: &str) -> Result<Edit, OrderError> {
        self.edit(id, OrderAction::SetCrust(crust.to_string())).await
    }

    pub async fn toggle_topping(&self, id: OrderSessionId, topping: &str) -> Result<Edit, OrderError> {
        self.edit(id, OrderAction::ToggleTopping(topping.to_string()))
            .await
    }

    pub async fn adjust_side(
        &self,
        id: OrderSessionId,
        side: &str,
        delta: i64,
    ) -> Result<Edit, OrderError> {
        self.edit(
            id,
            OrderAction::AdjustSide {
                side: side.to_string(),
                delta,
            },
        )
        .await
    }

    pub async fn set_quantity(&self, id: OrderSessionId, quantity: i64) -> Result<Edit, OrderError> {
        self.edit(id, OrderAction::SetQuantity(quantity)).await
    }

    pub async fn adjust_quantity(&self, id: OrderSessionId, delta: i64) -> Result<Edit, OrderError> {
        self.edit(id, OrderAction::AdjustQuantity(delta)).await
    }

    /// Starts the submission and returns the total being charged.
    ///
    /// The call returns once the session is `Submitting`; use
    /// [`ActorClient::settled`] to wait for the outcome.
    #[instrument(skip(self))]
    pub async fn submit(&self, id: OrderSessionId) -> Result<Price, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::Submit).await? {
            OrderActionResult::Submitting(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the form to its default configuration.
    #[instrument(skip(self))]
    pub async fn reset(&self, id: OrderSessionId) -> Result<Price, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::Reset).await? {
            OrderActionResult::Reset(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    async fn edit(&self, id: OrderSessionId, action: OrderAction) -> Result<Edit, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, action).await? {
            OrderActionResult::Edited(edit) => Ok(edit),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(reply: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("Unexpected reply: {reply:?}"))
}

#[async_trait]
impl ActorClient<OrderSession> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &SessionClient<OrderSession> {
        &self.inner
    }
}
