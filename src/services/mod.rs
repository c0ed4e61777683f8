//! # Collaborators
//!
//! The two external service boundaries the forms hand their results to. Both
//! are opaque async traits so a real backend can replace the simulated ones in
//! [`simulated`] without touching the session logic.
//!
//! Sessions hold them as `Arc<dyn …>` inside the actor context and call them
//! from background tasks, so an implementation may take as long as it needs
//! without stalling other sessions.

pub mod simulated;

pub use simulated::*;

use crate::model::{OrderConfiguration, Price, RegistrationPayload};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    /// The service could not be reached or did not answer.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service answered and refused the submission.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Proof that an order was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub total: Price,
}

/// Accepts finished pizza orders.
#[async_trait]
pub trait OrderSubmissionService: Send + Sync {
    async fn submit(
        &self,
        configuration: OrderConfiguration,
        total: Price,
    ) -> Result<OrderReceipt, SubmissionError>;
}

/// Accepts validated registrations.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    async fn register(&self, payload: RegistrationPayload) -> Result<(), SubmissionError>;
}

pub type SharedOrderService = Arc<dyn OrderSubmissionService>;
pub type SharedRegistrationService = Arc<dyn RegistrationService>;
