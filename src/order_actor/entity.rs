//! SessionEntity implementation for an ordering session.
//!
//! The session owns one [`OrderConfiguration`] and walks it through
//! `Editing → Submitting → Placed → (reset) → Editing`. Submission runs as a
//! background task so the `Submitting` phase is visible to snapshots; its
//! result comes back through `on_complete`.

use super::actions::{Edit, OrderAction, OrderActionResult, OrderEvent};
use super::error::OrderError;
use crate::model::{OrderConfiguration, OrderSummary, Price, PriceCatalog};
use crate::services::{OrderReceipt, SharedOrderService};
use async_trait::async_trait;
use serde::Serialize;
use session_actor::{Outcome, SessionEntity, Task};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

/// Type-safe identifier for ordering sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrderSessionId(pub u32);

impl From<u32> for OrderSessionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_session_{}", self.0)
    }
}

/// Dependencies shared by every ordering session.
#[derive(Clone)]
pub struct OrderContext {
    pub catalog: Arc<PriceCatalog>,
    pub service: SharedOrderService,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OrderPhase {
    Editing,
    Submitting,
    Placed(OrderReceipt),
}

impl OrderPhase {
    pub fn name(&self) -> &'static str {
        match self {
            OrderPhase::Editing => "editing",
            OrderPhase::Submitting => "submitting",
            OrderPhase::Placed(_) => "placed",
        }
    }
}

/// One customer's order form.
#[derive(Debug, Clone)]
pub struct OrderSession {
    id: OrderSessionId,
    catalog: Arc<PriceCatalog>,
    configuration: OrderConfiguration,
    phase: OrderPhase,
    last_error: Option<String>,
}

impl OrderSession {
    pub fn id(&self) -> OrderSessionId {
        self.id
    }

    pub fn configuration(&self) -> &OrderConfiguration {
        &self.configuration
    }

    pub fn phase(&self) -> &OrderPhase {
        &self.phase
    }

    /// The receipt once the order has been placed.
    pub fn receipt(&self) -> Option<&OrderReceipt> {
        match &self.phase {
            OrderPhase::Placed(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Why the last submission failed, until the next one starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn total(&self) -> Price {
        self.configuration.total(&self.catalog)
    }

    pub fn summary(&self) -> OrderSummary {
        self.configuration.summary(&self.catalog)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == OrderPhase::Editing
    }

    fn edit(&mut self, action: OrderAction) -> Result<Edit, OrderError> {
        if self.phase != OrderPhase::Editing {
            return Err(OrderError::Locked(self.phase.name()));
        }
        let catalog = &self.catalog;
        let config = &mut self.configuration;
        let changed = match action {
            OrderAction::SetSize(size) => config.set_size(catalog, &size),
            OrderAction::SetCrust(crust) => config.set_crust(catalog, &crust),
            OrderAction::ToggleTopping(topping) => config.toggle_topping(catalog, &topping),
            OrderAction::AdjustSide { side, delta } => {
                config.adjust_side_quantity(catalog, &side, delta)
            }
            OrderAction::SetQuantity(quantity) => config.set_quantity(quantity),
            OrderAction::AdjustQuantity(delta) => config.adjust_quantity(delta),
            OrderAction::Submit | OrderAction::Reset => false,
        };
        Ok(Edit {
            changed,
            total: self.total(),
        })
    }
}

#[async_trait]
impl SessionEntity for OrderSession {
    type Id = OrderSessionId;
    type Create = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Completion = OrderEvent;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderSessionId, _: (), ctx: &OrderContext) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            catalog: ctx.catalog.clone(),
            configuration: OrderConfiguration::new(&ctx.catalog),
            phase: OrderPhase::Editing,
            last_error: None,
        })
    }

    /// Handles the order form's commands.
    ///
    /// # Actions
    /// - Configuration changes: only while `Editing`, reply with the new total
    /// - `Submit`: `Editing → Submitting`, starts the submission task
    /// - `Reset`: back to a default configuration in `Editing`
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<Outcome<Self>, Self::Error> {
        match action {
            OrderAction::Submit => {
                match self.phase {
                    OrderPhase::Editing => {}
                    OrderPhase::Submitting => return Err(OrderError::SubmissionInProgress),
                    OrderPhase::Placed(_) => return Err(OrderError::AlreadyPlaced),
                }
                let total = self.total();
                let configuration = self.configuration.clone();
                let service = ctx.service.clone();
                self.phase = OrderPhase::Submitting;
                self.last_error = None;
                info!(id = %self.id, total, "Submitting order");

                Ok(Outcome::reply(OrderActionResult::Submitting(total)).with_task(async move {
                    OrderEvent::SubmissionFinished(service.submit(configuration, total).await)
                }))
            }
            OrderAction::Reset => {
                if self.phase == OrderPhase::Submitting {
                    return Err(OrderError::Locked(self.phase.name()));
                }
                self.configuration = OrderConfiguration::new(&self.catalog);
                self.phase = OrderPhase::Editing;
                self.last_error = None;
                Ok(Outcome::reply(OrderActionResult::Reset(self.total())))
            }
            edit => self
                .edit(edit)
                .map(|edit| Outcome::reply(OrderActionResult::Edited(edit))),
        }
    }

    async fn on_complete(&mut self, event: OrderEvent, _ctx: &OrderContext) -> Option<Task<OrderEvent>> {
        let OrderEvent::SubmissionFinished(result) = event;
        if self.phase != OrderPhase::Submitting {
            warn!(id = %self.id, phase = self.phase.name(), "Submission result without a submission");
            return None;
        }
        match result {
            Ok(receipt) => {
                info!(id = %self.id, order_id = %receipt.order_id, total = receipt.total, "Order placed");
                self.phase = OrderPhase::Placed(receipt);
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "Order submission failed");
                self.phase = OrderPhase::Editing;
                self.last_error = Some(e.to_string());
            }
        }
        None
    }
}
