//! Commands understood by an ordering session.
//!
//! These map one-to-one onto the controls of the order form. They are handled
//! by [`SessionEntity::handle_action`](session_actor::SessionEntity::handle_action)
//! on [`OrderSession`](super::OrderSession).

use crate::model::Price;
use crate::services::{OrderReceipt, SubmissionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    /// Picks a size; unknown sizes leave the order unchanged.
    SetSize(String),
    /// Picks a crust; unknown crusts leave the order unchanged.
    SetCrust(String),
    /// Adds the topping, or removes it if already selected.
    ToggleTopping(String),
    /// Shifts a side item's quantity, clamping at zero.
    AdjustSide { side: String, delta: i64 },
    /// Sets the number of pizzas (at least one).
    SetQuantity(i64),
    /// The +/- buttons next to the quantity.
    AdjustQuantity(i64),
    /// Hands the order to the submission service.
    Submit,
    /// Starts a fresh order.
    Reset,
}

/// Reply to a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// `false` when the command was a no-op (unknown option, clamped value).
    pub changed: bool,
    /// The total after the change.
    pub total: Price,
}

/// Results from OrderActions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderActionResult {
    Edited(Edit),
    /// The submission started; carries the total being charged.
    Submitting(Price),
    /// The configuration is back to defaults; carries the new total.
    Reset(Price),
}

/// Output of a session's background submission.
#[derive(Debug)]
pub enum OrderEvent {
    SubmissionFinished(Result<OrderReceipt, SubmissionError>),
}
