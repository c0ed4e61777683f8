//! Stand-in collaborators: each waits for a configured delay (in place of a
//! network round trip) and then succeeds. Nothing is persisted.

use super::{OrderReceipt, OrderSubmissionService, RegistrationService, SubmissionError};
use crate::model::{OrderConfiguration, Price, RegistrationPayload};
use async_trait::async_trait;
use nanoid::nanoid;
use std::time::Duration;
use tracing::{debug, info};

const ORDER_ID_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct SimulatedOrderService {
    delay: Duration,
}

impl SimulatedOrderService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl OrderSubmissionService for SimulatedOrderService {
    async fn submit(
        &self,
        configuration: OrderConfiguration,
        total: Price,
    ) -> Result<OrderReceipt, SubmissionError> {
        debug!(?configuration, total, "Simulating order submission");
        tokio::time::sleep(self.delay).await;
        let order_id = format!("#{}", nanoid!(ORDER_ID_LEN));
        info!(%order_id, total, "Order accepted");
        Ok(OrderReceipt { order_id, total })
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedRegistrationService {
    delay: Duration,
}

impl SimulatedRegistrationService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RegistrationService for SimulatedRegistrationService {
    async fn register(&self, payload: RegistrationPayload) -> Result<(), SubmissionError> {
        debug!(?payload, "Simulating registration");
        tokio::time::sleep(self.delay).await;
        info!(email = %payload.email, "Registration accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, PriceCatalog};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn order_service_waits_then_issues_receipt() {
        let catalog = PriceCatalog::builtin();
        let service = SimulatedOrderService::new(Duration::from_millis(2_000));
        let started = Instant::now();

        let receipt = service
            .submit(OrderConfiguration::new(&catalog), 499)
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2_000));
        assert_eq!(receipt.total, 499);
        assert!(receipt.order_id.starts_with('#'));
        assert_eq!(receipt.order_id.len(), ORDER_ID_LEN + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn registration_service_waits_then_accepts() {
        let service = SimulatedRegistrationService::new(Duration::from_millis(1_500));
        let started = Instant::now();
        let payload = RegistrationPayload {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9123456780".to_string(),
            password: "Secret123".to_string(),
            gender: Gender::Male,
        };

        service.register(payload).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1_500));
    }
}
