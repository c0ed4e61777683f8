use async_trait::async_trait;
use pizzeria::model::{OrderConfiguration, Price, PriceCatalog};
use pizzeria::order_actor::{self, OrderContext, OrderError, OrderPhase};
use pizzeria::services::{OrderReceipt, OrderSubmissionService, SubmissionError};
use session_actor::ActorClient;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Order service that answers from a script and remembers what it was sent.
struct ScriptedOrderService {
    replies: Mutex<VecDeque<Result<(), SubmissionError>>>,
    received: Mutex<Vec<(OrderConfiguration, Price)>>,
}

impl ScriptedOrderService {
    fn new(replies: impl IntoIterator<Item = Result<(), SubmissionError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<(OrderConfiguration, Price)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderSubmissionService for ScriptedOrderService {
    async fn submit(
        &self,
        configuration: OrderConfiguration,
        total: Price,
    ) -> Result<OrderReceipt, SubmissionError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.received.lock().unwrap().push((configuration, total));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SubmissionError::Rejected("script exhausted".to_string())));
        reply.map(|()| OrderReceipt {
            order_id: "#TEST".to_string(),
            total,
        })
    }
}

fn start(service: Arc<ScriptedOrderService>) -> (pizzeria::clients::OrderClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = order_actor::new(8);
    let handle = tokio::spawn(actor.run(OrderContext {
        catalog: Arc::new(PriceCatalog::builtin()),
        service,
    }));
    (client, handle)
}

/// Real Order actor with a scripted collaborator.
///
/// A failed submission returns the form to editing with the configuration
/// intact; the retry then succeeds.
#[tokio::test(start_paused = true)]
async fn test_failed_submission_is_retryable() {
    let service = ScriptedOrderService::new([
        Err(SubmissionError::Unavailable("kitchen offline".to_string())),
        Ok(()),
    ]);
    let (orders, handle) = start(service.clone());

    let id = orders.open().await.unwrap();
    orders.set_crust(id, "Wheat Thin Crust").await.unwrap();
    orders.toggle_topping(id, "Onion").await.unwrap();
    orders.submit(id).await.unwrap();

    let failed = orders.settled(id).await.unwrap();
    assert_eq!(failed.phase(), &OrderPhase::Editing);
    assert_eq!(
        failed.last_error(),
        Some("Service unavailable: kitchen offline")
    );
    assert_eq!(failed.configuration().crust(), "Wheat Thin Crust");
    assert!(failed.configuration().has_topping("Onion"));
    assert!(failed.can_submit());

    // Editing is possible again before retrying.
    orders.adjust_side(id, "Coke (500ml)", 1).await.unwrap();
    assert_eq!(orders.submit(id).await.unwrap(), 499 + 50 + 30 + 60);
    assert_eq!(orders.get(id).await.unwrap().last_error(), None);

    let placed = orders.settled(id).await.unwrap();
    assert_eq!(
        placed.receipt(),
        Some(&OrderReceipt {
            order_id: "#TEST".to_string(),
            total: 639
        })
    );

    let received = service.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].1, 579);
    assert_eq!(received[1].0.side_quantity("Coke (500ml)"), 1);

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_closing_mid_submission_discards_result() {
    let service = ScriptedOrderService::new([Ok(())]);
    let (orders, handle) = start(service.clone());

    let id = orders.open().await.unwrap();
    orders.submit(id).await.unwrap();
    orders.close(id).await.unwrap();

    // The call is not cancelled; its answer just has nowhere to go.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(service.received().len(), 1);
    assert_eq!(
        orders.submit(id).await,
        Err(OrderError::NotFound(id.to_string()))
    );

    drop(orders);
    handle.await.unwrap();
}
