use crate::clients::{OrderClient, RegistrationClient};
use crate::config::Settings;
use crate::order_actor::OrderContext;
use crate::registration_actor::RegistrationContext;
use crate::services::{
    SharedOrderService, SharedRegistrationService, SimulatedOrderService,
    SimulatedRegistrationService,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Raised when an actor task did not finish cleanly.
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] JoinError),
}

/// The running pizzeria: one actor for order forms, one for registrations.
///
/// # Example
///
/// ```rust
/// use pizzeria::config::Settings;
/// use pizzeria::lifecycle::Pizzeria;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = Pizzeria::new(&Settings::default());
///
///     let order = system.order_client.open().await?;
///     system.order_client.toggle_topping(order, "Paneer").await?;
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Pizzeria {
    /// Client for the Order actor.
    pub order_client: OrderClient,

    /// Client for the Registration actor.
    pub registration_client: RegistrationClient,

    /// Task handles for both actors (used for graceful shutdown).
    handles: Vec<JoinHandle<()>>,
}

impl Pizzeria {
    /// Starts both actors with the simulated collaborators.
    pub fn new(settings: &Settings) -> Self {
        Self::with_services(
            settings,
            Arc::new(SimulatedOrderService::new(settings.order.submit_delay())),
            Arc::new(SimulatedRegistrationService::new(
                settings.registration.submit_delay(),
            )),
        )
    }

    /// Starts both actors with the given collaborators.
    pub fn with_services(
        settings: &Settings,
        order_service: SharedOrderService,
        registration_service: SharedRegistrationService,
    ) -> Self {
        // 1. Create actors
        let (order_actor, order_client) = crate::order_actor::new(settings.buffer_size);
        let (registration_actor, registration_client) =
            crate::registration_actor::new(settings.buffer_size);

        // 2. Start actors with injected context
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            catalog: Arc::new(settings.catalog.clone()),
            service: order_service,
        }));
        let registration_handle = tokio::spawn(registration_actor.run(RegistrationContext {
            service: registration_service,
            banner_duration: settings.registration.banner_duration(),
        }));

        Self {
            order_client,
            registration_client,
            handles: vec![order_handle, registration_handle],
        }
    }

    /// Drops the clients and waits for both actors to stop.
    ///
    /// Clones of the clients handed out earlier keep their actor alive; drop
    /// them first.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.registration_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
