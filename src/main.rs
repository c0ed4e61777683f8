//! # Pizzeria demo
//!
//! Walks one customer through both forms against the simulated services:
//!
//! 1. Configure a pizza, submit it and wait for the receipt.
//! 2. Submit an empty registration, then a valid one, and watch the banner.
//!
//! Pass a settings file as the first argument to override the defaults.

use anyhow::Context;
use pizzeria::config::load_settings;
use pizzeria::lifecycle::Pizzeria;
use pizzeria::model::Field;
use pizzeria::registration_actor::Submission;
use session_actor::tracing::setup_tracing;
use session_actor::ActorClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = load_settings(path.as_deref()).context("Failed to load settings")?;
    info!(buffer_size = settings.buffer_size, "Starting pizzeria");

    let system = Pizzeria::new(&settings);

    async {
        let orders = &system.order_client;
        let id = orders.open().await?;
        orders.set_size(id, "Large").await?;
        orders.set_crust(id, "Cheese Burst").await?;
        orders.toggle_topping(id, "Paneer").await?;
        orders.toggle_topping(id, "Mushroom").await?;
        orders.adjust_side(id, "Garlic Bread", 1).await?;
        let edit = orders.set_quantity(id, 2).await?;
        info!(total = edit.total, "Order configured");

        for line in orders.get(id).await?.summary().lines {
            info!(item = %line.label, amount = line.amount, "Summary");
        }

        orders.submit(id).await?;
        let session = orders.settled(id).await?;
        match session.receipt() {
            Some(receipt) => info!(order_id = %receipt.order_id, total = receipt.total, "Order placed"),
            None => warn!(error = ?session.last_error(), "Order was not placed"),
        }
        orders.close(id).await?;
        anyhow::Ok(())
    }
    .instrument(tracing::info_span!("order_form"))
    .await?;

    async {
        let registrations = &system.registration_client;
        let id = registrations.open().await?;

        if let Submission::Invalid(errors) = registrations.submit(id).await? {
            for (field, error) in &errors {
                info!(%field, %error, "Rejected");
            }
        }

        registrations.set_text(id, Field::Name, "Asha Rao").await?;
        registrations.set_text(id, Field::Email, "asha@example.com").await?;
        registrations.set_text(id, Field::Phone, "9876543210").await?;
        registrations.set_text(id, Field::Password, "Margherita1").await?;
        registrations.set_text(id, Field::ConfirmPassword, "Margherita1").await?;
        registrations.set_text(id, Field::Gender, "Female").await?;
        let valid = registrations.set_terms(id, true).await?;
        info!(valid, "Registration filled in");

        registrations.submit(id).await?;
        tokio::time::sleep(settings.registration.submit_delay() + Duration::from_millis(100)).await;
        let session = registrations.get(id).await?;
        info!(banner = ?session.banner(), last_error = ?session.last_error(), "Registration finished");

        // Waits out the banner timer as well.
        let session = registrations.settled(id).await?;
        info!(banner_visible = session.banner().is_some(), "Banner hidden");
        registrations.close(id).await?;
        anyhow::Ok(())
    }
    .instrument(tracing::info_span!("registration_form"))
    .await?;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
