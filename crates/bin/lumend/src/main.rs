//! # lumend — lumen daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`lumen.toml` + env vars)
//! - Initialize tracing
//! - Construct the in-memory port implementations (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use lumen_adapter_http_axum::state::AppState;
use lumen_adapter_memory::{
    FixedMediaPicker, MemoryBlobStore, MemoryDeviceRepository, MemoryLogStore,
    MemoryProfileRepository, StaticIdentity,
};
use lumen_app::feed::InProcessFeed;
use lumen_app::services::account_service::AccountService;
use lumen_app::services::device_service::DeviceService;
use lumen_app::services::report_service::ReportService;
use lumen_domain::device::{Device, Mode};
use lumen_domain::schedule::{Schedule, TimeOfDay, Weekday};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Adapters
    let devices = MemoryDeviceRepository::new();
    if config.demo.seed_devices {
        seed_devices(&devices).await?;
    }
    let logs = MemoryLogStore::new();
    let feed = InProcessFeed::new(256);
    let identity = StaticIdentity::signed_in(
        config.session.uid.as_str(),
        config.session.email.as_str(),
    );

    // Services
    let device_service = DeviceService::new(devices, logs.clone(), feed);
    let account_service = AccountService::new(
        identity,
        MemoryProfileRepository::new(),
        MemoryBlobStore::new(),
        FixedMediaPicker::cancelled(),
    );
    let report_service = ReportService::new(logs);

    // HTTP
    let state = AppState::new(device_service, account_service, report_service);
    let app = lumen_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "lumend listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Seed a couple of demo devices so the API has something to serve.
async fn seed_devices(repo: &MemoryDeviceRepository) -> anyhow::Result<()> {
    let porch = Device::builder()
        .name("Porch Light")
        .mode(Mode::Automatic)
        .schedule(Schedule::new(
            TimeOfDay::new(18, 0)?,
            TimeOfDay::new(23, 0)?,
            Weekday::ALL,
        ))
        .build()?;
    let living_room = Device::builder().name("Living Room").build()?;

    tracing::info!(
        porch = %porch.id,
        living_room = %living_room.id,
        "seeded demo devices"
    );
    repo.insert(porch).await;
    repo.insert(living_room).await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
