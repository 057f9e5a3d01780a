mod command;
mod config;
mod server;
mod sim;

use command::CommandExecutor;
use config::DeviceConfig;
use reflow_shared::Oven;
use server::OvenServer;
use sim::{SimEvent, Simulator};
use std::sync::Arc;
use tokio::sync::RwLock;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = DeviceConfig::default();

    info!("Reflow oven device starting");
    info!("  listen address: {}", config.listen_addr);
    info!("  tick interval: {:?}", config.tick_interval);

    // The one oven, shared between the tick task and the command sessions
    let oven = Arc::new(RwLock::new(Oven::new()));

    let simulator = Simulator::new(oven.clone(), config.tick_interval);
    let (mut sim_events, _sim_handle) = simulator.start_ticking();
    info!("Simulation tick task started");

    let executor = Arc::new(CommandExecutor::new(oven.clone()));
    let server = OvenServer::new(config.listen_addr.clone(), executor);

    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Control server failed: {}", e);
        }
    });

    // Report phase transitions as the simulation advances
    loop {
        match sim_events.recv().await {
            Some(SimEvent::PhaseChanged { from, to }) => {
                info!("Phase transition: {} -> {}", from, to);
            }
            None => {
                warn!("Simulator event channel closed");
                break;
            }
        }
    }
}
