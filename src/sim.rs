//! Simulation tick task
//!
//! Runs a background task that advances the shared oven once per fixed
//! interval and reports phase transitions as they fire.

use reflow_shared::{Oven, Phase};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::time::{interval, Duration};
use tracing::debug;

/// Events emitted as the simulation advances
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// The oven moved to a new phase
    PhaseChanged { from: Phase, to: Phase },
}

/// Drives the shared oven state on a fixed tick
pub struct Simulator {
    oven: Arc<RwLock<Oven>>,
    tick_interval: Duration,
}

impl Simulator {
    /// Create a new simulator over the shared oven
    pub fn new(oven: Arc<RwLock<Oven>>, tick_interval: Duration) -> Self {
        Self {
            oven,
            tick_interval,
        }
    }

    /// Start the background tick task
    ///
    /// Returns the event receiver and a handle keeping the task alive.
    pub fn start_ticking(self) -> (mpsc::UnboundedReceiver<SimEvent>, SimulatorHandle) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut ticker = interval(self.tick_interval);
            loop {
                ticker.tick().await;
                tick_once(&self.oven, &event_tx).await;
            }
        });

        (event_rx, SimulatorHandle { _task: task })
    }
}

/// Apply one whole tick under the write lock and report any transition
///
/// The lock is held for the full transition so a concurrent status query
/// never observes a half-applied phase change.
pub(crate) async fn tick_once(
    oven: &Arc<RwLock<Oven>>,
    events: &mpsc::UnboundedSender<SimEvent>,
) {
    let change = {
        let mut oven = oven.write().await;
        oven.tick()
    };

    if let Some(change) = change {
        debug!("Tick transition: {} -> {}", change.from, change.to);
        let _ = events.send(SimEvent::PhaseChanged {
            from: change.from,
            to: change.to,
        });
    }
}

/// Handle keeping the tick task alive
pub struct SimulatorHandle {
    _task: tokio::task::JoinHandle<()>,
}
