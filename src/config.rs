//! Static device configuration

use reflow_shared::thermal;
use std::time::Duration;

/// Configuration for the oven device
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Address the control server listens on
    pub listen_addr: String,
    /// Period of one simulation tick
    pub tick_interval: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            tick_interval: Duration::from_millis(thermal::TICK_INTERVAL_MS),
        }
    }
}
