//! Reflow Oven Shared Types
//!
//! This crate provides the pieces both ends of the control link agree on:
//! the oven state machine, the line-based command grammar, and the
//! newline-delimited codec used over TCP.

pub mod codec;
pub mod command;
pub mod state;

// Re-export commonly used types at crate root
pub use command::{Command, ProtocolError, StatusReport};
pub use state::{Oven, Phase, PhaseChange, ProcessProfile};

/// Thermal parameters for the simulated oven
pub mod thermal {
    /// Temperature gained per tick while ramping toward a hotter goal (deg C)
    pub const HEAT_RATE_C: f64 = 2.5;

    /// Temperature lost per tick while cooling back to ambient (deg C)
    pub const COOL_RATE_C: f64 = 2.0;

    /// Room temperature the oven starts at and cools back to (deg C)
    pub const AMBIENT_TEMP_C: f64 = 25.0;

    /// Corrective adjustment applied while holding a soak (deg C)
    pub const SOAK_NUDGE_C: f64 = 0.05;

    /// Fixed simulation step - one simulated second per tick
    pub const TICK_INTERVAL_MS: u64 = 1000;
}
