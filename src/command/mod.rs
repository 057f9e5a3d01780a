//! Command execution for the control protocol
//!
//! This module handles:
//! - Parsing incoming lines into commands
//! - Applying command effects to the shared oven state
//! - Producing the status reply, when one is owed

mod executor;
mod handlers;

pub use executor::CommandExecutor;
