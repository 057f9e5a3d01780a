//! Handlers for the individual commands

use reflow_shared::{Oven, ProcessProfile};
use tracing::{info, warn};

/// Handle START: load the profile wholesale and begin heating toward soak
pub fn handle_start(oven: &mut Oven, profile: ProcessProfile) {
    oven.start(profile);
    info!(
        "START: profile set, target {:.1} C, soak time {} s",
        oven.goal_temp, oven.profile.soak_time
    );
}

/// Handle STOP: abort an active run by cooling back to ambient
pub fn handle_stop(oven: &mut Oven) {
    if oven.stop() {
        warn!("STOP received, initiating manual cooling");
    } else {
        warn!("STOP ignored, oven already {}", oven.phase);
    }
}
