//! Command executor - parses lines and applies them to the oven

use super::handlers;
use reflow_shared::command::{self, Command, ProtocolError};
use reflow_shared::Oven;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Applies protocol commands to the shared oven state
pub struct CommandExecutor {
    oven: Arc<RwLock<Oven>>,
}

impl CommandExecutor {
    /// Create a new executor over the shared oven
    pub fn new(oven: Arc<RwLock<Oven>>) -> Self {
        Self { oven }
    }

    /// Execute one line of input
    ///
    /// Returns the status reply for recognized commands and `None` for
    /// malformed or unknown input, which is diagnostic-only: the peer
    /// observes nothing, and the oven is untouched.
    pub async fn execute(&self, line: &str) -> Option<String> {
        let cmd = match command::parse(line) {
            Ok(cmd) => cmd,
            Err(ProtocolError::Empty) => return None,
            Err(e @ ProtocolError::UnknownCommand(_)) => {
                warn!("Ignoring input: {}", e);
                return None;
            }
            Err(e) => {
                warn!("START parsing failed: {}", e);
                return None;
            }
        };

        // A command's whole effect and its reply snapshot happen under one
        // guard, so a concurrent tick is never observed half-applied.
        let reply = match cmd {
            Command::Status => {
                debug!("STATUS? request received");
                let oven = self.oven.read().await;
                command::status_reply(&oven)
            }
            Command::Stop => {
                let mut oven = self.oven.write().await;
                handlers::handle_stop(&mut oven);
                command::status_reply(&oven)
            }
            Command::Start(profile) => {
                let mut oven = self.oven.write().await;
                handlers::handle_start(&mut oven, profile);
                command::status_reply(&oven)
            }
        };

        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_shared::Phase;

    fn executor() -> (CommandExecutor, Arc<RwLock<Oven>>) {
        let oven = Arc::new(RwLock::new(Oven::new()));
        (CommandExecutor::new(oven.clone()), oven)
    }

    #[tokio::test]
    async fn test_status_on_fresh_oven() {
        let (exec, _) = executor();
        let reply = exec.execute("STATUS?").await;
        assert_eq!(reply.as_deref(), Some("STATUS;25.0;0.0;IDLE;0\n"));
    }

    #[tokio::test]
    async fn test_start_applies_profile_and_replies() {
        let (exec, oven) = executor();
        let reply = exec.execute("START;180.5;60;220.0;30").await.unwrap();
        assert_eq!(reply, "STATUS;25.0;180.5;HEATING;0\n");

        let oven = oven.read().await;
        assert_eq!(oven.phase, Phase::Heating);
        assert_eq!(oven.profile.soak_temp, 180.5);
        assert_eq!(oven.profile.soak_time, 60);
        assert_eq!(oven.profile.reflow_peak, 220.0);
        assert_eq!(oven.profile.reflow_time, 30);
    }

    #[tokio::test]
    async fn test_malformed_start_changes_nothing() {
        let (exec, oven) = executor();
        assert!(exec.execute("START;abc;60;220.0;30").await.is_none());

        let oven = oven.read().await;
        assert_eq!(oven.phase, Phase::Idle);
        assert_eq!(oven.goal_temp, 0.0);
        assert_eq!(oven.profile.soak_time, 0);
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let (exec, oven) = executor();
        assert!(exec.execute("REBOOT").await.is_none());
        assert!(exec.execute("").await.is_none());
        assert_eq!(oven.read().await.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn test_stop_aborts_active_run() {
        let (exec, oven) = executor();
        let _ = exec.execute("START;150.0;5;200.0;10").await;

        let reply = exec.execute("STOP").await.unwrap();
        assert_eq!(reply, "STATUS;25.0;25.0;COOLING;0\n");
        assert_eq!(oven.read().await.phase, Phase::Cooling);
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let (exec, _) = executor();
        let reply = exec.execute("STOP").await.unwrap();
        assert_eq!(reply, "STATUS;25.0;0.0;IDLE;0\n");
    }
}
