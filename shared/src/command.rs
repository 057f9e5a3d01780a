//! Command grammar and status replies
//!
//! One trimmed line in, zero or one status line out. The grammar is
//! case-sensitive and semicolon-delimited:
//!
//! ```text
//! STATUS?
//! STOP
//! START;<soak_temp>;<soak_time>;<reflow_peak>;<reflow_time>
//! STATUS;<current_temp>;<goal_temp>;<PHASE>;<countdown>     (reply)
//! ```

use crate::state::{Oven, Phase, ProcessProfile};
use thiserror::Error;

/// Errors produced while parsing a command or status line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("empty line")]
    Empty,

    #[error("unrecognized command: '{0}'")]
    UnknownCommand(String),

    #[error("START expects 4 fields, got {got}")]
    FieldCount { got: usize },

    #[error("field {index} is malformed: '{value}'")]
    BadField { index: usize, value: String },
}

/// A parsed protocol command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `STATUS?` - report state, no mutation
    Status,
    /// `STOP` - abort the run and cool back to ambient
    Stop,
    /// `START;...` - load a profile and begin heating
    Start(ProcessProfile),
}

/// Parse one line of input, already stripped of its terminator
///
/// Matching is strict: no case folding, no whitespace tolerance, and a
/// START with anything but 4 well-formed fields is rejected entirely so a
/// partial profile is never applied.
pub fn parse(line: &str) -> Result<Command, ProtocolError> {
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }

    match line {
        "STATUS?" => return Ok(Command::Status),
        "STOP" => return Ok(Command::Stop),
        _ => {}
    }

    if let Some(fields) = line.strip_prefix("START;") {
        return parse_profile(fields).map(Command::Start);
    }

    Err(ProtocolError::UnknownCommand(line.to_string()))
}

fn parse_profile(fields: &str) -> Result<ProcessProfile, ProtocolError> {
    let parts: Vec<&str> = fields.split(';').collect();
    if parts.len() != 4 {
        return Err(ProtocolError::FieldCount { got: parts.len() });
    }

    Ok(ProcessProfile {
        soak_temp: parse_field(parts[0], 1)?,
        soak_time: parse_field(parts[1], 2)?,
        reflow_peak: parse_field(parts[2], 3)?,
        reflow_time: parse_field(parts[3], 4)?,
    })
}

fn parse_field<T: std::str::FromStr>(value: &str, index: usize) -> Result<T, ProtocolError> {
    value.parse().map_err(|_| ProtocolError::BadField {
        index,
        value: value.to_string(),
    })
}

/// Format the status line for the current oven state, newline-terminated
pub fn status_reply(oven: &Oven) -> String {
    format!(
        "STATUS;{:.1};{:.1};{};{}\n",
        oven.current_temp, oven.goal_temp, oven.phase, oven.countdown
    )
}

/// A decoded status line, as consumed by a driving controller
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub current_temp: f64,
    pub goal_temp: f64,
    pub phase: Phase,
    pub countdown: u32,
}

impl StatusReport {
    /// Decode a `STATUS;...` line, stripped of its terminator
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() != 5 || parts[0] != "STATUS" {
            return Err(ProtocolError::UnknownCommand(line.to_string()));
        }

        let phase = Phase::from_token(parts[3]).ok_or_else(|| ProtocolError::BadField {
            index: 3,
            value: parts[3].to_string(),
        })?;

        Ok(Self {
            current_temp: parse_field(parts[1], 1)?,
            goal_temp: parse_field(parts[2], 2)?,
            phase,
            countdown: parse_field(parts[4], 4)?,
        })
    }
}
