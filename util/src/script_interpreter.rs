//! # Teleoperation script interpreter module
//!
//! This module provides an interpreter for teleoperation scripts, allowing
//! telecommands (mode changes and gamepad samples) to be replayed from a file.
//!
//! A script is a sequence of entries of the form `<time_s>: <tc json>;`, for
//! example:
//!
//! ```text
//! 0.0: {"type": "ENABLE"};
//! 0.5: {"type": "GAMEPAD", "payload": {"buttons": ["Start"]}};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
pub struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending_tcs` to
/// acquire a list of telecommands that need executing.
pub struct ScriptInterpreter {
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

#[derive(Debug, PartialEq)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path.display().to_string()));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        Ok(ScriptInterpreter {
            cmds: parse_script(&script)?
        })
    }

    /// Create a new interpreter directly from the text of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {
        Ok(ScriptInterpreter {
            cmds: parse_script(script)?
        })
    }

    /// Return the TCs which are pending at the current session time.
    pub fn get_pending_tcs(&mut self) -> PendingTcs {
        self.get_pending_tcs_at(get_elapsed_seconds())
    }

    /// Return a vector of TCs due before `current_time_s`, or `None` if no TCs
    /// need executing yet.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop items from the queue while the head's exec time is lower than
        // the current time.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s >= current_time_s {
                break;
            }

            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        // If the vector is longer than 0 return Some, otherwise None
        if !tc_vec.is_empty() {
            PendingTcs::Some(tc_vec)
        }
        else {
            PendingTcs::None
        }
    }

    /// Get the number of TCs in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse the script text into a queue of timestamped commands.
fn parse_script(script: &str) -> Result<VecDeque<Command>, ScriptError> {

    // Empty queue of commands
    let mut tc_queue: VecDeque<Command> = VecDeque::new();

    // Go through the script executing __the magic regex__.
    let re = match RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
        .multi_line(true)
        .build()
    {
        Ok(r) => r,
        Err(e) => return Err(ScriptError::InvalidTimestamp(e.to_string()))
    };

    for cap in re.captures_iter(script) {
        // Both groups are non-optional in the regex so will always be present
        let (time_str, tc_str) = match (cap.get(1), cap.get(3)) {
            (Some(t), Some(c)) => (t.as_str(), c.as_str()),
            _ => continue
        };

        // Parse the exec time
        let exec_time_s: f64 = time_str
            .parse()
            .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

        // Parse the TC from the payload. The scripts contain JSON only.
        let tc = Tc::from_json(tc_str)
            .map_err(|e| ScriptError::InvalidTc(exec_time_s, e))?;

        tc_queue.push_back(Command {
            exec_time_s,
            tc
        });
    }

    if tc_queue.is_empty() {
        return Err(ScriptError::ScriptEmpty)
    }

    Ok(tc_queue)
}
