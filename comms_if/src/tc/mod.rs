//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface. Telecommands change the operating mode of the control loop or
//! deliver a new gamepad sample to it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// Internal
use crate::eqpt::gamepad::GamepadSample;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tc {
    /// Activate teleoperation, the control loop enters the running state.
    Enable,

    /// Deactivate teleoperation, the control loop enters the stopped state.
    Disable,

    /// A new sample of the operator's gamepad.
    Gamepad(GamepadSample),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(String),

    #[error("TC of type {0} has an invalid payload: {1}")]
    InvalidPayload(String, serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet.
    ///
    /// The packet is an object with a `"type"` string and, for those types
    /// which carry data, a `"payload"`:
    ///
    /// ```json
    /// {"type": "GAMEPAD", "payload": {"buttons": ["A"], "axes": {"left_y": -1.0}}}
    /// ```
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)?;

        // Get the type of the TC
        let tc_type = match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(TcParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        };

        match tc_type {
            "ENABLE" => Ok(Tc::Enable),
            "DISABLE" => Ok(Tc::Disable),
            "GAMEPAD" => {
                if val["payload"].is_null() {
                    return Err(TcParseError::MissingPayload(tc_type.to_string()));
                }

                let sample: GamepadSample = serde_json::from_value(val["payload"].clone())
                    .map_err(|e| TcParseError::InvalidPayload(tc_type.to_string(), e))?;

                Ok(Tc::Gamepad(sample))
            }
            t => Err(TcParseError::InvalidType(format!(
                "{} is not a recognised TC type",
                t
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eqpt::gamepad::ButtonId;

    #[test]
    fn test_parse_mode_tcs() {
        assert_eq!(Tc::from_json(r#"{"type": "ENABLE"}"#).unwrap(), Tc::Enable);
        assert_eq!(Tc::from_json(r#"{"type": "DISABLE"}"#).unwrap(), Tc::Disable);
    }

    #[test]
    fn test_parse_gamepad_tc() {
        let tc = Tc::from_json(
            r#"{"type": "GAMEPAD", "payload": {"buttons": ["A"], "axes": {"right_x": 0.25}}}"#,
        )
        .unwrap();

        match tc {
            Tc::Gamepad(s) => {
                assert!(s.buttons.is_pressed(ButtonId::A));
                assert_eq!(s.axes.right_x, 0.25);
            }
            t => panic!("Expected a gamepad TC, got {:?}", t),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Tc::from_json("not json"),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "WARP"}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "GAMEPAD"}"#),
            Err(TcParseError::MissingPayload(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "GAMEPAD", "payload": {"buttons": ["Z"]}}"#),
            Err(TcParseError::InvalidPayload(_, _))
        ));
    }
}
