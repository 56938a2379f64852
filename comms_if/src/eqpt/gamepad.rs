//! # Gamepad Equipment Data
//!
//! Samples taken from the operator's gamepad once per cycle. A sample carries no state beyond the
//! instant it was taken.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of digital buttons on the gamepad.
pub const NUM_BUTTONS: usize = 10;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all digital buttons on the gamepad.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum ButtonId {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    LeftStickButton,
    RightStickButton,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The "pressed now" state of every button.
///
/// Backed by a fixed array indexed by [`ButtonId::index`], so every button always has a value.
/// Serialises as the list of pressed buttons.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(from = "Vec<ButtonId>", into = "Vec<ButtonId>")]
pub struct ButtonState {
    pressed: [bool; NUM_BUTTONS],
}

/// Raw analog axis values, each nominally in [-1.0, 1.0].
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct AxisState {
    pub left_x: f64,
    pub left_y: f64,
    pub right_x: f64,
    pub right_y: f64,
    pub left_trigger: f64,
    pub right_trigger: f64,
}

/// A complete sample of the gamepad.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct GamepadSample {
    pub buttons: ButtonState,
    pub axes: AxisState,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ButtonId {
    /// All buttons in index order.
    pub const ALL: [ButtonId; NUM_BUTTONS] = [
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
        ButtonId::LeftBumper,
        ButtonId::RightBumper,
        ButtonId::Back,
        ButtonId::Start,
        ButtonId::LeftStickButton,
        ButtonId::RightStickButton,
    ];

    /// Dense index of this button, in `0..NUM_BUTTONS`.
    pub fn index(self) -> usize {
        match self {
            ButtonId::A => 0,
            ButtonId::B => 1,
            ButtonId::X => 2,
            ButtonId::Y => 3,
            ButtonId::LeftBumper => 4,
            ButtonId::RightBumper => 5,
            ButtonId::Back => 6,
            ButtonId::Start => 7,
            ButtonId::LeftStickButton => 8,
            ButtonId::RightStickButton => 9,
        }
    }
}

impl ButtonState {
    /// Build a state in which only the given buttons are pressed.
    pub fn with_pressed(buttons: &[ButtonId]) -> Self {
        let mut state = Self::default();
        for b in buttons {
            state.set(*b, true);
        }
        state
    }

    /// Whether the given button is pressed.
    pub fn is_pressed(&self, id: ButtonId) -> bool {
        self.pressed[id.index()]
    }

    /// Set the pressed state of a button.
    pub fn set(&mut self, id: ButtonId, pressed: bool) {
        self.pressed[id.index()] = pressed;
    }

    /// Iterate over the pressed buttons.
    pub fn iter_pressed(&self) -> impl Iterator<Item = ButtonId> + '_ {
        (0..NUM_BUTTONS)
            .filter(move |i| self.pressed[*i])
            .map(|i| ButtonId::ALL[i])
    }
}

impl From<Vec<ButtonId>> for ButtonState {
    fn from(buttons: Vec<ButtonId>) -> Self {
        Self::with_pressed(&buttons)
    }
}

impl From<ButtonState> for Vec<ButtonId> {
    fn from(state: ButtonState) -> Self {
        state.iter_pressed().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_button_index_is_dense() {
        for (i, b) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
    }

    #[test]
    fn test_iter_pressed() {
        let state = ButtonState::with_pressed(&[ButtonId::Start, ButtonId::A, ButtonId::Y]);

        // Always in index order, whatever order the buttons were given in
        let pressed: Vec<ButtonId> = state.iter_pressed().collect();
        assert_eq!(pressed, vec![ButtonId::A, ButtonId::Y, ButtonId::Start]);
        assert_eq!(ButtonState::default().iter_pressed().count(), 0);
    }

    #[test]
    fn test_sample_from_json() {
        let sample: GamepadSample = serde_json::from_str(
            r#"{"buttons": ["Start", "LeftBumper"], "axes": {"left_y": -0.5}}"#,
        )
        .unwrap();

        assert!(sample.buttons.is_pressed(ButtonId::Start));
        assert!(sample.buttons.is_pressed(ButtonId::LeftBumper));
        assert!(!sample.buttons.is_pressed(ButtonId::A));
        assert_eq!(sample.axes.left_y, -0.5);
        assert_eq!(sample.axes.right_x, 0.0);

        let pressed: Vec<ButtonId> = sample.buttons.into();
        assert_eq!(pressed, vec![ButtonId::LeftBumper, ButtonId::Start]);
    }
}
