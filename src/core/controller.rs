use serde::{Deserialize, Serialize};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

impl Button {
    pub fn is_mouse(self) -> bool {
        matches!(self, Button::MouseLeft | Button::MouseRight | Button::MouseMiddle)
    }
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

/// Raw input, as delivered by a windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    ButtonDown { button: Button },
    ButtonUp { button: Button },
    /// Cursor position in window pixels, origin top-left
    CursorMoved { x: f32, y: f32 },
    /// Scroll wheel notches, positive away from the user
    Wheel { delta: f32 },
    /// Time elapsed since the previous tick, in seconds
    Tick { dt: f32 },
}

/// Pressed-button and cursor bookkeeping
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Buttons in the order they were pressed
    pressed: Vec<Button>,
    /// Current cursor position (relative to window)
    cursor: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates state from an event. Returns true if the event changed which
    /// buttons are down.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::ButtonDown { button } => {
                if self.pressed.contains(&button) {
                    false
                } else {
                    self.pressed.push(button);
                    true
                }
            }
            InputEvent::ButtonUp { button } => {
                let before = self.pressed.len();
                self.pressed.retain(|&b| b != button);
                self.pressed.len() != before
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Some((x, y));
                false
            }
            InputEvent::Wheel { .. } | InputEvent::Tick { .. } => false,
        }
    }

    /// Get current cursor position (if known)
    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }
}

impl Controller for InputState {
    fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed
    }
}
