use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::controller::{Button, InputEvent};
use crate::orbit::{OrbitCamera, RotationSpeed};
use crate::traits::RenderContext;

/// User-tunable orbit interaction settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub rotation_speed: RotationSpeed,
    /// Zoom factor per wheel notch
    pub zoom_step: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotation_speed: RotationSpeed::Viewport,
            zoom_step: 1.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Rotating,
    Panning,
}

/// Drag state machine in front of an [`OrbitCamera`].
///
/// The camera only knows anchors and increments; this tracks which button
/// started the drag so motion goes to the right operation.
#[derive(Debug, Clone)]
pub struct OrbitGesture {
    state: GestureState,
    settings: OrbitSettings,
    cursor: (f32, f32),
}

impl OrbitGesture {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            state: GestureState::Idle,
            settings,
            cursor: (0.0, 0.0),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn settings(&self) -> OrbitSettings {
        self.settings
    }

    /// Feeds one event to the camera. Numerical failures are logged and the
    /// camera keeps its last valid state.
    pub fn handle(&mut self, event: &InputEvent, camera: &mut OrbitCamera, ctx: &dyn RenderContext) {
        camera.set_rotation_speed(self.settings.rotation_speed);
        let (x, y) = self.cursor;

        match *event {
            InputEvent::ButtonDown { button } if self.state == GestureState::Idle => match button {
                Button::MouseLeft => {
                    camera.begin_rotate(x, y);
                    self.state = GestureState::Rotating;
                    debug!("gesture: rotate from ({x}, {y})");
                }
                Button::MouseRight | Button::MouseMiddle => match camera.begin_pan(ctx, x, y) {
                    Ok(()) => {
                        self.state = GestureState::Panning;
                        debug!("gesture: pan from ({x}, {y})");
                    }
                    Err(e) => warn!("cannot start pan: {e}"),
                },
                _ => {}
            },
            InputEvent::ButtonUp { button } => {
                let ends = match self.state {
                    GestureState::Rotating => button == Button::MouseLeft,
                    GestureState::Panning => {
                        matches!(button, Button::MouseRight | Button::MouseMiddle)
                    }
                    GestureState::Idle => false,
                };
                if ends {
                    debug!("gesture: {:?} finished", self.state);
                    self.state = GestureState::Idle;
                }
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor = (x, y);
                match self.state {
                    GestureState::Rotating => camera.rotate(x, y),
                    GestureState::Panning => {
                        if let Err(e) = camera.pan(ctx, x, y) {
                            warn!("pan skipped: {e}");
                        }
                    }
                    GestureState::Idle => {}
                }
            }
            InputEvent::Wheel { delta } => {
                let factor = self.settings.zoom_step.powf(delta.abs());
                if delta > 0.0 {
                    camera.zoom_in(factor);
                } else if delta < 0.0 {
                    camera.zoom_out(factor);
                }
            }
            _ => {}
        }
    }
}

impl Default for OrbitGesture {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}
