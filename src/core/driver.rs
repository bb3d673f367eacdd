use super::controller::{Button, Controller};
use crate::free_camera::FreeCamera;

/// Units per second
pub const CAMERA_SPEED: f32 = 6.0;
/// Degrees per second
pub const CAMERA_ROTATION_SPEED: f32 = 90.0;

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl MovementState {
    pub fn from_controller<C: Controller + ?Sized>(controller: &C) -> Self {
        Self {
            forward: controller.is_down(Button::KeyW),
            backward: controller.is_down(Button::KeyS),
            left: controller.is_down(Button::KeyA),
            right: controller.is_down(Button::KeyD),
            up: controller.is_down(Button::Space),
            down: controller.is_down(Button::Shift),
            rotate_left: controller.is_down(Button::KeyQ),
            rotate_right: controller.is_down(Button::KeyE),
        }
    }

    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// (forward, right, up), each -1, 0 or 1
    pub const fn velocity(&self) -> (f32, f32, f32) {
        (
            Self::to_direction(self.forward, self.backward),
            Self::to_direction(self.right, self.left),
            Self::to_direction(self.up, self.down),
        )
    }

    /// Positive turns left (counter-clockwise seen from above)
    pub const fn rotation_velocity(&self) -> f32 {
        Self::to_direction(self.rotate_left, self.rotate_right)
    }
}

/// Keyboard flight for a [`FreeCamera`]: WASD moves, Space/Shift rise and
/// sink, Q/E turn.
#[derive(Debug, Clone, Copy)]
pub struct FreeCameraDriver {
    pub speed: f32,
    pub rotation_speed: f32,
}

impl FreeCameraDriver {
    pub fn new(speed: f32, rotation_speed: f32) -> Self {
        Self {
            speed,
            rotation_speed,
        }
    }

    /// Advances the camera by `dt` seconds of whatever keys are held.
    pub fn update<C: Controller + ?Sized>(&self, camera: &mut FreeCamera, controller: &C, dt: f32) {
        let movement = MovementState::from_controller(controller);
        let (fwd, right, up) = movement.velocity();
        let step = self.speed * dt;

        if fwd != 0.0 {
            // The camera looks down -z.
            camera.move_z(-fwd * step);
        }
        if right != 0.0 {
            camera.move_x(right * step);
        }
        if up != 0.0 {
            camera.move_y(up * step);
        }

        let turn = movement.rotation_velocity();
        if turn != 0.0 {
            camera.rotate_y(turn * self.rotation_speed * dt);
        }
    }
}

impl Default for FreeCameraDriver {
    fn default() -> Self {
        Self::new(CAMERA_SPEED, CAMERA_ROTATION_SPEED)
    }
}
