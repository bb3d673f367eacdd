use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::math::axis_angle_degrees;
use crate::traits::CameraController;

/// How translation and yaw relate to the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Move and turn along the camera's own axes.
    Free,
    /// Walk on the ground: horizontal moves stay horizontal and yaw is about
    /// world up.
    #[default]
    Land,
}

/// First-person camera: an orthonormal basis plus a position.
///
/// `z` points backwards (away from the view direction), as in a GL eye space.
#[derive(Clone, Debug)]
pub struct FreeCamera {
    x: Vec3,
    y: Vec3,
    z: Vec3,
    t: Vec3,
    mode: CameraMode,
    changed: bool,
    view: Mat4,
}

impl FreeCamera {
    pub fn new(mode: CameraMode) -> Self {
        Self {
            x: Vec3::X,
            y: Vec3::Y,
            z: Vec3::Z,
            t: Vec3::ZERO,
            mode,
            changed: true,
            view: Mat4::IDENTITY,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    pub fn position(&self) -> Vec3 {
        self.t
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.t = position;
        self.changed = true;
    }

    /// The `(x, y, z)` basis vectors.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.x, self.y, self.z)
    }

    /// Replaces the basis, re-orthonormalized with `z` kept fixed.
    ///
    /// When `x` is parallel to `z` the frame is rebuilt from `y` instead. A
    /// zero `z`, or both `x` and `y` parallel to it, is rejected and the
    /// previous basis stays in place.
    pub fn set_rotation(&mut self, x: Vec3, y: Vec3, z: Vec3) -> Result<()> {
        let (x, y, z) = orthonormal_basis(x, z)
            .or_else(|| orthonormal_basis(y.cross(z), z))
            .ok_or(ViewError::DegenerateBasis)?;
        self.x = x;
        self.y = y;
        self.z = z;
        self.changed = true;
        Ok(())
    }

    /// Back to the origin, looking down `-z`.
    pub fn reset_transform(&mut self) {
        self.x = Vec3::X;
        self.y = Vec3::Y;
        self.z = Vec3::Z;
        self.t = Vec3::ZERO;
        self.view = Mat4::IDENTITY;
        self.changed = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.changed
    }

    pub fn move_x(&mut self, step: f32) {
        self.t += self.ground(self.x) * step;
        self.changed = true;
    }

    pub fn move_y(&mut self, step: f32) {
        self.t += self.y * step;
        self.changed = true;
    }

    pub fn move_z(&mut self, step: f32) {
        self.t += self.ground(self.z) * step;
        self.changed = true;
    }

    /// Pitch about the camera's own x axis.
    pub fn rotate_x(&mut self, angle_degrees: f32) {
        let q = axis_angle_degrees(self.x, angle_degrees);
        self.y = q * self.y;
        self.z = q * self.z;
        self.orthonormalize();
        self.changed = true;
    }

    /// Yaw about world up in land mode, about the camera's y axis otherwise.
    pub fn rotate_y(&mut self, angle_degrees: f32) {
        let axis = match self.mode {
            CameraMode::Land => Vec3::Y,
            CameraMode::Free => self.y,
        };
        let q = axis_angle_degrees(axis, angle_degrees);
        self.x = q * self.x;
        self.z = q * self.z;
        if self.mode == CameraMode::Land {
            self.y = q * self.y;
        }
        self.orthonormalize();
        self.changed = true;
    }

    /// Roll about the camera's own z axis.
    pub fn rotate_z(&mut self, angle_degrees: f32) {
        let q = axis_angle_degrees(self.z, angle_degrees);
        self.x = q * self.x;
        self.y = q * self.y;
        self.orthonormalize();
        self.changed = true;
    }

    /// World-to-camera transform: rows are the basis vectors, translation is
    /// `(-t.x, -t.y, -t.z)` projected onto them.
    pub fn view_matrix(&mut self) -> Mat4 {
        if !self.changed {
            return self.view;
        }

        self.orthonormalize();
        let (x, y, z, t) = (self.x, self.y, self.z, self.t);
        self.view = Mat4::from_cols(
            Vec4::new(x.x, y.x, z.x, 0.0),
            Vec4::new(x.y, y.y, z.y, 0.0),
            Vec4::new(x.z, y.z, z.z, 0.0),
            Vec4::new(-t.dot(x), -t.dot(y), -t.dot(z), 1.0),
        );
        self.changed = false;
        self.view
    }

    /// Direction the camera looks along.
    pub fn forward(&self) -> Vec3 {
        -self.z
    }

    // Land mode keeps horizontal motion on the ground plane.
    fn ground(&self, axis: Vec3) -> Vec3 {
        match self.mode {
            CameraMode::Free => axis,
            CameraMode::Land => Vec3::new(axis.x, 0.0, axis.z).normalize_or_zero(),
        }
    }

    // Keeps the last good basis if rounding ever collapses it.
    fn orthonormalize(&mut self) {
        if let Some((x, y, z)) = orthonormal_basis(self.x, self.z) {
            self.x = x;
            self.y = y;
            self.z = z;
        }
    }
}

// Gram-Schmidt with z as the fixed axis.
fn orthonormal_basis(x: Vec3, z: Vec3) -> Option<(Vec3, Vec3, Vec3)> {
    let z = z.try_normalize()?;
    let y = z.cross(x).try_normalize()?;
    let x = y.cross(z).try_normalize()?;
    Some((x, y, z))
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::new(CameraMode::default())
    }
}

impl CameraController for FreeCamera {
    fn view_matrix(&mut self) -> Mat4 {
        FreeCamera::view_matrix(self)
    }

    fn eye_position(&mut self) -> Option<Vec3> {
        Some(self.t)
    }
}
