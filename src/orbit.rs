//! Trackball-style orbit camera.
//!
//! The view matrix is `rot * trs`: `trs` translates by the pan offset,
//! `rot` rotates by the accumulated orientation, scales uniformly and moves the
//! result to the pivot (the `center` given to [`OrbitCamera::set_perspective`]).
//! Rotation always happens about the point currently sitting at the pivot;
//! panning slides the model underneath it.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::math::projection::{frustum, ortho};
use crate::math::quaternion::write_rotation;
use crate::math::{axis_angle_degrees, MatrixExt, Ray, Vec4Ext};
use crate::traits::{CameraController, RenderContext};

/// Drags shorter than this (in near-plane units) are ignored.
pub const MIN_DRAG: f32 = 1e-5;

/// How far the pointer must travel for a half turn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "distance")]
pub enum RotationSpeed {
    /// Half the larger near-plane extent, times the current zoom.
    Viewport,
    /// A fixed distance in near-plane units.
    Constant(f32),
}

impl Default for RotationSpeed {
    fn default() -> Self {
        RotationSpeed::Viewport
    }
}

/// Near-plane extents and the window-pixel to near-plane conversion factors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewExtents {
    pub width: f32,
    pub height: f32,
    pub fw: f32,
    pub fh: f32,
}

impl ViewExtents {
    fn new(width: f32, height: f32, win_width: u32, win_height: u32) -> Result<Self> {
        if win_width == 0 || win_height == 0 {
            return Err(ViewError::InvalidViewport {
                width: win_width as f32,
                height: win_height as f32,
            });
        }
        Ok(Self {
            width,
            height,
            fw: width / win_width as f32,
            fh: height / win_height as f32,
        })
    }

    fn to_plane(&self, win_x: f32, win_y: f32) -> Vec2 {
        Vec2::new(win_x * self.fw - 1.0, win_y * self.fh - 1.0)
    }
}

/// `projection * rot` and its inverse, valid for one projection matrix.
#[derive(Clone, Copy, Debug)]
struct Unprojection {
    projection: Mat4,
    matrix: Mat4,
    inverse: Mat4,
}

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    rotation: Quat,
    pan: Vec3,
    pivot: Vec3,
    scale: f32,
    extents: ViewExtents,
    speed: RotationSpeed,

    from: Vec2,
    last: Vec3,

    changed: bool,
    rot: Mat4,
    view: Mat4,
    unprojection: Option<Unprojection>,
}

impl OrbitCamera {
    pub fn new() -> Self {
        let mut camera = Self {
            rotation: Quat::IDENTITY,
            pan: Vec3::ZERO,
            pivot: Vec3::ZERO,
            scale: 1.0,
            extents: ViewExtents::default(),
            speed: RotationSpeed::default(),
            from: Vec2::ZERO,
            last: Vec3::ZERO,
            changed: true,
            rot: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            unprojection: None,
        };
        camera.reset_view();
        camera
    }

    /// Back to identity rotation, no pan and unit scale.
    pub fn reset_view(&mut self) {
        self.rotation = Quat::IDENTITY;
        self.pan = Vec3::ZERO;
        self.scale = 1.0;
        self.changed = true;
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn pan_offset(&self) -> Vec3 {
        self.pan
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn extents(&self) -> ViewExtents {
        self.extents
    }

    pub fn rotation_speed(&self) -> RotationSpeed {
        self.speed
    }

    pub fn set_rotation_speed(&mut self, speed: RotationSpeed) {
        self.speed = speed;
    }

    /// True when a mutation has not yet been folded into the cached matrices.
    pub fn is_dirty(&self) -> bool {
        self.changed
    }

    /// Configures an orthographic projection on `ctx` and derives the drag
    /// factors from it. The pivot moves back to the origin.
    #[allow(clippy::too_many_arguments)]
    pub fn set_ortho(
        &mut self,
        ctx: &mut dyn RenderContext,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
        win_width: u32,
        win_height: u32,
    ) -> Result<()> {
        self.extents = ViewExtents::new(
            (right - left).abs(),
            (bottom - top).abs(),
            win_width,
            win_height,
        )?;
        self.pivot = Vec3::ZERO;

        ctx.set_projection_matrix(ortho(left, right, bottom, top, z_near, z_far));
        self.changed = true;
        debug!("orbit camera: ortho {:?}", self.extents);
        Ok(())
    }

    /// Configures a symmetric perspective projection on `ctx`. `center` becomes
    /// the pivot, in eye space.
    #[allow(clippy::too_many_arguments)]
    pub fn set_perspective(
        &mut self,
        ctx: &mut dyn RenderContext,
        fovy_degrees: f32,
        z_near: f32,
        z_far: f32,
        center: Vec3,
        win_width: u32,
        win_height: u32,
    ) -> Result<()> {
        if win_width == 0 || win_height == 0 {
            return Err(ViewError::InvalidViewport {
                width: win_width as f32,
                height: win_height as f32,
            });
        }

        let aspect = win_width as f32 / win_height as f32;
        let h = (fovy_degrees.to_radians() * 0.5).tan() * z_near;
        let w = h * aspect;

        ctx.set_projection_matrix(frustum(-w, w, -h, h, z_near, z_far));

        self.extents = ViewExtents::new(w * 2.0, h * 2.0, win_width, win_height)?;
        self.pivot = center;
        self.changed = true;
        debug!("orbit camera: perspective {:?}, pivot {}", self.extents, center);
        Ok(())
    }

    /// Anchors a pan gesture at window point `(x, y)`.
    pub fn begin_pan(&mut self, ctx: &dyn RenderContext, x: f32, y: f32) -> Result<()> {
        self.last = self.unproject(ctx, self.pan, x, y)?;
        Ok(())
    }

    /// Moves the model so the point under the cursor follows it, at the depth
    /// of the model origin.
    pub fn pan(&mut self, ctx: &dyn RenderContext, x: f32, y: f32) -> Result<()> {
        let p = self.unproject(ctx, self.pan, x, y)?;
        self.pan += p - self.last;
        self.last = p;
        self.changed = true;
        Ok(())
    }

    /// Anchors a rotation gesture at window point `(x, y)`.
    pub fn begin_rotate(&mut self, x: f32, y: f32) {
        self.from = self.extents.to_plane(x, y);
    }

    /// Rotates by the drag from the previous anchor to `(x, y)`.
    ///
    /// A horizontal drag turns about the vertical axis and a vertical drag
    /// about the horizontal one. Each increment is applied in the current
    /// world frame. Nothing happens while the rotation distance is zero or
    /// not finite (zero scale, or a zero constant speed).
    pub fn rotate(&mut self, x: f32, y: f32) {
        let to = self.extents.to_plane(x, y);

        let delta = self.from - to;
        let length = delta.length();
        if length < MIN_DRAG {
            return;
        }
        let delta = delta / length;

        let rot_dist = match self.speed {
            RotationSpeed::Constant(distance) => distance,
            RotationSpeed::Viewport => {
                0.5 * self.extents.width.max(self.extents.height) * self.scale
            }
        };
        if !(rot_dist > 0.0 && rot_dist.is_finite()) {
            debug!("orbit camera: rotate ignored, rotation distance {rot_dist}");
            return;
        }
        let angle = length / rot_dist * 180.0;
        let axis = Vec3::new(delta.y, delta.x, 0.0);

        let increment = axis_angle_degrees(axis, angle);
        if !increment.is_finite() {
            return;
        }
        self.rotation = increment * self.rotation;
        self.from = to;
        self.changed = true;
        trace!("orbit camera: rotate {angle} deg about {axis}");
    }

    pub fn zoom(&mut self, factor: f32) {
        self.scale *= factor;
        self.changed = true;
    }

    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom(factor);
    }

    pub fn zoom_out(&mut self, factor: f32) {
        self.scale /= factor;
        self.changed = true;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.changed = true;
    }

    /// Current view matrix, rebuilt only after a mutation.
    pub fn view_matrix(&mut self) -> Mat4 {
        self.refresh();
        self.view
    }

    /// Multiplies the view matrix into `ctx`.
    pub fn apply_transform(&mut self, ctx: &mut dyn RenderContext) {
        let view = self.view_matrix();
        ctx.multiply_view_matrix(view);
    }

    /// World-space point under window point `(x, y)` at the depth of `p`.
    ///
    /// Here world space is the model space before `rot`, i.e. the space the
    /// pan offset lives in.
    pub fn unproject(&mut self, ctx: &dyn RenderContext, p: Vec3, x: f32, y: f32) -> Result<Vec3> {
        let viewport = ctx.viewport();
        let unprojection = self.unprojection(ctx.projection_matrix())?;

        let depth = (unprojection.matrix * p.extend(1.0)).cartesian()?.z;
        let ndc = viewport.window_to_ndc(x, y)?;

        (unprojection.inverse * Vec4::new(ndc.x, ndc.y, depth, 1.0)).cartesian()
    }

    /// World-space ray from the near plane to the far plane through window
    /// point `(x, y)`, taking the full view (pan included) into account.
    pub fn pick_ray(&mut self, ctx: &dyn RenderContext, x: f32, y: f32) -> Result<Ray> {
        let ndc = ctx.viewport().window_to_ndc(x, y)?;
        let inverse = (ctx.projection_matrix() * self.view_matrix()).try_inverse()?;

        let near = (inverse * Vec4::new(ndc.x, ndc.y, -1.0, 1.0)).cartesian()?;
        let far = (inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0)).cartesian()?;
        Ok(Ray::through(near, far))
    }

    fn refresh(&mut self) {
        if !self.changed {
            return;
        }

        let mut rot = Mat4::from_translation(self.pivot);
        write_rotation(self.rotation, &mut rot);
        self.rot = rot.scale_axes(self.scale);
        self.view = self.rot * Mat4::from_translation(self.pan);
        self.unprojection = None;
        self.changed = false;
    }

    fn unprojection(&mut self, projection: Mat4) -> Result<Unprojection> {
        self.refresh();

        match self.unprojection {
            Some(cached) if cached.projection == projection => Ok(cached),
            _ => {
                let matrix = projection * self.rot;
                let inverse = matrix.try_inverse()?;
                let fresh = Unprojection {
                    projection,
                    matrix,
                    inverse,
                };
                self.unprojection = Some(fresh);
                debug!("orbit camera: unprojection rebuilt");
                Ok(fresh)
            }
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController for OrbitCamera {
    fn view_matrix(&mut self) -> Mat4 {
        OrbitCamera::view_matrix(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SoftwareContext;
    use crate::core::viewport::Viewport;

    fn perspective_camera() -> (OrbitCamera, SoftwareContext) {
        let mut ctx = SoftwareContext::new(Viewport::new(800.0, 600.0));
        let mut camera = OrbitCamera::new();
        camera
            .set_perspective(&mut ctx, 60.0, 0.1, 100.0, Vec3::new(0.0, 0.0, -5.0), 800, 600)
            .unwrap();
        (camera, ctx)
    }

    #[test]
    fn test_new_camera_is_identity_at_origin() {
        let mut camera = OrbitCamera::new();
        assert!(camera.is_dirty());
        assert_eq!(camera.view_matrix(), Mat4::IDENTITY);
        assert!(!camera.is_dirty());
    }

    #[test]
    fn test_perspective_extents() {
        let (camera, ctx) = perspective_camera();
        let h = 30f32.to_radians().tan() * 0.1 * 2.0;
        let ext = camera.extents();
        assert!((ext.height - h).abs() < 1e-6);
        assert!((ext.width - h * 4.0 / 3.0).abs() < 1e-6);
        assert!((ext.fw - ext.width / 800.0).abs() < 1e-9);
        assert_eq!(camera.pivot(), Vec3::new(0.0, 0.0, -5.0));
        assert_ne!(ctx.projection_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut ctx = SoftwareContext::new(Viewport::new(800.0, 600.0));
        let mut camera = OrbitCamera::new();
        let err = camera
            .set_perspective(&mut ctx, 60.0, 0.1, 100.0, Vec3::ZERO, 0, 600)
            .unwrap_err();
        assert!(matches!(err, ViewError::InvalidViewport { .. }));
    }

    #[test]
    fn test_tiny_drag_is_ignored() {
        let (mut camera, _) = perspective_camera();
        camera.view_matrix();
        camera.begin_rotate(100.0, 100.0);
        camera.rotate(100.0, 100.0);
        assert_eq!(camera.rotation(), Quat::IDENTITY);
        assert!(!camera.is_dirty());
    }

    #[test]
    fn test_vertical_drag_rotates_about_x() {
        let (mut camera, _) = perspective_camera();
        camera.begin_rotate(400.0, 300.0);
        camera.rotate(400.0, 340.0);
        let (axis, angle) = camera.rotation().to_axis_angle();
        assert!(angle > 0.0);
        assert!(axis.x.abs() > 0.99);
    }

    #[test]
    fn test_constant_speed() {
        let (mut camera, _) = perspective_camera();
        let fw = camera.extents().fw;
        camera.set_rotation_speed(RotationSpeed::Constant(100.0 * fw));
        camera.begin_rotate(0.0, 0.0);
        camera.rotate(100.0, 0.0);
        let (_, angle) = camera.rotation().to_axis_angle();
        assert!((angle.to_degrees() - 180.0).abs() < 1e-2);
    }

    #[test]
    fn test_zoom_variants() {
        let mut camera = OrbitCamera::new();
        camera.zoom_in(2.0);
        camera.zoom(3.0);
        assert_eq!(camera.scale(), 6.0);
        camera.zoom_out(2.0);
        assert_eq!(camera.scale(), 3.0);
        camera.set_scale(0.5);
        assert_eq!(camera.scale(), 0.5);
        assert!(camera.is_dirty());
    }

    #[test]
    fn test_view_matrix_places_origin_at_pivot() {
        let (mut camera, _) = perspective_camera();
        let view = camera.view_matrix();
        assert_eq!(view.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_unproject_center_at_pivot_depth() {
        let (mut camera, ctx) = perspective_camera();
        let p = camera.unproject(&ctx, Vec3::ZERO, 400.0, 300.0).unwrap();
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-3));
    }

    #[test]
    fn test_singular_scale_fails_unprojection() {
        let (mut camera, ctx) = perspective_camera();
        camera.set_scale(0.0);
        let err = camera.begin_pan(&ctx, 10.0, 10.0).unwrap_err();
        assert!(matches!(err, ViewError::SingularMatrix { .. }));
    }

    #[test]
    fn test_failed_pan_leaves_state_untouched() {
        let (mut camera, ctx) = perspective_camera();
        camera.begin_pan(&ctx, 400.0, 300.0).unwrap();
        camera.pan(&ctx, 450.0, 320.0).unwrap();
        let offset = camera.pan_offset();
        let last = camera.last;

        camera.set_scale(0.0);
        let err = camera.pan(&ctx, 600.0, 100.0).unwrap_err();
        assert!(matches!(err, ViewError::SingularMatrix { .. }));
        assert_eq!(camera.pan_offset(), offset);
        assert_eq!(camera.last, last);

        camera.set_scale(1.0);
        camera.pan(&ctx, 450.0, 320.0).unwrap();
        assert!(camera.pan_offset().abs_diff_eq(offset, 1e-4));
    }

    #[test]
    fn test_zero_rotation_distance_is_ignored() {
        let (mut camera, _) = perspective_camera();
        camera.set_rotation_speed(RotationSpeed::Constant(0.0));
        camera.begin_rotate(400.0, 300.0);
        camera.rotate(450.0, 300.0);
        assert_eq!(camera.rotation(), Quat::IDENTITY);

        camera.set_rotation_speed(RotationSpeed::Constant(f32::INFINITY));
        camera.rotate(480.0, 300.0);
        assert_eq!(camera.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_serde_rotation_speed() {
        let speed: RotationSpeed =
            serde_json::from_str(r#"{"mode":"constant","distance":2.5}"#).unwrap();
        assert_eq!(speed, RotationSpeed::Constant(2.5));
        let speed: RotationSpeed = serde_json::from_str(r#"{"mode":"viewport"}"#).unwrap();
        assert_eq!(speed, RotationSpeed::Viewport);
    }
}
