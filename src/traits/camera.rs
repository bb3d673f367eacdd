use glam::{Mat4, Vec3};

use super::render_context::RenderContext;
use crate::math::MatrixExt;

/// A camera that produces a view matrix for the renderer
pub trait CameraController {
    /// Get the view matrix for rendering
    fn view_matrix(&mut self) -> Mat4;

    /// Multiply the view matrix into the context's current view transform
    fn apply_transform(&mut self, ctx: &mut dyn RenderContext) {
        let view = self.view_matrix();
        ctx.multiply_view_matrix(view);
    }

    /// Get the eye position in world space, if the view is invertible
    fn eye_position(&mut self) -> Option<Vec3> {
        let inverse = self.view_matrix().try_inverse().ok()?;
        Some(inverse.w_axis.truncate())
    }
}
