use glam::Mat4;

use crate::core::viewport::Viewport;

/// The capabilities the viewing core needs from a rendering backend.
///
/// Backends for a particular graphics API implement this; the cameras and the
/// frustum culler only ever talk to the renderer through it.
pub trait RenderContext {
    /// Current projection matrix (column-major, GL clip conventions)
    fn projection_matrix(&self) -> Mat4;

    /// Current viewport rectangle in pixels
    fn viewport(&self) -> Viewport;

    /// Current view (model-view) matrix
    fn view_matrix(&self) -> Mat4;

    /// Replace the view matrix
    fn set_view_matrix(&mut self, view: Mat4);

    /// Post-multiply the current view matrix by `m`
    fn multiply_view_matrix(&mut self, m: Mat4) {
        let view = self.view_matrix() * m;
        self.set_view_matrix(view);
    }

    /// Replace the projection matrix
    fn set_projection_matrix(&mut self, projection: Mat4);
}
