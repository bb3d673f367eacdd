use glam::{Mat3, Mat4};

use crate::core::viewport::Viewport;
use crate::error::Result;
use crate::math::normal_matrix;
use crate::traits::RenderContext;
use crate::types::MatrixUniform;

/// In-memory [`RenderContext`]: holds the matrices a GPU backend would own.
#[derive(Debug, Clone)]
pub struct SoftwareContext {
    projection: Mat4,
    view: Mat4,
    viewport: Viewport,
}

impl SoftwareContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            viewport,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Reset the view matrix to identity, as at the start of a frame
    pub fn load_identity(&mut self) {
        self.view = Mat4::IDENTITY;
    }

    /// Matrix for transforming normals by the current view
    pub fn normal_matrix(&self) -> Result<Mat3> {
        normal_matrix(&self.view)
    }

    pub fn uniform(&self) -> MatrixUniform {
        MatrixUniform::new(self.view, self.projection)
    }
}

impl RenderContext for SoftwareContext {
    fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
    }

    fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
    }
}
