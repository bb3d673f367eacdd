use glam::Mat4;

/// Matrix uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
}

impl MatrixUniform {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_projection: (projection * view).to_cols_array_2d(),
        }
    }

    /// Raw bytes, ready to copy into a uniform buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<MatrixUniform>(), 3 * 64);
        let uniform = MatrixUniform::new(Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(uniform.as_bytes().len(), 192);
    }

    #[test]
    fn test_uniform_column_major() {
        let view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniform = MatrixUniform::new(view, Mat4::IDENTITY);
        assert_eq!(uniform.view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.view_projection, uniform.view);
    }
}
