use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::error::{Result, ViewError};

/// Determinants smaller than this are treated as singular.
pub const DETERMINANT_EPSILON: f32 = 1e-12;

/// Checked operations on glam matrices.
pub trait MatrixExt: Sized {
    /// Inverse of the matrix, or [`ViewError::SingularMatrix`] when the
    /// determinant is (nearly) zero or the result is not finite.
    fn try_inverse(&self) -> Result<Self>;

    /// Multiplies the three basis columns by `factor`, leaving any translation
    /// untouched.
    fn scale_axes(&self, factor: f32) -> Self;
}

impl MatrixExt for Mat4 {
    fn try_inverse(&self) -> Result<Self> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() < DETERMINANT_EPSILON {
            return Err(ViewError::SingularMatrix { determinant });
        }
        let inverse = self.inverse();
        if !inverse.is_finite() {
            return Err(ViewError::SingularMatrix { determinant });
        }
        Ok(inverse)
    }

    fn scale_axes(&self, factor: f32) -> Self {
        Mat4::from_cols(
            self.x_axis * factor,
            self.y_axis * factor,
            self.z_axis * factor,
            self.w_axis,
        )
    }
}

impl MatrixExt for Mat3 {
    fn try_inverse(&self) -> Result<Self> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() < DETERMINANT_EPSILON {
            return Err(ViewError::SingularMatrix { determinant });
        }
        let inverse = self.inverse();
        if !inverse.is_finite() {
            return Err(ViewError::SingularMatrix { determinant });
        }
        Ok(inverse)
    }

    fn scale_axes(&self, factor: f32) -> Self {
        *self * factor
    }
}

/// Homogeneous-coordinate helpers for [`Vec4`].
pub trait Vec4Ext {
    /// Perspective divide: `(x/w, y/w, z/w)`.
    fn cartesian(self) -> Result<Vec3>;
}

impl Vec4Ext for Vec4 {
    fn cartesian(self) -> Result<Vec3> {
        if self.w.abs() < f32::EPSILON || !self.w.is_finite() {
            return Err(ViewError::PointAtInfinity { w: self.w });
        }
        Ok(self.truncate() / self.w)
    }
}

/// Inverse transpose of the upper 3x3 block, used to carry normals through a
/// model-view transform.
pub fn normal_matrix(model_view: &Mat4) -> Result<Mat3> {
    Ok(Mat3::from_mat4(*model_view).try_inverse()?.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_inverse_identity() {
        let inv = Mat4::IDENTITY.try_inverse().unwrap();
        assert_eq!(inv, Mat4::IDENTITY);
    }

    #[test]
    fn test_try_inverse_round_trip() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_rotation_y(0.7)
            * Mat4::from_scale(Vec3::splat(2.0));
        let inv = m.try_inverse().unwrap();
        assert!((m * inv).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_try_inverse_singular() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let err = m.try_inverse().unwrap_err();
        assert!(matches!(err, ViewError::SingularMatrix { .. }));
    }

    #[test]
    fn test_mat3_try_inverse_singular() {
        assert!(Mat3::ZERO.try_inverse().is_err());
    }

    #[test]
    fn test_scale_axes_keeps_translation() {
        let m = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let scaled = m.scale_axes(3.0);
        assert_eq!(scaled.x_axis, Vec4::new(3.0, 0.0, 0.0, 0.0));
        assert_eq!(scaled.w_axis, Vec4::new(4.0, 5.0, 6.0, 1.0));
    }

    #[test]
    fn test_cartesian_divides_by_w() {
        let p = Vec4::new(2.0, 4.0, 6.0, 2.0).cartesian().unwrap();
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_cartesian_rejects_direction() {
        let err = Vec4::new(1.0, 0.0, 0.0, 0.0).cartesian().unwrap_err();
        assert_eq!(err, ViewError::PointAtInfinity { w: 0.0 });
    }

    #[test]
    fn test_normal_matrix_uniform_scale() {
        let mv = Mat4::from_scale(Vec3::splat(2.0));
        let n = normal_matrix(&mv).unwrap();
        assert!(n.abs_diff_eq(Mat3::from_diagonal(Vec3::splat(0.5)), 1e-6));
    }
}
