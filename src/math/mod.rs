mod aabb;
mod matrix;
mod plane;
pub mod projection;
pub mod quaternion;
mod ray;
mod slerp;

pub use aabb::AABB;
pub use matrix::{normal_matrix, MatrixExt, Vec4Ext, DETERMINANT_EPSILON};
pub use plane::Plane;
pub use quaternion::axis_angle_degrees;
pub use ray::Ray;
pub use slerp::{Slerp, SLERP_EPSILON};
