//! Projection and transform builders.
//!
//! Everything here follows the OpenGL conventions: right-handed eye space
//! looking down `-z`, column-major storage and clip-space depth in `[-1, 1]`.

use glam::{Mat4, Vec3, Vec4};

use super::quaternion::{axis_angle_degrees, write_rotation};

/// Perspective projection for the given near-plane rectangle.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = z_far - z_near;

    Mat4::from_cols(
        Vec4::new(2.0 * z_near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * z_near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(z_far + z_near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -(2.0 * z_far * z_near) / depth, 0.0),
    )
}

/// Orthographic projection of the given box.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Mat4 {
    let dx = 1.0 / (right - left);
    let dy = 1.0 / (top - bottom);
    let dz = 1.0 / (z_far - z_near);

    Mat4::from_cols(
        Vec4::new(2.0 * dx, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * dy, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -2.0 * dz, 0.0),
        Vec4::new(
            -(right + left) * dx,
            -(top + bottom) * dy,
            -(z_far + z_near) * dz,
            1.0,
        ),
    )
}

/// Orthographic projection with depth range `[-1, 1]`, for 2D overlays.
pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Mat4 {
    ortho(left, right, bottom, top, -1.0, 1.0)
}

/// Symmetric perspective projection; `fovy_degrees` is the full vertical
/// field of view.
pub fn perspective(fovy_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
    let fh = (fovy_degrees.to_radians() * 0.5).tan() * z_near;
    let fw = fh * aspect;
    frustum(-fw, fw, -fh, fh, z_near, z_far)
}

/// View matrix for an eye at `eye` looking at `center`.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let z = (eye - center).normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x);

    Mat4::from_cols(
        Vec4::new(x.x, y.x, z.x, 0.0),
        Vec4::new(x.y, y.y, z.y, 0.0),
        Vec4::new(x.z, y.z, z.z, 0.0),
        Vec4::new(-x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0),
    )
}

pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

/// Rotation of `angle_degrees` about the axis `(x, y, z)`.
pub fn rotate(angle_degrees: f32, x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    write_rotation(
        axis_angle_degrees(Vec3::new(x, y, z).normalize_or_zero(), angle_degrees),
        &mut m,
    );
    m
}
