use glam::{Mat3, Mat4, Quat, Vec3};

/// Rotation of `angle_degrees` about `axis`.
///
/// The axis is used as given: `(axis * sin(a/2), cos(a/2))`. Pass a unit
/// axis, otherwise the quaternion is not a pure rotation.
pub fn axis_angle_degrees(axis: Vec3, angle_degrees: f32) -> Quat {
    let half = angle_degrees.to_radians() * 0.5;
    let (sin, cos) = half.sin_cos();
    Quat::from_xyzw(axis.x * sin, axis.y * sin, axis.z * sin, cos)
}

/// 3x3 rotation matrix equivalent to `q`.
pub fn rotation_matrix3(q: Quat) -> Mat3 {
    Mat3::from_quat(q)
}

/// Overwrites the rotation block of `m` with the rotation of `q`.
///
/// The translation column is left to the caller.
pub fn write_rotation(q: Quat, m: &mut Mat4) {
    let r = rotation_matrix3(q);
    m.x_axis = r.x_axis.extend(0.0);
    m.y_axis = r.y_axis.extend(0.0);
    m.z_axis = r.z_axis.extend(0.0);
}

/// Four-component dot product of two quaternions.
pub fn dot(a: Quat, b: Quat) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w
}
