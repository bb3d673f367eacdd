use glam::{Vec3, Vec4};

use super::ray::Ray;

/// Plane `A*x + B*y + C*z + D = 0`, stored as a normal `(A, B, C)` and `D`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self {
            normal: Vec3::new(a, b, c),
            d,
        }
    }

    /// Plane from packed `(A, B, C, D)` coefficients.
    pub fn from_coefficients(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Plane through three points, normal following the winding
    /// `p1 -> p2 -> p3` counter-clockwise.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize_or_zero();
        Self {
            normal,
            d: -normal.dot(p1),
        }
    }

    /// Same plane scaled to a unit normal, so that [`Plane::distance`] is a
    /// true Euclidean distance. A zero normal is returned unchanged.
    pub fn normalized(self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self {
                normal: self.normal / len,
                d: self.d / len,
            }
        } else {
            self
        }
    }

    /// Signed distance; positive on the side the normal points to.
    pub fn distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.d
    }

    /// Orthogonal projection of `p` onto the plane (unit normal assumed).
    pub fn project(&self, p: Vec3) -> Vec3 {
        p - self.distance(p) * self.normal
    }

    /// Parameter along `ray` of the crossing point. `None` when the ray is
    /// parallel to the plane or the crossing lies behind the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() <= 1e-4 {
            return None;
        }
        let t = -(self.d + ray.origin.dot(self.normal)) / denom;
        (t >= 0.0).then_some(t)
    }
}
