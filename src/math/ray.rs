use glam::Vec3;

use super::aabb::AABB;

/// Half-line with a unit direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray through two points, starting at `from`.
    pub fn through(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first hit with `aabb`, if any.
    ///
    /// A ray starting inside the box hits at its exit point.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        const EPSILON: f32 = 1e-8;

        // Near-zero components get a huge inverse rather than dividing by zero
        let inv = |d: f32| {
            if d.abs() < EPSILON {
                1.0 / EPSILON.copysign(d)
            } else {
                1.0 / d
            }
        };
        let inv_dir = Vec3::new(inv(self.direction.x), inv(self.direction.y), inv(self.direction.z));

        let t_min = (aabb.min - self.origin) * inv_dir;
        let t_max = (aabb.max - self.origin) * inv_dir;

        let t1 = t_min.min(t_max);
        let t2 = t_min.max(t_max);

        let t_near = t1.max_element();
        let t_far = t2.min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }

        if t_near < 0.0 {
            (t_far > 0.001).then_some(t_far)
        } else {
            Some(t_near)
        }
    }
}
