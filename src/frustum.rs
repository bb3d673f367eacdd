use glam::{Mat4, Vec3};
use log::debug;

use crate::math::{Plane, AABB};
use crate::traits::RenderContext;

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;
pub const BOTTOM: usize = 2;
pub const TOP: usize = 3;
pub const NEAR: usize = 4;
pub const FAR: usize = 5;

/// The six clip planes of a view volume, normals pointing inwards.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extracts the planes of the volume `m` maps onto the clip cube
    /// (Gribb/Hartmann). Pass `projection * view` for world-space planes.
    pub fn from_matrix(m: &Mat4) -> Self {
        let r0 = m.row(0);
        let r1 = m.row(1);
        let r2 = m.row(2);
        let r3 = m.row(3);

        let mut planes = [Plane::default(); 6];
        planes[LEFT] = Plane::from_coefficients(r3 + r0).normalized();
        planes[RIGHT] = Plane::from_coefficients(r3 - r0).normalized();
        planes[BOTTOM] = Plane::from_coefficients(r3 + r1).normalized();
        planes[TOP] = Plane::from_coefficients(r3 - r1).normalized();
        planes[NEAR] = Plane::from_coefficients(r3 + r2).normalized();
        planes[FAR] = Plane::from_coefficients(r3 - r2).normalized();

        Self { planes }
    }

    /// Conservative box test: `false` only when the box lies entirely outside
    /// one of the planes. Boxes straddling a plane are kept.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance(aabb.positive_vertex(plane.normal)) >= 0.0)
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance(p) >= 0.0)
    }
}

/// Frustum culling against the context's current projection and view.
///
/// Planes are computed on the first [`FrustumCuller::cull`] after
/// [`FrustumCuller::update_mvp`]; call that whenever the projection or view
/// changes.
#[derive(Debug, Clone)]
pub struct FrustumCuller {
    frustum: Frustum,
    needs_update: bool,
}

impl FrustumCuller {
    pub fn new() -> Self {
        Self {
            frustum: Frustum::default(),
            needs_update: true,
        }
    }

    /// Marks the cached planes stale.
    pub fn update_mvp(&mut self) {
        self.needs_update = true;
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Returns `false` when `aabb` is certainly outside the view volume.
    pub fn cull(&mut self, ctx: &dyn RenderContext, aabb: &AABB) -> bool {
        self.frustum(ctx).intersects_aabb(aabb)
    }

    /// Current planes, recomputed first if stale.
    pub fn frustum(&mut self, ctx: &dyn RenderContext) -> &Frustum {
        if self.needs_update {
            let mvp = ctx.projection_matrix() * ctx.view_matrix();
            self.frustum = Frustum::from_matrix(&mvp);
            self.needs_update = false;
            debug!("frustum planes recomputed");
        }
        &self.frustum
    }
}

impl Default for FrustumCuller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::projection::{ortho, perspective};

    #[test]
    fn test_ortho_planes() {
        let f = Frustum::from_matrix(&ortho(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0));
        assert!(f.planes[LEFT].normal.abs_diff_eq(Vec3::X, 1e-6));
        assert!((f.planes[LEFT].d - 1.0).abs() < 1e-6);
        assert!(f.planes[NEAR].normal.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!((f.planes[NEAR].d + 1.0).abs() < 1e-5);
        assert!(f.planes[FAR].normal.abs_diff_eq(Vec3::Z, 1e-6));
        assert!((f.planes[FAR].d - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_contains_point() {
        let f = Frustum::from_matrix(&perspective(90.0, 1.0, 1.0, 100.0));
        assert!(f.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        assert!(!f.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        assert!(!f.contains_point(Vec3::new(0.0, 0.0, -0.5)));
        assert!(!f.contains_point(Vec3::new(20.0, 0.0, -10.0)));
    }

    #[test]
    fn test_straddling_box_is_kept() {
        let f = Frustum::from_matrix(&perspective(90.0, 1.0, 1.0, 100.0));
        let aabb = AABB::new(Vec3::new(5.0, -1.0, -11.0), Vec3::new(15.0, 1.0, -9.0));
        assert!(f.intersects_aabb(&aabb));
    }

    #[test]
    fn test_new_culler_needs_update() {
        let culler = FrustumCuller::new();
        assert!(culler.needs_update());
    }
}
