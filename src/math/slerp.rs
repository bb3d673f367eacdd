use glam::Quat;

use super::quaternion::dot;

/// Below this angle (radians) between the endpoints the blend falls back to
/// linear interpolation.
pub const SLERP_EPSILON: f32 = 1e-5;

/// Fixed-step spherical interpolation between two orientations.
///
/// Each call to [`Slerp::next_rotation`] yields the orientation at the current
/// parameter and advances it by `step`. Once the parameter passes 1 the
/// generator returns the end orientation one last time and reports
/// [`Slerp::is_complete`].
#[derive(Clone, Debug)]
pub struct Slerp {
    from: Quat,
    to: Quat,
    omega: f32,
    inv_sin_omega: f32,
    t: f32,
    step: f32,
    complete: bool,
}

impl Slerp {
    pub fn new(from: Quat, to: Quat, step: f32) -> Self {
        let mut d = dot(from, to);
        // Take the short way round.
        let to = if d < 0.0 {
            d = -d;
            -to
        } else {
            to
        };

        let omega = d.min(1.0).acos();
        let inv_sin_omega = if omega > SLERP_EPSILON {
            1.0 / omega.sin()
        } else {
            0.0
        };

        // A step that cannot advance jumps straight to the end.
        let (t, step) = if step.is_finite() && step > 0.0 {
            (0.0, step)
        } else {
            (f32::INFINITY, f32::INFINITY)
        };

        Self {
            from: from.normalize(),
            to: to.normalize(),
            omega,
            inv_sin_omega,
            t,
            step,
            complete: false,
        }
    }

    /// Orientation at the current parameter; advances the parameter.
    pub fn next_rotation(&mut self) -> Quat {
        if self.t > 1.0 {
            self.complete = true;
            return self.to;
        }

        let (a, b) = if self.omega > SLERP_EPSILON {
            (
                ((1.0 - self.t) * self.omega).sin() * self.inv_sin_omega,
                (self.t * self.omega).sin() * self.inv_sin_omega,
            )
        } else {
            (1.0 - self.t, self.t)
        };

        let q = Quat::from_xyzw(
            self.from.x * a + self.to.x * b,
            self.from.y * a + self.to.y * b,
            self.from.z * a + self.to.z * b,
            self.from.w * a + self.to.w * b,
        );

        self.t += self.step;
        q
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn start(&self) -> Quat {
        self.from
    }

    /// End orientation, possibly negated to lie on the short arc from the start.
    pub fn end(&self) -> Quat {
        self.to
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Default for Slerp {
    fn default() -> Self {
        let mut slerp = Self::new(Quat::IDENTITY, Quat::IDENTITY, 0.0);
        slerp.complete = true;
        slerp
    }
}

impl Iterator for Slerp {
    type Item = Quat;

    fn next(&mut self) -> Option<Quat> {
        if self.complete {
            None
        } else {
            Some(self.next_rotation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_identical_endpoints_no_nan() {
        let q = Quat::from_axis_angle(Vec3::Y, 0.4);
        let mut slerp = Slerp::new(q, q, 0.1);
        let first = slerp.next_rotation();
        assert!(first.is_finite());
        assert!(first.abs_diff_eq(q, 1e-6));
    }

    #[test]
    fn test_default_is_complete() {
        let mut slerp = Slerp::default();
        assert!(slerp.is_complete());
        assert_eq!(slerp.next(), None);
    }

    #[test]
    fn test_sequence_ends_at_target() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Z, 1.0);
        let values: Vec<Quat> = Slerp::new(a, b, 0.25).collect();
        // t = 0, 0.25, 0.5, 0.75, 1.0 then the final end value
        assert_eq!(values.len(), 6);
        assert!(values[0].abs_diff_eq(a, 1e-6));
        assert!(values[4].abs_diff_eq(b, 1e-5));
        assert!(values.last().unwrap().abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn test_midpoint_is_half_angle() {
        let b = Quat::from_axis_angle(Vec3::X, 1.2);
        let mut slerp = Slerp::new(Quat::IDENTITY, b, 0.5);
        slerp.next_rotation();
        let mid = slerp.next_rotation();
        assert!(mid.abs_diff_eq(Quat::from_axis_angle(Vec3::X, 0.6), 1e-5));
    }

    #[test]
    fn test_shortest_arc_negates_target() {
        let a = Quat::IDENTITY;
        let b = -Quat::from_axis_angle(Vec3::Y, 0.5);
        let slerp = Slerp::new(a, b, 0.1);
        assert!(dot(slerp.start(), slerp.end()) > 0.0);
    }

    #[test]
    fn test_non_positive_step_terminates() {
        let b = Quat::from_axis_angle(Vec3::Y, 0.5);
        let values: Vec<Quat> = Slerp::new(Quat::IDENTITY, b, 0.0).collect();
        assert_eq!(values.len(), 1);
        assert!(values[0].abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn test_invalid_step_yields_target_first() {
        let b = Quat::from_axis_angle(Vec3::X, 0.8);
        for step in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let mut slerp = Slerp::new(Quat::IDENTITY, b, step);
            let first = slerp.next_rotation();
            assert!(first.abs_diff_eq(b, 1e-6), "step {step}");
            assert!(slerp.is_complete());
        }
    }
}
