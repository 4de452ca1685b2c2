use ultraviolet::Vec2;

use crate::{body::Body, collision::solve_normal_collision};

/// Smallest overshoot past the rim that still counts as being on it.
const MIN_RIM_SLOP: f32 = 1e-4;
/// Rounding budget, in units of f32 epsilon relative to the arena's extent.
const RIM_SLOP_ULPS: f32 = 4.0;

/// A circular arena that keeps bodies inside it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundConstraint {
    pub center: Vec2,
    pub radius: f32,
}

impl RoundConstraint {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether a body of `radius` can sit anywhere inside the arena.
    pub fn fits(&self, radius: f32) -> bool {
        radius < self.radius
    }

    /// Overshoot past the rim treated as already on it. Scales with the
    /// arena's coordinates so a body just projected back does not bounce a
    /// second time on rounding error.
    pub fn rim_slop(&self) -> f32 {
        let extent = self.center.x.abs().max(self.center.y.abs()) + self.radius;
        (RIM_SLOP_ULPS * f32::EPSILON * extent).max(MIN_RIM_SLOP)
    }

    /// Whether the body currently lies inside the arena.
    pub fn contains(&self, body: &Body) -> bool {
        let target = self.radius - body.radius;
        (self.center - body.pos).mag() - target <= self.rim_slop()
    }

    /// Pulls a body that left the arena back onto its rim and bounces it off
    /// the wall. Returns whether a correction was applied.
    ///
    /// The arena must be larger than the body; see [`fits`](Self::fits).
    pub fn apply(&self, body: &mut Body) -> bool {
        let to_center = self.center - body.pos;
        let target = self.radius - body.radius;
        let dist_sq = to_center.mag_sq();
        if dist_sq <= target * target {
            return false;
        }

        let dist = dist_sq.sqrt();
        if dist - target <= self.rim_slop() {
            return false;
        }
        let normal = to_center / dist;
        body.pos += normal * (dist - target);
        solve_normal_collision(body, normal);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> RoundConstraint {
        RoundConstraint::new(Vec2::new(100.0, 100.0), 50.0)
    }

    #[test]
    fn inside_is_a_noop() {
        let mut body = Body::new(Vec2::new(110.0, 100.0), 10.0, 1.0, 1.0);
        body.vel = Vec2::new(3.0, 0.0);
        let before = body;
        assert!(!arena().apply(&mut body));
        assert_eq!(body, before);
    }

    #[test]
    fn outside_is_pulled_to_rim_and_bounced() {
        let mut body = Body::new(Vec2::new(160.0, 100.0), 10.0, 1.0, 0.5);
        body.vel = Vec2::new(4.0, 0.0);
        assert!(arena().apply(&mut body));
        assert!((body.pos.x - 140.0).abs() < 1e-4);
        assert!((body.vel.x + 2.0).abs() < 1e-6);
        assert!(arena().contains(&body));
    }

    #[test]
    fn second_application_is_a_noop() {
        let mut body = Body::new(Vec2::new(40.0, 170.0), 10.0, 0.9, 0.5);
        body.vel = Vec2::new(-3.0, 5.0);
        assert!(arena().apply(&mut body));
        let after_first = body;
        assert!(!arena().apply(&mut body));
        assert_eq!(body, after_first);
    }

    #[test]
    fn rim_slop_grows_with_far_arenas() {
        assert_eq!(arena().rim_slop(), MIN_RIM_SLOP);
        let far = RoundConstraint::new(Vec2::new(960.0, 540.0), 540.0);
        assert!(far.rim_slop() > 1.22e-4);
    }

    #[test]
    fn fits_requires_smaller_body() {
        assert!(arena().fits(49.0));
        assert!(!arena().fits(50.0));
    }
}
