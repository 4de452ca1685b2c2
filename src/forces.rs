use ultraviolet::Vec2;

use crate::body::Body;

/// A force applied to every body once per sub-step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExternalForce {
    /// The same vector for every body.
    Constant(Vec2),
    /// Pulls bodies towards `target` with magnitude `strength - distance`,
    /// reaching zero at `strength` px away.
    Attractor { target: Vec2, strength: f32 },
}

impl ExternalForce {
    /// The force this field exerts on `body`.
    pub fn force_on(&self, body: &Body) -> Vec2 {
        match *self {
            ExternalForce::Constant(force) => force,
            ExternalForce::Attractor { target, strength } => {
                let to_target = target - body.pos;
                let dist = to_target.mag();
                if dist > 0.0 {
                    to_target * ((strength - dist).max(0.0) / dist)
                } else {
                    Vec2::zero()
                }
            }
        }
    }

    pub fn apply(&self, body: &mut Body) {
        let force = self.force_on(body);
        body.apply_force(force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), 5.0, 1.0, 1.0)
    }

    #[test]
    fn attractor_falls_off_linearly() {
        let pull = ExternalForce::Attractor { target: Vec2::zero(), strength: 1500.0 };
        let force = pull.force_on(&body_at(500.0, 0.0));
        assert!((force.x + 1000.0).abs() < 1e-3);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn attractor_out_of_range_is_zero() {
        let pull = ExternalForce::Attractor { target: Vec2::zero(), strength: 100.0 };
        assert_eq!(pull.force_on(&body_at(0.0, 150.0)), Vec2::zero());
    }

    #[test]
    fn attractor_on_target_is_zero() {
        let pull = ExternalForce::Attractor { target: Vec2::new(2.0, 2.0), strength: 100.0 };
        assert_eq!(pull.force_on(&body_at(2.0, 2.0)), Vec2::zero());
    }

    #[test]
    fn apply_accumulates() {
        let mut body = body_at(0.0, 0.0);
        ExternalForce::Constant(Vec2::new(1.0, -1.0)).apply(&mut body);
        ExternalForce::Constant(Vec2::new(1.0, -1.0)).apply(&mut body);
        assert_eq!(body.acc, Vec2::new(2.0, -2.0));
    }
}
