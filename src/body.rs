use ultraviolet::Vec2;

/// A rigid circle integrated with position Verlet.
///
/// Velocity is carried as a cache of `pos - last_pos`. It is rewritten at
/// the end of every [`integrate`](crate::integrator::integrate) call, and
/// the collision solvers overwrite it directly between integrations.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Current position.
    pub pos: Vec2,
    /// Position before the last integration step.
    pub last_pos: Vec2,
    /// Force accumulator, cleared after every integration step.
    pub acc: Vec2,
    /// Displacement over the last sub-step.
    pub vel: Vec2,
    /// Radius. Zero denotes a point that never rotates.
    pub radius: f32,
    /// Cached `1 / radius`.
    pub inv_radius: f32,
    /// `radius³`, fixed at construction.
    pub mass: f32,
    /// Fraction of tangential velocity kept on impact.
    pub friction: f32,
    /// Fraction of normal velocity reflected on impact.
    pub elasticity: f32,
    /// Orientation in radians, kept in (-π, π].
    pub angle: f32,
    /// Orientation before the last integration step.
    pub last_angle: f32,
    /// Angular increment applied per sub-step.
    pub rotation: f32,
    /// Orientation marker offset, only meaningful for drawing.
    pub angle_normal: Vec2,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::zero(), 1.0, 1.0, 1.0)
    }
}

impl Body {
    /// Creates a body at rest with zeroed orientation.
    /// Mass is derived from the radius as `radius³`.
    pub fn new(pos: Vec2, radius: f32, friction: f32, elasticity: f32) -> Self {
        debug_assert!(radius >= 0.0, "body radius must not be negative");
        Self {
            pos,
            last_pos: pos,
            acc: Vec2::zero(),
            vel: Vec2::zero(),
            radius,
            inv_radius: 1.0 / radius,
            mass: radius * radius * radius,
            friction,
            elasticity,
            angle: 0.0,
            last_angle: 0.0,
            rotation: 0.0,
            angle_normal: Vec2::new(1.0, 0.0),
        }
    }

    /// Adds `force` to the accumulator. Forces are not divided by mass.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Adds the gravity vector. Every body falls at the same rate.
    #[inline]
    pub fn apply_gravity(&mut self, gravity: Vec2) {
        self.acc += gravity;
    }

    pub fn is_point(&self) -> bool {
        self.radius == 0.0
    }

    /// End point of the orientation line drawn from the body's centre.
    pub fn marker_tip(&self) -> Vec2 {
        self.pos + self.angle_normal
    }
}
