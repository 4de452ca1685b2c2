use ultraviolet::Vec2;

use crate::body::Body;

/// Squared distance under which two centres count as coincident.
const COINCIDENT_DIST_SQ: f32 = 0.1;
/// Separation axis used when two centres coincide.
const COINCIDENT_AXIS: Vec2 = Vec2 { x: 0.1, y: 0.0 };

/// Borrows two distinct bodies of a slice mutably.
///
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "a body cannot collide with itself");
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Reflects the body's velocity off a surface with unit normal `normal`.
///
/// The normal component is reversed and scaled by the elasticity, the
/// tangential one scaled by the friction. Non-point bodies pick up spin.
pub fn solve_normal_collision(body: &mut Body, normal: Vec2) {
    let initial = body.vel;
    let normal_vel = normal * initial.dot(normal);
    let tangent_vel = (initial - normal_vel) * body.friction;
    body.vel = normal_vel * -body.elasticity + tangent_vel;

    if body.is_point() {
        return;
    }
    body.rotation = spin(body, initial, normal);
}

/// Pushes two overlapping bodies apart and nudges their velocities.
///
/// The lighter body takes the larger share of the correction. Nothing
/// happens when the circles do not overlap.
pub fn resolve_pair_collision(a: &mut Body, b: &mut Body) {
    let mut diff = b.pos - a.pos;
    let dist_sq = diff.mag_sq();
    let target = a.radius + b.radius;
    if dist_sq >= target * target {
        return;
    }

    let dist = if dist_sq <= COINCIDENT_DIST_SQ {
        diff = COINCIDENT_AXIS;
        COINCIDENT_AXIS.x
    } else {
        dist_sq.sqrt()
    };

    let correction = (target - dist) / dist;
    let total_mass = a.mass + b.mass;
    let ratio_a = a.mass / total_mass;
    let ratio_b = b.mass / total_mass;
    let avg_elasticity = (a.elasticity + b.elasticity) * 0.5;

    let shift_a = diff * (correction * ratio_b);
    let shift_b = diff * (correction * ratio_a);
    a.pos -= shift_a;
    b.pos += shift_b;

    let initial_a = a.vel;
    let initial_b = b.vel;
    a.vel -= shift_a * avg_elasticity;
    b.vel += shift_b * avg_elasticity;

    let axis = normalize_or_zero(diff);
    if !a.is_point() {
        a.rotation = spin(a, initial_a, -axis);
    }
    if !b.is_point() {
        b.rotation = spin(b, initial_b, axis);
    }
}

/// Spin picked up in an impact: glancing hits along `normal` turn the body
/// in the direction the velocity was deflected.
fn spin(body: &Body, initial: Vec2, normal: Vec2) -> f32 {
    let direction = normalize_or_zero(initial);
    let perpendicular = (normal.dot(direction) + 1.0) * 0.5;
    let turn = initial.x * body.vel.y - initial.y * body.vel.x;
    let magnitude = initial.mag() * 0.5 * body.inv_radius * perpendicular * body.friction;
    magnitude.copysign(turn)
}

#[inline]
fn normalize_or_zero(v: Vec2) -> Vec2 {
    let mag = v.mag();
    if mag == 0.0 { Vec2::zero() } else { v / mag }
}
