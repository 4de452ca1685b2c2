use crate::{body::Body, constraint::RoundConstraint};
use ultraviolet::Vec2;

/// Centres of a `size × size` grid of balls of `radius`, spaced three radii
/// apart and centred on `center`. Ordered column by column.
pub fn grid_cluster(center: Vec2, size: u32, radius: f32) -> Vec<Vec2> {
    let spacing = 3.0 * radius;
    let half = (size as f32 - 1.0) * 0.5;
    let mut positions = Vec::with_capacity(size as usize * size as usize);
    for i in 0..size {
        for j in 0..size {
            let offset = Vec2::new(i as f32 - half, j as f32 - half) * spacing;
            positions.push(center + offset);
        }
    }
    positions
}

/// Generates `n` bodies of `radius` scattered uniformly over the arena.
/// - Placement is deterministic for a given `seed`.
/// - Every body starts fully inside the arena; overlaps are left for the
///   solver to push apart.
pub fn scatter_in_arena(
    n: usize,
    arena: &RoundConstraint,
    radius: f32,
    friction: f32,
    elasticity: f32,
    seed: u64,
) -> Vec<Body> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let reach = (arena.radius - radius).max(0.0);

    (0..n)
        .map(|_| {
            let a = rng.f32() * std::f32::consts::TAU;
            let (sin, cos) = a.sin_cos();
            // sqrt keeps the area density uniform
            let r = rng.f32().sqrt() * reach;
            let pos = arena.center + Vec2::new(cos, sin) * r;
            Body::new(pos, radius, friction, elasticity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_centred() {
        let positions = grid_cluster(Vec2::new(100.0, 50.0), 3, 20.0);
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[0], Vec2::new(40.0, -10.0));
        assert_eq!(positions[1], Vec2::new(40.0, 50.0));
        assert_eq!(positions[4], Vec2::new(100.0, 50.0));
        assert_eq!(positions[8], Vec2::new(160.0, 110.0));
    }

    #[test]
    fn large_grid_sizes_do_not_overflow() {
        let positions = grid_cluster(Vec2::zero(), 300, 1.0);
        assert_eq!(positions.len(), 90_000);
    }

    #[test]
    fn scatter_is_inside_and_repeatable() {
        let arena = RoundConstraint::new(Vec2::new(10.0, 10.0), 100.0);
        let bodies = scatter_in_arena(200, &arena, 5.0, 1.0, 0.5, 7);
        assert_eq!(bodies.len(), 200);
        assert!(bodies.iter().all(|b| arena.contains(b)));
        assert_eq!(bodies, scatter_in_arena(200, &arena, 5.0, 1.0, 0.5, 7));
    }
}
