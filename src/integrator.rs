use std::f32::consts::{PI, TAU};

use ultraviolet::Vec2;

use crate::body::Body;

/// Advances `body` by one sub-step of length `dt`.
///
/// `dt0` is the previous sub-step length. Frame time varies, so the carried
/// velocity is rescaled by the ratio of the two steps and the acceleration
/// term uses `dt * average(dt, dt0)` instead of `dt²`. The `sub_steps` terms
/// damp the correction when the steps get very small.
pub fn integrate(body: &mut Body, dt: f32, dt0: f32, sub_steps: u32) {
    let n = sub_steps as f32;
    body.last_pos = body.pos;

    let dt_average = (dt + dt0) * 0.5;
    let dt_ratio = (dt + n - dt_average) / (dt0 + n - dt_average);
    let scaled_vel = body.vel * dt_ratio;
    let scaled_acc = body.acc * (dt * dt_average);

    body.pos += scaled_vel;
    body.pos += scaled_acc;

    body.vel = body.pos - body.last_pos;
    body.acc = Vec2::zero();

    if body.radius > 0.0 {
        update_angle(body, dt, dt0, sub_steps);
    }
}

/// Applies the current rotation, rescaled by the same step ratio, and
/// refreshes the orientation marker.
pub fn update_angle(body: &mut Body, dt: f32, dt0: f32, sub_steps: u32) {
    let n = sub_steps as f32;
    body.last_angle = body.angle;
    body.rotation *= (dt + n) / (dt0 + n);
    body.angle = wrap_angle(body.angle + body.rotation);

    let arm = body.radius - 1.0;
    body.angle_normal.x = (2.0 * body.angle).cos() * arm;
    body.angle_normal.y = (-2.0 * body.angle).sin() * arm;
}

/// Wraps `angle` into (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        return angle;
    };
    if wrapped > PI || wrapped <= -PI {
        // more than a full turn in one step
        let r = (angle + PI).rem_euclid(TAU) - PI;
        return if r <= -PI { r + TAU } else { r };
    }
    wrapped
}
