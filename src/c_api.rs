use std::ffi::{CStr, c_char};

use crate::{
    body::Body,
    config::SimulationConfig,
    constraint::RoundConstraint,
    simulation::Simulation,
};
use ultraviolet::Vec2;

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Create() -> *mut Simulation {
    Box::into_raw(Box::new(Simulation::default()))
}

/// Creates a simulation from a NUL-terminated JSON config.
/// Returns null if the config cannot be read or is invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CreateFromJson(json: *const c_char) -> *mut Simulation {
    if json.is_null() {
        log::warn!("Simulation_CreateFromJson: null config");
        return std::ptr::null_mut();
    }
    let json = match unsafe { CStr::from_ptr(json) }.to_str() {
        Ok(json) => json,
        Err(err) => {
            log::warn!("Simulation_CreateFromJson: config is not UTF-8: {err}");
            return std::ptr::null_mut();
        }
    };
    match SimulationConfig::from_json_str(json).and_then(Simulation::new) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            log::warn!("Simulation_CreateFromJson: {err}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Advances one frame of `dt` seconds. Returns false if `dt` was rejected.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation, dt: f32) -> bool {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    match sim.step(dt) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Simulation_Step: {err}");
            false
        }
    }
}

/// Clears the simulation and scatters `n` fresh bodies over the arena.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut Simulation, n: usize, seed: u64) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.reset();
        sim.scatter(n, seed);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.len())
}

/// Pointer to the first of `Simulation_GetBodyCount` bodies. Invalidated by
/// any call that adds bodies.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodies(handle: *const Simulation) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.bodies().as_ptr())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetArena(handle: *const Simulation) -> RoundConstraint {
    unsafe { handle.as_ref() }.map_or(RoundConstraint::new(Vec2::zero(), 0.0), |sim| sim.boundary())
}

/// Adds one body. Returns its index, or -1 if it was rejected.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddBody(
    handle: *mut Simulation,
    x: f32,
    y: f32,
    radius: f32,
    friction: f32,
    elasticity: f32,
) -> isize {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match sim.add_body_with(Vec2::new(x, y), radius, friction, elasticity) {
        Ok(index) => index as isize,
        Err(err) => {
            log::warn!("Simulation_AddBody: {err}");
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SpawnCluster(handle: *mut Simulation, x: f32, y: f32) -> bool {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    match sim.spawn_cluster(Vec2::new(x, y)) {
        Ok(_) => true,
        Err(err) => {
            log::warn!("Simulation_SpawnCluster: {err}");
            false
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SpawnBall(handle: *mut Simulation, x: f32, y: f32) -> isize {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match sim.spawn_ball(Vec2::new(x, y)) {
        Ok(index) => index as isize,
        Err(err) => {
            log::warn!("Simulation_SpawnBall: {err}");
            -1
        }
    }
}

/// Returns whether gravity is on after the toggle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_ToggleGravity(handle: *mut Simulation) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|sim| sim.toggle_gravity())
}

/// Moves the pointer attractor to (`x`, `y`), switching it on.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetAttractor(handle: *mut Simulation, x: f32, y: f32) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_attractor(Some(Vec2::new(x, y)));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_ClearAttractor(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_attractor(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn lifecycle_through_c_surface() {
        unsafe {
            let sim = Simulation_Create();
            assert!(Simulation_SpawnCluster(sim, 960.0, 540.0));
            assert_eq!(Simulation_SpawnBall(sim, 960.0, 300.0), 9);
            assert_eq!(Simulation_AddBody(sim, 960.0, 540.0, 1000.0, 1.0, 1.0), -1);
            assert!(Simulation_ToggleGravity(sim));
            assert!(Simulation_Step(sim, 1.0 / 60.0));
            assert!(!Simulation_Step(sim, -1.0));

            let count = Simulation_GetBodyCount(sim);
            assert_eq!(count, 10);
            let bodies = std::slice::from_raw_parts(Simulation_GetBodies(sim), count);
            assert!(bodies.iter().all(|b| b.pos.x.is_finite() && b.pos.y.is_finite()));

            Simulation_Reset(sim, 25, 1);
            assert_eq!(Simulation_GetBodyCount(sim), 25);
            Simulation_Destroy(sim);
        }
    }

    #[test]
    fn null_handles_are_ignored() {
        unsafe {
            let null = std::ptr::null_mut();
            assert!(!Simulation_Step(null, 0.01));
            assert_eq!(Simulation_GetBodyCount(null), 0);
            assert!(Simulation_GetBodies(null).is_null());
            assert!(!Simulation_ToggleGravity(null));
            Simulation_Destroy(null);
        }
    }

    #[test]
    fn json_config_is_validated() {
        unsafe {
            let good = CString::new(r#"{ "arena_radius": 300.0 }"#).unwrap();
            let sim = Simulation_CreateFromJson(good.as_ptr());
            assert!(!sim.is_null());
            assert_eq!(Simulation_GetArena(sim).radius, 300.0);
            Simulation_Destroy(sim);

            let bad = CString::new(r#"{ "sub_steps": 0 }"#).unwrap();
            assert!(Simulation_CreateFromJson(bad.as_ptr()).is_null());
        }
    }
}
