use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use crate::error::{Result, SimError};

/// Largest grid side accepted for a spawned cluster.
pub const MAX_CLUSTER_SIZE: u32 = 64;

/// Parameters for one simulation session.
///
/// Defaults reproduce a 1920x1080 demo with a 540 px arena in the middle of
/// the screen. Y points down, so gravity is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sub-steps per frame.
    pub sub_steps: u32,
    /// Gravity vector, applied without mass scaling.
    pub gravity: [f32; 2],
    /// Whether gravity starts switched on.
    pub gravity_enabled: bool,
    pub arena_center: [f32; 2],
    pub arena_radius: f32,
    /// Frame time assumed for the frame before the first one.
    pub initial_frame_dt: f32,
    /// Peak pull of the pointer attractor; falls off linearly with distance.
    pub attractor_strength: f32,
    /// Friction given to spawned bodies.
    pub friction: f32,
    /// Elasticity given to spawned bodies.
    pub elasticity: f32,
    /// Side length of a spawned cluster grid.
    pub cluster_size: u32,
    pub cluster_radius: f32,
    pub ball_radius: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sub_steps: 6,
            gravity: [0.0, 250.0],
            gravity_enabled: false,
            arena_center: [960.0, 540.0],
            arena_radius: 540.0,
            initial_frame_dt: 1.0 / 60.0,
            attractor_strength: 1500.0,
            friction: 0.999,
            elasticity: 0.5,
            cluster_size: 3,
            cluster_radius: 20.0,
            ball_radius: 40.0,
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON config. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity[0], self.gravity[1])
    }

    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_center[0], self.arena_center[1])
    }

    pub fn validate(&self) -> Result<()> {
        if self.sub_steps == 0 {
            return Err(SimError::ZeroSubSteps);
        }
        if !(self.arena_radius.is_finite() && self.arena_radius > 0.0) {
            return Err(SimError::InvalidArena(self.arena_radius));
        }
        let finite = [
            ("gravity", self.gravity[0], self.gravity[1]),
            ("arena_center", self.arena_center[0], self.arena_center[1]),
            ("attractor_strength", self.attractor_strength, 0.0),
            ("friction", self.friction, 0.0),
            ("elasticity", self.elasticity, 0.0),
        ];
        for (name, x, y) in finite {
            if !(x.is_finite() && y.is_finite()) {
                return Err(SimError::NonFinite(name));
            }
        }
        if !(self.initial_frame_dt.is_finite() && self.initial_frame_dt >= 0.0) {
            return Err(SimError::InvalidTimestep(self.initial_frame_dt));
        }
        if !(1..=MAX_CLUSTER_SIZE).contains(&self.cluster_size) {
            return Err(SimError::InvalidClusterSize(self.cluster_size));
        }
        for radius in [self.cluster_radius, self.ball_radius] {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(SimError::InvalidRadius(radius));
            }
            if radius >= self.arena_radius {
                return Err(SimError::BodyDoesNotFit {
                    radius,
                    arena_radius: self.arena_radius,
                });
            }
        }
        Ok(())
    }
}
