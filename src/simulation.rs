use crate::{
    body::Body,
    collision::{pair_mut, resolve_pair_collision},
    config::SimulationConfig,
    constraint::RoundConstraint,
    error::{Result, SimError},
    forces::ExternalForce,
    integrator::integrate,
    utils,
};

use ultraviolet::Vec2;

/// Owns the bodies of one session and advances them frame by frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Session parameters.
    config: SimulationConfig,
    /// Circular arena every body is kept inside.
    boundary: RoundConstraint,
    /// All bodies, in the order they are processed each sub-step.
    bodies: Vec<Body>,
    /// Ad-hoc forces applied to every body each sub-step.
    forces: Vec<ExternalForce>,
    gravity_enabled: bool,
    /// Pointer the attractor pulls towards, if it is switched on.
    attractor: Option<Vec2>,
    /// Length of the previous frame.
    last_frame_dt: f32,
    /// Frames stepped so far.
    frame: usize,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_valid_config(SimulationConfig::default())
    }
}

impl Simulation {
    /// Creates an empty simulation after validating `config`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimulationConfig) -> Self {
        let boundary = RoundConstraint::new(config.arena_center(), config.arena_radius);
        log::info!(
            "simulation created: arena r={} at {:?}, {} sub-steps",
            boundary.radius,
            boundary.center,
            config.sub_steps
        );
        Self {
            boundary,
            bodies: Vec::new(),
            forces: Vec::new(),
            gravity_enabled: config.gravity_enabled,
            attractor: None,
            last_frame_dt: config.initial_frame_dt,
            frame: 0,
            config,
        }
    }

    /// Removes every body and restarts frame timing.
    pub fn reset(&mut self) {
        log::info!("simulation reset, dropping {} bodies", self.bodies.len());
        self.bodies.clear();
        self.last_frame_dt = self.config.initial_frame_dt;
        self.frame = 0;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn boundary(&self) -> RoundConstraint {
        self.boundary
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn last_frame_dt(&self) -> f32 {
        self.last_frame_dt
    }

    /// Adds a body with the configured friction and elasticity.
    /// Returns its index.
    pub fn add_body(&mut self, pos: Vec2, radius: f32) -> Result<usize> {
        self.add_body_with(pos, radius, self.config.friction, self.config.elasticity)
    }

    /// Adds a body with explicit material coefficients. Returns its index.
    ///
    /// A radius of zero adds a point. The body must fit inside the arena.
    pub fn add_body_with(
        &mut self,
        pos: Vec2,
        radius: f32,
        friction: f32,
        elasticity: f32,
    ) -> Result<usize> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        if !self.boundary.fits(radius) {
            return Err(SimError::BodyDoesNotFit {
                radius,
                arena_radius: self.boundary.radius,
            });
        }
        if !(pos.x.is_finite() && pos.y.is_finite()) {
            return Err(SimError::NonFinite("position"));
        }
        if !(friction.is_finite() && elasticity.is_finite()) {
            return Err(SimError::NonFinite("material coefficients"));
        }

        self.bodies.push(Body::new(pos, radius, friction, elasticity));
        Ok(self.bodies.len() - 1)
    }

    /// Spawns a square grid of small balls centred on `center`.
    /// Returns the index range of the new bodies.
    pub fn spawn_cluster(&mut self, center: Vec2) -> Result<std::ops::Range<usize>> {
        let radius = self.config.cluster_radius;
        let start = self.bodies.len();
        let positions = utils::grid_cluster(center, self.config.cluster_size, radius);
        self.bodies.reserve(positions.len());
        for pos in positions {
            self.add_body(pos, radius)?;
        }
        log::debug!("spawned cluster of {} at {:?}", self.bodies.len() - start, center);
        Ok(start..self.bodies.len())
    }

    /// Spawns one large ball at `center`.
    pub fn spawn_ball(&mut self, center: Vec2) -> Result<usize> {
        let index = self.add_body(center, self.config.ball_radius)?;
        log::debug!("spawned ball #{} at {:?}", index, center);
        Ok(index)
    }

    /// Adds `n` cluster-sized bodies scattered over the arena, placed
    /// deterministically from `seed`. Returns the index range of the new bodies.
    pub fn scatter(&mut self, n: usize, seed: u64) -> std::ops::Range<usize> {
        let start = self.bodies.len();
        self.bodies.extend(utils::scatter_in_arena(
            n,
            &self.boundary,
            self.config.cluster_radius,
            self.config.friction,
            self.config.elasticity,
            seed,
        ));
        log::debug!("scattered {} bodies with seed {}", n, seed);
        start..self.bodies.len()
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    pub fn toggle_gravity(&mut self) -> bool {
        self.gravity_enabled = !self.gravity_enabled;
        log::debug!("gravity {}", if self.gravity_enabled { "on" } else { "off" });
        self.gravity_enabled
    }

    pub fn attractor(&self) -> Option<Vec2> {
        self.attractor
    }

    /// Points the attractor at `target`, or switches it off with `None`.
    pub fn set_attractor(&mut self, target: Option<Vec2>) {
        self.attractor = target;
    }

    /// Switches the attractor on at `pointer`, or off if it was on.
    pub fn toggle_attractor(&mut self, pointer: Vec2) -> bool {
        self.attractor = match self.attractor {
            Some(_) => None,
            None => Some(pointer),
        };
        log::debug!("attractor {:?}", self.attractor);
        self.attractor.is_some()
    }

    pub fn add_force(&mut self, force: ExternalForce) {
        self.forces.push(force);
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    /// Advances one frame of length `frame_dt`, using the stored length of
    /// the previous frame.
    pub fn step(&mut self, frame_dt: f32) -> Result<()> {
        self.step_with(frame_dt, self.last_frame_dt)
    }

    /// Advances one frame of length `frame_dt` after a frame of length
    /// `previous_frame_dt`.
    ///
    /// The frame is split into equal sub-steps. Within each sub-step every
    /// body in index order gets its forces, is pushed out of every other
    /// body, is kept in the arena and is then integrated. Later bodies see
    /// the corrections already made to earlier ones, and each overlapping
    /// pair is resolved from both sides.
    pub fn step_with(&mut self, frame_dt: f32, previous_frame_dt: f32) -> Result<()> {
        for dt in [frame_dt, previous_frame_dt] {
            if !(dt.is_finite() && dt >= 0.0) {
                return Err(SimError::InvalidTimestep(dt));
            }
        }

        let sub_steps = self.config.sub_steps;
        let sub_dt = frame_dt / sub_steps as f32;
        let sub_dt0 = previous_frame_dt / sub_steps as f32;
        let gravity = self.gravity_enabled.then(|| self.config.gravity());
        let attractor = self.attractor.map(|target| ExternalForce::Attractor {
            target,
            strength: self.config.attractor_strength,
        });

        for _ in 0..sub_steps {
            for i in 0..self.bodies.len() {
                let body = &mut self.bodies[i];
                if let Some(gravity) = gravity {
                    body.apply_gravity(gravity);
                }
                if let Some(attractor) = &attractor {
                    attractor.apply(body);
                }
                for force in &self.forces {
                    force.apply(body);
                }

                self.collide(i);

                let body = &mut self.bodies[i];
                self.boundary.apply(body);
                integrate(body, sub_dt, sub_dt0, sub_steps);
            }
        }

        self.last_frame_dt = frame_dt;
        self.frame += 1;
        log::trace!("frame {} stepped, dt={}", self.frame, frame_dt);
        Ok(())
    }

    /// Resolves body `i` against every other body, in index order.
    fn collide(&mut self, i: usize) {
        for j in 0..self.bodies.len() {
            if i == j {
                continue;
            }
            let (a, b) = pair_mut(&mut self.bodies, i, j);
            resolve_pair_collision(a, b);
        }
    }
}
