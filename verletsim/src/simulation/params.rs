//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime settings fixed for a run:
//! - gravitational constant `g` and fixed step size `dt`,
//! - trail capacity per body,
//! - optional energy sampling interval,
//! - simulation speed multiplier used by the fixed-step accumulator

use std::num::{NonZeroU64, NonZeroUsize};

use crate::simulation::error::{SimError, SimResult};

pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 5.0;

/// Physics updates per simulated second when nothing else is configured
pub const DEFAULT_PHYSICS_FREQUENCY: f64 = 60.0;

pub const DEFAULT_TRAIL_CAPACITY: NonZeroUsize = match NonZeroUsize::new(2000) {
    Some(n) => n,
    None => panic!("trail capacity must be non-zero"),
};

/// Upper bound on stored positions per body; trails are grown on demand,
/// so this only limits how far they may grow
pub const MAX_TRAIL_CAPACITY: usize = 1_000_000;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // fixed step size
    pub trail_capacity: NonZeroUsize, // stored positions per body
    pub energy_sample_interval: Option<NonZeroU64>, // steps between drift samples
    pub speed: f64, // simulated seconds per real second
}

impl Parameters {
    /// Defaults for everything but `g` and `dt`
    pub fn new(g: f64, dt: f64) -> Self {
        Self {
            g,
            dt,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            energy_sample_interval: None,
            speed: 1.0,
        }
    }

    pub fn with_trail_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    pub fn with_energy_sample_interval(mut self, steps: NonZeroU64) -> Self {
        self.energy_sample_interval = Some(steps);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.g.is_finite() {
            return Err(SimError::InvalidGravitationalConstant(self.g));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        if self.trail_capacity.get() > MAX_TRAIL_CAPACITY {
            return Err(SimError::TrailCapacityTooLarge(self.trail_capacity.get() as f64));
        }
        validate_speed(self.speed)
    }
}

pub fn validate_speed(speed: f64) -> SimResult<()> {
    if (SPEED_MIN..=SPEED_MAX).contains(&speed) {
        Ok(())
    } else {
        Err(SimError::InvalidSpeed(speed))
    }
}
