//! Mass-weighted centroid of the body list.

use std::num::NonZeroUsize;

use crate::simulation::states::{Body, Trail};
use crate::simulation::vector::{NVec2, VectorExt};

/// Number of centroid positions kept for display
pub const CENTER_OF_MASS_TRAIL: NonZeroUsize = match NonZeroUsize::new(200) {
    Some(n) => n,
    None => panic!("trail capacity must be non-zero"),
};

#[derive(Debug, Clone)]
pub struct CenterOfMass {
    position: NVec2,
    velocity: NVec2,
    total_mass: f64,
    trail: Trail,
}

impl CenterOfMass {
    pub fn new() -> Self {
        Self {
            position: NVec2::zeros(),
            velocity: NVec2::zeros(),
            total_mass: 0.0,
            trail: Trail::new(CENTER_OF_MASS_TRAIL),
        }
    }

    pub fn position(&self) -> NVec2 {
        self.position
    }

    pub fn velocity(&self) -> NVec2 {
        self.velocity
    }

    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Recompute position and velocity without touching the trail.
    ///
    /// An empty list, or one whose masses sum to zero, yields the zero
    /// vector for both and a total mass of 0.
    pub fn recompute(&mut self, bodies: &[Body]) {
        let total_mass: f64 = bodies.iter().map(Body::mass).sum();

        if bodies.is_empty() || total_mass <= 0.0 {
            self.position = NVec2::zeros();
            self.velocity = NVec2::zeros();
            self.total_mass = 0.0;
            return;
        }

        let (weighted_x, weighted_v) = bodies.iter().fold(
            (NVec2::zeros(), NVec2::zeros()),
            |(wx, wv), b| (wx + b.position() * b.mass(), wv + b.velocity() * b.mass()),
        );

        self.position = weighted_x.divide(total_mass);
        self.velocity = weighted_v.divide(total_mass);
        self.total_mass = total_mass;
    }

    /// Recompute and record the new position in the trail; called once per step
    pub fn update(&mut self, bodies: &[Body]) {
        self.recompute(bodies);
        self.trail.push(self.position);
    }
}

impl Default for CenterOfMass {
    fn default() -> Self {
        Self::new()
    }
}
