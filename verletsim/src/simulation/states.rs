//! Core state types for the N-body simulation.
//!
//! - `Body`  a point mass carrying the two-point position history that
//!   position Verlet needs (current and previous position)
//! - `Trail` a bounded, chronologically ordered record of recent positions
//!
//! Velocity is a byproduct of the integration, never primary state: it is
//! seeded at construction and afterwards only rewritten by [`Body::advance`].

use std::collections::vec_deque::{self, VecDeque};
use std::num::NonZeroUsize;

use crate::simulation::error::{SimError, SimResult};
use crate::simulation::vector::{NVec2, VectorExt};

/// Most-recent-N positions, oldest evicted first.
///
/// Storage grows with the points actually pushed, not with `capacity`.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<NVec2>,
    capacity: NonZeroUsize,
}

impl Trail {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// Append a point, dropping the oldest once the bound is exceeded
    pub fn push(&mut self, point: NVec2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity.get() {
            self.points.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> vec_deque::Iter<'_, NVec2> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&NVec2> {
        self.points.back()
    }

    /// The last `n` points (or fewer), oldest first; what a renderer shows
    /// when its display length is shorter than the stored history
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &NVec2> {
        self.points.iter().skip(self.points.len().saturating_sub(n))
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = &'a NVec2;
    type IntoIter = vec_deque::Iter<'a, NVec2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    x: NVec2,      // position
    x_prev: NVec2, // position one step ago (Verlet history)
    v: NVec2,      // velocity, derived
    m: f64,        // mass
    radius: f64,   // minimum-distance floor and display size
    trail: Trail,
}

impl Body {
    /// Build a body and seed its Verlet history.
    ///
    /// The previous position is taken as `x - v * dt0`. This treats the
    /// initial velocity as a backward difference over one step, a first order
    /// approximation of the true history that only affects the first step.
    pub fn new(
        m: f64,
        x: NVec2,
        v: NVec2,
        radius: f64,
        dt0: f64,
        trail_capacity: NonZeroUsize,
    ) -> SimResult<Self> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidMass(m));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        if !(x.x.is_finite() && x.y.is_finite()) {
            return Err(SimError::NonFiniteVector { what: "position", x: x.x, y: x.y });
        }
        if !(v.x.is_finite() && v.y.is_finite()) {
            return Err(SimError::NonFiniteVector { what: "velocity", x: v.x, y: v.y });
        }
        if !(dt0.is_finite() && dt0 > 0.0) {
            return Err(SimError::InvalidTimestep(dt0));
        }

        Ok(Self {
            x,
            x_prev: x - v * dt0,
            v,
            m,
            radius,
            trail: Trail::new(trail_capacity),
        })
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn previous_position(&self) -> NVec2 {
        self.x_prev
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.magnitude_squared()
    }

    /// Advance one fixed step with position Verlet:
    ///
    /// x_n+1 = 2 x_n - x_n-1 + a dt^2
    /// v_n   = (x_n+1 - x_n-1) / (2 dt)
    ///
    /// `force` must be the net force computed from the positions of *all*
    /// bodies before any of them moved this step.
    pub fn advance(&mut self, force: NVec2, dt: f64) {
        let a = force / self.m; // a_n = F_n / m

        // x_n+1 = 2 x_n - x_n-1 + a_n dt^2
        let x_new = 2.0 * self.x - self.x_prev + a * (dt * dt);

        // Central difference over the two-step window
        // v_n = (x_n+1 - x_n-1) / (2 dt)
        if dt > 0.0 {
            self.v = (x_new - self.x_prev).divide(2.0 * dt);
        }

        // Shift the history: x_n-1 <- x_n, x_n <- x_n+1
        self.x_prev = self.x;
        self.x = x_new;

        self.trail.push(x_new);
    }
}
