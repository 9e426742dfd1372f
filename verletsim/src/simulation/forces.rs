//! Force contributors for the n-body engine
//!
//! Defines the [`Force`] trait, the [`ForceSet`] that sums contributions per
//! body, and [`GravitySolver`], direct pairwise Newtonian gravity with a
//! minimum-distance clamp.

use crate::simulation::states::Body;
use crate::simulation::vector::{NVec2, VectorExt};

/// Trait for force sources operating on the body list.
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn accumulate(&self, bodies: &[Body], out: &mut [NVec2]);
}

/// Collection of force terms. Their contributions are summed into a single
/// net force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `out[i]` is overwritten with the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[Body], out: &mut [NVec2]) {
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.accumulate(bodies, out);
        }
    }

    /// Net force per body, in body order
    pub fn compute_forces(&self, bodies: &[Body]) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); bodies.len()];
        self.accumulate_forces(bodies, &mut out);
        out
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct O(n^2) Newtonian gravity.
///
/// Separations at or below the sum of the two radii are clamped to that sum,
/// which bounds the force near contact. This is softening only; bodies pass
/// through each other.
#[derive(Debug, Clone, Copy)]
pub struct GravitySolver {
    pub g: f64, // gravitational constant
}

impl GravitySolver {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// |x_j - x_i|^2, floored at (r_i + r_j)^2
    pub fn clamped_distance_squared(bi: &Body, bj: &Body) -> f64 {
        let r2 = bi.position().distance_squared_to(&bj.position()); // |x_j - x_i|^2
        let min_distance = bi.radius() + bj.radius(); // contact distance r_i + r_j
        let min_distance2 = min_distance * min_distance;

        // d^2 = max(|r|^2, (r_i + r_j)^2)
        if r2 <= min_distance2 {
            min_distance2
        } else {
            r2
        }
    }

    /// G m_i m_j / d^2 with the clamped distance
    pub fn force_magnitude(&self, bi: &Body, bj: &Body) -> f64 {
        self.g * bi.mass() * bj.mass() / Self::clamped_distance_squared(bi, bj)
    }

    /// Force on `bi` due to `bj` (pointing from i toward j).
    /// The force on `bj` is the exact negation.
    ///
    /// Coincident bodies have no direction and get the zero vector.
    pub fn pair_force(&self, bi: &Body, bj: &Body) -> NVec2 {
        // r is the displacement vector from i to j
        let r = bj.position() - bi.position();
        if r.magnitude() > 0.0 {
            // F_ij = G m_i m_j / d^2 * r_hat
            r.normalize_or_zero() * self.force_magnitude(bi, bj)
        } else {
            // x_i == x_j, r_hat undefined
            NVec2::zeros()
        }
    }

    /// Net gravitational force per body, same order as `bodies`
    pub fn compute_forces(&self, bodies: &[Body]) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); bodies.len()];
        self.accumulate(bodies, &mut out);
        out
    }
}

impl Force for GravitySolver {
    fn accumulate(&self, bodies: &[Body], out: &mut [NVec2]) {
        let n = bodies.len();

        // Each unordered pair once; i feels +f, j feels -f
        for i in 0..n {
            for j in (i + 1)..n {
                // f = F_ij, the pull on i toward j
                let f = self.pair_force(&bodies[i], &bodies[j]);

                out[i] += f; // F_i += F_ij
                out[j] -= f; // F_j += F_ji = -F_ij, Newton's third law
            }
        }
    }
}
