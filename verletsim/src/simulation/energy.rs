//! Mechanical energy of the system and its drift from a latched baseline.
//!
//! Drift is a diagnostic only. Nothing here feeds back into integration.

use std::collections::VecDeque;

use crate::simulation::states::Body;

/// Baselines with a smaller magnitude make the percentage meaningless
const BASELINE_EPSILON: f64 = 1e-10;

/// Default number of drift samples kept for plotting
pub const DRIFT_HISTORY_LEN: usize = 200;

/// sum 0.5 m |v|^2
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// sum over pairs of -G m_i m_j / r
///
/// Pairs at or inside their minimum distance (r_i + r_j) are skipped, the
/// same floor the gravity clamp uses.
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let n = bodies.len();
    let mut u = 0.0;

    for i in 0..n {
        let bi = &bodies[i];
        for j in (i + 1)..n {
            let bj = &bodies[j];
            let r = (bj.position() - bi.position()).magnitude();
            if r > bi.radius() + bj.radius() {
                u -= g * bi.mass() * bj.mass() / r;
            }
        }
    }
    u
}

pub fn total_energy(bodies: &[Body], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// One-shot baseline latch plus a bounded history of drift samples
#[derive(Debug, Clone)]
pub struct EnergyTracker {
    g: f64,
    baseline: Option<f64>,
    history: VecDeque<f64>,
    history_len: usize,
}

impl EnergyTracker {
    pub fn new(g: f64) -> Self {
        Self::with_history_len(g, DRIFT_HISTORY_LEN)
    }

    pub fn with_history_len(g: f64, history_len: usize) -> Self {
        Self {
            g,
            baseline: None,
            history: VecDeque::with_capacity(history_len),
            history_len,
        }
    }

    pub fn total_energy(&self, bodies: &[Body]) -> f64 {
        total_energy(bodies, self.g)
    }

    /// `None` until the first drift query
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Percent deviation of the current energy from the baseline.
    ///
    /// The first call latches the baseline and returns 0.
    pub fn drift_percent(&mut self, bodies: &[Body]) -> f64 {
        let current = self.total_energy(bodies);

        let Some(baseline) = self.baseline else {
            self.baseline = Some(current);
            return 0.0;
        };

        if baseline.abs() > BASELINE_EPSILON {
            (current - baseline) / baseline * 100.0
        } else {
            0.0
        }
    }

    /// Sample the drift and keep it in the history
    pub fn record(&mut self, bodies: &[Body]) -> f64 {
        let drift = self.drift_percent(bodies);
        if self.history_len > 0 {
            self.history.push_back(drift);
            while self.history.len() > self.history_len {
                self.history.pop_front();
            }
        }
        drift
    }

    /// Recorded drift samples, oldest first
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// Largest |drift| currently in the history
    pub fn max_abs_drift(&self) -> f64 {
        self.history.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()))
    }
}
