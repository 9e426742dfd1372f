//! Fixed-step position Verlet integrator
//!
//! One step is split into phases so that every force is computed from the
//! same snapshot of positions:
//! 1. evaluate the net force on every body (read only)
//! 2. advance every body with its force (write)
//! 3. recompute the center of mass from the advanced state

use super::center_of_mass::CenterOfMass;
use super::forces::ForceSet;
use super::states::Body;
use super::vector::NVec2;

/// Advance all bodies by one step of size `dt`.
///
/// `scratch` is reused between calls to hold the per-body forces; its
/// previous contents are ignored.
pub fn verlet_integrator(
    bodies: &mut [Body],
    forces: &ForceSet,
    center_of_mass: &mut CenterOfMass,
    scratch: &mut Vec<NVec2>,
    dt: f64,
) {
    let n = bodies.len();
    if n == 0 { // no bodies, nothing moves
        center_of_mass.update(bodies);
        return;
    }

    // One force slot per body; contents are overwritten below
    scratch.resize(n, NVec2::zeros());

    // F_n[i] from the positions x_n of every body, before anything moves
    forces.accumulate_forces(bodies, scratch);

    // For each body and its force F_n:
    // a_n = F_n / m
    // x_n+1 = 2 x_n - x_n-1 + a_n dt^2
    // v_n = (x_n+1 - x_n-1) / (2 dt)
    for (b, f) in bodies.iter_mut().zip(scratch.iter()) {
        b.advance(*f, dt);
    }

    // R_n+1 = sum(m_i x_i) / M from the advanced positions
    center_of_mass.update(bodies);
}
