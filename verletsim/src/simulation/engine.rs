//! The simulation object handed to drivers and renderers.
//!
//! `Simulation` owns the body list, the force set, and the diagnostics. It is
//! built once, populated with bodies, then stepped at a fixed `dt`. Readers
//! borrow it immutably between steps, so a renderer can never observe a
//! half-advanced state.

use tracing::{debug, warn};

use crate::simulation::center_of_mass::CenterOfMass;
use crate::simulation::energy::EnergyTracker;
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::forces::{ForceSet, GravitySolver};
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::params::{validate_speed, Parameters};
use crate::simulation::states::Body;
use crate::simulation::vector::NVec2;

pub struct Simulation {
    parameters: Parameters,
    bodies: Vec<Body>,
    forces: ForceSet,
    center_of_mass: CenterOfMass,
    energy: EnergyTracker,
    scratch: Vec<NVec2>,
    accumulated_time: f64, // real time not yet consumed by a fixed step
    t: f64, // simulated time
    steps: u64,
    paused: bool,
}

impl Simulation {
    /// Empty simulation with Newtonian gravity as its only force term
    pub fn new(parameters: Parameters) -> SimResult<Self> {
        parameters.validate()?;

        let forces = ForceSet::new().with(GravitySolver::new(parameters.g));
        let energy = EnergyTracker::new(parameters.g);

        Ok(Self {
            parameters,
            bodies: Vec::new(),
            forces,
            center_of_mass: CenterOfMass::new(),
            energy,
            scratch: Vec::new(),
            accumulated_time: 0.0,
            t: 0.0,
            steps: 0,
            paused: false,
        })
    }

    /// Add a body before the first step. Insertion order is kept and fixes
    /// the summation order of forces and energies.
    pub fn add_body(
        &mut self,
        mass: f64,
        position: NVec2,
        velocity: NVec2,
        radius: f64,
    ) -> SimResult<&Body> {
        if self.steps > 0 {
            return Err(SimError::BodiesFrozen { steps: self.steps });
        }

        let body = Body::new(
            mass,
            position,
            velocity,
            radius,
            self.parameters.dt,
            self.parameters.trail_capacity,
        )?;
        debug!(
            index = self.bodies.len(),
            mass,
            radius,
            x = position.x,
            y = position.y,
            "Added body"
        );
        self.bodies.push(body);
        self.center_of_mass.recompute(&self.bodies);

        let last = self.bodies.len() - 1;
        Ok(&self.bodies[last])
    }

    /// Advance exactly one fixed physics tick.
    ///
    /// `dt` is expected to be the configured step; Verlet's error behavior
    /// and drift comparisons assume it never changes.
    pub fn step(&mut self, dt: f64) {
        if (dt - self.parameters.dt).abs() > self.parameters.dt * 1e-9 {
            warn!(
                dt,
                configured = self.parameters.dt,
                "Step size differs from the configured fixed timestep"
            );
        }

        verlet_integrator(
            &mut self.bodies,
            &self.forces,
            &mut self.center_of_mass,
            &mut self.scratch,
            dt,
        );

        self.t += dt;
        self.steps += 1;

        if let Some(every) = self.parameters.energy_sample_interval {
            if self.steps % every.get() == 0 {
                self.energy.record(&self.bodies);
            }
        }
    }

    /// Feed real elapsed time into the fixed-step accumulator.
    ///
    /// `frame_dt` is scaled by the speed multiplier; as many fixed steps as
    /// fit are taken and the remainder is carried to the next call. Returns
    /// the number of steps taken. Does nothing while paused.
    pub fn advance(&mut self, frame_dt: f64) -> usize {
        if self.paused || !(frame_dt.is_finite() && frame_dt > 0.0) {
            return 0;
        }

        let dt = self.parameters.dt;
        self.accumulated_time += frame_dt * self.parameters.speed;

        let mut taken = 0;
        while self.accumulated_time >= dt {
            self.step(dt);
            self.accumulated_time -= dt;
            taken += 1;
        }
        taken
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn center_of_mass(&self) -> &CenterOfMass {
        &self.center_of_mass
    }

    /// Energy drift in percent; the first call latches the baseline
    pub fn energy_drift_percent(&mut self) -> f64 {
        self.energy.drift_percent(&self.bodies)
    }

    pub fn total_energy(&self) -> f64 {
        self.energy.total_energy(&self.bodies)
    }

    pub fn energy(&self) -> &EnergyTracker {
        &self.energy
    }

    /// Net force per body for the current positions, without stepping
    pub fn forces(&self) -> Vec<NVec2> {
        self.forces.compute_forces(&self.bodies)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    pub fn set_speed(&mut self, speed: f64) -> SimResult<()> {
        validate_speed(speed)?;
        self.parameters.speed = speed;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
