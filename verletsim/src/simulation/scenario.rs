//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - driver settings for the emulated render loop (`DriverSettings`)
//! - a populated `Simulation` (parameters, bodies, gravity)
//!
//! Initial conditions are a setup concern and live here, not in the engine:
//! the triangle preset and the circular binary helper only produce
//! [`BodySpec`]s that are then fed through `Simulation::add_body`.

use std::f64::consts::PI;
use std::num::{NonZeroU64, NonZeroUsize};

use tracing::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig, TriangleConfig};
use crate::simulation::engine::Simulation;
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::params::{Parameters, DEFAULT_TRAIL_CAPACITY, MAX_TRAIL_CAPACITY};
use crate::simulation::vector::NVec2;

/// Stored trail points per displayed trail point
pub const TRAIL_STORAGE_FACTOR: usize = 10;

/// Displayed trail length before speed is taken into account
const BASE_TRAIL_LENGTH: f64 = 200.0;

/// Initial state of one body, before validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub mass: f64,
    pub position: NVec2,
    pub velocity: NVec2,
    pub radius: f64,
}

impl From<&BodyConfig> for BodySpec {
    fn from(bc: &BodyConfig) -> Self {
        Self {
            mass: bc.m,
            position: NVec2::new(bc.x[0], bc.x[1]),
            velocity: NVec2::new(bc.v[0], bc.v[1]),
            radius: bc.radius.unwrap_or_else(|| radius_for_mass(bc.m)),
        }
    }
}

/// Stored capacity for a trail that displays `length` points
pub fn trail_capacity_for_length(length: usize) -> SimResult<NonZeroUsize> {
    let stored = length
        .checked_mul(TRAIL_STORAGE_FACTOR)
        .ok_or(SimError::TrailCapacityTooLarge(length as f64 * TRAIL_STORAGE_FACTOR as f64))?;
    if stored > MAX_TRAIL_CAPACITY {
        return Err(SimError::TrailCapacityTooLarge(stored as f64));
    }
    NonZeroUsize::new(stored).ok_or(SimError::InvalidTrailCapacity)
}

/// Default displayed trail length for a triangle preset: 200 + 2 * |speed|.
/// Computed in f64 so oversized speeds are rejected instead of saturating.
fn triangle_trail_capacity(initial_speed: f64) -> SimResult<NonZeroUsize> {
    let display = (BASE_TRAIL_LENGTH + initial_speed.abs() * 2.0).floor();
    let stored = display * TRAIL_STORAGE_FACTOR as f64;
    if !stored.is_finite() || stored > MAX_TRAIL_CAPACITY as f64 {
        return Err(SimError::TrailCapacityTooLarge(stored));
    }
    trail_capacity_for_length(display as usize)
}

/// Radius of a disc of unit surface density: r = sqrt(m * pi)
pub fn radius_for_mass(mass: f64) -> f64 {
    (mass * PI).sqrt()
}

/// Reduced-mass style characteristic mass of a three-body system:
/// (m1 m2 + m2 m3 + m1 m3) / (m1 + m2 + m3)
pub fn characteristic_mass(masses: [f64; 3]) -> f64 {
    let [m1, m2, m3] = masses;
    (m1 * m2 + m2 * m3 + m1 * m3) / (m1 + m2 + m3)
}

/// G that makes `speed` the circular speed at `separation` for the
/// characteristic mass (two-body estimate v^2 = G M / r)
pub fn derived_gravitational_constant(masses: [f64; 3], separation: f64, speed: f64) -> f64 {
    speed * speed * separation / characteristic_mass(masses)
}

/// Equilateral triangle preset.
///
/// Body k sits at angle 2 pi k / 3 on a circle of radius `separation / 2`
/// around `center` and moves tangentially (counter-clockwise) with speed
/// `initial_speed * m_j * m_k / M^2`, where j, k are the two other bodies
/// and M is the total mass.
pub fn triangle_bodies(cfg: &TriangleConfig) -> [BodySpec; 3] {
    let masses = cfg.masses;
    let total: f64 = masses.iter().sum();
    let circumradius = cfg.separation / 2.0;
    let center = NVec2::new(cfg.center[0], cfg.center[1]);

    std::array::from_fn(|k| {
        let angle = 2.0 * PI * k as f64 / 3.0;
        let (sin, cos) = angle.sin_cos();
        let others = masses[(k + 1) % 3] * masses[(k + 2) % 3];
        let speed = cfg.initial_speed * others / (total * total);

        BodySpec {
            mass: masses[k],
            position: center + NVec2::new(cos, sin) * circumradius,
            velocity: NVec2::new(-sin, cos) * speed,
            radius: radius_for_mass(masses[k]),
        }
    })
}

/// Two bodies on a circular orbit about their common center of mass at
/// the origin, separated along x and orbiting counter-clockwise.
///
/// Relative speed satisfies v^2 = G (m1 + m2) / r; each body gets the share
/// that leaves the total momentum at zero. Radii are left at zero.
pub fn circular_binary(m1: f64, m2: f64, separation: f64, g: f64) -> [BodySpec; 2] {
    let total = m1 + m2;
    let v_rel = (g * total / separation).sqrt();

    [
        BodySpec {
            mass: m1,
            position: NVec2::new(-separation * m2 / total, 0.0),
            velocity: NVec2::new(0.0, -v_rel * m2 / total),
            radius: 0.0,
        },
        BodySpec {
            mass: m2,
            position: NVec2::new(separation * m1 / total, 0.0),
            velocity: NVec2::new(0.0, v_rel * m1 / total),
            radius: 0.0,
        },
    ]
}

/// Period of a circular two-body orbit: 2 pi sqrt(r^3 / (G M))
pub fn circular_period(m1: f64, m2: f64, separation: f64, g: f64) -> f64 {
    2.0 * PI * (separation.powi(3) / (g * (m1 + m2))).sqrt()
}

/// How the headless driver feeds time into the simulation
#[derive(Debug, Clone, Copy)]
pub struct DriverSettings {
    pub fps: f64,
    pub duration: f64,
}

impl DriverSettings {
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.fps
    }

    pub fn frames(&self) -> u64 {
        (self.duration * self.fps).round() as u64
    }
}

/// A fully-initialized scenario: driver settings plus a populated simulation
pub struct Scenario {
    pub driver: DriverSettings,
    pub simulation: Simulation,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let p_cfg = &cfg.parameters;

        // Gravitational constant: explicit, or derived from the triangle preset
        let g = match (p_cfg.g, &cfg.triangle) {
            (Some(g), _) => g,
            (None, Some(tri)) => {
                derived_gravitational_constant(tri.masses, tri.separation, tri.initial_speed)
            }
            (None, None) => return Err(SimError::MissingGravitationalConstant),
        };

        let dt = 1.0 / p_cfg.physics_frequency;

        // Trail capacity: explicit display length, or scaled with the preset's speed
        let trail_capacity = match (p_cfg.trail_length, &cfg.triangle) {
            (Some(n), _) => trail_capacity_for_length(n)?,
            (None, Some(tri)) => triangle_trail_capacity(tri.initial_speed)?,
            (None, None) => DEFAULT_TRAIL_CAPACITY,
        };

        let mut parameters = Parameters::new(g, dt)
            .with_trail_capacity(trail_capacity)
            .with_speed(cfg.driver.speed);
        if let Some(n) = p_cfg.energy_sample_interval {
            let n = NonZeroU64::new(n).ok_or(SimError::InvalidSampleInterval)?;
            parameters = parameters.with_energy_sample_interval(n);
        }

        let d_cfg = &cfg.driver;
        if !(d_cfg.fps.is_finite() && d_cfg.fps > 0.0) {
            return Err(SimError::InvalidFrameRate(d_cfg.fps));
        }
        if !(d_cfg.duration.is_finite() && d_cfg.duration >= 0.0) {
            return Err(SimError::InvalidDuration(d_cfg.duration));
        }
        let driver = DriverSettings {
            fps: d_cfg.fps,
            duration: d_cfg.duration,
        };

        let mut simulation = Simulation::new(parameters)?;

        // Preset bodies first, then the explicit list, in file order
        let preset = cfg.triangle.as_ref().map(triangle_bodies);
        let specs = preset
            .iter()
            .flatten()
            .copied()
            .chain(cfg.bodies.iter().map(BodySpec::from));

        for spec in specs {
            simulation.add_body(spec.mass, spec.position, spec.velocity, spec.radius)?;
        }

        debug!(
            bodies = simulation.bodies().len(),
            g,
            dt,
            trail_capacity = trail_capacity.get(),
            "Built scenario"
        );

        Ok(Self { driver, simulation })
    }
}
