//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constant and numerical settings
//! - [`DriverConfig`]     – how the headless driver emulates a render loop
//! - [`BodyConfig`]       – initial state for each explicitly listed body
//! - [`TriangleConfig`]   – optional three-body equilateral preset
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 1.0                    # gravitational constant (derived from the triangle if omitted)
//!   physics_frequency: 1000.0 # fixed steps per simulated second
//!   trail_length: 50          # displayed trail points; 10x that are stored per body
//!   energy_sample_interval: 100
//!
//! driver:
//!   fps: 60.0
//!   speed: 1.0                # 0.1 ..= 5.0
//!   duration: 10.0            # seconds of real time to emulate
//!
//! bodies:
//!   - x: [ -0.5, 0.0 ]
//!     v: [  0.0, -0.70710678 ]
//!     m: 1.0
//!     radius: 0.01            # defaults to sqrt(m * pi)
//!   - x: [  0.5, 0.0 ]
//!     v: [  0.0, 0.70710678 ]
//!     m: 1.0
//!     radius: 0.01
//! ```
//!
//! The engine maps this configuration into its runtime types in
//! [`Scenario::build_scenario`](crate::simulation::scenario::Scenario::build_scenario).

use std::io::Read;

use serde::Deserialize;

fn default_physics_frequency() -> f64 {
    crate::simulation::params::DEFAULT_PHYSICS_FREQUENCY
}

fn default_fps() -> f64 {
    60.0
}

fn default_speed() -> f64 {
    1.0
}

fn default_duration() -> f64 {
    10.0
}

/// Global physical and numerical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    #[serde(rename = "G", default)]
    pub g: Option<f64>, // gravitational constant
    #[serde(default = "default_physics_frequency")]
    pub physics_frequency: f64, // Hz, fixed dt = 1 / physics_frequency
    #[serde(default)]
    pub trail_length: Option<usize>, // displayed trail points; storage is 10x this
    #[serde(default)]
    pub energy_sample_interval: Option<u64>, // steps between recorded drift samples
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: None,
            physics_frequency: default_physics_frequency(),
            trail_length: None,
            energy_sample_interval: None,
        }
    }
}

/// Settings for the emulated render loop that drives the accumulator
#[derive(Deserialize, Debug, Clone)]
pub struct DriverConfig {
    #[serde(default = "default_fps")]
    pub fps: f64, // frames per real second
    #[serde(default = "default_speed")]
    pub speed: f64, // simulation speed multiplier
    #[serde(default = "default_duration")]
    pub duration: f64, // real seconds to run
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            speed: default_speed(),
            duration: default_duration(),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    pub v: [f64; 2], // initial velocity
    pub m: f64, // mass
    #[serde(default)]
    pub radius: Option<f64>, // minimum-distance floor; derived from mass when omitted
}

/// Three bodies on the corners of an equilateral triangle, moving
/// tangentially around `center`
#[derive(Deserialize, Debug, Clone)]
pub struct TriangleConfig {
    pub masses: [f64; 3],
    pub separation: f64, // circumradius is separation / 2
    pub initial_speed: f64, // tangential speed scale
    #[serde(default)]
    pub center: [f64; 2],
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub triangle: Option<TriangleConfig>, // preset bodies, inserted before `bodies`
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_scenario_with_defaults() {
        let cfg = ScenarioConfig::from_yaml_str(
            "parameters:\n  G: 2.5\nbodies:\n  - x: [1.0, 2.0]\n    v: [0.0, -1.0]\n    m: 3.0\n",
        )
        .unwrap();

        assert_eq!(cfg.parameters.g, Some(2.5));
        assert_eq!(cfg.parameters.physics_frequency, 60.0);
        assert!(cfg.parameters.trail_length.is_none());
        assert_eq!(cfg.driver.fps, 60.0);
        assert_eq!(cfg.driver.speed, 1.0);
        assert!(cfg.triangle.is_none());
        assert_eq!(cfg.bodies.len(), 1);
        assert_eq!(cfg.bodies[0].x, [1.0, 2.0]);
        assert!(cfg.bodies[0].radius.is_none());
    }

    #[test]
    fn parses_triangle_preset() {
        let cfg = ScenarioConfig::from_yaml_str(
            "triangle:\n  masses: [20000, 40, 40]\n  separation: 2000\n  initial_speed: 3000\n",
        )
        .unwrap();

        let tri = cfg.triangle.unwrap();
        assert_eq!(tri.masses, [20000.0, 40.0, 40.0]);
        assert_eq!(tri.center, [0.0, 0.0]);
        assert!(cfg.bodies.is_empty());
    }

    #[test]
    fn rejects_unknown_parameter_keys() {
        let err = ScenarioConfig::from_yaml_str("parameters:\n  G: 1.0\n  trail_capacity: 300\n");
        assert!(err.is_err());

        let cfg = ScenarioConfig::from_yaml_str("parameters:\n  G: 1.0\n  trail_length: 300\n").unwrap();
        assert_eq!(cfg.parameters.trail_length, Some(300));
    }

    #[test]
    fn rejects_wrong_vector_length() {
        let err = ScenarioConfig::from_yaml_str("bodies:\n  - x: [1.0]\n    v: [0.0, 0.0]\n    m: 1.0\n");
        assert!(err.is_err());
    }
}
