//! Error types for building and configuring a simulation.
//!
//! Degenerate geometry (coincident bodies, separations inside the clamp) is
//! never an error; it is absorbed by the force clamp. Only invalid setup is
//! reported here.

use thiserror::Error;

/// Errors raised while constructing bodies or configuring a [`Simulation`].
///
/// [`Simulation`]: crate::simulation::engine::Simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Body mass must be strictly positive and finite.
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f64),

    /// Body radius must be non-negative and finite.
    #[error("Invalid radius: {0} (must be finite and >= 0)")]
    InvalidRadius(f64),

    /// A position or velocity component is NaN or infinite.
    #[error("Non-finite {what}: ({x}, {y})")]
    NonFiniteVector {
        what: &'static str,
        x: f64,
        y: f64,
    },

    /// Fixed timestep must be strictly positive and finite.
    #[error("Invalid timestep: {0} (must be finite and > 0)")]
    InvalidTimestep(f64),

    /// Gravitational constant must be finite.
    #[error("Invalid gravitational constant: {0}")]
    InvalidGravitationalConstant(f64),

    /// No gravitational constant was given and none could be derived.
    #[error("Gravitational constant missing (set parameters.G or use a triangle preset)")]
    MissingGravitationalConstant,

    /// Trail capacity of zero was requested.
    #[error("Invalid trail capacity: 0 (must be at least 1)")]
    InvalidTrailCapacity,

    /// Trail capacity above the storage ceiling, or not representable.
    #[error("Trail capacity too large: {0} (must be at most {max})", max = crate::simulation::params::MAX_TRAIL_CAPACITY)]
    TrailCapacityTooLarge(f64),

    /// Energy sampling interval of zero was requested.
    #[error("Invalid energy sample interval: 0 (must be at least 1 step)")]
    InvalidSampleInterval,

    /// Simulation speed multiplier outside the supported range.
    #[error("Invalid simulation speed: {0} (must be between {min} and {max})", min = crate::simulation::params::SPEED_MIN, max = crate::simulation::params::SPEED_MAX)]
    InvalidSpeed(f64),

    /// Driver frame rate must be strictly positive and finite.
    #[error("Invalid frame rate: {0} (must be finite and > 0)")]
    InvalidFrameRate(f64),

    /// Driver run length must be non-negative and finite.
    #[error("Invalid duration: {0} (must be finite and >= 0)")]
    InvalidDuration(f64),

    /// Bodies can only be added before the first step.
    #[error("Cannot add bodies after stepping has started ({steps} steps taken)")]
    BodiesFrozen { steps: u64 },
}

/// Result type for simulation setup.
pub type SimResult<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidMass(-1.0);
        assert!(format!("{err}").contains("-1"));

        let err = SimError::BodiesFrozen { steps: 3 };
        assert_eq!(
            format!("{err}"),
            "Cannot add bodies after stepping has started (3 steps taken)"
        );

        let err = SimError::TrailCapacityTooLarge(2.0e6);
        assert!(format!("{err}").contains("1000000"));

        let err = SimError::InvalidSpeed(9.0);
        let msg = format!("{err}");
        assert!(msg.contains("0.1") && msg.contains('5'));
    }
}
