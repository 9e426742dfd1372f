pub mod simulation;
pub mod configuration;

pub use simulation::vector::{NVec2, VectorExt};
pub use simulation::error::{SimError, SimResult};
pub use simulation::states::{Body, Trail};
pub use simulation::params::Parameters;
pub use simulation::forces::{Force, ForceSet, GravitySolver};
pub use simulation::integrator::verlet_integrator;
pub use simulation::energy::{EnergyTracker, kinetic_energy, potential_energy, total_energy};
pub use simulation::center_of_mass::CenterOfMass;
pub use simulation::engine::Simulation;
pub use simulation::scenario::{Scenario, BodySpec, DriverSettings, circular_binary, triangle_bodies};

pub use configuration::config::{ParametersConfig, DriverConfig, BodyConfig, TriangleConfig, ScenarioConfig};
