pub mod vector;
pub mod error;
pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod energy;
pub mod center_of_mass;
pub mod engine;
pub mod scenario;
