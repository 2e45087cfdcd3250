//! Planet configuration, physics derivation and the shared model registry

pub mod config;
pub use config::{Archetype, ArchetypeSettings, CrustType, PlanetAge, PlanetConfig};

pub mod physics;
pub use physics::PhysicalProperties;

pub mod archetype;
pub use archetype::ArchetypeTraits;

pub mod model;
pub use model::{PlanetModel, ScalarField};

pub mod registry;
pub use registry::{ModelState, PlanetRegistry};
