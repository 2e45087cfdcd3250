//! Planetforge - procedural planetary terrain synthesis
//!
//! A [`PlanetConfig`] of physical sliders is validated and derived into an
//! immutable [`PlanetModel`]: physical properties, archetype traits and biome
//! weights. The model answers height and scalar-field queries at any world
//! coordinate and builds vertical material columns for a host.
//!
//! ```
//! use planetforge::{build_column, create_model, sample_height, PlanetConfig};
//!
//! let model = create_model(PlanetConfig::earth_like(42)).unwrap();
//! let height = sample_height(&model, 128.5, -40.25);
//! let column = build_column(&model, 128, -40);
//! assert!(height.is_finite());
//! assert!(column.material_at(column.surface_height()).is_some());
//! ```

pub mod core;
pub mod planet;
pub mod terrain;
pub mod generation;

pub use crate::core::{PlanetError, ValidationError};
pub use generation::{
    build_column, create_model, sample_height, sample_scalar_field, ColumnWriter, GenerationConfig,
    GenerationPipeline, MaterialId, MaterialResolver, Slot, TerrainColumn,
};
pub use planet::{Archetype, ArchetypeSettings, ModelState, PlanetConfig, PlanetModel, PlanetRegistry, ScalarField};
