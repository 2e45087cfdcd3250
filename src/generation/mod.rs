//! Column generation: biome weighting, material layering and the pipeline
//! that ties registered planets to hosts.
//!
//! The pipeline orchestrates:
//! 1. Planet lookup in the shared registry (absent planets give flat fallback columns)
//! 2. Height sampling through the selected biome's octave recipe
//! 3. Material layering via the host's `MaterialResolver`

pub mod config;
pub mod weights;
pub mod material;
pub mod column;

pub use config::{GenerationConfig, VerticalRange, MAX_CHUNK_SIZE};
pub use weights::{BiomeSelector, BiomeWeightCalculator, BiomeWeights, WeightedBiome};
pub use material::{materials, ColumnWriter, DefaultMaterials, MaterialId, MaterialResolver, MaterialRole};
pub use column::{Slot, TerrainColumn, TerrainColumnBuilder};

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::core::Result;
use crate::planet::{PlanetConfig, PlanetModel, PlanetRegistry, ScalarField};

/// Validate a config and derive its model.
pub fn create_model(config: PlanetConfig) -> Result<PlanetModel> {
    PlanetModel::new(config)
}

pub fn sample_height(model: &PlanetModel, x: f64, z: f64) -> f64 {
    model.sample_height(x, z)
}

pub fn sample_scalar_field(model: &PlanetModel, x: f64, z: f64, field: ScalarField) -> f64 {
    model.sample_scalar_field(x, z, field)
}

/// Build a column with the built-in material palette and default vertical range.
pub fn build_column(model: &PlanetModel, x: i32, z: i32) -> TerrainColumn {
    TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::default()).build(Some(model), x, z)
}

/// Owns the planet registry and builds columns for named planets.
pub struct GenerationPipeline {
    registry: PlanetRegistry,
    resolver: Box<dyn MaterialResolver>,
    config: GenerationConfig,
}

impl Default for GenerationPipeline {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}

impl GenerationPipeline {
    /// Create a pipeline using the built-in material palette.
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_resolver(config, Box::new(DefaultMaterials))
    }

    pub fn with_resolver(config: GenerationConfig, resolver: Box<dyn MaterialResolver>) -> Self {
        Self {
            registry: PlanetRegistry::new(),
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn registry(&self) -> &PlanetRegistry {
        &self.registry
    }

    /// Register a new planet. Fails if the name is taken.
    pub fn create_planet(&self, config: PlanetConfig) -> Result<Arc<PlanetModel>> {
        self.registry.register(config)
    }

    fn builder(&self) -> TerrainColumnBuilder<'_> {
        TerrainColumnBuilder::new(self.resolver.as_ref(), self.config.vertical_range)
    }

    /// Column at `(x, z)` on the named planet; flat fallback when the planet is unknown.
    pub fn build_column(&self, planet: &str, x: i32, z: i32) -> TerrainColumn {
        let state = self.registry.lookup(planet);
        if !state.is_ready() {
            log::debug!("Planet '{}' not registered, building fallback column", planet);
        }
        self.builder().build(state.model(), x, z)
    }

    /// Height at `(x, z)`, or `None` when the planet is unknown.
    pub fn height_at(&self, planet: &str, x: f64, z: f64) -> Option<f64> {
        self.registry.lookup(planet).model().map(|model| model.sample_height(x, z))
    }

    /// Every column of chunk `(cx, cz)`, row-major in z then x.
    pub fn generate_chunk_columns(&self, planet: &str, cx: i32, cz: i32) -> Vec<TerrainColumn> {
        let start = Instant::now();
        let size = self.config.effective_chunk_size();
        // Chunks at the edge of i32 space repeat the last column instead of wrapping
        let (origin_x, origin_z) = (cx.saturating_mul(size), cz.saturating_mul(size));

        let state = self.registry.lookup(planet);
        let model = state.model();
        let builder = self.builder();

        let columns: Vec<TerrainColumn> = (0..size * size)
            .into_par_iter()
            .map(|i| {
                let x = origin_x.saturating_add(i % size);
                let z = origin_z.saturating_add(i / size);
                builder.build(model, x, z)
            })
            .collect();

        log::info!(
            "Generated chunk ({}, {}) of '{}': {} columns in {:.1}ms{}",
            cx,
            cz,
            planet,
            columns.len(),
            start.elapsed().as_secs_f64() * 1000.0,
            if model.is_some() { "" } else { " (fallback)" }
        );

        columns
    }
}
