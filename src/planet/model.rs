//! Immutable per-planet model: derived physics, biome selection and sampling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::generation::weights::{BiomeSelector, BiomeWeightCalculator, BiomeWeights, WeightedBiome};
use crate::planet::archetype::{terrain_tuning, ArchetypeTraits};
use crate::planet::config::{Archetype, PlanetConfig};
use crate::planet::physics::PhysicalProperties;
use crate::terrain::biome::BiomeVariant;
use crate::terrain::noise_provider::NoiseBank;
use crate::terrain::octave::{compose, SamplingContext, TerrainTuning};

/// Spatial frequency of the climate variation noise.
const CLIMATE_SCALE: f64 = 1.0 / 512.0;

/// Local temperature swing from climate noise before thermal buffering, deg C.
const CLIMATE_SWING: f64 = 12.0;

/// Cooling per block above sea level, deg C.
const LAPSE_RATE: f64 = 0.12;

/// Named per-coordinate fields a host can query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Temperature,
    Moisture,
    TectonicActivity,
    Erosion,
    RockExposure,
    Height,
}

impl ScalarField {
    pub const ALL: [ScalarField; 6] = [
        ScalarField::Temperature,
        ScalarField::Moisture,
        ScalarField::TectonicActivity,
        ScalarField::Erosion,
        ScalarField::RockExposure,
        ScalarField::Height,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScalarField::Temperature => "temperature",
            ScalarField::Moisture => "moisture",
            ScalarField::TectonicActivity => "tectonic_activity",
            ScalarField::Erosion => "erosion",
            ScalarField::RockExposure => "rock_exposure",
            ScalarField::Height => "height",
        }
    }
}

/// A fully derived planet. Construction validates the config first, so a
/// `PlanetModel` that exists is always complete.
pub struct PlanetModel {
    config: PlanetConfig,
    properties: PhysicalProperties,
    traits: ArchetypeTraits,
    tuning: TerrainTuning,
    selector: BiomeSelector,
    noise: NoiseBank,
}

impl fmt::Debug for PlanetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanetModel")
            .field("name", &self.config.name)
            .field("seed", &self.config.seed)
            .field("archetype", &self.archetype())
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl PlanetModel {
    pub fn new(config: PlanetConfig) -> Result<Self> {
        config.validate()?;

        let properties = PhysicalProperties::derive(&config);
        let traits = ArchetypeTraits::derive(&config, &properties);
        let tuning = terrain_tuning(&config, &properties);
        let weights = BiomeWeightCalculator::calculate(&config, &properties, &traits);
        let selector = BiomeSelector::new(weights, config.seed);
        let noise = NoiseBank::new(config.seed);

        log::info!(
            "Created {} planet '{}' (seed {}): g={:.2} m/s^2, p={:.2} atm, T={:.1} C, {} biome variants",
            config.archetype().name(),
            config.name,
            config.seed,
            properties.gravity,
            properties.atmospheric_pressure,
            properties.average_surface_temp,
            selector.weights().table().len()
        );

        Ok(Self {
            config,
            properties,
            traits,
            tuning,
            selector,
            noise,
        })
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn archetype(&self) -> Archetype {
        self.config.archetype()
    }

    pub fn properties(&self) -> &PhysicalProperties {
        &self.properties
    }

    pub fn traits(&self) -> &ArchetypeTraits {
        &self.traits
    }

    pub fn tuning(&self) -> &TerrainTuning {
        &self.tuning
    }

    pub fn noise(&self) -> &NoiseBank {
        &self.noise
    }

    pub fn biome_weights(&self) -> &BiomeWeights {
        self.selector.weights()
    }

    /// Context for evaluating octaves against this planet.
    pub fn sampling_context(&self) -> SamplingContext<'_> {
        SamplingContext {
            noise: &self.noise,
            properties: &self.properties,
            tuning: &self.tuning,
            archetype: self.archetype(),
            accumulated: 0.0,
        }
    }

    pub fn biome_entry_at(&self, x: f64, z: f64) -> &WeightedBiome {
        self.selector.select(x, z)
    }

    pub fn biome_at(&self, x: f64, z: f64) -> BiomeVariant {
        self.biome_entry_at(x, z).variant
    }

    /// Terrain height at `(x, z)`, along with the biome that shaped it.
    pub fn sample_height_and_biome(&self, x: f64, z: f64) -> (f64, BiomeVariant) {
        let entry = self.biome_entry_at(x, z);
        let height = compose(&entry.recipe, x, z, &self.sampling_context());
        if height.is_finite() {
            (height, entry.variant)
        } else {
            log::debug!("Non-finite height at ({}, {}), using sea level", x, z);
            (self.properties.sea_level as f64, entry.variant)
        }
    }

    pub fn sample_height(&self, x: f64, z: f64) -> f64 {
        self.sample_height_and_biome(x, z).0
    }

    pub fn sample_scalar_field(&self, x: f64, z: f64, field: ScalarField) -> f64 {
        let props = &self.properties;
        let (cx, cz) = (x * CLIMATE_SCALE, z * CLIMATE_SCALE);

        match field {
            ScalarField::Height => self.sample_height(x, z),
            ScalarField::Temperature => {
                let height = self.sample_height(x, z);
                let swing = CLIMATE_SWING * (1.0 - 0.6 * props.thermal_regulation);
                let altitude = (height - props.sea_level as f64).max(0.0);
                props.average_surface_temp + swing * self.noise.climate.smooth2(cx, cz) - LAPSE_RATE * altitude
            }
            ScalarField::Moisture => {
                let height = self.sample_height(x, z);
                if props.is_submerged(height) {
                    return 1.0;
                }
                let variation = self.noise.climate.smooth2(cx + 913.1, cz - 271.9);
                (self.config.humidity + 0.25 * variation).clamp(0.0, 1.0)
            }
            ScalarField::TectonicActivity => {
                let faults = self.noise.terrain.ridged2(cx * 2.0, cz * 2.0);
                (props.tectonic_activity * (0.8 + 0.2 * faults)).clamp(0.0, 1.0)
            }
            ScalarField::Erosion => props.erosion_rate,
            ScalarField::RockExposure => props.rock_exposure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PlanetError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_model_is_send_sync() {
        assert_send_sync::<PlanetModel>();
    }

    #[test]
    fn test_same_config_same_model() {
        let a = PlanetModel::new(PlanetConfig::earth_like(4242)).unwrap();
        let b = PlanetModel::new(PlanetConfig::earth_like(4242)).unwrap();

        assert_eq!(a.properties(), b.properties());
        assert_eq!(a.traits(), b.traits());
        assert_eq!(a.biome_weights().weights(), b.biome_weights().weights());
        for i in 0..200 {
            let (x, z) = (i as f64 * 13.7 - 500.0, i as f64 * 7.3 + 20.0);
            assert_eq!(a.sample_height(x, z), b.sample_height(x, z));
            assert_eq!(a.biome_at(x, z), b.biome_at(x, z));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PlanetModel::new(PlanetConfig::desert(1)).unwrap();
        let b = PlanetModel::new(PlanetConfig::desert(2)).unwrap();
        let differs = (0..50).any(|i| {
            let (x, z) = (i as f64 * 31.1 + 0.5, i as f64 * 17.9 + 0.25);
            a.sample_height(x, z) != b.sample_height(x, z)
        });
        assert!(differs);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let negative = PlanetConfig { circumference_km: -1.0, ..PlanetConfig::earth_like(1) };
        match PlanetModel::new(negative) {
            Err(PlanetError::Validation(e)) => assert_eq!(e.field(), Some("circumference_km")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let tectonic = PlanetConfig { tectonic_activity: 1.5, ..PlanetConfig::earth_like(1) };
        match PlanetModel::new(tectonic) {
            Err(PlanetError::Validation(e)) => assert_eq!(e.field(), Some("tectonic_activity")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_earth_and_moon_models() {
        let earth = PlanetModel::new(PlanetConfig::earth_like(1)).unwrap();
        let moon = PlanetModel::new(PlanetConfig::moon_like(1)).unwrap();
        assert!(earth.properties().gravity > moon.properties().gravity);
        assert_eq!(moon.properties().atmospheric_pressure, 0.0);
        assert!(!moon.properties().has_liquid);
        assert_eq!(moon.archetype(), Archetype::Rocky);
    }

    #[test]
    fn test_heights_are_finite_and_biomes_belong_to_archetype() {
        for name in ["earth", "moon", "venus", "desert", "volcanic", "oceanic"] {
            let model = PlanetModel::new(PlanetConfig::preset(name, 8).unwrap()).unwrap();
            for i in 0..100 {
                let (x, z) = (i as f64 * 97.3 - 4000.0, i as f64 * -41.9 + 1200.0);
                let (height, biome) = model.sample_height_and_biome(x, z);
                assert!(height.is_finite());
                assert_eq!(biome.archetype(), model.archetype());
            }
        }
    }

    #[test]
    fn test_scalar_fields_in_range() {
        let model = PlanetModel::new(PlanetConfig::oceanic(6)).unwrap();
        for i in 0..50 {
            let (x, z) = (i as f64 * 211.7, i as f64 * 93.1 - 800.0);
            for field in [
                ScalarField::Moisture,
                ScalarField::TectonicActivity,
                ScalarField::Erosion,
                ScalarField::RockExposure,
            ] {
                let v = model.sample_scalar_field(x, z, field);
                assert!((0.0..=1.0).contains(&v), "{} = {}", field.name(), v);
            }
            assert_eq!(model.sample_scalar_field(x, z, ScalarField::Height), model.sample_height(x, z));
        }
    }

    #[test]
    fn test_underwater_moisture_is_saturated() {
        let model = PlanetModel::new(PlanetConfig::oceanic(6)).unwrap();
        let sea = model.properties().sea_level as f64;
        let wet = (0..2000)
            .map(|i| (i as f64 * 37.7 + 0.5, i as f64 * 11.3 + 0.5))
            .find(|&(x, z)| model.sample_height(x, z) <= sea);
        if let Some((x, z)) = wet {
            assert_eq!(model.sample_scalar_field(x, z, ScalarField::Moisture), 1.0);
        }
    }

    #[test]
    fn test_temperature_tracks_planet_average() {
        let earth = PlanetModel::new(PlanetConfig::earth_like(1)).unwrap();
        let venus = PlanetModel::new(PlanetConfig::venus_like(1)).unwrap();
        let (x, z) = (120.5, -64.25);
        assert!(
            venus.sample_scalar_field(x, z, ScalarField::Temperature)
                > earth.sample_scalar_field(x, z, ScalarField::Temperature)
        );
    }

    #[test]
    fn test_debug_names_the_planet() {
        let model = PlanetModel::new(PlanetConfig::moon_like(3)).unwrap();
        let debug = format!("{:?}", model);
        assert!(debug.starts_with("PlanetModel {"));
        assert!(debug.contains("name: \"moon\""));
        assert!(debug.contains("seed: 3"));
        assert!(debug.contains("archetype: Rocky"));
    }

    #[test]
    fn test_golden_values() {
        // Earth, seed 12345: both coordinates select plains or river valley by a
        // wide margin, and the heights sit well inside their integer cell.
        let model = PlanetModel::new(PlanetConfig::earth_like(12345)).unwrap();
        assert_eq!(model.biome_at(265.0, -145.0), BiomeVariant::Plains);
        assert_eq!(model.biome_at(318.0, -174.0), BiomeVariant::Plains);
        assert_eq!(model.biome_at(1749.0, -957.0), BiomeVariant::RiverValley);

        let height = model.sample_height(265.0, -145.0);
        assert!((height - 76.662_236_277_131_41).abs() < 1e-9, "height {}", height);
        let height = model.sample_height(318.0, -174.0);
        assert!((height - 73.434_246_275_599_22).abs() < 1e-9, "height {}", height);

        let column = crate::generation::build_column(&model, 265, -145);
        assert_eq!(column.surface_height(), 76);
        assert_eq!(crate::generation::build_column(&model, 318, -174).surface_height(), 73);
    }
}
