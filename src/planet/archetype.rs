//! Archetype-specific refinement and secondary traits.

use serde::Serialize;

use crate::planet::config::{ArchetypeSettings, PlanetConfig};
use crate::planet::physics::{base_rock_exposure, unit, PhysicalProperties, EARTH_GRAVITY};
use crate::terrain::octave::TerrainTuning;

/// Secondary properties that only make sense for one archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "archetype", rename_all = "snake_case")]
pub enum ArchetypeTraits {
    Desert {
        dune_mobility: f64,
        salt_flat_potential: f64,
    },
    Oceanic {
        island_fraction: f64,
        tidal_range: f64,
    },
    Rocky {
        surface_roughness: f64,
        regolith_thickness: f64,
    },
    Temperate {
        biodiversity_index: f64,
        seasonal_swing: f64,
    },
    Volcanic {
        lava_coverage: f64,
        ash_fall: f64,
    },
}

impl ArchetypeTraits {
    /// Derive traits from the config and the final physical properties.
    pub fn derive(config: &PlanetConfig, props: &PhysicalProperties) -> Self {
        let age = config.age.factor();

        match config.archetype {
            ArchetypeSettings::Desert { rock_ratio, .. } => ArchetypeTraits::Desert {
                dune_mobility: unit((0.6 * config.wind_strength + 0.4 * (1.0 - rock_ratio)) * (1.0 - config.humidity)),
                salt_flat_potential: unit((1.0 - config.humidity) * props.rock_exposure * (1.0 - config.ocean_coverage)),
            },
            ArchetypeSettings::Oceanic { island_density, .. } => ArchetypeTraits::Oceanic {
                island_fraction: unit(island_density * (1.0 - 0.5 * config.ocean_coverage)),
                tidal_range: unit(0.3 + 0.4 * config.ocean_coverage + 0.3 * config.size_factor().min(1.0)),
            },
            ArchetypeSettings::Rocky { impact_history, regolith_depth } => ArchetypeTraits::Rocky {
                surface_roughness: unit(0.5 * config.crater_density + 0.4 * impact_history + 0.1 * age),
                regolith_thickness: unit(regolith_depth * (0.5 + 0.5 * age) + 0.2 * config.crater_density),
            },
            ArchetypeSettings::Temperate { vegetation, seasonality } => ArchetypeTraits::Temperate {
                biodiversity_index: unit(0.4 * vegetation + 0.3 * props.habitability + 0.3 * props.thermal_regulation),
                seasonal_swing: unit(seasonality * (1.0 - 0.5 * props.thermal_regulation)),
            },
            ArchetypeSettings::Volcanic { volcanism, lava_fluidity } => ArchetypeTraits::Volcanic {
                lava_coverage: unit(volcanism * (0.4 + 0.6 * lava_fluidity)),
                ash_fall: unit(volcanism * (1.0 - lava_fluidity) * (0.5 + 0.5 * config.wind_strength)),
            },
        }
    }
}

/// Archetype adjustments to the base properties. Runs before the hard overrides.
pub(crate) fn refine(props: &mut PhysicalProperties, config: &PlanetConfig) {
    match config.archetype {
        ArchetypeSettings::Desert { rock_ratio, .. } => {
            props.rock_exposure = unit(0.6 * rock_ratio + 0.4 * base_rock_exposure(config));
        }
        ArchetypeSettings::Oceanic { .. } => {
            // Large water bodies buffer temperature swings
            props.thermal_regulation = unit(props.thermal_regulation + 0.2 * config.ocean_coverage);
        }
        ArchetypeSettings::Rocky { impact_history, regolith_depth } => {
            let shattered = impact_history * (1.0 - regolith_depth);
            props.rock_exposure = unit(0.7 * props.rock_exposure + 0.3 * shattered);
        }
        ArchetypeSettings::Temperate { vegetation, .. } => {
            props.erosion_rate = unit(props.erosion_rate * (1.0 - 0.3 * vegetation));
        }
        ArchetypeSettings::Volcanic { volcanism, .. } => {
            let t = props.tectonic_activity;
            props.tectonic_activity = unit(t + 0.3 * volcanism * (1.0 - t));
            props.seismic_activity = unit(props.seismic_activity + 0.2 * volcanism);
        }
    }
}

/// Planet-wide shaping inputs for the octave pipeline.
pub fn terrain_tuning(config: &PlanetConfig, props: &PhysicalProperties) -> TerrainTuning {
    let dune_scale = match config.archetype {
        ArchetypeSettings::Desert { dune_scale, .. } => dune_scale,
        _ => 1.0,
    };

    TerrainTuning {
        relief: (EARTH_GRAVITY / props.gravity).sqrt().clamp(0.6, 1.8),
        dune_scale,
        wind_strength: config.wind_strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_match_archetype() {
        for name in ["earth", "moon", "venus", "desert", "volcanic", "oceanic"] {
            let config = PlanetConfig::preset(name, 1).unwrap();
            let props = PhysicalProperties::derive(&config);
            let traits = ArchetypeTraits::derive(&config, &props);
            let matches = matches!(
                (config.archetype, traits),
                (ArchetypeSettings::Desert { .. }, ArchetypeTraits::Desert { .. })
                    | (ArchetypeSettings::Oceanic { .. }, ArchetypeTraits::Oceanic { .. })
                    | (ArchetypeSettings::Rocky { .. }, ArchetypeTraits::Rocky { .. })
                    | (ArchetypeSettings::Temperate { .. }, ArchetypeTraits::Temperate { .. })
                    | (ArchetypeSettings::Volcanic { .. }, ArchetypeTraits::Volcanic { .. })
            );
            assert!(matches, "{} produced {:?}", name, traits);
        }
    }

    #[test]
    fn test_rocky_roughness_grows_with_craters() {
        let smooth = PlanetConfig { crater_density: 0.0, ..PlanetConfig::moon_like(1) };
        let rough = PlanetConfig { crater_density: 1.0, ..PlanetConfig::moon_like(1) };
        let roughness = |config: &PlanetConfig| match ArchetypeTraits::derive(config, &PhysicalProperties::derive(config)) {
            ArchetypeTraits::Rocky { surface_roughness, .. } => surface_roughness,
            other => panic!("unexpected traits {:?}", other),
        };
        assert!(roughness(&rough) > roughness(&smooth));
    }

    #[test]
    fn test_volcanism_raises_tectonics() {
        let config = PlanetConfig::volcanic(4);
        let props = PhysicalProperties::derive(&config);
        assert!(props.tectonic_activity >= config.tectonic_activity);
    }

    #[test]
    fn test_low_gravity_gives_taller_relief() {
        let moon = PlanetConfig::moon_like(1);
        let earth = PlanetConfig::earth_like(1);
        let moon_relief = terrain_tuning(&moon, &PhysicalProperties::derive(&moon)).relief;
        let earth_relief = terrain_tuning(&earth, &PhysicalProperties::derive(&earth)).relief;
        assert!(moon_relief > earth_relief);
        assert!((0.6..=1.8).contains(&moon_relief));
    }

    #[test]
    fn test_dune_scale_only_for_deserts() {
        let desert = PlanetConfig {
            archetype: ArchetypeSettings::Desert { rock_ratio: 0.5, dune_scale: 2.5 },
            ..PlanetConfig::desert(1)
        };
        let tuning = terrain_tuning(&desert, &PhysicalProperties::derive(&desert));
        assert_eq!(tuning.dune_scale, 2.5);

        let earth = PlanetConfig::earth_like(1);
        assert_eq!(terrain_tuning(&earth, &PhysicalProperties::derive(&earth)).dune_scale, 1.0);
    }
}
