//! Biome weighting and coordinate-to-biome selection.
//!
//! Each archetype variant gets a gate (hard eligibility) and a weight formula
//! over the planet's sliders and derived properties. Eligible weights are
//! floored so no declared variant becomes unreachable. Selection maps a
//! low-frequency, uniformly distributed noise value onto the cumulative
//! weight table, so each variant covers its weight share of the surface and
//! neighbouring coordinates stay in the same biome.

use crate::planet::{Archetype, ArchetypeSettings, ArchetypeTraits, PhysicalProperties, PlanetConfig};
use crate::terrain::biome::BiomeVariant;
use crate::terrain::noise_provider::{UniformNoise, SELECTOR_SALT};
use crate::terrain::octave::OctaveConfiguration;

/// Floor applied to every eligible variant's weight.
pub const MIN_VARIANT_WEIGHT: f64 = 0.05;

/// Spatial frequency of the selection noise (biomes span a few hundred blocks).
pub const SELECTOR_SCALE: f64 = 1.0 / 384.0;

/// One eligible entry of the cumulative selection table.
#[derive(Clone, Debug)]
pub struct WeightedBiome {
    pub variant: BiomeVariant,
    pub weight: f64,
    /// Running sum of weights up to and including this entry
    pub cumulative: f64,
    /// Octave layers, filtered to those the archetype supports
    pub recipe: Vec<OctaveConfiguration>,
}

/// Weights of every declared variant of one archetype.
#[derive(Clone, Debug)]
pub struct BiomeWeights {
    archetype: Archetype,
    /// Every declared variant, zero when gated out
    weights: Vec<(BiomeVariant, f64)>,
    table: Vec<WeightedBiome>,
    total: f64,
    injected_default: bool,
}

impl BiomeWeights {
    /// Build from raw gate results in declaration order. `None` means the
    /// gate failed; non-finite weights are treated the same way.
    pub(crate) fn from_raw(archetype: Archetype, raw: Vec<(BiomeVariant, Option<f64>)>) -> Self {
        let mut weights: Vec<(BiomeVariant, f64)> = raw
            .into_iter()
            .map(|(variant, weight)| {
                let weight = match weight {
                    Some(w) if w.is_finite() => w.max(MIN_VARIANT_WEIGHT),
                    _ => 0.0,
                };
                (variant, weight)
            })
            .collect();

        let mut injected_default = false;
        if weights.iter().all(|&(_, w)| w <= 0.0) {
            let default = archetype.default_variant();
            log::warn!(
                "No eligible {} biome variant, injecting default '{}'",
                archetype.name(),
                default.name()
            );
            match weights.iter_mut().find(|(v, _)| *v == default) {
                Some(entry) => entry.1 = 1.0,
                None => weights.insert(0, (default, 1.0)),
            }
            injected_default = true;
        }

        let mut total = 0.0;
        let mut table = Vec::new();
        for &(variant, weight) in &weights {
            if weight <= 0.0 {
                continue;
            }
            total += weight;
            table.push(WeightedBiome {
                variant,
                weight,
                cumulative: total,
                recipe: supported_recipe(archetype, variant),
            });
        }

        Self {
            archetype,
            weights,
            table,
            total,
            injected_default,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Sum of all eligible weights. Always strictly positive.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Weight of a variant, zero when gated out or foreign to this archetype.
    pub fn weight_of(&self, variant: BiomeVariant) -> f64 {
        self.weights
            .iter()
            .find(|(v, _)| *v == variant)
            .map_or(0.0, |&(_, w)| w)
    }

    /// Every declared variant with its weight, in declaration order.
    pub fn weights(&self) -> &[(BiomeVariant, f64)] {
        &self.weights
    }

    /// Eligible entries in cumulative order.
    pub fn table(&self) -> &[WeightedBiome] {
        &self.table
    }

    /// Whether the default variant had to be injected.
    pub fn injected_default(&self) -> bool {
        self.injected_default
    }

    /// First entry whose cumulative weight reaches `target`.
    pub fn select_target(&self, target: f64) -> &WeightedBiome {
        let last = self.table.len() - 1;
        let idx = self
            .table
            .iter()
            .position(|entry| entry.cumulative >= target)
            .unwrap_or(last);
        &self.table[idx]
    }
}

/// Recipe with any layers the archetype cannot use removed.
fn supported_recipe(archetype: Archetype, variant: BiomeVariant) -> Vec<OctaveConfiguration> {
    variant
        .recipe()
        .into_iter()
        .filter(|cfg| {
            let supported = cfg.kind().supports(archetype);
            if !supported {
                log::warn!(
                    "Dropping {} octave from '{}': not supported by {} planets",
                    cfg.kind().name(),
                    variant.name(),
                    archetype.name()
                );
            }
            supported
        })
        .collect()
}

/// Computes variant weights from a planet's config and derived state.
pub struct BiomeWeightCalculator;

impl BiomeWeightCalculator {
    pub fn calculate(config: &PlanetConfig, props: &PhysicalProperties, traits: &ArchetypeTraits) -> BiomeWeights {
        let archetype = config.archetype();
        let raw = archetype
            .variants()
            .iter()
            .map(|&variant| (variant, raw_weight(variant, config, props, traits)))
            .collect();

        let weights = BiomeWeights::from_raw(archetype, raw);
        log::debug!(
            "Biome weights for '{}': {:?} (total {:.3})",
            config.name,
            weights.weights(),
            weights.total_weight()
        );
        weights
    }
}

/// Gate and weight for one variant. `None` when the gate fails.
fn raw_weight(
    variant: BiomeVariant,
    config: &PlanetConfig,
    props: &PhysicalProperties,
    traits: &ArchetypeTraits,
) -> Option<f64> {
    let humidity = config.humidity;
    let wind = config.wind_strength;
    let crater = config.crater_density;
    let ocean = config.ocean_coverage;
    let age = config.age.factor();
    let rock = props.rock_exposure;
    let erosion = props.erosion_rate;
    let tectonic = props.tectonic_activity;
    let loose = if props.loose_material { 1.0 } else { 0.0 };

    let gate = |open: bool, weight: f64| open.then_some(weight);

    match variant {
        BiomeVariant::DuneSea => {
            let mobility = match *traits {
                ArchetypeTraits::Desert { dune_mobility, .. } => dune_mobility,
                _ => wind,
            };
            Some(0.3 + 0.5 * loose + 0.2 * mobility)
        }
        BiomeVariant::Mesa => gate(rock > 0.2, 0.7 * rock + 0.3 * tectonic),
        BiomeVariant::Canyon => gate(erosion > 0.15, 0.6 * erosion + 0.4 * age),
        BiomeVariant::SaltFlat => gate(
            humidity < 0.15 && rock > 0.3,
            0.5 * (0.15 - humidity) / 0.15 + 0.3 * rock,
        ),
        BiomeVariant::WindScoured => gate(wind > 0.3, 0.6 * wind),

        BiomeVariant::DeepOcean => Some(0.4 + 0.6 * ocean),
        BiomeVariant::Archipelago => {
            let (density, fraction) = match (config.archetype, *traits) {
                (ArchetypeSettings::Oceanic { island_density, .. }, ArchetypeTraits::Oceanic { island_fraction, .. }) => {
                    (island_density, island_fraction)
                }
                _ => (0.0, 0.0),
            };
            gate(density > 0.1, fraction * (0.5 + 0.5 * tectonic))
        }
        BiomeVariant::Shelf => Some(0.3 * (1.0 - ocean) + 0.1),
        BiomeVariant::Reef => {
            let reef = match config.archetype {
                ArchetypeSettings::Oceanic { reef_growth, .. } => reef_growth,
                _ => 0.0,
            };
            gate(reef > 0.2 && props.average_surface_temp > 15.0, 0.5 * reef)
        }

        BiomeVariant::Maria => Some(0.3 + 0.3 * (1.0 - crater)),
        BiomeVariant::Highlands => Some(0.2 + 0.4 * age),
        BiomeVariant::CraterField => gate(crater > 0.2, 0.8 * crater),
        BiomeVariant::Rille => gate(tectonic > 0.1, 0.5 * tectonic),

        BiomeVariant::Plains => Some(0.3 + 0.3 * (1.0 - tectonic)),
        BiomeVariant::Hills => Some(0.2 + 0.3 * erosion),
        BiomeVariant::Mountains => gate(tectonic > 0.25, 0.6 * tectonic),
        BiomeVariant::RiverValley => gate(humidity > 0.4, 0.4 * humidity),

        BiomeVariant::BasaltPlains => Some(0.3 + 0.2 * age),
        BiomeVariant::LavaField => match (config.archetype, *traits) {
            (ArchetypeSettings::Volcanic { volcanism, .. }, ArchetypeTraits::Volcanic { lava_coverage, .. }) => {
                gate(volcanism > 0.3, 0.7 * lava_coverage)
            }
            _ => None,
        },
        BiomeVariant::Caldera => gate(tectonic > 0.4, 0.5 * tectonic),
        BiomeVariant::AshWaste => {
            let ash = match *traits {
                ArchetypeTraits::Volcanic { ash_fall, .. } => ash_fall,
                _ => 0.0,
            };
            gate(wind > 0.2, 0.4 * wind + 0.3 * ash)
        }
    }
}

/// Maps world coordinates to a weighted biome entry.
pub struct BiomeSelector {
    weights: BiomeWeights,
    noise: UniformNoise,
    scale: f64,
}

impl BiomeSelector {
    pub fn new(weights: BiomeWeights, seed: u64) -> Self {
        Self {
            weights,
            noise: UniformNoise::with_salt(seed, SELECTOR_SALT),
            scale: SELECTOR_SCALE,
        }
    }

    pub fn weights(&self) -> &BiomeWeights {
        &self.weights
    }

    /// Selection value in [0, 1) at `(x, z)`.
    pub fn selection_value(&self, x: f64, z: f64) -> f64 {
        self.noise.unit2(x * self.scale, z * self.scale)
    }

    pub fn select(&self, x: f64, z: f64) -> &WeightedBiome {
        let target = self.selection_value(x, z) * self.weights.total_weight();
        self.weights.select_target(target)
    }
}
