//! Biome variants and their terrain recipes.
//!
//! Each archetype declares an ordered list of variants. The first variant in
//! the list is the archetype's default, injected when no other variant is
//! eligible. A variant's look is pure data: an ordered list of octave
//! configurations.

use serde::{Deserialize, Serialize};

use crate::planet::Archetype;
use crate::terrain::octave::{OctaveConfiguration, OctaveKind};

/// Biome variants, grouped by archetype in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeVariant {
    // Desert
    DuneSea,
    Mesa,
    Canyon,
    SaltFlat,
    WindScoured,
    // Oceanic
    DeepOcean,
    Archipelago,
    Shelf,
    Reef,
    // Rocky
    Maria,
    Highlands,
    CraterField,
    Rille,
    // Temperate
    Plains,
    Hills,
    Mountains,
    RiverValley,
    // Volcanic
    BasaltPlains,
    LavaField,
    Caldera,
    AshWaste,
}

const DESERT_VARIANTS: [BiomeVariant; 5] = [
    BiomeVariant::DuneSea,
    BiomeVariant::Mesa,
    BiomeVariant::Canyon,
    BiomeVariant::SaltFlat,
    BiomeVariant::WindScoured,
];

const OCEANIC_VARIANTS: [BiomeVariant; 4] = [
    BiomeVariant::DeepOcean,
    BiomeVariant::Archipelago,
    BiomeVariant::Shelf,
    BiomeVariant::Reef,
];

const ROCKY_VARIANTS: [BiomeVariant; 4] = [
    BiomeVariant::Maria,
    BiomeVariant::Highlands,
    BiomeVariant::CraterField,
    BiomeVariant::Rille,
];

const TEMPERATE_VARIANTS: [BiomeVariant; 4] = [
    BiomeVariant::Plains,
    BiomeVariant::Hills,
    BiomeVariant::Mountains,
    BiomeVariant::RiverValley,
];

const VOLCANIC_VARIANTS: [BiomeVariant; 4] = [
    BiomeVariant::BasaltPlains,
    BiomeVariant::LavaField,
    BiomeVariant::Caldera,
    BiomeVariant::AshWaste,
];

impl Archetype {
    /// Biome variants in declaration (cumulative selection) order.
    pub fn variants(self) -> &'static [BiomeVariant] {
        match self {
            Archetype::Desert => &DESERT_VARIANTS,
            Archetype::Oceanic => &OCEANIC_VARIANTS,
            Archetype::Rocky => &ROCKY_VARIANTS,
            Archetype::Temperate => &TEMPERATE_VARIANTS,
            Archetype::Volcanic => &VOLCANIC_VARIANTS,
        }
    }

    /// Variant used when no other variant is eligible.
    pub fn default_variant(self) -> BiomeVariant {
        self.variants()[0]
    }
}

fn layer(kind: OctaveKind) -> OctaveConfiguration {
    OctaveConfiguration::new(kind)
}

impl BiomeVariant {
    pub fn archetype(self) -> Archetype {
        match self {
            BiomeVariant::DuneSea
            | BiomeVariant::Mesa
            | BiomeVariant::Canyon
            | BiomeVariant::SaltFlat
            | BiomeVariant::WindScoured => Archetype::Desert,
            BiomeVariant::DeepOcean
            | BiomeVariant::Archipelago
            | BiomeVariant::Shelf
            | BiomeVariant::Reef => Archetype::Oceanic,
            BiomeVariant::Maria
            | BiomeVariant::Highlands
            | BiomeVariant::CraterField
            | BiomeVariant::Rille => Archetype::Rocky,
            BiomeVariant::Plains
            | BiomeVariant::Hills
            | BiomeVariant::Mountains
            | BiomeVariant::RiverValley => Archetype::Temperate,
            BiomeVariant::BasaltPlains
            | BiomeVariant::LavaField
            | BiomeVariant::Caldera
            | BiomeVariant::AshWaste => Archetype::Volcanic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BiomeVariant::DuneSea => "dune_sea",
            BiomeVariant::Mesa => "mesa",
            BiomeVariant::Canyon => "canyon",
            BiomeVariant::SaltFlat => "salt_flat",
            BiomeVariant::WindScoured => "wind_scoured",
            BiomeVariant::DeepOcean => "deep_ocean",
            BiomeVariant::Archipelago => "archipelago",
            BiomeVariant::Shelf => "shelf",
            BiomeVariant::Reef => "reef",
            BiomeVariant::Maria => "maria",
            BiomeVariant::Highlands => "highlands",
            BiomeVariant::CraterField => "crater_field",
            BiomeVariant::Rille => "rille",
            BiomeVariant::Plains => "plains",
            BiomeVariant::Hills => "hills",
            BiomeVariant::Mountains => "mountains",
            BiomeVariant::RiverValley => "river_valley",
            BiomeVariant::BasaltPlains => "basalt_plains",
            BiomeVariant::LavaField => "lava_field",
            BiomeVariant::Caldera => "caldera",
            BiomeVariant::AshWaste => "ash_waste",
        }
    }

    /// Ordered octave layers defining this variant's terrain.
    pub fn recipe(self) -> Vec<OctaveConfiguration> {
        use OctaveKind::*;

        match self {
            BiomeVariant::DuneSea => vec![
                layer(Foundation).with("base", 72.0).with("amplitude", 10.0),
                layer(Dune).with("height", 14.0),
                layer(WindErosion).with("depth", 5.0).with("deposition", 0.6),
                layer(Detail).with("amplitude", 0.8),
            ],
            BiomeVariant::Mesa => vec![
                layer(Foundation).with("base", 70.0).with("amplitude", 8.0),
                layer(Mesa).with("height", 28.0).with("threshold", 0.2),
                layer(WindErosion).with("depth", 6.0),
                layer(Detail).with("amplitude", 1.2),
            ],
            BiomeVariant::Canyon => vec![
                layer(Foundation).with("base", 84.0).with("amplitude", 6.0),
                layer(Canyon).with("depth", 36.0).with("width", 0.12),
                layer(Detail),
            ],
            BiomeVariant::SaltFlat => vec![
                layer(Foundation).with("base", 66.0).with("amplitude", 1.5).with("frequency", 0.002),
                layer(Detail).with("amplitude", 0.3).with("crystalline", true),
            ],
            BiomeVariant::WindScoured => vec![
                layer(Foundation).with("base", 74.0).with("amplitude", 12.0),
                layer(WindErosion)
                    .with("depth", 10.0)
                    .with("elevated_penalty", 6.0)
                    .with("height_threshold", 78.0),
                layer(Detail).with("amplitude", 1.5),
            ],
            BiomeVariant::DeepOcean => vec![
                layer(Foundation).with("base", 34.0).with("amplitude", 12.0),
                layer(RollingTerrain).with("amplitude", 4.0),
                layer(Detail).with("amplitude", 0.5),
            ],
            BiomeVariant::Archipelago => vec![
                layer(Foundation).with("base", 62.0).with("amplitude", 24.0).with("frequency", 0.006),
                layer(RollingTerrain).with("amplitude", 8.0),
                layer(Detail),
            ],
            BiomeVariant::Shelf => vec![
                layer(Foundation).with("base", 58.0).with("amplitude", 8.0),
                layer(RollingTerrain).with("amplitude", 3.0),
                layer(Detail).with("amplitude", 0.5),
            ],
            BiomeVariant::Reef => vec![
                layer(Foundation).with("base", 68.0).with("amplitude", 6.0),
                layer(Detail).with("amplitude", 1.5).with("crystalline", true),
            ],
            BiomeVariant::Maria => vec![
                layer(Foundation).with("base", 60.0).with("amplitude", 4.0).with("frequency", 0.002),
                layer(VolcanicFlow).with("thickness", 3.0).with("threshold", 0.3),
                layer(Detail).with("amplitude", 0.6),
            ],
            BiomeVariant::Highlands => vec![
                layer(Foundation).with("base", 78.0).with("amplitude", 18.0),
                layer(Mesa).with("height", 12.0).with("steepness", 0.9),
                layer(Detail).with("amplitude", 1.6),
            ],
            BiomeVariant::CraterField => vec![
                layer(Foundation).with("base", 68.0).with("amplitude", 8.0),
                layer(Canyon).with("depth", 10.0).with("width", 0.3).with("frequency", 0.03),
                layer(Detail).with("amplitude", 2.5).with("crystalline", true),
            ],
            BiomeVariant::Rille => vec![
                layer(Foundation).with("base", 62.0).with("amplitude", 5.0),
                layer(Canyon).with("depth", 20.0).with("width", 0.08),
                layer(Detail).with("amplitude", 0.8),
            ],
            BiomeVariant::Plains => vec![
                layer(Foundation).with("base", 76.0).with("amplitude", 6.0),
                layer(RollingTerrain).with("amplitude", 5.0),
                layer(Detail).with("amplitude", 0.6),
            ],
            BiomeVariant::Hills => vec![
                layer(Foundation).with("base", 80.0).with("amplitude", 14.0),
                layer(RollingTerrain).with("amplitude", 12.0),
                layer(WindErosion).with("depth", 2.0).with("deposition", 0.2),
                layer(Detail),
            ],
            BiomeVariant::Mountains => vec![
                layer(Foundation).with("base", 96.0).with("amplitude", 40.0),
                layer(Canyon).with("depth", 18.0).with("width", 0.1),
                layer(Detail).with("amplitude", 2.0),
            ],
            BiomeVariant::RiverValley => vec![
                layer(Foundation).with("base", 72.0).with("amplitude", 6.0),
                layer(Canyon).with("depth", 10.0).with("width", 0.2).with("frequency", 0.006),
                layer(RollingTerrain).with("amplitude", 4.0),
            ],
            BiomeVariant::BasaltPlains => vec![
                layer(Foundation).with("base", 64.0).with("amplitude", 5.0),
                layer(VolcanicFlow).with("thickness", 4.0),
                layer(Detail).with("amplitude", 0.8).with("volcanic_roughness", true),
            ],
            BiomeVariant::LavaField => vec![
                layer(Foundation).with("base", 62.0).with("amplitude", 4.0),
                layer(VolcanicFlow).with("thickness", 8.0).with("threshold", 0.1),
                layer(Detail).with("volcanic_roughness", true),
            ],
            BiomeVariant::Caldera => vec![
                layer(Foundation).with("base", 80.0).with("amplitude", 25.0),
                layer(Mesa).with("height", 30.0).with("threshold", 0.4).with("steepness", 0.5),
                layer(VolcanicFlow).with("thickness", 3.0),
            ],
            BiomeVariant::AshWaste => vec![
                layer(Foundation).with("base", 68.0).with("amplitude", 6.0),
                layer(VolcanicFlow).with("thickness", 2.0).with("threshold", 0.5),
                layer(Detail).with("amplitude", 0.5),
            ],
        }
    }
}
