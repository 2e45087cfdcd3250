//! Planet configuration: the validated physical sliders a planet is derived from.
//!
//! A `PlanetConfig` is plain data. Range checking happens in [`PlanetConfig::validate`],
//! which `PlanetModel::new` calls before deriving anything. Out-of-range values are
//! rejected, never clamped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{PlanetError, ValidationError};

/// Earth's equatorial circumference, used to normalise planet size.
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40_075.0;

/// Longest accepted planet name.
pub const MAX_NAME_LEN: usize = 64;

/// Geological age of a planet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetAge {
    Young,
    #[default]
    Mature,
    Ancient,
}

impl PlanetAge {
    /// Age as a 0..1 factor (young = 0, ancient = 1).
    pub fn factor(self) -> f64 {
        match self {
            PlanetAge::Young => 0.0,
            PlanetAge::Mature => 0.5,
            PlanetAge::Ancient => 1.0,
        }
    }
}

/// Mechanical state of the outer crust.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrustType {
    #[default]
    Consolidated,
    Fractured,
    /// Loose, unconsolidated material (sand seas, regolith). Caps tectonic activity.
    Unconsolidated,
}

/// Planet archetype tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Desert,
    Oceanic,
    Rocky,
    Temperate,
    Volcanic,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Desert,
        Archetype::Oceanic,
        Archetype::Rocky,
        Archetype::Temperate,
        Archetype::Volcanic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Desert => "desert",
            Archetype::Oceanic => "oceanic",
            Archetype::Rocky => "rocky",
            Archetype::Temperate => "temperate",
            Archetype::Volcanic => "volcanic",
        }
    }
}

/// Archetype-specific sliders. The variant determines the planet's archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "archetype", rename_all = "snake_case")]
pub enum ArchetypeSettings {
    Desert {
        /// Share of bedrock in the surface mix (0..1)
        rock_ratio: f64,
        /// Dune wavelength multiplier (0.2..3.0)
        dune_scale: f64,
    },
    Oceanic {
        island_density: f64,
        reef_growth: f64,
    },
    Rocky {
        /// Intensity of the past bombardment record (0..1)
        impact_history: f64,
        regolith_depth: f64,
    },
    Temperate {
        vegetation: f64,
        seasonality: f64,
    },
    Volcanic {
        volcanism: f64,
        lava_fluidity: f64,
    },
}

impl ArchetypeSettings {
    pub fn archetype(&self) -> Archetype {
        match self {
            ArchetypeSettings::Desert { .. } => Archetype::Desert,
            ArchetypeSettings::Oceanic { .. } => Archetype::Oceanic,
            ArchetypeSettings::Rocky { .. } => Archetype::Rocky,
            ArchetypeSettings::Temperate { .. } => Archetype::Temperate,
            ArchetypeSettings::Volcanic { .. } => Archetype::Volcanic,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            ArchetypeSettings::Desert { rock_ratio, dune_scale } => {
                check_range("rock_ratio", rock_ratio, 0.0, 1.0)?;
                check_range("dune_scale", dune_scale, 0.2, 3.0)
            }
            ArchetypeSettings::Oceanic { island_density, reef_growth } => {
                check_range("island_density", island_density, 0.0, 1.0)?;
                check_range("reef_growth", reef_growth, 0.0, 1.0)
            }
            ArchetypeSettings::Rocky { impact_history, regolith_depth } => {
                check_range("impact_history", impact_history, 0.0, 1.0)?;
                check_range("regolith_depth", regolith_depth, 0.0, 1.0)
            }
            ArchetypeSettings::Temperate { vegetation, seasonality } => {
                check_range("vegetation", vegetation, 0.0, 1.0)?;
                check_range("seasonality", seasonality, 0.0, 1.0)
            }
            ArchetypeSettings::Volcanic { volcanism, lava_fluidity } => {
                check_range("volcanism", volcanism, 0.0, 1.0)?;
                check_range("lava_fluidity", lava_fluidity, 0.0, 1.0)
            }
        }
    }
}

/// Input parameters for one planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub name: String,
    pub seed: u64,
    #[serde(default)]
    pub age: PlanetAge,
    #[serde(default)]
    pub crust: CrustType,
    /// Equatorial circumference in km, (0, 200000]
    pub circumference_km: f64,
    /// Distance from the host star in AU, [0.05, 50]
    pub star_distance_au: f64,
    /// Atmospheric column density relative to Earth, [0, 100]
    pub atmosphere_density: f64,
    pub humidity: f64,
    pub ocean_coverage: f64,
    pub wind_strength: f64,
    pub tectonic_activity: f64,
    pub crater_density: f64,
    #[serde(flatten)]
    pub archetype: ArchetypeSettings,
}

impl PlanetConfig {
    /// Earth analogue: temperate, ocean-covered, mature.
    pub fn earth_like(seed: u64) -> Self {
        Self {
            name: "earth".into(),
            seed,
            age: PlanetAge::Mature,
            crust: CrustType::Consolidated,
            circumference_km: EARTH_CIRCUMFERENCE_KM,
            star_distance_au: 1.0,
            atmosphere_density: 1.0,
            humidity: 0.7,
            ocean_coverage: 0.71,
            wind_strength: 0.4,
            tectonic_activity: 0.5,
            crater_density: 0.05,
            archetype: ArchetypeSettings::Temperate { vegetation: 0.7, seasonality: 0.5 },
        }
    }

    /// Airless, heavily cratered satellite.
    pub fn moon_like(seed: u64) -> Self {
        Self {
            name: "moon".into(),
            seed,
            age: PlanetAge::Ancient,
            crust: CrustType::Fractured,
            circumference_km: 10_921.0,
            star_distance_au: 1.0,
            atmosphere_density: 0.0,
            humidity: 0.0,
            ocean_coverage: 0.0,
            wind_strength: 0.0,
            tectonic_activity: 0.05,
            crater_density: 0.9,
            archetype: ArchetypeSettings::Rocky { impact_history: 0.9, regolith_depth: 0.6 },
        }
    }

    /// Close to the star under a crushing greenhouse atmosphere.
    pub fn venus_like(seed: u64) -> Self {
        Self {
            name: "venus".into(),
            seed,
            age: PlanetAge::Mature,
            crust: CrustType::Consolidated,
            circumference_km: 38_025.0,
            star_distance_au: 0.72,
            atmosphere_density: 92.0,
            humidity: 0.0,
            ocean_coverage: 0.0,
            wind_strength: 0.2,
            tectonic_activity: 0.3,
            crater_density: 0.1,
            archetype: ArchetypeSettings::Volcanic { volcanism: 0.6, lava_fluidity: 0.5 },
        }
    }

    /// Dry sand world with a loose crust.
    pub fn desert(seed: u64) -> Self {
        Self {
            name: "dune".into(),
            seed,
            age: PlanetAge::Mature,
            crust: CrustType::Unconsolidated,
            circumference_km: 30_000.0,
            star_distance_au: 1.2,
            atmosphere_density: 0.8,
            humidity: 0.05,
            ocean_coverage: 0.0,
            wind_strength: 0.7,
            tectonic_activity: 0.2,
            crater_density: 0.1,
            archetype: ArchetypeSettings::Desert { rock_ratio: 0.6, dune_scale: 1.0 },
        }
    }

    /// Young, tidally heated volcanic body.
    pub fn volcanic(seed: u64) -> Self {
        Self {
            name: "io".into(),
            seed,
            age: PlanetAge::Young,
            crust: CrustType::Fractured,
            circumference_km: 11_445.0,
            star_distance_au: 1.5,
            atmosphere_density: 0.05,
            humidity: 0.0,
            ocean_coverage: 0.0,
            wind_strength: 0.1,
            tectonic_activity: 0.9,
            crater_density: 0.05,
            archetype: ArchetypeSettings::Volcanic { volcanism: 0.9, lava_fluidity: 0.7 },
        }
    }

    /// Water world with scattered archipelagos.
    pub fn oceanic(seed: u64) -> Self {
        Self {
            name: "thalassa".into(),
            seed,
            age: PlanetAge::Mature,
            crust: CrustType::Consolidated,
            circumference_km: 45_000.0,
            star_distance_au: 0.95,
            atmosphere_density: 1.3,
            humidity: 0.9,
            ocean_coverage: 0.92,
            wind_strength: 0.5,
            tectonic_activity: 0.4,
            crater_density: 0.02,
            archetype: ArchetypeSettings::Oceanic { island_density: 0.3, reef_growth: 0.6 },
        }
    }

    /// Look up a preset by name (`earth`, `moon`, `venus`, `desert`, `volcanic`, `oceanic`).
    pub fn preset(name: &str, seed: u64) -> Option<Self> {
        match name {
            "earth" => Some(Self::earth_like(seed)),
            "moon" => Some(Self::moon_like(seed)),
            "venus" => Some(Self::venus_like(seed)),
            "desert" => Some(Self::desert(seed)),
            "volcanic" => Some(Self::volcanic(seed)),
            "oceanic" => Some(Self::oceanic(seed)),
            _ => None,
        }
    }

    /// Return a copy with a different name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype.archetype()
    }

    /// Planet size relative to Earth.
    pub fn size_factor(&self) -> f64 {
        self.circumference_km / EARTH_CIRCUMFERENCE_KM
    }

    /// Check every slider against its documented range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let len = self.name.chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(ValidationError::InvalidName { len, max_len: MAX_NAME_LEN });
        }

        check_finite("circumference_km", self.circumference_km)?;
        if self.circumference_km <= 0.0 || self.circumference_km > 200_000.0 {
            return Err(ValidationError::OutOfRange {
                field: "circumference_km",
                value: self.circumference_km,
                min: 0.0,
                max: 200_000.0,
            });
        }
        check_range("star_distance_au", self.star_distance_au, 0.05, 50.0)?;
        check_range("atmosphere_density", self.atmosphere_density, 0.0, 100.0)?;
        check_range("humidity", self.humidity, 0.0, 1.0)?;
        check_range("ocean_coverage", self.ocean_coverage, 0.0, 1.0)?;
        check_range("wind_strength", self.wind_strength, 0.0, 1.0)?;
        check_range("tectonic_activity", self.tectonic_activity, 0.0, 1.0)?;
        check_range("crater_density", self.crater_density, 0.0, 1.0)?;
        self.archetype.validate()?;

        if self.archetype() == Archetype::Oceanic && self.ocean_coverage < 0.3 {
            return Err(ValidationError::Incompatible {
                reason: format!(
                    "oceanic planets need ocean_coverage >= 0.3, got {}",
                    self.ocean_coverage
                ),
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, PlanetError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, PlanetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, PlanetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save to file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), PlanetError> {
        let json = self.to_json_string()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, value, min, max });
    }
    Ok(())
}
