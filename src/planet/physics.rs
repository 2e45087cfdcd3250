//! Physical property derivation.
//!
//! Every value is a small weighted formula over a few config sliders, clamped
//! to its documented range. The coefficients are tuning constants: tests only
//! check monotonicity and ranges, never exact outputs.

use crate::planet::archetype;
use crate::planet::config::{Archetype, CrustType, PlanetConfig};

/// Surface gravity of Earth in m/s^2.
pub const EARTH_GRAVITY: f64 = 9.81;

const KELVIN: f64 = 273.15;

/// Equilibrium temperature at 1 AU before greenhouse warming, in K.
const EQUILIBRIUM_TEMP_K: f64 = 255.0;

/// Warming per doubling of atmospheric pressure, in K.
const GREENHOUSE_PER_DOUBLING: f64 = 33.0;

/// Pressure below which no liquid surface can persist (roughly water's triple point).
const MIN_LIQUID_PRESSURE: f64 = 0.006;

/// Sea level at zero ocean coverage, and the rise at full coverage.
const SEA_LEVEL_BASE: i32 = 48;
const SEA_LEVEL_RANGE: f64 = 32.0;

/// Loose deposits reach this far above sea level.
const LOOSE_MATERIAL_RISE: i32 = 4;

/// Caps imposed by an unconsolidated crust.
const UNCONSOLIDATED_TECTONIC_CAP: f64 = 0.3;

/// Cap on erosion for an airless rocky body.
const AIRLESS_EROSION_CAP: f64 = 0.1;

/// Derived physical state of a planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalProperties {
    /// m/s^2
    pub gravity: f64,
    /// atm
    pub atmospheric_pressure: f64,
    /// deg C
    pub average_surface_temp: f64,
    pub habitability: f64,
    pub erosion_rate: f64,
    pub loose_material: bool,
    /// Highest Y at which the surface turns to loose material
    pub loose_material_height: i32,
    pub rock_exposure: f64,
    /// Effective tectonic activity after archetype adjustment and overrides
    pub tectonic_activity: f64,
    pub seismic_activity: f64,
    pub thermal_regulation: f64,
    pub sea_level: i32,
    pub has_liquid: bool,
}

impl Default for PhysicalProperties {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY,
            atmospheric_pressure: 1.0,
            average_surface_temp: 15.0,
            habitability: 0.9,
            erosion_rate: 0.4,
            loose_material: false,
            loose_material_height: 75,
            rock_exposure: 0.3,
            tectonic_activity: 0.5,
            seismic_activity: 0.5,
            thermal_regulation: 0.7,
            sea_level: 71,
            has_liquid: true,
        }
    }
}

impl PhysicalProperties {
    /// Derive the full property set: base formulas, archetype refinement,
    /// then the hard overrides.
    pub fn derive(config: &PlanetConfig) -> Self {
        let mut props = Self::base(config);
        archetype::refine(&mut props, config);
        props.apply_overrides(config);
        log::debug!(
            "Derived '{}': g={:.2} p={:.3} T={:.1} hab={:.2} erosion={:.2} rock={:.2}",
            config.name,
            props.gravity,
            props.atmospheric_pressure,
            props.average_surface_temp,
            props.habitability,
            props.erosion_rate,
            props.rock_exposure
        );
        props
    }

    fn base(config: &PlanetConfig) -> Self {
        let age = config.age.factor();
        let humidity = config.humidity;
        let ocean = config.ocean_coverage;

        let gravity = gravity(config.size_factor(), age, config.star_distance_au, config.tectonic_activity);
        let pressure = pressure(config.atmosphere_density, gravity, humidity, ocean, config.tectonic_activity);
        let temp = surface_temperature(config.star_distance_au, pressure);
        let thermal_regulation = unit(0.4 * humidity + 0.4 * ocean + 0.2 * pressure.min(1.0));

        let water = 0.5 * humidity + 0.5 * ocean;
        let habitability =
            unit(0.45 * temperature_score(temp) + 0.30 * pressure_score(pressure) + 0.25 * water);

        let erosion_rate = unit(
            0.35 * config.wind_strength * pressure.min(1.0)
                + 0.25 * humidity
                + 0.2 * age
                + 0.1 * config.crater_density,
        );
        let rock_exposure = base_rock_exposure(config);
        let seismic_activity = unit(0.7 * config.tectonic_activity + 0.3 * (1.0 - age));

        let sea_level = SEA_LEVEL_BASE + (SEA_LEVEL_RANGE * ocean).round() as i32;
        let has_liquid = pressure > MIN_LIQUID_PRESSURE
            && temp > -20.0
            && temp < 100.0
            && (ocean > 0.0 || humidity > 0.3);

        Self {
            gravity,
            atmospheric_pressure: pressure,
            average_surface_temp: temp,
            habitability,
            erosion_rate,
            loose_material: erosion_rate > 0.2 && humidity < 0.5,
            loose_material_height: sea_level + LOOSE_MATERIAL_RISE,
            rock_exposure,
            tectonic_activity: config.tectonic_activity,
            seismic_activity,
            thermal_regulation,
            sea_level,
            has_liquid,
        }
    }

    /// Apply the hard overrides. Idempotent: applying twice equals applying once.
    pub fn apply_overrides(&mut self, config: &PlanetConfig) {
        if config.atmosphere_density == 0.0 {
            self.atmospheric_pressure = 0.0;
            self.has_liquid = false;
        }

        if config.crust == CrustType::Unconsolidated {
            self.tectonic_activity = self.tectonic_activity.min(UNCONSOLIDATED_TECTONIC_CAP);
            self.seismic_activity = self.seismic_activity.min(UNCONSOLIDATED_TECTONIC_CAP);
        }

        if config.archetype() == Archetype::Rocky && config.atmosphere_density == 0.0 {
            self.erosion_rate = self.erosion_rate.min(AIRLESS_EROSION_CAP);
            self.loose_material = false;
        }
    }

    /// Whether a liquid layer sits at the given height.
    pub fn is_submerged(&self, y: f64) -> bool {
        self.has_liquid && y <= self.sea_level as f64
    }
}

/// Rock exposure before archetype adjustment.
pub(crate) fn base_rock_exposure(config: &PlanetConfig) -> f64 {
    unit(0.5 * config.tectonic_activity + 0.3 * (1.0 - config.humidity) + 0.2 * config.age.factor())
}

fn gravity(size: f64, age: f64, distance: f64, tectonic: f64) -> f64 {
    let heat = unit(1.0 / (distance * distance) / 4.0);
    // Small, young, hot bodies have lost volatiles and read slightly lighter.
    let loss = 0.08 * (1.0 - age) * unit(1.0 - size) * heat;
    EARTH_GRAVITY * (size.powf(0.85) * (0.9 + 0.1 * tectonic) - loss).clamp(0.02, 4.0)
}

fn pressure(density: f64, gravity: f64, humidity: f64, ocean: f64, tectonic: f64) -> f64 {
    let retention = 0.55 + 0.45 * gravity / EARTH_GRAVITY;
    let outgassing = 0.05 * tectonic;
    (density * retention * (1.0 + 0.15 * humidity + 0.1 * ocean) + outgassing).clamp(0.0, 250.0)
}

fn surface_temperature(distance: f64, pressure: f64) -> f64 {
    let equilibrium = EQUILIBRIUM_TEMP_K / distance.sqrt();
    let greenhouse = GREENHOUSE_PER_DOUBLING * (1.0 + pressure).log2();
    (equilibrium + greenhouse - KELVIN).clamp(-250.0, 900.0)
}

/// 1.0 at 15 C, falling off over roughly 25 C either side.
pub fn temperature_score(temp: f64) -> f64 {
    let d = (temp - 15.0) / 25.0;
    (-d * d).exp()
}

/// 1.0 at one atmosphere, log-normal falloff. Zero in vacuum.
pub fn pressure_score(pressure: f64) -> f64 {
    if pressure <= 0.0 {
        return 0.0;
    }
    let l = pressure.ln();
    (-l * l / 2.0).exp()
}

#[inline]
pub(crate) fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
