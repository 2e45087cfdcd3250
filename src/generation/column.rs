//! Vertical material columns.
//!
//! A column is filled bottom-up from the sampled surface height:
//!
//! ```text
//!   y > surface           empty, or liquid when at/below sea level
//!   top surface_depth     surface (loose deposit or exposed rock)
//!   next mid_depth        mid
//!   below                 deep
//!   y == min_y            bedrock
//! ```

use serde::Serialize;

use super::config::VerticalRange;
use super::material::{ColumnWriter, MaterialId, MaterialResolver, MaterialRole};
use crate::planet::PlanetModel;
use crate::terrain::biome::BiomeVariant;

/// Surface height of columns built without a planet model.
pub const FALLBACK_SURFACE: i32 = 64;

/// Surface layer thickness of the fallback column.
const FALLBACK_SURFACE_DEPTH: i32 = 1;

/// Frequency of the rock-exposure dither.
const EXPOSURE_SCALE: f64 = 0.37;

/// Contents of one vertical slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Slot {
    #[default]
    Empty,
    Solid(MaterialId),
    Liquid(MaterialId),
}

impl Slot {
    pub fn material(self) -> Option<MaterialId> {
        match self {
            Slot::Empty => None,
            Slot::Solid(id) | Slot::Liquid(id) => Some(id),
        }
    }
}

/// One column of slots over a vertical range.
#[derive(Clone, Debug)]
pub struct TerrainColumn {
    x: i32,
    z: i32,
    surface_height: i32,
    range: VerticalRange,
    /// `None` for the fallback column
    biome: Option<BiomeVariant>,
    slots: Vec<Slot>,
}

impl TerrainColumn {
    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    /// Y of the topmost solid slot.
    pub fn surface_height(&self) -> i32 {
        self.surface_height
    }

    pub fn range(&self) -> VerticalRange {
        self.range
    }

    pub fn biome(&self) -> Option<BiomeVariant> {
        self.biome
    }

    /// Slots from `min_y` upwards.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at `y`; `Empty` outside the range.
    pub fn slot_at(&self, y: i32) -> Slot {
        self.range
            .index_of(y)
            .and_then(|i| self.slots.get(i).copied())
            .unwrap_or(Slot::Empty)
    }

    pub fn material_at(&self, y: i32) -> Option<MaterialId> {
        self.slot_at(y).material()
    }

    /// Emit every non-empty slot, bottom-up.
    pub fn write_to<W: ColumnWriter + ?Sized>(&self, writer: &mut W) {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(material) = slot.material() {
                writer.write(self.range.min_y() + i as i32, material);
            }
        }
    }
}

/// Layer thicknesses derived from a planet's properties.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Strata {
    surface_depth: i32,
    mid_depth: i32,
}

impl Strata {
    fn for_model(model: &PlanetModel) -> Self {
        let props = model.properties();
        Self {
            surface_depth: ((4.0 * (1.0 - props.erosion_rate)).round() as i32).max(1),
            mid_depth: (3.0 + 5.0 * props.tectonic_activity).round() as i32,
        }
    }
}

/// Builds [`TerrainColumn`]s against a material resolver.
pub struct TerrainColumnBuilder<'a> {
    resolver: &'a dyn MaterialResolver,
    range: VerticalRange,
}

impl<'a> TerrainColumnBuilder<'a> {
    pub fn new(resolver: &'a dyn MaterialResolver, range: VerticalRange) -> Self {
        Self { resolver, range }
    }

    /// Build the column at `(x, z)`. Without a model the flat fallback column is returned.
    pub fn build(&self, model: Option<&PlanetModel>, x: i32, z: i32) -> TerrainColumn {
        match model {
            Some(model) => self.build_for_model(model, x, z),
            None => self.build_fallback(x, z),
        }
    }

    fn build_for_model(&self, model: &PlanetModel, x: i32, z: i32) -> TerrainColumn {
        let (wx, wz) = (x as f64, z as f64);
        let (height, biome) = model.sample_height_and_biome(wx, wz);
        let surface = self.range.clamp(height);

        let props = model.properties();
        let archetype = model.archetype();
        let strata = Strata::for_model(model);
        let role = |role| self.resolver.resolve(archetype, biome, role);

        let surface_role = if props.loose_material && surface <= props.loose_material_height {
            MaterialRole::Loose
        } else if model.noise().dither.unit2(wx * EXPOSURE_SCALE + 0.5, wz * EXPOSURE_SCALE + 0.5)
            < props.rock_exposure * 0.5
        {
            MaterialRole::Mid
        } else {
            MaterialRole::Surface
        };

        let bedrock = role(MaterialRole::Bedrock);
        let deep = role(MaterialRole::Deep);
        let mid = role(MaterialRole::Mid);
        let top = role(surface_role);
        let liquid = role(MaterialRole::Liquid);

        let slots = (self.range.min_y()..self.range.max_y())
            .map(|y| {
                if y == self.range.min_y() {
                    return Slot::Solid(bedrock);
                }
                if y > surface {
                    return if props.has_liquid && y <= props.sea_level {
                        Slot::Liquid(liquid)
                    } else {
                        Slot::Empty
                    };
                }
                let depth = surface - y;
                if depth < strata.surface_depth {
                    Slot::Solid(top)
                } else if depth < strata.surface_depth + strata.mid_depth {
                    Slot::Solid(mid)
                } else {
                    Slot::Solid(deep)
                }
            })
            .collect();

        TerrainColumn {
            x,
            z,
            surface_height: surface,
            range: self.range,
            biome: Some(biome),
            slots,
        }
    }

    fn build_fallback(&self, x: i32, z: i32) -> TerrainColumn {
        let surface = self.range.clamp(FALLBACK_SURFACE as f64);
        let bedrock = self.resolver.fallback(MaterialRole::Bedrock);
        let deep = self.resolver.fallback(MaterialRole::Deep);
        let top = self.resolver.fallback(MaterialRole::Surface);

        let slots = (self.range.min_y()..self.range.max_y())
            .map(|y| {
                if y == self.range.min_y() {
                    Slot::Solid(bedrock)
                } else if y > surface {
                    Slot::Empty
                } else if surface - y < FALLBACK_SURFACE_DEPTH {
                    Slot::Solid(top)
                } else {
                    Slot::Solid(deep)
                }
            })
            .collect();

        TerrainColumn {
            x,
            z,
            surface_height: surface,
            range: self.range,
            biome: None,
            slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::material::{materials, DefaultMaterials};
    use crate::planet::PlanetConfig;

    fn assert_complete(column: &TerrainColumn, model: Option<&PlanetModel>) {
        let range = column.range();
        assert_eq!(column.slots().len(), range.len());
        assert!(range.contains(column.surface_height()));
        assert!(matches!(column.slot_at(range.min_y()), Slot::Solid(_)));
        assert!(matches!(column.slot_at(column.surface_height()), Slot::Solid(_)));

        for y in range.min_y()..=column.surface_height() {
            assert!(matches!(column.slot_at(y), Slot::Solid(_)), "hole at y={}", y);
        }
        for y in column.surface_height() + 1..range.max_y() {
            match column.slot_at(y) {
                Slot::Solid(_) => panic!("solid above surface at y={}", y),
                Slot::Liquid(_) => {
                    let props = model.expect("fallback column has no liquid").properties();
                    assert!(props.has_liquid);
                    assert!(y <= props.sea_level);
                }
                Slot::Empty => {}
            }
        }
    }

    #[test]
    fn test_fallback_column() {
        let builder = TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::default());
        let column = builder.build(None, 10, -4);

        assert_eq!(column.surface_height(), FALLBACK_SURFACE);
        assert_eq!(column.biome(), None);
        assert_eq!(column.material_at(-64), Some(materials::BEDROCK));
        assert_eq!(column.material_at(0), Some(materials::STONE));
        assert_eq!(column.material_at(64), Some(materials::DIRT));
        assert_eq!(column.material_at(65), None);
        assert_complete(&column, None);
    }

    #[test]
    fn test_columns_complete_for_presets() {
        let builder = TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::default());
        for name in ["earth", "moon", "venus", "desert", "volcanic", "oceanic"] {
            let model = PlanetModel::new(PlanetConfig::preset(name, 31).unwrap()).unwrap();
            for i in 0..40 {
                let (x, z) = (i * 53 - 1000, i * -29 + 400);
                let column = builder.build(Some(&model), x, z);
                assert_eq!(column.biome().map(|b| b.archetype()), Some(model.archetype()));
                assert_complete(&column, Some(&model));
            }
        }
    }

    #[test]
    fn test_surface_matches_sampled_height() {
        let model = PlanetModel::new(PlanetConfig::earth_like(8)).unwrap();
        let builder = TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::default());
        for i in 0..30 {
            let (x, z) = (i * 17 + 3, i * 11 - 7);
            let column = builder.build(Some(&model), x, z);
            let expected = VerticalRange::default().clamp(model.sample_height(x as f64, z as f64));
            assert_eq!(column.surface_height(), expected);
        }
    }

    #[test]
    fn test_tiny_range_clamps_without_panicking() {
        let model = PlanetModel::new(PlanetConfig::earth_like(8)).unwrap();
        let range = VerticalRange::new(0, 4);
        let builder = TerrainColumnBuilder::new(&DefaultMaterials, range);
        let column = builder.build(Some(&model), 5, 5);
        assert_eq!(column.surface_height(), 3);
        assert_complete(&column, Some(&model));
    }

    #[test]
    fn test_no_liquid_on_airless_world() {
        let model = PlanetModel::new(PlanetConfig::moon_like(2)).unwrap();
        let builder = TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::default());
        for i in 0..30 {
            let column = builder.build(Some(&model), i * 41, i * 7);
            assert!(column.slots().iter().all(|s| !matches!(s, Slot::Liquid(_))));
        }
    }

    #[test]
    fn test_ocean_fills_to_sea_level() {
        let model = PlanetModel::new(PlanetConfig::oceanic(12)).unwrap();
        let sea = model.properties().sea_level;
        assert!(model.properties().has_liquid);

        let builder = TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::default());
        let flooded = (0..400)
            .map(|i| builder.build(Some(&model), i * 23, i * 13))
            .find(|c| c.surface_height() < sea);
        if let Some(column) = flooded {
            assert_eq!(column.slot_at(sea), Slot::Liquid(materials::WATER));
            assert_eq!(column.slot_at(sea + 1), Slot::Empty);
        }
    }

    #[test]
    fn test_write_to_skips_empty() {
        let builder = TerrainColumnBuilder::new(&DefaultMaterials, VerticalRange::new(0, 100));
        let column = builder.build(None, 0, 0);
        let mut out: Vec<(i32, MaterialId)> = Vec::new();
        column.write_to(&mut out);
        assert_eq!(out.len(), 65);
        assert_eq!(out[0], (0, materials::BEDROCK));
        assert_eq!(out[64], (64, materials::DIRT));
    }
}
