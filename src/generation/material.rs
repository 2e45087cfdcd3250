//! Material roles and the host-facing resolver and writer traits.

use serde::{Deserialize, Serialize};

use crate::planet::Archetype;
use crate::terrain::biome::BiomeVariant;

/// Opaque material identifier understood by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

/// Built-in material palette used by [`DefaultMaterials`].
pub mod materials {
    use super::MaterialId;

    pub const AIR: MaterialId = MaterialId(0);
    pub const BEDROCK: MaterialId = MaterialId(1);
    pub const STONE: MaterialId = MaterialId(2);
    pub const DIRT: MaterialId = MaterialId(3);
    pub const GRASS: MaterialId = MaterialId(4);
    pub const GRAVEL: MaterialId = MaterialId(5);
    pub const SAND: MaterialId = MaterialId(6);
    pub const SANDSTONE: MaterialId = MaterialId(7);
    pub const SALT: MaterialId = MaterialId(8);
    pub const MUD: MaterialId = MaterialId(9);
    pub const CORAL: MaterialId = MaterialId(10);
    pub const REGOLITH: MaterialId = MaterialId(11);
    pub const BASALT: MaterialId = MaterialId(12);
    pub const OBSIDIAN: MaterialId = MaterialId(13);
    pub const ASH: MaterialId = MaterialId(14);
    pub const WATER: MaterialId = MaterialId(15);
}

/// Position of a slot in the column's layer stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialRole {
    /// Bottom slot of the vertical range
    Bedrock,
    Deep,
    Mid,
    Surface,
    /// Surface material where loose deposits collect
    Loose,
    Liquid,
}

/// Maps a layer role to a host material.
pub trait MaterialResolver: Send + Sync {
    fn resolve(&self, archetype: Archetype, biome: BiomeVariant, role: MaterialRole) -> MaterialId;

    /// Material for columns built without a planet model.
    fn fallback(&self, role: MaterialRole) -> MaterialId;
}

/// Receives a built column one slot at a time. Empty slots are skipped.
pub trait ColumnWriter {
    fn write(&mut self, y: i32, material: MaterialId);
}

impl ColumnWriter for Vec<(i32, MaterialId)> {
    fn write(&mut self, y: i32, material: MaterialId) {
        self.push((y, material));
    }
}

/// The built-in palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMaterials;

impl MaterialResolver for DefaultMaterials {
    fn resolve(&self, archetype: Archetype, biome: BiomeVariant, role: MaterialRole) -> MaterialId {
        use materials::*;

        match role {
            MaterialRole::Bedrock => BEDROCK,
            MaterialRole::Liquid => WATER,
            MaterialRole::Deep => match archetype {
                Archetype::Volcanic => BASALT,
                _ => STONE,
            },
            MaterialRole::Mid => match archetype {
                Archetype::Desert => SANDSTONE,
                Archetype::Rocky | Archetype::Volcanic => BASALT,
                Archetype::Oceanic | Archetype::Temperate => STONE,
            },
            MaterialRole::Loose => match archetype {
                Archetype::Desert | Archetype::Oceanic => SAND,
                Archetype::Rocky => REGOLITH,
                Archetype::Temperate => GRAVEL,
                Archetype::Volcanic => ASH,
            },
            MaterialRole::Surface => match biome {
                BiomeVariant::DuneSea => SAND,
                BiomeVariant::Mesa | BiomeVariant::Canyon => SANDSTONE,
                BiomeVariant::SaltFlat => SALT,
                BiomeVariant::WindScoured => GRAVEL,
                BiomeVariant::DeepOcean => MUD,
                BiomeVariant::Archipelago | BiomeVariant::Shelf => SAND,
                BiomeVariant::Reef => CORAL,
                BiomeVariant::Maria => BASALT,
                BiomeVariant::Highlands | BiomeVariant::CraterField | BiomeVariant::Rille => REGOLITH,
                BiomeVariant::Plains | BiomeVariant::Hills => GRASS,
                BiomeVariant::Mountains => STONE,
                BiomeVariant::RiverValley => DIRT,
                BiomeVariant::BasaltPlains | BiomeVariant::Caldera => BASALT,
                BiomeVariant::LavaField => OBSIDIAN,
                BiomeVariant::AshWaste => ASH,
            },
        }
    }

    fn fallback(&self, role: MaterialRole) -> MaterialId {
        match role {
            MaterialRole::Bedrock => materials::BEDROCK,
            MaterialRole::Deep | MaterialRole::Mid => materials::STONE,
            MaterialRole::Surface => materials::DIRT,
            MaterialRole::Loose => materials::GRAVEL,
            MaterialRole::Liquid => materials::WATER,
        }
    }
}
