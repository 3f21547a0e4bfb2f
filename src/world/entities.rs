use crate::flight_control::common::Vec3D;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Identifier of a world entity, unique within one [`super::WorldSimulation`].
pub type EntityId = u64;

#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Mountain,
    Lake,
    Forest,
}

impl TerrainKind {
    /// Base RGB color, `0xRRGGBB`.
    pub const fn color(self) -> u32 {
        match self {
            TerrainKind::Mountain => 0x8B_7D_6B,
            TerrainKind::Lake => 0x3A_7B_D5,
            TerrainKind::Forest => 0x2E_8B_57,
        }
    }
}

#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Bird,
    Storm,
}

#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Thermal,
    Food,
}

/// Static ground feature. Only `x` and `z` of `position` are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainFeature {
    pub id: EntityId,
    pub kind: TerrainKind,
    pub position: Vec3D<f32>,
    pub size: f32,
    pub height: f32,
    pub color: u32,
}

/// Cloud drifting along `x` at `speed` units per second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cloud {
    pub id: EntityId,
    pub position: Vec3D<f32>,
    pub size: f32,
    pub speed: f32,
}

/// Wandering hazard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub kind: ObstacleKind,
    pub position: Vec3D<f32>,
    pub size: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collectible {
    pub id: EntityId,
    pub kind: CollectibleKind,
    pub position: Vec3D<f32>,
    pub size: f32,
    /// Impulse for thermals, energy for food.
    pub value: f32,
}

impl Collectible {
    /// Radius within which the player picks this collectible up.
    pub fn pickup_radius(&self) -> f32 { self.size + 2.0 }

    pub fn effect(&self) -> CollectibleEffect {
        match self.kind {
            CollectibleKind::Thermal => CollectibleEffect::Thermal { impulse: self.value },
            CollectibleKind::Food => CollectibleEffect::Food { energy: self.value },
        }
    }
}

/// What a picked-up collectible does to the bird.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleEffect {
    /// Upward momentum impulse.
    Thermal { impulse: f32 },
    /// Energy restored, capped at the maximum.
    Food { energy: f32 },
}
