//! Procedurally generated surroundings of one player: terrain, clouds,
//! obstacles and collectibles.

mod entities;
mod generator;
mod world_simulation;
#[cfg(test)]
mod tests;

pub use entities::{
    Cloud, Collectible, CollectibleEffect, CollectibleKind, EntityId, Obstacle, ObstacleKind, TerrainFeature,
    TerrainKind,
};
pub use generator::EntityGenerator;
pub use world_simulation::{Populations, Region, WorldSimulation, WorldTick, WorldView};
