use super::{
    entities::{
        Cloud, Collectible, CollectibleEffect, CollectibleKind, EntityId, Obstacle, ObstacleKind, TerrainFeature,
    },
    generator::EntityGenerator,
};
use crate::flight_control::common::Vec3D;
use crate::{event, log};
use rand::Rng;
use serde::Serialize;

/// Grid cell of the world, `(floor(x / REGION_SIZE), floor(z / REGION_SIZE))`.
pub type Region = (i32, i32);

/// Entity populations around one player.
///
/// The world is a square of side [`WorldSimulation::TERRAIN_SIZE`] centered on
/// the origin. Whenever the player enters a new region, everything farther than
/// [`WorldSimulation::CULL_DISTANCE`] is dropped and each population is topped
/// up by at most [`WorldSimulation::INCREMENT`], never past
/// [`WorldSimulation::CAPACITY`].
#[derive(Debug, Clone)]
pub struct WorldSimulation {
    terrain: Vec<TerrainFeature>,
    clouds: Vec<Cloud>,
    obstacles: Vec<Obstacle>,
    collectibles: Vec<Collectible>,
    generator: EntityGenerator,
    last_region: Region,
    generation_batches: u32,
}

/// Per-population entity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Populations {
    pub terrain: usize,
    pub clouds: usize,
    pub obstacles: usize,
    pub collectibles: usize,
}

impl Populations {
    pub fn total(&self) -> usize { self.terrain + self.clouds + self.obstacles + self.collectibles }

    /// `self`, reduced per population to the room `current` leaves below `cap`.
    pub fn bounded_by(self, current: Populations, cap: Populations) -> Populations {
        Populations {
            terrain: self.terrain.min(cap.terrain.saturating_sub(current.terrain)),
            clouds: self.clouds.min(cap.clouds.saturating_sub(current.clouds)),
            obstacles: self.obstacles.min(cap.obstacles.saturating_sub(current.obstacles)),
            collectibles: self.collectibles.min(cap.collectibles.saturating_sub(current.collectibles)),
        }
    }
}

/// Entities within view distance of the player.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorldView {
    pub terrain: Vec<TerrainFeature>,
    pub clouds: Vec<Cloud>,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
}

/// Result of one world update.
#[derive(Debug, Clone)]
pub struct WorldTick {
    pub view: WorldView,
    /// Effect of the collectible picked up this tick, if any.
    pub effect: Option<CollectibleEffect>,
    pub region_changed: bool,
}

impl WorldSimulation {
    pub const TERRAIN_SIZE: f32 = 2000.0;
    pub const HALF_EXTENT: f32 = Self::TERRAIN_SIZE / 2.0;
    pub const REGION_SIZE: f32 = 100.0;
    pub const VIEW_DISTANCE: f32 = 400.0;
    pub const CULL_DISTANCE: f32 = Self::TERRAIN_SIZE / 2.0;
    /// Minimum planar distance between the player and a replacement collectible.
    pub const REPLACEMENT_DISTANCE: f32 = 50.0;

    pub const INITIAL: Populations = Populations { terrain: 30, clouds: 20, obstacles: 10, collectibles: 15 };
    pub const INCREMENT: Populations = Populations { terrain: 3, clouds: 2, obstacles: 1, collectibles: 2 };
    /// Region transitions never grow a population beyond this.
    pub const CAPACITY: Populations = Populations { terrain: 45, clouds: 30, obstacles: 15, collectibles: 24 };

    /// Creates a world populated with [`Self::INITIAL`] around `origin`.
    pub fn new(origin: Vec3D<f32>) -> Self {
        let mut world = Self::empty(origin);
        world.generate(&mut rand::rng(), origin, Self::INITIAL);
        world
    }

    /// Creates a world without any entities, with `origin` as the current region.
    pub fn empty(origin: Vec3D<f32>) -> Self {
        Self {
            terrain: Vec::new(),
            clouds: Vec::new(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            generator: EntityGenerator::new(Self::HALF_EXTENT),
            last_region: Self::region_of(origin),
            generation_batches: 0,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn region_of(position: Vec3D<f32>) -> Region {
        (
            (position.x() / Self::REGION_SIZE).floor() as i32,
            (position.z() / Self::REGION_SIZE).floor() as i32,
        )
    }

    pub fn last_region(&self) -> Region { self.last_region }

    /// Number of incremental batches generated by region transitions.
    pub fn generation_batches(&self) -> u32 { self.generation_batches }

    pub fn terrain(&self) -> &[TerrainFeature] { &self.terrain }
    pub fn clouds(&self) -> &[Cloud] { &self.clouds }
    pub fn obstacles(&self) -> &[Obstacle] { &self.obstacles }
    pub fn collectibles(&self) -> &[Collectible] { &self.collectibles }

    pub fn populations(&self) -> Populations {
        Populations {
            terrain: self.terrain.len(),
            clouds: self.clouds.len(),
            obstacles: self.obstacles.len(),
            collectibles: self.collectibles.len(),
        }
    }

    /// Places a collectible at a fixed position, clamped into the world.
    pub fn place_collectible(
        &mut self,
        kind: CollectibleKind,
        position: Vec3D<f32>,
        size: f32,
        value: f32,
    ) -> EntityId {
        let id = self.generator.next_id();
        let position = position.clamp_planar(Self::HALF_EXTENT);
        self.collectibles.push(Collectible { id, kind, position, size, value });
        id
    }

    /// Places a cloud drifting at `speed` units per second, clamped into the world.
    pub fn place_cloud(&mut self, position: Vec3D<f32>, size: f32, speed: f32) -> EntityId {
        let id = self.generator.next_id();
        let position = position.clamp_planar(Self::HALF_EXTENT);
        self.clouds.push(Cloud { id, position, size, speed });
        id
    }

    pub fn place_obstacle(&mut self, kind: ObstacleKind, position: Vec3D<f32>, size: f32, speed: f32) -> EntityId {
        let id = self.generator.next_id();
        let position = position.clamp_planar(Self::HALF_EXTENT);
        self.obstacles.push(Obstacle { id, kind, position, size, speed });
        id
    }

    /// Advances the world by `elapsed` seconds with the player at `player`.
    ///
    /// Runs region bookkeeping, entity motion, collectible pickup and the
    /// visibility query, in that order. At most one collectible is picked up.
    /// The world is toroidal on the ground plane: a player outside the square
    /// is wrapped back into it.
    pub fn update(&mut self, player: Vec3D<f32>, elapsed: f32) -> WorldTick {
        let player = player.wrap_planar(Self::HALF_EXTENT);
        let mut rng = rand::rng();
        let region_changed = self.enter_region(&mut rng, player);
        self.move_entities(&mut rng, elapsed.max(0.0));
        let effect = self.resolve_collectible(&mut rng, player);
        WorldTick { view: self.visible_from(player), effect, region_changed }
    }

    fn enter_region<R: Rng + ?Sized>(&mut self, rng: &mut R, player: Vec3D<f32>) -> bool {
        let region = Self::region_of(player);
        if region == self.last_region {
            return false;
        }
        self.last_region = region;
        let culled = self.cull(player);
        let batch = Self::INCREMENT.bounded_by(self.populations(), Self::CAPACITY);
        self.generate(rng, player, batch);
        self.generation_batches += 1;
        log!(
            "Entered region {region:?}, batch {} added {} entities, culled {culled}",
            self.generation_batches,
            batch.total()
        );
        true
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, center: Vec3D<f32>, counts: Populations) {
        let g = &mut self.generator;
        self.terrain.extend((0..counts.terrain).map(|_| g.terrain(rng, center)));
        self.clouds.extend((0..counts.clouds).map(|_| g.cloud(rng, center)));
        self.obstacles.extend((0..counts.obstacles).map(|_| g.obstacle(rng, center)));
        self.collectibles.extend((0..counts.collectibles).map(|_| g.collectible(rng, center)));
    }

    /// Drops entities beyond [`Self::CULL_DISTANCE`]; returns how many were removed.
    fn cull(&mut self, player: Vec3D<f32>) -> usize {
        let before = self.populations();
        let keep = |p: &Vec3D<f32>| p.euclid_distance(&player) <= Self::CULL_DISTANCE;
        self.terrain.retain(|t| t.position.planar_distance(&player) <= Self::CULL_DISTANCE);
        self.clouds.retain(|c| keep(&c.position));
        self.obstacles.retain(|o| keep(&o.position));
        self.collectibles.retain(|c| keep(&c.position));
        let after = self.populations();
        (before.terrain - after.terrain)
            + (before.clouds - after.clouds)
            + (before.obstacles - after.obstacles)
            + (before.collectibles - after.collectibles)
    }

    /// Clouds drift along `x` and wrap at the world edge; obstacles take a
    /// bounded random step on the ground plane.
    fn move_entities<R: Rng + ?Sized>(&mut self, rng: &mut R, elapsed: f32) {
        for cloud in &mut self.clouds {
            let x = cloud.position.x() + cloud.speed * elapsed;
            cloud.position.set_x(Vec3D::wrap_coordinate(x, Self::HALF_EXTENT));
        }
        for obstacle in &mut self.obstacles {
            let reach = obstacle.speed * elapsed;
            let step = Vec3D::new(rng.random_range(-1.0..=1.0f32) * reach, 0.0, rng.random_range(-1.0..=1.0f32) * reach);
            obstacle.position = (obstacle.position + step).clamp_planar(Self::HALF_EXTENT);
        }
    }

    fn resolve_collectible<R: Rng + ?Sized>(&mut self, rng: &mut R, player: Vec3D<f32>) -> Option<CollectibleEffect> {
        let idx = self.collectibles.iter().position(|c| c.position.euclid_distance(&player) <= c.pickup_radius())?;
        let picked = self.collectibles.remove(idx);
        let replacement = self.generator.collectible_away(rng, player, Self::REPLACEMENT_DISTANCE);
        event!("Picked up {} #{} (value {:.2}), replaced by #{}", picked.kind, picked.id, picked.value, replacement.id);
        self.collectibles.push(replacement);
        Some(picked.effect())
    }

    /// Entities within [`Self::VIEW_DISTANCE`]: planar for terrain, 3D otherwise.
    pub fn visible_from(&self, player: Vec3D<f32>) -> WorldView {
        let near = |p: &Vec3D<f32>| p.euclid_distance(&player) <= Self::VIEW_DISTANCE;
        WorldView {
            terrain: self
                .terrain
                .iter()
                .filter(|t| t.position.planar_distance(&player) <= Self::VIEW_DISTANCE)
                .cloned()
                .collect(),
            clouds: self.clouds.iter().filter(|c| near(&c.position)).cloned().collect(),
            obstacles: self.obstacles.iter().filter(|o| near(&o.position)).cloned().collect(),
            collectibles: self.collectibles.iter().filter(|c| near(&c.position)).cloned().collect(),
        }
    }
}
