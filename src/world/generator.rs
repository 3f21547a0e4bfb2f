use super::entities::{
    Cloud, Collectible, CollectibleKind, EntityId, Obstacle, ObstacleKind, TerrainFeature, TerrainKind,
};
use crate::flight_control::common::Vec3D;
use rand::{Rng, seq::IndexedRandom};
use std::f32::consts::TAU;
use strum::IntoEnumIterator;

/// Procedural entity factory. Hands out world-unique ids and places every
/// entity inside the world square `[-half_extent, half_extent]` on x/z.
#[derive(Debug, Clone)]
pub struct EntityGenerator {
    half_extent: f32,
    next_id: EntityId,
}

impl EntityGenerator {
    /// Maximum planar distance from the spawn center.
    pub const SPAWN_RADIUS: f32 = 500.0;

    const CLOUD_ALTITUDE: (f32, f32) = (40.0, 80.0);
    const COLLECTIBLE_ALTITUDE: (f32, f32) = (3.0, 40.0);
    const THERMAL_IMPULSE: (f32, f32) = (0.05, 0.15);
    const FOOD_ENERGY: (f32, f32) = (10.0, 30.0);

    pub fn new(half_extent: f32) -> Self { Self { half_extent, next_id: 0 } }

    pub fn half_extent(&self) -> f32 { self.half_extent }

    pub fn next_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random ground point within [`Self::SPAWN_RADIUS`] of `center`.
    pub fn spawn_point<R: Rng + ?Sized>(&self, rng: &mut R, center: Vec3D<f32>) -> Vec3D<f32> {
        // sqrt keeps the density uniform over the disc
        let radius = Self::SPAWN_RADIUS * rng.random_range(0.0..=1.0f32).sqrt();
        self.point_at(rng, center, radius)
    }

    /// Random ground point whose planar distance to `center` lies in
    /// `[min_distance, SPAWN_RADIUS]`, as long as `center` is inside the world.
    pub fn spawn_point_away<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        center: Vec3D<f32>,
        min_distance: f32,
    ) -> Vec3D<f32> {
        let radius = rng.random_range(min_distance.min(Self::SPAWN_RADIUS)..=Self::SPAWN_RADIUS);
        self.point_at(rng, center, radius)
    }

    /// Point at `radius` from `center` in a random direction. Offsets that
    /// leave the world are mirrored per axis, which keeps the distance exact.
    fn point_at<R: Rng + ?Sized>(&self, rng: &mut R, center: Vec3D<f32>, radius: f32) -> Vec3D<f32> {
        let angle = rng.random_range(0.0..TAU);
        let mirror = |c: f32, d: f32| {
            if (c + d).abs() <= self.half_extent { c + d } else { c - d }
        };
        let x = mirror(center.x(), angle.cos() * radius);
        let z = mirror(center.z(), angle.sin() * radius);
        Vec3D::new(x, 0.0, z).clamp_planar(self.half_extent)
    }

    pub fn terrain<R: Rng + ?Sized>(&mut self, rng: &mut R, center: Vec3D<f32>) -> TerrainFeature {
        let kinds: Vec<TerrainKind> = TerrainKind::iter().collect();
        let kind = *kinds.choose(rng).unwrap_or(&TerrainKind::Forest);
        let (size, height) = match kind {
            TerrainKind::Mountain => (rng.random_range(40.0..120.0), rng.random_range(50.0..200.0)),
            TerrainKind::Lake => (rng.random_range(30.0..100.0), 0.0),
            TerrainKind::Forest => (rng.random_range(20.0..60.0), rng.random_range(10.0..30.0)),
        };
        TerrainFeature {
            id: self.next_id(),
            kind,
            position: self.spawn_point(rng, center),
            size,
            height,
            color: kind.color(),
        }
    }

    pub fn cloud<R: Rng + ?Sized>(&mut self, rng: &mut R, center: Vec3D<f32>) -> Cloud {
        let mut position = self.spawn_point(rng, center);
        position.set_y(rng.random_range(Self::CLOUD_ALTITUDE.0..Self::CLOUD_ALTITUDE.1));
        Cloud {
            id: self.next_id(),
            position,
            size: rng.random_range(10.0..30.0),
            speed: rng.random_range(2.0..8.0),
        }
    }

    pub fn obstacle<R: Rng + ?Sized>(&mut self, rng: &mut R, center: Vec3D<f32>) -> Obstacle {
        let mut position = self.spawn_point(rng, center);
        let (kind, size, speed, altitude) = if rng.random_bool(0.7) {
            (ObstacleKind::Bird, rng.random_range(1.0..3.0), rng.random_range(1.0..4.0), (5.0, 40.0))
        } else {
            (ObstacleKind::Storm, rng.random_range(20.0..50.0), rng.random_range(0.5..1.5), (20.0, 60.0))
        };
        position.set_y(rng.random_range(altitude.0..altitude.1));
        Obstacle { id: self.next_id(), kind, position, size, speed }
    }

    pub fn collectible<R: Rng + ?Sized>(&mut self, rng: &mut R, center: Vec3D<f32>) -> Collectible {
        let position = self.spawn_point(rng, center);
        self.collectible_at(rng, position)
    }

    /// Collectible at least `min_distance` away from `center` on the ground plane.
    pub fn collectible_away<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        center: Vec3D<f32>,
        min_distance: f32,
    ) -> Collectible {
        let position = self.spawn_point_away(rng, center, min_distance);
        self.collectible_at(rng, position)
    }

    fn collectible_at<R: Rng + ?Sized>(&mut self, rng: &mut R, mut position: Vec3D<f32>) -> Collectible {
        position.set_y(rng.random_range(Self::COLLECTIBLE_ALTITUDE.0..Self::COLLECTIBLE_ALTITUDE.1));
        let (kind, value) = if rng.random_bool(0.5) {
            (CollectibleKind::Thermal, rng.random_range(Self::THERMAL_IMPULSE.0..Self::THERMAL_IMPULSE.1))
        } else {
            (CollectibleKind::Food, rng.random_range(Self::FOOD_ENERGY.0..Self::FOOD_ENERGY.1))
        };
        Collectible { id: self.next_id(), kind, position, size: rng.random_range(1.5..3.0), value }
    }
}
