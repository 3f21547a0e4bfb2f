use super::{CollectibleEffect, CollectibleKind, EntityGenerator, ObstacleKind, WorldSimulation};
use crate::flight_control::{FlightPhysics, common::Vec3D};
use rand::Rng;

const DT: f32 = FlightPhysics::NOMINAL_DT;

fn all_positions(world: &WorldSimulation) -> Vec<Vec3D<f32>> {
    let mut positions: Vec<Vec3D<f32>> = world.terrain().iter().map(|t| t.position).collect();
    positions.extend(world.clouds().iter().map(|c| c.position));
    positions.extend(world.obstacles().iter().map(|o| o.position));
    positions.extend(world.collectibles().iter().map(|c| c.position));
    positions
}

#[test]
fn test_initial_population() {
    let world = WorldSimulation::new(Vec3D::new(0.0, 10.0, 0.0));
    assert_eq!(world.populations(), WorldSimulation::INITIAL);
    assert_eq!(world.last_region(), (0, 0));
    assert_eq!(world.generation_batches(), 0);
    for p in all_positions(&world) {
        assert!(p.planar_distance(&Vec3D::zero()) <= EntityGenerator::SPAWN_RADIUS + 1e-3);
    }
}

#[test]
fn test_region_transition_generates_one_batch_and_culls() {
    let mut world = WorldSimulation::new(Vec3D::new(0.0, 10.0, 0.0));
    let tick = world.update(Vec3D::new(50.0, 10.0, 0.0), DT);
    assert!(!tick.region_changed);
    assert_eq!(world.generation_batches(), 0);

    let far = world.place_collectible(CollectibleKind::Food, Vec3D::new(1000.0, 10.0, 1000.0), 2.0, 15.0);
    let before = world.populations();

    let player = Vec3D::new(100.5, 10.0, 0.0);
    let tick = world.update(player, DT);
    assert!(tick.region_changed);
    assert_eq!(world.last_region(), (1, 0));
    assert_eq!(world.generation_batches(), 1);

    let after = world.populations();
    assert_eq!(after.terrain, before.terrain + WorldSimulation::INCREMENT.terrain);
    assert_eq!(after.clouds, before.clouds + WorldSimulation::INCREMENT.clouds);
    assert_eq!(after.obstacles, before.obstacles + WorldSimulation::INCREMENT.obstacles);
    // the far collectible is gone, pickups are replaced one for one
    assert_eq!(after.collectibles, before.collectibles + WorldSimulation::INCREMENT.collectibles - 1);
    assert!(world.collectibles().iter().all(|c| c.id != far));

    assert!(world.terrain().iter().all(|t| t.position.planar_distance(&player) <= WorldSimulation::CULL_DISTANCE));
    assert!(world.collectibles().iter().all(|c| c.position.euclid_distance(&player) <= WorldSimulation::CULL_DISTANCE));

    // staying inside the region does not generate again
    world.update(Vec3D::new(150.0, 10.0, 50.0), DT);
    assert_eq!(world.generation_batches(), 1);
}

#[test]
fn test_food_pickup_restores_energy() {
    let player = Vec3D::new(0.0, 10.0, 0.0);
    let mut world = WorldSimulation::empty(player);
    let food = world.place_collectible(CollectibleKind::Food, Vec3D::new(1.0, 10.0, 0.0), 1.0, 20.0);

    let mut bird = *FlightPhysics::new().state();
    bird.energy = 50.0;
    let mut physics = FlightPhysics::with_state(bird);

    let tick = world.update(player, DT);
    assert_eq!(tick.effect, Some(CollectibleEffect::Food { energy: 20.0 }));
    if let Some(CollectibleEffect::Food { energy }) = tick.effect {
        physics.restore_energy(energy);
    }
    assert!((physics.state().energy - 70.0).abs() < 1e-4);

    assert_eq!(world.collectibles().len(), 1);
    let replacement = &world.collectibles()[0];
    assert_ne!(replacement.id, food);
    assert!(replacement.position.planar_distance(&player) >= WorldSimulation::REPLACEMENT_DISTANCE - 1e-3);
}

#[test]
fn test_thermal_pickup() {
    let player = Vec3D::new(300.0, 20.0, -250.0);
    let mut world = WorldSimulation::empty(player);
    world.place_collectible(CollectibleKind::Thermal, Vec3D::new(301.0, 21.0, -250.0), 1.5, 0.1);
    let tick = world.update(player, DT);
    assert_eq!(tick.effect, Some(CollectibleEffect::Thermal { impulse: 0.1 }));
}

#[test]
fn test_out_of_reach_collectible_stays() {
    let player = Vec3D::new(0.0, 10.0, 0.0);
    let mut world = WorldSimulation::empty(player);
    world.place_collectible(CollectibleKind::Food, Vec3D::new(0.0, 10.0, 3.5), 1.0, 20.0);
    let tick = world.update(player, DT);
    assert_eq!(tick.effect, None);
    assert_eq!(world.collectibles().len(), 1);
}

#[test]
fn test_one_pickup_per_tick() {
    let player = Vec3D::new(0.0, 10.0, 0.0);
    let mut world = WorldSimulation::empty(player);
    let first = world.place_collectible(CollectibleKind::Food, Vec3D::new(1.0, 10.0, 0.0), 1.0, 10.0);
    let second = world.place_collectible(CollectibleKind::Food, Vec3D::new(0.0, 10.0, 1.0), 1.0, 25.0);

    let tick = world.update(player, DT);
    assert_eq!(tick.effect, Some(CollectibleEffect::Food { energy: 10.0 }));
    assert_eq!(world.collectibles().len(), 2);
    assert!(world.collectibles().iter().all(|c| c.id != first));
    assert!(world.collectibles().iter().any(|c| c.id == second));

    let tick = world.update(player, DT);
    assert_eq!(tick.effect, Some(CollectibleEffect::Food { energy: 25.0 }));
    assert_eq!(world.update(player, DT).effect, None);
}

#[test]
fn test_entities_stay_in_bounds() {
    let mut rng = rand::rng();
    let mut world = WorldSimulation::new(Vec3D::new(0.0, 10.0, 0.0));
    let limit = WorldSimulation::HALF_EXTENT + 1e-3;
    for _ in 0..300 {
        let player = Vec3D::new(rng.random_range(-1500.0..1500.0), 10.0, rng.random_range(-1500.0..1500.0));
        world.update(player, 1.0);
        for p in all_positions(&world) {
            assert!(p.x().abs() <= limit && p.z().abs() <= limit, "{p} out of bounds");
        }
    }
}

#[test]
fn test_replacement_spawn_keeps_distance_near_edges() {
    let mut rng = rand::rng();
    let mut generator = EntityGenerator::new(WorldSimulation::HALF_EXTENT);
    let corners = [(1000.0, 1000.0), (-1000.0, 1000.0), (999.0, -1000.0), (0.0, 0.0)];
    for (x, z) in corners {
        let center = Vec3D::new(x, 10.0, z);
        for _ in 0..100 {
            let c = generator.collectible_away(&mut rng, center, WorldSimulation::REPLACEMENT_DISTANCE);
            let d = c.position.planar_distance(&center);
            assert!(d >= WorldSimulation::REPLACEMENT_DISTANCE - 1e-3, "{d}");
            assert!(c.position.x().abs() <= WorldSimulation::HALF_EXTENT);
            assert!(c.position.z().abs() <= WorldSimulation::HALF_EXTENT);
        }
    }
}

#[test]
fn test_view_is_distance_filtered() {
    let player = Vec3D::new(0.0, 10.0, 0.0);
    let mut world = WorldSimulation::new(player);
    let view = world.update(player, DT).view;

    assert!(view.terrain.iter().all(|t| t.position.planar_distance(&player) <= WorldSimulation::VIEW_DISTANCE));
    assert!(view.clouds.iter().all(|c| c.position.euclid_distance(&player) <= WorldSimulation::VIEW_DISTANCE));
    let near_obstacles = world
        .obstacles()
        .iter()
        .filter(|o| o.position.euclid_distance(&player) <= WorldSimulation::VIEW_DISTANCE)
        .count();
    assert_eq!(view.obstacles.len(), near_obstacles);
    assert!(view.terrain.len() <= world.terrain().len());
}

#[test]
fn test_region_of_negative_coordinates() {
    assert_eq!(WorldSimulation::region_of(Vec3D::new(-0.5, 0.0, 250.0)), (-1, 2));
    assert_eq!(WorldSimulation::region_of(Vec3D::new(99.9, 0.0, -100.0)), (0, -1));
}

#[test]
fn test_clouds_drift_and_wrap() {
    let player = Vec3D::new(0.0, 10.0, 0.0);
    let mut world = WorldSimulation::empty(player);
    let edge = world.place_cloud(Vec3D::new(998.0, 80.0, 20.0), 15.0, 5.0);
    let middle = world.place_cloud(Vec3D::new(0.0, 80.0, -40.0), 15.0, 5.0);

    world.update(player, 1.0);
    let cloud = |id: u64| world.clouds().iter().find(|c| c.id == id).map(|c| c.position);
    let edge_pos = cloud(edge).unwrap();
    assert!((edge_pos.x() + 997.0).abs() < 1e-2, "{edge_pos}");
    assert_eq!((edge_pos.y(), edge_pos.z()), (80.0, 20.0));
    let middle_pos = cloud(middle).unwrap();
    assert!((middle_pos.x() - 5.0).abs() < 1e-4, "{middle_pos}");
    assert_eq!((middle_pos.y(), middle_pos.z()), (80.0, -40.0));
}

#[test]
fn test_obstacles_walk_within_reach_and_bounds() {
    let player = Vec3D::new(0.0, 10.0, 0.0);
    let mut world = WorldSimulation::empty(player);
    world.place_obstacle(ObstacleKind::Bird, Vec3D::new(998.0, 20.0, -998.0), 2.0, 4.0);
    world.place_obstacle(ObstacleKind::Storm, Vec3D::new(10.0, 40.0, 10.0), 30.0, 1.0);
    let elapsed = 0.5;

    for _ in 0..200 {
        let before: Vec<_> = world.obstacles().iter().map(|o| (o.position, o.speed)).collect();
        world.update(player, elapsed);
        for ((prev, speed), now) in before.iter().zip(world.obstacles()) {
            let reach = speed * elapsed + 1e-3;
            let p = now.position;
            assert!((p.x() - prev.x()).abs() <= reach && (p.z() - prev.z()).abs() <= reach, "{prev} -> {p}");
            assert_eq!(p.y(), prev.y());
            assert!(p.x().abs() <= WorldSimulation::HALF_EXTENT && p.z().abs() <= WorldSimulation::HALF_EXTENT);
        }
    }
    assert_eq!(world.obstacles().len(), 2);
}

#[test]
fn test_flying_past_the_edge_keeps_a_world() {
    let mut world = WorldSimulation::new(Vec3D::new(0.0, 10.0, 0.0));
    let mut seen = 0;
    let mut z = 0.0;
    while z < 2601.0 {
        z += 3.0;
        let view = world.update(Vec3D::new(0.0, 10.0, z), DT).view;
        seen = view.terrain.len() + view.clouds.len() + view.obstacles.len() + view.collectibles.len();
    }
    assert!(world.populations().total() > 0);
    assert!(seen > 0);
    let (_, region_z) = world.last_region();
    assert!((-10..10).contains(&region_z), "{region_z}");
    for p in all_positions(&world) {
        assert!(p.x().abs() <= WorldSimulation::HALF_EXTENT && p.z().abs() <= WorldSimulation::HALF_EXTENT);
    }
}

#[test]
fn test_border_hovering_stays_within_capacity() {
    let mut world = WorldSimulation::new(Vec3D::new(0.0, 10.0, 0.0));
    for i in 0..1000 {
        let x = if i % 2 == 0 { 101.0 } else { 99.0 };
        world.update(Vec3D::new(x, 10.0, 0.0), DT);
    }
    assert_eq!(world.generation_batches(), 1000);
    let p = world.populations();
    let cap = WorldSimulation::CAPACITY;
    assert!(p.terrain <= cap.terrain && p.clouds <= cap.clouds, "{p:?}");
    assert!(p.obstacles <= cap.obstacles && p.collectibles <= cap.collectibles, "{p:?}");
    assert!(p.total() >= WorldSimulation::INITIAL.total());
}

#[test]
fn test_populations_bounded_by_capacity() {
    let current = super::Populations { terrain: 44, clouds: 30, obstacles: 3, collectibles: 40 };
    let batch = WorldSimulation::INCREMENT.bounded_by(current, WorldSimulation::CAPACITY);
    assert_eq!(batch, super::Populations { terrain: 1, clouds: 0, obstacles: 1, collectibles: 0 });
}
