//! Headless sandbox for the wire engine
//!
//! Builds one room from an ASCII map, registers its walls and a few actors
//! in a physics world, then runs a turret sight check, a hit-scan shot, a
//! collision pass and an enemy path solve. Results go to the log.
//!
//! Usage: `wire_sandbox [config.toml|config.ron]`

use std::cell::RefCell;
use std::rc::Rc;

use wire_engine::config::Config;
use wire_engine::navigation::{Pathfinder, RoomGrid, TileMap, TileType};
use wire_engine::physics::{
    CircleCollider, Collider, CollisionListener, CompoundCollider, LayerMask, LineCollider,
    ListenerHandle, PhysicsLayer, PhysicsResult, PhysicsWorld, RaycastFilter,
};
use wire_engine::foundation::math::{utils, Vec2, Vec2i};
use wire_engine::EngineConfig;

const ROOM: &str = "\
##########
#........#
#..##....#
#..#.....#
#........#
####D#####";

const PLAYER_RADIUS: f64 = 0.3;
const ENEMY_RADIUS: f64 = 0.35;

/// Logs every contact the player takes part in
#[derive(Default)]
struct PlayerEvents {
    contacts: usize,
    pushes: usize,
}

impl CollisionListener for PlayerEvents {
    fn on_collision(&mut self, this: &Collider, other: &Collider) {
        self.contacts += 1;
        log::info!(
            "player ({}) touched {} on {}",
            this.kind_name(),
            other.kind_name(),
            other.layer().name()
        );
    }

    fn on_resolution(&mut self, circle: &CircleCollider, other: &Collider) {
        self.pushes += 1;
        let center = circle.center();
        log::info!(
            "player pushed out of {} to ({:.3}, {:.3})",
            other.layer().name(),
            center.x,
            center.y
        );
    }
}

/// Four edges around one tile, as a single compound
fn tile_box(cell: Vec2i, tile_size: f64, layer: PhysicsLayer) -> PhysicsResult<CompoundCollider> {
    let min = Vec2::new(f64::from(cell.x), f64::from(cell.y)) * tile_size;
    let corners = [
        min,
        min + Vec2::new(tile_size, 0.0),
        min + Vec2::new(tile_size, tile_size),
        min + Vec2::new(0.0, tile_size),
    ];
    let edges = (0..4)
        .map(|i| LineCollider::new(corners[i], corners[(i + 1) % 4], layer).map(Collider::from))
        .collect::<PhysicsResult<Vec<_>>>()?;
    CompoundCollider::new(edges, layer)
}

fn load_config() -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(EngineConfig::load_from_file(&path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn run(config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tile_size = config.navigation.tile_size;
    let map: TileMap = ROOM.parse()?;
    let room = map.room_at(Vec2i::new(1, 1)).ok_or("seed cell is not walkable")?;
    log::info!(
        "room has {} tiles, {} floor, {} doors",
        room.len(),
        room.floor_cells().count(),
        room.doors().count()
    );

    let mut world = PhysicsWorld::with_settings(config.physics.clone());
    for (cell, tile) in map.cells().filter(|(cell, _)| room.contains(*cell)) {
        let layer = match tile {
            TileType::Wall => PhysicsLayer::Solid,
            TileType::Door | TileType::Glass => PhysicsLayer::SemiSolid,
            TileType::None | TileType::Floor => continue,
        };
        world.insert(tile_box(cell, tile_size, layer)?);
    }
    log::info!("registered {} wall and door colliders", world.len());

    let events = Rc::new(RefCell::new(PlayerEvents::default()));
    let turret_cell = Vec2i::new(8, 1);
    let turret_pos = utils::cell_center(turret_cell, tile_size);
    let enemy_cell = Vec2i::new(1, 4);

    let player_start = Vec2::new(4.2, 3.5) * tile_size;
    let mut player = CircleCollider::new(player_start, PLAYER_RADIUS, PhysicsLayer::Player)?;
    player.set_listener(Some(ListenerHandle::new(&events)));
    let player_mask = LayerMask::SOLID | LayerMask::SEMISOLID | LayerMask::ENEMY;
    let player = world.insert_with_mask(player, player_mask);
    let enemy_start = utils::cell_center(enemy_cell, tile_size);
    world.insert(CircleCollider::new(enemy_start, ENEMY_RADIUS, PhysicsLayer::Enemy)?);

    let sight = RaycastFilter::new()
        .terminate_on(LayerMask::SOLID | LayerMask::SEMISOLID | LayerMask::PLAYER)
        .exclude(LayerMask::ENEMY);
    let player_pos = world.get(player).map(Collider::position).ok_or("player missing")?;
    let visible = world.has_line_of_sight(turret_pos, player_pos, PhysicsLayer::Player, &sight);
    log::info!("turret at ({}, {}) sees player: {}", turret_cell.x, turret_cell.y, visible);

    let hit_scan = RaycastFilter::new().terminate_on(LayerMask::SOLID);
    let shot = world.raycast_direction(turret_pos, Vec2::new(-1.0, 0.0), &hit_scan)?;
    for hit in &shot {
        log::info!(
            "shot hit {} at ({:.3}, {:.3}), distance {:.3}",
            hit.layer.name(),
            hit.point.x,
            hit.point.y,
            hit.distance
        );
    }

    let pairs = world.detect_collisions().len();
    log::info!("{} colliding pairs, {} new", pairs, world.collisions_entered().len());
    if world.resolve_collisions(player)? {
        world.detect_collisions();
        log::info!("{} pairs separated after resolution", world.collisions_exited().len());
    }

    let goal = utils::world_to_cell(player_pos, tile_size);
    match Pathfinder::new(config.navigation.clone()).solve_path(enemy_cell, goal, &room) {
        Some(path) => {
            let cells: Vec<String> = path.cells().map(|c| format!("({},{})", c.x, c.y)).collect();
            log::info!("enemy path cost {:.3}: {}", path.cost(), cells.join(" -> "));
            if let Some(next) = path.next_waypoint_after(enemy_cell) {
                let target = utils::cell_center(next, tile_size);
                log::info!("enemy heads for ({:.2}, {:.2})", target.x, target.y);
            }
        }
        None => log::warn!("enemy has no route to ({}, {})", goal.x, goal.y),
    }

    let events = events.borrow();
    log::info!("player saw {} contacts and {} pushes", events.contacts, events.pushes);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    config.init_logging();

    log::info!("Starting wire sandbox");

    match run(&config) {
        Ok(()) => {
            log::info!("Sandbox completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Sandbox failed: {:?}", e);
            Err(e)
        }
    }
}
