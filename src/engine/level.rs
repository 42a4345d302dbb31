// Demo level: a square room of tagged walls plus scattered decoy props.
// Decoys sit on the default layer, so the detector's mask should never report them.

use bevy_ecs::prelude::*;
use glam::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::components::{Color, ColliderShape, Layer, Name, Tag, Transform};
use crate::detector::WALLS_LAYER;

const WALL_COLOR: Color = Color::rgb(0.55, 0.6, 0.7);
const DECOY_COLOR: Color = Color::rgb(0.8, 0.55, 0.2);
const FLOOR_COLOR: Color = Color::rgb(0.15, 0.17, 0.2);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Distance from the room centre to the inner face of each wall.
    pub room_half_size: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
    pub decoy_count: usize,
    pub seed: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            room_half_size: 4.0,
            wall_thickness: 0.5,
            wall_height: 1.5,
            decoy_count: 6,
            seed: 7,
        }
    }
}

/// Marker for geometry the renderer draws but the physics ignores.
#[derive(Component, Debug, Clone, Copy)]
pub struct Scenery {
    pub half_extents: Vec3,
}

/// Spawn walls, decoys and the floor. Walls carry `wall_tag`, which should be the
/// tag the detector registers. Returns the wall entities.
pub fn spawn_level(world: &mut World, config: &LevelConfig, wall_tag: &str) -> Vec<Entity> {
    let h = config.room_half_size + config.wall_thickness * 0.5;
    let half_t = config.wall_thickness * 0.5;
    let half_h = config.wall_height * 0.5;
    let span = config.room_half_size + config.wall_thickness;

    let along_x = Vec3::new(span, half_h, half_t);
    let along_z = Vec3::new(half_t, half_h, span);

    let walls = [
        ("WallNorth", Vec3::new(0.0, half_h, h), along_x),
        ("WallSouth", Vec3::new(0.0, half_h, -h), along_x),
        ("WallEast", Vec3::new(h, half_h, 0.0), along_z),
        ("WallWest", Vec3::new(-h, half_h, 0.0), along_z),
    ];

    let entities: Vec<Entity> = walls
        .into_iter()
        .map(|(name, position, half_extents)| {
            world
                .spawn((
                    Name::new(name),
                    Tag::new(wall_tag),
                    Layer(WALLS_LAYER),
                    Transform::from_position(position),
                    ColliderShape::Cuboid { half_extents },
                    WALL_COLOR,
                ))
                .id()
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let inner = (config.room_half_size - 0.5).max(0.0);
    for i in 0..config.decoy_count {
        let position = Vec3::new(
            rng.gen_range(-inner..=inner),
            0.25,
            rng.gen_range(-inner..=inner),
        );
        world.spawn((
            Name::new(format!("Crate{}", i + 1)),
            Tag::new("Props"),
            Layer::DEFAULT,
            Transform::from_position(position),
            ColliderShape::Cuboid {
                half_extents: Vec3::splat(0.25),
            },
            DECOY_COLOR,
        ));
    }

    world.spawn((
        Transform::from_position(Vec3::new(0.0, -0.05, 0.0)),
        Scenery {
            half_extents: Vec3::new(span, 0.05, span),
        },
        FLOOR_COLOR,
    ));

    log::info!(
        "level: {} walls, {} decoys, room half size {}",
        entities.len(),
        config.decoy_count,
        config.room_half_size
    );
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::WorldRegistry;

    #[test]
    fn spawns_four_tagged_walls() {
        let mut world = World::new();
        let walls = spawn_level(&mut world, &LevelConfig::default(), "Walls");
        assert_eq!(walls.len(), 4);
        let mut tagged = world.find_entities_by_tag("Walls");
        let mut expected = walls.clone();
        tagged.sort();
        expected.sort();
        assert_eq!(tagged, expected);
    }

    #[test]
    fn walls_take_the_given_tag() {
        let mut world = World::new();
        spawn_level(&mut world, &LevelConfig::default(), "Barrier");
        assert_eq!(world.find_entities_by_tag("Barrier").len(), 4);
        assert!(world.find_entities_by_tag("Walls").is_empty());
    }

    #[test]
    fn decoys_stay_inside_the_room() {
        let mut world = World::new();
        let config = LevelConfig {
            decoy_count: 50,
            ..Default::default()
        };
        spawn_level(&mut world, &config, "Walls");
        let props = world.find_entities_by_tag("Props");
        assert_eq!(props.len(), 50);
        for entity in props {
            let p = world.get::<Transform>(entity).unwrap().position;
            let limit = config.room_half_size;
            assert!(p.x.abs() <= limit && p.z.abs() <= limit);
        }
    }
}
