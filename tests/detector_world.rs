//! Drives the detector against a real ECS world, spatial grid and console.

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use wall_probe::detector::{DetectorConfig, LayerMask, ProximityWallDetector};
use wall_probe::engine::components::{ColliderShape, Layer, Name, Tag, Transform};
use wall_probe::engine::console::Console;
use wall_probe::engine::input::{ActionMap, Binding, InputSnapshot, InputState};
use wall_probe::engine::level::{LevelConfig, spawn_level};
use wall_probe::engine::physics::{DEFAULT_CELL_SIZE, SpatialGrid};
use wall_probe::settings::AppSettings;
use wall_probe::{ProbeError, detector::WALLS_LAYER};

fn quiet_level() -> LevelConfig {
    LevelConfig {
        decoy_count: 0,
        ..Default::default()
    }
}

fn setup(level: &LevelConfig) -> (World, SpatialGrid) {
    let mut world = World::new();
    spawn_level(&mut world, level, "Walls");
    let grid = SpatialGrid::from_world(&world, DEFAULT_CELL_SIZE);
    (world, grid)
}

fn lines(console: &Console) -> Vec<String> {
    console.lines().map(str::to_string).collect()
}

/// Ten-unit radius over `layer_mask`, enough to reach every wall from the centre.
fn wide(layer_mask: LayerMask) -> DetectorConfig {
    DetectorConfig {
        radius: 10.0,
        layer_mask,
        ..Default::default()
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
        .with_bound("Move")
        .with_bound("Click")
}

#[test]
fn registers_walls_at_startup() {
    let (world, _) = setup(&quiet_level());
    let mut console = Console::default();
    let mut detector = ProximityWallDetector::new(DetectorConfig::default(), Vec3::ZERO);

    assert_eq!(detector.initialize(&world, &mut console), 4);
    assert_eq!(lines(&console), vec!["Registered 4 walls tagged 'Walls'"]);
}

#[test]
fn registry_is_a_snapshot() {
    let (mut world, _) = setup(&quiet_level());
    let mut detector = ProximityWallDetector::new(DetectorConfig::default(), Vec3::ZERO);
    detector.initialize(&world, &mut Console::default());

    world.spawn((Tag::new("Walls"), Transform::default()));
    assert_eq!(detector.walls().len(), 4);

    let mut fresh = ProximityWallDetector::new(DetectorConfig::default(), Vec3::ZERO);
    assert_eq!(fresh.initialize(&world, &mut Console::default()), 5);
}

#[test]
fn centre_of_room_sees_nothing() {
    let (world, grid) = setup(&quiet_level());
    let mut console = Console::default();
    let mut detector = ProximityWallDetector::new(DetectorConfig::default(), Vec3::ZERO);
    detector.initialize(&world, &mut console);

    let report = detector.tick(0.016, &idle().with_pressed("Click"), &grid, &mut console);
    assert!(report.detection.unwrap().is_empty());
    assert_eq!(lines(&console), vec!["No collisions with radius 0.5"]);
}

#[test]
fn walking_north_reaches_the_north_wall() {
    let (world, grid) = setup(&quiet_level());
    let mut console = Console::default();
    let mut detector = ProximityWallDetector::new(DetectorConfig::default(), Vec3::ZERO);
    detector.initialize(&world, &mut console);

    // Stick X drives +Z.
    let walk = idle().with_axis("Move", Vec2::new(1.0, 0.0));
    for _ in 0..7 {
        let report = detector.tick(0.5, &walk, &grid, &mut console);
        assert!(report.detection.is_none());
    }
    let offset = detector.position() - Vec3::new(0.0, 0.0, 3.5);
    assert!(offset.length() < 1e-4);

    let report = detector.tick(0.0, &idle().with_pressed("Click"), &grid, &mut console);
    let detection = report.detection.unwrap();
    assert_eq!(detection.len(), 1);
    assert_eq!(detection.hits[0].collider.name, "WallNorth");
    assert_eq!(
        lines(&console),
        vec![
            "Collider 1 is WallNorth",
            "Collider 1 alignment 1.000",
            "Has 1 collisions with radius 0.5",
        ]
    );
}

#[test]
fn move_happens_before_detect_in_the_same_tick() {
    let (_, grid) = setup(&quiet_level());
    let mut console = Console::default();
    let mut detector =
        ProximityWallDetector::new(DetectorConfig::default(), Vec3::new(3.0, 0.0, 0.0));

    // Stick -Y drives +X: one second at full tilt carries the agent to x = 4, the east face.
    let input = idle()
        .with_axis("Move", Vec2::new(0.0, -1.0))
        .with_pressed("Click");
    let report = detector.tick(1.0, &input, &grid, &mut console);

    assert_eq!(report.displacement, Vec3::new(1.0, 0.0, 0.0));
    let detection = report.detection.unwrap();
    assert_eq!(detection.len(), 1);
    assert_eq!(detection.hits[0].collider.name, "WallEast");
    let score = detection.hits[0].alignment.unwrap();
    assert!(score.abs() < 1e-5, "east wall is to the side: {score}");
}

#[test]
fn hit_iff_within_radius() {
    let (_, grid) = setup(&quiet_level());
    let radius = 0.5;
    // East wall inner face at x = 4.
    for step in 0..=40 {
        let x = 3.0 + step as f32 * 0.025;
        let detector = ProximityWallDetector::new(
            DetectorConfig {
                radius,
                ..Default::default()
            },
            Vec3::new(x, 0.0, 0.0),
        );
        let detection = detector.detect(&grid, &mut Console::default());
        let expected = 4.0 - x <= radius;
        assert_eq!(!detection.is_empty(), expected, "x = {x}");
    }
}

#[test]
fn south_wall_scores_behind() {
    let (_, grid) = setup(&quiet_level());
    let detector =
        ProximityWallDetector::new(DetectorConfig::default(), Vec3::new(0.0, 0.0, -3.8));
    let detection = detector.detect(&grid, &mut Console::default());
    assert_eq!(detection.len(), 1);
    let score = detection.hits[0].alignment.unwrap();
    assert!((score + 1.0).abs() < 1e-5);
}

#[test]
fn corner_reports_two_walls() {
    let (_, grid) = setup(&quiet_level());
    let detector =
        ProximityWallDetector::new(DetectorConfig::default(), Vec3::new(3.8, 0.0, 3.8));
    let mut console = Console::default();
    let detection = detector.detect(&grid, &mut console);

    let mut names: Vec<_> = detection
        .hits
        .iter()
        .map(|h| h.collider.name.clone())
        .collect();
    names.sort();
    assert_eq!(names, vec!["WallEast", "WallNorth"]);
    let summary = console.lines().last();
    assert_eq!(summary, Some("Has 2 collisions with radius 0.5"));
}

#[test]
fn repeated_detect_returns_same_set() {
    let (_, grid) = setup(&quiet_level());
    let walls = LayerMask::from_layers(&[WALLS_LAYER]);
    let detector = ProximityWallDetector::new(wide(walls), Vec3::ZERO);
    let detect_once = || -> Vec<Entity> {
        detector
            .detect(&grid, &mut Console::default())
            .entities()
            .collect()
    };
    let mut first = detect_once();
    let mut second = detect_once();
    first.sort();
    second.sort();
    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn decoys_only_show_up_when_their_layer_is_masked_in() {
    let level = LevelConfig {
        decoy_count: 30,
        ..Default::default()
    };
    let (_, grid) = setup(&level);

    let walls = DetectorConfig::default().layer_mask;
    let walls_only = ProximityWallDetector::new(wide(walls), Vec3::ZERO);
    assert_eq!(walls_only.detect(&grid, &mut Console::default()).len(), 4);

    let everything = ProximityWallDetector::new(wide(LayerMask::ALL), Vec3::ZERO);
    assert_eq!(everything.detect(&grid, &mut Console::default()).len(), 34);
}

#[test]
fn held_detect_clears_console_every_tick() {
    let (world, grid) = setup(&quiet_level());
    let mut console = Console::default();
    let mut detector = ProximityWallDetector::new(DetectorConfig::default(), Vec3::ZERO);
    detector.initialize(&world, &mut console);

    let click = idle().with_pressed("Click");
    for _ in 0..3 {
        detector.tick(0.016, &click, &grid, &mut console);
        assert_eq!(console.len(), 1);
    }
}

#[test]
fn wall_directly_on_agent_has_no_score() {
    let mut world = World::new();
    world.spawn((
        Name::new("Pillar"),
        Tag::new("Walls"),
        Layer(WALLS_LAYER),
        Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
        ColliderShape::Sphere { radius: 0.3 },
    ));
    let grid = SpatialGrid::from_world(&world, DEFAULT_CELL_SIZE);
    let config = DetectorConfig {
        radius: 2.0,
        ..Default::default()
    };
    let detector = ProximityWallDetector::new(config, Vec3::ZERO);
    let mut console = Console::default();
    let detection = detector.detect(&grid, &mut console);

    assert_eq!(detection.hits[0].alignment, None);
    assert!(console.lines().any(|l| l == "Collider 1 alignment n/a"));
}

#[test]
fn unbound_detect_action_fails_validation() {
    let mut actions = ActionMap::new();
    actions.bind("Move", Binding::Mouse(winit::event::MouseButton::Right));
    let snapshot = actions.snapshot(&InputState::new());

    let err = DetectorConfig::default().validate(&snapshot).unwrap_err();
    assert!(matches!(err, ProbeError::MissingAction(ref name) if name == "Click"));
    let defaults = ActionMap::with_default_bindings().snapshot(&InputState::new());
    assert!(DetectorConfig::default().validate(&defaults).is_ok());
}

#[test]
fn renamed_wall_tag_reaches_the_level() {
    let settings = AppSettings::from_ron(
        Path::new("inline"),
        r#"(detector: (wall_tag: "Barrier"), level: (decoy_count: 0))"#,
    )
    .unwrap();
    let mut world = World::new();
    spawn_level(&mut world, &settings.level, &settings.detector.wall_tag);

    let mut console = Console::default();
    let mut detector = ProximityWallDetector::new(settings.detector, Vec3::ZERO);
    assert_eq!(detector.initialize(&world, &mut console), 4);
    assert_eq!(lines(&console), vec!["Registered 4 walls tagged 'Barrier'"]);
}
