//! Proximity wall detection for a player-driven agent.
//!
//! The detector owns the agent's position and a snapshot of the wall registry.
//! Each tick it applies move input, and while the detect input is held it
//! queries the host's spatial index for colliders inside its radius and reports
//! them to a diagnostic sink. All host services arrive as trait arguments, so
//! the same code runs under the windowed demo and under plain unit tests.

pub mod config;
pub mod geometry;
pub mod ports;

use bevy_ecs::entity::Entity;
use glam::{Quat, Vec3};

pub use config::{DetectorConfig, WALLS_LAYER};
pub use ports::{
    Collider, DiagnosticSink, GizmoRenderer, InputSource, LayerMask, SpatialIndex, WireSphere,
    WorldRegistry,
};

use geometry::{alignment_score, facing_from_yaw, movement_delta};

/// One collider found by a detect query.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub collider: Collider,
    /// Alignment of the hit with the agent's facing, in `[-1, 1]`.
    /// `None` when scoring is disabled or the hit sits on the agent's vertical axis.
    pub alignment: Option<f32>,
}

/// Result of one detect query. Built fresh every time, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub hits: Vec<Hit>,
    pub radius: f32,
}

impl Detection {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.hits.iter().map(|hit| hit.collider.entity)
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// World-space displacement applied this tick.
    pub displacement: Vec3,
    /// Present only on ticks where the detect input was held.
    pub detection: Option<Detection>,
}

pub struct ProximityWallDetector {
    config: DetectorConfig,
    position: Vec3,
    rotation: Quat,
    walls: Vec<Entity>,
}

impl ProximityWallDetector {
    pub fn new(config: DetectorConfig, position: Vec3) -> Self {
        let rotation = Quat::from_rotation_y(config.facing_yaw_degrees.to_radians());
        Self {
            config,
            position,
            rotation,
            walls: Vec::new(),
        }
    }

    /// Snapshot every entity carrying the wall tag. Later world changes are not tracked.
    /// Returns the registry size.
    pub fn initialize(
        &mut self,
        world: &impl WorldRegistry,
        sink: &mut impl DiagnosticSink,
    ) -> usize {
        self.walls = world.find_entities_by_tag(&self.config.wall_tag);
        let count = self.walls.len();
        sink.log(&format!(
            "Registered {} walls tagged '{}'",
            count, self.config.wall_tag
        ));
        count
    }

    /// Advance one frame: move first, then detect if requested.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &impl InputSource,
        index: &impl SpatialIndex,
        sink: &mut impl DiagnosticSink,
    ) -> TickReport {
        let mut report = TickReport::default();

        if input.is_pressed(&self.config.move_action) {
            let local = movement_delta(input.read_vec2(&self.config.move_action), dt);
            report.displacement = self.translate(local);
        }

        if input.is_pressed(&self.config.detect_action) {
            sink.clear();
            report.detection = Some(self.detect(index, sink));
        }

        report
    }

    /// Move by `local_delta` expressed in the agent's own frame. Returns the world-space delta.
    pub fn translate(&mut self, local_delta: Vec3) -> Vec3 {
        let world_delta = self.rotation * local_delta;
        self.position += world_delta;
        world_delta
    }

    /// Query the index around the agent and report every hit to `sink`.
    pub fn detect(&self, index: &impl SpatialIndex, sink: &mut impl DiagnosticSink) -> Detection {
        let radius = self.config.radius;
        let colliders = index.overlap_sphere(self.position, radius, self.config.layer_mask);

        for (i, collider) in colliders.iter().enumerate() {
            sink.log(&format!("Collider {} is {}", i + 1, collider.name));
        }

        let facing = self.facing();
        let hits: Vec<Hit> = colliders
            .into_iter()
            .map(|collider| {
                let alignment = if self.config.score_alignment {
                    alignment_score(self.position, facing, collider.position)
                } else {
                    None
                };
                Hit {
                    collider,
                    alignment,
                }
            })
            .collect();

        if self.config.score_alignment {
            for (i, hit) in hits.iter().enumerate() {
                match hit.alignment {
                    Some(score) => sink.log(&format!("Collider {} alignment {:.3}", i + 1, score)),
                    None => sink.log(&format!("Collider {} alignment n/a", i + 1)),
                }
            }
        }

        if hits.is_empty() {
            sink.log(&format!("No collisions with radius {}", radius));
        } else {
            let count = hits.len();
            sink.log(&format!("Has {count} collisions with radius {radius}"));
        }

        log::debug!("detect at {:?}: {} hits", self.position, hits.len());

        Detection { hits, radius }
    }

    pub fn wire_sphere(&self) -> WireSphere {
        WireSphere {
            center: self.position,
            radius: self.config.radius,
        }
    }

    pub fn draw_gizmos(&self, renderer: &mut impl GizmoRenderer) {
        let sphere = self.wire_sphere();
        renderer.draw_wire_sphere(sphere.center, sphere.radius);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit forward vector of the agent.
    pub fn facing(&self) -> Vec3 {
        facing_from_yaw(self.config.facing_yaw_degrees)
    }

    pub fn walls(&self) -> &[Entity] {
        &self.walls
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}
