// Capabilities the detector consumes from its host.
// The detector never touches a scene graph, a physics engine or a window; the
// host hands these in on every call so tests can substitute plain data.

use bevy_ecs::entity::Entity;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Bitmask over the 32 classification layers an entity can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask selecting exactly the given layer indices. Indices >= 32 are ignored.
    pub fn from_layers(layers: &[u8]) -> Self {
        let bits = layers
            .iter()
            .filter(|&&l| l < 32)
            .fold(0u32, |acc, &l| acc | (1 << l));
        Self(bits)
    }

    pub fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

/// One hit from an overlap query: which entity, what it is called, and where it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub entity: Entity,
    pub name: String,
    pub position: Vec3,
}

/// Named, per-frame input queries.
pub trait InputSource {
    /// Whether `action` is bound at all. Used once at startup.
    fn has_action(&self, action: &str) -> bool;
    fn is_pressed(&self, action: &str) -> bool;
    /// Current 2D value of `action`; zero for unbound or button-only actions.
    fn read_vec2(&self, action: &str) -> Vec2;
}

/// Spatial query over the colliders of the world.
pub trait SpatialIndex {
    /// All colliders within `radius` of `center` whose layer is selected by `mask`.
    ///
    /// The order is whatever the index produces and must not be relied upon.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Collider>;
}

/// Tag lookup over the entities currently alive in the world.
pub trait WorldRegistry {
    fn find_entities_by_tag(&self, tag: &str) -> Vec<Entity>;
}

/// Where diagnostic lines end up.
pub trait DiagnosticSink {
    fn log(&mut self, line: &str);
    fn clear(&mut self);
}

/// Wireframe sphere an external renderer can draw around the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Debug-draw hook for an external renderer.
pub trait GizmoRenderer {
    fn draw_wire_sphere(&mut self, center: Vec3, radius: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_mask_from_layers() {
        let mask = LayerMask::from_layers(&[0, 6]);
        assert_eq!(mask.0, 0b100_0001);
        assert!(mask.contains(0));
        assert!(mask.contains(6));
        assert!(!mask.contains(1));
    }

    #[test]
    fn layer_mask_ignores_out_of_range() {
        let mask = LayerMask::from_layers(&[31, 32, 200]);
        assert_eq!(mask.0, 1 << 31);
        assert!(!mask.contains(32));
    }
}
