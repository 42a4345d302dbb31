// Core ECS components for the demo world
// Everything the spatial grid, tag registry and renderer read lives here

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::detector::LayerMask;

/// Position of an entity in 3D space
#[derive(Component, Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }
}

/// RGB color for rendering
#[derive(Component, Debug, Clone, Copy)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// Display name reported by overlap queries
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Classification tag, matched exactly by the world registry
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Classification layer index in `0..32`. Entities without one sit on layer 0.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layer(pub u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);

    pub fn mask(self) -> LayerMask {
        LayerMask::from_layers(&[self.0])
    }
}

/// Collision volume centred on the entity's `Transform`.
///
/// Boxes are axis-aligned; nothing in this world rotates.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Point,
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    /// Distance from `point` to the surface of this shape placed at `center`.
    /// Zero when `point` is inside.
    pub fn distance_to(&self, center: Vec3, point: Vec3) -> f32 {
        match *self {
            ColliderShape::Point => center.distance(point),
            ColliderShape::Sphere { radius } => (center.distance(point) - radius).max(0.0),
            ColliderShape::Cuboid { half_extents } => {
                let local = point - center;
                let closest = local.clamp(-half_extents, half_extents);
                local.distance(closest)
            }
        }
    }

    /// Half-size of the shape's bounding box.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            ColliderShape::Point => Vec3::ZERO,
            ColliderShape::Sphere { radius } => Vec3::splat(radius),
            ColliderShape::Cuboid { half_extents } => half_extents,
        }
    }
}
