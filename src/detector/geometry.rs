// Pure math behind the detector: input-to-motion mapping and facing alignment.

use glam::{Quat, Vec2, Vec3};

/// Local-space displacement for one tick of 2D move input.
///
/// Input `(mx, my)` maps to `(-my, 0, mx)`: the stick's Y axis drives the
/// agent's negative X and the stick's X axis drives Z. The result is scaled by
/// `dt` and keeps the input's magnitude, so a half-tilted stick moves half as far.
pub fn movement_delta(input: Vec2, dt: f32) -> Vec3 {
    Vec3::new(-input.y, 0.0, input.x) * dt
}

/// Unit forward vector for an agent rotated by `yaw_degrees` around +Y.
/// Yaw 0 faces +Z.
pub fn facing_from_yaw(yaw_degrees: f32) -> Vec3 {
    Quat::from_rotation_y(yaw_degrees.to_radians()) * Vec3::Z
}

/// Dot product between `facing` and the horizontal direction from `agent` to `target`.
///
/// The target is flattened onto the agent's height first, so vertical offset
/// never tilts the direction. Returns `None` when the flattened offset has zero
/// length (target directly above, below, or on the agent). `facing` must be unit length.
pub fn alignment_score(agent: Vec3, facing: Vec3, target: Vec3) -> Option<f32> {
    let flattened = Vec3::new(target.x, agent.y, target.z) - agent;
    let direction = flattened.try_normalize()?;
    Some(direction.dot(facing).clamp(-1.0, 1.0))
}
