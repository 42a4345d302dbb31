// Follow camera for the demo
//
// Camera model:
//   - Looks at the agent's position every frame (no lag)
//   - Fixed pitch (elevation angle) and yaw (horizontal rotation)
//   - Mouse wheel zooms by adjusting distance along the look vector

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::input::InputState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowCamera {
    /// Point the camera orbits around. Set from the agent each frame.
    #[serde(skip)]
    target: Vec3,

    /// Distance from target along the look direction.
    /// Always clamped to [min_distance, max_distance] in update().
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    /// Elevation angle in degrees (0 = horizontal, 90 = straight down)
    pub pitch_degrees: f32,

    /// Horizontal rotation in degrees (0 = camera sits on +Z looking toward -Z)
    pub yaw_degrees: f32,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    /// Zoom change (in distance units) per scroll line
    pub zoom_speed: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 14.0,
            min_distance: 4.0,
            max_distance: 40.0,
            pitch_degrees: 55.0,
            yaw_degrees: 0.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 200.0,
            zoom_speed: 1.5,
        }
    }
}

impl FollowCamera {
    /// Track `target` and apply zoom input. Call once per frame before rendering.
    pub fn update(&mut self, target: Vec3, input: &InputState) {
        self.target = target;

        // Zoom: scroll up (positive delta) zooms in (decreases distance)
        self.distance -= input.scroll_delta * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// World-space position of the camera eye.
    pub fn camera_position(&self) -> Vec3 {
        self.target + self.eye_offset()
    }

    /// View matrix: looks from the camera eye toward the target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.camera_position(), self.target, Vec3::Y)
    }

    /// Perspective projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix ready to upload to the GPU.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    // Offset from target to camera eye based on pitch, yaw, and distance.
    fn eye_offset(&self) -> Vec3 {
        let pitch = self.pitch_degrees.to_radians();
        let yaw = self.yaw_degrees.to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos() * self.distance,
            pitch.sin() * self.distance,
            yaw.cos() * pitch.cos() * self.distance,
        )
    }
}

/// Project a world point to screen coordinates (origin top-left, same units as `screen`).
/// Returns `None` for points behind the camera.
pub fn world_to_screen(view_proj: Mat4, world: Vec3, screen: Vec2) -> Option<Vec2> {
    let clip = view_proj * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * screen.x,
        (0.5 - ndc.y * 0.5) * screen.y,
    ))
}
