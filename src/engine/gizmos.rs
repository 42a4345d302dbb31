// Immediate-mode debug shapes, collected per frame and drawn by the overlay.

use glam::Vec3;

use crate::detector::{GizmoRenderer, WireSphere};

/// Line segments per great circle.
pub const CIRCLE_SEGMENTS: usize = 32;

impl WireSphere {
    /// Three great circles (XY, XZ, YZ planes) as world-space line segments.
    pub fn segments(&self, resolution: usize) -> Vec<[Vec3; 2]> {
        let resolution = resolution.max(3);
        let step = std::f32::consts::TAU / resolution as f32;
        let mut segments = Vec::with_capacity(resolution * 3);

        let planes: [fn(f32, f32) -> Vec3; 3] = [
            |c, s| Vec3::new(c, s, 0.0),
            |c, s| Vec3::new(c, 0.0, s),
            |c, s| Vec3::new(0.0, c, s),
        ];
        for plane in planes {
            let point = |i: usize| {
                let angle = i as f32 * step;
                self.center + plane(angle.cos(), angle.sin()) * self.radius
            };
            for i in 0..resolution {
                segments.push([point(i), point(i + 1)]);
            }
        }
        segments
    }
}

/// Gizmos queued for the current frame.
#[derive(Default)]
pub struct GizmoBuffer {
    pub spheres: Vec<WireSphere>,
}

impl GizmoBuffer {
    pub fn clear(&mut self) {
        self.spheres.clear();
    }

    pub fn segments(&self) -> Vec<[Vec3; 2]> {
        self.spheres
            .iter()
            .flat_map(|sphere| sphere.segments(CIRCLE_SEGMENTS))
            .collect()
    }
}

impl GizmoRenderer for GizmoBuffer {
    fn draw_wire_sphere(&mut self, center: Vec3, radius: f32) {
        self.spheres.push(WireSphere { center, radius });
    }
}
