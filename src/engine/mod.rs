// Engine module - the concrete host the detector runs in
// ECS world, spatial queries, input, console and debug drawing

pub mod camera;
pub mod components;
pub mod console;
pub mod debug_overlay;
pub mod gizmos;
pub mod input;
pub mod level;
pub mod physics;
pub mod registry;

// Re-export commonly used items
pub use components::*;
