//! Wall proximity probe: a player-driven agent that moves on a plane and, on
//! demand, reports the tagged walls within a fixed radius of itself.
//!
//! [`detector`] holds the host-independent logic. [`engine`] is a small
//! bevy_ecs/wgpu host that supplies the spatial index, tag registry, input,
//! console and gizmo drawing the detector asks for.

pub mod detector;
pub mod engine;
pub mod error;
pub mod settings;

pub use detector::{DetectorConfig, ProximityWallDetector};
pub use error::{ProbeError, Result};
