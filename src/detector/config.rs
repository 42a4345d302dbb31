use serde::{Deserialize, Serialize};

use super::ports::{InputSource, LayerMask};
use crate::error::{ProbeError, Result};

/// Layer index walls live on.
pub const WALLS_LAYER: u8 = 6;

/// Static detector settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Radius of the overlap sphere in world units.
    pub radius: f32,
    /// Layers the overlap query considers.
    pub layer_mask: LayerMask,
    /// Tag scanned once at startup to fill the wall registry.
    pub wall_tag: String,
    pub move_action: String,
    pub detect_action: String,
    /// Fixed orientation of the agent around +Y, in degrees. 0 faces +Z.
    pub facing_yaw_degrees: f32,
    /// Compute and report an alignment score for every hit.
    pub score_alignment: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            layer_mask: LayerMask::from_layers(&[WALLS_LAYER]),
            wall_tag: "Walls".to_string(),
            move_action: "Move".to_string(),
            detect_action: "Click".to_string(),
            facing_yaw_degrees: 0.0,
            score_alignment: true,
        }
    }
}

impl DetectorConfig {
    /// Reject settings the detector cannot run with. Call once before the first tick.
    pub fn validate(&self, input: &impl InputSource) -> Result<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ProbeError::InvalidRadius(self.radius));
        }
        if self.wall_tag.is_empty() {
            return Err(ProbeError::EmptyTag);
        }
        for action in [&self.move_action, &self.detect_action] {
            if !input.has_action(action) {
                return Err(ProbeError::MissingAction(action.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    struct Bound(&'static [&'static str]);

    impl InputSource for Bound {
        fn has_action(&self, action: &str) -> bool {
            self.0.iter().any(|a| *a == action)
        }
        fn is_pressed(&self, _action: &str) -> bool {
            false
        }
        fn read_vec2(&self, _action: &str) -> Vec2 {
            Vec2::ZERO
        }
    }

    #[test]
    fn defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.radius, 0.5);
        assert!(config.layer_mask.contains(WALLS_LAYER));
        assert!(!config.layer_mask.contains(0));
        assert_eq!(config.wall_tag, "Walls");
        assert!(config.validate(&Bound(&["Move", "Click"])).is_ok());
    }

    #[test]
    fn missing_action_is_reported() {
        let config = DetectorConfig::default();
        let err = config.validate(&Bound(&["Move"])).unwrap_err();
        assert!(matches!(err, ProbeError::MissingAction(name) if name == "Click"));
    }

    #[test]
    fn bad_radius_is_rejected() {
        for radius in [-0.1, f32::NAN, f32::INFINITY] {
            let config = DetectorConfig {
                radius,
                ..Default::default()
            };
            let err = config.validate(&Bound(&["Move", "Click"])).unwrap_err();
            assert!(matches!(err, ProbeError::InvalidRadius(_)));
        }
    }

    #[test]
    fn zero_radius_is_allowed() {
        let config = DetectorConfig {
            radius: 0.0,
            ..Default::default()
        };
        assert!(config.validate(&Bound(&["Move", "Click"])).is_ok());
    }

    #[test]
    fn empty_tag_is_rejected() {
        let config = DetectorConfig {
            wall_tag: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Bound(&["Move", "Click"])),
            Err(ProbeError::EmptyTag)
        ));
    }

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        let config: DetectorConfig = ron::from_str("(radius: 2.0, layer_mask: 3)").unwrap();
        assert_eq!(config.radius, 2.0);
        assert_eq!(config.layer_mask, LayerMask(3));
        assert_eq!(config.detect_action, "Click");
    }
}
