//! Jump Parameter Sets
//!
//! One set per jump tier. Escalating aerial (double) jumps are an ordered
//! list of these; the wall-jump variant is the same struct with an outward
//! horizontal force attached, so tier selection never needs to branch on a
//! runtime type.

use serde::{Deserialize, Serialize};

/// Physics of a single jump tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpParams {
    /// Upward force applied at launch (N).
    pub jump_force: f32,
    /// Gravity scale while ascending.
    pub jump_gravity: f32,
    /// When |vertical velocity| drops below this, the jump is at its apex.
    pub air_hang_threshold: f32,
    /// Gravity scale at the apex. Low values let the player float.
    pub air_hang_gravity: f32,
    /// Outward horizontal force away from the contacted wall, for wall
    /// jumps. `None` for ordinary jumps.
    pub horizontal_force: Option<f32>,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            jump_force: 600.0,
            jump_gravity: 1.5,
            air_hang_threshold: 0.35,
            air_hang_gravity: 1.7,
            horizontal_force: None,
        }
    }
}

impl JumpParams {
    /// Default wall-jump tuning: base jump plus an outward push. A high
    /// push encourages wall-to-wall jumping, a low one wall climbing.
    pub fn wall_jump() -> Self {
        Self {
            horizontal_force: Some(500.0),
            ..Self::default()
        }
    }

    /// Whether this tier pushes the player away from the wall at launch.
    pub fn is_wall_jump(&self) -> bool {
        self.horizontal_force.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_jump_has_no_horizontal_force() {
        let base = JumpParams::default();
        assert!(!base.is_wall_jump());
        assert_eq!(base.jump_force, 600.0);
    }

    #[test]
    fn test_wall_jump_carries_outward_force() {
        let wall = JumpParams::wall_jump();
        assert!(wall.is_wall_jump());
        assert_eq!(wall.horizontal_force, Some(500.0));
    }
}
