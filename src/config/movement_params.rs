//! Movement Parameter Sets
//!
//! One set each for ground, air, and wall contact. The controller selects
//! a set from the contact state every tick; the sets themselves are never
//! mutated during play.

use serde::{Deserialize, Serialize};

/// Movement physics for one support context (ground, air, or wall).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementParams {
    /// Horizontal acceleration force while actively moving (N).
    pub move_acceleration: f32,
    /// Friction while actively moving left/right.
    pub move_friction: f32,
    /// Friction while not actively moving.
    pub stop_friction: f32,
    /// Linear damping applied while grounded (air resistance analogue).
    pub air_drag: f32,
    /// Maximum horizontal speed (m/s).
    pub max_speed: f32,
    /// Gravity scale while falling in this context.
    pub fall_gravity: f32,
    /// Maximum downward speed (m/s, positive magnitude).
    pub max_fall_speed: f32,
    /// Friction while crouching. Low values slide.
    pub crouch_friction: f32,
    /// Gravity scale while crouching. High values fast-fall.
    pub crouch_gravity: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self::ground()
    }
}

impl MovementParams {
    /// Default tuning for ground contact.
    pub fn ground() -> Self {
        Self {
            move_acceleration: 40.0,
            move_friction: 0.0,
            stop_friction: 3.0,
            air_drag: 0.4,
            max_speed: 16.0,
            fall_gravity: 3.0,
            max_fall_speed: 50.0,
            crouch_friction: 0.01,
            crouch_gravity: 12.0,
        }
    }

    /// Default tuning for airborne movement: weaker steering, same fall.
    pub fn air() -> Self {
        Self {
            move_acceleration: 30.0,
            move_friction: 0.0,
            stop_friction: 0.2,
            air_drag: 0.4,
            max_speed: 14.0,
            fall_gravity: 3.0,
            max_fall_speed: 50.0,
            crouch_friction: 0.01,
            crouch_gravity: 12.0,
        }
    }

    /// Default tuning for wall contact: a slow slide.
    pub fn wall() -> Self {
        Self {
            move_acceleration: 20.0,
            move_friction: 0.0,
            stop_friction: 3.0,
            air_drag: 0.4,
            max_speed: 10.0,
            fall_gravity: 0.8,
            max_fall_speed: 4.0,
            crouch_friction: 0.01,
            crouch_gravity: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_defaults() {
        let params = MovementParams::ground();
        assert_eq!(params.move_acceleration, 40.0);
        assert_eq!(params.max_speed, 16.0);
        assert_eq!(params.fall_gravity, 3.0);
        assert_eq!(params.crouch_gravity, 12.0);
    }

    #[test]
    fn test_wall_slide_is_slow() {
        let wall = MovementParams::wall();
        assert!(wall.max_fall_speed < MovementParams::air().max_fall_speed);
        assert!(wall.fall_gravity < MovementParams::air().fall_gravity);
    }
}
