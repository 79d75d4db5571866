//! Player Configuration
//!
//! The full tuning surface of the movement core: movement and jump
//! parameter sets, timing windows, probe volumes, and effect/audio
//! scaling. `Default` matches the reference tuning; `from_json` loads and
//! validates an external tuning file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{JumpParams, MovementParams};
use crate::physics::{ColliderEnvelope, ProbeVolume};
use glam::Vec2;

/// Fatal configuration error detected at construction time.
///
/// Simulation ticks never produce these; a config that validates once is
/// good for the lifetime of the controller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{set} movement: max_speed must be positive (got {value})")]
    NonPositiveMaxSpeed { set: &'static str, value: f32 },

    #[error("{set} movement: max_fall_speed must be positive (got {value})")]
    NonPositiveFallSpeed { set: &'static str, value: f32 },

    #[error("{name} must not be negative (got {value})")]
    NegativeDuration { name: &'static str, value: f32 },

    #[error("crouch collider height must be positive (got {0})")]
    NonPositiveCrouchHeight(f32),

    #[error("{0} probe must have positive half extents")]
    DegenerateProbe(&'static str),

    #[error("collider envelope must have positive size")]
    DegenerateEnvelope,

    #[error("config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete tuning for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    // === Movement ===
    /// Movement physics while on the ground.
    pub ground_movement: MovementParams,
    /// Movement physics while airborne.
    pub air_movement: MovementParams,
    /// Movement physics while sliding on a wall.
    pub wall_movement: MovementParams,
    /// Whether submersion in water counts as support (jumpable).
    pub can_swim: bool,

    // === Jumping ===
    /// Parameters of the base (ground/coyote) jump.
    pub jump: JumpParams,
    /// Seconds after leaving the ground during which a jump still counts
    /// as a ground jump.
    pub coyote_time: f32,
    /// Seconds a jump press is held in the queue while waiting to become
    /// eligible.
    pub jump_queue_time: f32,
    /// Guard window after a launch during which ground/wall contact does
    /// not reset the air-jump counter.
    pub jump_started_threshold: f32,
    /// Maximum upward speed (m/s).
    pub max_jump_speed: f32,

    // === Double jumping ===
    /// Number of jumps available while already airborne.
    pub double_jumps: u32,
    /// Escalating parameters for successive aerial jumps. Once exhausted
    /// the last entry repeats; if empty, the base jump parameters are used.
    pub double_jump_tiers: Vec<JumpParams>,

    // === Wall jumping ===
    /// Whether jumping off a wall slide is allowed.
    pub allow_wall_jump: bool,
    /// Whether wall contact also replenishes the air-jump counter.
    pub reset_double_jumps_on_wall: bool,
    /// Parameters of the wall jump (carries the outward horizontal force).
    pub wall_jump: JumpParams,

    // === Crouching ===
    /// Whether crouching is allowed.
    pub allow_crouch: bool,
    /// Envelope height while crouching (used to slide under objects).
    pub crouch_collider_height: f32,

    // === Death & respawn ===
    /// Falling below this world y-coordinate triggers a respawn.
    pub death_height: f32,
    /// Seconds the respawn sequence stays suspended before restoring
    /// control.
    pub respawn_delay: f32,

    // === Audio ===
    /// Master volume for the core's sound cues.
    pub sfx_volume: f32,
    /// Volume scale of the bump sound relative to `sfx_volume`.
    pub bump_volume_scale: f32,
    /// Minimum total contact impulse that produces a bump sound.
    pub bump_minimum_impulse: f32,
    /// Pitch added per air jump to the jump sound, so successive jumps
    /// rise in tone.
    pub jump_pitch_step: f32,

    // === Geometry ===
    /// Collision envelope at rest (restored when a crouch ends).
    pub collider: ColliderEnvelope,
    /// Ground contact probe, relative to the body position.
    pub ground_probe: ProbeVolume,
    /// Left wall contact probe.
    pub left_wall_probe: ProbeVolume,
    /// Right wall contact probe.
    pub right_wall_probe: ProbeVolume,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            ground_movement: MovementParams::ground(),
            air_movement: MovementParams::air(),
            wall_movement: MovementParams::wall(),
            can_swim: true,
            jump: JumpParams::default(),
            coyote_time: 0.5,
            jump_queue_time: 0.1,
            jump_started_threshold: 0.1,
            max_jump_speed: 100.0,
            double_jumps: 1,
            double_jump_tiers: vec![JumpParams::default()],
            allow_wall_jump: true,
            reset_double_jumps_on_wall: true,
            wall_jump: JumpParams::wall_jump(),
            allow_crouch: true,
            crouch_collider_height: 0.2,
            death_height: -301.0,
            respawn_delay: 2.0,
            sfx_volume: 1.0,
            bump_volume_scale: 0.2,
            bump_minimum_impulse: 7.0,
            jump_pitch_step: 0.1,
            collider: ColliderEnvelope::default(),
            ground_probe: ProbeVolume {
                offset: Vec2::new(0.0, -0.55),
                half_extents: Vec2::new(0.35, 0.1),
            },
            left_wall_probe: ProbeVolume {
                offset: Vec2::new(-0.45, 0.0),
                half_extents: Vec2::new(0.1, 0.4),
            },
            right_wall_probe: ProbeVolume {
                offset: Vec2::new(0.45, 0.0),
                half_extents: Vec2::new(0.1, 0.4),
            },
        }
    }
}

impl PlayerConfig {
    /// Check the fatal misconfigurations. Everything this does not reject
    /// is handled at runtime by fallbacks (see the tier clamp in the jump
    /// state machine).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, params) in [
            ("ground", &self.ground_movement),
            ("air", &self.air_movement),
            ("wall", &self.wall_movement),
        ] {
            if params.max_speed <= 0.0 {
                return Err(ConfigError::NonPositiveMaxSpeed {
                    set: name,
                    value: params.max_speed,
                });
            }
            if params.max_fall_speed <= 0.0 {
                return Err(ConfigError::NonPositiveFallSpeed {
                    set: name,
                    value: params.max_fall_speed,
                });
            }
        }

        for (name, value) in [
            ("coyote_time", self.coyote_time),
            ("jump_queue_time", self.jump_queue_time),
            ("jump_started_threshold", self.jump_started_threshold),
            ("respawn_delay", self.respawn_delay),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeDuration { name, value });
            }
        }

        if self.crouch_collider_height <= 0.0 {
            return Err(ConfigError::NonPositiveCrouchHeight(
                self.crouch_collider_height,
            ));
        }

        for (name, probe) in [
            ("ground", &self.ground_probe),
            ("left wall", &self.left_wall_probe),
            ("right wall", &self.right_wall_probe),
        ] {
            if probe.half_extents.x <= 0.0 || probe.half_extents.y <= 0.0 {
                return Err(ConfigError::DegenerateProbe(name));
            }
        }

        if self.collider.size.x <= 0.0 || self.collider.size.y <= 0.0 {
            return Err(ConfigError::DegenerateEnvelope);
        }

        Ok(())
    }

    /// Load and validate a tuning file. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the tuning, pretty-printed for hand editing.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
