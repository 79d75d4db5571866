//! Rigid Body
//!
//! The physics body the player controller reads and writes every tick.
//! Velocity, gravity scale, damping, and the simulated/kinematic switch all
//! live here; the controller decides, the body integrates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gravity magnitude in m/s². Scaled per-tick by [`Body2d::gravity_scale`].
pub const BASE_GRAVITY: f32 = 9.81;

/// Simulation mode of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMode {
    /// Integrated every tick: forces, gravity, damping.
    #[default]
    Dynamic,
    /// Frozen in place; integration is a no-op. Used during the respawn
    /// sequence.
    Kinematic,
}

/// Axis-aligned collision envelope (size + local offset from the body
/// position). Resized while crouching and restored on exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderEnvelope {
    /// Full extents of the box (meters).
    pub size: Vec2,
    /// Center offset relative to the body position (meters).
    pub offset: Vec2,
}

impl Default for ColliderEnvelope {
    fn default() -> Self {
        Self {
            size: Vec2::new(0.8, 1.0),
            offset: Vec2::ZERO,
        }
    }
}

/// A 2D rigid body with a per-tick force accumulator.
///
/// Forces applied via [`apply_force`](Body2d::apply_force) accumulate and
/// are consumed by the next [`integrate`](Body2d::integrate) call, which is
/// how a jump "impulse" and the horizontal drive force both land on the
/// velocity within the same tick they were requested.
#[derive(Debug, Clone)]
pub struct Body2d {
    /// World-space position of the body center.
    pub position: Vec2,
    /// Linear velocity in m/s.
    pub velocity: Vec2,
    /// Multiplier on [`BASE_GRAVITY`]. Selected every tick by the gravity
    /// regime (ascending / air-hang / fall / crouch).
    pub gravity_scale: f32,
    /// Linear damping applied to both axes.
    pub linear_damping: f32,
    /// Friction of the contact surface, applied to the horizontal axis only
    /// while grounded.
    pub surface_friction: f32,
    /// Simulated or frozen.
    pub mode: BodyMode,
    /// Current collision envelope.
    pub envelope: ColliderEnvelope,
    force_accum: Vec2,
}

impl Body2d {
    pub fn new(position: Vec2, envelope: ColliderEnvelope) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            linear_damping: 0.0,
            surface_friction: 0.0,
            mode: BodyMode::Dynamic,
            envelope,
            force_accum: Vec2::ZERO,
        }
    }

    /// Accumulate a force (N, unit mass) to be applied at the next
    /// integration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force_accum += force;
    }

    /// World-space AABB of the current collision envelope.
    pub fn envelope_aabb(&self) -> super::Aabb {
        super::Aabb::from_center(self.position + self.envelope.offset, self.envelope.size * 0.5)
    }

    /// Advance the body by one fixed step with semi-implicit Euler.
    ///
    /// Kinematic bodies discard accumulated forces and do not move.
    /// `grounded` routes `surface_friction` onto the horizontal axis,
    /// mirroring a contact-material friction coefficient.
    pub fn integrate(&mut self, dt: f32, grounded: bool) {
        let force = self.force_accum;
        self.force_accum = Vec2::ZERO;

        if self.mode == BodyMode::Kinematic {
            return;
        }

        self.velocity += force * dt;
        self.velocity.y -= BASE_GRAVITY * self.gravity_scale * dt;

        self.velocity *= 1.0 / (1.0 + self.linear_damping * dt);
        if grounded {
            self.velocity.x *= 1.0 / (1.0 + self.surface_friction * dt);
        }

        self.position += self.velocity * dt;
    }
}
