//! Player Simulation
//!
//! The player-facing half of the crate: contact classification, movement
//! contexts, the jump state machine, crouching, respawning, animation
//! projection, and the controller that runs them in order each tick.

pub mod animation;
pub mod contact;
pub mod controller;
pub mod crouch;
pub mod jump;
pub mod movement;
pub mod respawn;

pub use animation::{AnimationFrame, AnimationTarget, SpriteFlipTarget};
pub use contact::ContactClassifier;
pub use controller::PlayerController;
pub use crouch::CrouchController;
pub use jump::JumpStateMachine;
pub use movement::MovementContext;
pub use respawn::{RespawnPhase, RespawnSequencer, SpawnRecord};

/// Horizontal facing, mirrored onto sprite flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}
