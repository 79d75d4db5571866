//! Platformer Kit
//!
//! Deterministic 2D platformer player movement, built to run on a fixed
//! tick (50 Hz by default). The crate owns the player's contact state,
//! movement contexts, jumping (coyote time, request buffering, tiered
//! double jumps, wall jumps), crouching, death and respawn, and the
//! animation projection. Rendering, audio, and the surrounding level all
//! live in the embedding game, which drives `PlayerController::fixed_tick`
//! and drains the signal queue after each step.

pub mod config;
pub mod physics;
pub mod player;
pub mod signals;

pub use config::{ConfigError, JumpParams, MovementParams, PlayerConfig};
pub use physics::{Aabb, Body2d, BodyMode, ColliderEnvelope, ProbeVolume, SurfaceKind, SurfaceVolume, SurfaceWorld};
pub use player::{Facing, PlayerController};
pub use signals::{CameraSignal, ParticleId, Signal, SignalQueue, SoundCue};
