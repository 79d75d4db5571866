//! Respawn Sequencer
//!
//! Explicit death-to-respawn state machine, advanced one phase per tick.
//! A death trigger only marks the player as dying; on the next tick the
//! death effects fire where the player fell, the body teleports frozen
//! and hidden to the spawn point, and the camera lets go. After the
//! configured delay a restore tick brings the body back. Control is
//! withheld for the whole sequence.

use glam::Vec2;

use crate::config::PlayerConfig;
use crate::physics::{Body2d, BodyMode};
use crate::signals::{CameraSignal, ParticleId, Signal, SignalQueue, SoundCue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnPhase {
    /// Alive and in control.
    Idle,
    /// Death accepted; effects and the teleport fire on the next tick.
    Dying,
    /// Frozen at the spawn point, waiting out the delay.
    Suspended { resume_at: f64 },
    /// Delay elapsed; the body is restored on the next tick.
    Restoring,
}

/// Where deaths return to. Checkpoints override the initial spawn until
/// cleared.
#[derive(Debug, Clone, Copy)]
pub struct SpawnRecord {
    initial: Vec2,
    checkpoint: Option<Vec2>,
}

impl SpawnRecord {
    pub fn new(initial: Vec2) -> Self {
        Self {
            initial,
            checkpoint: None,
        }
    }

    pub fn set_checkpoint(&mut self, position: Vec2) {
        self.checkpoint = Some(position);
    }

    pub fn target(&self) -> Vec2 {
        self.checkpoint.unwrap_or(self.initial)
    }
}

#[derive(Debug)]
pub struct RespawnSequencer {
    phase: RespawnPhase,
    spawn: SpawnRecord,
}

impl RespawnSequencer {
    pub fn new(spawn_position: Vec2) -> Self {
        Self {
            phase: RespawnPhase::Idle,
            spawn: SpawnRecord::new(spawn_position),
        }
    }

    pub fn phase(&self) -> RespawnPhase {
        self.phase
    }

    /// Control is withheld from death until the restore completes.
    pub fn is_suspended(&self) -> bool {
        self.phase != RespawnPhase::Idle
    }

    pub fn set_spawn_point(&mut self, position: Vec2) {
        self.spawn.set_checkpoint(position);
    }

    pub fn spawn_target(&self) -> Vec2 {
        self.spawn.target()
    }

    /// Kill the player. A trigger while a sequence is already running is
    /// ignored. Returns whether the death was accepted.
    pub fn trigger(&mut self) -> bool {
        if self.phase != RespawnPhase::Idle {
            log::warn!("death trigger ignored, respawn already in progress");
            return false;
        }
        self.phase = RespawnPhase::Dying;
        true
    }

    /// Advance the sequence by one tick. Returns true on the tick the body
    /// is restored.
    pub fn tick(
        &mut self,
        body: &mut Body2d,
        config: &PlayerConfig,
        now: f64,
        signals: &mut SignalQueue,
    ) -> bool {
        match self.phase {
            RespawnPhase::Idle => false,
            RespawnPhase::Dying => {
                signals.push(Signal::ParticleSpawn {
                    id: ParticleId::Death,
                    position: body.position,
                });
                signals.push(Signal::Sound {
                    cue: SoundCue::Death,
                    pitch: 1.0,
                    volume: config.sfx_volume,
                });
                signals.push(Signal::Camera(CameraSignal::ClearTarget));
                signals.push(Signal::SpriteVisibility(false));

                body.velocity = Vec2::ZERO;
                body.mode = BodyMode::Kinematic;
                body.position = self.spawn.target();

                self.phase = RespawnPhase::Suspended {
                    resume_at: now + f64::from(config.respawn_delay),
                };
                false
            }
            RespawnPhase::Suspended { resume_at } => {
                if now >= resume_at {
                    self.phase = RespawnPhase::Restoring;
                }
                false
            }
            RespawnPhase::Restoring => {
                body.mode = BodyMode::Dynamic;
                signals.push(Signal::SpriteVisibility(true));
                signals.push(Signal::Camera(CameraSignal::FocusPlayer));
                self.phase = RespawnPhase::Idle;
                true
            }
        }
    }
}
