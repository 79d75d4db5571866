//! Outbound Signal Queue
//!
//! The movement core never holds references to presentation objects
//! (particle emitters, audio players, the camera rig). Instead it records
//! everything it wants them to do into a [`SignalQueue`] during the
//! simulation step, and the embedding game drains the queue after the step
//! completes. Ordering within a tick is preserved, and a game that ignores
//! the queue simply gets a silent player.

use std::collections::VecDeque;

use glam::Vec2;

/// Named particle effects the core can start, stop, or spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleId {
    /// Dust burst when the player lands on the ground.
    Land,
    /// One-shot burst when the player first touches the left wall mid-air.
    WallHitLeft,
    /// One-shot burst when the player first touches the right wall mid-air.
    WallHitRight,
    /// Continuous effect while sliding down the left wall.
    WallSlideLeft,
    /// Continuous effect while sliding down the right wall.
    WallSlideRight,
    /// Continuous effect while crouch-sliding.
    Slide,
    /// Burst spawned at the point of death.
    Death,
}

/// One-shot sound cues the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Bump,
    Death,
}

/// Camera focus requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSignal {
    /// Stop following any target (used while the player is dead).
    ClearTarget,
    /// Resume following the player.
    FocusPlayer,
}

/// A single outbound notification to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Start (or play) a named particle effect.
    ParticleStart(ParticleId),
    /// Stop a continuous particle effect.
    ParticleStop(ParticleId),
    /// Spawn a one-shot particle effect at a world position.
    ParticleSpawn { id: ParticleId, position: Vec2 },
    /// Play a one-shot sound at the given pitch and volume.
    Sound {
        cue: SoundCue,
        pitch: f32,
        volume: f32,
    },
    /// Change what the camera follows.
    Camera(CameraSignal),
    /// Show or hide the player's sprite hierarchy.
    SpriteVisibility(bool),
}

/// FIFO queue of signals produced during a simulation step.
#[derive(Debug, Default)]
pub struct SignalQueue {
    queue: VecDeque<Signal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a signal. Never fails; the queue grows as needed.
    pub fn push(&mut self, signal: Signal) {
        self.queue.push_back(signal);
    }

    /// Number of signals currently queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove and return all queued signals in the order they were pushed.
    pub fn drain(&mut self) -> Vec<Signal> {
        self.queue.drain(..).collect()
    }
}
