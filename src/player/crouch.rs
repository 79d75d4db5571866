//! Crouch Controller
//!
//! Enters and exits the crouch, shrinking the collider envelope so the
//! bottom edge stays planted, and starts/stops the slide particle. The
//! crouch works airborne for fast descents as well as on the ground.

use crate::physics::ColliderEnvelope;
use crate::signals::{ParticleId, Signal, SignalQueue};

/// Vertical input below this counts as holding down.
const CROUCH_INPUT_THRESHOLD: f32 = -0.1;

#[derive(Debug, Default)]
pub struct CrouchController {
    active: bool,
    /// Envelope as it was before crouching, restored on exit.
    saved: Option<ColliderEnvelope>,
}

impl CrouchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_crouching(&self) -> bool {
        self.active
    }

    /// Per-tick crouch transition. Disabled control or a disabled crouch
    /// allowance forces an exit even while down is held.
    pub fn update(
        &mut self,
        vertical_input: f32,
        control_enabled: bool,
        allowed: bool,
        crouch_height: f32,
        envelope: &mut ColliderEnvelope,
        signals: &mut SignalQueue,
    ) {
        let wants_crouch = vertical_input < CROUCH_INPUT_THRESHOLD && control_enabled && allowed;
        if wants_crouch && !self.active {
            self.enter(crouch_height, envelope, signals);
        } else if !wants_crouch && self.active {
            self.exit(envelope, signals);
        }
    }

    /// Immediate exit, without a slide-stop signal ordering concern. Used
    /// on respawn and when control is disabled mid-crouch.
    pub fn force_exit(&mut self, envelope: &mut ColliderEnvelope, signals: &mut SignalQueue) {
        if self.active {
            self.exit(envelope, signals);
        }
    }

    fn enter(&mut self, crouch_height: f32, envelope: &mut ColliderEnvelope, signals: &mut SignalQueue) {
        let saved = *envelope;
        envelope.size.y = crouch_height;
        // Drop the offset so the envelope's bottom edge does not move.
        envelope.offset.y = saved.offset.y - (saved.size.y - crouch_height) * 0.5;
        self.saved = Some(saved);
        self.active = true;
        signals.push(Signal::ParticleStart(ParticleId::Slide));
    }

    fn exit(&mut self, envelope: &mut ColliderEnvelope, signals: &mut SignalQueue) {
        if let Some(saved) = self.saved.take() {
            *envelope = saved;
        }
        self.active = false;
        signals.push(Signal::ParticleStop(ParticleId::Slide));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_crouch_shrinks_and_restores_envelope() {
        let mut crouch = CrouchController::new();
        let mut envelope = ColliderEnvelope::default();
        let original = envelope;
        let mut signals = SignalQueue::new();

        crouch.update(-1.0, true, true, 0.2, &mut envelope, &mut signals);
        assert!(crouch.is_crouching());
        assert_eq!(envelope.size.y, 0.2);
        // Bottom edge unchanged.
        let bottom = |e: &ColliderEnvelope| e.offset.y - e.size.y * 0.5;
        assert!((bottom(&envelope) - bottom(&original)).abs() < 1e-6);

        crouch.update(0.0, true, true, 0.2, &mut envelope, &mut signals);
        assert!(!crouch.is_crouching());
        assert_eq!(envelope, original);

        let events = signals.drain();
        assert!(matches!(events[0], Signal::ParticleStart(ParticleId::Slide)));
        assert!(matches!(events[1], Signal::ParticleStop(ParticleId::Slide)));
    }

    #[test]
    fn test_crouch_denied_when_disallowed_or_uncontrolled() {
        let mut crouch = CrouchController::new();
        let mut envelope = ColliderEnvelope::default();
        let mut signals = SignalQueue::new();

        crouch.update(-1.0, true, false, 0.2, &mut envelope, &mut signals);
        assert!(!crouch.is_crouching());

        crouch.update(-1.0, false, true, 0.2, &mut envelope, &mut signals);
        assert!(!crouch.is_crouching());
        assert!(signals.is_empty());
    }

    #[test]
    fn test_control_disable_exits_active_crouch() {
        let mut crouch = CrouchController::new();
        let mut envelope = ColliderEnvelope::default();
        let original = envelope;
        let mut signals = SignalQueue::new();

        crouch.update(-1.0, true, true, 0.2, &mut envelope, &mut signals);
        assert!(crouch.is_crouching());

        // Down still held, but control was taken away.
        crouch.update(-1.0, false, true, 0.2, &mut envelope, &mut signals);
        assert!(!crouch.is_crouching());
        assert_eq!(envelope, original);
    }

    #[test]
    fn test_force_exit_is_idempotent() {
        let mut crouch = CrouchController::new();
        let mut envelope = ColliderEnvelope {
            size: Vec2::new(0.8, 1.0),
            offset: Vec2::ZERO,
        };
        let mut signals = SignalQueue::new();

        crouch.force_exit(&mut envelope, &mut signals);
        assert!(signals.is_empty());

        crouch.update(-1.0, true, true, 0.2, &mut envelope, &mut signals);
        crouch.force_exit(&mut envelope, &mut signals);
        crouch.force_exit(&mut envelope, &mut signals);
        assert_eq!(envelope.size.y, 1.0);
    }
}
