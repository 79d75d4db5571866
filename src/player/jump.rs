//! Jump State Machine
//!
//! Owns jump eligibility, request buffering, tiered jump selection, and
//! the gravity regime across the jump arc. Requests are queued with a
//! timestamp and resolved on the fixed tick; a request that outlives the
//! queue window is discarded, never fired late.

use glam::Vec2;

use crate::config::{JumpParams, MovementParams, PlayerConfig};
use crate::physics::Body2d;
use crate::player::contact::ContactClassifier;
use crate::signals::{Signal, SignalQueue, SoundCue};

/// Runtime jump state. Configuration lives in [`PlayerConfig`]; this holds
/// only what changes during play.
#[derive(Debug)]
pub struct JumpStateMachine {
    queued: bool,
    queue_time: f64,
    /// Time of the last launch, if any.
    last_jump_time: Option<f64>,
    /// Jumps performed since last touching the ground (or a wall, when
    /// wall contact replenishes jumps).
    jumps_since_ground_touch: u32,
    /// Whether the player left the ground by jumping (as opposed to
    /// walking off a ledge). Decides how many aerial jumps remain.
    jumped_off_ground: bool,
    /// True from launch until the button is released or support regained.
    is_jumping: bool,
    /// Parameters of the jump currently shaping gravity.
    current: JumpParams,
    /// Post an animation "jump" trigger on the next projection.
    pending_trigger: bool,
    /// Clear the animation "jump" trigger on the next projection.
    pending_trigger_clear: bool,
}

impl JumpStateMachine {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            queued: false,
            queue_time: 0.0,
            last_jump_time: None,
            jumps_since_ground_touch: 0,
            jumped_off_ground: false,
            is_jumping: false,
            current: config.jump,
            pending_trigger: false,
            pending_trigger_clear: false,
        }
    }

    /// Queue a jump request. The per-tick resolve decides whether and when
    /// it fires.
    pub fn request(&mut self, now: f64) {
        self.queued = true;
        self.queue_time = now;
    }

    /// The jump button was released: stop ascending, fall on the current
    /// movement set's gravity, and log how long the jump was held.
    pub fn release(&mut self, body: &mut Body2d, movement: &MovementParams, now: f64) {
        self.is_jumping = false;
        body.gravity_scale = movement.fall_gravity;
        self.pending_trigger_clear = true;
        if let Some(launched) = self.last_jump_time {
            log::debug!("jump held for {:.3}s", now - launched);
        }
    }

    /// Clear the jumping state without touching gravity. Called when the
    /// player regains support (landing or wall contact).
    pub fn end_jump_state(&mut self) {
        self.is_jumping = false;
    }

    /// Drop any queued request and stop jumping. Used when control is
    /// disabled.
    pub fn cancel(&mut self) {
        self.queued = false;
        self.is_jumping = false;
    }

    /// Ground (or wall, when configured) contact replenishes the air-jump
    /// counter, guarded so the tick that launches a jump does not
    /// immediately erase its own count.
    pub fn reset_counter_on_support(
        &mut self,
        contact: &ContactClassifier,
        config: &PlayerConfig,
        now: f64,
    ) {
        let supported = contact.grounded()
            || (config.reset_double_jumps_on_wall && config.allow_wall_jump && contact.on_wall());
        let past_guard = self
            .last_jump_time
            .map_or(true, |t| now - t > f64::from(config.jump_started_threshold));
        if supported && past_guard {
            self.jumps_since_ground_touch = 0;
        }
    }

    /// Landing clears the ledge-vs-jump distinction for the next airtime.
    pub fn on_landed(&mut self) {
        self.jumped_off_ground = false;
    }

    /// Grounded, or recently grounded without having jumped (coyote time).
    pub fn grounded_with_coyote(
        &self,
        contact: &ContactClassifier,
        config: &PlayerConfig,
        now: f64,
    ) -> bool {
        contact.grounded()
            || (self.jumps_since_ground_touch == 0
                && now - contact.last_on_ground_time() < f64::from(config.coyote_time))
    }

    /// Aerial jumps still allowed: walking off a ledge grants one fewer
    /// than actively jumping off, because the ledge fall did not consume
    /// the first jump slot. Inherited tuning; preserved as-is.
    fn available_aerial_jumps(&self, config: &PlayerConfig) -> i32 {
        if self.jumped_off_ground {
            config.double_jumps as i32
        } else {
            config.double_jumps as i32 - 1
        }
    }

    /// Whether a jump may launch right now.
    pub fn can_jump(&self, contact: &ContactClassifier, config: &PlayerConfig, now: f64) -> bool {
        self.grounded_with_coyote(contact, config, now)
            || (contact.on_wall() && config.allow_wall_jump)
            || (self.jumps_since_ground_touch as i32 <= self.available_aerial_jumps(config)
                && !contact.submerged())
    }

    /// Pick the jump tier: wall jump while airborne on a wall, the base
    /// jump while grounded (or in coyote time), otherwise the double-jump
    /// tier for the current jump count. The tier index clamps into the
    /// list, and an empty list falls back to the base jump.
    fn select_tier(
        &self,
        contact: &ContactClassifier,
        config: &PlayerConfig,
        now: f64,
    ) -> JumpParams {
        if !contact.grounded() && contact.on_wall() {
            return config.wall_jump;
        }
        if self.grounded_with_coyote(contact, config, now) {
            return config.jump;
        }

        if config.double_jump_tiers.is_empty() {
            log::warn!("double jump tier list is empty; falling back to the base jump");
            return config.jump;
        }
        let index = (self.jumps_since_ground_touch.saturating_sub(1) as usize)
            .min(config.double_jump_tiers.len() - 1);
        config.double_jump_tiers[index]
    }

    /// Launch the selected tier: ascending gravity, upward force (never
    /// reducing existing upward speed), the outward push for wall jumps,
    /// counters, and the jump sound cue whose pitch rises with the jump
    /// index.
    fn launch(
        &mut self,
        tier: JumpParams,
        contact: &ContactClassifier,
        config: &PlayerConfig,
        body: &mut Body2d,
        now: f64,
        signals: &mut SignalQueue,
    ) {
        body.gravity_scale = tier.jump_gravity;
        body.velocity.y = body.velocity.y.max(0.0);
        body.apply_force(Vec2::new(0.0, tier.jump_force));

        if let Some(outward) = tier.horizontal_force {
            if contact.wall_right() {
                body.apply_force(Vec2::new(-outward, 0.0));
            } else if contact.wall_left() {
                body.apply_force(Vec2::new(outward, 0.0));
            }
        }

        if self.grounded_with_coyote(contact, config, now) {
            self.jumped_off_ground = true;
        }
        self.is_jumping = true;
        self.current = tier;
        self.last_jump_time = Some(now);
        self.jumps_since_ground_touch += 1;
        self.pending_trigger = true;

        signals.push(Signal::Sound {
            cue: SoundCue::Jump,
            pitch: 1.0 + self.jumps_since_ground_touch as f32 * config.jump_pitch_step,
            volume: config.sfx_volume,
        });
    }

    /// Per-tick resolve of a queued request. Fires while the request is
    /// inside the queue window and eligibility holds; discards the request
    /// once the window elapses.
    pub fn resolve_queued(
        &mut self,
        contact: &ContactClassifier,
        config: &PlayerConfig,
        body: &mut Body2d,
        now: f64,
        signals: &mut SignalQueue,
    ) {
        if !self.queued {
            return;
        }
        if now - self.queue_time >= f64::from(config.jump_queue_time) {
            self.queued = false;
            return;
        }
        if self.can_jump(contact, config, now) {
            self.queued = false;
            let tier = self.select_tier(contact, config, now);
            self.launch(tier, contact, config, body, now, signals);
        }
    }

    /// Gravity scale for this tick, highest priority first: crouching,
    /// then the air-hang float near the apex, then ascending gravity,
    /// then the movement set's fall gravity.
    pub fn gravity_scale(
        &self,
        crouching: bool,
        movement: &MovementParams,
        vertical_velocity: f32,
        config: &PlayerConfig,
        now: f64,
    ) -> f32 {
        if crouching {
            return movement.crouch_gravity;
        }
        let past_launch_guard = self
            .last_jump_time
            .map_or(false, |t| now - t > f64::from(config.jump_started_threshold));
        if self.is_jumping
            && vertical_velocity.abs() < self.current.air_hang_threshold
            && past_launch_guard
        {
            return self.current.air_hang_gravity;
        }
        if self.is_jumping && vertical_velocity > 0.0 {
            return self.current.jump_gravity;
        }
        movement.fall_gravity
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn queued(&self) -> bool {
        self.queued
    }

    pub fn jumps_since_ground_touch(&self) -> u32 {
        self.jumps_since_ground_touch
    }

    pub fn jumped_off_ground(&self) -> bool {
        self.jumped_off_ground
    }

    /// Counter reset requested by an external pickup or trigger.
    pub fn refresh_double_jumps(&mut self) {
        self.jumps_since_ground_touch = 0;
    }

    /// Take the pending animation trigger flags for this tick's
    /// projection.
    pub fn take_trigger_flags(&mut self) -> (bool, bool) {
        let flags = (self.pending_trigger, self.pending_trigger_clear);
        self.pending_trigger = false;
        self.pending_trigger_clear = false;
        flags
    }

    #[cfg(test)]
    pub(crate) fn force_jumping_for_test(&mut self) {
        self.is_jumping = true;
    }
}
