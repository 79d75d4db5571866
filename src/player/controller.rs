//! Player Controller
//!
//! Fixed-tick orchestration of the player simulation: contact
//! classification, movement context, crouching, jumping, gravity, the
//! velocity clamps, animation projection, death handling, and
//! integration, in that order every tick. Outbound effects accumulate in
//! the signal queue and are drained by the embedding game after the step.

use glam::Vec2;

use crate::config::{ConfigError, PlayerConfig};
use crate::physics::{Body2d, SurfaceWorld, resolve_solid_overlaps};
use crate::player::animation::{self, AnimationFrame, AnimationTarget, SpriteFlipTarget};
use crate::player::contact::ContactClassifier;
use crate::player::crouch::CrouchController;
use crate::player::jump::JumpStateMachine;
use crate::player::movement::{self, MovementContext};
use crate::player::respawn::RespawnSequencer;
use crate::player::Facing;
use crate::signals::{Signal, SignalQueue, SoundCue};

pub struct PlayerController {
    config: PlayerConfig,
    body: Body2d,
    now: f64,
    contact: ContactClassifier,
    jump: JumpStateMachine,
    crouch: CrouchController,
    respawn: RespawnSequencer,
    context: MovementContext,
    facing: Facing,
    control_enabled: bool,
    move_input: Vec2,
    signals: SignalQueue,
    animation_targets: Vec<Box<dyn AnimationTarget>>,
    flip_targets: Vec<Box<dyn SpriteFlipTarget>>,
}

impl PlayerController {
    /// Build a controller from a validated configuration, spawned at
    /// `spawn_position`.
    pub fn new(config: PlayerConfig, spawn_position: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        let body = Body2d::new(spawn_position, config.collider);
        let jump = JumpStateMachine::new(&config);
        Ok(Self {
            config,
            body,
            now: 0.0,
            contact: ContactClassifier::new(),
            jump,
            crouch: CrouchController::new(),
            respawn: RespawnSequencer::new(spawn_position),
            context: MovementContext::default(),
            facing: Facing::default(),
            control_enabled: true,
            move_input: Vec2::ZERO,
            signals: SignalQueue::new(),
            animation_targets: Vec::new(),
            flip_targets: Vec::new(),
        })
    }

    /// Advance the simulation by one fixed tick.
    pub fn fixed_tick(&mut self, world: &SurfaceWorld, move_input: Vec2, dt: f32) {
        self.respawn
            .tick(&mut self.body, &self.config, self.now, &mut self.signals);
        let control = self.control_enabled && !self.respawn.is_suspended();
        self.move_input = if control { move_input } else { Vec2::ZERO };

        self.contact.update(
            world,
            &self.config,
            self.body.position,
            self.move_input,
            self.now,
            &mut self.signals,
        );
        if self.contact.just_landed() {
            self.jump.on_landed();
        }

        self.context = movement::select_context(
            self.contact.grounded(),
            self.contact.on_wall(),
            &mut self.jump,
        );
        let params = *movement::params_for(&self.config, self.context);

        self.crouch.update(
            self.move_input.y,
            control,
            self.config.allow_crouch,
            self.config.crouch_collider_height,
            &mut self.body.envelope,
            &mut self.signals,
        );

        movement::apply_horizontal_drive(
            &mut self.body,
            &params,
            &mut self.facing,
            self.move_input,
            self.contact.grounded(),
            self.contact.wall_left(),
            self.contact.wall_right(),
            self.crouch.is_crouching(),
            self.contact.submerged(),
            control,
        );

        self.jump
            .reset_counter_on_support(&self.contact, &self.config, self.now);
        if control {
            self.jump.resolve_queued(
                &self.contact,
                &self.config,
                &mut self.body,
                self.now,
                &mut self.signals,
            );
        }

        self.body.gravity_scale = self.jump.gravity_scale(
            self.crouch.is_crouching(),
            &params,
            self.body.velocity.y,
            &self.config,
            self.now,
        );

        self.body.velocity.x = self
            .body
            .velocity
            .x
            .clamp(-params.max_speed, params.max_speed);
        self.body.velocity.y = self
            .body
            .velocity
            .y
            .clamp(-params.max_fall_speed, self.config.max_jump_speed);

        self.project_animation(&params);

        if self.body.position.y < self.config.death_height {
            self.kill();
        }

        self.body.integrate(dt, self.contact.grounded());
        let envelope = self.body.envelope;
        resolve_solid_overlaps(
            world,
            |position| crate::physics::Aabb::from_center(position + envelope.offset, envelope.size * 0.5),
            &mut self.body.position,
            &mut self.body.velocity,
        );

        self.now += f64::from(dt);
    }

    fn project_animation(&mut self, params: &crate::config::MovementParams) {
        let (fire, clear) = self.jump.take_trigger_flags();
        let horizontal = if self.move_input.x.abs() > 0.01 {
            self.body.velocity.x / params.max_speed
        } else {
            0.0
        };
        let vertical = if self.move_input.y.abs() > 0.01 {
            self.body.velocity.y / params.max_speed
        } else {
            0.0
        };
        let frame = AnimationFrame {
            grounded: self.contact.grounded(),
            falling: self.is_falling(),
            crouching: self.crouch.is_crouching(),
            wall_left: self.contact.wall_left(),
            wall_right: self.contact.wall_right(),
            vertical_speed: vertical,
            horizontal_speed: horizontal,
            air_jumps: self.jump.jumps_since_ground_touch() as i32,
            fire_jump_trigger: fire,
            clear_jump_trigger: clear,
            flip_x: self.facing == Facing::Left,
        };
        animation::project(&frame, &mut self.animation_targets, &mut self.flip_targets);
    }

    /// Queue a jump request (button press edge). Resolved on the next
    /// ticks while the queue window lasts.
    pub fn request_jump(&mut self) {
        if self.control_enabled && !self.respawn.is_suspended() {
            self.jump.request(self.now);
        }
    }

    /// Button release edge: cut the ascent short.
    pub fn release_jump(&mut self) {
        if self.jump.is_jumping() {
            let params = movement::params_for(&self.config, self.context);
            self.jump.release(&mut self.body, params, self.now);
        }
    }

    /// Kill the player and start the respawn sequence. The death effects
    /// and the teleport land on the next tick.
    pub fn kill(&mut self) {
        if self.respawn.trigger() {
            self.crouch
                .force_exit(&mut self.body.envelope, &mut self.signals);
            self.jump.cancel();
        }
    }

    /// Checkpoint: later deaths return here instead of the initial spawn.
    pub fn set_spawn_point(&mut self, position: Vec2) {
        self.respawn.set_spawn_point(position);
    }

    /// Report a collision impulse from the embedding physics. Strong hits
    /// queue a bump sound scaled by the impulse.
    pub fn report_contact_impulse(&mut self, impulse: f32) {
        if impulse > self.config.bump_minimum_impulse {
            self.signals.push(Signal::Sound {
                cue: SoundCue::Bump,
                pitch: 1.0,
                volume: (impulse * self.config.bump_volume_scale).min(1.0)
                    * self.config.sfx_volume,
            });
        }
    }

    /// Enable or disable player control. Disabling clears the crouch and
    /// any pending jump so the body coasts on stop friction.
    pub fn set_control_enabled(&mut self, enabled: bool) {
        if self.control_enabled && !enabled {
            self.crouch
                .force_exit(&mut self.body.envelope, &mut self.signals);
            self.jump.cancel();
        }
        self.control_enabled = enabled;
    }

    pub fn add_animation_target(&mut self, target: Box<dyn AnimationTarget>) {
        self.animation_targets.push(target);
    }

    pub fn add_flip_target(&mut self, target: Box<dyn SpriteFlipTarget>) {
        self.flip_targets.push(target);
    }

    /// Take all signals produced since the last drain.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.signals.drain()
    }

    pub fn body(&self) -> &Body2d {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body2d {
        &mut self.body
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.contact.grounded()
    }

    pub fn is_on_wall(&self) -> bool {
        self.contact.on_wall()
    }

    pub fn is_submerged(&self) -> bool {
        self.contact.submerged()
    }

    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_jumping()
    }

    pub fn is_falling(&self) -> bool {
        !self.contact.grounded() && self.body.velocity.y < 0.0
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn.is_suspended()
    }

    pub fn jumps_since_ground_touch(&self) -> u32 {
        self.jump.jumps_since_ground_touch()
    }

    // Runtime tuning hooks for pickups and level triggers.

    pub fn set_double_jump_count(&mut self, count: u32) {
        self.config.double_jumps = count;
    }

    pub fn adjust_double_jump_count(&mut self, delta: i32) {
        let adjusted = self.config.double_jumps as i64 + i64::from(delta);
        self.config.double_jumps = adjusted.clamp(0, u32::MAX as i64) as u32;
    }

    pub fn enable_crouch(&mut self, allowed: bool) {
        self.config.allow_crouch = allowed;
    }

    pub fn enable_wall_jump(&mut self, allowed: bool) {
        self.config.allow_wall_jump = allowed;
    }

    pub fn enable_wall_reset(&mut self, allowed: bool) {
        self.config.reset_double_jumps_on_wall = allowed;
    }

    pub fn enable_swim(&mut self, allowed: bool) {
        self.config.can_swim = allowed;
    }

    /// Restore the full aerial jump allowance, as a pickup would.
    pub fn refresh_double_jumps(&mut self) {
        self.jump.refresh_double_jumps();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Aabb;

    const DT: f32 = 0.02;

    fn floor_world() -> SurfaceWorld {
        let mut world = SurfaceWorld::new();
        world.add_solid(Aabb::new(Vec2::new(-100.0, -2.0), Vec2::new(100.0, 0.0)));
        world
    }

    fn standing_controller() -> PlayerController {
        let mut controller =
            PlayerController::new(PlayerConfig::default(), Vec2::new(0.0, 0.5)).unwrap();
        let world = floor_world();
        // Settle onto the floor.
        for _ in 0..5 {
            controller.fixed_tick(&world, Vec2::ZERO, DT);
        }
        controller
    }

    #[test]
    fn test_settles_grounded_on_floor() {
        let controller = standing_controller();
        assert!(controller.is_grounded());
        assert!(controller.body().velocity.y.abs() < 0.5);
    }

    #[test]
    fn test_walk_right_builds_speed_and_faces_right() {
        let mut controller = standing_controller();
        let world = floor_world();
        for _ in 0..50 {
            controller.fixed_tick(&world, Vec2::new(1.0, 0.0), DT);
        }
        assert!(controller.body().velocity.x > 1.0);
        // The clamp runs before integration, so one tick of drive can
        // sit on top of the cap.
        assert!(
            controller.body().velocity.x <= controller.config().ground_movement.max_speed + 1.0
        );
        assert_eq!(controller.facing(), Facing::Right);
    }

    #[test]
    fn test_jump_leaves_the_ground() {
        let mut controller = standing_controller();
        let world = floor_world();
        controller.request_jump();
        for _ in 0..5 {
            controller.fixed_tick(&world, Vec2::ZERO, DT);
        }
        assert!(!controller.is_grounded());
        assert!(controller.body().velocity.y > 0.0);
        assert!(controller.is_jumping());
    }

    #[test]
    fn test_fall_speed_is_clamped() {
        let config = PlayerConfig::default();
        let mut controller = PlayerController::new(config, Vec2::new(0.0, 500.0)).unwrap();
        let world = SurfaceWorld::new();
        for _ in 0..600 {
            controller.fixed_tick(&world, Vec2::ZERO, DT);
        }
        // One tick of gravity can land on top of the clamp.
        let max_fall = controller.config().air_movement.max_fall_speed;
        assert!(controller.body().velocity.y >= -max_fall - 1.0);
    }

    #[test]
    fn test_death_below_threshold_respawns_at_spawn() {
        let mut controller = standing_controller();
        let world = floor_world();
        controller.body_mut().position = Vec2::new(30.0, -400.0);
        controller.fixed_tick(&world, Vec2::ZERO, DT);
        assert!(controller.is_respawning());

        // The teleport lands on the tick after the death check.
        controller.fixed_tick(&world, Vec2::ZERO, DT);
        assert_eq!(controller.body().position, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_bump_impulse_threshold() {
        let mut controller = standing_controller();
        controller.drain_signals();

        controller.report_contact_impulse(2.0);
        assert!(controller.drain_signals().is_empty());

        controller.report_contact_impulse(10.0);
        let signals = controller.drain_signals();
        assert!(signals.iter().any(|s| matches!(
            s,
            Signal::Sound {
                cue: SoundCue::Bump,
                ..
            }
        )));
    }

    #[test]
    fn test_control_disable_zeroes_input() {
        let mut controller = standing_controller();
        let world = floor_world();
        controller.set_control_enabled(false);
        for _ in 0..50 {
            controller.fixed_tick(&world, Vec2::new(1.0, 0.0), DT);
        }
        assert!(controller.body().velocity.x.abs() < 1e-3);
    }

    #[test]
    fn test_animator_air_jumps_is_the_jump_counter() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::player::animation::recording::RecordingTarget;

        let world = floor_world();
        let mut controller = standing_controller();
        let target = Rc::new(RefCell::new(RecordingTarget::default()));
        controller.add_animation_target(Box::new(Rc::clone(&target)));

        controller.fixed_tick(&world, Vec2::ZERO, DT);
        assert_eq!(target.borrow().ints["AirJumps"], 0);

        controller.request_jump();
        controller.fixed_tick(&world, Vec2::ZERO, DT);
        controller.fixed_tick(&world, Vec2::ZERO, DT);
        controller.request_jump();
        controller.fixed_tick(&world, Vec2::ZERO, DT);

        // The animator sees the raw count of jumps since ground touch.
        assert_eq!(target.borrow().ints["AirJumps"], 2);
    }

    #[test]
    fn test_adjust_double_jump_count_saturates() {
        let mut controller = standing_controller();
        controller.set_double_jump_count(1);
        controller.adjust_double_jump_count(-5);
        assert_eq!(controller.config().double_jumps, 0);
        controller.adjust_double_jump_count(3);
        assert_eq!(controller.config().double_jumps, 3);
    }
}
