//! Animation State Projection
//!
//! One-way projection of the simulation state onto named animator
//! parameters. The simulation never reads anything back from a target,
//! so any number of targets (or none) can be attached.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives named animator parameter writes once per tick.
pub trait AnimationTarget {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_trigger(&mut self, name: &str);
    fn clear_trigger(&mut self, name: &str);
}

/// Receives the horizontal facing as a sprite flip.
pub trait SpriteFlipTarget {
    fn set_flip_x(&mut self, flipped: bool);
}

// Shared-handle forwarding, so a test (or a renderer) can keep a handle
// to a target it has handed to the controller.
impl<T: AnimationTarget> AnimationTarget for Rc<RefCell<T>> {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.borrow_mut().set_bool(name, value);
    }
    fn set_int(&mut self, name: &str, value: i32) {
        self.borrow_mut().set_int(name, value);
    }
    fn set_float(&mut self, name: &str, value: f32) {
        self.borrow_mut().set_float(name, value);
    }
    fn set_trigger(&mut self, name: &str) {
        self.borrow_mut().set_trigger(name);
    }
    fn clear_trigger(&mut self, name: &str) {
        self.borrow_mut().clear_trigger(name);
    }
}

impl<T: SpriteFlipTarget> SpriteFlipTarget for Rc<RefCell<T>> {
    fn set_flip_x(&mut self, flipped: bool) {
        self.borrow_mut().set_flip_x(flipped);
    }
}

/// Everything one tick projects onto the animator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrame {
    pub grounded: bool,
    pub falling: bool,
    pub crouching: bool,
    pub wall_left: bool,
    pub wall_right: bool,
    /// Vertical speed normalized by the active max speed, gated by input.
    pub vertical_speed: f32,
    /// Horizontal speed normalized by the active max speed, gated by input.
    pub horizontal_speed: f32,
    pub air_jumps: i32,
    pub fire_jump_trigger: bool,
    pub clear_jump_trigger: bool,
    /// Facing-left sprite flip.
    pub flip_x: bool,
}

pub fn project(
    frame: &AnimationFrame,
    targets: &mut [Box<dyn AnimationTarget>],
    flips: &mut [Box<dyn SpriteFlipTarget>],
) {
    for target in targets.iter_mut() {
        target.set_bool("onGround", frame.grounded);
        target.set_bool("falling", frame.falling);
        target.set_bool("crouching", frame.crouching);
        target.set_bool("wallLeft", frame.wall_left);
        target.set_bool("wallRight", frame.wall_right);
        target.set_float("VerticalSpeed", frame.vertical_speed);
        target.set_float("HorizontalSpeed", frame.horizontal_speed);
        target.set_int("AirJumps", frame.air_jumps);
        if frame.fire_jump_trigger {
            target.set_trigger("jump");
        }
        if frame.clear_jump_trigger {
            target.clear_trigger("jump");
        }
    }
    for flip in flips.iter_mut() {
        flip.set_flip_x(frame.flip_x);
    }
}
