//! Movement Context & Horizontal Drive
//!
//! Maps the contact state to one of the three movement parameter sets and
//! applies the per-tick friction/acceleration that pushes the player left
//! and right. Selection also clears the jumping flag when the player
//! regains support: a wall slide is not a jump.

use glam::Vec2;

use crate::config::{MovementParams, PlayerConfig};
use crate::physics::Body2d;
use crate::player::Facing;
use crate::player::jump::JumpStateMachine;

/// Which movement parameter set is active this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementContext {
    #[default]
    Ground,
    Air,
    Wall,
}

/// Look up the parameter set for a context.
pub fn params_for(config: &PlayerConfig, context: MovementContext) -> &MovementParams {
    match context {
        MovementContext::Ground => &config.ground_movement,
        MovementContext::Air => &config.air_movement,
        MovementContext::Wall => &config.wall_movement,
    }
}

/// Classify the tick's movement context from the contact state, clearing
/// the jump flag when the player leaves the air for ground or wall.
pub fn select_context(
    grounded: bool,
    on_wall: bool,
    jump: &mut JumpStateMachine,
) -> MovementContext {
    if grounded {
        jump.end_jump_state();
        MovementContext::Ground
    } else if on_wall {
        jump.end_jump_state();
        MovementContext::Wall
    } else {
        MovementContext::Air
    }
}

/// Whether the player is letting go rather than steering: no input away
/// from a wall, or airborne and pushing into the contacted wall.
pub fn is_trying_to_stop(
    grounded: bool,
    wall_left: bool,
    wall_right: bool,
    move_input: Vec2,
) -> bool {
    let on_wall = wall_left || wall_right;
    if !on_wall && move_input == Vec2::ZERO {
        return true;
    }
    if !grounded && wall_left && move_input.x < -0.1 {
        return true;
    }
    if !grounded && wall_right && move_input.x > 0.1 {
        return true;
    }
    false
}

/// Route a friction value onto the body: grounded bodies get it as the
/// contact-surface coefficient (with the set's air drag as damping),
/// airborne bodies get it directly as linear damping.
fn set_friction(body: &mut Body2d, params: &MovementParams, grounded: bool, friction: f32) {
    if grounded {
        body.surface_friction = friction;
        body.linear_damping = params.air_drag;
    } else {
        body.linear_damping = friction;
    }
}

/// Per-tick friction selection and horizontal acceleration.
///
/// Crouching while dry slides on crouch friction; active input applies the
/// acceleration force and updates facing; otherwise stop friction brakes
/// the player.
#[allow(clippy::too_many_arguments)]
pub fn apply_horizontal_drive(
    body: &mut Body2d,
    params: &MovementParams,
    facing: &mut Facing,
    move_input: Vec2,
    grounded: bool,
    wall_left: bool,
    wall_right: bool,
    crouching: bool,
    submerged: bool,
    control_enabled: bool,
) {
    if control_enabled && crouching && !submerged {
        set_friction(body, params, grounded, params.crouch_friction);
    } else if control_enabled && !is_trying_to_stop(grounded, wall_left, wall_right, move_input) {
        set_friction(body, params, grounded, params.move_friction);
        body.apply_force(Vec2::new(move_input.x * params.move_acceleration, 0.0));
        if move_input.x != 0.0 {
            *facing = if move_input.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };
        }
    } else {
        set_friction(body, params, grounded, params.stop_friction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ColliderEnvelope;

    #[test]
    fn test_context_selection_priority() {
        let mut jump = JumpStateMachine::new(&PlayerConfig::default());
        // Grounded wins over wall.
        assert_eq!(
            select_context(true, true, &mut jump),
            MovementContext::Ground
        );
        assert_eq!(
            select_context(false, true, &mut jump),
            MovementContext::Wall
        );
        assert_eq!(
            select_context(false, false, &mut jump),
            MovementContext::Air
        );
    }

    #[test]
    fn test_regaining_support_clears_jumping() {
        let config = PlayerConfig::default();
        let mut jump = JumpStateMachine::new(&config);
        jump.force_jumping_for_test();

        select_context(false, false, &mut jump);
        assert!(jump.is_jumping());

        select_context(false, true, &mut jump);
        assert!(!jump.is_jumping());
    }

    #[test]
    fn test_trying_to_stop_rules() {
        // No wall, no input: stopping.
        assert!(is_trying_to_stop(true, false, false, Vec2::ZERO));
        // Input without wall: steering.
        assert!(!is_trying_to_stop(true, false, false, Vec2::new(1.0, 0.0)));
        // Airborne, pushing into the contacted wall: stopping (wall slide).
        assert!(is_trying_to_stop(false, false, true, Vec2::new(1.0, 0.0)));
        assert!(is_trying_to_stop(false, true, false, Vec2::new(-1.0, 0.0)));
        // Pushing away from the wall: steering.
        assert!(!is_trying_to_stop(false, true, false, Vec2::new(1.0, 0.0)));
        // Grounded against a wall, pushing into it: still steering.
        assert!(!is_trying_to_stop(true, false, true, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_drive_applies_force_and_facing() {
        let config = PlayerConfig::default();
        let mut body = Body2d::new(Vec2::ZERO, ColliderEnvelope::default());
        body.gravity_scale = 0.0;
        let mut facing = Facing::Right;

        apply_horizontal_drive(
            &mut body,
            &config.ground_movement,
            &mut facing,
            Vec2::new(-1.0, 0.0),
            true,
            false,
            false,
            false,
            false,
            true,
        );
        body.integrate(0.02, true);

        assert!(body.velocity.x < 0.0);
        assert_eq!(facing, Facing::Left);
        assert_eq!(
            body.surface_friction,
            config.ground_movement.move_friction
        );
        assert_eq!(body.linear_damping, config.ground_movement.air_drag);
    }

    #[test]
    fn test_crouch_selects_crouch_friction() {
        let config = PlayerConfig::default();
        let mut body = Body2d::new(Vec2::ZERO, ColliderEnvelope::default());
        let mut facing = Facing::Right;

        apply_horizontal_drive(
            &mut body,
            &config.ground_movement,
            &mut facing,
            Vec2::new(1.0, -1.0),
            true,
            false,
            false,
            true,
            false,
            true,
        );

        assert_eq!(
            body.surface_friction,
            config.ground_movement.crouch_friction
        );
    }

    #[test]
    fn test_control_disabled_uses_stop_friction() {
        let config = PlayerConfig::default();
        let mut body = Body2d::new(Vec2::ZERO, ColliderEnvelope::default());
        body.gravity_scale = 0.0;
        let mut facing = Facing::Right;

        apply_horizontal_drive(
            &mut body,
            &config.ground_movement,
            &mut facing,
            Vec2::new(1.0, 0.0),
            true,
            false,
            false,
            false,
            false,
            false,
        );
        body.integrate(0.02, true);

        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(
            body.surface_friction,
            config.ground_movement.stop_friction
        );
    }
}
