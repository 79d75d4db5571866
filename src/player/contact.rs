//! Contact Classification
//!
//! Runs the ground and wall probes every tick and turns raw overlaps into
//! the support state the rest of the core consumes: grounded, submerged,
//! wall-left/right, plus the transition timestamps that drive coyote time
//! and landing effects.

use glam::Vec2;

use crate::config::PlayerConfig;
use crate::physics::{SurfaceKind, SurfaceWorld};
use crate::signals::{ParticleId, Signal, SignalQueue};

/// Per-tick support state with transition bookkeeping.
#[derive(Debug)]
pub struct ContactClassifier {
    grounded: bool,
    submerged: bool,
    wall_left: bool,
    wall_right: bool,
    /// Simulation time at which ground contact was last lost.
    last_on_ground_time: f64,
    /// Simulation time of the most recent landing.
    last_land_time: f64,
    just_landed: bool,
    slide_left_active: bool,
    slide_right_active: bool,
}

impl Default for ContactClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactClassifier {
    pub fn new() -> Self {
        Self {
            grounded: false,
            submerged: false,
            wall_left: false,
            wall_right: false,
            last_on_ground_time: f64::NEG_INFINITY,
            last_land_time: f64::NEG_INFINITY,
            just_landed: false,
            slide_left_active: false,
            slide_right_active: false,
        }
    }

    /// Classify support for a body at `body_position` against `world`.
    ///
    /// `move_input` gates the wall-effect signals: wall hit and wall slide
    /// only fire while airborne with active input, matching how a slide
    /// actually looks in play.
    pub fn update(
        &mut self,
        world: &SurfaceWorld,
        config: &PlayerConfig,
        body_position: Vec2,
        move_input: Vec2,
        now: f64,
        signals: &mut SignalQueue,
    ) {
        self.update_ground(world, config, body_position, now, signals);
        self.update_walls(world, config, body_position, move_input, signals);
    }

    fn update_ground(
        &mut self,
        world: &SurfaceWorld,
        config: &PlayerConfig,
        body_position: Vec2,
        now: f64,
        signals: &mut SignalQueue,
    ) {
        let was_grounded = self.grounded;
        let probe = config.ground_probe.world_aabb(body_position);

        self.grounded = false;
        self.submerged = false;
        for volume in world.overlapping(&probe) {
            match volume.kind {
                SurfaceKind::Solid => self.grounded = true,
                // Submersion substitutes for ground contact only when
                // swimming is permitted.
                SurfaceKind::Water => {
                    self.submerged = true;
                    self.grounded = config.can_swim;
                }
                SurfaceKind::Trigger => {}
            }
        }

        if was_grounded && !self.grounded {
            self.last_on_ground_time = now;
        }

        self.just_landed = !was_grounded && self.grounded;
        if self.just_landed {
            self.last_land_time = now;
            signals.push(Signal::ParticleStart(ParticleId::Land));
        }
    }

    fn update_walls(
        &mut self,
        world: &SurfaceWorld,
        config: &PlayerConfig,
        body_position: Vec2,
        move_input: Vec2,
        signals: &mut SignalQueue,
    ) {
        let pushing = !self.grounded && move_input != Vec2::ZERO;

        let was_left = self.wall_left;
        self.wall_left = world.any_solid_overlap(&config.left_wall_probe.world_aabb(body_position));
        if !was_left && self.wall_left && pushing {
            signals.push(Signal::ParticleStart(ParticleId::WallHitLeft));
            if !self.slide_left_active {
                self.slide_left_active = true;
                signals.push(Signal::ParticleStart(ParticleId::WallSlideLeft));
            }
        }
        if !self.wall_left && self.slide_left_active {
            self.slide_left_active = false;
            signals.push(Signal::ParticleStop(ParticleId::WallSlideLeft));
        }

        let was_right = self.wall_right;
        self.wall_right =
            world.any_solid_overlap(&config.right_wall_probe.world_aabb(body_position));
        if !was_right && self.wall_right && pushing {
            signals.push(Signal::ParticleStart(ParticleId::WallHitRight));
            if !self.slide_right_active {
                self.slide_right_active = true;
                signals.push(Signal::ParticleStart(ParticleId::WallSlideRight));
            }
        }
        if !self.wall_right && self.slide_right_active {
            self.slide_right_active = false;
            signals.push(Signal::ParticleStop(ParticleId::WallSlideRight));
        }
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn submerged(&self) -> bool {
        self.submerged
    }

    pub fn wall_left(&self) -> bool {
        self.wall_left
    }

    pub fn wall_right(&self) -> bool {
        self.wall_right
    }

    pub fn on_wall(&self) -> bool {
        self.wall_left || self.wall_right
    }

    /// Landed on this tick (not-grounded -> grounded transition).
    pub fn just_landed(&self) -> bool {
        self.just_landed
    }

    /// Simulation time at which ground contact was last lost. Drives the
    /// coyote window.
    pub fn last_on_ground_time(&self) -> f64 {
        self.last_on_ground_time
    }

    /// Simulation time of the most recent landing.
    pub fn last_land_time(&self) -> f64 {
        self.last_land_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Aabb;

    fn floor_world() -> SurfaceWorld {
        let mut world = SurfaceWorld::new();
        world.add_solid(Aabb::new(Vec2::new(-50.0, -2.0), Vec2::new(50.0, 0.0)));
        world
    }

    /// Body center for which the default ground probe overlaps a floor
    /// whose top is at y = 0.
    const STANDING: Vec2 = Vec2::new(0.0, 0.5);
    const AIRBORNE: Vec2 = Vec2::new(0.0, 3.0);

    #[test]
    fn test_grounded_on_solid_overlap() {
        let world = floor_world();
        let config = PlayerConfig::default();
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();

        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.0, &mut signals);
        assert!(contact.grounded());
        assert!(!contact.submerged());

        contact.update(&world, &config, AIRBORNE, Vec2::ZERO, 0.02, &mut signals);
        assert!(!contact.grounded());
    }

    #[test]
    fn test_leaving_ground_records_timestamp() {
        let world = floor_world();
        let config = PlayerConfig::default();
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();

        contact.update(&world, &config, STANDING, Vec2::ZERO, 1.0, &mut signals);
        contact.update(&world, &config, AIRBORNE, Vec2::ZERO, 1.5, &mut signals);

        assert_eq!(contact.last_on_ground_time(), 1.5);
    }

    #[test]
    fn test_landing_fires_particle_and_timestamp() {
        let world = floor_world();
        let config = PlayerConfig::default();
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();

        contact.update(&world, &config, AIRBORNE, Vec2::ZERO, 0.0, &mut signals);
        assert!(signals.drain().is_empty());

        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.5, &mut signals);
        assert!(contact.just_landed());
        assert_eq!(contact.last_land_time(), 0.5);
        assert!(
            signals
                .drain()
                .contains(&Signal::ParticleStart(ParticleId::Land))
        );

        // Staying grounded is not a second landing.
        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.52, &mut signals);
        assert!(!contact.just_landed());
    }

    #[test]
    fn test_water_counts_as_support_only_when_swimming() {
        let mut world = SurfaceWorld::new();
        world.add_water(Aabb::new(Vec2::new(-10.0, -2.0), Vec2::new(10.0, 0.0)));

        let mut config = PlayerConfig::default();
        config.can_swim = true;
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();
        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.0, &mut signals);
        assert!(contact.submerged());
        assert!(contact.grounded());

        config.can_swim = false;
        let mut contact = ContactClassifier::new();
        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.0, &mut signals);
        assert!(contact.submerged());
        assert!(!contact.grounded());
    }

    #[test]
    fn test_trigger_volumes_are_ignored() {
        let mut world = SurfaceWorld::new();
        world.add_trigger(Aabb::new(Vec2::new(-10.0, -2.0), Vec2::new(10.0, 0.0)));

        let config = PlayerConfig::default();
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();
        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.0, &mut signals);

        assert!(!contact.grounded());
        assert!(!contact.submerged());
    }

    #[test]
    fn test_wall_contact_and_slide_signals() {
        let mut world = SurfaceWorld::new();
        // Wall to the right of the body at x = 0.
        world.add_solid(Aabb::new(Vec2::new(0.5, -5.0), Vec2::new(1.5, 5.0)));

        let config = PlayerConfig::default();
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();
        let pushing_right = Vec2::new(1.0, 0.0);

        // Airborne, pushing into the wall: hit + slide start.
        contact.update(
            &world,
            &config,
            Vec2::new(0.0, 3.0),
            pushing_right,
            0.0,
            &mut signals,
        );
        assert!(contact.wall_right());
        assert!(!contact.wall_left());
        let fired = signals.drain();
        assert!(fired.contains(&Signal::ParticleStart(ParticleId::WallHitRight)));
        assert!(fired.contains(&Signal::ParticleStart(ParticleId::WallSlideRight)));

        // Still on the wall: no duplicate start.
        contact.update(
            &world,
            &config,
            Vec2::new(0.0, 2.8),
            pushing_right,
            0.02,
            &mut signals,
        );
        assert!(signals.drain().is_empty());

        // Off the wall: slide stops.
        contact.update(
            &world,
            &config,
            Vec2::new(-2.0, 2.6),
            pushing_right,
            0.04,
            &mut signals,
        );
        assert!(
            signals
                .drain()
                .contains(&Signal::ParticleStop(ParticleId::WallSlideRight))
        );
    }

    #[test]
    fn test_wall_effects_require_input_and_airborne() {
        let mut world = floor_world();
        world.add_solid(Aabb::new(Vec2::new(0.5, 0.0), Vec2::new(1.5, 5.0)));

        let config = PlayerConfig::default();
        let mut contact = ContactClassifier::new();
        let mut signals = SignalQueue::new();

        // Grounded against the wall with no input: contact is reported but
        // no wall effects fire.
        contact.update(&world, &config, STANDING, Vec2::ZERO, 0.0, &mut signals);
        assert!(contact.wall_right());
        let fired = signals.drain();
        assert!(!fired.contains(&Signal::ParticleStart(ParticleId::WallHitRight)));
        assert!(!fired.contains(&Signal::ParticleStart(ParticleId::WallSlideRight)));
    }
}
