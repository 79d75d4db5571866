//! Collision Primitives
//!
//! Pure AABB queries for the contact probes plus a minimal push-out
//! resolver so the body does not sink through solid geometry. The static
//! world is a flat list of tagged volumes; the probes overlap-test against
//! it every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// What a static volume is made of, as seen by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Walkable/blocking geometry. Counts for ground and wall contact.
    Solid,
    /// Water. Counts as support only when swimming is permitted.
    Water,
    /// Non-physical trigger volume. Ignored by every probe.
    Trigger,
}

/// One tagged volume of static world geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVolume {
    pub aabb: Aabb,
    pub kind: SurfaceKind,
}

/// The static geometry the contact probes query.
#[derive(Debug, Default)]
pub struct SurfaceWorld {
    volumes: Vec<SurfaceVolume>,
}

impl SurfaceWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, volume: SurfaceVolume) {
        self.volumes.push(volume);
    }

    pub fn add_solid(&mut self, aabb: Aabb) {
        self.add(SurfaceVolume {
            aabb,
            kind: SurfaceKind::Solid,
        });
    }

    pub fn add_water(&mut self, aabb: Aabb) {
        self.add(SurfaceVolume {
            aabb,
            kind: SurfaceKind::Water,
        });
    }

    pub fn add_trigger(&mut self, aabb: Aabb) {
        self.add(SurfaceVolume {
            aabb,
            kind: SurfaceKind::Trigger,
        });
    }

    /// All volumes overlapping `probe`, in insertion order.
    pub fn overlapping<'a>(&'a self, probe: &'a Aabb) -> impl Iterator<Item = &'a SurfaceVolume> {
        self.volumes.iter().filter(move |v| v.aabb.overlaps(probe))
    }

    /// Whether any solid volume overlaps `probe`.
    pub fn any_solid_overlap(&self, probe: &Aabb) -> bool {
        self.overlapping(probe)
            .any(|v| v.kind == SurfaceKind::Solid)
    }
}

/// A fixed collision-query volume positioned relative to the body,
/// independent of the body's own (resizable) envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeVolume {
    /// Probe center offset from the body position (meters).
    pub offset: Vec2,
    /// Probe half extents (meters).
    pub half_extents: Vec2,
}

impl ProbeVolume {
    /// Resolve the probe to a world-space AABB for a body at `body_position`.
    pub fn world_aabb(&self, body_position: Vec2) -> Aabb {
        Aabb::from_center(body_position + self.offset, self.half_extents)
    }
}

/// Minimal translation that separates `body` from `solid`, or `None` if
/// they do not overlap. Pushes along the axis of least penetration, away
/// from the solid's center.
fn penetration_push(body: &Aabb, solid: &Aabb) -> Option<Vec2> {
    if !body.overlaps(solid) {
        return None;
    }

    let overlap_x = (body.max.x.min(solid.max.x)) - (body.min.x.max(solid.min.x));
    let overlap_y = (body.max.y.min(solid.max.y)) - (body.min.y.max(solid.min.y));

    let delta = body.center() - solid.center();
    if overlap_x < overlap_y {
        let sign = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        Some(Vec2::new(overlap_x * sign, 0.0))
    } else {
        let sign = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        Some(Vec2::new(0.0, overlap_y * sign))
    }
}

/// Push an envelope out of every overlapping solid volume.
///
/// For each resolved overlap the position is adjusted in place and the
/// velocity component driving into the surface is zeroed. Returns `true`
/// if any overlap was resolved.
pub fn resolve_solid_overlaps(
    world: &SurfaceWorld,
    envelope_aabb: impl Fn(Vec2) -> Aabb,
    position: &mut Vec2,
    velocity: &mut Vec2,
) -> bool {
    let mut any = false;

    for volume in &world.volumes {
        if volume.kind != SurfaceKind::Solid {
            continue;
        }
        let body_aabb = envelope_aabb(*position);
        if let Some(push) = penetration_push(&body_aabb, &volume.aabb) {
            *position += push;
            // Kill the velocity component driving into the surface.
            if push.x != 0.0 && velocity.x * push.x < 0.0 {
                velocity.x = 0.0;
            }
            if push.y != 0.0 && velocity.y * push.y < 0.0 {
                velocity.y = 0.0;
            }
            any = true;
        }
    }

    any
}
