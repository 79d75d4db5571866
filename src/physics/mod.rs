//! Physics Module
//!
//! The minimal 2D physics surface the movement core runs against: a rigid
//! body with gravity scaling and a force accumulator, a resizable collision
//! envelope, and AABB overlap/resolution primitives for the contact probes.

pub mod body;
pub mod collision;

pub use body::{BASE_GRAVITY, Body2d, BodyMode, ColliderEnvelope};
pub use collision::{
    Aabb, ProbeVolume, SurfaceKind, SurfaceVolume, SurfaceWorld, resolve_solid_overlaps,
};
