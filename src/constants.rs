//! Centralised simulation constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::SimConfig`] mirrors the tuning subset and can override it
//! at startup from `assets/sim.toml`; this file remains the authoritative
//! default source.

// ── Window ────────────────────────────────────────────────────────────────────

/// Window width in physical pixels.
pub const WINDOW_WIDTH: u32 = 2060;

/// Window height in physical pixels.
pub const WINDOW_HEIGHT: u32 = 1400;

// ── Units ─────────────────────────────────────────────────────────────────────

/// Meters-to-pixels scale factor for both rendering and physics.
///
/// Every length handed to Rapier or to a mesh is a simulation-space value
/// (meters) multiplied by this factor.  Changing it rescales the whole scene
/// uniformly; it is deliberately not part of [`crate::config::SimConfig`]
/// because the Rapier plugin bakes it in at app construction.
pub const PIXELS_PER_METER: f32 = 100.0;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Radius of the circular arena the balls bounce inside (meters).
pub const ARENA_RADIUS: f32 = 5.0;

/// Number of straight segments approximating the arena circle.
///
/// The arena collider is a closed polyline, not a true circle; 36 segments
/// (10° each) keeps bounce directions visually indistinguishable from a
/// smooth wall at this scale.
pub const ARENA_SEGMENTS: usize = 36;

// ── Balls ─────────────────────────────────────────────────────────────────────

/// Ball radius (meters).
pub const BALL_RADIUS: f32 = 0.5;

/// Ball collider density.  Only relative mass matters here since balls never
/// collide with anything that cares about absolute mass.
pub const BALL_DENSITY: f32 = 2.0;

/// Ball restitution.  1.0 = perfectly elastic: balls keep their speed across
/// bounces, so the simulation never winds down.
pub const BALL_RESTITUTION: f32 = 1.0;

/// Candidate x-velocities for a freshly spawned ball (m/s).
/// One entry is picked uniformly; intermediate values never occur.
pub const LAUNCH_SPEEDS_X: [f32; 12] = [
    -4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0,
];

/// Candidate y-velocities for a freshly spawned ball (m/s).
pub const LAUNCH_SPEEDS_Y: [f32; 9] = [4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0];

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward gravity (m/s²).
pub const GRAVITY_Y: f32 = -10.0;

/// Fixed simulation step advanced per rendered frame (seconds).
///
/// Deliberately not the real elapsed frame time: at 60 FPS this runs the
/// simulation at 0.8× real time, which reads better on screen once the arena
/// fills up.
pub const FIXED_TIMESTEP: f32 = 0.8 / 60.0;

/// Solver substeps per fixed step.
pub const PHYSICS_SUBSTEPS: usize = 1;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Percent chance, per arena contact, that a new ball is spawned.
///
/// Each accepted contact adds one ball, so this gates exponential growth:
/// at 100 the population roughly doubles every bounce generation; at 20 the
/// arena fills at a watchable pace.
pub const SPAWN_CHANCE_PERCENT: u8 = 20;
