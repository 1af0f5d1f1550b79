//! Runtime simulation configuration loaded from `assets/sim.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors the tuning constants in
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/sim.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about — handy because
//! the spawn chance, ball radius, and launch-velocity sets are tuning
//! opinions, not invariants.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable simulation configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/sim.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    pub arena_radius: f32,
    pub arena_segments: usize,

    // ── Balls ────────────────────────────────────────────────────────────────
    pub ball_radius: f32,
    pub ball_density: f32,
    pub ball_restitution: f32,
    pub launch_speeds_x: Vec<f32>,
    pub launch_speeds_y: Vec<f32>,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity_y: f32,
    pub fixed_timestep: f32,
    pub physics_substeps: usize,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub spawn_chance_percent: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_radius: ARENA_RADIUS,
            arena_segments: ARENA_SEGMENTS,
            ball_radius: BALL_RADIUS,
            ball_density: BALL_DENSITY,
            ball_restitution: BALL_RESTITUTION,
            launch_speeds_x: LAUNCH_SPEEDS_X.to_vec(),
            launch_speeds_y: LAUNCH_SPEEDS_Y.to_vec(),
            gravity_y: GRAVITY_Y,
            fixed_timestep: FIXED_TIMESTEP,
            physics_substeps: PHYSICS_SUBSTEPS,
            spawn_chance_percent: SPAWN_CHANCE_PERCENT,
        }
    }
}

/// Startup system: attempt to load `assets/sim.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the simulation.  A missing file is silently
/// ignored (defaults are already in place from `insert_resource`).
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    let path = "assets/sim.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded sim config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}
