//! Rendering systems: camera setup and the arena outline.
//!
//! Balls are retained `Mesh2d` discs created by the factory (their transforms
//! track the physics bodies automatically), so the only per-frame draw work
//! here is the gizmo outline tracing the arena's collision polyline.

use crate::ball::arena_vertices;
use crate::config::SimConfig;
use crate::constants::PIXELS_PER_METER;
use bevy::prelude::*;

/// Setup camera for 2D rendering, centered on the arena origin.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Draws the arena boundary as a white outline.
///
/// The outline uses the exact same vertex loop as the collider, so what you
/// see is what the balls bounce off — including the 36-segment faceting.
pub fn arena_outline_system(mut gizmos: Gizmos, config: Res<SimConfig>) {
    let points = arena_vertices(config.arena_radius, config.arena_segments)
        .into_iter()
        .map(|v| v * PIXELS_PER_METER);
    gizmos.linestrip_2d(points, Color::WHITE);
}
