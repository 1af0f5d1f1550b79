//! Ball and arena entities.
//!
//! Every physics entity carries one semantic tag component so the contact
//! handler can tell what actually collided:
//!
//! - [`BoundaryEdge`] marks the single static arena body.
//! - [`Ball`] carries the per-ball display data (color, radius).
//! - [`ContactLockout`] is the mutable per-ball flag that arms and disarms the
//!   spawn trigger across a sustained arena contact.
//!
//! The factory functions here are the only place balls and the arena are
//! constructed, so collider tuning (density, restitution, CCD) stays in one
//! spot.

use crate::config::SimConfig;
use crate::constants::PIXELS_PER_METER;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Per-ball display data, assigned once at creation and never mutated.
#[derive(Component, Debug, Clone)]
pub struct Ball {
    /// Fill color of the rendered disc (opaque, uniformly random per ball).
    pub color: Color,
    /// Ball radius in meters.
    pub radius: f32,
}

/// Marker component for the static arena boundary.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryEdge;

/// Spawn-trigger lockout flag.
///
/// `true` while the ball's current arena contact has already been considered
/// for spawning.  A single physical bounce can surface as several contact
/// notifications across solver substeps; the flag holds the trigger closed
/// until the matching contact-end event re-arms it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactLockout(pub bool);

/// Spawns one dynamic ball at `position` (meters) and returns its entity.
///
/// Velocity components are sampled independently from the discrete candidate
/// sets in the config — never interpolated — and the fill color is a fresh
/// uniform sRGB sample.  CCD is enabled because the arena wall is a thin
/// polyline and fully elastic balls get fast enough to tunnel through it.
pub fn spawn_ball(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    position: Vec2,
    config: &SimConfig,
) -> Entity {
    let mut rng = rand::thread_rng();
    let color = random_ball_color(&mut rng);
    let velocity =
        random_launch_velocity(&mut rng, &config.launch_speeds_x, &config.launch_speeds_y);
    let radius_px = config.ball_radius * PIXELS_PER_METER;

    commands
        .spawn((
            (
                Ball {
                    color,
                    radius: config.ball_radius,
                },
                ContactLockout(false),
                Mesh2d(meshes.add(Circle::new(radius_px))),
                MeshMaterial2d(materials.add(ColorMaterial::from(color))),
                Transform::from_translation((position * PIXELS_PER_METER).extend(0.1)),
                GlobalTransform::default(),
            ),
            (
                RigidBody::Dynamic,
                Collider::ball(radius_px),
                ColliderMassProperties::Density(config.ball_density),
                Restitution {
                    coefficient: config.ball_restitution,
                    // Max, not the default Average: the arena wall has zero
                    // restitution, and averaging would bleed energy every bounce.
                    combine_rule: CoefficientCombineRule::Max,
                },
                Friction::coefficient(0.0),
                Velocity::linear(velocity * PIXELS_PER_METER),
                Ccd::enabled(),
                ActiveEvents::COLLISION_EVENTS,
            ),
        ))
        .id()
}

/// Spawns the single static arena boundary: a closed polyline approximating a
/// circle, centered at the origin.  Runs exactly once at startup.
pub fn spawn_arena(commands: &mut Commands, config: &SimConfig) -> Entity {
    let vertices: Vec<Vec2> = arena_vertices(config.arena_radius, config.arena_segments)
        .into_iter()
        .map(|v| v * PIXELS_PER_METER)
        .collect();

    commands
        .spawn((
            BoundaryEdge,
            Transform::default(),
            GlobalTransform::default(),
            RigidBody::Fixed,
            Collider::polyline(vertices, None),
        ))
        .id()
}

/// Vertex loop for the arena circle (meters), closed by repeating the first
/// vertex at the end — a polyline with no index buffer only connects
/// consecutive points, so the repeat is what seals the final segment.
pub fn arena_vertices(radius: f32, segments: usize) -> Vec<Vec2> {
    let mut vertices = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let angle = std::f32::consts::TAU * i as f32 / segments as f32;
        vertices.push(Vec2::new(radius * angle.cos(), radius * angle.sin()));
    }
    vertices.push(vertices[0]);
    vertices
}

/// Picks one launch velocity (m/s): one entry from each candidate set,
/// sampled independently per axis.
pub fn random_launch_velocity(rng: &mut impl Rng, speeds_x: &[f32], speeds_y: &[f32]) -> Vec2 {
    Vec2::new(
        speeds_x.choose(rng).copied().unwrap_or(0.0),
        speeds_y.choose(rng).copied().unwrap_or(0.0),
    )
}

/// Uniform random opaque sRGB color.
pub fn random_ball_color(rng: &mut impl Rng) -> Color {
    Color::srgb(
        rng.gen_range(0.0..1.0),
        rng.gen_range(0.0..1.0),
        rng.gen_range(0.0..1.0),
    )
}
