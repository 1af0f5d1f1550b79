use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use bouncesim::ball;
use bouncesim::config::{self, SimConfig};
use bouncesim::constants::{FIXED_TIMESTEP, PHYSICS_SUBSTEPS, PIXELS_PER_METER, WINDOW_HEIGHT, WINDOW_WIDTH};
use bouncesim::rendering;
use bouncesim::spawning::{LiveBallCount, SpawnPlugin};

/// Spawn the arena boundary and the first ball at the origin.
fn spawn_initial_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut count: ResMut<LiveBallCount>,
    config: Res<SimConfig>,
) {
    ball::spawn_arena(&mut commands, &config);
    ball::spawn_ball(&mut commands, &mut meshes, &mut materials, Vec2::ZERO, &config);
    count.0 = 1;
    eprintln!("[SETUP] Arena and initial ball spawned");
}

/// Configure Rapier from the loaded config: straight-down gravity and the
/// fixed per-frame timestep (a constant, not the real elapsed frame time).
fn setup_physics_config(
    mut rapier_config: Query<&mut RapierConfiguration>,
    mut timestep: ResMut<TimestepMode>,
    config: Res<SimConfig>,
) {
    for mut cfg in rapier_config.iter_mut() {
        cfg.gravity = Vec2::new(0.0, config.gravity_y * PIXELS_PER_METER);
    }
    *timestep = TimestepMode::Fixed {
        dt: config.fixed_timestep,
        substeps: config.physics_substeps,
    };
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bouncesim".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert SimConfig with compiled defaults; load_sim_config will
        // overwrite it from assets/sim.toml (if present) in the Startup schedule.
        .insert_resource(SimConfig::default())
        .insert_resource(TimestepMode::Fixed {
            dt: FIXED_TIMESTEP,
            substeps: PHYSICS_SUBSTEPS,
        })
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PIXELS_PER_METER,
        ))
        .add_plugins(SpawnPlugin)
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                config::load_sim_config,
                rendering::setup_camera.after(config::load_sim_config),
                setup_physics_config.after(config::load_sim_config),
                spawn_initial_world.after(config::load_sim_config),
            ),
        )
        .add_systems(Update, rendering::arena_outline_system)
        .run();
}
