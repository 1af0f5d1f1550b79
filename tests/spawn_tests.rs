//! Headless tests for the boundary-contact spawn pipeline.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no physics —
//! and drive the contact handler by writing Rapier `CollisionEvent` messages
//! by hand, so they run fast and deterministically in CI.  The probabilistic
//! gate is pinned to 0% or 100% per scenario; the 20% statistics are covered
//! by the unit tests in `src/spawning.rs`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

use bouncesim::ball::{Ball, BoundaryEdge, ContactLockout};
use bouncesim::config::SimConfig;
use bouncesim::spawning::{
    boundary_contact_system, drain_spawn_queue, LiveBallCount, SpawnQueue,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app running the spawn pipeline with the given
/// spawn chance.  Asset stores are inserted by hand since there is no
/// `AssetPlugin`; the factory only needs somewhere to put ball meshes.
fn test_app(spawn_chance_percent: u8) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Assets::<Mesh>::default());
    app.insert_resource(Assets::<ColorMaterial>::default());
    app.insert_resource(SimConfig {
        spawn_chance_percent,
        ..Default::default()
    });
    app.init_resource::<SpawnQueue>();
    app.insert_resource(LiveBallCount(1));
    app.add_message::<CollisionEvent>();
    app.add_systems(
        Update,
        (boundary_contact_system, drain_spawn_queue).chain(),
    );
    app
}

/// Spawn a bare ball entity (tag components only — no physics body needed for
/// the decision logic).
fn spawn_test_ball(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Ball {
                color: Color::WHITE,
                radius: 0.5,
            },
            ContactLockout(false),
        ))
        .id()
}

fn spawn_test_arena(app: &mut App) -> Entity {
    app.world_mut().spawn(BoundaryEdge).id()
}

fn send_started(app: &mut App, e1: Entity, e2: Entity) {
    app.world_mut()
        .write_message(CollisionEvent::Started(e1, e2, CollisionEventFlags::empty()));
}

fn send_stopped(app: &mut App, e1: Entity, e2: Entity) {
    app.world_mut()
        .write_message(CollisionEvent::Stopped(e1, e2, CollisionEventFlags::empty()));
}

fn ball_entity_count(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<Ball>>();
    query.iter(app.world()).count()
}

fn lockout(app: &App, ball: Entity) -> bool {
    app.world()
        .get::<ContactLockout>(ball)
        .expect("ball entity must carry a ContactLockout")
        .0
}

fn live_count(app: &App) -> usize {
    app.world().resource::<LiveBallCount>().0
}

fn queue_len(app: &App) -> usize {
    app.world().resource::<SpawnQueue>().0.len()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Forced 100% chance: one boundary contact yields exactly one new ball, and
/// the colliding ball's lockout closes immediately.
#[test]
fn forced_contact_spawns_one_ball_and_closes_lockout() {
    let mut app = test_app(100);
    let arena = spawn_test_arena(&mut app);
    let ball = spawn_test_ball(&mut app);

    send_started(&mut app, arena, ball);
    app.update();

    assert_eq!(live_count(&app), 2);
    assert_eq!(ball_entity_count(&mut app), 2);
    assert!(lockout(&app, ball), "lockout must close on an accepted spawn");
    assert_eq!(queue_len(&app), 0, "queue must be drained within the frame");
}

/// The entity order inside the collision event is arbitrary; both orderings
/// must resolve to the same ball.
#[test]
fn event_entity_order_does_not_matter() {
    let mut app = test_app(100);
    let arena = spawn_test_arena(&mut app);
    let ball = spawn_test_ball(&mut app);

    send_started(&mut app, ball, arena);
    app.update();

    assert_eq!(live_count(&app), 2);
    assert!(lockout(&app, ball));
}

/// A closed lockout swallows repeated contact-start notifications from the
/// same sustained contact; the contact-end event re-arms the trigger.
#[test]
fn lockout_blocks_repeat_triggers_until_contact_ends() {
    let mut app = test_app(100);
    let arena = spawn_test_arena(&mut app);
    let ball = spawn_test_ball(&mut app);

    send_started(&mut app, arena, ball);
    app.update();
    assert_eq!(live_count(&app), 2);

    // Same contact fires again while still resolving: no extra spawn.
    send_started(&mut app, arena, ball);
    app.update();
    assert_eq!(live_count(&app), 2);
    assert!(lockout(&app, ball));

    // Separation re-arms…
    send_stopped(&mut app, arena, ball);
    app.update();
    assert!(!lockout(&app, ball), "lockout must re-open on contact end");

    // …so the next bounce can spawn again.
    send_started(&mut app, arena, ball);
    app.update();
    assert_eq!(live_count(&app), 3);
}

/// Forced 0% chance: boundary contacts never spawn, and a rejected roll does
/// not close the lockout.
#[test]
fn zero_chance_never_spawns() {
    let mut app = test_app(0);
    let arena = spawn_test_arena(&mut app);
    let ball = spawn_test_ball(&mut app);

    for _ in 0..10 {
        send_started(&mut app, arena, ball);
        send_stopped(&mut app, arena, ball);
        app.update();
    }

    assert_eq!(live_count(&app), 1);
    assert_eq!(ball_entity_count(&mut app), 1);
    assert!(!lockout(&app, ball));
}

/// Ball↔ball contacts never qualify, regardless of the spawn chance.
#[test]
fn ball_ball_contact_never_spawns() {
    let mut app = test_app(100);
    let ball_a = spawn_test_ball(&mut app);
    let ball_b = spawn_test_ball(&mut app);

    send_started(&mut app, ball_a, ball_b);
    app.update();

    assert_eq!(live_count(&app), 1);
    assert_eq!(ball_entity_count(&mut app), 2, "just the two originals");
    assert!(!lockout(&app, ball_a));
    assert!(!lockout(&app, ball_b));
}

/// A stray contact-end with no preceding start is harmless.
#[test]
fn unmatched_contact_end_is_a_no_op() {
    let mut app = test_app(100);
    let arena = spawn_test_arena(&mut app);
    let ball = spawn_test_ball(&mut app);

    send_stopped(&mut app, arena, ball);
    app.update();

    assert_eq!(live_count(&app), 1);
    assert!(!lockout(&app, ball));
}

/// The live count is monotone: N accepted contacts leave 1 + N balls, with the
/// queue empty between every frame.
#[test]
fn live_count_grows_by_one_per_accepted_contact() {
    let mut app = test_app(100);
    let arena = spawn_test_arena(&mut app);
    let ball = spawn_test_ball(&mut app);

    let mut previous = live_count(&app);
    for bounce in 1..=5 {
        send_started(&mut app, arena, ball);
        send_stopped(&mut app, arena, ball);
        app.update();

        let current = live_count(&app);
        assert_eq!(current, 1 + bounce);
        assert!(current >= previous, "live-ball count must never decrease");
        assert_eq!(queue_len(&app), 0);
        previous = current;
    }
    assert_eq!(ball_entity_count(&mut app), 6);
}
