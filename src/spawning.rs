//! Collision-triggered ball spawning.
//!
//! ## Flow
//!
//! 1. Rapier emits `CollisionEvent`s while stepping the world.
//! 2. [`boundary_contact_system`] filters them down to ball↔arena pairs,
//!    applies the probability gate and the per-ball [`ContactLockout`], and
//!    pushes accepted requests into the [`SpawnQueue`].
//! 3. [`drain_spawn_queue`] empties the queue the same frame, constructing one
//!    new ball per request via the factory.
//!
//! New bodies are never created from inside the contact handler itself: the
//! queue defers the mutation until after the physics step has fully returned,
//! and Bevy `Commands` defer the actual world writes to the next sync point.
//! The queue therefore starts and ends every frame empty.

use crate::ball::{self, Ball, BoundaryEdge, ContactLockout};
use crate::config::SimConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Pending spawn positions (meters), produced by contacts and fully drained
/// once per frame.
#[derive(Resource, Debug, Default)]
pub struct SpawnQueue(pub Vec<Vec2>);

/// Monotone count of balls alive in the arena.  Never decreases: balls are
/// spawned continuously and never despawned.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveBallCount(pub usize);

/// Registers the spawn pipeline: queue + counter resources and the
/// contact-handler → drain system chain.
pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnQueue>()
            .init_resource::<LiveBallCount>()
            .add_systems(
                Update,
                (boundary_contact_system, drain_spawn_queue).chain(),
            );
    }
}

/// The probability gate: a uniform roll in `[0, 100)` passes when it lands
/// below `chance_percent`.
pub fn spawn_roll_passes(rng: &mut impl Rng, chance_percent: u8) -> bool {
    rng.gen_range(0..100u8) < chance_percent
}

/// Consumes Rapier collision events and turns qualifying ball↔arena contacts
/// into spawn requests.
///
/// On contact start, a ball whose lockout is still open rolls the probability
/// gate; a passing roll enqueues one origin spawn and closes the lockout so
/// the same sustained contact cannot trigger again.  On contact end the
/// lockout re-opens unconditionally — whether or not a spawn happened.
/// Ball↔ball contacts never qualify.
pub fn boundary_contact_system(
    mut collision_events: MessageReader<CollisionEvent>,
    q_arena: Query<(), With<BoundaryEdge>>,
    mut q_balls: Query<&mut ContactLockout, With<Ball>>,
    mut queue: ResMut<SpawnQueue>,
    config: Res<SimConfig>,
) {
    let mut rng = rand::thread_rng();
    for event in collision_events.read() {
        match event {
            CollisionEvent::Started(e1, e2, _) => {
                let Some(ball_entity) = ball_of_pair(*e1, *e2, &q_arena, &q_balls) else {
                    continue;
                };
                let Ok(mut lockout) = q_balls.get_mut(ball_entity) else {
                    continue;
                };
                if lockout.0 {
                    continue;
                }
                if !spawn_roll_passes(&mut rng, config.spawn_chance_percent) {
                    continue;
                }
                queue.0.push(Vec2::ZERO);
                lockout.0 = true;
            }
            CollisionEvent::Stopped(e1, e2, _) => {
                let Some(ball_entity) = ball_of_pair(*e1, *e2, &q_arena, &q_balls) else {
                    continue;
                };
                if let Ok(mut lockout) = q_balls.get_mut(ball_entity) {
                    lockout.0 = false;
                }
            }
        }
    }
}

/// Resolves a collision pair down to its ball entity, but only when exactly
/// one side is the arena boundary and the other is a ball.
fn ball_of_pair(
    e1: Entity,
    e2: Entity,
    q_arena: &Query<(), With<BoundaryEdge>>,
    q_balls: &Query<&mut ContactLockout, With<Ball>>,
) -> Option<Entity> {
    if q_arena.contains(e1) && q_balls.contains(e2) {
        Some(e2)
    } else if q_arena.contains(e2) && q_balls.contains(e1) {
        Some(e1)
    } else {
        None
    }
}

/// Empties the [`SpawnQueue`], constructing one ball per pending request and
/// bumping [`LiveBallCount`].  Runs chained after [`boundary_contact_system`]
/// so requests are never carried across frames.
pub fn drain_spawn_queue(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut queue: ResMut<SpawnQueue>,
    mut count: ResMut<LiveBallCount>,
    config: Res<SimConfig>,
) {
    for position in queue.0.drain(..) {
        ball::spawn_ball(&mut commands, &mut meshes, &mut materials, position, &config);
        count.0 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_chance_never_passes() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert!(!spawn_roll_passes(&mut rng, 0));
        }
    }

    #[test]
    fn full_chance_always_passes() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1_000 {
            assert!(spawn_roll_passes(&mut rng, 100));
        }
    }

    #[test]
    fn default_chance_passes_near_one_in_five() {
        let mut rng = StdRng::seed_from_u64(3);
        let trials = 20_000;
        let passes = (0..trials)
            .filter(|_| spawn_roll_passes(&mut rng, 20))
            .count();
        let rate = passes as f64 / trials as f64;
        assert!(
            (0.17..0.23).contains(&rate),
            "pass rate {rate:.3} strayed too far from 0.20"
        );
    }
}
