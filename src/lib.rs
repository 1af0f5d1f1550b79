//! Bouncesim — a ball-multiplication physics toy.
//!
//! Balls bounce inside a static circular arena; each ball↔arena contact has a
//! configurable chance of spawning one more ball with a random color and a
//! launch velocity drawn from discrete candidate sets.  Rigid-body dynamics
//! are delegated to Rapier via `bevy_rapier2d`.

pub mod ball;
pub mod config;
pub mod constants;
pub mod rendering;
pub mod spawning;
