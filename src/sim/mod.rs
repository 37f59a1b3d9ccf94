//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Variable timestep, clamped by the controller
//! - No rendering or platform dependencies beyond the `FrameClock` seam

pub mod autopilot;
pub mod collision;
pub mod controller;
pub mod state;
pub mod tick;

pub use autopilot::{autopilot_should_tap, target_height};
pub use collision::{Aabb, collides, pipe_collides};
pub use controller::{GameController, GameEvent};
pub use state::{GamePhase, GameState, Pipe, PipeView, Snapshot, Spark, Viewport};
pub use tick::{StepEvents, step};
