//! Variable timestep simulation step
//!
//! Advances the spark and pipes by one frame. Ordering matters:
//! physics, pipe scroll, scoring, recycling, then collision against the
//! post-update positions.

use super::collision::collides;
use super::state::GameState;
use crate::consts::*;

/// What happened during a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// Pipes crossed this step (0 almost always, 1 on a pass)
    pub scored: u32,
    /// The spark hit a pipe, the ceiling or the ground
    pub collided: bool,
}

impl StepEvents {
    pub fn is_empty(&self) -> bool {
        self.scored == 0 && !self.collided
    }
}

/// Advance the game state by `dt` seconds
///
/// Non-positive or non-finite `dt` leaves the state untouched. On collision the
/// final positions are kept so the moment of impact can be drawn.
pub fn step(state: &mut GameState, dt: f32) -> StepEvents {
    let mut events = StepEvents::default();
    if !dt.is_finite() || dt <= 0.0 {
        return events;
    }

    // --- SPARK PHYSICS ---
    state.spark.integrate(dt);
    debug_assert!(state.spark.vel_y <= MAX_FALL_SPEED);

    // --- PIPE SCROLL ---
    let shift = PIPE_SPEED * dt;
    for pipe in &mut state.pipes {
        pipe.x -= shift;
    }

    // --- SCORING ---
    let spark_x = state.spark_x;
    for pipe in state.pipes.iter_mut().filter(|p| !p.passed && p.x < spark_x) {
        pipe.passed = true;
        events.scored += 1;
    }
    if events.scored > 0 {
        let previous = state.score;
        state.score += events.scored;
        debug_assert!(state.score > previous);
        log::debug!("Score: {}", state.score);
    }

    recycle_pipes(state);

    // --- COLLISION ---
    events.collided = collides(state.spark_center(), &state.pipes, &state.viewport);

    events
}

/// Drop pipes that scrolled off the left edge, then top the set back up
///
/// Pruning happens before appending, so exactly `PIPE_COUNT` pipes are live
/// afterwards.
fn recycle_pipes(state: &mut GameState) {
    let before = state.pipes.len();
    state.pipes.retain(|p| !p.is_offscreen());
    let dropped = before - state.pipes.len();

    let mut spawned = 0;
    while state.pipes.len() < PIPE_COUNT {
        state.spawn_pipe();
        spawned += 1;
    }

    if dropped > 0 || spawned > 0 {
        log::debug!("Recycled pipes: dropped {}, spawned {}", dropped, spawned);
    }
    debug_assert_eq!(state.pipes.len(), PIPE_COUNT);
}
