//! Demo autopilot
//!
//! A simple tap policy used by the headless demo: aim for the middle of the
//! gap the spark has to clear next.

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// How far below the gap center the spark may sink before flapping
const SINK_ALLOWANCE: f32 = 20.0;

/// Vertical target for the spark: the next uncleared gap's center,
/// or the middle of the screen when no pipe is ahead
pub fn target_height(state: &GameState) -> f32 {
    let viewport = state.viewport();
    let spark_left = state.spark_x() - SPARK_SIZE / 2.0;

    state
        .pipes()
        .iter()
        .filter(|p| p.right() >= spark_left)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|p| p.gap_top + GAP_SIZE / 2.0)
        .unwrap_or(viewport.screen_height / 2.0)
}

/// Should the demo player tap this frame?
pub fn autopilot_should_tap(state: &GameState) -> bool {
    match state.phase() {
        // Launch right away, restart right away
        GamePhase::Waiting | GamePhase::GameOver => true,
        GamePhase::Playing => {
            let spark = state.spark();
            // Don't waste a flap while still climbing hard
            let climbing = spark.vel_y < FLAP_VELOCITY / 2.0;
            !climbing && spark.y > target_height(state) + SINK_ALLOWANCE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Pipe, Viewport};

    fn playing_state() -> GameState {
        let mut state = GameState::new(Viewport::new(400.0, 800.0), 77);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_targets_nearest_uncleared_gap() {
        let mut state = playing_state();
        state.set_pipes(vec![
            Pipe::new(-40.0, 100.0), // already cleared
            Pipe::new(300.0, 200.0),
            Pipe::new(550.0, 400.0),
        ]);
        assert_eq!(target_height(&state), 200.0 + GAP_SIZE / 2.0);
    }

    #[test]
    fn test_taps_when_sinking_below_gap() {
        let mut state = playing_state();
        state.set_pipes(vec![Pipe::new(300.0, 100.0)]);
        state.spark.y = 500.0;
        state.spark.vel_y = 100.0;
        assert!(autopilot_should_tap(&state));

        // Already climbing fast
        state.spark.vel_y = FLAP_VELOCITY;
        assert!(!autopilot_should_tap(&state));
    }

    #[test]
    fn test_holds_when_above_gap() {
        let mut state = playing_state();
        state.set_pipes(vec![Pipe::new(300.0, 500.0)]);
        state.spark.y = 300.0;
        state.spark.vel_y = 200.0;
        assert!(!autopilot_should_tap(&state));
    }

    #[test]
    fn test_always_taps_outside_play() {
        let mut state = playing_state();
        state.phase = GamePhase::Waiting;
        assert!(autopilot_should_tap(&state));
        state.phase = GamePhase::GameOver;
        assert!(autopilot_should_tap(&state));
    }
}
