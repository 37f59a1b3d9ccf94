//! Game state and core simulation types
//!
//! `GameState` is the single authoritative model. Rendering reads it through
//! accessors or a `Snapshot`; only the step function and the controller mutate it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::scores::SessionScores;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Spark and pipes laid out but frozen, waiting for the first tap
    Waiting,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a tap to reset
    GameOver,
}

/// Screen geometry supplied by the host (at init and on resize)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Unusable band at the top (notch, status bar)
    #[serde(default)]
    pub top_inset: f32,
    /// Unusable band at the bottom (home indicator)
    #[serde(default)]
    pub bottom_inset: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            screen_width: 400.0,
            screen_height: 800.0,
            top_inset: 0.0,
            bottom_inset: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    pub fn with_insets(mut self, top_inset: f32, bottom_inset: f32) -> Self {
        self.top_inset = top_inset;
        self.bottom_inset = bottom_inset;
        self
    }

    /// Horizontal position a spark laid out on this screen gets
    #[inline]
    pub fn spark_x(&self) -> f32 {
        self.screen_width * SPARK_X_FRACTION
    }

    /// Highest allowed spark center (smaller y is a ceiling hit)
    #[inline]
    pub fn ceiling(&self) -> f32 {
        self.top_inset + SPARK_SIZE / 2.0
    }

    /// Lowest allowed spark center (larger y is a ground hit)
    #[inline]
    pub fn floor(&self) -> f32 {
        self.screen_height - self.bottom_inset - SPARK_SIZE / 2.0
    }

    /// Range the top of a gap is drawn from: `[GAP_MARGIN, height - GAP_SIZE - GAP_MARGIN]`
    ///
    /// Collapses to `GAP_MARGIN` on screens too short to fit the margins.
    pub fn gap_top_range(&self) -> (f32, f32) {
        let max = (self.screen_height - GAP_SIZE - GAP_MARGIN).max(GAP_MARGIN);
        (GAP_MARGIN, max)
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    /// Vertical center, measured from the top of the viewport
    pub y: f32,
    /// Vertical velocity (positive = downward)
    pub vel_y: f32,
}

impl Spark {
    /// Spark resting at the vertical center of the screen
    pub fn centered(viewport: &Viewport) -> Self {
        Self {
            y: viewport.screen_height / 2.0,
            vel_y: 0.0,
        }
    }

    /// Apply the flap impulse (overwrites, never accumulates)
    #[inline]
    pub fn flap(&mut self) {
        self.vel_y = FLAP_VELOCITY;
    }

    /// Integrate gravity then position over `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.vel_y = (self.vel_y + GRAVITY * dt).min(MAX_FALL_SPEED);
        self.y += self.vel_y * dt;
    }
}

/// A gated obstacle scrolling from right to left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Horizontal center
    pub x: f32,
    /// Top edge of the passable gap
    pub gap_top: f32,
    /// Whether the spark has crossed this pipe (scored once)
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + GAP_SIZE
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - PIPE_WIDTH / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH / 2.0
    }

    /// Fully scrolled past the left edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x <= -PIPE_WIDTH
    }
}

/// Read-only view of a pipe for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeView {
    pub x: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub spark_x: f32,
    pub spark_y: f32,
    pub spark_velocity: f32,
    pub pipes: Vec<PipeView>,
    pub score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    seed: u64,
    /// Gap placement RNG
    rng: Pcg32,
    pub(crate) viewport: Viewport,
    /// Spark's horizontal position, fixed for the run at layout time
    pub(crate) spark_x: f32,
    pub(crate) spark: Spark,
    /// Live pipes in creation order (oldest first)
    pub(crate) pipes: Vec<Pipe>,
    pub(crate) score: u32,
    pub(crate) phase: GamePhase,
    /// Best score and finished runs of this process
    pub(crate) scores: SessionScores,
}

impl GameState {
    /// Create a new game state in `Waiting` with the given seed
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            spark_x: viewport.spark_x(),
            spark: Spark::centered(&viewport),
            pipes: Vec::with_capacity(PIPE_COUNT + 1),
            score: 0,
            phase: GamePhase::Waiting,
            scores: SessionScores::new(),
        };
        state.reset();
        state
    }

    /// Re-center the spark, lay out fresh pipes and zero the score
    ///
    /// Phase and best score are left untouched.
    pub(crate) fn reset(&mut self) {
        self.spark_x = self.viewport.spark_x();
        self.spark = Spark::centered(&self.viewport);
        self.pipes.clear();
        for i in 0..PIPE_COUNT {
            let x = self.viewport.screen_width + i as f32 * PIPE_SPACING;
            let gap_top = self.random_gap_top();
            self.pipes.push(Pipe::new(x, gap_top));
        }
        self.score = 0;
        log::debug!(
            "State reset: spark y={:.1}, pipes at {:?}",
            self.spark.y,
            self.pipes.iter().map(|p| p.x).collect::<Vec<_>>()
        );
    }

    /// Draw a gap top uniformly within the viewport's allowed range
    pub(crate) fn random_gap_top(&mut self) -> f32 {
        let (min, max) = self.viewport.gap_top_range();
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Append one pipe `PIPE_SPACING` right of the rightmost live pipe,
    /// or at the right screen edge when none are left
    pub(crate) fn spawn_pipe(&mut self) {
        let x = self
            .pipes
            .iter()
            .map(|p| p.x)
            .reduce(f32::max)
            .map(|rightmost| rightmost + PIPE_SPACING)
            .unwrap_or(self.viewport.screen_width);
        let gap_top = self.random_gap_top();
        self.pipes.push(Pipe::new(x, gap_top));
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn spark(&self) -> &Spark {
        &self.spark
    }

    pub fn spark_x(&self) -> f32 {
        self.spark_x
    }

    /// Center of the spark in screen coordinates
    pub fn spark_center(&self) -> Vec2 {
        Vec2::new(self.spark_x, self.spark.y)
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn scores(&self) -> &SessionScores {
        &self.scores
    }

    /// Copy out the renderer-facing view of this frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            spark_x: self.spark_x,
            spark_y: self.spark.y,
            spark_velocity: self.spark.vel_y,
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    gap_top: p.gap_top,
                    gap_bottom: p.gap_bottom(),
                })
                .collect(),
            score: self.score,
            best_score: self.best_score(),
            phase: self.phase,
        }
    }

    /// Replace the live pipes with a hand-placed set
    #[cfg(test)]
    pub(crate) fn set_pipes(&mut self, pipes: Vec<Pipe>) {
        self.pipes = pipes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_waiting_with_three_pipes() {
        let viewport = Viewport::new(400.0, 800.0);
        let state = GameState::new(viewport, 42);
        assert_eq!(state.phase(), GamePhase::Waiting);
        assert_eq!(state.pipes().len(), PIPE_COUNT);
        assert_eq!(state.score(), 0);
        assert_eq!(state.spark().y, 400.0);
        assert_eq!(state.spark().vel_y, 0.0);

        for (i, pipe) in state.pipes().iter().enumerate() {
            assert_eq!(pipe.x, 400.0 + i as f32 * PIPE_SPACING);
            assert!(!pipe.passed);
        }
    }

    #[test]
    fn test_gap_fits_on_screen() {
        let viewport = Viewport::new(400.0, 800.0);
        let mut state = GameState::new(viewport, 7);
        for _ in 0..500 {
            let top = state.random_gap_top();
            assert!(top >= GAP_MARGIN);
            assert!(top + GAP_SIZE <= viewport.screen_height - GAP_MARGIN);
        }
    }

    #[test]
    fn test_gap_on_tiny_screen_collapses_to_margin() {
        let mut state = GameState::new(Viewport::new(200.0, 250.0), 1);
        assert_eq!(state.random_gap_top(), GAP_MARGIN);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(Viewport::default(), 1234);
        let b = GameState::new(Viewport::default(), 1234);
        assert_eq!(a.pipes(), b.pipes());
    }

    #[test]
    fn test_reset_keeps_phase_and_best() {
        let mut state = GameState::new(Viewport::default(), 5);
        state.phase = GamePhase::GameOver;
        state.scores.record(12, 3.0);
        state.score = 12;
        state.spark.y = 10.0;
        state.spark.vel_y = 300.0;

        state.reset();

        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.best_score(), 12);
        assert_eq!(state.score(), 0);
        assert_eq!(state.spark().y, Viewport::default().screen_height / 2.0);
        assert_eq!(state.spark().vel_y, 0.0);
        assert_eq!(state.pipes().len(), PIPE_COUNT);
    }

    #[test]
    fn test_spark_x_only_changes_on_reset() {
        let mut state = GameState::new(Viewport::new(400.0, 800.0), 5);
        assert_eq!(state.spark_x(), 120.0);

        state.viewport = Viewport::new(1000.0, 800.0);
        assert_eq!(state.spark_x(), 120.0);
        assert_eq!(state.snapshot().spark_x, 120.0);

        state.reset();
        assert_eq!(state.spark_x(), 300.0);
        assert_eq!(state.spark_center(), Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_spawn_pipe_follows_rightmost() {
        let mut state = GameState::new(Viewport::default(), 9);
        state.set_pipes(vec![Pipe::new(50.0, 200.0), Pipe::new(300.0, 200.0)]);
        state.spawn_pipe();
        assert_eq!(state.pipes().last().map(|p| p.x), Some(300.0 + PIPE_SPACING));

        state.set_pipes(Vec::new());
        state.spawn_pipe();
        assert_eq!(state.pipes()[0].x, Viewport::default().screen_width);
    }

    #[test]
    fn test_spark_velocity_clamped_only_downward() {
        let mut spark = Spark { y: 0.0, vel_y: 490.0 };
        spark.integrate(1.0);
        assert_eq!(spark.vel_y, MAX_FALL_SPEED);

        let mut spark = Spark { y: 0.0, vel_y: -2000.0 };
        spark.integrate(0.01);
        assert!(spark.vel_y < -1900.0);
    }

    #[test]
    fn test_snapshot_serializes_phase_in_camel_case() {
        let mut state = GameState::new(Viewport::default(), 3);
        state.phase = GamePhase::GameOver;
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"gameOver\""));
        assert!(json.contains("\"best_score\":0"));
    }
}
