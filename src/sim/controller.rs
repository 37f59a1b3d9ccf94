//! Game phase controller
//!
//! Owns the phase machine (waiting -> playing -> gameOver -> waiting) and the
//! frame clock. Input and frame ticks come in here; the step function is only
//! ever run while playing.

use super::state::{GamePhase, GameState, Snapshot, Viewport};
use super::tick::{StepEvents, step};
use crate::consts::*;
use crate::platform::{FrameClock, ManualClock};

/// Discrete feedback for passive collaborators (haptics, audio, HUD effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Flap impulse applied (including the launch tap)
    Flap,
    /// One or more pipes crossed; `total` is the run score after the step
    Scored { total: u32 },
    /// Run ended on a collision
    GameOver { score: u32, new_best: bool },
    /// Playfield laid out again after a game over
    Reset,
}

/// Drives phase transitions and owns the frame clock
#[derive(Debug)]
pub struct GameController<C: FrameClock = ManualClock> {
    state: GameState,
    clock: C,
    /// Timestamp (ms) of the previous frame tick, `None` until the first tick of a run
    last_tick: Option<f64>,
    /// Simulated seconds in the current run
    run_time: f32,
    events: Vec<GameEvent>,
}

impl GameController<ManualClock> {
    /// Controller with a manually pumped clock (native, tests)
    pub fn manual(viewport: Viewport, seed: u64) -> Self {
        Self::new(viewport, seed, ManualClock::new())
    }
}

impl<C: FrameClock> GameController<C> {
    pub fn new(viewport: Viewport, seed: u64, clock: C) -> Self {
        log::info!(
            "Game created: {}x{} viewport, seed {}",
            viewport.screen_width,
            viewport.screen_height,
            seed
        );
        Self {
            state: GameState::new(viewport, seed),
            clock,
            last_tick: None,
            run_time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Handle a tap: launch, flap, or reset depending on phase
    ///
    /// A launch through `tap` has no timestamp, so the next frame tick only
    /// records the baseline. Use [`tap_at`](Self::tap_at) when the input
    /// carries the frame clock's time.
    pub fn tap(&mut self) {
        self.handle_tap(None);
    }

    /// Handle a tap that happened at `now_ms` on the frame clock's timebase
    ///
    /// On launch the timestamp becomes the baseline, so the first frame tick
    /// of the run already advances the simulation.
    pub fn tap_at(&mut self, now_ms: f64) {
        self.handle_tap(Some(now_ms));
    }

    fn handle_tap(&mut self, now_ms: Option<f64>) {
        match self.state.phase {
            GamePhase::Waiting => {
                self.state.phase = GamePhase::Playing;
                self.state.spark.flap();
                self.last_tick = now_ms.filter(|t| t.is_finite());
                self.run_time = 0.0;
                self.clock.start();
                self.events.push(GameEvent::Flap);
                log::info!("Run started");
            }
            GamePhase::Playing => {
                self.state.spark.flap();
                self.events.push(GameEvent::Flap);
            }
            GamePhase::GameOver => {
                self.state.reset();
                self.state.phase = GamePhase::Waiting;
                self.events.push(GameEvent::Reset);
                log::info!("Reset, waiting for launch");
            }
        }
    }

    /// Advance the simulation to `now_ms` (milliseconds, monotonic)
    ///
    /// No-op outside `Playing`. Without a launch timestamp the first tick of a
    /// run only records the baseline.
    pub fn on_frame_tick(&mut self, now_ms: f64) -> StepEvents {
        if self.state.phase != GamePhase::Playing {
            return StepEvents::default();
        }

        let Some(last) = self.last_tick.replace(now_ms) else {
            return StepEvents::default();
        };

        let dt = ((now_ms - last) / 1000.0) as f32;
        let dt = if dt.is_finite() { dt.min(MAX_FRAME_DT) } else { 0.0 };

        let events = step(&mut self.state, dt);
        if dt > 0.0 {
            self.run_time += dt;
        }

        if events.scored > 0 {
            self.events.push(GameEvent::Scored {
                total: self.state.score,
            });
        }
        if events.collided {
            self.finish_run();
        }

        events
    }

    /// Apply new screen geometry
    ///
    /// While waiting the playfield is laid out again for the new size. A run in
    /// progress keeps its positions and the spark's x; only the vertical
    /// bounds and future gap draws follow the new geometry.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.state.viewport {
            return;
        }
        self.state.viewport = viewport;
        if self.state.phase == GamePhase::Waiting {
            self.state.reset();
        }
        log::info!(
            "Viewport resized to {}x{} (insets {}/{})",
            viewport.screen_width,
            viewport.screen_height,
            viewport.top_inset,
            viewport.bottom_inset
        );
    }

    /// Take all feedback events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish_run(&mut self) {
        self.state.phase = GamePhase::GameOver;
        self.clock.cancel();
        self.last_tick = None;

        let score = self.state.score;
        let previous_best = self.state.scores.best();
        let new_best = score > previous_best;
        self.state.scores.record(score, self.run_time);
        debug_assert!(self.state.scores.best() >= previous_best);

        self.events.push(GameEvent::GameOver { score, new_best });
        if new_best {
            log::info!("Game over! New best score: {}", score);
        } else {
            log::info!("Game over! Final score: {} (best {})", score, previous_best);
        }
    }
}

impl<C: FrameClock> Drop for GameController<C> {
    fn drop(&mut self) {
        if self.clock.is_running() {
            self.clock.cancel();
        }
    }
}
