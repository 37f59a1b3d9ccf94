//! Flappy Spark - A tap-to-fly arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, scoring, collisions, phases)
//! - `platform`: Frame clock abstraction (animation frames on web, manual on native)
//! - `scores`: Session scoreboard (best score, top runs)
//! - `settings`: Viewport and demo configuration

pub mod platform;
pub mod scores;
pub mod settings;
pub mod sim;

pub use scores::SessionScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied to the spark (pixels/s²)
    pub const GRAVITY: f32 = 800.0;
    /// Velocity set by a flap (negative = upward)
    pub const FLAP_VELOCITY: f32 = -350.0;
    /// Terminal fall speed; upward velocity is never clamped
    pub const MAX_FALL_SPEED: f32 = 500.0;

    /// Spark bounding box edge length
    pub const SPARK_SIZE: f32 = 30.0;
    /// Spark x-coordinate as a fraction of screen width
    pub const SPARK_X_FRACTION: f32 = 0.3;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_SPEED: f32 = 200.0;
    pub const PIPE_SPACING: f32 = 250.0;
    /// Number of live pipes after every step
    pub const PIPE_COUNT: usize = 3;

    /// Vertical size of the passable gap
    pub const GAP_SIZE: f32 = 180.0;
    /// Minimum distance between the gap and the top/bottom of the screen
    pub const GAP_MARGIN: f32 = 100.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Runs kept on the session scoreboard
    pub const SCOREBOARD_SIZE: usize = 10;
}

/// Returns true when the half-open ranges `(a_min, a_max)` and `(b_min, b_max)` overlap
#[inline]
pub fn ranges_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max > b_min && a_min < b_max
}

/// Box of the given size centered on `center`
#[inline]
pub fn centered_extents(center: Vec2, size: Vec2) -> (Vec2, Vec2) {
    let half = size * 0.5;
    (center - half, center + half)
}
