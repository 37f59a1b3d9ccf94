//! Runtime settings
//!
//! Viewport geometry and demo parameters, loadable from JSON. Physics
//! constants are fixed in `consts` and are not configurable here.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Viewport;

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidViewport { width: f32, height: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read settings: {}", e),
            Self::Parse(e) => write!(f, "malformed settings: {}", e),
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport must be positive, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::InvalidViewport { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen geometry used until the host reports a resize
    pub viewport: Viewport,
    /// Fixed RNG seed (random per launch when absent)
    pub seed: Option<u64>,

    // === Headless demo ===
    /// Runs the autopilot plays before exiting
    pub demo_runs: u32,
    /// Frame cap per run
    pub demo_frames: u32,
    /// Simulated display refresh rate
    pub demo_fps: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: None,
            demo_runs: 5,
            demo_frames: 60 * 120,
            demo_fps: 60.0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Milliseconds between simulated frames in the demo
    pub fn demo_frame_ms(&self) -> f64 {
        1000.0 / self.demo_fps.max(1.0) as f64
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let Viewport {
            screen_width: width,
            screen_height: height,
            ..
        } = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(SettingsError::InvalidViewport { width, height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 17, "demo_runs": 2 }"#).unwrap();
        assert_eq!(settings.seed, Some(17));
        assert_eq!(settings.demo_runs, 2);
        assert_eq!(settings.viewport, Viewport::default());
        assert_eq!(settings.demo_fps, 60.0);
    }

    #[test]
    fn test_viewport_insets_optional() {
        let settings = Settings::from_json(
            r#"{ "viewport": { "screen_width": 390, "screen_height": 844, "top_inset": 47 } }"#,
        )
        .unwrap();
        assert_eq!(settings.viewport.top_inset, 47.0);
        assert_eq!(settings.viewport.bottom_inset, 0.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "viewport": { "screen_width": 0, "screen_height": 10 } }"#),
            Err(SettingsError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(
            Settings::load_from_path(path),
            Err(SettingsError::Io(_))
        ));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }
}
