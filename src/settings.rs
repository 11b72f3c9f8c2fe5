//! Game settings
//!
//! Read once at startup from a JSON file, never written back. Physics
//! constants are deliberately absent: only presentation and session knobs
//! are configurable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_DELAY_MS;
use crate::error::GolfError;

/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV: &str = "GOLF_PIXEL_SETTINGS";
/// Settings file looked up in the working directory otherwise
pub const SETTINGS_FILE: &str = "golf_pixel.json";

/// Self-playing session limits for the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    /// Close the window after this many completed rounds
    pub rounds: u32,
    /// Hard cap on frames, in case the autopilot keeps missing
    pub max_frames: u64,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            rounds: 3,
            max_frames: 20_000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Layout RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all effects
    pub muted: bool,

    // === Loop ===
    /// Sleep between frames (ms)
    pub frame_delay_ms: u64,

    // === Assets ===
    /// Optional manifest JSON replacing the built-in asset list
    pub asset_manifest: Option<String>,
    /// Directory prepended to every asset path
    pub asset_root: Option<String>,

    pub autoplay: AutoplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            frame_delay_ms: FRAME_DELAY_MS,
            asset_manifest: None,
            asset_root: None,
            autoplay: AutoplaySettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Where settings are read from: `$GOLF_PIXEL_SETTINGS`, else `./golf_pixel.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Load from the default location
    pub fn load() -> Result<Self, GolfError> {
        Self::load_from(Self::default_path())
    }

    /// Load from `path`. A missing file yields defaults; an unreadable or
    /// malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, GolfError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| GolfError::SettingsIo {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| GolfError::Parse {
            what: "settings",
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Clamp values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}
