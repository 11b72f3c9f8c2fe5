//! Error types
//!
//! Bootstrap failures (`GolfError`) are fatal and end the process with a
//! non-zero exit code. Anything that can go wrong once the loop is running
//! is logged and skipped instead.

use thiserror::Error;

use crate::assets::AssetKind;
use crate::sim::LayoutError;

#[derive(Error, Debug)]
pub enum GolfError {
    /// Settings file exists but could not be read
    #[error("failed to read settings from {path}: {source}")]
    SettingsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings or manifest JSON is malformed
    #[error("failed to parse {what} from {path}: {source}")]
    Parse {
        what: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest file could not be read
    #[error("failed to read asset manifest {path}: {source}")]
    ManifestIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A required asset failed to load
    #[error("failed to load {kind} '{name}' from {path}: {reason}")]
    Asset {
        kind: AssetKind,
        name: String,
        path: String,
        reason: String,
    },

    /// Course layout could not be generated
    #[error("layout generation failed: {0}")]
    Layout(#[from] LayoutError),
}

impl GolfError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}
