//! JSON configuration for the full pipeline.

use crate::moves::TrackerParams;
use crate::vision::VisionParams;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Everything tunable in one place. Missing fields take their defaults, so a
/// config file only needs the values it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSightConfig {
    pub vision: VisionParams,
    pub tracker: TrackerParams,
}

impl BoardSightConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: BoardSightConfig =
            serde_json::from_str(r#"{ "tracker": { "stable_frames": 2 } }"#).expect("json");
        assert_eq!(cfg.tracker.stable_frames, 2);
        assert_eq!(cfg.tracker.retry_frames, 15);
        assert_eq!(cfg.vision, VisionParams::default());
    }

    #[test]
    fn write_then_load_preserves_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("boardsight.json");

        let mut cfg = BoardSightConfig::default();
        cfg.vision.classifier.binary_threshold = 100;
        cfg.vision.locator.canonical.width = 800;
        cfg.tracker.retry_frames = 30;
        cfg.write_json(&path).expect("write");

        assert_eq!(BoardSightConfig::load_json(&path).expect("load"), cfg);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BoardSightConfig::load_json("/nonexistent/boardsight.json").expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
