use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "curriculum_dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Deployment settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Curriculum CSV read once at start-up.
    pub data_file: PathBuf,
    /// File name proposed by the export dialog.
    pub export_file_name: String,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("academic_curriculum.csv"),
            export_file_name: "curriculum.csv".to_string(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Read a config file. A missing file yields `Ok(None)`.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    /// Load from `path`, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(Some(config)) => {
                log::info!("Using configuration from {}", path.display());
                config
            }
            Ok(None) => {
                log::debug!("No {} found, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }
}
