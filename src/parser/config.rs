use crate::error::{Result, SchedulerError};
use crate::types::SchedulerConfig;
use std::fs;
use std::path::Path;

/// Load and validate `app.config`. A missing or mistyped required key is
/// fatal; there is no runtime default for search rates, caps, or
/// population size.
pub fn load_config(path: &Path) -> Result<SchedulerConfig> {
    if !path.exists() {
        return Err(SchedulerError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| {
        SchedulerError::ConfigMissing {
            key: e.to_string(),
        }
        .into()
    })
}
