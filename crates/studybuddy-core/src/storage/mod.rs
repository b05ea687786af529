mod config;
pub mod database;
pub mod migrations;

pub use config::{AdvisorConfig, AssistantConfig, Config, StorageConfig};
pub use database::{RecordCounts, StudyDb};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml` and the database.
///
/// Resolution order:
/// 1. `STUDYBUDDY_DATA_DIR`, used verbatim
/// 2. `~/.config/studybuddy-dev` when `STUDYBUDDY_ENV=dev`
/// 3. `~/.config/studybuddy`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYBUDDY_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYBUDDY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studybuddy-dev")
            } else {
                base_dir.join("studybuddy")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
