//! JSON file persistence
//!
//! One settings blob lives in the platform config directory. Path-based
//! variants exist for tests and custom locations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::app::NAME;
use crate::error::{AppError, Result};

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(NAME))
        .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))
}

/// Path to a data file in the config directory
pub fn data_path(filename: &str) -> Result<PathBuf> {
    Ok(config_dir()?.join(filename))
}

/// Load data from a JSON file at a specific path.
///
/// Returns `None` if the file doesn't exist or is empty; an error if it
/// exists but can't be read or parsed.
pub fn load_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::Config(format!("Failed to read {:?}: {}", path, e)));
        }
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    let data = serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse {:?}: {}", path, e)))?;
    Ok(Some(data))
}

/// Save data as JSON at a specific path, creating parent directories
pub fn save_to<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
    }
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Config(format!("Failed to serialize data: {}", e)))?;
    fs::write(path, content)
        .map_err(|e| AppError::Config(format!("Failed to write {:?}: {}", path, e)))
}

/// Load a data file from the config directory
pub fn load<T: DeserializeOwned>(filename: &str) -> Result<Option<T>> {
    load_from(&data_path(filename)?)
}

/// Save a data file to the config directory
pub fn save<T: Serialize>(filename: &str, data: &T) -> Result<()> {
    save_to(&data_path(filename)?, data)
}
