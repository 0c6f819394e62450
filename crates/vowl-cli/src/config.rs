//! TOML configuration discovery and loading.
//!
//! An explicit `--config` path always wins and must exist. Without one the
//! loader probes a `vowl/config.toml` next to the working directory, then
//! the platform config directory, and finally falls back to defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use vowl::{AppConfig, VowlError};

/// Problems with a configuration file that was actually requested or found.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for VowlError {
    fn from(err: ConfigError) -> Self {
        VowlError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Resolves the effective [`AppConfig`] for this invocation.
///
/// A missing explicit path is an error; a missing probed location just
/// moves the search on, ending at the built-in defaults.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, VowlError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("vowl/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "vowl", "vowl") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, VowlError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config =
        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    Ok(config)
}
