use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PsaError, Result};
use crate::metadata::MetadataUpdate;

pub const DEFAULT_BUILD_COMMAND: &str =
    "python setup.py --command-packages=stdeb.command bdist_deb";

/// User-level configuration loaded from `~/.config/psa/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    /// Field values used by `init` when no override is given.
    #[serde(default)]
    pub defaults: MetadataUpdate,

    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct BuildConfig {
    /// Shell command that turns a project into `deb_dist/*.deb`.
    pub command: Option<String>,
}

impl UserConfig {
    pub fn build_command(&self) -> &str {
        self.build.command.as_deref().unwrap_or(DEFAULT_BUILD_COMMAND)
    }
}

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("psa").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| PsaError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| PsaError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(config))
}
