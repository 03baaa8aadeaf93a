//! Configuration file loading
//!
//! Config lives at `<config_dir>/stack-status/config.toml`:
//!
//! ```toml
//! [github]
//! repo = "owner/name"
//! host = "github.example.com"
//! token = "ghp_..."
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory
const CONFIG_DIR: &str = "stack-status";

/// Filename for the config file
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GitHub settings
    pub github: GitHubConfig,
}

/// GitHub settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitHubConfig {
    /// Default repository coordinate (`owner/name` or remote URL)
    pub repo: Option<String>,
    /// GitHub Enterprise host; None for github.com
    pub host: Option<String>,
    /// Personal access token, used when no other source provides one
    pub token: Option<String>,
}

/// Default path of the config file, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is used and a missing file yields an empty config.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}
