//! # Configuration
//!
//! sfmd configuration is loaded with [`confique`] from layered TOML files and
//! environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Explicit file**: `--config <file>` on the command line.
//! 2. **Environment variables**: `SFMD_API_VERSION`, `SFMD_LOG_LEVEL`.
//! 3. **Project Config**: `./sfmd.toml` in the working directory.
//! 4. **Global Config**: `sfmd.toml` in the OS config directory (via `directories`).
//! 5. **Compiled Defaults**: `#[config(default = ...)]` below.
//!
//! Missing files are skipped.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_version` | `51.0` | Version written by `package new` |
//! | `log_level` | `warn` | Log filter when `RUST_LOG` is unset |
//! | `tidy_after_edit` | `false` | Tidy every edited document before writing |

use crate::error::{MdError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sfmd.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SfmdConfig {
    /// API version for new package manifests.
    #[config(default = "51.0", env = "SFMD_API_VERSION")]
    pub api_version: String,

    /// Default log filter, e.g. "warn" or "sfmdapp=debug".
    #[config(default = "warn", env = "SFMD_LOG_LEVEL")]
    pub log_level: String,

    #[config(default = false)]
    pub tidy_after_edit: bool,
}

impl Default for SfmdConfig {
    fn default() -> Self {
        Self {
            api_version: "51.0".to_string(),
            log_level: "warn".to_string(),
            tidy_after_edit: false,
        }
    }
}

/// Location of the global config file, if the platform has a config dir.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sfmd").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl SfmdConfig {
    /// Loads the layered configuration. `explicit` is the `--config` file;
    /// unlike the other layers it must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = SfmdConfig::builder();
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(MdError::Config(format!("{} does not exist", path.display())));
            }
            builder = builder.file(path);
        }
        builder = builder.env().file(CONFIG_FILE);
        if let Some(global) = global_config_path() {
            builder = builder.file(global);
        }
        builder.load().map_err(|e| MdError::Config(e.to_string()))
    }
}
