//! Layered configuration for shelf.
//!
//! Later layers win:
//!
//! 1. built-in defaults,
//! 2. `config.{toml,yaml,json}` in the user's config directory,
//! 3. an explicit config file (format picked from its extension),
//! 4. `SHELF_*` environment variables.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "SHELF_";

const DEFAULT_LIBRARY: &str = "local";
const DEFAULT_LOG: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library root: one folder per series. Relative paths are resolved
    /// against the working directory.
    pub library: PathBuf,
    /// Default log filter directive, overridden by `RUST_LOG`.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { library: PathBuf::from(DEFAULT_LIBRARY), log: DEFAULT_LOG.to_string() }
    }
}

impl Config {
    /// Load configuration from every layer, using the platform's config
    /// directory for the user-level files.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(user_config_dir().as_deref(), explicit)
    }

    /// Load configuration with an explicit user config directory (`None` to
    /// skip that layer).
    pub fn load_from(config_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let config: Config = Self::figment(config_dir, explicit)?.extract().or_raise(|| ErrorKind::Load)?;
        tracing::debug!(library = %config.library.display(), log = %config.log, "Loaded configuration");
        Ok(config)
    }

    /// Build the layered [`Figment`] without extracting it.
    pub fn figment(config_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = config_dir {
            // Missing files are skipped silently.
            figment = figment
                .merge(Toml::file(dir.join("config.toml")))
                .merge(Yaml::file(dir.join("config.yaml")))
                .merge(Json::file(dir.join("config.json")));
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => exn::bail!(ErrorKind::UnknownFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Absolute path of the library root.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLibrary`](ErrorKind::InvalidLibrary) if the path
    /// can't be made absolute or is not an existing directory.
    pub fn library_root(&self) -> Result<PathBuf> {
        let root = std::path::absolute(&self.library).or_raise(|| ErrorKind::InvalidLibrary(self.library.clone()))?;
        if !root.is_dir() {
            exn::bail!(ErrorKind::InvalidLibrary(root));
        }
        Ok(root)
    }
}

/// Platform config directory for shelf (e.g. `~/.config/shelf` on Linux).
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shelf").map(|dirs| dirs.config_dir().to_path_buf())
}
