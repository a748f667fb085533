//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML file (`--config FILE`, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed with `DUPE_REMOVER_`
//! 4. Command-line flags ([`Config::merge_cli`])

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Prefix of environment variables read into [`Config`].
pub const ENV_PREFIX: &str = "DUPE_REMOVER_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ask which duplicates to delete for every group.
    pub delete_duplicates: bool,
    /// Directory to inspect.
    pub dir_path: PathBuf,
    /// Follow symbolic links during the scan.
    pub follow_symlinks: bool,
    /// Seconds to wait before exiting when the scan fails.
    pub exit_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delete_duplicates: false,
            dir_path: default_root(),
            follow_symlinks: false,
            exit_delay_secs: 3,
        }
    }
}

/// Root of the filesystem the scan starts from when no path is given.
#[must_use]
pub fn default_root() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}

impl Config {
    /// Load the configuration from defaults, a TOML file and the environment.
    ///
    /// `path` selects the TOML file; without it the platform default is used
    /// when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file does not exist, or if the
    /// file or environment contain invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Config file not found: {}", p.display());
                }
                Some(p.to_path_buf())
            }
            None => Self::default_path(),
        };

        if let Some(f) = &file {
            log::debug!("Loading config from {}", f.display());
        }

        Self::figment(file.as_deref())
            .extract()
            .context("Invalid configuration")
    }

    /// Build the layered provider chain without the CLI layer.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply command-line flags on top of this configuration.
    #[must_use]
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.dir_path {
            self.dir_path = dir.clone();
        }
        if let Some(delete) = cli.delete_override() {
            self.delete_duplicates = delete;
        }
        if let Some(follow) = cli.follow_symlinks_override() {
            self.follow_symlinks = follow;
        }
        self
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupe-remover", "dupe-remover")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
