//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timewarrior executable to invoke.
    pub timew_bin: PathBuf,
    /// Deadline for each timew invocation, in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timew_bin: PathBuf::from("timew"),
            timeout_secs: 5,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Precedence, lowest to highest: built-in defaults, the config
    /// directory's `twd/config.toml`, the explicit file, `TWD_*` environment
    /// variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TWD_"));

        figment.extract()
    }

    /// Per-invocation deadline as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Returns the platform-specific config directory for twd.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("twd"))
}
