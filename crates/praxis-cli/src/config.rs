//! CLI configuration.
//!
//! Resolved in precedence order: built-in defaults, then an optional YAML
//! config file, then environment variables, then command-line flags. Each
//! layer only overrides the settings it actually names.
//!
//! ```yaml
//! # praxis.yaml
//! snapshot: exports/praxis.json   # relative to this file
//! format: json
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Environment variable naming the snapshot file.
pub const ENV_SNAPSHOT: &str = "PRAXIS_SNAPSHOT";
/// Environment variable selecting the output format.
pub const ENV_OUTPUT: &str = "PRAXIS_OUTPUT";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(other.to_string()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {var}: \"{value}\" (expected text or json)")]
    InvalidFormat { var: String, value: String },
    #[error("no snapshot given: pass --snapshot, set PRAXIS_SNAPSHOT, or name one in the config file")]
    MissingSnapshot,
}

/// Settings as they appear in the YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    snapshot: Option<PathBuf>,
    format: Option<OutputFormat>,
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    /// `--snapshot`
    pub snapshot: Option<PathBuf>,
    /// `--format`
    pub format: Option<OutputFormat>,
}

/// Fully resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliConfig {
    /// Snapshot file to evaluate.
    pub snapshot: Option<PathBuf>,
    /// Report format.
    pub format: OutputFormat,
}

impl CliConfig {
    /// Resolve the configuration from all layers, reading the process
    /// environment.
    pub fn resolve(config_file: Option<&Path>, flags: FlagOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(config_file, |var| std::env::var(var).ok(), flags)
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with<E>(
        config_file: Option<&Path>,
        env: E,
        flags: FlagOverrides,
    ) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = config_file {
            config.merge_file(path)?;
        }
        config.merge_env(env)?;
        config.apply_flags(flags);
        tracing::debug!(?config, "resolved CLI configuration");
        Ok(config)
    }

    /// The snapshot path, or an error if no layer named one.
    pub fn snapshot_path(&self) -> Result<&Path, ConfigError> {
        self.snapshot.as_deref().ok_or(ConfigError::MissingSnapshot)
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = if raw.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };

        if let Some(snapshot) = file.snapshot {
            // Relative snapshot paths are relative to the config file.
            self.snapshot = Some(match path.parent() {
                Some(dir) if snapshot.is_relative() => dir.join(snapshot),
                _ => snapshot,
            });
        }
        if let Some(format) = file.format {
            self.format = format;
        }
        Ok(())
    }

    fn merge_env<E>(&mut self, env: E) -> Result<(), ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(snapshot) = env(ENV_SNAPSHOT).filter(|s| !s.trim().is_empty()) {
            self.snapshot = Some(PathBuf::from(snapshot));
        }
        if let Some(value) = env(ENV_OUTPUT).filter(|s| !s.trim().is_empty()) {
            self.format = value.parse().map_err(|_| ConfigError::InvalidFormat {
                var: ENV_OUTPUT.to_string(),
                value,
            })?;
        }
        Ok(())
    }

    fn apply_flags(&mut self, flags: FlagOverrides) {
        if let Some(snapshot) = flags.snapshot {
            self.snapshot = Some(snapshot);
        }
        if let Some(format) = flags.format {
            self.format = format;
        }
    }
}
