//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STAMP_<SECTION>__<KEY>`, e.g.
//!    `STAMP_HOOKS__DEFAULT_LICENSE=Apache-2.0`
//! 3. Config file (`--config`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use stamp_core::domain::PathRegistry;

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "STAMP";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where templates live.
    pub templates: TemplatesConfig,
    /// Hook defaults.
    pub hooks: HooksConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Explicit templates root; skips discovery when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Common directory used by `stamp inherit` without `--from`.
    pub common_dir: String,
    /// Directory holding license bodies.
    pub licenses_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// License used by `stamp license` without a name.
    pub default_license: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: None,
            common_dir: PathRegistry::DEFAULT_COMMON_DIR.into(),
            licenses_dir: PathRegistry::DEFAULT_LICENSES_DIR.into(),
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            default_license: "MIT".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the platform default path is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stamp.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stamp", "stamp")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stamp.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_license_is_mit() {
        assert_eq!(AppConfig::default().hooks.default_license, "MIT");
    }

    #[test]
    fn default_sub_directories_match_registry() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.templates.common_dir, "common");
        assert_eq!(cfg.templates.licenses_dir, "licenses");
        assert!(cfg.templates.root.is_none());
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.templates, TemplatesConfig::default());
        assert_eq!(cfg.hooks, HooksConfig::default());
    }

    #[test]
    fn missing_required_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&temp.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn file_values_override_defaults_per_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[templates]\nroot = \"/srv/templates\"\n\n[hooks]\ndefault_license = \"BSD-3-Clause\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();
        assert_eq!(cfg.templates.root, Some(PathBuf::from("/srv/templates")));
        assert_eq!(cfg.templates.common_dir, "common");
        assert_eq!(cfg.hooks.default_license, "BSD-3-Clause");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
