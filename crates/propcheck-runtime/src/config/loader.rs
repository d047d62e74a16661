//! Checker configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: `propcheck.toml`
//! - `yaml-config`: `propcheck.yaml` / `propcheck.yml`
//!
//! With both enabled, both formats are searched and merged, TOML first.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Profile-specific config file (`propcheck.{profile}.toml`)
//! 3. Main config file (`propcheck.toml`)
//! 4. Environment variables (`PROPCHECK_*`)
//! 5. Programmatic overrides ([`ConfigLoader::set`])
//!
//! # Environment Variable Mapping
//!
//! `PROPCHECK_` prefix, `__` as the nesting separator:
//!
//! - `PROPCHECK_CHECK__POLICY=deny` → `check.policy = "deny"`
//! - `PROPCHECK_CHECK__LOCATIONS=[a.yml,b.properties]` → `check.locations`
//! - `PROPCHECK_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//!
//! # Example
//!
//! ```rust,ignore
//! use propcheck_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("ci")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::CheckerConfig;
use super::validation::validate_config;

const ENV_PREFIX: &str = "PROPCHECK_";
const PROFILE_VAR: &str = "PROPCHECK_PROFILE";

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    /// Development profile (default).
    #[default]
    Development,
    /// Production profile.
    Production,
    /// Custom profile name.
    Custom(String),
}

impl Profile {
    /// Returns the profile name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name, accepting `dev` and `prod` abbreviations.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads `PROPCHECK_PROFILE`, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var(PROFILE_VAR)
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checker configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    figment: Figment,
    profile: Profile,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a search path for configuration files.
    ///
    /// Once any search path is added, the default locations are no longer
    /// searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Overrides a single value by its dotted key, above every other source.
    ///
    /// ```rust,ignore
    /// let config = ConfigLoader::new()
    ///     .set("check.policy", "deny")
    ///     .set("check.locations", ["application.yml"])
    ///     .load()?;
    /// ```
    pub fn set<T: Serialize>(mut self, key: &str, value: T) -> Self {
        self.figment = self.figment.merge(Serialized::default(key, value));
        self
    }

    /// Loads, validates and returns the configuration.
    pub fn load(self) -> ConfigResult<CheckerConfig> {
        let profile = self.profile.clone();
        let figment = self.build_figment()?;

        let config: CheckerConfig = figment.extract()?;
        validate_config(&config)?;

        debug!(
            profile = %profile,
            locations = config.check.locations.len(),
            logging_level = %config.logging.level,
            "Checker configuration loaded"
        );

        Ok(config)
    }

    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(CheckerConfig::default()));

        if let Some(path) = self.config_file.take() {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            info!(path = %path.display(), "Loading checker configuration file");
            figment = Self::merge_config_file(figment, &path)?;
        } else {
            figment = self.load_config_files(figment);
        }

        if self.load_env {
            trace!("Loading environment variables with {ENV_PREFIX} prefix");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["profile"]).split("__"));
        }

        // Programmatic overrides come last.
        let overrides = std::mem::take(&mut self.figment);
        Ok(figment.merge(overrides))
    }

    /// Merges a single config file, dispatching on its extension.
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
            _ => Err(ConfigError::ParseError(format!(
                "Unsupported or disabled configuration file format: .{ext}"
            ))),
        }
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("propcheck"));
        }
        paths
    }

    /// Tries the profile-specific variant, then the base file, for each
    /// search path in turn. Stops at the first base file found.
    #[cfg(any(feature = "toml-config", feature = "yaml-config"))]
    fn load_format_files<F>(
        &self,
        mut figment: Figment,
        search_paths: &[PathBuf],
        base_names: &[&str],
        merge_fn: F,
    ) -> (Figment, bool)
    where
        F: Fn(Figment, &Path) -> Figment,
    {
        for search_path in search_paths {
            for base_name in base_names {
                let Some((stem, ext)) = base_name.rsplit_once('.') else {
                    continue;
                };

                let profile_path =
                    search_path.join(format!("{stem}.{}.{ext}", self.profile.as_str()));
                if profile_path.exists() {
                    debug!(path = %profile_path.display(), "Loading profile-specific config");
                    figment = merge_fn(figment, &profile_path);
                }

                let base_path = search_path.join(base_name);
                if base_path.exists() {
                    info!(path = %base_path.display(), "Loading checker configuration file");
                    return (merge_fn(figment, &base_path), true);
                }
            }
        }
        (figment, false)
    }

    fn load_config_files(&self, mut figment: Figment) -> Figment {
        let search_paths = self.resolve_search_paths();
        let mut found = false;

        #[cfg(feature = "toml-config")]
        {
            let (f, ok) = self.load_format_files(
                figment,
                &search_paths,
                &["propcheck.toml"],
                |fig, path| fig.merge(Toml::file(path)),
            );
            figment = f;
            found |= ok;
        }

        #[cfg(feature = "yaml-config")]
        {
            let (f, ok) = self.load_format_files(
                figment,
                &search_paths,
                &["propcheck.yaml", "propcheck.yml"],
                |fig, path| fig.merge(Yaml::file(path)),
            );
            figment = f;
            found |= ok;
        }

        if !found {
            debug!("No checker configuration file found, using defaults");
        }
        figment
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<CheckerConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file, still honouring environment
/// variables.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<CheckerConfig> {
    ConfigLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckPolicy;
    use crate::config::LogLevel;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        Jail::expect_with(|jail| {
            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .without_env()
                .load()
                .unwrap();

            assert_eq!(config.logging.level, LogLevel::Info);
            assert_eq!(config.check.policy, CheckPolicy::Warn);
            assert!(config.check.locations.is_empty());
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_file_env_and_profile_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "propcheck.toml",
                r#"
                [check]
                locations = ["application.yml"]
                policy = "warn"

                [logging]
                level = "debug"
                "#,
            )?;
            jail.create_file(
                "propcheck.ci.toml",
                r#"
                [check]
                ignore_missing = true
                "#,
            )?;
            jail.set_env("PROPCHECK_CHECK__POLICY", "deny");

            let config = ConfigLoader::new()
                .profile("ci")
                .search_path(jail.directory())
                .load()
                .unwrap();

            assert_eq!(config.check.locations, vec![PathBuf::from("application.yml")]);
            assert_eq!(config.check.policy, CheckPolicy::Deny);
            assert!(config.check.ignore_missing);
            assert_eq!(config.logging.level, LogLevel::Debug);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = ConfigLoader::new()
            .without_env()
            .file("/nonexistent/propcheck.toml")
            .load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_programmatic_overrides_win() {
        Jail::expect_with(|jail| {
            jail.set_env("PROPCHECK_CHECK__POLICY", "warn");
            jail.set_env("PROPCHECK_CHECK__IGNORE_MISSING", "true");

            let config = ConfigLoader::new()
                .search_path(jail.directory())
                .set("check.policy", "deny")
                .load()
                .unwrap();
            assert_eq!(config.check.policy, CheckPolicy::Deny);
            assert!(config.check.ignore_missing);
            Ok(())
        });
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("prod"), Profile::Production);
        assert_eq!(Profile::parse("DEV"), Profile::Development);
        assert_eq!(Profile::parse("ci"), Profile::Custom("ci".to_string()));
    }
}
