//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/course-index/course-index.toml`
//! 3. Local config: `<dir>/.course-index.toml` (usually the working directory)
//! 4. Environment variables: `COURSE_INDEX_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, ValidationRules};

/// Raw validation rules for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawValidation {
    pub id_length: Option<usize>,
    pub name_min: Option<usize>,
    pub name_max: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_file: Option<PathBuf>,
    pub rebalance_on_load: Option<bool>,
    #[serde(default)]
    pub validation: RawValidation,
}

/// Unified configuration for course-index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog used when no file is given on the command line
    pub catalog_file: Option<PathBuf>,
    /// Rebalance the index after loading a catalog
    pub rebalance_on_load: bool,
    /// Record length rules
    pub validation: ValidationRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_file: None,
            rebalance_on_load: true,
            validation: ValidationRules::default(),
        }
    }
}

/// Get the XDG config directory for course-index.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "course-index").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("course-index.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".course-index.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog_file {
            let expanded = expand_env_vars(catalog.to_string_lossy().as_ref());
            self.catalog_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_file: overlay
                .catalog_file
                .clone()
                .or_else(|| self.catalog_file.clone()),
            rebalance_on_load: overlay.rebalance_on_load.unwrap_or(self.rebalance_on_load),
            validation: ValidationRules {
                id_length: overlay
                    .validation
                    .id_length
                    .unwrap_or(self.validation.id_length),
                name_min: overlay
                    .validation
                    .name_min
                    .unwrap_or(self.validation.name_min),
                name_max: overlay
                    .validation
                    .name_max
                    .unwrap_or(self.validation.name_max),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.course-index.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/course-index/course-index.toml`
    /// 3. Local config: `<local_dir>/.course-index.toml`
    /// 4. Environment variables: `COURSE_INDEX_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env_source())?;

        current.expand_paths();
        current.check()?;

        Ok(current)
    }

    /// Apply COURSE_INDEX_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        source: Environment,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_file") {
            settings.catalog_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env_bool(&config, "rebalance_on_load")? {
            settings.rebalance_on_load = val;
        }
        if let Some(val) = env_usize(&config, "validation.id_length")? {
            settings.validation.id_length = val;
        }
        if let Some(val) = env_usize(&config, "validation.name_min")? {
            settings.validation.name_min = val;
        }
        if let Some(val) = env_usize(&config, "validation.name_max")? {
            settings.validation.name_max = val;
        }

        Ok(settings)
    }

    /// Reject rule combinations no record could satisfy.
    fn check(&self) -> Result<(), ApplicationError> {
        if self.validation.name_min > self.validation.name_max {
            return Err(ApplicationError::Config {
                message: format!(
                    "validation.name_min ({}) exceeds validation.name_max ({})",
                    self.validation.name_min, self.validation.name_max
                ),
            });
        }
        if self.validation.id_length == 0 {
            return Err(ApplicationError::Config {
                message: "validation.id_length must be positive".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# course-index configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/course-index/course-index.toml
#   Local:  ./.course-index.toml
#   Env:    COURSE_INDEX_* environment variables, e.g.
#           COURSE_INDEX_CATALOG_FILE=~/courses.csv
#           COURSE_INDEX_VALIDATION__ID_LENGTH=8

# Catalog loaded when no --file is given
# catalog_file = "~/abcu/courses.csv"

# Rebalance the tree once after loading (sorted files otherwise build a list)
# rebalance_on_load = true

[validation]
# Exact course id length
# id_length = 7

# Accepted course name length
# name_min = 3
# name_max = 40
"#
        .to_string()
    }
}

/// Read an optional non-negative integer from the env source.
fn env_usize(config: &Config, key: &str) -> Result<Option<usize>, ApplicationError> {
    match config.get_int(key) {
        Ok(val) => usize::try_from(val)
            .map(Some)
            .map_err(|_| ApplicationError::Config {
                message: format!("{key} must not be negative: {val}"),
            }),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

/// `COURSE_INDEX_*` variables, `__` between nested keys.
fn env_source() -> Environment {
    Environment::with_prefix("COURSE_INDEX")
        .prefix_separator("_")
        .separator("__")
}

/// Read an optional boolean from the env source.
fn env_bool(config: &Config, key: &str) -> Result<Option<bool>, ApplicationError> {
    match config.get_bool(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
