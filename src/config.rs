//! Generation configuration.
//!
//! A run is described by a single [`GenerationConfig`]. It is assembled from
//! three layers, each overriding the one before:
//!
//! ```text
//! stock defaults  →  mockgen.toml (or --config FILE)  →  CLI flags
//! ```
//!
//! Layers are merged as TOML tables (see [`merge_toml`]) and the result is
//! deserialized and validated once. Unknown keys are rejected to catch typos.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "mock_data"  # Wiped and rebuilt on every run
//! text_files = 5            # document_{i}.txt
//! csv_files = 2             # transactions_{i}.csv
//! image_files = 3           # photo_{i}.jpg
//! sub_dirs = 2              # internal_data_{i}/ with secret_note.md + thumb.png
//! # seed = 42               # Fixed seed for reproducible contents
//!
//! [processing]
//! # max_processes = 4       # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Content shapes (rows per CSV, image resolutions, paragraph length) are
//! fixed and live in [`crate::mock`], not here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mockgen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything a single generation run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Directory that is removed and recreated on every run.
    pub output_dir: PathBuf,
    pub text_files: usize,
    pub csv_files: usize,
    pub image_files: usize,
    pub sub_dirs: usize,
    /// Fixed seed for reproducible contents. Random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub processing: ProcessingConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("mock_data"),
            text_files: 5,
            csv_files: 2,
            image_files: 3,
            sub_dirs: 2,
            seed: None,
            processing: ProcessingConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Validate values that serde cannot express.
    ///
    /// The output directory is deleted recursively, so it must name a real
    /// directory below some parent: `/`, `.`, `..` and the empty path are refused.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        let has_named_component = self
            .output_dir
            .components()
            .any(|c| matches!(c, Component::Normal(_)));
        let ends_in_name = matches!(
            self.output_dir.components().next_back(),
            Some(Component::Normal(_))
        );
        if !has_named_component || !ends_in_name {
            return Err(ConfigError::Validation(format!(
                "output_dir '{}' must name a directory, not a root or relative marker",
                self.output_dir.display()
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Total number of regular files a successful run writes.
    pub fn expected_file_count(&self) -> usize {
        self.text_files + self.csv_files + self.image_files + 2 * self.sub_dirs
    }
}

/// Parallel generation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel writer threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GenerationConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// With `explicit = Some(path)` the file must exist. Without it,
/// [`DEFAULT_CONFIG_FILE`] in `dir` is used if present and `Ok(None)` otherwise.
pub fn load_raw_config(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<Option<toml::Value>, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(None);
            }
            candidate
        }
    };
    log::debug!("loading config from {}", path.display());
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply each overlay in order on top of the stock defaults, then
/// deserialize and validate.
pub fn resolve_config(
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<GenerationConfig, ConfigError> {
    let merged = overlays
        .into_iter()
        .try_fold(stock_defaults_value()?, |base, overlay| {
            Ok::<_, ConfigError>(merge_toml(base, overlay))
        })?;
    let config: GenerationConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a file (explicit or discovered in `dir`) over stock defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<GenerationConfig, ConfigError> {
    resolve_config(load_raw_config(explicit, dir)?)
}

/// Values given on the command line. `None` leaves the file/default value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub text_files: Option<usize>,
    pub csv_files: Option<usize>,
    pub image_files: Option<usize>,
    pub sub_dirs: Option<usize>,
    pub seed: Option<u64>,
    pub max_processes: Option<usize>,
}

impl ConfigOverrides {
    /// Apply on top of a resolved config and re-validate the result.
    pub fn apply(self, mut config: GenerationConfig) -> Result<GenerationConfig, ConfigError> {
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(n) = self.text_files {
            config.text_files = n;
        }
        if let Some(n) = self.csv_files {
            config.csv_files = n;
        }
        if let Some(n) = self.image_files {
            config.image_files = n;
        }
        if let Some(n) = self.sub_dirs {
            config.sub_dirs = n;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_processes.is_some() {
            config.processing.max_processes = self.max_processes;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Returns a fully-commented stock `mockgen.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mockgen Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# mockgen reads ./mockgen.toml when present, or the file given with --config.
# CLI flags override values from this file.
# Unknown keys will cause an error.

# Directory to populate. It is DELETED and recreated on every run.
output_dir = "mock_data"

# ---------------------------------------------------------------------------
# File counts
# ---------------------------------------------------------------------------
# document_{i}.txt: multi-paragraph lorem text
text_files = 5

# transactions_{i}.csv: header + 100 rows of UserID,Timestamp,Amount,Description
csv_files = 2

# photo_{i}.jpg: 640x480 JPEG noise
image_files = 3

# internal_data_{i}/ each holding secret_note.md and a 100x100 thumb.png
sub_dirs = 2

# Fixed seed for byte-identical output across runs.
# Omit to draw a fresh seed each run (it is printed so a run can be replayed).
# seed = 42

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel writer threads.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_fixture_layout() {
        let config = GenerationConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("mock_data"));
        assert_eq!(config.text_files, 5);
        assert_eq!(config.csv_files, 2);
        assert_eq!(config.image_files, 3);
        assert_eq!(config.sub_dirs, 2);
        assert_eq!(config.seed, None);
        assert_eq!(config.expected_file_count(), 14);
    }

    #[test]
    fn parse_partial_config() {
        let config: GenerationConfig = toml::from_str("csv_files = 7\n").unwrap();
        assert_eq!(config.csv_files, 7);
        // Unspecified values keep defaults
        assert_eq!(config.text_files, 5);
        assert_eq!(config.output_dir, PathBuf::from("mock_data"));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<GenerationConfig, _> = toml::from_str("txt_files = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<GenerationConfig, _> =
            toml::from_str("[processing]\nthreads = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(GenerationConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangerous_output_dirs() {
        for dir in ["", "/", ".", "..", "./", "mock_data/.."] {
            let config = GenerationConfig {
                output_dir: PathBuf::from(dir),
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "expected '{dir}' to be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_nested_and_absolute_dirs() {
        for dir in ["../../mock_data", "/tmp/fixtures", "out/mock"] {
            let config = GenerationConfig {
                output_dir: PathBuf::from(dir),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "expected '{dir}' to be accepted");
        }
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let config = GenerationConfig {
            processing: ProcessingConfig {
                max_processes: Some(0),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Thread count
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(cores + 64),
        };
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // Merging and loading
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_table_keeps_siblings() {
        let base: toml::Value = toml::from_str("[processing]\nmax_processes = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("seed = 9\n[processing]\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["processing"]["max_processes"].as_integer(), Some(2));
        assert_eq!(merged["seed"].as_integer(), Some(9));
    }

    #[test]
    fn resolve_config_layers_in_order() {
        let file: toml::Value = toml::from_str("text_files = 1\ncsv_files = 1\n").unwrap();
        let flags: toml::Value = toml::from_str("csv_files = 4\n").unwrap();
        let config = resolve_config([file, flags]).unwrap();
        assert_eq!(config.text_files, 1);
        assert_eq!(config.csv_files, 4);
        assert_eq!(config.image_files, 3);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("output_dir = \"/\"\n").unwrap();
        assert!(matches!(
            resolve_config([overlay]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let overrides = ConfigOverrides {
            image_files: Some(0),
            seed: Some(u64::MAX),
            ..Default::default()
        };
        let config = overrides.apply(GenerationConfig::default()).unwrap();
        assert_eq!(config.image_files, 0);
        assert_eq!(config.seed, Some(u64::MAX));
        assert_eq!(config.text_files, 5);
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = ConfigOverrides {
            output_dir: Some(PathBuf::from(".")),
            ..Default::default()
        };
        assert!(overrides.apply(GenerationConfig::default()).is_err());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn load_config_discovers_file_in_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "output_dir = \"fixtures\"\nseed = 11\n",
        )
        .unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("fixtures"));
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn load_config_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let result = load_config(Some(&missing), tmp.path());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        let result = load_config(Some(&path), tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: GenerationConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value().unwrap();
        assert!(value.is_table());
        assert!(value.get("processing").is_some());
    }
}
