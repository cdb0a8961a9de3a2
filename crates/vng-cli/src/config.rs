use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vng_core::config::AnalysisConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub fn default_allowed_extensions() -> Vec<String> {
    vec!["txt".to_string(), "vng".to_string()]
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// File extensions accepted as reports, without the leading dot.
    /// Added in v1; older configs get the defaults during migration.
    pub allowed_extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::Timestamp>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            analysis: AnalysisConfig::default(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: default_allowed_extensions(),
            created_at: None,
        }
    }
}

impl CliConfig {
    pub fn validate(&self) -> eyre::Result<()> {
        self.analysis.validate()?;
        if self.max_file_size_bytes == 0 {
            return Err(eyre::eyre!("max_file_size_bytes must be at least 1"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(eyre::eyre!("allowed_extensions must not be empty"));
        }
        Ok(())
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("vng-analyzer"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, or the defaults if no file exists there.
pub fn load_or_default(path: &Path) -> eyre::Result<CliConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }
    load_config(path)
}

pub fn load_config(path: &Path) -> eyre::Result<CliConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| eyre::eyre!("config_version {value} is not a supported version number"))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: CliConfig = serde_json::from_value(migrated)?;
    config.validate()?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update vng."
        ));
    }

    // v0 → v1: add allowed_extensions
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("allowed_extensions")
            .or_insert_with(|| serde_json::Value::from(default_allowed_extensions()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added allowed_extensions)");
    }

    Ok(json)
}

pub fn save_config(config: &CliConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
