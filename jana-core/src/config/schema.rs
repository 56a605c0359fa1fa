use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = ".jana/config.json";
pub const DEFAULT_ID_PATTERN: &str = r"\([A-Z]+-[A-Z]+-\d{3}\)";
pub const DEFAULT_LOG_PATH: &str = ".jana/logs/validation.log";
pub const DEFAULT_MAX_DUPLICATES: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationConfig,
}

/// Settings for duplicate internal-ID validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Regex source used to find the internal ID in a workflow name or tags.
    pub id_pattern: String,
    /// Abort the calling pipeline when duplicates are found.
    pub strict: bool,
    /// Duplicate groups detailed (and given suggestions) per run.
    pub max_duplicates: usize,
    pub log_path: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            id_pattern: DEFAULT_ID_PATTERN.to_owned(),
            strict: true,
            max_duplicates: DEFAULT_MAX_DUPLICATES,
            log_path: DEFAULT_LOG_PATH.to_owned(),
        }
    }
}
