use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::error::ValidationErrorKind;
use jsonschema::JSONSchema;

use crate::config::schema::{Config, DEFAULT_CONFIG_PATH};
use crate::config::validation::validate_config;
use crate::error::{Error, Result};
use crate::fs::{FileSystem, OsFileSystem};

pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

const ENV_ID_PATTERN: &str = "JANA_ID_PATTERN";
const ENV_STRICT: &str = "JANA_VALIDATION_STRICT";
const ENV_MAX_DUPLICATES: &str = "JANA_MAX_DUPLICATES";
const ENV_LOG_PATH: &str = "JANA_VALIDATION_LOG_PATH";

/// Reads the JSON config file, writing the default one on first use.
pub struct ConfigReader<F: FileSystem = OsFileSystem> {
    fs: F,
    path: PathBuf,
    env: EnvLookup,
}

impl ConfigReader<OsFileSystem> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(OsFileSystem, path)
    }
}

impl<F: FileSystem> ConfigReader<F> {
    pub fn with_fs(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
            env: Box::new(|key: &str| std::env::var(key).ok()),
        }
    }

    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Box::new(lookup);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn read(&self) -> Result<Config> {
        let mut config = if self.fs.exists(&self.path) {
            self.read_existing()?
        } else {
            self.write_default()?
        };

        self.apply_env_overrides(&mut config)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn read_existing(&self) -> Result<Config> {
        let raw = self.fs.read_to_string(&self.path).map_err(|err| {
            Error::config(
                "config",
                format!("failed to read '{}': {err}", self.path.display()),
            )
        })?;

        let value = serde_json::from_str::<serde_json::Value>(&raw).map_err(|err| {
            Error::config(
                "config",
                format!("'{}' is not valid JSON: {err}", self.path.display()),
            )
        })?;

        validate_against_schema(&self.path, &value)?;

        serde_json::from_value(value).map_err(|err| {
            Error::config(
                "config",
                format!("failed to parse '{}': {err}", self.path.display()),
            )
        })
    }

    fn write_default(&self) -> Result<Config> {
        let config = Config::default();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                self.fs.create_dir_all(parent)?;
            }
        }

        let body = serde_json::to_string_pretty(&config)
            .map_err(|err| Error::Serialization(err.to_string()))?;
        self.fs.write(&self.path, &body)?;

        tracing::warn!(
            path = %self.path.display(),
            "config file not found; wrote default configuration"
        );
        Ok(config)
    }

    fn apply_env_overrides(&self, config: &mut Config) -> Result<()> {
        let validation = &mut config.validation;

        if let Some(pattern) = (self.env)(ENV_ID_PATTERN) {
            validation.id_pattern = pattern;
        }

        if let Some(raw) = (self.env)(ENV_STRICT) {
            validation.strict = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(Error::config(
                        "validation.strict",
                        format!("{ENV_STRICT}='{other}' is not a boolean"),
                    ));
                }
            };
        }

        if let Some(raw) = (self.env)(ENV_MAX_DUPLICATES) {
            validation.max_duplicates = raw.trim().parse().map_err(|err| {
                Error::config(
                    "validation.maxDuplicates",
                    format!("{ENV_MAX_DUPLICATES}='{raw}' is not a number: {err}"),
                )
            })?;
        }

        if let Some(path) = (self.env)(ENV_LOG_PATH) {
            validation.log_path = path;
        }

        Ok(())
    }
}

/// Reads the config at `path`, or at `.jana/config.json` when none is given.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    ConfigReader::new(path).read()
}

fn config_schema() -> Result<&'static JSONSchema> {
    static SCHEMA: OnceLock<std::result::Result<JSONSchema, String>> = OnceLock::new();
    let compiled = SCHEMA.get_or_init(|| {
        let raw = include_str!("../../../docs/jana.config.schema.json");
        let schema_value = serde_json::from_str::<serde_json::Value>(raw)
            .map_err(|err| format!("invalid embedded config schema json: {err}"))?;
        JSONSchema::compile(&schema_value)
            .map_err(|err| format!("failed compiling embedded config schema: {err}"))
    });

    match compiled {
        Ok(schema) => Ok(schema),
        Err(err) => Err(Error::config("config", err.clone())),
    }
}

fn validate_against_schema(path: &Path, value: &serde_json::Value) -> Result<()> {
    let schema = config_schema()?;
    if let Err(errors) = schema.validate(value) {
        let mut field = None;
        let mut details = Vec::new();
        for err in errors {
            let pointer = err.instance_path.to_string();
            if field.is_none() {
                field = Some(error_field(&pointer, &err.kind));
            }
            details.push(format!("{pointer}: {err}"));
        }
        return Err(Error::config(
            field.unwrap_or_else(|| "config".to_owned()),
            format!(
                "'{}' failed schema validation: {}",
                path.display(),
                details.join("; ")
            ),
        ));
    }
    Ok(())
}

/// Unknown keys are reported against their parent object; name the key itself.
fn error_field(pointer: &str, kind: &ValidationErrorKind) -> String {
    match kind {
        ValidationErrorKind::AdditionalProperties { unexpected } => match unexpected.first() {
            Some(key) if pointer.trim_start_matches('/').is_empty() => key.clone(),
            Some(key) => format!("{}.{key}", pointer_to_field(pointer)),
            None => pointer_to_field(pointer),
        },
        _ => pointer_to_field(pointer),
    }
}

fn pointer_to_field(pointer: &str) -> String {
    let field = pointer.trim_start_matches('/').replace('/', ".");
    if field.is_empty() {
        "config".to_owned()
    } else {
        field
    }
}
