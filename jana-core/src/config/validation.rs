use regex::Regex;

use crate::config::schema::Config;
use crate::error::{Error, Result};

pub fn validate_id_pattern(pattern: &str) -> Result<Regex> {
    if pattern.trim().is_empty() {
        return Err(Error::config(
            "validation.idPattern",
            "pattern cannot be empty",
        ));
    }

    Regex::new(pattern).map_err(|err| {
        Error::config(
            "validation.idPattern",
            format!("'{pattern}' is not a valid regular expression: {err}"),
        )
    })
}

pub fn validate_config(config: &Config) -> Result<()> {
    let validation = &config.validation;

    validate_id_pattern(&validation.id_pattern)?;

    if validation.max_duplicates == 0 {
        return Err(Error::config(
            "validation.maxDuplicates",
            "must be at least 1",
        ));
    }

    if validation.log_path.trim().is_empty() {
        return Err(Error::config("validation.logPath", "cannot be empty"));
    }

    Ok(())
}
