use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error in '{field}': {message}")]
    Config { field: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid input: {0}")]
    Input(String),
}

impl Error {
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the configuration field that caused the failure, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Config { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}
