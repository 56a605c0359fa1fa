pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigReader, EnvLookup};
pub use schema::{Config, ValidationConfig, DEFAULT_CONFIG_PATH};
pub use validation::{validate_config, validate_id_pattern};
