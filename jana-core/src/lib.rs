pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod validation;
pub mod workflow;

pub use config::{Config, ConfigReader, ValidationConfig};
pub use error::{Error, Result};
pub use validation::{
    DuplicateInfo, EnrichedDuplicateInfo, ValidationError, ValidationReport,
    ValidationReportGenerator, ValidationResult, WorkflowValidationService,
};
pub use workflow::Workflow;
