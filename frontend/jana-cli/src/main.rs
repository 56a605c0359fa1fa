mod cli;
mod renderer;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use jana_core::config::ConfigReader;
use jana_core::fs::FileSystem;
use jana_core::workflow::parse_workflows;
use jana_core::{Config, ValidationReportGenerator, Workflow, WorkflowValidationService};

use crate::renderer::Renderer;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("jana failed: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse_args();
    jana_core::logging::init_tracing(&args.log_level);

    let config = ConfigReader::new(&args.config).read()?;
    tracing::debug!(path = %args.config.display(), "configuration loaded");

    let renderer = Renderer::new(args.output);
    match args.command {
        cli::Command::Validate {
            input,
            report,
            skip_validation,
            compact,
        } => validate(
            &config,
            &renderer.compact(compact),
            &input,
            report.as_deref(),
            skip_validation,
        ),
        cli::Command::Report { path } => {
            show_report(&config, &renderer, path)?;
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Config => {
            renderer.render_config(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Outcome of a `validate` run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Passed,
    Blocked,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Passed => ExitCode::SUCCESS,
            RunStatus::Blocked => ExitCode::FAILURE,
        }
    }
}

fn validate(
    config: &Config,
    renderer: &Renderer,
    input: &Path,
    report_path: Option<&Path>,
    skip_validation: bool,
) -> anyhow::Result<ExitCode> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read workflow export '{}'", input.display()))?;
    let workflows = parse_workflows(&raw)
        .with_context(|| format!("failed to parse workflow export '{}'", input.display()))?;
    tracing::debug!(count = workflows.len(), "workflows loaded");

    let service = WorkflowValidationService::new(&config.validation)?;
    let generator = ValidationReportGenerator::from_config(&config.validation);
    let blocking = config.validation.strict && !skip_validation;

    let status = run_validation(
        &service,
        &generator,
        renderer,
        &workflows,
        report_path,
        blocking,
    )?;
    Ok(status.into())
}

/// Validates the batch and always saves the report before returning. Only a
/// blocking run with duplicates comes back as [`RunStatus::Blocked`].
fn run_validation<F: FileSystem>(
    service: &WorkflowValidationService,
    generator: &ValidationReportGenerator<F>,
    renderer: &Renderer,
    workflows: &[Workflow],
    report_path: Option<&Path>,
    blocking: bool,
) -> anyhow::Result<RunStatus> {
    if !blocking {
        let summary = service.validate_workflows_non_blocking(workflows);
        renderer.render_summary(
            summary.total_workflows,
            &summary.duplicates,
            &summary.messages,
            service.formatter(),
        )?;
        let saved =
            generator.save_report(summary.total_workflows, &summary.duplicates, report_path)?;
        renderer.render_report_saved(&saved);
        return Ok(RunStatus::Passed);
    }

    match service.validate_workflows(workflows) {
        Ok(result) => {
            renderer.render_success(&result, service.formatter())?;
            let saved = generator.save_report(result.total_workflows, &[], report_path)?;
            renderer.render_report_saved(&saved);
            Ok(RunStatus::Passed)
        }
        Err(error) => {
            renderer.render_summary(
                error.total_workflows,
                &error.duplicates,
                &error.messages,
                service.formatter(),
            )?;
            let saved =
                generator.save_report(error.total_workflows, &error.duplicates, report_path)?;
            renderer.render_report_saved(&saved);
            Ok(RunStatus::Blocked)
        }
    }
}

fn show_report(config: &Config, renderer: &Renderer, path: Option<PathBuf>) -> anyhow::Result<()> {
    let generator = ValidationReportGenerator::from_config(&config.validation);
    let path = path.unwrap_or_else(|| generator.default_path().to_path_buf());

    match generator.read_report(&path) {
        Some(report) => {
            let summary = generator.format_report_summary(&report);
            renderer.render_report(&summary, &report)
        }
        None => {
            renderer.render_messages(&[format!("No readable report at {}", path.display())]);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use jana_core::fs::MemoryFileSystem;
    use jana_core::{ValidationConfig, ValidationReportGenerator, Workflow, WorkflowValidationService};

    use super::{run_validation, RunStatus};
    use crate::cli::OutputFormat;
    use crate::renderer::Renderer;

    const LOG_PATH: &str = ".jana/logs/validation.log";

    fn service() -> WorkflowValidationService {
        WorkflowValidationService::new(&ValidationConfig::default()).expect("default config")
    }

    fn generator() -> ValidationReportGenerator<MemoryFileSystem> {
        ValidationReportGenerator::with_fs(MemoryFileSystem::new(), LOG_PATH)
    }

    fn duplicated() -> Vec<Workflow> {
        vec![
            Workflow::new("wf-1", "(ERR-OUT-001) Handler A"),
            Workflow::new("wf-2", "(ERR-OUT-001) Handler B"),
        ]
    }

    fn renderer() -> Renderer {
        Renderer::new(OutputFormat::Text)
    }

    #[test]
    fn blocking_run_with_duplicates_fails_after_saving() {
        let generator = generator();

        let status = run_validation(&service(), &generator, &renderer(), &duplicated(), None, true)
            .expect("run should complete");
        assert_eq!(status, RunStatus::Blocked);

        let report = generator
            .read_report(Path::new(LOG_PATH))
            .expect("report should be saved");
        assert_eq!(report.total_workflows, 2);
        assert_eq!(report.duplicates_found, 1);
        assert_eq!(report.duplicates[0].internal_id(), "(ERR-OUT-001)");
    }

    #[test]
    fn skipped_validation_passes_and_still_saves() {
        let generator = generator();
        let target = Path::new("out/custom.json");

        let status = run_validation(
            &service(),
            &generator,
            &renderer(),
            &duplicated(),
            Some(target),
            false,
        )
        .expect("run should complete");
        assert_eq!(status, RunStatus::Passed);

        let report = generator.read_report(target).expect("report should be saved");
        assert_eq!(report.duplicates_found, 1);
        assert!(generator.read_report(Path::new(LOG_PATH)).is_none());
    }

    #[test]
    fn clean_blocking_run_passes() {
        let generator = generator();
        let workflows = vec![Workflow::new("wf-1", "(ERR-OUT-001) Handler")];

        let status = run_validation(&service(), &generator, &renderer(), &workflows, None, true)
            .expect("run should complete");
        assert_eq!(status, RunStatus::Passed);

        let report = generator
            .read_report(Path::new(LOG_PATH))
            .expect("report should be saved");
        assert_eq!(report.total_workflows, 1);
        assert!(report.duplicates.is_empty());
    }
}
