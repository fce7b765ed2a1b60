//! Implementation of the `confgen generate` command.
//!
//! Responsibility: turn arguments and configuration into a
//! `GenerationRequest`, run the core generation service and display the
//! report. No merge logic lives here.

use std::path::PathBuf;

use tracing::{debug, instrument};

use confgen_adapters::{HandlebarsRenderer, LocalFilesystem};
use confgen_core::{
    application::{GenerationReport, GenerationRequest, GenerationService},
    domain::SourceSet,
};

use crate::{
    cli::GenerateArgs,
    commands::{ResolvedSources, report_diagnostics},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `confgen generate` command.
///
/// 1. Resolve roots, output directory, package and template
/// 2. Build the service with the local filesystem and Handlebars renderer
/// 3. Dry run: scan and list target paths; otherwise generate
/// 4. Print warnings and the summary
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let sources = ResolvedSources::resolve(&args.source, &config);
    let request = build_request(&args, &config, &sources);
    let template = resolve_template(&args, &config, &sources)?;

    debug!(
        roots = ?request.resource_roots,
        output_dir = %request.output_dir.display(),
        package = %request.base_package,
        source_set = %request.source_set,
        "Generation request resolved"
    );

    let renderer = match &template {
        Some(path) => HandlebarsRenderer::from_template_file(path)?,
        None => HandlebarsRenderer::new(),
    };
    let service = GenerationService::new(Box::new(LocalFilesystem::new()), Box::new(renderer));

    if args.dry_run {
        return dry_run(&service, &request, &output);
    }

    let report = service.run(&request)?;
    report_diagnostics(&report.diagnostics, &output)?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        show_summary(&report, &output)?;
    }
    Ok(())
}

fn build_request(
    args: &GenerateArgs,
    config: &AppConfig,
    sources: &ResolvedSources,
) -> GenerationRequest {
    let generation = &config.generation;
    let output_dir = sources.path(args.output.as_ref().unwrap_or(&generation.output_dir));
    let package = args
        .package
        .clone()
        .unwrap_or_else(|| generation.base_package.clone());
    let source_set = SourceSet::from_test_only(args.test_source_only || generation.test_source_only);

    GenerationRequest::new(sources.roots.clone(), output_dir, package).with_source_set(source_set)
}

/// A `--template` flag is taken as given; a configured one is project-relative.
fn resolve_template(
    args: &GenerateArgs,
    config: &AppConfig,
    sources: &ResolvedSources,
) -> CliResult<Option<PathBuf>> {
    let path = match (&args.template, &config.generation.template) {
        (Some(flag), _) => flag.clone(),
        (None, Some(configured)) => sources.path(configured),
        (None, None) => return Ok(None),
    };
    if !path.is_file() {
        return Err(CliError::TemplateNotFound { path });
    }
    Ok(Some(path))
}

fn dry_run(
    service: &GenerationService,
    request: &GenerationRequest,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = service.plan(request)?;
    report_diagnostics(&plan.scan.diagnostics, output)?;

    if output.is_json() {
        output.json(&serde_json::json!({
            "dry_run": true,
            "source_set": request.source_set,
            "would_write": plan.targets,
            "global_files": plan.scan.global.len(),
            "class_files": plan.scan.class.len(),
        }))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: {} global and {} class file(s) merged",
        plan.scan.global.len(),
        plan.scan.class.len()
    ))?;
    for target in &plan.targets {
        output.info(&format!("  would write {}", target.display()))?;
    }
    Ok(())
}

fn show_summary(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for path in &report.generated {
        output.success(&format!("Generated {}", path.display()))?;
    }
    output.print(&format!(
        "  {} global group(s), {} class group(s)",
        report.global_groups.len(),
        report.class_groups.len()
    ))?;
    output.print(&format!(
        "  Register {} as a {} source root",
        report.source_root.display(),
        report.source_set
    ))?;
    Ok(())
}
