//! `confgen scan`: discover and merge without generating.

use tracing::instrument;

use confgen_adapters::{HandlebarsRenderer, LocalFilesystem};
use confgen_core::{
    application::{GenerationService, ScanReport},
    domain::PropertyFile,
};

use crate::{
    cli::ScanArgs,
    commands::{ResolvedSources, report_diagnostics},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ScanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let sources = ResolvedSources::resolve(&args.source, &config);
    let service = GenerationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(HandlebarsRenderer::new()),
    );

    let report = service.scan(&sources.roots)?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    report_diagnostics(&report.diagnostics, &output)?;
    show_report(&report, args.keys, &output)
}

fn show_report(report: &ScanReport, keys: bool, output: &OutputManager) -> CliResult<()> {
    if report.directories.is_empty() {
        output.info("No config/global directory found in any resource root")?;
        return Ok(());
    }

    output.header(&format!(
        "Global layer: {} file(s), {} key(s)",
        report.global.len(),
        report.global_key_count()
    ))?;
    show_files(&report.global, keys, output)?;

    output.header(&format!(
        "Class layer: {} file(s), {} key(s)",
        report.class.len(),
        report.class_key_count()
    ))?;
    show_files(&report.class, keys, output)?;
    Ok(())
}

fn show_files(files: &[PropertyFile], keys: bool, output: &OutputManager) -> CliResult<()> {
    for file in files {
        output.print(&format!(
            "  {:<24} {:>4}  {}",
            file.base_name(),
            file.len(),
            file.path().display()
        ))?;
        if keys {
            for key in file.properties().keys() {
                output.print(&format!("      {key}"))?;
            }
        }
    }
    Ok(())
}
