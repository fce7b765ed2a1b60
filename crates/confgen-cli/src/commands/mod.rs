//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments and configuration into core requests and
//! display the results. Merge rules live in `confgen-core`.

use std::path::{Path, PathBuf};

use confgen_core::domain::Diagnostics;

use crate::{cli::SourceArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod scan;

/// Project directory plus the resource roots resolved against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSources {
    pub project_dir: PathBuf,
    pub roots: Vec<PathBuf>,
}

impl ResolvedSources {
    /// `--root` flags replace the configured roots entirely.
    pub fn resolve(args: &SourceArgs, config: &AppConfig) -> Self {
        let project_dir = args
            .project_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let roots = if args.roots.is_empty() {
            &config.generation.resource_roots
        } else {
            &args.roots
        };
        let roots = roots.iter().map(|r| project_dir.join(r)).collect();
        Self { project_dir, roots }
    }

    /// Resolve a project-relative path; absolute paths pass through.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.project_dir.join(relative)
    }
}

/// Print merge warnings. Overrides are expected and only logged.
pub fn report_diagnostics(diagnostics: &Diagnostics, output: &OutputManager) -> CliResult<()> {
    for notice in &diagnostics.overrides {
        tracing::info!(
            key = %notice.key,
            file = %notice.file.display(),
            "Class key overridden by global definition"
        );
    }
    for collision in &diagnostics.collisions {
        output.warning(&format!(
            "Key '{}' in {} is also defined in {}",
            collision.key,
            collision.file.display(),
            collision.other.display(),
        ))?;
    }
    for skipped in &diagnostics.skipped {
        output.warning(&format!(
            "Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ))?;
    }
    Ok(())
}
