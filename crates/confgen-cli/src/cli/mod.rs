//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "confgen",
    bin_name = "confgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate constant classes from layered .properties files",
    long_about = "confgen reads config/global and config/global/class property files \
                  from the resource roots of a project and writes the G and C constant \
                  classes into a generated source directory.",
    after_help = "EXAMPLES:\n\
        \x20 confgen generate\n\
        \x20 confgen generate --package com.example.config --test-source-only\n\
        \x20 confgen scan --root src/main/resources\n\
        \x20 confgen completions bash > /usr/share/bash-completion/completions/confgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the G and C classes.
    #[command(
        visible_alias = "gen",
        about = "Generate the G and C constant classes",
        after_help = "EXAMPLES:\n\
            \x20 confgen generate\n\
            \x20 confgen generate -C path/to/project --output build/generated\n\
            \x20 confgen generate --root src/main/resources --package gen.config\n\
            \x20 confgen generate --dry-run"
    )]
    Generate(GenerateArgs),

    /// Show what would be merged, without writing anything.
    #[command(
        about = "Discover and merge property files without generating",
        after_help = "EXAMPLES:\n\
            \x20 confgen scan\n\
            \x20 confgen scan --output-format json"
    )]
    Scan(ScanArgs),

    /// Initialise a confgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 confgen init           # confgen.toml in the current directory\n\
            \x20 confgen init --global  # user-wide config"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 confgen completions bash > ~/.local/share/bash-completion/completions/confgen\n\
            \x20 confgen completions zsh  > ~/.zfunc/_confgen\n\
            \x20 confgen completions fish > ~/.config/fish/completions/confgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 confgen config get generation.base_package\n\
            \x20 confgen config list\n\
            \x20 confgen config path"
    )]
    Config(ConfigCommands),
}

// ── shared source arguments ───────────────────────────────────────────────────

/// Where to look for property files. Shared by `generate` and `scan`.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Project directory; relative roots and output paths resolve against it.
    #[arg(
        short = 'C',
        long = "project-dir",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    /// Resource root to search for `config/global`. Repeatable; order matters.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Resource root (repeatable, replaces the configured roots)"
    )]
    pub roots: Vec<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `confgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Override the generated source directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Generated source directory"
    )]
    pub output: Option<PathBuf>,

    /// Package of the generated classes.
    #[arg(
        short = 'p',
        long = "package",
        value_name = "PACKAGE",
        help = "Base package of the generated classes"
    )]
    pub package: Option<String>,

    /// Register the output under the test source set only.
    #[arg(long = "test-source-only", help = "Register generated sources as test sources")]
    pub test_source_only: bool,

    /// Custom Handlebars template replacing the built-in Java one.
    #[arg(
        short = 't',
        long = "template",
        value_name = "FILE",
        help = "Custom Handlebars template"
    )]
    pub template: Option<PathBuf>,

    /// Merge and validate, but do not write any file.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

// ── scan ──────────────────────────────────────────────────────────────────────

/// Arguments for `confgen scan`.
#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print every key, not only the per-file counts.
    #[arg(short = 'k', long = "keys", help = "List keys per file")]
    pub keys: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `confgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user-wide config location instead of `./confgen.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `confgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `confgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.base_package`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the paths of the configuration files.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "confgen",
            "generate",
            "--root",
            "a",
            "-r",
            "b",
            "--package",
            "com.example",
            "--test-source-only",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.source.roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.package.as_deref(), Some("com.example"));
        assert!(args.test_source_only);
        assert!(!args.dry_run);
    }

    #[test]
    fn gen_alias() {
        let cli = Cli::parse_from(["confgen", "gen", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Generate(ref a) if a.dry_run));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["confgen", "scan", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["confgen", "--quiet", "--verbose", "scan"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_get_requires_key() {
        assert!(Cli::try_parse_from(["confgen", "config", "get"]).is_err());
    }
}
