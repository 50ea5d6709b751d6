//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "platcheck",
    bin_name = "platcheck",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Plugin-platform compatibility verification",
    long_about = "Platcheck verifies that a plugin project's compiler settings \
                  and descriptors are compatible with the platform build it targets.",
    after_help = "EXAMPLES:\n\
        \x20 platcheck check\n\
        \x20 platcheck check --settings ci/platcheck.toml --format json\n\
        \x20 platcheck check --descriptor widget.plugin.toml --strict\n\
        \x20 platcheck requirements\n\
        \x20 platcheck completions bash > /usr/share/bash-completion/completions/platcheck",
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
    /// Verify the project configuration against its target platform.
    #[command(
        visible_alias = "c",
        about = "Verify project compatibility",
        after_help = "EXAMPLES:\n\
            \x20 platcheck check\n\
            \x20 platcheck check --settings ci/platcheck.toml\n\
            \x20 platcheck check --descriptor-dir plugins --format json\n\
            \x20 platcheck check --strict   # nonzero exit when issues are found"
    )]
    Check(CheckArgs),

    /// Print the platform requirement tables.
    #[command(
        visible_alias = "req",
        about = "Show platform requirement tables",
        after_help = "EXAMPLES:\n\
            \x20 platcheck requirements\n\
            \x20 platcheck requirements --format json"
    )]
    Requirements(RequirementsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 platcheck completions bash > ~/.local/share/bash-completion/completions/platcheck\n\
            \x20 platcheck completions zsh  > ~/.zfunc/_platcheck\n\
            \x20 platcheck completions fish > ~/.config/fish/completions/platcheck.fish"
    )]
    Completions(CompletionsArgs),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `platcheck check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Project settings file.
    #[arg(
        short = 's',
        long = "settings",
        value_name = "FILE",
        default_value = "platcheck.toml",
        help = "Project settings file"
    )]
    pub settings: PathBuf,

    /// Additional descriptor files, on top of those the settings declare.
    #[arg(
        short = 'd',
        long = "descriptor",
        value_name = "FILE",
        help = "Plugin descriptor to verify (repeatable)"
    )]
    pub descriptors: Vec<PathBuf>,

    /// Directory to search for `*.plugin.toml` descriptors.
    #[arg(
        long = "descriptor-dir",
        value_name = "DIR",
        help = "Directory to discover descriptors under"
    )]
    pub descriptor_dir: Option<PathBuf>,

    /// Report format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Report format"
    )]
    pub format: ReportFormat,

    /// Fail (exit 2) when any compatibility issue is found.
    ///
    /// Without this flag issues are reported as warnings and the command
    /// still exits 0, matching build-tool behaviour where the check never
    /// breaks the build on its own.
    #[arg(long = "strict", help = "Exit nonzero when issues are found")]
    pub strict: bool,
}

/// Report format for the `check` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report.
    Text,
    /// JSON object with diagnostics, warning, and migration hint.
    Json,
}

// ── requirements ──────────────────────────────────────────────────────────────

/// Arguments for `platcheck requirements`.
#[derive(Debug, Args)]
pub struct RequirementsArgs {
    /// Report format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Report format"
    )]
    pub format: ReportFormat,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `platcheck completions`.
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

// ── tests ─────────────────────────────────────────────────────────────────────
