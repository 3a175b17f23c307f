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
    name    = "stamp",
    bin_name = "stamp",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generation hooks for cookiecutter-style project templates",
    long_about = "stamp runs the pre- and post-generate steps around a template \
                  rendering engine: merging the shared common directory, \
                  injecting a license, and trimming the rendered project down \
                  to the template's desired structure.",
    after_help = "EXAMPLES:\n\
        \x20 stamp hook pre  python-package\n\
        \x20 stamp hook post python-package --dry-run\n\
        \x20 stamp keep src tests LICENSE --dest ./my-project --yes\n\
        \x20 stamp completions bash > /usr/share/bash-completion/completions/stamp",
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
    /// Run a generation hook inside a rendered project.
    #[command(
        about = "Run the pre- or post-generate hook",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stamp hook pre  flask-service\n\
            \x20 stamp hook post flask-service --project-dir ./my-service"
    )]
    Hook(HookCommands),

    /// Copy a license template into a project.
    #[command(
        about = "Inject a license file",
        after_help = "EXAMPLES:\n\
            \x20 stamp license\n\
            \x20 stamp license Apache-2.0 --dest ./my-project"
    )]
    License(LicenseArgs),

    /// Merge a common directory into a project.
    #[command(
        about = "Merge shared scaffolding without overwriting",
        after_help = "EXAMPLES:\n\
            \x20 stamp inherit\n\
            \x20 stamp inherit --from common --dest ./my-project"
    )]
    Inherit(InheritArgs),

    /// Reduce a project to an explicit allow-list.
    #[command(
        about = "Delete everything not in the given paths",
        after_help = "EXAMPLES:\n\
            \x20 stamp keep src tests README.md --dry-run\n\
            \x20 stamp keep src LICENSE --dest ./my-project --yes"
    )]
    Keep(KeepArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 stamp list\n\
            \x20 stamp list --format json"
    )]
    List(ListArgs),

    /// Show where templates, common dirs and licenses are looked up.
    #[command(about = "Show resolved template paths")]
    Paths,

    /// Initialise a stamp configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stamp init\n\
            \x20 stamp init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stamp completions bash > ~/.local/share/bash-completion/completions/stamp\n\
            \x20 stamp completions zsh  > ~/.zfunc/_stamp\n\
            \x20 stamp completions fish > ~/.config/fish/completions/stamp.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the stamp configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stamp config get hooks.default_license\n\
            \x20 stamp config list"
    )]
    Config(ConfigCommands),
}

// ── hook ──────────────────────────────────────────────────────────────────────

/// Subcommands for `stamp hook`.
#[derive(Debug, Subcommand)]
pub enum HookCommands {
    /// Merge the inherited common directory, then inject the license.
    Pre(PreHookArgs),
    /// Filter the project down to the template's desired structure.
    Post(PostHookArgs),
}

/// Arguments for `stamp hook pre`.
#[derive(Debug, Args)]
pub struct PreHookArgs {
    /// Template whose settings drive the hook.
    #[arg(value_name = "TEMPLATE", help = "Template name")]
    pub template: String,

    /// Rendered project directory.
    #[arg(
        short = 'p',
        long = "project-dir",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,
}

/// Arguments for `stamp hook post`.
#[derive(Debug, Args)]
pub struct PostHookArgs {
    /// Template whose desired structure is kept.
    #[arg(value_name = "TEMPLATE", help = "Template name")]
    pub template: String,

    /// Rendered project directory.
    #[arg(
        short = 'p',
        long = "project-dir",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    /// Report removals without deleting anything.
    #[arg(long = "dry-run", help = "Show what would be removed without removing")]
    pub dry_run: bool,
}

// ── license ───────────────────────────────────────────────────────────────────

/// Arguments for `stamp license`.
#[derive(Debug, Args)]
pub struct LicenseArgs {
    /// License file under the licenses directory.
    #[arg(
        value_name = "NAME",
        help = "License name (default: hooks.default_license)"
    )]
    pub name: Option<String>,

    /// Project directory receiving `LICENSE`.
    #[arg(
        short = 'd',
        long = "dest",
        value_name = "DIR",
        help = "Destination project (default: current directory)"
    )]
    pub dest: Option<PathBuf>,
}

// ── inherit ───────────────────────────────────────────────────────────────────

/// Arguments for `stamp inherit`.
#[derive(Debug, Args)]
pub struct InheritArgs {
    /// Common directory under the templates root.
    #[arg(
        long = "from",
        value_name = "NAME",
        help = "Common directory name (default: templates.common_dir)"
    )]
    pub from: Option<String>,

    /// Project directory to merge into.
    #[arg(
        short = 'd',
        long = "dest",
        value_name = "DIR",
        help = "Destination project (default: current directory)"
    )]
    pub dest: Option<PathBuf>,
}

// ── keep ──────────────────────────────────────────────────────────────────────

/// Arguments for `stamp keep`.
#[derive(Debug, Args)]
pub struct KeepArgs {
    /// Paths to keep, relative to the project root.
    #[arg(value_name = "PATH", required = true, help = "Paths to keep")]
    pub paths: Vec<String>,

    /// Project directory to filter.
    #[arg(
        short = 'd',
        long = "dest",
        value_name = "DIR",
        help = "Project directory (default: current directory)"
    )]
    pub dest: Option<PathBuf>,

    /// Report removals without deleting anything.
    #[arg(long = "dry-run", help = "Show what would be removed without removing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Delete without asking")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stamp list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stamp init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stamp completions`.
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

/// Subcommands for `stamp config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `hooks.default_license`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_post_hook() {
        let cli = Cli::parse_from(["stamp", "hook", "post", "solution", "--dry-run"]);
        match cli.command {
            Commands::Hook(HookCommands::Post(args)) => {
                assert_eq!(args.template, "solution");
                assert!(args.dry_run);
                assert!(args.project_dir.is_none());
            }
            other => panic!("expected hook post, got {other:?}"),
        }
    }

    #[test]
    fn templates_dir_is_global() {
        let cli = Cli::parse_from(["stamp", "paths", "--templates-dir", "/opt/templates"]);
        assert_eq!(
            cli.global.templates_dir,
            Some(PathBuf::from("/opt/templates"))
        );
    }

    #[test]
    fn keep_requires_paths() {
        assert!(Cli::try_parse_from(["stamp", "keep"]).is_err());
        let cli = Cli::parse_from(["stamp", "keep", "src", "README.md", "-y"]);
        if let Commands::Keep(args) = cli.command {
            assert_eq!(args.paths, vec!["src", "README.md"]);
            assert!(args.yes);
        } else {
            panic!("expected Keep command");
        }
    }

    #[test]
    fn license_name_is_optional() {
        let cli = Cli::parse_from(["stamp", "license", "--dest", "out"]);
        if let Commands::License(args) = cli.command {
            assert!(args.name.is_none());
            assert_eq!(args.dest, Some(PathBuf::from("out")));
        } else {
            panic!("expected License command");
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["stamp", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
