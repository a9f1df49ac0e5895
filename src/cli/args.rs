//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// gearplan - Track what your gearsets still need.
#[derive(Debug, Parser)]
#[command(name = "gearplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .gearplan/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show gearset progress and requirement states (default)
    Status(StatusArgs),

    /// Show how much materia the selected gearsets still need
    Materia(MateriaArgs),

    /// Warn about gearsets that target the same items
    Overlap(OverlapArgs),

    /// List every item the active gearsets require
    Items(ItemsArgs),

    /// Import gearsets into the gearsets file
    Import(ImportArgs),

    /// Print the JSON schema of the gearsets file
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Show a single gearset by name
    #[arg(short, long)]
    pub gearset: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `materia` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MateriaArgs {
    /// Meld confidence between 0.01 and 0.99 (overrides config)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Count only these gearsets (repeatable; default: active gearsets)
    #[arg(short, long)]
    pub gearset: Vec<String>,

    /// Sort column: name, stat, slots, needed, inventory, remaining
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Sort descending
    #[arg(long)]
    pub descending: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `overlap` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OverlapArgs {
    /// Check only these gearsets (repeatable; default: active gearsets)
    #[arg(short, long)]
    pub gearset: Vec<String>,
}

/// Arguments for the `items` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ItemsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Supported import formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    /// Native gearsets document (JSON or YAML)
    Json,
    /// Xivgear planner API document
    Xivgear,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportArgs {
    /// Document format
    #[arg(short, long, value_enum, default_value = "json")]
    pub source: ImportFormat,

    /// Document to import
    #[arg(short, long)]
    pub file: PathBuf,

    /// Planner page url the document was fetched from
    #[arg(long)]
    pub url: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_materia_args() {
        let cli = Cli::parse_from([
            "gearplan",
            "materia",
            "--confidence",
            "0.9",
            "-g",
            "Savage",
            "-g",
            "Tome",
            "--sort",
            "needed",
        ]);
        match cli.command {
            Some(Commands::Materia(args)) => {
                assert_eq!(args.confidence, Some(0.9));
                assert_eq!(args.gearset, vec!["Savage", "Tome"]);
                assert_eq!(args.sort, "needed");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_import_args() {
        let cli = Cli::parse_from([
            "gearplan", "import", "--source", "xivgear", "--file", "set.json",
        ]);
        match cli.command {
            Some(Commands::Import(args)) => {
                assert_eq!(args.source, ImportFormat::Xivgear);
                assert_eq!(args.file, PathBuf::from("set.json"));
                assert!(args.url.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["gearplan", "status", "--quiet", "--project", "/tmp"]);
        assert!(cli.quiet);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["gearplan", "-v", "-q", "status"]).is_err());
    }
}
