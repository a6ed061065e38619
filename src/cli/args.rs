//! Command line argument parsing for the Docweave CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Docweave - builds search-engine documents from structured content items
#[derive(Parser, Debug, Clone)]
#[command(name = "docweave")]
#[command(about = "Builds search-engine documents from structured content items")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct DocweaveArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for summaries
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl DocweaveArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build one document per item of a JSON lines file
    Build(BuildArgs),

    /// Load a configuration file and summarize it
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

/// Arguments for building documents
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Indexing configuration (JSON)
    #[arg(short, long, env = "DOCWEAVE_CONFIG")]
    pub config: PathBuf,

    /// Items, one JSON object per line
    #[arg(short, long)]
    pub items: PathBuf,

    /// Write documents here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the parallel computed fields setting
    #[arg(long)]
    pub parallel: Option<bool>,

    /// Override the stop-on-crawl-field-error setting
    #[arg(long)]
    pub stop_on_error: Option<bool>,
}

/// Arguments for checking a configuration
#[derive(Parser, Debug, Clone)]
pub struct CheckConfigArgs {
    /// Indexing configuration (JSON)
    #[arg(short, long, env = "DOCWEAVE_CONFIG")]
    pub config: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command() {
        let args = DocweaveArgs::try_parse_from([
            "docweave",
            "build",
            "--config",
            "index.json",
            "--items",
            "items.jsonl",
            "--output",
            "docs.jsonl",
            "--parallel",
            "true",
        ])
        .unwrap();

        if let Command::Build(build_args) = args.command {
            assert_eq!(build_args.config, PathBuf::from("index.json"));
            assert_eq!(build_args.items, PathBuf::from("items.jsonl"));
            assert_eq!(build_args.output, Some(PathBuf::from("docs.jsonl")));
            assert_eq!(build_args.parallel, Some(true));
            assert_eq!(build_args.stop_on_error, None);
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_check_config_command() {
        let args =
            DocweaveArgs::try_parse_from(["docweave", "check-config", "-c", "index.json"]).unwrap();
        assert!(matches!(args.command, Command::CheckConfig(_)));
    }

    #[test]
    fn test_verbosity_levels() {
        let args = DocweaveArgs::try_parse_from(["docweave", "check-config", "-c", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args =
            DocweaveArgs::try_parse_from(["docweave", "-vvv", "check-config", "-c", "x"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args =
            DocweaveArgs::try_parse_from(["docweave", "--quiet", "check-config", "-c", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = DocweaveArgs::try_parse_from([
            "docweave", "--format", "json", "check-config", "-c", "x",
        ])
        .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
