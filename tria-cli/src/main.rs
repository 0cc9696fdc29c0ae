//! tria - Export a scanned repository as a compact, structured summary.
//!
//! tria turns a repository scanner's file inventory (plus an optional git
//! history snapshot) into one summary document for people or LLM context.
//!
//! # Commands
//!
//! - `tria init` - Write a default configuration file
//! - `tria export` - Render the summary as TOON, Markdown, JSON or XML
//!
//! # Usage
//!
//! ```bash
//! # Export with defaults (./<project>_summary.toon)
//! tria export inventory.json
//!
//! # Markdown with the last 5 commits
//! tria export inventory.json -f md --git-history git.json --git-commits 5
//!
//! # Check what would be written
//! tria export inventory.json -f xml --dry-run
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tria_cli::commands::{self, ExportOptions, InitOptions};
use tria_cli::output::{self, OutputLevel};
use tria_cli::serializers::OutputFormat;

/// tria - Export a scanned repository as a structured summary
#[derive(Parser)]
#[command(name = "tria")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show detailed progress and debug logs
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new tria.yaml configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Export format to pre-fill
        #[arg(long, short, value_enum)]
        format: Option<OutputFormat>,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Export a scanned repository
    Export {
        /// Scanner inventory JSON
        inventory: PathBuf,

        /// Output format [default: toon, or output.format from tria.yaml]
        #[arg(long, short, value_enum)]
        format: Option<OutputFormat>,

        /// Output file [default: <directory>/<project>_summary.<ext>]
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Git history snapshot JSON
        #[arg(long, value_name = "SNAPSHOT")]
        git_history: Option<PathBuf>,

        /// Number of recent commits to include [default: 20]
        #[arg(long, value_name = "N")]
        git_commits: Option<usize>,

        /// Path to the configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Render without writing the output file
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(level: OutputLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let level = OutputLevel::from_flags(cli.quiet, cli.verbose);
    output::set_level(level);
    init_tracing(level);

    let result = match cli.command {
        Commands::Init {
            output,
            format,
            force,
        } => commands::run_init(InitOptions {
            output,
            format,
            force,
        })
        .map(|_| ()),
        Commands::Export {
            inventory,
            format,
            output,
            git_history,
            git_commits,
            config,
            dry_run,
        } => commands::run_export(ExportOptions {
            inventory,
            format,
            output,
            git_history,
            git_commits,
            config,
            dry_run,
        })
        .map(|_| ()),
    };

    if let Err(e) = result {
        output::error(&e.format_for_cli());
        std::process::exit(1);
    }
}
