use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tether::cli::commands;

#[derive(Parser)]
#[command(
    name = "tether",
    about = "tether — cross-test dependency tracking and ordering",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reorder suite tests so dependencies run before dependents
    Order {
        /// Suite manifest files (.yaml or .json)
        files: Vec<PathBuf>,

        /// Output format: text, yaml, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay recorded outcomes and report run/skip decisions
    Check {
        /// Suite manifest files (.yaml or .json)
        files: Vec<PathBuf>,

        /// Output format: text, yaml, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Emit the dependency graph as a diagram
    Graph {
        /// Suite manifest files (.yaml or .json)
        files: Vec<PathBuf>,

        /// Diagram format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate suite manifests and report dependency problems
    Validate {
        /// Suite manifest files (.yaml or .json)
        files: Vec<PathBuf>,
    },
}

fn ensure_files(files: &[PathBuf]) {
    if files.is_empty() {
        eprintln!("error: no input files provided");
        std::process::exit(1);
    }
}

fn finish(result: Result<String, String>) -> ! {
    match result {
        Ok(output) => {
            print!("{output}");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Order {
            files,
            format,
            output,
        } => {
            ensure_files(&files);
            finish(commands::run_order(&files, &format, output.as_ref()));
        }
        Commands::Check {
            files,
            format,
            output,
        } => {
            ensure_files(&files);
            finish(commands::run_check(&files, &format, output.as_ref()));
        }
        Commands::Graph {
            files,
            format,
            output,
        } => {
            ensure_files(&files);
            finish(commands::run_graph(&files, &format, output.as_ref()));
        }
        Commands::Validate { files } => {
            ensure_files(&files);
            finish(commands::run_validate(&files));
        }
    }
}
