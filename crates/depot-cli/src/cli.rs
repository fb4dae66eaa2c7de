use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Distribution network design: which DCs to open and who they serve", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a network design instance
    Solve {
        /// Instance file (TOML, or JSON with a .json extension)
        #[arg(value_hint = ValueHint::FilePath)]
        instance: PathBuf,
        /// Config file with a [solver] table
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        /// MILP backend (overrides the config file)
        #[arg(long)]
        solver: Option<String>,
        /// Solver time limit in seconds (overrides the config file)
        #[arg(long)]
        time_limit: Option<f64>,
        /// Number of DCs to open (overrides the instance)
        #[arg(short = 'k', long)]
        facilities: Option<usize>,
        /// Write the solution as JSON to this file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Output format for stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Check an instance without solving it
    Validate {
        /// Instance file (TOML, or JSON with a .json extension)
        #[arg(value_hint = ValueHint::FilePath)]
        instance: PathBuf,
    },
    /// Print the bundled reference instance
    Sample {
        /// Number of DCs to open
        #[arg(short = 'k', long, default_value_t = 2)]
        facilities: usize,
        /// Write to a file instead of stdout (.json selects JSON)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// List the MILP backends compiled into this build
    Solvers,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned tables
    Table,
    /// Plain-text summary
    Summary,
    /// JSON document
    Json,
}
