//! SegLog CLI
//!
//! Command-line tools for SegLog commit logs.
//!
//! # Commands
//!
//! - `append` - Append values as records
//! - `read` - Print the record at an offset
//! - `dump` - Export the raw store bytes of every segment
//! - `truncate` - Drop segments below an offset
//! - `inspect` - Display offsets and segment statistics

mod commands;

use clap::{Parser, Subcommand};
use seglog_core::{LogConfig, DEFAULT_MAX_INDEX_BYTES, DEFAULT_MAX_STORE_BYTES};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SegLog command-line log tools.
#[derive(Parser)]
#[command(name = "seglog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the log directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Store size at which a segment is rotated
    #[arg(global = true, long, default_value_t = DEFAULT_MAX_STORE_BYTES)]
    max_store_bytes: u64,

    /// Index size at which a segment is rotated
    #[arg(global = true, long, default_value_t = DEFAULT_MAX_INDEX_BYTES)]
    max_index_bytes: u64,

    /// First offset of a new log
    #[arg(global = true, long, default_value_t = 0)]
    initial_offset: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append values as records
    Append {
        /// Values to append, one record each
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Print the record at an offset
    Read {
        /// Offset to read
        offset: u64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Export the raw store bytes of every segment
    Dump {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Drop every segment whose offsets all lie below an offset
    Truncate {
        /// Lowest offset to keep
        lowest: u64,
    },

    /// Display offsets and segment statistics
    Inspect {
        /// Show segment details
        #[arg(short, long)]
        segments: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = LogConfig::new()
        .max_store_bytes(cli.max_store_bytes)
        .max_index_bytes(cli.max_index_bytes)
        .initial_offset(cli.initial_offset);

    match cli.command {
        Commands::Append { values } => {
            let path = cli.path.ok_or("Log path required for append")?;
            commands::append::run(&path, config, &values)?;
        }
        Commands::Read { offset, format } => {
            let path = cli.path.ok_or("Log path required for read")?;
            commands::read::run(&path, config, offset, &format)?;
        }
        Commands::Dump { output } => {
            let path = cli.path.ok_or("Log path required for dump")?;
            commands::dump::run(&path, config, output.as_deref())?;
        }
        Commands::Truncate { lowest } => {
            let path = cli.path.ok_or("Log path required for truncate")?;
            commands::truncate::run(&path, config, lowest)?;
        }
        Commands::Inspect { segments, format } => {
            let path = cli.path.ok_or("Log path required for inspect")?;
            commands::inspect::run(&path, config, segments, &format)?;
        }
        Commands::Version => {
            println!("SegLog CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
