//! CLI parse: clap types for webgl-host. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// webgl-host - Serve Unity WebGL builds with the headers they need
#[derive(Parser)]
#[command(name = "webgl-host")]
#[command(about = "Discover and serve precompiled Unity WebGL builds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory to serve and scan for builds
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the build index and build files over HTTP
    Serve {
        /// Host to bind (default: localhost)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (default: 8080)
        #[arg(long)]
        port: Option<u16>,
        /// Send Access-Control-Allow-Origin: *
        #[arg(long)]
        cors: bool,
        /// Do not send cross-origin isolation headers
        #[arg(long)]
        no_wasm_multithreading: bool,
    },
    /// Scan the root for builds and print them
    Scan {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Ignore pattern; repeat to replace the default ignore set
        #[arg(long = "ignore", value_name = "PATTERN")]
        ignore: Vec<String>,
        /// Follow symbolic links while walking and sizing
        #[arg(long)]
        follow_symlinks: bool,
    },
    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
