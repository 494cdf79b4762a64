//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_config_json, format_config_text, format_scan_result_json, format_scan_result_text,
};
use crate::config::{ConfigLoader, HostConfig};
use crate::error::HostError;
use crate::scan::{path::resolve_root, scan_builds, IgnoreSet};
use crate::server::run_server;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved root and merged configuration.
pub struct RunContext {
    root: PathBuf,
    config: HostConfig,
}

impl RunContext {
    /// Create run context from the served root and optional config path.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, HostError> {
        let root = resolve_root(&root);
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };
        Self::with_config(root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(root: PathBuf, config: HostConfig) -> Result<Self, HostError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            HostError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(Self { root, config })
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, HostError> {
        let start = Instant::now();
        debug!(command = command_name(command), "Executing command");

        let result = match command {
            Commands::Serve {
                host,
                port,
                cors,
                no_wasm_multithreading,
            } => self.handle_serve(host.clone(), *port, *cors, *no_wasm_multithreading),
            Commands::Scan {
                format,
                ignore,
                follow_symlinks,
            } => self.handle_scan(*format, ignore, *follow_symlinks),
            Commands::Config { format } => match format {
                OutputFormat::Text => Ok(format_config_text(&self.config)),
                OutputFormat::Json => format_config_json(&self.config),
            },
        };

        debug!(
            command = command_name(command),
            duration_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Command finished"
        );
        result
    }

    fn handle_scan(
        &self,
        format: OutputFormat,
        ignore: &[String],
        follow_symlinks: bool,
    ) -> Result<String, HostError> {
        let mut options = self.config.scan.to_options();
        if !ignore.is_empty() {
            let overrides = IgnoreSet::new(ignore.iter().cloned());
            overrides.validate()?;
            options.ignore = overrides;
        }
        if follow_symlinks {
            options.follow_symlinks = true;
        }

        let builds = scan_builds(&self.root, &options);
        match format {
            OutputFormat::Text => Ok(format_scan_result_text(&builds)),
            OutputFormat::Json => format_scan_result_json(&builds),
        }
    }

    fn handle_serve(
        &self,
        host: Option<String>,
        port: Option<u16>,
        cors: bool,
        no_wasm_multithreading: bool,
    ) -> Result<String, HostError> {
        let mut server = self.config.server.clone();
        if let Some(host) = host {
            server.host = host;
        }
        if let Some(port) = port {
            server.port = port;
        }
        if cors {
            server.cors = true;
        }
        if no_wasm_multithreading {
            server.wasm_multithreading = false;
        }
        server.validate().map_err(HostError::ConfigError)?;
        if !self.root.is_dir() {
            return Err(HostError::InvalidPath(format!(
                "Root is not a directory: {}",
                self.root.display()
            )));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        info!(root = %self.root.display(), "Starting server");
        runtime.block_on(run_server(
            self.root.clone(),
            &server,
            self.config.scan.to_options(),
        ))?;
        Ok("Server stopped.".to_string())
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Serve { .. } => "serve",
        Commands::Scan { .. } => "scan",
        Commands::Config { .. } => "config",
    }
}
