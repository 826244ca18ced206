//! CLI command implementations
//!
//! Every command resolves the effective configuration first and sets the
//! log level from it. `process` and `batch` run the engine in-process with
//! the configured default license.

use std::path::Path;

use crate::config::ServiceConfig;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Logger, ServiceEvent};
use crate::reasoning::{process_batch, Event, ReasoningOrchestrator};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Process { config } => process(config.as_deref()),
        Command::Batch { config } => batch(config.as_deref()),
        Command::Config { config } => show_config(config.as_deref()),
    }
}

/// Resolve configuration and apply its log level
pub fn load_config(path: Option<&Path>) -> CliResult<ServiceConfig> {
    let config = match ServiceConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(ServiceEvent::ConfigInvalid, &[("error", reason.as_str())]);
            return Err(CliError::from(e));
        }
    };

    Logger::set_level(config.severity());
    let port = config.api_port.to_string();
    log_event_with_fields(
        ServiceEvent::ConfigLoaded,
        &[("api_host", config.api_host.as_str()), ("api_port", port.as_str())],
    );
    Ok(config)
}

/// Start the HTTP API and block until shutdown
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(ServiceEvent::BootStart);

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.api_port = port;
    }

    let server = HttpServer::from_service_config(&config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Process one event from stdin
pub fn process(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let engine = ReasoningOrchestrator::new(config.default_license.to_license());

    let event: Event = read_request()?;
    let result = engine.process(&event)?;
    write_response(&result)
}

/// Process a JSON array of events from stdin
pub fn batch(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let engine = ReasoningOrchestrator::new(config.default_license.to_license());

    let events: Vec<Event> = read_request()?;
    let results = process_batch(&engine, &events)?;

    let count = results.len().to_string();
    log_event_with_fields(ServiceEvent::BatchProcessed, &[("size", count.as_str())]);
    write_response(&results)
}

/// Print the effective configuration
pub fn show_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    write_response(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_port": 9001, "log_level": "WARNING"}}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api_port, 9001);
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let err = load_config(Some(Path::new("/nonexistent/deepreason.json"))).unwrap_err();
        assert_eq!(err.code_str(), "DEEPREASON_CLI_CONFIG_ERROR");
    }
}
