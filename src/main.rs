use anyhow::{Context, Result};
use status_saver::{AppConfig, CopyReport, SessionError, StatusSession, StorageLocations};
use std::env;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

// Headless host harness: exercises the two triggers (scan, copy selected)
// against the environment-resolved folders, standing in for the UI shell.
#[tokio::main]
async fn main() -> Result<()> {
    let config = create_app_config();

    // Initialize logging
    initialize_logging(&config.log_level)?;

    // Load environment variables
    load_environment_variables();

    // Run the application
    run_application(config).await
}

/// Pure function to create application configuration from the environment
fn create_app_config() -> AppConfig {
    let log_level = env::var("STATUS_SAVER_LOG").unwrap_or_else(|_| "info".to_string());

    AppConfig {
        log_level,
        ..AppConfig::default()
    }
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Load .env variables if present
fn load_environment_variables() {
    if dotenvy::dotenv().is_err() {
        info!("No .env file found, using system environment variables");
    }
}

/// Main application logic: scan, select everything, copy, report
async fn run_application(config: AppConfig) -> Result<()> {
    info!("Starting WhatsApp status saver");

    let locations = StorageLocations::from_env()?;
    info!("Status folder: {}", locations.status_dir.display());
    info!("Download folder: {}", locations.download_dir.display());

    let mut session = StatusSession::new(locations, config);

    match session.refresh() {
        Ok(items) => info!("Found {} status files", items.len()),
        Err(SessionError::NoFilesFound { path }) => {
            info!("No status files found in {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    print_status_listing(&session);

    session.select_all();
    let completion = session.start_copy()?;
    let report = completion
        .await
        .context("Copy worker dropped without reporting")??;

    print_copy_report(&report);

    // Machine-readable completion line for host tooling
    println!("{}", serde_json::to_string(&report)?);

    Ok(())
}

/// Print the discovered status files
fn print_status_listing(session: &StatusSession) {
    for item in session.items() {
        info!(
            "  {:>10} bytes  {:<7} {}",
            item.size_bytes, item.kind, item.file_name
        );
    }
}

/// Print the copy report in a functional manner
fn print_copy_report(report: &CopyReport) {
    info!("=== COPY REPORT ===");
    info!("Batch id: {}", report.batch_id);
    info!("Files copied: {}", report.succeeded);
    info!("Copy failures: {}", report.failed.len());
    info!("Success rate: {:.2}%", report.success_rate() * 100.0);

    if !report.failed.is_empty() {
        error!("Copy failures encountered:");
        for failure in &report.failed {
            error!("  {}: {}", failure.file_name, failure.reason);
        }
    }
}
