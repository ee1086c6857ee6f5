use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use audio_endpoint_reconciler::config::{Config, ConfigLoader};
use audio_endpoint_reconciler::endpoint::{Direction, EndpointResolver};
use audio_endpoint_reconciler::logging::{self, LoggingConfig};
use audio_endpoint_reconciler::preference::PreferenceStore;
use audio_endpoint_reconciler::service::ReconcilerService;
use audio_endpoint_reconciler::system::{
    DefaultAudioSystem, DefaultPreferenceStore, StandardFileSystem,
};

#[derive(Parser)]
#[command(name = "audio-endpoint-reconciler")]
#[command(about = "Checks the Windows default audio endpoints and reconciles a dependent application's device preference")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one endpoint check (the default when no command is given)
    Check,
    /// Show current default endpoints
    ShowDefault,
    /// Show the application's stored device preference
    ShowPreference,
    /// Validate configuration file
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Scheduled entry point. Failures are logged and swallowed so the
        // task scheduler always observes exit code 0 from a check run.
        Some(Commands::Check) | None => {
            run_check(cli.verbose, cli.config.as_deref());
            Ok(())
        }
        Some(command) => run_diagnostic(command, cli.verbose, cli.config.as_deref()),
    }
}

/// One complete scheduled check. Never propagates an error.
fn run_check(verbose: bool, config_path: Option<&str>) {
    let loaded = production_loader(config_path).and_then(|loader| loader.load_config());

    // Logging must come up even when the configuration cannot be read, so a
    // failed load falls back to default settings for the logging setup.
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let logging_config = LoggingConfig::from_general(&config.general, verbose);
    let (_guard, log_dir) = match logging::initialize_logging(logging_config) {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("Failed to initialize logging, continuing without log output: {e:#}");
            (None, None)
        }
    };

    info!("Starting audio endpoint reconciler");

    if let Some(e) = config_error {
        error!("Failed to load configuration: {e:#}");
        info!("Endpoint check skipped");
        return;
    }

    if let Some(dir) = &log_dir {
        if let Err(e) = logging::cleanup_old_logs(dir, config.general.keep_log_days) {
            warn!("Log cleanup failed: {}", e);
        }
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e:#}");
        info!("Endpoint check skipped");
        return;
    }

    match ReconcilerService::new_production(config) {
        Ok(service) => match service.execute() {
            Ok(report) => info!("Endpoint check finished: {}", report.outcome),
            Err(e) => error!("Endpoint check failed: {e:#}"),
        },
        Err(e) => error!("Failed to initialize endpoint check: {e:#}"),
    }
}

/// Interactive commands keep normal error propagation and exit codes
fn run_diagnostic(command: Commands, verbose: bool, config_path: Option<&str>) -> Result<()> {
    let loader = production_loader(config_path)?;
    let config = loader.load_config()?;

    let logging_config = LoggingConfig::from_general(&config.general, verbose);
    let (_guard, _log_dir) = logging::initialize_logging(logging_config)?;

    info!("Starting audio endpoint reconciler");

    match command {
        Commands::ShowDefault => show_default_endpoints(),
        Commands::ShowPreference => show_preference(&config),
        Commands::CheckConfig => check_config(&config, &loader),
        // Check runs are dispatched in main before diagnostics.
        Commands::Check => Ok(()),
    }
}

fn production_loader(config_path: Option<&str>) -> Result<ConfigLoader<StandardFileSystem>> {
    match config_path {
        Some(path) => Ok(ConfigLoader::new_production(PathBuf::from(path))),
        None => ConfigLoader::new_with_default_path(),
    }
}

fn show_default_endpoints() -> Result<()> {
    info!("Showing current default endpoints");

    let audio_system = DefaultAudioSystem::new()?;
    let resolver = EndpointResolver::new(audio_system);

    println!("Current default endpoints:");

    match resolver.default_endpoint(Direction::Render) {
        Ok(endpoint) => println!("  Render:  {}", endpoint),
        Err(e) => println!("  Render:  unavailable ({})", e),
    }

    match resolver.default_endpoint(Direction::Capture) {
        Ok(endpoint) => println!("  Capture: {}", endpoint),
        Err(e) => println!("  Capture: unavailable ({})", e),
    }

    Ok(())
}

fn show_preference(config: &Config) -> Result<()> {
    info!("Showing application device preference");

    let store = PreferenceStore::new(DefaultPreferenceStore::new(
        &config.preference.registry_subkey,
    ));

    println!("Application preference ({}):", config.preference.registry_subkey);

    match store.read()? {
        Some(preference) => {
            println!(
                "  ActiveRealRecordingDevice:  '{}'",
                preference.active_input_device
            );
            println!(
                "  PreferredWaveInDeviceName:  '{}'",
                preference.preferred_input_name
            );
            println!(
                "  ActivePlaybackDevice:       '{}'",
                preference.active_output_device
            );
            println!(
                "  PreferredWaveOutDeviceName: '{}'",
                preference.preferred_output_name
            );
        }
        None => println!("  Not present (application has never stored a device preference)"),
    }

    Ok(())
}

fn check_config(config: &Config, loader: &ConfigLoader<StandardFileSystem>) -> Result<()> {
    info!("Validating configuration");

    println!("Configuration validation:");
    println!(
        "  ✓ Configuration file: {}",
        loader.get_config_path().display()
    );

    config.validate()?;

    println!(
        "  ✓ Device pattern: '{}'",
        config.detection.device_pattern
    );
    println!(
        "  ✓ Detection: {} attempts, {} ms interval",
        config.detection.max_attempts, config.detection.poll_interval_ms
    );
    println!(
        "  ✓ Preference subkey: {}",
        config.preference.registry_subkey
    );
    println!(
        "  ✓ Dialogs: {}",
        if config.notifications.interactive {
            "interactive"
        } else {
            "suppressed"
        }
    );

    Ok(())
}
