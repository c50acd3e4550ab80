//! Sensor Console Dashboard - CLI entry point
//!
//! This binary provides the command-line interface for the sensor console:
//! running the TUI dashboard, managing the configuration file, and
//! inspecting or resetting the persisted widget layout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use sensor_console::config::{xdg, ConfigLoader};
use sensor_console::layout::LayoutEngine;
use sensor_console::store::{keys, PrefStore};
use sensor_console::tui::app::App;
use sensor_console::widgets::DEFAULT_WIDGET_ORDER;
use sensor_console::{config, logging};

/// Sensor Console Dashboard
#[derive(Parser)]
#[command(name = "scd")]
#[command(version, about = "Terminal dashboard for a simulated IoT sensor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the scd CLI
#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard TUI
    Tui {
        /// Path to a configuration file (defaults to the XDG config path)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Inspect or reset the persisted widget layout
    Layout {
        #[command(subcommand)]
        command: LayoutCommands,
    },
}

/// Configuration file management subcommands
#[derive(Subcommand)]
enum ConfigCommands {
    /// Create a default configuration file
    Init {
        /// Overwrite an existing file (the old file is backed up)
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
    /// Check that the configuration file parses
    Validate {
        /// Path to a configuration file (defaults to the XDG config path)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Layout record subcommands
#[derive(Subcommand)]
enum LayoutCommands {
    /// Print the persisted widget order
    Show,
    /// Remove the persisted layout record, restoring the default order
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tui { config } => run_tui(config).await,
        Commands::Config { command } => run_config(command),
        Commands::Layout { command } => run_layout(command),
    }
}

/// Loads config, sets up logging, and runs the dashboard until exit.
async fn run_tui(config_path: Option<PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log);

    let store = PrefStore::open(xdg::prefs_path());
    let mut app = App::new(config, store);
    match app.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Handles `scd config` subcommands.
fn run_config(command: ConfigCommands) -> ExitCode {
    match command {
        ConfigCommands::Init { force } => match config::default::create_default_config(force) {
            Ok(path) => {
                println!("Created {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        ConfigCommands::Path => {
            println!("{}", xdg::config_path().display());
            ExitCode::SUCCESS
        }
        ConfigCommands::Validate { config } => match load_config(config) {
            Ok(_) => {
                println!("OK");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Handles `scd layout` subcommands.
fn run_layout(command: LayoutCommands) -> ExitCode {
    match command {
        LayoutCommands::Show => {
            let store = PrefStore::open(xdg::prefs_path());
            let mut engine = LayoutEngine::new(DEFAULT_WIDGET_ORDER.iter().copied());
            engine.restore_layout(&store);
            for id in engine.order() {
                println!("{id}");
            }
            ExitCode::SUCCESS
        }
        LayoutCommands::Reset => {
            let mut store = PrefStore::open(xdg::prefs_path());
            if store.remove(keys::DASHBOARD_LAYOUT).is_none() {
                println!("No layout record to reset");
                return ExitCode::SUCCESS;
            }
            match store.save() {
                Ok(()) => {
                    println!("Layout reset to default order");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Loads configuration from an explicit path or the default location.
fn load_config(
    path: Option<PathBuf>,
) -> Result<config::schema::Config, config::error::ConfigError> {
    match path {
        Some(path) => ConfigLoader::load_from_path(&path),
        None => ConfigLoader::load_default(),
    }
}
