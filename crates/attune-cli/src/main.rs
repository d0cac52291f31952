use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "attune", version, about = "Attune adaptive soundscape CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the soundscape catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Print the current biometric snapshot and recommended category
    Recommend,
    /// Play an adaptive soundscape until Ctrl-C
    Play {
        /// Category id (e.g. focus, relax, sleep, activity)
        category_id: String,
        /// Playback volume, 0.0-1.0
        #[arg(long)]
        volume: Option<f32>,
    },
    /// Run a guided scenario session to completion
    Scenario {
        /// Scenario id (e.g. deep-work, wind-down)
        scenario_id: String,
        /// Playback volume, 0.0-1.0
        #[arg(long)]
        volume: Option<f32>,
    },
    /// Print an engine status snapshot as JSON
    Status,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Recommend => commands::recommend::run(),
        Commands::Play {
            category_id,
            volume,
        } => commands::session::run_soundscape(&category_id, volume),
        Commands::Scenario {
            scenario_id,
            volume,
        } => commands::session::run_scenario(&scenario_id, volume),
        Commands::Status => commands::session::print_status(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
