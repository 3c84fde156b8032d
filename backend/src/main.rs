//! SongSplit CLI - load and inspect startup settings
//!
//! # Commands
//!
//! ```bash
//! songsplit check                      # Validate settings, exit 1 on error
//! songsplit show                       # Print validated settings as JSON
//! songsplit defaults                   # Print default application settings
//! songsplit --config app.json check    # Apply a JSON overrides file first
//! ```
//!
//! Backend values come from `BACKEND_URL`, `BACKEND_API_KEY` and `DEBUG`
//! (a `.env` file in the working directory is loaded first).

use clap::{Parser, Subcommand};
use songsplit::settings::{parse_flag, ENV_DEBUG};
use songsplit::{logging, ApplicationSettings, Settings, SettingsProvider};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "songsplit")]
#[command(about = "Load and validate SongSplit settings", long_about = None)]
struct Cli {
    /// JSON file overriding application settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate settings and print a summary
    Check,

    /// Print validated settings as JSON (API key masked)
    Show {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print default application settings as JSON
    Defaults,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Defaults => cmd_defaults(),
        command => run_with_settings(cli.config.as_deref(), command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_with_settings(
    config: Option<&Path>,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    // Subscriber first, so warnings raised while reading sources are kept.
    let debug = std::env::var(ENV_DEBUG)
        .ok()
        .and_then(|raw| parse_flag(&raw))
        .unwrap_or(false);
    logging::init(debug);

    let provider = SettingsProvider::from_env(config)?;
    let settings = provider.get()?;

    match command {
        Commands::Check => cmd_check(settings),
        Commands::Show { output } => cmd_show(settings, output.as_deref()),
        Commands::Defaults => cmd_defaults(),
    }
}

fn cmd_check(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let backend = settings.backend();
    let app = settings.app();

    eprintln!("Settings valid");
    eprintln!("   Backend: {}", backend.endpoint_url());
    eprintln!(
        "   API key: {}{}",
        backend.public_api_key(),
        backend
            .public_api_key()
            .jwt_role()
            .map(|role| format!(" (role: {})", role))
            .unwrap_or_default()
    );
    eprintln!("   Debug logging: {}", backend.debug_logging_enabled());
    eprintln!("   Version: {}", app.version);
    eprintln!("   Cache namespace: {}", app.cache_namespace);
    eprintln!(
        "   Contributors: up to {}, creator starts at {}%",
        app.max_contributors_per_session, app.default_creator_ownership_percent
    );
    eprintln!("   Roles: {}", app.contributor_roles.join(", "));
    eprintln!("   Rights: {}", app.rights_types.join(", "));
    eprintln!("   PROs: {}", app.pro_affiliations.join(", "));
    for (key, name) in app.storage_key_names.iter() {
        eprintln!("   Storage {}: {}", key.logical_name(), name);
    }
    Ok(())
}

fn cmd_show(settings: &Settings, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(settings)?;
    write_output(&json, output)
}

fn cmd_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&ApplicationSettings::default())?;
    println!("{}", json);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
