//! lightbnb CLI - command-line access to the LightBnB data layer
//!
//! Provides:
//! - Schema setup (`migrate`)
//! - User lookup and registration (`user`)
//! - A guest's reservations (`reservations`)
//! - Filtered property search (`search`)
//! - Listing insertion from JSON (`property`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::PropertyRepo;
use tracing::debug;

mod commands;
mod config;
mod output;
mod tracing_setup;

use config::LightbnbConfig;
use output::Output;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and populate the LightBnB rental listings database"
)]
struct Cli {
    /// PostgreSQL connection URL (overrides DATABASE_URL and the config file)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Config file (default: ~/.lightbnb/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (generated SQL, row counts)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the LightBnB tables if they do not exist
    Migrate,
    /// Look up or register users
    User(commands::user::UserArgs),
    /// List a guest's reservations
    Reservations(commands::reservations::ReservationsArgs),
    /// Search properties by city, owner, price and rating
    Search(commands::search::SearchArgs),
    /// Manage property listings
    Property(commands::property::PropertyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    config::load_dotenv()?;

    let settings = LightbnbConfig::load(cli.config.as_deref())?;
    let db = settings.database_config(cli.database_url.as_deref());
    debug!(url = %db.redacted_url(), "using database");

    let pool = lightbnb_db::connect(&db)
        .await
        .with_context(|| format!("Failed to connect to {}", db.redacted_url()))?;

    let default_limit = settings.search.default_limit;
    let mut out = Output::stdout(cli.json);

    match cli.command {
        Commands::Migrate => commands::run_migrate(&pool, &mut out).await?,
        Commands::User(args) => commands::run_user(args, &pool, &mut out).await?,
        Commands::Reservations(args) => {
            commands::run_reservations(args, default_limit, &pool, &mut out).await?
        }
        Commands::Search(args) => {
            let store = PropertyRepo::new(&pool);
            commands::run_search(args, default_limit, &store, &mut out).await?
        }
        Commands::Property(args) => {
            let store = PropertyRepo::new(&pool);
            commands::run_property(args, &store, &mut out).await?
        }
    }

    pool.close().await;
    Ok(())
}
