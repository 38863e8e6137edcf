//! # OrbitX CLI (`orbitx`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `orbitx init` | Create the SQLite database and tables |
//! | `orbitx serve` | Load the exoplanet catalog and start the HTTP API |
//! | `orbitx query` | Load the catalog and print a filtered page |
//!
//! ## Examples
//!
//! ```bash
//! orbitx init --config ./config/orbitx.toml
//! orbitx serve --config ./config/orbitx.toml
//! orbitx query --max-dist 50 --max-size 1.5
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use orbitx::{catalog_cmd, config, migrate, server};

/// OrbitX backend: exoplanet catalog, satellite tracking, accounts and
/// bookmarks over a JSON HTTP API.
#[derive(Parser)]
#[command(name = "orbitx", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/orbitx.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `users` and `bookmarks`
    /// tables. Running it again is safe.
    Init,

    /// Start the HTTP API server.
    ///
    /// The exoplanet catalog is fetched (or the offline backup loaded)
    /// before the server starts accepting connections.
    Serve,

    /// Load the catalog and print the planets within the given bounds.
    Query {
        /// Maximum distance in light years (default from config, 10000).
        #[arg(long)]
        max_dist: Option<String>,

        /// Maximum radius in Earth radii (default from config, 100).
        #[arg(long)]
        max_size: Option<String>,

        /// Maximum number of rows to print.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    init_logging(&cfg.log.level);

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Query {
            max_dist,
            max_size,
            limit,
        } => {
            catalog_cmd::run_query(&cfg, max_dist, max_size, limit).await?;
        }
    }

    Ok(())
}
