// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "galley")]
#[command(author, version, about = "In-memory cookbook server with recipe resolution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the cookbook over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Bind address (overrides the configuration file)
        #[arg(short, long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// Normalize a handwritten name and print it
    Parse {
        /// Name to normalize
        input: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "server")]
        Some(Commands::Serve { config, bind }) => {
            let file_config = match config {
                Some(path) => {
                    info!("Loading configuration from {}", path.display());
                    galley::server::GalleyConfig::load(&path)?
                }
                None => galley::server::GalleyConfig::default(),
            };
            let mut server_config = file_config.to_server_config()?;
            if let Some(bind) = bind {
                server_config.bind_addr = bind;
            }

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(galley::server::run_server(server_config))
        }
        Some(Commands::Parse { input }) => {
            let name = galley::normalize_name(&input)?;
            println!("{}", name);
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("Galley v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'galley --help' for usage information");
            Ok(())
        }
    }
}
