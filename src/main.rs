use anyhow::Result;
use clap::{Parser, Subcommand};

/// yummio - recipes, collections and shopping lists
#[derive(Parser)]
#[command(name = "yummio")]
#[command(about = "Recipe management API server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = yummio::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    yummio::observability::init_observability(
        "yummio",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => yummio::cli::serve(config, host, port).await,
        Commands::Migrate => yummio::cli::migrate(&config).await,
        Commands::Reset => yummio::cli::reset(&config).await,
    }
}
