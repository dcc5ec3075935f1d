mod logging;
mod menu;
mod output;
mod prompts;
mod render;
mod selection;

use clap::{ArgAction, Parser};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use movie_library_config::{Config, PathManager};
use movie_library_provider::ImdbClient;
use movie_library_store::MovieStore;
use output::Output;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "reelvault")]
#[command(about = "Track your personal movie library from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the movie database (defaults to the per-user data directory)
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize logging: {}", e))?;
    let output = Output::new(cli.quiet);

    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to prepare config directories: {}", e))?;
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;

    let database_path = cli.database.unwrap_or_else(|| paths.database_file());
    let store = MovieStore::open(&database_path)
        .await
        .wrap_err("Failed to open the movie database")?;
    let provider = ImdbClient::new(
        config.provider.base_url.as_str(),
        Duration::from_secs(config.provider.timeout_secs),
    );

    // Ctrl-C releases the database connection before exiting.
    let interrupt_store = store.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted");
            interrupt_store.close().await;
            std::process::exit(1);
        }
    });

    menu::run(&store, &provider, &config.search, &output).await?;

    store.close().await;
    Ok(())
}
