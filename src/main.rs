use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use ecoleta::config::{self, Config};
use ecoleta::core::{ApiClient, CategoryRepository, Coordinate, PermissionStatus};

#[derive(Parser)]
#[command(name = "ecoleta")]
#[command(about = "Find a collection point and pick the waste categories it accepts")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the collection-point API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Answer the location permission prompt with "denied"
    #[arg(long)]
    deny_location: bool,

    /// Simulated device latitude
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Simulated device longitude
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Open the application window (default)
    Gui,
    /// Fetch the category list and print it
    Categories,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load()?,
        };
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if self.deny_location {
            config.location.permission = PermissionStatus::Denied;
        }
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            config.location.position = Some(Coordinate::new(longitude, latitude));
        }
        Ok(config)
    }
}

fn print_categories(config: &Config) -> anyhow::Result<()> {
    let api = ApiClient::new(config.api.base_url.clone())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let categories = runtime
        .block_on(api.get_categories())
        .with_context(|| format!("Failed to fetch categories from {}", api.base_url()))?;

    if categories.is_empty() {
        println!("No categories available.");
    }
    for category in &categories {
        println!("{:>4}  {}  ({})", category.id, category.title, category.image_url);
    }
    Ok(())
}

#[cfg(feature = "gui")]
fn open_window(config: &Config) -> anyhow::Result<()> {
    let state = ecoleta::gui::AppState::from_config(config)?;
    ecoleta::gui::run(state).map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

#[cfg(not(feature = "gui"))]
fn open_window(_config: &Config) -> anyhow::Result<()> {
    anyhow::bail!("This build has no GUI; rebuild with the `gui` feature or use `categories`")
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    ecoleta::logging::init(args.verbose)?;

    let config = args.load_config()?;
    tracing::debug!(api = %config.api.base_url, "Configuration loaded");

    match args.command.unwrap_or(Command::Gui) {
        Command::Gui => open_window(&config),
        Command::Categories => print_categories(&config),
    }
}
