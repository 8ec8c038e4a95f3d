//! Pet growth calculator command-line client.
//!
//! Composition root: reads configuration from the environment (and `.env`),
//! applies command-line overrides, loads the catalog, builds the runtime and
//! dispatches one subcommand.
//!
//! ```bash
//! petcalc list --chosung ㄱㄷ
//! petcalc calc 가디언 --obs 10 1 1 1
//! petcalc enumerate --k 60 --u 0 0 0 0 --obs 9 2 2 1 --json
//! ```

mod commands;
mod config;
mod logging;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser};
use runtime::{CatalogLoader, Runtime, RuntimeConfig, TableSource};

use commands::{Calc, Enumerate, Infer, List, Session, Show};
use config::ClientConfig;

/// Pet growth calculator
#[derive(Parser)]
#[command(name = "petcalc")]
#[command(about = "Count modifier tuples behind observed pet stats", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the environment configuration.
#[derive(Args)]
struct GlobalArgs {
    /// Pet table (JSON or RON)
    #[arg(long, global = true, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Guaranteed rank-8 table (JSON or RON)
    #[arg(long, global = true, value_name = "FILE")]
    rank8: Option<PathBuf>,

    /// Table cache directory
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Calculator settings (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Decimal significant digits
    #[arg(long, global = true)]
    precision: Option<u64>,

    /// Population used for the appearance rate
    #[arg(long, global = true)]
    total_population: Option<u64>,
}

impl GlobalArgs {
    fn apply(self, config: &mut ClientConfig) {
        if let Some(table) = self.table {
            config.table_path = table;
        }
        if let Some(rank8) = self.rank8 {
            config.rank8_path = Some(rank8);
        }
        if self.cache_dir.is_some() {
            config.cache_dir = self.cache_dir;
        }
        if self.config.is_some() {
            config.config_path = self.config;
        }
        if self.precision.is_some() {
            config.precision = self.precision;
        }
        if self.total_population.is_some() {
            config.total_population = self.total_population;
        }
    }
}

#[derive(Parser)]
enum Command {
    /// List pet names
    List(List),

    /// Show a pet's stored record
    Show(Show),

    /// Resolve a pet's growth parameters
    Infer(Infer),

    /// Calculate for a named pet
    Calc(Calc),

    /// Enumerate with explicit parameters
    Enumerate(Enumerate),
}

impl Command {
    async fn execute(self, session: &mut Session) -> Result<()> {
        match self {
            Command::List(cmd) => cmd.execute(session).await,
            Command::Show(cmd) => cmd.execute(session).await,
            Command::Infer(cmd) => cmd.execute(session).await,
            Command::Calc(cmd) => cmd.execute(session).await,
            Command::Enumerate(cmd) => cmd.execute(session).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    cli.global.apply(&mut config);

    logging::setup_logging(config.log_dir.as_deref())?;
    let calc = config.calc_config()?;

    let mut loader = CatalogLoader::new(config.table_path.clone());
    if let Some(rank8) = config.rank8_path() {
        loader = loader.rank8(rank8);
    }
    if let Some(dir) = &config.cache_dir {
        loader = loader.cache_dir(dir);
    }
    let loaded = loader.load();
    if loaded.pets_source == TableSource::Empty {
        tracing::warn!(
            "No pet table at {}; only `enumerate` is usable",
            config.table_path.display()
        );
    }

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            calc,
            ..RuntimeConfig::default()
        })
        .catalog(loaded.catalog)
        .build()
        .await?;

    let mut session = Session::new(runtime.handle());
    let outcome = cli.command.execute(&mut session).await;

    drop(session);
    runtime.shutdown().await?;
    outcome
}
