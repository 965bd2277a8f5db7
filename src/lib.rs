//! skedule library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! internal modules (storage, natural-language times, composition,
//! payment gateway).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod nlt;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Create { .. } => cli::commands::create::handle(cli, cfg),
        Commands::Reschedule { .. } => cli::commands::reschedule::handle(cli, cfg),
        Commands::Note { .. } => cli::commands::note::handle(cli, cfg),
        Commands::Delete { .. } => cli::commands::del::handle(cli, cfg),
        Commands::Check { .. } => cli::commands::check::handle(cli, cfg),
        Commands::Tag { .. } => cli::commands::tag::handle(cli, cfg),
        Commands::List { .. } => cli::commands::list::handle(cli, cfg),
        Commands::Detail { .. } => cli::commands::detail::handle(cli, cfg),
        Commands::Agenda { .. } => cli::commands::agenda::handle(cli, cfg),
        Commands::Stats => cli::commands::stats::handle(cli, cfg),
        Commands::Payment { .. } => cli::commands::payment::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // command-line DB override wins over the config file
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
