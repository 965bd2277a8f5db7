use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::query;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Agenda { from } = &cli.command {
        let now = cli.reference_now()?;
        let db = open_db(cfg)?;
        emit(query::agenda(&db, user_of(cli, cfg), from.as_deref(), now));
    }
    Ok(())
}
