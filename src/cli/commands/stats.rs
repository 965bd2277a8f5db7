use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::query;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let now = cli.reference_now()?;
    let db = open_db(cfg)?;
    emit(query::stats(&db, user_of(cli, cfg), now));
    Ok(())
}
