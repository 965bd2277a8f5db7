use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::query;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List { kind, limit, json } = &cli.command {
        let db = open_db(cfg)?;
        emit(query::list(
            &db,
            user_of(cli, cfg),
            kind.as_deref(),
            *limit,
            *json,
        ));
    }
    Ok(())
}
