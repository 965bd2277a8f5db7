use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::remove::remove_event;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Delete { title } = &cli.command {
        let mut db = open_db(cfg)?;
        emit(remove_event(&mut db, user_of(cli, cfg), title));
    }
    Ok(())
}
