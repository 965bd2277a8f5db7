use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::annotate::tag_task;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Tag { title, name } = &cli.command {
        let mut db = open_db(cfg)?;
        emit(tag_task(&mut db, user_of(cli, cfg), title, name));
    }
    Ok(())
}
