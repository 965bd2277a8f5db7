use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::annotate::add_checklist_item;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Check { title, item } = &cli.command {
        let mut db = open_db(cfg)?;
        emit(add_checklist_item(
            &mut db,
            user_of(cli, cfg),
            title,
            item,
        ));
    }
    Ok(())
}
