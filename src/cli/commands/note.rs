use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::note::create_note;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Note { content, about } = &cli.command {
        let now = cli.reference_now()?;
        let mut db = open_db(cfg)?;
        emit(create_note(
            &mut db,
            user_of(cli, cfg),
            content,
            about.as_deref(),
            now,
        ));
    }
    Ok(())
}
