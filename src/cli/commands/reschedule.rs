use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::reschedule::reschedule;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Reschedule { title, to } = &cli.command {
        let now = cli.reference_now()?;
        let mut db = open_db(cfg)?;
        emit(reschedule(&mut db, user_of(cli, cfg), title, to, now));
    }
    Ok(())
}
