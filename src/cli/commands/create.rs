use crate::cli::commands::{emit, open_db, user_of};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::compose::{EventIntent, compose};
use crate::errors::{AppError, AppResult};
use crate::models::event_kind::EventKind;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Create {
        title,
        kind,
        description,
        start,
        end,
        priority,
    } = &cli.command
    {
        let now = cli.reference_now()?;
        let mut db = open_db(cfg)?;

        let intent = match EventKind::from_user_str(kind) {
            Some(k) => EventIntent {
                user_id: user_of(cli, cfg).to_string(),
                title: title.clone(),
                kind: k,
                description: description.clone(),
                start_phrase: start.clone(),
                end_phrase: end.clone(),
                priority_word: priority.clone(),
            },
            None => {
                emit(Err(AppError::InvalidEventKind(kind.clone())));
                return Ok(());
            }
        };

        emit(compose(&mut db, &intent, now));
    }
    Ok(())
}
