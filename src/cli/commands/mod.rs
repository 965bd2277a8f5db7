pub mod agenda;
pub mod check;
pub mod create;
pub mod del;
pub mod detail;
pub mod init;
pub mod list;
pub mod note;
pub mod payment;
pub mod reschedule;
pub mod stats;
pub mod tag;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::outcome::Outcome;
use crate::db::pool::Db;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

/// Open the configured database with ~ expanded.
pub(crate) fn open_db(cfg: &Config) -> AppResult<Db> {
    let path = expand_tilde(&cfg.database);
    Db::open(&path.to_string_lossy())
}

pub(crate) fn user_of<'a>(cli: &'a Cli, cfg: &'a Config) -> &'a str {
    cli.user.as_deref().unwrap_or(&cfg.default_user)
}

/// Tool boundary: failures are printed, never raised, so a bad phrase or
/// a missing event reads as a message instead of a process error.
pub(crate) fn emit(result: AppResult<Outcome>) {
    let outcome = result.unwrap_or_else(|e| Outcome::Failure(e.to_string()));
    println!("{}", outcome.render());
}
