//! Moving an existing event to a new time.
//! The record being moved is excluded from its own conflict check, and the
//! schedule rows are retimed in the same transaction (the FK cascade
//! deletes rows, it does not retime them).

use crate::core::conflict::{find_conflict, warning_text};
use crate::core::outcome::Outcome;
use crate::core::resolve::resolve_event;
use crate::db::pool::Db;
use crate::db::queries::{update_event_times, update_schedule_times};
use crate::errors::AppResult;
use crate::nlt::parse_natural_time;
use crate::utils::time::fmt_dt;
use chrono::{Duration, NaiveDateTime};

pub fn reschedule(
    db: &mut Db,
    user_id: &str,
    fragment: &str,
    time_phrase: &str,
    now: NaiveDateTime,
) -> AppResult<Outcome> {
    let tx = db.conn.transaction()?;

    let Some(target) = resolve_event(&tx, user_id, fragment)? else {
        return Ok(Outcome::NotFound(format!(
            "No event found matching '{fragment}'."
        )));
    };

    let (start, range_end) = parse_natural_time(time_phrase, now)?;
    let end = range_end.unwrap_or(start + Duration::hours(1));

    let warning =
        find_conflict(&tx, user_id, start, end, Some(target.id))?.map(|c| warning_text(&c));

    update_event_times(&tx, target.id, start, end, &fmt_dt(now))?;
    update_schedule_times(&tx, target.id, start, end)?;
    tx.commit()?;

    Ok(Outcome::success_with_warning(
        format!("Moved '{}' to {}.", target.title, fmt_dt(start)),
        warning,
    ))
}
