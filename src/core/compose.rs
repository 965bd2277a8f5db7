//! Event/task/schedule composer.
//! One user intent becomes one atomic multi-table write:
//!   1. parse the natural-language time phrases
//!   2. derive missing bounds (end = start + 1h, deadline = end or start)
//!   3. screen for conflicts (advisory, non-deadline kinds only)
//!   4. insert event + optional task + optional schedule in one transaction
//!   5. report a single outcome string
//! Any failure after step 3 rolls back everything, including the event row.

use crate::core::conflict::{find_conflict, warning_text};
use crate::core::outcome::Outcome;
use crate::db::pool::Db;
use crate::db::queries::{insert_event, insert_schedule, insert_task};
use crate::errors::AppResult;
use crate::models::event_kind::EventKind;
use crate::models::task::Priority;
use crate::nlt::parse_natural_time;
use crate::utils::time::fmt_dt;
use chrono::{Duration, NaiveDateTime};

/// One user intent, as delivered by the orchestration layer.
#[derive(Debug, Clone)]
pub struct EventIntent {
    pub user_id: String,
    pub title: String,
    pub kind: EventKind,
    pub description: Option<String>,
    pub start_phrase: Option<String>,
    pub end_phrase: Option<String>,
    pub priority_word: Option<String>,
}

pub fn compose(db: &mut Db, intent: &EventIntent, now: NaiveDateTime) -> AppResult<Outcome> {
    let mut start_dt: Option<NaiveDateTime> = None;
    let mut end_dt: Option<NaiveDateTime> = None;

    // 1. Parse temporals. An absent phrase is skipped; an unparseable one
    //    fails the whole intent before anything is written.
    if let Some(phrase) = present(&intent.start_phrase) {
        let (start, range_end) = parse_natural_time(phrase, now)?;
        start_dt = Some(start);
        end_dt = range_end;
    }
    if let Some(phrase) = present(&intent.end_phrase) {
        let anchor = start_dt.unwrap_or(now);
        let (point, range_end) = parse_natural_time(phrase, anchor)?;
        end_dt = Some(range_end.unwrap_or(point));
    }

    // 2. Derive missing bounds. Deadlines may stay open-ended.
    if let Some(start) = start_dt
        && end_dt.is_none()
        && !intent.kind.is_deadline()
    {
        end_dt = Some(start + Duration::hours(1));
    }

    let priority = intent
        .priority_word
        .as_deref()
        .map(Priority::from_word)
        .unwrap_or(Priority::Medium);

    let tx = db.conn.transaction()?;

    // 3. Conflict screening, advisory only.
    let mut warning = None;
    if !intent.kind.is_deadline()
        && let (Some(start), Some(end)) = (start_dt, end_dt)
        && let Some(conflict) = find_conflict(&tx, &intent.user_id, start, end, None)?
    {
        warning = Some(warning_text(&conflict));
    }

    // 4. Atomic write.
    let now_iso = fmt_dt(now);
    let event_id = insert_event(
        &tx,
        &intent.user_id,
        &intent.title,
        intent.description.as_deref(),
        intent.kind,
        start_dt,
        end_dt,
        &now_iso,
    )?;

    let mut task_id = None;
    if intent.kind.wants_task() {
        let deadline = end_dt.or(start_dt);
        task_id = Some(insert_task(
            &tx,
            &intent.user_id,
            event_id,
            &intent.title,
            intent.description.as_deref(),
            deadline,
            priority.to_db_str(),
            &now_iso,
        )?);
    }

    if let Some(start) = start_dt
        && !intent.kind.is_deadline()
    {
        insert_schedule(&tx, &intent.user_id, event_id, task_id, start, end_dt)?;
    }

    tx.commit()?;

    // 5. Report.
    let when = match (start_dt, end_dt) {
        (Some(s), Some(e)) => format!(" ({} -> {})", fmt_dt(s), fmt_dt(e)),
        (Some(s), None) => format!(" ({})", fmt_dt(s)),
        (None, Some(e)) => format!(" (due {})", fmt_dt(e)),
        (None, None) => String::new(),
    };
    let message = format!(
        "Created {} '{}'{} [priority: {}]",
        intent.kind.to_db_str(),
        intent.title,
        when,
        priority.to_db_str()
    );
    Ok(Outcome::success_with_warning(message, warning))
}

fn present(phrase: &Option<String>) -> Option<&str> {
    phrase.as_deref().map(str::trim).filter(|p| !p.is_empty())
}
