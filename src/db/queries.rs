//! Row-level SQL for the scheduling tables.
//! Business rules (defaults, conflict policy, tier ranking) live in
//! `core`; this module only moves rows in and out of SQLite.

use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::event_kind::EventKind;
use crate::models::note::Note;
use crate::models::subscription::{Plan, Subscription};
use crate::utils::time::{fmt_dt, parse_dt};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_event_row(row: &Row) -> Result<Event> {
    let kind_str: String = row.get("type")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid event type: {kind_str}").into(),
        )
    })?;

    Ok(Event {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        kind,
        start_time: row
            .get::<_, Option<String>>("start_time")?
            .as_deref()
            .and_then(parse_dt),
        end_time: row
            .get::<_, Option<String>>("end_time")?
            .as_deref()
            .and_then(parse_dt),
        created_at: row.get("created_at")?,
    })
}

// ---------------------------------------------------------------
// Events
// ---------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
pub fn insert_event(
    conn: &Connection,
    user_id: &str,
    title: &str,
    description: Option<&str>,
    kind: EventKind,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    now_iso: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (user_id, title, description, type, start_time, end_time, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            user_id,
            title,
            description,
            kind.to_db_str(),
            start.map(fmt_dt),
            end.map(fmt_dt),
            now_iso,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_event(conn: &Connection, id: i64) -> AppResult<Option<Event>> {
    let ev = conn
        .prepare("SELECT * FROM events WHERE id = ?1")?
        .query_row([id], map_event_row)
        .optional()?;
    Ok(ev)
}

pub fn update_event_times(
    conn: &Connection,
    id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
    now_iso: &str,
) -> AppResult<()> {
    conn.execute(
        "UPDATE events SET start_time = ?2, end_time = ?3, updated_at = ?4 WHERE id = ?1",
        params![id, fmt_dt(start), fmt_dt(end), now_iso],
    )?;
    Ok(())
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn list_events(
    conn: &Connection,
    user_id: &str,
    kind: Option<EventKind>,
    limit: i64,
) -> AppResult<Vec<Event>> {
    // start_time is nullable; untimed items sort last
    let mut out = Vec::new();
    match kind {
        Some(k) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM events WHERE user_id = ?1 AND type = ?2
                 ORDER BY start_time IS NULL, start_time ASC LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![user_id, k.to_db_str(), limit], map_event_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM events WHERE user_id = ?1
                 ORDER BY start_time IS NULL, start_time ASC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], map_event_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

pub fn events_in_window(
    conn: &Connection,
    user_id: &str,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM events
         WHERE user_id = ?1 AND start_time >= ?2 AND start_time <= ?3
         ORDER BY start_time ASC",
    )?;
    let rows = stmt.query_map(params![user_id, fmt_dt(from), fmt_dt(to)], map_event_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// First existing block overlapping [start, end) for this user, open
/// interval rule. Deadlines are point-like markers, never occupancy.
pub fn first_overlapping(
    conn: &Connection,
    user_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude: Option<i64>,
) -> AppResult<Option<Event>> {
    let ev = conn
        .prepare(
            "SELECT * FROM events
             WHERE user_id = ?1
               AND type != 'deadline'
               AND start_time IS NOT NULL AND end_time IS NOT NULL
               AND start_time < ?3 AND end_time > ?2
               AND (?4 IS NULL OR id != ?4)
             ORDER BY start_time ASC
             LIMIT 1",
        )?
        .query_row(
            params![user_id, fmt_dt(start), fmt_dt(end), exclude],
            map_event_row,
        )
        .optional()?;
    Ok(ev)
}

/// Candidate rows for title resolution: every event of the user plus the
/// status of its task, if it has one.
pub struct TitleCandidate {
    pub id: i64,
    pub title: String,
    pub created_at: String,
    pub done: bool,
}

pub fn load_title_candidates(conn: &Connection, user_id: &str) -> AppResult<Vec<TitleCandidate>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.title, e.created_at,
                COALESCE((SELECT t.status FROM tasks t WHERE t.event_id = e.id LIMIT 1), '') AS task_status
         FROM events e
         WHERE e.user_id = ?1",
    )?;
    let rows = stmt.query_map([user_id], |row| {
        Ok(TitleCandidate {
            id: row.get(0)?,
            title: row.get(1)?,
            created_at: row.get(2)?,
            done: row.get::<_, String>(3)? == "done",
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// Tasks, schedules, checklist, tags
// ---------------------------------------------------------------

pub fn insert_task(
    conn: &Connection,
    user_id: &str,
    event_id: i64,
    title: &str,
    description: Option<&str>,
    deadline: Option<NaiveDateTime>,
    priority: &str,
    now_iso: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (user_id, event_id, title, description, deadline, priority, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'todo', ?7)",
        params![
            user_id,
            event_id,
            title,
            description,
            deadline.map(fmt_dt),
            priority,
            now_iso,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn task_id_for_event(conn: &Connection, event_id: i64) -> AppResult<Option<i64>> {
    let id = conn
        .prepare("SELECT id FROM tasks WHERE event_id = ?1 LIMIT 1")?
        .query_row([event_id], |row| row.get(0))
        .optional()?;
    Ok(id)
}

pub struct TaskDetail {
    pub id: i64,
    pub priority: String,
    pub status: String,
    pub deadline: Option<String>,
}

pub fn task_detail_for_event(conn: &Connection, event_id: i64) -> AppResult<Option<TaskDetail>> {
    let detail = conn
        .prepare("SELECT id, priority, status, deadline FROM tasks WHERE event_id = ?1 LIMIT 1")?
        .query_row([event_id], |row| {
            Ok(TaskDetail {
                id: row.get(0)?,
                priority: row.get(1)?,
                status: row.get(2)?,
                deadline: row.get(3)?,
            })
        })
        .optional()?;
    Ok(detail)
}

pub fn insert_schedule(
    conn: &Connection,
    user_id: &str,
    event_id: i64,
    task_id: Option<i64>,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO schedules (user_id, event_id, task_id, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, event_id, task_id, fmt_dt(start), end.map(fmt_dt)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_schedule_times(
    conn: &Connection,
    event_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<()> {
    conn.execute(
        "UPDATE schedules SET start_time = ?2, end_time = ?3 WHERE event_id = ?1",
        params![event_id, fmt_dt(start), fmt_dt(end)],
    )?;
    Ok(())
}

pub fn schedule_count_for_event(conn: &Connection, event_id: i64) -> AppResult<i64> {
    let n = conn
        .prepare("SELECT COUNT(*) FROM schedules WHERE event_id = ?1")?
        .query_row([event_id], |row| row.get(0))?;
    Ok(n)
}

pub fn insert_checklist_item(conn: &Connection, task_id: i64, text: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO checklist_items (task_id, item_text, is_done) VALUES (?1, ?2, 0)",
        params![task_id, text],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn checklist_for_task(conn: &Connection, task_id: i64) -> AppResult<Vec<(String, bool)>> {
    let mut stmt =
        conn.prepare("SELECT item_text, is_done FROM checklist_items WHERE task_id = ?1 ORDER BY id")?;
    let rows = stmt.query_map([task_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? != 0))
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn upsert_tag(conn: &Connection, user_id: &str, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO tags (user_id, name) VALUES (?1, ?2)",
        params![user_id, name],
    )?;
    let id = conn
        .prepare("SELECT id FROM tags WHERE user_id = ?1 AND name = ?2")?
        .query_row(params![user_id, name], |row| row.get(0))?;
    Ok(id)
}

pub fn link_task_tag(conn: &Connection, task_id: i64, tag_id: i64) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)",
        params![task_id, tag_id],
    )?;
    Ok(())
}

// ---------------------------------------------------------------
// Notes
// ---------------------------------------------------------------

pub fn insert_note(
    conn: &Connection,
    user_id: &str,
    content: &str,
    event_id: Option<i64>,
    now_iso: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO notes (user_id, content, event_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, content, event_id, now_iso],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn map_note_row(row: &Row) -> Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        content: row.get("content")?,
        event_id: row.get("event_id")?,
        task_id: row.get("task_id")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_notes(conn: &Connection, user_id: &str, limit: i64) -> AppResult<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM notes WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![user_id, limit], map_note_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_note_containing(
    conn: &Connection,
    user_id: &str,
    keyword: &str,
) -> AppResult<Option<Note>> {
    // crude LIKE pass first; diacritic-insensitive fallback is done by the
    // caller over list_notes
    let note = conn
        .prepare(
            "SELECT * FROM notes WHERE user_id = ?1 AND content LIKE ?2
             ORDER BY created_at DESC LIMIT 1",
        )?
        .query_row(params![user_id, format!("%{keyword}%")], map_note_row)
        .optional()?;
    Ok(note)
}

// ---------------------------------------------------------------
// Stats
// ---------------------------------------------------------------

pub struct TaskCounts {
    pub todo: i64,
    pub doing: i64,
    pub done: i64,
}

pub fn task_status_counts(conn: &Connection, user_id: &str) -> AppResult<TaskCounts> {
    let counts = conn
        .prepare(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'todo'),
                COUNT(*) FILTER (WHERE status = 'in_progress'),
                COUNT(*) FILTER (WHERE status = 'done')
             FROM tasks WHERE user_id = ?1",
        )?
        .query_row([user_id], |row| {
            Ok(TaskCounts {
                todo: row.get(0)?,
                doing: row.get(1)?,
                done: row.get(2)?,
            })
        })?;
    Ok(counts)
}

pub fn note_count(conn: &Connection, user_id: &str) -> AppResult<i64> {
    let n = conn
        .prepare("SELECT COUNT(*) FROM notes WHERE user_id = ?1")?
        .query_row([user_id], |row| row.get(0))?;
    Ok(n)
}

pub fn event_count_in_window(
    conn: &Connection,
    user_id: &str,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> AppResult<i64> {
    let n = conn
        .prepare(
            "SELECT COUNT(*) FROM events
             WHERE user_id = ?1 AND start_time >= ?2 AND start_time < ?3",
        )?
        .query_row(params![user_id, fmt_dt(from), fmt_dt(to)], |row| row.get(0))?;
    Ok(n)
}

// ---------------------------------------------------------------
// Profiles, subscriptions, payments
// ---------------------------------------------------------------

pub fn profile_exists(conn: &Connection, user_id: &str) -> AppResult<bool> {
    let found: Option<String> = conn
        .prepare("SELECT id FROM profiles WHERE id = ?1")?
        .query_row([user_id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

/// Placeholder profile so the subscriptions FK holds; the real profile is
/// owned by the account system, not this flow.
pub fn insert_placeholder_profile(conn: &Connection, user_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profiles (id, name, email) VALUES (?1, 'User', ?2)",
        params![user_id, format!("{user_id}@placeholder.local")],
    )?;
    Ok(())
}

pub fn get_subscription(conn: &Connection, user_id: &str) -> AppResult<Option<Subscription>> {
    let sub = conn
        .prepare(
            "SELECT id, user_id, plan, status, start_date, end_date
             FROM subscriptions WHERE user_id = ?1",
        )?
        .query_row([user_id], |row| {
            let plan_str: String = row.get(2)?;
            let start_str: String = row.get(4)?;
            let end_str: String = row.get(5)?;
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                plan_str,
                row.get::<_, String>(3)?,
                start_str,
                end_str,
            ))
        })
        .optional()?;

    match sub {
        None => Ok(None),
        Some((id, user_id, plan_str, status, start_str, end_str)) => {
            let plan = Plan::from_db_str(&plan_str).ok_or_else(|| {
                crate::errors::AppError::Other(format!("invalid plan in storage: {plan_str}"))
            })?;
            let start_date = parse_dt(&start_str).ok_or_else(|| {
                crate::errors::AppError::Other(format!("invalid start_date: {start_str}"))
            })?;
            let end_date = parse_dt(&end_str).ok_or_else(|| {
                crate::errors::AppError::Other(format!("invalid end_date: {end_str}"))
            })?;
            Ok(Some(Subscription {
                id,
                user_id,
                plan,
                status,
                start_date,
                end_date,
            }))
        }
    }
}

pub fn upsert_subscription(
    conn: &Connection,
    user_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO subscriptions (user_id, plan, status, start_date, end_date)
         VALUES (?1, 'vip', 'active', ?2, ?3)
         ON CONFLICT(user_id) DO UPDATE SET
             plan = 'vip',
             status = 'active',
             start_date = excluded.start_date,
             end_date = excluded.end_date",
        params![user_id, fmt_dt(start), fmt_dt(end)],
    )?;
    let id = conn
        .prepare("SELECT id FROM subscriptions WHERE user_id = ?1")?
        .query_row([user_id], |row| row.get(0))?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
pub fn insert_payment(
    conn: &Connection,
    user_id: &str,
    subscription_id: i64,
    method: &str,
    amount: i64,
    status: &str,
    transaction_id: Option<&str>,
    now_iso: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO payments (user_id, subscription_id, method, amount, status, transaction_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            subscription_id,
            method,
            amount,
            status,
            transaction_id,
            now_iso,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
