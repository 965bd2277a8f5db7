//! Read-only tools: listing, detail lookup, weekly agenda and the
//! overview counters. Everything renders to an Info outcome.

use crate::core::outcome::Outcome;
use crate::core::resolve::resolve_event;
use crate::db::pool::Db;
use crate::db::queries::{
    checklist_for_task, event_count_in_window, events_in_window, find_note_containing, get_event,
    list_events, list_notes, note_count, task_detail_for_event, task_status_counts,
};
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::event_kind::EventKind;
use crate::nlt::parse_natural_time;
use crate::utils::text::normalize;
use crate::utils::time::parse_dt;
use chrono::{Duration, NaiveDateTime};

const EMPTY_ICON: &str = "📭";

/// `kind` accepts the event kinds plus "note"/"ghi chú" to list notes.
pub fn list(
    db: &Db,
    user_id: &str,
    kind: Option<&str>,
    limit: i64,
    json: bool,
) -> AppResult<Outcome> {
    if let Some(k) = kind
        && matches!(k.trim().to_lowercase().as_str(), "note" | "ghi chú" | "ghi chu")
    {
        return list_note_rows(db, user_id, limit, json);
    }

    let kind_filter = match kind {
        Some(k) => Some(
            EventKind::from_user_str(k).ok_or_else(|| AppError::InvalidEventKind(k.to_string()))?,
        ),
        None => None,
    };

    let events = list_events(&db.conn, user_id, kind_filter, limit)?;
    if events.is_empty() {
        return Ok(Outcome::Info(format!("{EMPTY_ICON} No items found.")));
    }
    if json {
        return Ok(Outcome::Info(serde_json::to_string_pretty(&events).map_err(
            |e| AppError::Other(format!("JSON encoding failed: {e}")),
        )?));
    }

    let mut out = format!("📋 LIST ({} items):\n", events.len());
    for ev in &events {
        out.push_str(&format!(
            "- [{}] {} ({})\n",
            ev.kind.to_db_str(),
            ev.title,
            short_time(ev)
        ));
    }
    Ok(Outcome::Info(out.trim_end().to_string()))
}

fn list_note_rows(db: &Db, user_id: &str, limit: i64, json: bool) -> AppResult<Outcome> {
    let notes = list_notes(&db.conn, user_id, limit)?;
    if notes.is_empty() {
        return Ok(Outcome::Info(format!("{EMPTY_ICON} No notes yet.")));
    }
    if json {
        return Ok(Outcome::Info(serde_json::to_string_pretty(&notes).map_err(
            |e| AppError::Other(format!("JSON encoding failed: {e}")),
        )?));
    }

    let mut out = format!("📝 NOTES ({} most recent):\n", notes.len());
    for note in &notes {
        let day = parse_dt(&note.created_at)
            .map(|d| d.format("%d/%m").to_string())
            .unwrap_or_default();
        out.push_str(&format!("- [{}] {}\n", day, preview(&note.content)));
    }
    Ok(Outcome::Info(out.trim_end().to_string()))
}

/// First line of the content, capped to 50 characters.
fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let short: String = first_line.chars().take(50).collect();
    if short.len() < first_line.len() {
        format!("{short}...")
    } else {
        short
    }
}

fn short_time(ev: &Event) -> String {
    match ev.start_time {
        Some(s) => s.format("%d/%m %H:%M").to_string(),
        None => "---".to_string(),
    }
}

/// Keyword lookup across events and notes, events first.
pub fn detail(db: &Db, user_id: &str, keyword: &str) -> AppResult<Outcome> {
    if let Some(found) = resolve_event(&db.conn, user_id, keyword)? {
        let Some(ev) = get_event(&db.conn, found.id)? else {
            return Ok(Outcome::NotFound(format!("Nothing matches '{keyword}'.")));
        };

        let mut out = format!("🔎 EVENT: {}\n", ev.title.to_uppercase());
        out.push_str(&format!("- Kind: {}\n", ev.kind.to_db_str()));
        out.push_str(&format!("- Time: {}\n", ev.span_str()));
        out.push_str(&format!(
            "- Description: {}\n",
            ev.description.as_deref().unwrap_or("none")
        ));

        if let Some(task) = task_detail_for_event(&db.conn, ev.id)? {
            out.push_str(&format!(
                "- Priority: {} | Status: {}\n",
                task.priority, task.status
            ));
            let items = checklist_for_task(&db.conn, task.id)?;
            if !items.is_empty() {
                out.push_str("- Checklist:\n");
                for (text, done) in items {
                    out.push_str(&format!("  [{}] {}\n", if done { "x" } else { " " }, text));
                }
            }
        }
        return Ok(Outcome::Info(out.trim_end().to_string()));
    }

    // fall through to notes: LIKE first, then a word-based folded match so
    // "ý tưởng giao diện" still finds "ý tưởng làm giao diện"
    let note = match find_note_containing(&db.conn, user_id, keyword)? {
        Some(n) => Some(n),
        None => {
            let words: Vec<String> = normalize(keyword)
                .split_whitespace()
                .map(str::to_string)
                .collect();
            list_notes(&db.conn, user_id, 200)?.into_iter().find(|n| {
                let content = normalize(&n.content);
                !words.is_empty() && words.iter().all(|w| content.contains(w.as_str()))
            })
        }
    };
    if let Some(note) = note {
        let day = parse_dt(&note.created_at)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| note.created_at.clone());
        return Ok(Outcome::Info(format!("📝 NOTE ({}):\n\n{}", day, note.content)));
    }

    Ok(Outcome::NotFound(format!("Nothing matches '{keyword}'.")))
}

/// Events in the 7 days from the given phrase (or from now).
pub fn agenda(
    db: &Db,
    user_id: &str,
    from_phrase: Option<&str>,
    now: NaiveDateTime,
) -> AppResult<Outcome> {
    let from = match from_phrase {
        Some(p) => parse_natural_time(p, now)?.0,
        None => now,
    };
    let to = from + Duration::days(7);

    let events = events_in_window(&db.conn, user_id, from, to)?;
    if events.is_empty() {
        return Ok(Outcome::Info(format!(
            "{EMPTY_ICON} Schedule is clear for the next 7 days. A good time to plan something new!"
        )));
    }

    let mut out = format!(
        "📅 AGENDA {} -> {}:\n",
        from.format("%d/%m"),
        to.format("%d/%m")
    );
    for ev in &events {
        let start = ev
            .start_time
            .map(|s| s.format("%H:%M %d/%m").to_string())
            .unwrap_or_else(|| "---".into());
        let end = ev
            .end_time
            .map(|e| e.format("%H:%M").to_string())
            .unwrap_or_else(|| "...".into());
        out.push_str(&format!(
            "- [{}] {}: {} - {}\n",
            ev.kind.to_db_str(),
            ev.title,
            start,
            end
        ));
    }
    Ok(Outcome::Info(out.trim_end().to_string()))
}

/// Quick counters: tasks by status, notes, events in the coming week.
pub fn stats(db: &Db, user_id: &str, now: NaiveDateTime) -> AppResult<Outcome> {
    let tasks = task_status_counts(&db.conn, user_id)?;
    let notes = note_count(&db.conn, user_id)?;
    let events = event_count_in_window(&db.conn, user_id, now, now + Duration::days(7))?;

    Ok(Outcome::Info(format!(
        "📊 OVERVIEW:\n- Tasks: {} todo, {} in progress, {} done.\n- Notes: {} saved.\n- Events: {} in the next 7 days.",
        tasks.todo, tasks.doing, tasks.done, notes, events
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose::{EventIntent, compose};
    use crate::core::note::create_note;
    use crate::db::initialize::init_db;
    use crate::utils::time::parse_dt;

    fn seeded() -> Db {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();
        db
    }

    fn now() -> NaiveDateTime {
        parse_dt("2025-03-10 09:00").unwrap()
    }

    fn create(db: &mut Db, title: &str, kind: EventKind, start: Option<&str>) {
        let intent = EventIntent {
            user_id: "u1".into(),
            title: title.into(),
            kind,
            description: None,
            start_phrase: start.map(Into::into),
            end_phrase: None,
            priority_word: None,
        };
        compose(db, &intent, now()).unwrap();
    }

    #[test]
    fn list_filters_by_kind() {
        let mut db = seeded();
        create(&mut db, "Họp nhóm", EventKind::Schedule, Some("2025-03-11 14:00"));
        create(&mut db, "Ôn thi", EventKind::Task, None);

        let out = list(&db, "u1", Some("task"), 5, false).unwrap().render();
        assert!(out.contains("Ôn thi"));
        assert!(!out.contains("Họp nhóm"));
    }

    #[test]
    fn list_json_is_machine_readable() {
        let mut db = seeded();
        create(&mut db, "Họp nhóm", EventKind::Schedule, Some("2025-03-11 14:00"));
        let out = list(&db, "u1", None, 5, true).unwrap().render();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["title"], "Họp nhóm");
    }

    #[test]
    fn detail_shows_task_fields() {
        let mut db = seeded();
        create(&mut db, "Nộp báo cáo", EventKind::Deadline, Some("2025-03-14 17:00"));
        let out = detail(&db, "u1", "báo cáo").unwrap().render();
        assert!(out.contains("NỘP BÁO CÁO"));
        assert!(out.contains("Status: todo"));
    }

    #[test]
    fn detail_falls_back_to_notes() {
        let mut db = seeded();
        create_note(&mut db, "u1", "Ý tưởng làm giao diện mới", None, now()).unwrap();
        // word-based match: the keyword words need not be adjacent
        let out = detail(&db, "u1", "ý tưởng giao diện").unwrap().render();
        assert!(out.contains("giao diện mới"));
    }

    #[test]
    fn agenda_spans_seven_days() {
        let mut db = seeded();
        create(&mut db, "Trong tuần", EventKind::Schedule, Some("2025-03-12 10:00"));
        create(&mut db, "Tháng sau", EventKind::Schedule, Some("2025-04-20 10:00"));

        let out = agenda(&db, "u1", None, now()).unwrap().render();
        assert!(out.contains("Trong tuần"));
        assert!(!out.contains("Tháng sau"));
    }

    #[test]
    fn stats_counts_everything() {
        let mut db = seeded();
        create(&mut db, "Ôn thi", EventKind::Task, Some("2025-03-11 14:00"));
        create_note(&mut db, "u1", "ghi chú", None, now()).unwrap();

        let out = stats(&db, "u1", now()).unwrap().render();
        assert!(out.contains("1 todo"));
        assert!(out.contains("1 saved"));
        assert!(out.contains("1 in the next 7 days"));
    }
}
