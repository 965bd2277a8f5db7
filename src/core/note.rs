//! Free-text notes, optionally attached to an event resolved by title.

use crate::core::outcome::Outcome;
use crate::core::resolve::resolve_event;
use crate::db::pool::Db;
use crate::db::queries::insert_note;
use crate::errors::AppResult;
use crate::utils::time::fmt_dt;
use chrono::NaiveDateTime;

pub fn create_note(
    db: &mut Db,
    user_id: &str,
    content: &str,
    context_title: Option<&str>,
    now: NaiveDateTime,
) -> AppResult<Outcome> {
    let tx = db.conn.transaction()?;

    // A missing context is not an error: the note is simply unattached.
    let context = match context_title {
        Some(fragment) => resolve_event(&tx, user_id, fragment)?,
        None => None,
    };

    insert_note(
        &tx,
        user_id,
        content,
        context.as_ref().map(|c| c.id),
        &fmt_dt(now),
    )?;
    tx.commit()?;

    let message = match context {
        Some(ev) => format!("Note saved (attached to '{}').", ev.title),
        None => "Note saved.".to_string(),
    };
    Ok(Outcome::success(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose::{EventIntent, compose};
    use crate::db::initialize::init_db;
    use crate::models::event_kind::EventKind;
    use crate::utils::time::parse_dt;

    fn seeded() -> Db {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();
        db
    }

    #[test]
    fn attaches_to_resolved_event() {
        let mut db = seeded();
        let intent = EventIntent {
            user_id: "u1".into(),
            title: "Họp nhóm".into(),
            kind: EventKind::Schedule,
            description: None,
            start_phrase: None,
            end_phrase: None,
            priority_word: None,
        };
        compose(&mut db, &intent, parse_dt("2025-03-10 09:00").unwrap()).unwrap();

        let out = create_note(
            &mut db,
            "u1",
            "Chuẩn bị slide",
            Some("họp nhóm"),
            parse_dt("2025-03-10 09:05").unwrap(),
        )
        .unwrap();
        assert!(out.render().contains("Họp nhóm"));

        let event_id: Option<i64> = db
            .conn
            .query_row("SELECT event_id FROM notes WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(event_id, Some(1));
    }

    #[test]
    fn unknown_context_leaves_note_unattached() {
        let mut db = seeded();
        create_note(
            &mut db,
            "u1",
            "Ý tưởng mới",
            Some("không có"),
            parse_dt("2025-03-10 09:00").unwrap(),
        )
        .unwrap();

        let event_id: Option<i64> = db
            .conn
            .query_row("SELECT event_id FROM notes WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(event_id, None);
    }
}
