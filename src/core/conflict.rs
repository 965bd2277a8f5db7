//! Scheduling conflict detection.
//! Advisory only: a conflict becomes a warning appended to the success
//! message, never a rejection. There is no locking around
//! check-then-insert; concurrent writers rely on SQLite's transaction
//! isolation and may each get their own warning.

use crate::db::queries::first_overlapping;
use crate::errors::AppResult;
use crate::utils::time::fmt_dt;
use chrono::NaiveDateTime;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct ConflictInfo {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// First non-deadline record of the user strictly overlapping
/// [start, end). `exclude` skips the record being rescheduled.
pub fn find_conflict(
    conn: &Connection,
    user_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude: Option<i64>,
) -> AppResult<Option<ConflictInfo>> {
    let hit = first_overlapping(conn, user_id, start, end, exclude)?;
    Ok(hit.and_then(|ev| {
        let (s, e) = (ev.start_time?, ev.end_time?);
        Some(ConflictInfo {
            title: ev.title,
            start: s,
            end: e,
        })
    }))
}

pub fn warning_text(c: &ConflictInfo) -> String {
    format!(
        "This overlaps '{}' ({} -> {})!",
        c.title,
        fmt_dt(c.start),
        fmt_dt(c.end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::Db;
    use crate::db::queries::insert_event;
    use crate::models::event_kind::EventKind;
    use crate::utils::time::parse_dt;

    fn seeded() -> Db {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();
        db
    }

    fn ts(s: &str) -> NaiveDateTime {
        parse_dt(s).unwrap()
    }

    fn block(db: &Db, user: &str, title: &str, kind: EventKind, start: &str, end: &str) -> i64 {
        insert_event(
            &db.conn,
            user,
            title,
            None,
            kind,
            Some(ts(start)),
            Some(ts(end)),
            "2025-03-01 08:00",
        )
        .unwrap()
    }

    #[test]
    fn detects_strict_overlap() {
        let db = seeded();
        block(&db, "u1", "Họp lãnh đạo", EventKind::Schedule, "2025-03-11 14:00", "2025-03-11 15:00");
        let hit = find_conflict(&db.conn, "u1", ts("2025-03-11 14:30"), ts("2025-03-11 15:30"), None)
            .unwrap()
            .unwrap();
        assert_eq!(hit.title, "Họp lãnh đạo");
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let db = seeded();
        block(&db, "u1", "Ca sáng", EventKind::Workshift, "2025-03-11 08:00", "2025-03-11 12:00");
        let hit =
            find_conflict(&db.conn, "u1", ts("2025-03-11 12:00"), ts("2025-03-11 13:00"), None)
                .unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn deadlines_never_occupy_time() {
        let db = seeded();
        block(&db, "u1", "Nộp báo cáo", EventKind::Deadline, "2025-03-11 14:00", "2025-03-11 15:00");
        let hit =
            find_conflict(&db.conn, "u1", ts("2025-03-11 14:00"), ts("2025-03-11 15:00"), None)
                .unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn excluded_record_is_skipped() {
        let db = seeded();
        let id = block(&db, "u1", "Họp nhóm", EventKind::Schedule, "2025-03-11 14:00", "2025-03-11 15:00");
        let hit =
            find_conflict(&db.conn, "u1", ts("2025-03-11 14:00"), ts("2025-03-11 15:00"), Some(id))
                .unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn overlap_is_symmetric() {
        let db = seeded();
        block(&db, "u1", "A", EventKind::Schedule, "2025-03-11 14:00", "2025-03-11 15:00");
        let a_vs_b =
            find_conflict(&db.conn, "u1", ts("2025-03-11 14:30"), ts("2025-03-11 15:30"), None)
                .unwrap();
        assert!(a_vs_b.is_some());

        let db2 = seeded();
        block(&db2, "u1", "B", EventKind::Schedule, "2025-03-11 14:30", "2025-03-11 15:30");
        let b_vs_a =
            find_conflict(&db2.conn, "u1", ts("2025-03-11 14:00"), ts("2025-03-11 15:00"), None)
                .unwrap();
        assert!(b_vs_a.is_some());
    }

    #[test]
    fn repeated_checks_are_idempotent() {
        let db = seeded();
        block(&db, "u1", "A", EventKind::Schedule, "2025-03-11 14:00", "2025-03-11 15:00");
        let first =
            find_conflict(&db.conn, "u1", ts("2025-03-11 14:00"), ts("2025-03-11 16:00"), None)
                .unwrap()
                .map(|c| c.title);
        let second =
            find_conflict(&db.conn, "u1", ts("2025-03-11 14:00"), ts("2025-03-11 16:00"), None)
                .unwrap()
                .map(|c| c.title);
        assert_eq!(first, second);
    }

    #[test]
    fn scoped_to_user() {
        let db = seeded();
        block(&db, "u2", "Someone else", EventKind::Schedule, "2025-03-11 14:00", "2025-03-11 15:00");
        let hit =
            find_conflict(&db.conn, "u1", ts("2025-03-11 14:00"), ts("2025-03-11 15:00"), None)
                .unwrap();
        assert!(hit.is_none());
    }
}
