//! Title-based entity resolution.
//! Tier 1: case- and diacritic-insensitive exact title match.
//! Tier 2: diacritic-insensitive substring containment.
//! Both tiers are scoped to one user and tie-broken the same way:
//! not-yet-completed records first, then most recently created. A single
//! winner is returned; ambiguity is never surfaced to the caller.

use crate::db::queries::{TitleCandidate, load_title_candidates};
use crate::errors::AppResult;
use crate::utils::text::normalize;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    pub id: i64,
    pub title: String,
}

pub fn resolve_event(
    conn: &Connection,
    user_id: &str,
    fragment: &str,
) -> AppResult<Option<ResolvedEvent>> {
    let needle = normalize(fragment.trim());
    if needle.is_empty() {
        return Ok(None);
    }

    let candidates = load_title_candidates(conn, user_id)?;

    let exact: Vec<&TitleCandidate> = candidates
        .iter()
        .filter(|c| normalize(&c.title) == needle)
        .collect();
    if let Some(win) = pick(exact) {
        return Ok(Some(win));
    }

    let partial: Vec<&TitleCandidate> = candidates
        .iter()
        .filter(|c| normalize(&c.title).contains(&needle))
        .collect();
    Ok(pick(partial))
}

fn pick(mut tier: Vec<&TitleCandidate>) -> Option<ResolvedEvent> {
    tier.sort_by(|a, b| {
        a.done
            .cmp(&b.done) // open items before done ones
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
    tier.first().map(|c| ResolvedEvent {
        id: c.id,
        title: c.title.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::Db;
    use crate::db::queries::{insert_event, insert_task};
    use crate::models::event_kind::EventKind;

    fn seeded() -> Db {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();
        db
    }

    fn add(db: &Db, user: &str, title: &str, created: &str) -> i64 {
        insert_event(&db.conn, user, title, None, EventKind::Task, None, None, created).unwrap()
    }

    #[test]
    fn exact_match_wins_over_containment() {
        let db = seeded();
        add(&db, "u1", "Họp nhóm dự án", "2025-03-01 10:00");
        let target = add(&db, "u1", "Họp nhóm", "2025-02-01 10:00");
        let got = resolve_event(&db.conn, "u1", "họp nhóm").unwrap().unwrap();
        assert_eq!(got.id, target);
    }

    #[test]
    fn tier2_matches_diacritic_free_fragment() {
        let db = seeded();
        let target = add(&db, "u1", "Nộp báo cáo tháng 3", "2025-03-01 10:00");
        let got = resolve_event(&db.conn, "u1", "báo cáo").unwrap().unwrap();
        assert_eq!(got.id, target);
        assert_eq!(got.title, "Nộp báo cáo tháng 3");
    }

    #[test]
    fn never_crosses_users() {
        let db = seeded();
        add(&db, "u2", "Họp nhóm", "2025-03-01 10:00");
        assert!(resolve_event(&db.conn, "u1", "họp").unwrap().is_none());
    }

    #[test]
    fn open_task_preferred_over_done() {
        let db = seeded();
        let done_ev = add(&db, "u1", "Viết báo cáo", "2025-03-05 10:00");
        insert_task(&db.conn, "u1", done_ev, "Viết báo cáo", None, None, "medium", "2025-03-05 10:00")
            .unwrap();
        db.conn
            .execute("UPDATE tasks SET status = 'done' WHERE event_id = ?1", [done_ev])
            .unwrap();
        let open_ev = add(&db, "u1", "Viết báo cáo", "2025-03-01 10:00");
        insert_task(&db.conn, "u1", open_ev, "Viết báo cáo", None, None, "medium", "2025-03-01 10:00")
            .unwrap();

        let got = resolve_event(&db.conn, "u1", "viết báo cáo").unwrap().unwrap();
        assert_eq!(got.id, open_ev);
    }

    #[test]
    fn newest_wins_within_same_tier() {
        let db = seeded();
        add(&db, "u1", "Học tiếng Anh", "2025-03-01 10:00");
        let newer = add(&db, "u1", "Học tiếng Anh", "2025-03-09 10:00");
        let got = resolve_event(&db.conn, "u1", "hoc tieng anh").unwrap().unwrap();
        assert_eq!(got.id, newer);
    }

    #[test]
    fn blank_fragment_resolves_to_nothing() {
        let db = seeded();
        add(&db, "u1", "Họp nhóm", "2025-03-01 10:00");
        assert!(resolve_event(&db.conn, "u1", "   ").unwrap().is_none());
    }
}
