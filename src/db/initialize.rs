use crate::errors::AppResult;
use rusqlite::Connection;

/// Create the full schema. Idempotent; safe to run on every `init`.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id    TEXT PRIMARY KEY,
            name  TEXT,
            email TEXT
        );

        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            title       TEXT NOT NULL,
            description TEXT,
            type        TEXT NOT NULL CHECK(type IN ('task','schedule','class','workshift','deadline','custom')),
            start_time  TEXT,
            end_time    TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_user_start ON events(user_id, start_time);

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            event_id    INTEGER REFERENCES events(id) ON DELETE CASCADE,
            title       TEXT NOT NULL,
            description TEXT,
            deadline    TEXT,
            priority    TEXT NOT NULL DEFAULT 'medium' CHECK(priority IN ('low','medium','high')),
            status      TEXT NOT NULL DEFAULT 'todo' CHECK(status IN ('todo','in_progress','done')),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_user_status ON tasks(user_id, status);

        CREATE TABLE IF NOT EXISTS schedules (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    TEXT NOT NULL,
            event_id   INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            task_id    INTEGER REFERENCES tasks(id) ON DELETE CASCADE,
            start_time TEXT NOT NULL,
            end_time   TEXT
        );

        CREATE TABLE IF NOT EXISTS notes (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    TEXT NOT NULL,
            content    TEXT NOT NULL,
            event_id   INTEGER REFERENCES events(id) ON DELETE CASCADE,
            task_id    INTEGER REFERENCES tasks(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS checklist_items (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id   INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            item_text TEXT NOT NULL,
            is_done   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS tags (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name    TEXT NOT NULL,
            UNIQUE(user_id, name)
        );

        CREATE TABLE IF NOT EXISTS task_tags (
            task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            tag_id  INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (task_id, tag_id)
        );

        CREATE TABLE IF NOT EXISTS subscriptions (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    TEXT NOT NULL UNIQUE REFERENCES profiles(id) ON DELETE CASCADE,
            plan       TEXT NOT NULL CHECK(plan IN ('free','vip')),
            status     TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS payments (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT NOT NULL,
            subscription_id INTEGER NOT NULL REFERENCES subscriptions(id),
            method          TEXT NOT NULL,
            amount          INTEGER NOT NULL,
            status          TEXT NOT NULL,
            transaction_id  TEXT,
            created_at      TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}
