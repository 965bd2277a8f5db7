use serde::Serialize;

/// Free-text note, optionally attached to an event or a task.
/// The attachment is exclusive by convention: the tools only ever set one
/// of the two links.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: i64,
    pub user_id: String,
    pub content: String,
    pub event_id: Option<i64>,
    pub task_id: Option<i64>,
    pub created_at: String,
}
