use super::event_kind::EventKind;
use crate::utils::time::fmt_dt;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Root calendar/work item. Task and schedule rows hang off it.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub user_id: String,           // ⇔ events.user_id (TEXT)
    pub title: String,             // ⇔ events.title
    pub description: Option<String>,
    pub kind: EventKind,           // ⇔ events.type
    pub start_time: Option<NaiveDateTime>, // ⇔ events.start_time (TEXT "YYYY-MM-DD HH:MM")
    pub end_time: Option<NaiveDateTime>,   // ⇔ events.end_time
    pub created_at: String,        // ⇔ events.created_at (TEXT, ISO8601)
}

impl Event {
    /// Human-readable time span, "---" when the event carries no time.
    pub fn span_str(&self) -> String {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => format!("{} -> {}", fmt_dt(s), fmt_dt(e)),
            (Some(s), None) => fmt_dt(s),
            (None, Some(e)) => format!("... -> {}", fmt_dt(e)),
            (None, None) => "---".to_string(),
        }
    }
}
