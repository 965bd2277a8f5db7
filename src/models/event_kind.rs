use serde::Serialize;

/// Kind of calendar/work item a user can create.
/// Deadlines are time-bounded but never time-blocked: they get no
/// schedule row and are skipped by conflict detection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Task,
    Schedule,
    Class,
    Workshift,
    Deadline,
    Custom,
}

impl EventKind {
    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "task" => Some(EventKind::Task),
            "schedule" => Some(EventKind::Schedule),
            "class" => Some(EventKind::Class),
            "workshift" => Some(EventKind::Workshift),
            "deadline" => Some(EventKind::Deadline),
            "custom" => Some(EventKind::Custom),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Task => "task",
            EventKind::Schedule => "schedule",
            EventKind::Class => "class",
            EventKind::Workshift => "workshift",
            EventKind::Deadline => "deadline",
            EventKind::Custom => "custom",
        }
    }

    /// Accepts the canonical kind names plus the Vietnamese words the
    /// orchestration layer tends to pass through.
    pub fn from_user_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "task" | "công việc" | "cong viec" | "việc" | "viec" => Some(EventKind::Task),
            "schedule" | "lịch" | "lich" => Some(EventKind::Schedule),
            "class" | "lớp học" | "lop hoc" | "lớp" | "lop" => Some(EventKind::Class),
            "workshift" | "ca làm" | "ca lam" => Some(EventKind::Workshift),
            "deadline" | "hạn" | "han" | "hạn chót" | "han chot" => Some(EventKind::Deadline),
            "custom" | "khác" | "khac" => Some(EventKind::Custom),
            _ => None,
        }
    }

    pub fn is_deadline(&self) -> bool {
        matches!(self, EventKind::Deadline)
    }

    /// Kinds that carry a to-do representation alongside the event row.
    pub fn wants_task(&self) -> bool {
        matches!(self, EventKind::Task | EventKind::Deadline)
    }
}
