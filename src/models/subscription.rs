use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Plan {
    Free,
    Vip,
}

impl Plan {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Plan::Free),
            "vip" => Some(Plan::Vip),
            _ => None,
        }
    }
}

/// One row per user. Renewals stack onto the current end date instead of
/// resetting from the payment time.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub id: i64,
    pub user_id: String,
    pub plan: Plan,
    pub status: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl Subscription {
    pub fn is_active_vip_at(&self, now: NaiveDateTime) -> bool {
        self.plan == Plan::Vip && self.status == "active" && self.end_date > now
    }
}
