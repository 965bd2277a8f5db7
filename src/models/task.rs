use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Map a free-form priority word (Vietnamese or English) to the enum.
    /// Unknown words fall back to Medium, matching the tool contract of
    /// never rejecting an intent over a fuzzy priority label.
    pub fn from_word(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cao" | "khẩn cấp" | "khan cap" | "gấp" | "gap" | "high" => Priority::High,
            "thấp" | "thap" | "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}
