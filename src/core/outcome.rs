//! Tagged tool outcome.
//! The tool boundary speaks a single human-readable string, but internally
//! success, not-found and failure stay distinguishable so tests can assert
//! on them without string matching. Rendering happens once, at the CLI
//! boundary.

use crate::ui::messages::{ICON_ERR, ICON_OK, ICON_WARN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Completed write, with an optional advisory conflict warning.
    Success {
        message: String,
        warning: Option<String>,
    },
    /// Read-only result already formatted for display (lists, details).
    Info(String),
    /// A lookup found nothing; expected, not a fault.
    NotFound(String),
    /// The operation failed; the cause is relayed to the user verbatim.
    Failure(String),
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome::Success {
            message: message.into(),
            warning: None,
        }
    }

    pub fn success_with_warning(message: impl Into<String>, warning: Option<String>) -> Self {
        Outcome::Success {
            message: message.into(),
            warning,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. } | Outcome::Info(_))
    }

    /// The one string that crosses the tool boundary.
    pub fn render(&self) -> String {
        match self {
            Outcome::Success { message, warning } => match warning {
                Some(w) => format!("{ICON_OK} {message}\n{ICON_WARN} {w}"),
                None => format!("{ICON_OK} {message}"),
            },
            Outcome::Info(text) => text.clone(),
            Outcome::NotFound(msg) => format!("{ICON_WARN} {msg}"),
            Outcome::Failure(cause) => format!("{ICON_ERR} {cause}"),
        }
    }
}
