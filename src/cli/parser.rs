use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_dt;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};

/// Command-line interface definition for skedule
/// Conversational scheduling assistant with SQLite storage
#[derive(Parser)]
#[command(
    name = "skedule",
    version = env!("CARGO_PKG_VERSION"),
    about = "A scheduling assistant CLI: Vietnamese natural-language times, conflict-aware events, notes and tasks over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user id
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Pin the reference time ("YYYY-MM-DD HH:MM") instead of the wall clock
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Create an event (with its task and schedule rows where applicable)
    Create {
        /// Event title
        title: String,

        /// Kind: task, schedule, class, workshift, deadline, custom
        #[arg(long = "kind", default_value = "task")]
        kind: String,

        /// Free-text description
        #[arg(long = "desc")]
        description: Option<String>,

        /// Start time, natural language allowed ("3h chiều mai", "thứ 6 tuần sau")
        #[arg(long = "start")]
        start: Option<String>,

        /// End or due time, natural language allowed
        #[arg(long = "end")]
        end: Option<String>,

        /// Priority word ("cao", "thấp", "khẩn cấp"); defaults to medium
        #[arg(long = "priority")]
        priority: Option<String>,
    },

    /// Move an existing event to a new time
    Reschedule {
        /// Title (or fragment) of the event to move
        title: String,

        /// New time, natural language allowed
        #[arg(long = "to")]
        to: String,
    },

    /// Save a free-text note, optionally attached to an event
    Note {
        /// Note content
        content: String,

        /// Title fragment of the event to attach to
        #[arg(long = "about")]
        about: Option<String>,
    },

    /// Delete an event (and its task, schedule and notes)
    Delete {
        /// Title (or fragment) of the event to delete
        title: String,
    },

    /// Add a checklist item to an event's task
    Check {
        /// Title (or fragment) of the event
        title: String,

        /// Checklist item text
        item: String,
    },

    /// Tag an event's task
    Tag {
        /// Title (or fragment) of the event
        title: String,

        /// Tag name
        name: String,
    },

    /// List events or notes
    List {
        /// Filter by kind (event kinds, or "note" for notes)
        #[arg(long = "kind")]
        kind: Option<String>,

        /// Maximum number of rows
        #[arg(long = "limit", default_value_t = 5)]
        limit: i64,

        /// Emit JSON instead of formatted text
        #[arg(long = "json")]
        json: bool,
    },

    /// Show the detail of an event or note matching a keyword
    Detail {
        /// Keyword to look up (diacritics optional)
        keyword: String,
    },

    /// Show the 7-day agenda
    Agenda {
        /// Starting point, natural language allowed (default: now)
        #[arg(long = "from")]
        from: Option<String>,
    },

    /// Show task, note and event counters
    Stats,

    /// VIP subscription payments
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },
}

#[derive(Subcommand)]
pub enum PaymentAction {
    /// Build a signed gateway checkout URL
    Url {
        /// Amount in VND
        #[arg(long = "amount")]
        amount: i64,

        /// Order description shown at the gateway
        #[arg(long = "desc")]
        description: Option<String>,

        /// Preselected bank code (e.g. NCB)
        #[arg(long = "bank")]
        bank: Option<String>,
    },

    /// Confirm a payment from the gateway return query string
    Confirm {
        /// The full query string the gateway redirected back with
        query: String,
    },
}

impl Cli {
    /// Reference time for parsing and timestamps: the hidden --now pin
    /// when present, the wall clock otherwise.
    pub fn reference_now(&self) -> AppResult<NaiveDateTime> {
        match &self.now {
            Some(s) => parse_dt(s).ok_or_else(|| AppError::TimeParse(s.clone())),
            None => Ok(Local::now().naive_local()),
        }
    }
}
