use std::fmt;

/// Icons shared by outcome rendering and terminal output.
pub const ICON_OK: &str = "✅";
pub const ICON_WARN: &str = "⚠️";
pub const ICON_ERR: &str = "❌";
pub const ICON_TRASH: &str = "🗑️";

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", ICON_OK, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", ICON_ERR, msg);
}
