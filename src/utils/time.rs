//! Timestamp formatting shared by storage and display.
//! Minute precision is enough for scheduling; the format sorts
//! lexicographically, which the SQL overlap queries rely on.

use chrono::NaiveDateTime;

pub const DT_FMT: &str = "%Y-%m-%d %H:%M";

pub fn fmt_dt(dt: NaiveDateTime) -> String {
    dt.format(DT_FMT).to_string()
}

pub fn parse_dt(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DT_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
