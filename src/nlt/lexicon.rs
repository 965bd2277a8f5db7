//! Word tables for the Vietnamese time-expression parser.
//! Everything here operates on normalized text (lowercased, diacritics
//! folded by utils::text::normalize), so "thứ Hai" arrives as "thu hai".

use chrono::Duration;

/// Period-of-day qualifier attached to a clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,   // sáng
    Noon,      // trưa
    Afternoon, // chiều
    Evening,   // tối
    Night,     // đêm
}

impl DayPeriod {
    /// Shift a spoken hour onto the 24h clock.
    /// "3 giờ chiều" -> 15, "12 giờ trưa" -> 12, "1 giờ trưa" -> 13.
    pub fn adjust_hour(&self, hour: u32) -> u32 {
        match self {
            DayPeriod::Morning => hour,
            DayPeriod::Noon => {
                if hour < 11 {
                    hour + 12
                } else {
                    hour
                }
            }
            DayPeriod::Afternoon | DayPeriod::Evening | DayPeriod::Night => {
                if hour < 12 {
                    hour + 12
                } else {
                    hour
                }
            }
        }
    }
}

/// Relative-day keywords and their offsets from the reference date.
/// Longer phrases first so "ngay mai" wins over bare "mai".
pub const DAY_OFFSETS: &[(&str, i64)] = &[
    ("hom nay", 0),
    ("hom qua", -1),
    ("ngay mai", 1),
    ("ngay kia", 2),
    ("ngay mot", 2),
    ("mai", 1),
];

/// Week qualifier for weekday expressions ("thứ 2 tuần sau").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekQualifier {
    This,
    Next,
    Last,
}

pub fn find_week_qualifier(text: &str) -> Option<WeekQualifier> {
    if text.contains("tuan nay") {
        Some(WeekQualifier::This)
    } else if text.contains("tuan sau") || text.contains("tuan toi") {
        Some(WeekQualifier::Next)
    } else if text.contains("tuan truoc") {
        Some(WeekQualifier::Last)
    } else {
        None
    }
}

/// Duration of one "in N units" step ("2 tiếng nữa", "sau 30 phút").
pub fn unit_duration(unit: &str, n: i64) -> Option<Duration> {
    match unit {
        "phut" => Some(Duration::minutes(n)),
        "tieng" | "gio" => Some(Duration::hours(n)),
        "ngay" => Some(Duration::days(n)),
        "tuan" => Some(Duration::weeks(n)),
        _ => None,
    }
}

/// Period word scan. "toi" doubles as "tới" (next) in "tuần tới", so it
/// only counts as evening when it is not part of that bigram.
pub fn find_period(text: &str) -> Option<DayPeriod> {
    for (word, period) in [
        ("sang", DayPeriod::Morning),
        ("trua", DayPeriod::Noon),
        ("chieu", DayPeriod::Afternoon),
        ("dem", DayPeriod::Night),
    ] {
        if has_word(text, word) {
            return Some(period);
        }
    }
    if has_word(text, "toi") && !text.contains("tuan toi") {
        return Some(DayPeriod::Evening);
    }
    None
}

/// Whole-word containment over ASCII-folded text.
pub fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|tok| tok == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_adjustment() {
        assert_eq!(DayPeriod::Afternoon.adjust_hour(3), 15);
        assert_eq!(DayPeriod::Afternoon.adjust_hour(15), 15);
        assert_eq!(DayPeriod::Noon.adjust_hour(12), 12);
        assert_eq!(DayPeriod::Noon.adjust_hour(1), 13);
        assert_eq!(DayPeriod::Morning.adjust_hour(8), 8);
        assert_eq!(DayPeriod::Evening.adjust_hour(7), 19);
    }

    #[test]
    fn toi_is_not_evening_inside_next_week() {
        assert_eq!(find_period("tuan toi"), None);
        assert_eq!(find_period("7 gio toi"), Some(DayPeriod::Evening));
    }
}
