//! Natural-language time parser.
//! Turns a Vietnamese time phrase plus a reference instant into a concrete
//! (start, optional end) pair. Pure and deterministic: no wall clock, no
//! side effects.
//!
//! Supported shapes:
//! - literals: "2025-03-10 14:00", "2025-03-10", "15:30"
//! - relative days: "hôm nay", "ngày mai", "mai", "ngày kia", "hôm qua"
//! - weeks: "tuần này", "tuần sau"/"tuần tới", "tuần trước"
//! - weekdays: "thứ 2".."thứ 7", "chủ nhật"/"cn", with a week qualifier
//! - day/month dates: "15/3", "ngày 15/3/2025"
//! - clock times: "15h", "15h30", "3 giờ rưỡi chiều", "8 giờ sáng"
//! - in-N: "2 tiếng nữa", "sau 30 phút"
//! - ranges: "8h-10h thứ 2", "14h đến 16h mai"
//!
//! A date without a time resolves to 00:00 (the all-day sentinel). A time
//! without a date resolves on the reference date.

pub mod lexicon;

use crate::errors::{AppError, AppResult};
use crate::utils::text::normalize;
use crate::utils::time::parse_dt;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use lexicon::{DAY_OFFSETS, DayPeriod, WeekQualifier, find_period, find_week_qualifier, has_word, unit_duration};
use regex::Regex;
use std::sync::LazyLock;

static RE_IN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sau\s+(\d+)\s*(phut|tieng|gio|ngay|tuan)\b").unwrap());
static RE_IN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\s*(phut|tieng|gio|ngay|tuan)\s+nua\b").unwrap());
static RE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s*(?:gio|h|g|:)\s*(\d{2})?\s*(?:-|den)\s*(\d{1,2})\s*(?:gio|h|g|:)?\s*(\d{2})?")
        .unwrap()
});
static RE_CLOCK_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());
static RE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})\s*(?:gio|h|g)\s*(\d{2})?").unwrap());
static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());
static RE_DMY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").unwrap());
static RE_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"thu\s*([2-7])\b").unwrap());

/// Resolve a free-text time phrase against a reference instant.
/// Returns the start and, when the phrase carried an explicit range, the
/// end. Unparseable (or empty) phrases fail with `AppError::TimeParse`;
/// callers treat that as recoverable.
pub fn parse_natural_time(
    phrase: &str,
    reference: NaiveDateTime,
) -> AppResult<(NaiveDateTime, Option<NaiveDateTime>)> {
    let raw = phrase.trim();
    if raw.is_empty() {
        return Err(AppError::TimeParse(phrase.to_string()));
    }

    // Literal timestamps bypass the keyword machinery.
    if let Some(dt) = parse_dt(raw) {
        return Ok((dt, None));
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok((d.and_time(NaiveTime::MIN), None));
    }

    let text = normalize(raw);

    // "sau 30 phút" / "2 tiếng nữa"
    if let Some(caps) = RE_IN_PREFIX.captures(&text).or_else(|| RE_IN_SUFFIX.captures(&text)) {
        let n: i64 = caps[1]
            .parse()
            .map_err(|_| AppError::TimeParse(phrase.to_string()))?;
        let dur =
            unit_duration(&caps[2], n).ok_or_else(|| AppError::TimeParse(phrase.to_string()))?;
        return Ok((reference + dur, None));
    }

    let period = find_period(&text);
    let range = extract_range(&text, period)?;
    let time = match range {
        Some(_) => None,
        None => extract_time(&text, period)?,
    };
    let date = extract_date(&text, reference);

    let start_time = range.map(|(s, _)| s).or(time);
    let start = match (date, start_time) {
        (Some(d), Some(t)) => d.and_time(t),
        (Some(d), None) => d.and_time(NaiveTime::MIN),
        (None, Some(t)) => reference.date().and_time(t),
        (None, None) => return Err(AppError::TimeParse(phrase.to_string())),
    };

    let end = range.map(|(_, e)| {
        let mut end = start.date().and_time(e);
        if end <= start {
            // "23h - 1h" style ranges spill into the next day
            end += Duration::days(1);
        }
        end
    });

    Ok((start, end))
}

/// Extract an explicit "start - end" clock range from the phrase.
fn extract_range(text: &str, period: Option<DayPeriod>) -> AppResult<Option<(NaiveTime, NaiveTime)>> {
    let Some(caps) = RE_RANGE.captures(text) else {
        return Ok(None);
    };
    let start = clock_from(&caps[1], caps.get(2).map(|m| m.as_str()), period, text)?;
    let end = clock_from(&caps[3], caps.get(4).map(|m| m.as_str()), period, text)?;
    Ok(Some((start, end)))
}

/// Extract a single clock time ("15h30", "14:00", "3 giờ rưỡi chiều").
fn extract_time(text: &str, period: Option<DayPeriod>) -> AppResult<Option<NaiveTime>> {
    if let Some(caps) = RE_CLOCK_COLON.captures(text) {
        return clock_from(&caps[1], Some(&caps[2]), period, text).map(Some);
    }
    if let Some(caps) = RE_CLOCK.captures(text) {
        return clock_from(&caps[1], caps.get(2).map(|m| m.as_str()), period, text).map(Some);
    }
    Ok(None)
}

fn clock_from(
    hour: &str,
    minute: Option<&str>,
    period: Option<DayPeriod>,
    text: &str,
) -> AppResult<NaiveTime> {
    let mut h: u32 = hour.parse().map_err(|_| AppError::TimeParse(text.to_string()))?;
    let mut m: u32 = match minute {
        Some(v) => v.parse().map_err(|_| AppError::TimeParse(text.to_string()))?,
        None => 0,
    };
    // "rưỡi" = half past, only when no explicit minutes were given
    if minute.is_none() && has_word(text, "ruoi") {
        m = 30;
    }
    if let Some(p) = period {
        h = p.adjust_hour(h);
    }
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| AppError::TimeParse(text.to_string()))
}

/// Resolve the date component of the phrase, if any.
fn extract_date(text: &str, reference: NaiveDateTime) -> Option<NaiveDate> {
    let today = reference.date();

    if let Some(caps) = RE_ISO_DATE.captures(text) {
        let (y, m, d) = (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            return Some(date);
        }
    }

    if let Some(caps) = RE_DMY.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = match caps.get(3) {
            Some(y) => {
                let y: i32 = y.as_str().parse().ok()?;
                if y < 100 { y + 2000 } else { y }
            }
            None => today.year(),
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    for (keyword, offset) in DAY_OFFSETS {
        let found = if keyword.contains(' ') {
            text.contains(keyword)
        } else {
            has_word(text, keyword)
        };
        if found {
            return Some(today + Duration::days(*offset));
        }
    }

    let qualifier = find_week_qualifier(text);

    if let Some(target) = extract_weekday(text) {
        let shift = target as i64 - today.weekday().num_days_from_monday() as i64;
        let mut date = today + Duration::days(shift);
        match qualifier {
            Some(WeekQualifier::Next) => date += Duration::days(7),
            Some(WeekQualifier::Last) => date -= Duration::days(7),
            Some(WeekQualifier::This) => {}
            None => {
                if date < today {
                    date += Duration::days(7);
                }
            }
        }
        return Some(date);
    }

    match qualifier {
        Some(WeekQualifier::Next) => return Some(today + Duration::days(7)),
        Some(WeekQualifier::Last) => return Some(today - Duration::days(7)),
        Some(WeekQualifier::This) => return Some(today),
        None => {}
    }

    if text.contains("thang sau") {
        return today.checked_add_months(chrono::Months::new(1));
    }

    None
}

/// Weekday index, Monday = 0. "thứ 2" is Monday, "chủ nhật" is Sunday.
fn extract_weekday(text: &str) -> Option<u32> {
    if let Some(caps) = RE_WEEKDAY.captures(text) {
        let n: u32 = caps[1].parse().ok()?;
        return Some(n - 2);
    }
    if text.contains("chu nhat") || has_word(text, "cn") {
        return Some(6);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // Monday 2025-03-10, 09:00
    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn literal_datetime_passthrough() {
        let (s, e) = parse_natural_time("2025-03-10 14:00", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 14, 0));
        assert_eq!(e, None);
    }

    #[test]
    fn bare_date_is_all_day() {
        let (s, e) = parse_natural_time("2025-04-01", reference()).unwrap();
        assert_eq!(s, dt(2025, 4, 1, 0, 0));
        assert_eq!(e, None);
    }

    #[test]
    fn tomorrow_afternoon() {
        let (s, e) = parse_natural_time("ngày mai 3 giờ chiều", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 11, 15, 0));
        assert_eq!(e, None);
    }

    #[test]
    fn tomorrow_compact_clock() {
        let (s, _) = parse_natural_time("ngày mai 14h", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 11, 14, 0));
    }

    #[test]
    fn unaccented_input_parses_too() {
        let (s, _) = parse_natural_time("ngay mai 14h30", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 11, 14, 30));
    }

    #[test]
    fn next_week_is_all_day() {
        let (s, e) = parse_natural_time("tuần sau", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 17, 0, 0));
        assert_eq!(e, None);
    }

    #[test]
    fn weekday_range_with_clock_times() {
        // reference is Monday, so "thứ 2" resolves to the same day
        let (s, e) = parse_natural_time("8h-10h thứ 2", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 8, 0));
        assert_eq!(e, Some(dt(2025, 3, 10, 10, 0)));
    }

    #[test]
    fn range_with_den_separator() {
        let (s, e) = parse_natural_time("14h đến 16h mai", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 11, 14, 0));
        assert_eq!(e, Some(dt(2025, 3, 11, 16, 0)));
    }

    #[test]
    fn this_week_friday_at_17() {
        let (s, _) = parse_natural_time("thứ 6 tuần này 17h", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 14, 17, 0));
    }

    #[test]
    fn next_week_weekday() {
        let (s, _) = parse_natural_time("thứ 3 tuần sau", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 18, 0, 0));
    }

    #[test]
    fn unqualified_weekday_is_upcoming() {
        let (s, _) = parse_natural_time("chủ nhật", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 16, 0, 0));
    }

    #[test]
    fn unqualified_past_weekday_rolls_forward() {
        // Wednesday reference: "thứ 2" means next week's Monday
        let wednesday = dt(2025, 3, 12, 9, 0);
        let (s, _) = parse_natural_time("thứ 2", wednesday).unwrap();
        assert_eq!(s, dt(2025, 3, 17, 0, 0));
    }

    #[test]
    fn in_two_hours() {
        let (s, _) = parse_natural_time("2 tiếng nữa", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 11, 0));
    }

    #[test]
    fn after_thirty_minutes() {
        let (s, _) = parse_natural_time("sau 30 phút", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 9, 30));
    }

    #[test]
    fn day_month_date() {
        let (s, _) = parse_natural_time("ngày 15/4 8 giờ sáng", reference()).unwrap();
        assert_eq!(s, dt(2025, 4, 15, 8, 0));
    }

    #[test]
    fn half_past_afternoon() {
        let (s, _) = parse_natural_time("3 giờ rưỡi chiều mai", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 11, 15, 30));
    }

    #[test]
    fn evening_clock() {
        let (s, _) = parse_natural_time("7 giờ tối", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 19, 0));
    }

    #[test]
    fn time_only_uses_reference_date() {
        let (s, _) = parse_natural_time("15:30", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 15, 30));
    }

    #[test]
    fn overnight_range_rolls_to_next_day() {
        let (s, e) = parse_natural_time("23h - 1h", reference()).unwrap();
        assert_eq!(s, dt(2025, 3, 10, 23, 0));
        assert_eq!(e, Some(dt(2025, 3, 11, 1, 0)));
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = parse_natural_time("ngày mai 3 giờ chiều", reference()).unwrap();
        let b = parse_natural_time("ngày mai 3 giờ chiều", reference()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn garbage_fails() {
        assert!(parse_natural_time("xin chào", reference()).is_err());
    }

    #[test]
    fn empty_fails() {
        assert!(parse_natural_time("   ", reference()).is_err());
    }

    #[test]
    fn invalid_hour_fails() {
        assert!(parse_natural_time("25h ngày mai", reference()).is_err());
    }
}
