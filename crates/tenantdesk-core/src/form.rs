//! Helpers shared by the add/edit request bodies.

use chrono::{Days, NaiveDate};

/// Date format of every date field the API accepts in a form.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Days a new branch licence runs by default.
pub const DEFAULT_BRANCH_TERM_DAYS: u64 = 365;

pub fn format_date(date: NaiveDate) -> String {
    date.format(FORM_DATE_FORMAT).to_string()
}

/// The date part of a server timestamp (`2024-05-01T00:00:00` → `2024-05-01`),
/// or `fallback` when the record has no date.
pub fn date_part(raw: Option<&str>, fallback: NaiveDate) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.split('T').next().unwrap_or(value).to_string(),
        None => format_date(fallback),
    }
}

/// Default expiry for a branch created on `today`.
pub fn default_branch_expiry(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_BRANCH_TERM_DAYS))
        .unwrap_or(today)
}

pub(crate) fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_part() {
        let fallback = day(2026, 1, 1);
        assert_eq!(date_part(Some("2024-05-01T10:00:00"), fallback), "2024-05-01");
        assert_eq!(date_part(Some("2024-05-01"), fallback), "2024-05-01");
        assert_eq!(date_part(Some(""), fallback), "2026-01-01");
        assert_eq!(date_part(None, fallback), "2026-01-01");
    }

    #[test]
    fn test_default_branch_expiry() {
        assert_eq!(default_branch_expiry(day(2026, 3, 1)), day(2027, 3, 1));
        // 2028 is a leap year: 365 days from Jan 1st lands on Dec 31st.
        assert_eq!(default_branch_expiry(day(2028, 1, 1)), day(2028, 12, 31));
    }
}
