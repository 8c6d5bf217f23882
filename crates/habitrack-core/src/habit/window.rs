//! Trailing day window for the completion strip.
//!
//! Both the list and detail views render the same window, so they go through
//! the same functions here and agree on order (oldest first) and format.

use chrono::{Days, Local, Utc};
use serde::{Deserialize, Serialize};

use super::DayKey;

/// Width of the completion strip when nothing else is configured.
pub const DEFAULT_STRIP_DAYS: usize = 5;

/// Which clock decides what "today" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Calendar day in UTC.
    #[default]
    Utc,
    /// Calendar day in the machine's local time zone.
    Local,
}

/// The current calendar day under `boundary`.
pub fn today(boundary: DayBoundary) -> DayKey {
    match boundary {
        DayBoundary::Utc => DayKey::new(Utc::now().date_naive()),
        DayBoundary::Local => DayKey::new(Local::now().date_naive()),
    }
}

/// `n` consecutive days ending at `reference` (inclusive), oldest first.
///
/// The window never reaches past the first representable calendar date, so
/// it holds fewer than `n` days only when `reference` is that close to it.
///
/// ```
/// use habitrack_core::habit::{last_n_days, DayKey};
///
/// let reference = DayKey::parse("2024-03-10").unwrap();
/// let days: Vec<String> = last_n_days(3, reference).iter().map(|d| d.to_string()).collect();
/// assert_eq!(days, ["2024-03-08", "2024-03-09", "2024-03-10"]);
/// ```
pub fn last_n_days(n: usize, reference: DayKey) -> Vec<DayKey> {
    let mut days: Vec<DayKey> = (0..n as u64)
        .map_while(|back| reference.date().checked_sub_days(Days::new(back)))
        .map(DayKey::new)
        .collect();
    days.reverse();
    days
}

/// [`last_n_days`] ending at today's date under `boundary`.
pub fn last_n_days_from_today(n: usize, boundary: DayBoundary) -> Vec<DayKey> {
    last_n_days(n, today(boundary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn keys(days: &[DayKey]) -> Vec<String> {
        days.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn five_days_ending_at_reference() {
        let reference = DayKey::parse("2024-03-10").unwrap();
        assert_eq!(
            keys(&last_n_days(5, reference)),
            ["2024-03-06", "2024-03-07", "2024-03-08", "2024-03-09", "2024-03-10"]
        );
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let reference = DayKey::parse("2024-03-01").unwrap();
        assert_eq!(
            keys(&last_n_days(3, reference)),
            ["2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn crosses_year_boundary() {
        let reference = DayKey::parse("2025-01-02").unwrap();
        assert_eq!(
            keys(&last_n_days(4, reference)),
            ["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"]
        );
    }

    #[test]
    fn zero_width_window_is_empty() {
        let reference = DayKey::parse("2024-03-10").unwrap();
        assert!(last_n_days(0, reference).is_empty());
    }

    #[test]
    fn stops_at_the_first_representable_date() {
        let first = NaiveDate::MIN;
        let reference = DayKey::new(first.succ_opt().unwrap());
        let days = last_n_days(5, reference);
        assert_eq!(days, [DayKey::new(first), reference]);
    }

    #[test]
    fn window_from_today_ends_today() {
        let days = last_n_days_from_today(DEFAULT_STRIP_DAYS, DayBoundary::Utc);
        assert_eq!(days.len(), DEFAULT_STRIP_DAYS);
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
        // Allow for the date rolling over between the two clock reads.
        let now = today(DayBoundary::Utc);
        assert!(days[DEFAULT_STRIP_DAYS - 1] <= now);
    }

    #[test]
    fn boundary_deserializes_lowercase() {
        let boundary: DayBoundary = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(boundary, DayBoundary::Local);
    }
}
