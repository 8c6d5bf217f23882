//! Habit data model.
//!
//! A habit is a title plus a sparse map of calendar days to completion
//! flags. A day that has no entry counts as not completed; read flags through
//! [`Habit::is_completed`] rather than indexing the map.
//!
//! Habits are values: the store never edits one in place, it builds a new
//! `Habit` for every change and swaps it into the next snapshot.

mod store;
mod validation;
mod window;

pub use store::{HabitStore, Snapshot};
pub use validation::{validate_title, TitleValidator, DEFAULT_MAX_TITLE_LEN, TITLE_FIELD};
pub use window::{last_n_days, last_n_days_from_today, today, DayBoundary, DEFAULT_STRIP_DAYS};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Stable identifier of a habit. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HabitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for HabitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for HabitId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HabitId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A calendar day, written as `YYYY-MM-DD` everywhere it leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from calendar parts. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Short `MM-DD` label used on the detail view's day buttons.
    pub fn month_day(&self) -> String {
        self.0.format("%m-%d").to_string()
    }

    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidDate`] for anything else.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: value.to_string(),
        };
        // chrono accepts unpadded fields; the key format does not.
        if value.len() != 10 {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(value, DAY_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DayKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A trackable recurring activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    id: HabitId,
    title: String,
    #[serde(default)]
    completed_days: BTreeMap<DayKey, bool>,
}

impl Habit {
    /// A habit with no completed days.
    ///
    /// The title is taken as given; stores validate it when the habit is
    /// seeded or created.
    pub fn new(id: impl Into<HabitId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed_days: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw completion entries. Days without an entry are not completed.
    pub fn completed_days(&self) -> &BTreeMap<DayKey, bool> {
        &self.completed_days
    }

    /// Completion flag for `day`, `false` when the day has no entry.
    pub fn is_completed(&self, day: DayKey) -> bool {
        self.completed_days.get(&day).copied().unwrap_or(false)
    }

    /// Completion flags for each day of `window`, in window order.
    pub fn strip(&self, window: &[DayKey]) -> Vec<bool> {
        window.iter().map(|day| self.is_completed(*day)).collect()
    }

    /// Number of completed days inside `window`.
    pub fn completed_count(&self, window: &[DayKey]) -> usize {
        window.iter().filter(|day| self.is_completed(**day)).count()
    }

    pub(crate) fn with_title(&self, title: String) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    pub(crate) fn with_day_toggled(&self, day: DayKey) -> Self {
        let mut completed_days = self.completed_days.clone();
        completed_days.insert(day, !self.is_completed(day));
        Self {
            completed_days,
            ..self.clone()
        }
    }
}
