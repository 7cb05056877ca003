//! Bucket width and boundary alignment.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of one column in the timeline grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// First local date of the bucket containing `date`.
    ///
    /// Weeks start on Monday (ISO 8601), months on the 1st.
    pub fn align(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Start of the bucket following the one that starts at `start`.
    ///
    /// Returns `None` only past the last representable date.
    pub fn next_start(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Day => start.succ_opt(),
            Self::Week => start.checked_add_days(Days::new(7)),
            Self::Month => self.align(start).checked_add_months(Months::new(1)),
        }
    }

    /// Header label for the bucket starting at `start`.
    ///
    /// Day buckets read `Jan 05`, week buckets `W2 2025` using the ISO week
    /// and ISO week-year, month buckets `Jan 2025`.
    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            Self::Day => start.format("%b %d").to_string(),
            Self::Week => {
                let week = start.iso_week();
                format!("W{} {}", week.week(), week.year())
            }
            Self::Month => start.format("%b %Y").to_string(),
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Self::Month
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown granularity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGranularityError(pub String);

impl fmt::Display for ParseGranularityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown granularity '{}': expected day, week or month",
            self.0
        )
    }
}

impl std::error::Error for ParseGranularityError {}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(ParseGranularityError(s.to_string())),
        }
    }
}
