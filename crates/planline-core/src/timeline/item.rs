//! Timeline item types and utilities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single time-ranged row on the timeline.
///
/// Items are owned by the caller; the layout engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(alias = "name")]
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Display-only completion percentage (0-100).
    #[serde(default)]
    pub progress: f64,
}

impl Item {
    /// Create a new item with zero progress.
    ///
    /// No range validation happens here: an `end` before `start` is kept
    /// as given and normalized during layout.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start,
            end,
            progress: 0.0,
        }
    }

    /// Set progress
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// End of the interval used for layout; never earlier than `start`.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end.max(self.start)
    }

    /// Get duration in minutes, zero for inverted ranges
    pub fn duration_minutes(&self) -> i64 {
        (self.effective_end() - self.start).num_minutes()
    }
}
