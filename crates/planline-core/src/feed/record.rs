//! Project and task records as returned by the REST API, and their
//! conversion into timeline items.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::date::parse_instant;
use crate::error::FeedError;
use crate::timeline::{Granularity, Item};

/// Progress shown for every project bar.
pub const PROJECT_PROGRESS: f64 = 50.0;

/// Status string marking a finished task.
pub const STATUS_COMPLETED: &str = "Completed";

/// Label used for tasks without a title.
pub const UNTITLED_TASK: &str = "Untitled Task";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub project_id: Option<i64>,
}

impl ProjectRecord {
    pub fn item_id(&self) -> String {
        format!("Project-{}", self.id)
    }

    /// Convert to an item; an end not after the start is pushed one day out.
    ///
    /// # Errors
    /// Returns an error when either date is missing or unparsable.
    pub fn to_item(&self) -> Result<Item, FeedError> {
        let id = self.item_id();
        let start = required_date(&id, "startDate", self.start_date.as_deref())?;
        let end = required_date(&id, "endDate", self.end_date.as_deref())?;
        let end = if end > start {
            end
        } else {
            start + Duration::days(1)
        };

        Ok(Item::new(id, self.name.clone(), start, end).with_progress(PROJECT_PROGRESS))
    }
}

impl TaskRecord {
    pub fn item_id(&self) -> String {
        format!("Task-{}", self.id)
    }

    /// 100 when completed, otherwise ten percent per story point up to 100.
    pub fn progress(&self) -> f64 {
        if self.status.as_deref() == Some(STATUS_COMPLETED) {
            return 100.0;
        }
        match self.points {
            Some(points) if points != 0.0 => (points * 10.0).min(100.0),
            _ => 0.0,
        }
    }

    /// Convert to an item, keeping the dates exactly as given.
    ///
    /// # Errors
    /// Returns an error when either date is missing or unparsable.
    pub fn to_item(&self) -> Result<Item, FeedError> {
        let id = self.item_id();
        let start = required_date(&id, "startDate", self.start_date.as_deref())?;
        let due = required_date(&id, "dueDate", self.due_date.as_deref())?;
        let label = self
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_TASK);

        Ok(Item::new(id, label, start, due).with_progress(self.progress()))
    }
}

fn required_date(
    record: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, FeedError> {
    let value = value.ok_or_else(|| FeedError::MissingField {
        record: record.to_string(),
        field,
    })?;
    parse_instant(value)
}

/// Items for every project that carries both dates.
pub fn project_items(records: &[ProjectRecord]) -> Vec<Item> {
    records
        .iter()
        .filter_map(|record| match record.to_item() {
            Ok(item) => Some(item),
            Err(err) => {
                log_dropped(&err);
                None
            }
        })
        .collect()
}

/// Items for every task that carries both dates.
///
/// The day view additionally skips tasks whose due date is not after their
/// start date, since they would not fill a single day column.
pub fn task_items(records: &[TaskRecord], granularity: Granularity) -> Vec<Item> {
    records
        .iter()
        .filter_map(|record| match record.to_item() {
            Ok(item) => Some(item),
            Err(err) => {
                log_dropped(&err);
                None
            }
        })
        .filter(|item| {
            let keep = granularity != Granularity::Day || item.end > item.start;
            if !keep {
                tracing::debug!(id = %item.id, "skipping zero-length task in day view");
            }
            keep
        })
        .collect()
}

fn log_dropped(err: &FeedError) {
    match err {
        FeedError::MissingField { record, field } => {
            tracing::debug!(%record, field, "record has no date, left off the timeline");
        }
        FeedError::InvalidDate { value } => {
            tracing::warn!(%value, "unparsable record date, left off the timeline");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: i64, start: Option<&str>, due: Option<&str>) -> TaskRecord {
        TaskRecord {
            id,
            title: Some(format!("Task {id}")),
            status: None,
            priority: None,
            start_date: start.map(str::to_string),
            due_date: due.map(str::to_string),
            points: None,
            project_id: Some(1),
        }
    }

    #[test]
    fn project_with_inverted_dates_gets_one_day() {
        let record = ProjectRecord {
            id: 3,
            name: "Migration".into(),
            description: None,
            start_date: Some("2025-05-10T00:00:00Z".into()),
            end_date: Some("2025-05-01T00:00:00Z".into()),
        };
        let item = record.to_item().unwrap();
        assert_eq!(item.id, "Project-3");
        assert_eq!(item.end, Utc.with_ymd_and_hms(2025, 5, 11, 0, 0, 0).unwrap());
        assert_eq!(item.progress, PROJECT_PROGRESS);
    }

    #[test]
    fn projects_without_dates_are_dropped() {
        let records: Vec<ProjectRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Dated", "startDate": "2025-01-01", "endDate": "2025-02-01"},
                {"id": 2, "name": "Undated"},
                {"id": 3, "name": "Broken", "startDate": "soon", "endDate": "2025-02-01"}
            ]"#,
        )
        .unwrap();
        let items = project_items(&records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "Dated");
    }

    #[test]
    fn task_progress_rules() {
        let mut record = task(1, Some("2025-01-01"), Some("2025-01-03"));
        assert_eq!(record.progress(), 0.0);
        record.points = Some(4.0);
        assert_eq!(record.progress(), 40.0);
        record.points = Some(25.0);
        assert_eq!(record.progress(), 100.0);
        record.points = Some(2.0);
        record.status = Some(STATUS_COMPLETED.into());
        assert_eq!(record.progress(), 100.0);
    }

    #[test]
    fn untitled_tasks_get_placeholder_label() {
        let mut record = task(9, Some("2025-01-01"), Some("2025-01-03"));
        record.title = None;
        assert_eq!(record.to_item().unwrap().label, UNTITLED_TASK);
        record.title = Some(String::new());
        assert_eq!(record.to_item().unwrap().label, UNTITLED_TASK);
    }

    #[test]
    fn missing_due_date_reports_field() {
        let err = task(5, Some("2025-01-01"), None).to_item().unwrap_err();
        assert_eq!(
            err,
            FeedError::MissingField {
                record: "Task-5".into(),
                field: "dueDate"
            }
        );
    }

    #[test]
    fn day_view_skips_zero_length_tasks() {
        let records = vec![
            task(1, Some("2025-01-01"), Some("2025-01-04")),
            task(2, Some("2025-01-02"), Some("2025-01-02")),
            task(3, Some("2025-01-05"), Some("2025-01-03")),
        ];
        let day: Vec<_> = task_items(&records, Granularity::Day)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(day, ["Task-1"]);

        let week = task_items(&records, Granularity::Week);
        assert_eq!(week.len(), 3);
    }
}
