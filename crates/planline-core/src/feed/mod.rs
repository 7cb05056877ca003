//! Ingestion of upstream project and task records.
//!
//! Date parsing and record filtering happen here, before items reach the
//! layout engine.

mod date;
mod record;

pub use date::parse_instant;
pub use record::{
    project_items, task_items, ProjectRecord, TaskRecord, PROJECT_PROGRESS, STATUS_COMPLETED,
    UNTITLED_TASK,
};
