//! # Planline Core Library
//!
//! This library provides the core logic behind Planline's project and task
//! timelines. The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Timeline**: A pure layout engine that discretizes item date ranges
//!   into day, week or month buckets and positions each item on that grid
//! - **Feed**: Conversion of REST project/task records into timeline items
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`LayoutEngine`]: Bucket grid, spans and today marker
//! - [`Item`]: One time-ranged row on the chart
//! - [`Config`]: Application configuration management

pub mod error;
pub mod feed;
pub mod storage;
pub mod timeline;

pub use error::{ConfigError, CoreError, FeedError};
pub use feed::{project_items, task_items, ProjectRecord, TaskRecord};
pub use storage::{Config, Zone};
pub use timeline::{
    compute_layout, Bar, Bucket, Granularity, Item, Layout, LayoutEngine, Span,
};
