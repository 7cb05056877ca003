//! Timeline layout for Gantt-style charts.
//!
//! This module provides:
//! - Day/week/month bucket alignment and labels
//! - Bucket grid construction over a set of items
//! - Per-item bucket spans and the "today" marker position

mod bucket;
mod granularity;
mod item;
mod layout;

pub use bucket::{Bucket, Span, RESOLUTION};
pub use granularity::{Granularity, ParseGranularityError};
pub use item::Item;
pub use layout::{compute_layout, Bar, Layout, LayoutEngine};
