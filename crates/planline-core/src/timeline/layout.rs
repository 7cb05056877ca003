//! Timeline layout engine.
//!
//! Turns a set of time-ranged items into a uniform grid of day, week or
//! month buckets, places every item on that grid and locates the "today"
//! marker. The computation is a pure function of its inputs: the time zone
//! and the current instant are passed in explicitly.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bucket::{local_date, local_midnight, Bucket, Span, RESOLUTION};
use super::granularity::Granularity;
use super::item::Item;

/// Computed grid plus per-item placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub granularity: Granularity,
    pub buckets: Vec<Bucket>,
    /// Span per item id; `None` when the item touches no bucket.
    pub spans: BTreeMap<String, Option<Span>>,
    /// Horizontal position of "now" across the grid, in `[0, 1)`.
    pub today_fraction: Option<f64>,
}

/// Horizontal geometry of one item's bar, as fractions of the grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub left: f64,
    pub width: f64,
    /// Progress clamped to 0-100.
    pub progress: f64,
}

impl Layout {
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Span of the item with `id`, if it was placed.
    pub fn span(&self, id: &str) -> Option<Span> {
        self.spans.get(id).copied().flatten()
    }

    /// Bar geometry for `item`, or `None` when it has no span.
    pub fn bar(&self, item: &Item) -> Option<Bar> {
        let span = self.span(&item.id)?;
        let count = self.bucket_count() as f64;
        let progress = if item.progress.is_nan() {
            0.0
        } else {
            item.progress.clamp(0.0, 100.0)
        };
        Some(Bar {
            left: span.start_bucket_index as f64 / count,
            width: span.covered_count as f64 / count,
            progress,
        })
    }
}

/// Layout engine bound to the time zone that defines bucket boundaries.
#[derive(Debug, Clone)]
pub struct LayoutEngine<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> LayoutEngine<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Compute the layout of `items` at `granularity`, with `now` as the
    /// current instant.
    pub fn compute(&self, items: &[Item], granularity: Granularity, now: DateTime<Utc>) -> Layout {
        let (first, last) = match overall_range(items) {
            Some((min_start, max_end)) => (
                granularity.align(local_date(&self.tz, min_start)),
                granularity.align(local_date(&self.tz, max_end)),
            ),
            None => {
                let anchor = granularity.align(local_date(&self.tz, now));
                (anchor, anchor)
            }
        };

        let buckets = self.build_buckets(granularity, first, last);
        let spans = items
            .iter()
            .map(|item| (item.id.clone(), span_of(&buckets, item)))
            .collect::<BTreeMap<_, _>>();
        let today_fraction = today_fraction(&buckets, now);

        tracing::debug!(
            granularity = %granularity,
            items = items.len(),
            buckets = buckets.len(),
            unplaced = spans.values().filter(|s| s.is_none()).count(),
            "computed timeline layout"
        );

        Layout {
            granularity,
            buckets,
            spans,
            today_fraction,
        }
    }

    /// Consecutive buckets from the one starting at `first` through the one
    /// starting at `last`, inclusive. Always yields at least one bucket.
    fn build_buckets(&self, granularity: Granularity, first: NaiveDate, last: NaiveDate) -> Vec<Bucket> {
        let mut buckets = Vec::new();
        let mut current = Some(first);

        while let Some(start) = current {
            if start > last && !buckets.is_empty() {
                break;
            }
            let next = granularity.next_start(start);
            let end = match next {
                Some(next) => local_midnight(&self.tz, next) - RESOLUTION,
                None => DateTime::<Utc>::MAX_UTC,
            };
            buckets.push(Bucket {
                start: local_midnight(&self.tz, start),
                end,
                label: granularity.label(start),
            });
            current = next;
        }

        buckets
    }
}

impl Default for LayoutEngine<Local> {
    fn default() -> Self {
        Self::new(Local)
    }
}

/// Compute a layout in the local time zone at the current instant.
pub fn compute_layout(items: &[Item], granularity: Granularity) -> Layout {
    LayoutEngine::<Local>::default().compute(items, granularity, Utc::now())
}

/// Earliest start and latest (normalized) end across `items`.
fn overall_range(items: &[Item]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let min_start = items.iter().map(|item| item.start).min()?;
    let max_end = items.iter().map(Item::effective_end).max()?;
    Some((min_start, max_end))
}

/// First and last bucket overlapping the item's interval.
fn span_of(buckets: &[Bucket], item: &Item) -> Option<Span> {
    let (start, end) = (item.start, item.effective_end());
    let first = buckets.iter().position(|b| b.overlaps(start, end))?;
    let last = buckets.iter().rposition(|b| b.overlaps(start, end))?;
    Some(Span::new(first, last))
}

/// Whole buckets before `now` plus the fraction of the bucket holding it,
/// divided by the bucket count.
fn today_fraction(buckets: &[Bucket], now: DateTime<Utc>) -> Option<f64> {
    let first = buckets.first()?;
    let last = buckets.last()?;
    if now < first.start || now - last.start >= last.width() {
        return None;
    }

    let mut elapsed = 0.0;
    for bucket in buckets {
        if bucket.contains(now) {
            elapsed += bucket.fraction_of(now);
            break;
        }
        elapsed += 1.0;
    }
    Some(elapsed / buckets.len() as f64)
}
