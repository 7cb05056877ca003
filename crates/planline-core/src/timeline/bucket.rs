//! Grid columns and per-item bucket spans.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Smallest step between one bucket's end and the next bucket's start.
pub const RESOLUTION: Duration = Duration::milliseconds(1);

/// One column of the timeline grid, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: DateTime<Utc>,
    /// Last millisecond of the bucket (23:59:59.999 local time).
    pub end: DateTime<Utc>,
    pub label: String,
}

impl Bucket {
    /// Full width of the bucket, measured up to the next bucket's start.
    pub fn width(&self) -> Duration {
        self.end - self.start + RESOLUTION
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant - self.start < self.width()
    }

    /// Closed-interval overlap test against `[start, end]`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end && end >= self.start
    }

    /// Position of `instant` inside this bucket, in `[0, 1)`.
    pub fn fraction_of(&self, instant: DateTime<Utc>) -> f64 {
        let width = self.width().num_milliseconds();
        if width <= 0 {
            return 0.0;
        }
        let offset = (instant - self.start).num_milliseconds().clamp(0, width - 1);
        offset as f64 / width as f64
    }
}

/// Range of buckets covered by one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_bucket_index: usize,
    pub end_bucket_index: usize,
    pub covered_count: usize,
}

impl Span {
    pub fn new(start_bucket_index: usize, end_bucket_index: usize) -> Self {
        Self {
            start_bucket_index,
            end_bucket_index,
            covered_count: end_bucket_index - start_bucket_index + 1,
        }
    }
}

/// Wall-clock step used to find the first existing time after a DST gap.
const GAP_STEP_MINUTES: i64 = 15;
/// Search at most one day past a skipped midnight.
const GAP_STEPS: i64 = 24 * 60 / GAP_STEP_MINUTES;

/// UTC instant of local midnight on `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight skipped
/// by a DST jump resolves to the first wall time that exists after the gap.
/// Bucket starts and ends both go through here, so the grid stays contiguous.
pub(crate) fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=GAP_STEPS)
        .find_map(|step| {
            let wall = midnight + Duration::minutes(step * GAP_STEP_MINUTES);
            earliest_instant(tz.from_local_datetime(&wall))
        })
        .unwrap_or_else(|| {
            let offset = tz.offset_from_utc_datetime(&midnight).fix();
            let shifted = midnight - Duration::seconds(i64::from(offset.local_minus_utc()));
            Utc.from_utc_datetime(&shifted)
        })
}

/// Earliest UTC instant a local wall time maps to, if it exists at all.
///
/// `LocalResult::Ambiguous` carries no ordering guarantee across time zone
/// implementations, so both candidates are compared.
fn earliest_instant<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    match result {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(a, b) => Some(a.with_timezone(&Utc).min(b.with_timezone(&Utc))),
        LocalResult::None => None,
    }
}

/// Local calendar date of `instant` in `tz`.
pub(crate) fn local_date<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}
