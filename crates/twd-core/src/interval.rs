//! `timew export` interval records and their summation.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::tag::Tag;
use crate::time::TrackedTime;

/// Compact UTC timestamp layout used by `timew export`.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// `YYYYMMDDTHHMMSSZ` is fixed-width; anything longer or shorter is rejected
/// before chrono gets a chance to be lenient about it.
const TIMESTAMP_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
    #[error("export output is not a JSON interval array: {0}")]
    Json(#[from] serde_json::Error),
}

/// Interval record as emitted by `timew export`. Unknown fields (`id`,
/// `annotation`, ...) are ignored; timestamps stay raw until converted.
#[derive(Debug, Deserialize)]
struct RawInterval {
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// A single tracked interval. Read-only input data owned by Timewarrior, not
/// by this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    /// Absent while the interval is still being tracked.
    pub end: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl Interval {
    /// Seconds covered by this interval, using `now` as the effective end
    /// while it is still open. A negative span (end before start, or an open
    /// interval starting after `now`) counts as zero.
    #[must_use]
    pub fn tracked_seconds(&self, now: DateTime<Utc>) -> u64 {
        let end = self.end.unwrap_or(now);
        u64::try_from((end - self.start).num_seconds()).unwrap_or(0)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag.as_str())
    }
}

/// Parse a compact `YYYYMMDDTHHMMSSZ` UTC timestamp.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ExportError> {
    if s.len() != TIMESTAMP_LEN {
        return Err(ExportError::InvalidTimestamp(s.to_string()));
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ExportError::InvalidTimestamp(s.to_string()))
}

/// Parse the JSON array produced by `timew export`.
pub fn parse_export(json: &str) -> Result<Vec<Interval>, ExportError> {
    let raw: Vec<RawInterval> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|record| {
            Ok(Interval {
                start: parse_timestamp(&record.start)?,
                end: record.end.as_deref().map(parse_timestamp).transpose()?,
                tags: record.tags,
            })
        })
        .collect()
}

/// Total tracked time across the intervals carrying `tag`.
///
/// Returns `None` when no interval matches, so callers can tell "nothing
/// recorded for this tag" apart from a recorded zero.
#[must_use]
pub fn tag_total(intervals: &[Interval], tag: &Tag, now: DateTime<Utc>) -> Option<TrackedTime> {
    total_of(intervals.iter().filter(|i| i.has_tag(tag)), now)
}

/// Total tracked time across every interval, or `None` when there are none.
#[must_use]
pub fn grand_total(intervals: &[Interval], now: DateTime<Utc>) -> Option<TrackedTime> {
    total_of(intervals.iter(), now)
}

fn total_of<'a>(
    intervals: impl Iterator<Item = &'a Interval>,
    now: DateTime<Utc>,
) -> Option<TrackedTime> {
    let mut matched = false;
    let mut sum = TrackedTime::ZERO;
    for interval in intervals {
        matched = true;
        sum = sum.saturating_add(TrackedTime::from_seconds(interval.tracked_seconds(now)));
    }
    matched.then_some(sum)
}
