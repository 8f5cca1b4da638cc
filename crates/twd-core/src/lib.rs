//! Core domain logic for the timew tag reporter.
//!
//! This crate contains the pure pieces of `twd`:
//! - the canonical `HH:MM:SS` duration codec
//! - tag validation
//! - `timew export` interval records and their summation
//! - the fallback scanner for `timew summary` tables
//!
//! Nothing here performs I/O; the `timew` subprocess boundary lives in the
//! CLI crate.

pub mod interval;
pub mod summary;
pub mod tag;
pub mod time;

pub use interval::{ExportError, Interval, grand_total, parse_export, parse_timestamp, tag_total};
pub use summary::scan_summary;
pub use tag::{InvalidTag, Tag};
pub use time::{InvalidDuration, TrackedTime};
