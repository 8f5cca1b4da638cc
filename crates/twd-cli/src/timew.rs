//! Query adapter over the `timew` command-line tool.
//!
//! The structured `export` command is the primary source of durations; the
//! human-readable `summary` table is the fallback when export output cannot
//! be used. Both strategies answer through the same [`QueryOutcome`], so
//! callers never learn which one produced the value.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use twd_core::{Tag, TrackedTime, grand_total, parse_export, scan_summary, tag_total};

use crate::runner::{CommandOutput, CommandRunner, RunnerError};

/// Fatal adapter error: the external tool cannot be invoked at all.
#[derive(Debug, Error)]
#[error("timew is not usable; install Timewarrior or set `timew_bin`")]
pub struct ToolUnavailable(#[source] pub RunnerError);

/// Why a single query produced no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFailure {
    /// The call exceeded its deadline and was killed.
    Timeout,
    /// The call exited non-zero or could not complete.
    Process,
}

impl QueryFailure {
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Timeout => "query timed out",
            Self::Process => "timew invocation failed",
        }
    }
}

/// Outcome of one duration lookup.
///
/// A genuine zero, an absence of data, and a failed query are distinct: the
/// report annotates the latter two instead of passing them off as a
/// trustworthy `00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Time was recorded; the value may legitimately be zero.
    Tracked(TrackedTime),
    /// The tool answered, but nothing is recorded for the query.
    NoData,
    /// The query failed; the reported value is not trustworthy.
    Failed(QueryFailure),
}

impl QueryOutcome {
    /// The duration to put in a report. Failures and absent data read as
    /// zero, with the caller responsible for annotating them.
    #[must_use]
    pub const fn time(&self) -> TrackedTime {
        match self {
            Self::Tracked(time) => *time,
            Self::NoData | Self::Failed(_) => TrackedTime::ZERO,
        }
    }

    #[must_use]
    pub const fn is_reliable(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Stable status label for machine-readable reports.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Tracked(_) => "tracked",
            Self::NoData => "no-data",
            Self::Failed(QueryFailure::Timeout) => "timeout",
            Self::Failed(QueryFailure::Process) => "process-error",
        }
    }
}

/// Adapter for the `timew` executable.
pub struct TimewClient<R> {
    runner: R,
    bin: PathBuf,
    timeout: Duration,
}

impl<R: CommandRunner> TimewClient<R> {
    pub const fn new(runner: R, bin: PathBuf, timeout: Duration) -> Self {
        Self {
            runner,
            bin,
            timeout,
        }
    }

    /// Check once per invocation that the executable answers at all.
    ///
    /// A missing or non-functional tool is the only condition that aborts a
    /// report; individual queries degrade instead.
    pub fn ensure_available(&self) -> Result<(), ToolUnavailable> {
        self.runner
            .run(&self.bin, &["--version"], self.timeout)
            .map(drop)
            .map_err(ToolUnavailable)
    }

    /// Duration recorded for `tag`.
    pub fn query_tag(&self, tag: &Tag, now: DateTime<Utc>) -> Result<QueryOutcome, ToolUnavailable> {
        self.query(Some(tag), now)
    }

    /// Aggregate duration across all tracked activity.
    pub fn query_total(&self, now: DateTime<Utc>) -> Result<QueryOutcome, ToolUnavailable> {
        self.query(None, now)
    }

    fn query(&self, tag: Option<&Tag>, now: DateTime<Utc>) -> Result<QueryOutcome, ToolUnavailable> {
        let (from, to) = export_range(now);
        let output = match self.invoke(&["export", "from", &from, "to", &to])? {
            Ok(output) => output,
            // A timeout already cost the full deadline; trying the other
            // strategy on top would double it. Report the side as failed.
            Err(QueryFailure::Timeout) => return Ok(QueryOutcome::Failed(QueryFailure::Timeout)),
            Err(_) => return self.summary_query(tag),
        };

        match parse_export(&output.stdout) {
            Ok(intervals) => {
                let total = match tag {
                    Some(tag) => tag_total(&intervals, tag, now),
                    None => grand_total(&intervals, now),
                };
                Ok(total.map_or(QueryOutcome::NoData, QueryOutcome::Tracked))
            }
            Err(err) => {
                tracing::warn!(%err, "timew export output unusable, falling back to summary");
                self.summary_query(tag)
            }
        }
    }

    /// Fallback strategy: scan the human-readable summary table.
    fn summary_query(&self, tag: Option<&Tag>) -> Result<QueryOutcome, ToolUnavailable> {
        let mut args = vec!["summary"];
        if let Some(tag) = tag {
            args.push(tag.as_str());
        }

        let output = match self.invoke(&args)? {
            Ok(output) => output,
            Err(failure) => return Ok(QueryOutcome::Failed(failure)),
        };
        Ok(scan_summary(&output.stdout).map_or(QueryOutcome::NoData, QueryOutcome::Tracked))
    }

    /// Run one timew invocation. Only an unusable executable escapes as a
    /// hard error; every other failure is folded into a [`QueryFailure`] for
    /// the caller to degrade on.
    fn invoke(&self, args: &[&str]) -> Result<Result<CommandOutput, QueryFailure>, ToolUnavailable> {
        match self.runner.run(&self.bin, args, self.timeout) {
            Ok(output) if output.success => Ok(Ok(output)),
            Ok(output) => {
                tracing::warn!(?args, stderr = %output.stderr.trim(), "timew exited non-zero");
                Ok(Err(QueryFailure::Process))
            }
            Err(err @ RunnerError::Unavailable { .. }) => Err(ToolUnavailable(err)),
            Err(err @ RunnerError::Timeout { .. }) => {
                tracing::warn!(?args, %err, "timew call timed out");
                Ok(Err(QueryFailure::Timeout))
            }
            Err(err) => {
                tracing::warn!(?args, %err, "timew call failed");
                Ok(Err(QueryFailure::Process))
            }
        }
    }
}

/// Date range handed to `timew export`: the day before `now` through the day
/// after it (`to` is exclusive in timew), so a timezone offset at either
/// midnight cannot clip today's intervals out of the answer.
fn export_range(now: DateTime<Utc>) -> (String, String) {
    let date = now.date_naive();
    let from = date - chrono::Duration::days(1);
    let to = date + chrono::Duration::days(2);
    (
        from.format("%Y-%m-%d").to_string(),
        to.format("%Y-%m-%d").to_string(),
    )
}
