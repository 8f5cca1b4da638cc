//! Grand-total report across all tracked activity.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use twd_core::TrackedTime;

use crate::runner::CommandRunner;
use crate::timew::{QueryOutcome, TimewClient};

/// JSON shape of the total report.
#[derive(Debug, Serialize)]
struct JsonTotal {
    time: TrackedTime,
    seconds: u64,
    status: &'static str,
}

/// Human-readable total output. An absent or unreliable value still prints
/// as `00:00:00`, with the annotation saying so.
#[must_use]
pub fn format_total(outcome: &QueryOutcome) -> String {
    let mut output = String::new();
    writeln!(output, "total tracked: {}", outcome.time()).unwrap();
    match outcome {
        QueryOutcome::NoData => writeln!(output, "note: no time recorded").unwrap(),
        QueryOutcome::Failed(failure) => writeln!(
            output,
            "warning: total is unreliable ({})",
            failure.describe()
        )
        .unwrap(),
        QueryOutcome::Tracked(_) => {}
    }
    output
}

/// Runs the total command.
pub fn run<R: CommandRunner, W: Write>(
    writer: &mut W,
    client: &TimewClient<R>,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let outcome = client.query_total(now)?;

    if json {
        let report = JsonTotal {
            time: outcome.time(),
            seconds: outcome.time().seconds(),
            status: outcome.status(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_total(&outcome))?;
    }
    Ok(())
}
