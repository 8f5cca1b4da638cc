//! Comparison report between two tags.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use twd_core::{Tag, TrackedTime};

use crate::runner::CommandRunner;
use crate::timew::{QueryOutcome, TimewClient, ToolUnavailable};

/// One tag's resolved reading.
#[derive(Debug)]
pub struct TagReading {
    pub tag: Tag,
    pub outcome: QueryOutcome,
}

/// Computed comparison between two tags.
#[derive(Debug)]
pub struct Comparison {
    pub first: TagReading,
    pub second: TagReading,
    pub difference: TrackedTime,
}

impl Comparison {
    const fn readings(&self) -> [&TagReading; 2] {
        [&self.first, &self.second]
    }
}

/// Fetch both tags and assemble the comparison.
///
/// The two lookups run sequentially but are independent: one side failing or
/// timing out never aborts the other, only total tool unavailability does.
pub fn compare<R: CommandRunner>(
    client: &TimewClient<R>,
    first: Tag,
    second: Tag,
    now: DateTime<Utc>,
) -> Result<Comparison, ToolUnavailable> {
    let first = TagReading {
        outcome: client.query_tag(&first, now)?,
        tag: first,
    };
    let second = TagReading {
        outcome: client.query_tag(&second, now)?,
        tag: second,
    };
    let difference = first.outcome.time().abs_diff(second.outcome.time());

    Ok(Comparison {
        first,
        second,
        difference,
    })
}

// ========== Human-readable Output ==========

/// Human-readable comparison output: both raw durations, the absolute
/// difference with the leading tag named, and annotations for any side that
/// is zero, absent, or unreliable.
#[must_use]
pub fn format_comparison(cmp: &Comparison) -> String {
    let mut output = String::new();
    let width = cmp
        .first
        .tag
        .as_str()
        .len()
        .max(cmp.second.tag.as_str().len());

    for reading in cmp.readings() {
        writeln!(
            output,
            "{:<width$}  {}",
            reading.tag.as_str(),
            reading.outcome.time()
        )
        .unwrap();
    }
    writeln!(output).unwrap();

    let leader = if cmp.difference.is_zero() {
        String::new()
    } else if cmp.first.outcome.time() > cmp.second.outcome.time() {
        format!(" ({} leads)", cmp.first.tag)
    } else {
        format!(" ({} leads)", cmp.second.tag)
    };
    writeln!(output, "difference: {}{leader}", cmp.difference).unwrap();

    for note in annotations(cmp) {
        writeln!(output, "{note}").unwrap();
    }

    output
}

fn annotations(cmp: &Comparison) -> Vec<String> {
    let mut notes = Vec::new();
    for reading in cmp.readings() {
        match reading.outcome {
            QueryOutcome::NoData => {
                notes.push(format!("note: no time recorded for '{}'", reading.tag));
            }
            QueryOutcome::Tracked(time) if time.is_zero() => {
                notes.push(format!(
                    "note: time recorded for '{}' adds up to zero",
                    reading.tag
                ));
            }
            QueryOutcome::Failed(failure) => {
                notes.push(format!(
                    "warning: value for '{}' is unreliable ({})",
                    reading.tag,
                    failure.describe()
                ));
            }
            QueryOutcome::Tracked(_) => {}
        }
    }
    notes
}

// ========== JSON Output ==========

/// JSON shape of the comparison report.
#[derive(Debug, Serialize)]
struct JsonComparison<'a> {
    first: JsonReading<'a>,
    second: JsonReading<'a>,
    difference: TrackedTime,
    difference_seconds: u64,
}

#[derive(Debug, Serialize)]
struct JsonReading<'a> {
    tag: &'a Tag,
    time: TrackedTime,
    seconds: u64,
    status: &'static str,
}

impl<'a> From<&'a TagReading> for JsonReading<'a> {
    fn from(reading: &'a TagReading) -> Self {
        Self {
            tag: &reading.tag,
            time: reading.outcome.time(),
            seconds: reading.outcome.time().seconds(),
            status: reading.outcome.status(),
        }
    }
}

fn json_report(cmp: &Comparison) -> JsonComparison<'_> {
    JsonComparison {
        first: JsonReading::from(&cmp.first),
        second: JsonReading::from(&cmp.second),
        difference: cmp.difference,
        difference_seconds: cmp.difference.seconds(),
    }
}

// ========== Public Interface ==========

/// Runs the comparison command.
pub fn run<R: CommandRunner, W: Write>(
    writer: &mut W,
    client: &TimewClient<R>,
    first: Tag,
    second: Tag,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let comparison = compare(client, first, second, now)?;

    if json {
        let report = serde_json::to_string_pretty(&json_report(&comparison))?;
        writeln!(writer, "{report}")?;
    } else {
        write!(writer, "{}", format_comparison(&comparison))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::timew::QueryFailure;

    fn reading(tag: &str, outcome: QueryOutcome) -> TagReading {
        TagReading {
            tag: Tag::new(tag).unwrap(),
            outcome,
        }
    }

    fn comparison(first: TagReading, second: TagReading) -> Comparison {
        let difference = first.outcome.time().abs_diff(second.outcome.time());
        Comparison {
            first,
            second,
            difference,
        }
    }

    #[test]
    fn prints_both_raw_durations_and_the_difference() {
        let cmp = comparison(
            reading("work", QueryOutcome::Tracked(TrackedTime::from_seconds(3600))),
            reading("play", QueryOutcome::Tracked(TrackedTime::from_seconds(1800))),
        );

        assert_eq!(cmp.difference.to_string(), "00:30:00");
        assert_snapshot!(format_comparison(&cmp), @r"
        work  01:00:00
        play  00:30:00

        difference: 00:30:00 (work leads)
        ");
    }

    #[test]
    fn difference_is_order_insensitive() {
        let a = comparison(
            reading("work", QueryOutcome::Tracked(TrackedTime::from_seconds(3600))),
            reading("play", QueryOutcome::Tracked(TrackedTime::from_seconds(1800))),
        );
        let b = comparison(
            reading("play", QueryOutcome::Tracked(TrackedTime::from_seconds(1800))),
            reading("work", QueryOutcome::Tracked(TrackedTime::from_seconds(3600))),
        );
        assert_eq!(a.difference, b.difference);
    }

    #[test]
    fn pads_tags_to_a_common_width() {
        let cmp = comparison(
            reading(
                "deep work",
                QueryOutcome::Tracked(TrackedTime::from_seconds(7200)),
            ),
            reading("play", QueryOutcome::Tracked(TrackedTime::from_seconds(7200))),
        );

        assert_snapshot!(format_comparison(&cmp), @r"
        deep work  02:00:00
        play       02:00:00

        difference: 00:00:00
        ");
    }

    #[test]
    fn absent_side_is_annotated_not_silently_zero() {
        let cmp = comparison(
            reading("work", QueryOutcome::Tracked(TrackedTime::from_seconds(3600))),
            reading("play", QueryOutcome::NoData),
        );

        let output = format_comparison(&cmp);
        assert!(output.contains("play  00:00:00"));
        assert!(output.contains("note: no time recorded for 'play'"));
    }

    #[test]
    fn recorded_zero_gets_its_own_note() {
        let cmp = comparison(
            reading("work", QueryOutcome::Tracked(TrackedTime::ZERO)),
            reading("play", QueryOutcome::Tracked(TrackedTime::from_seconds(60))),
        );

        let output = format_comparison(&cmp);
        assert!(output.contains("note: time recorded for 'work' adds up to zero"));
    }

    #[test]
    fn unreliable_side_carries_a_warning() {
        let cmp = comparison(
            reading("work", QueryOutcome::Tracked(TrackedTime::from_seconds(3600))),
            reading("play", QueryOutcome::Failed(QueryFailure::Timeout)),
        );

        let output = format_comparison(&cmp);
        assert!(output.contains("difference: 01:00:00 (work leads)"));
        assert!(output.contains("warning: value for 'play' is unreliable (query timed out)"));
    }

    #[test]
    fn json_report_carries_status_per_side() {
        let cmp = comparison(
            reading("work", QueryOutcome::Tracked(TrackedTime::from_seconds(3600))),
            reading("play", QueryOutcome::Failed(QueryFailure::Timeout)),
        );

        let json = serde_json::to_value(json_report(&cmp)).unwrap();
        assert_eq!(json["first"]["tag"], "work");
        assert_eq!(json["first"]["time"], "01:00:00");
        assert_eq!(json["first"]["seconds"], 3600);
        assert_eq!(json["first"]["status"], "tracked");
        assert_eq!(json["second"]["status"], "timeout");
        assert_eq!(json["difference"], "01:00:00");
        assert_eq!(json["difference_seconds"], 3600);
    }
}
