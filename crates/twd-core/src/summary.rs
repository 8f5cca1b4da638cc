//! Fallback scanner for the human-readable `timew summary` table.

use crate::time::TrackedTime;

/// Extract the aggregate duration from `timew summary` output.
///
/// The aggregate row is the line whose first token is `Total`, however the
/// table happens to be aligned; the value is the last whitespace-delimited
/// token on that line that contains a `:`. Header rows, separator rows, and
/// other styling never start with the label, so they fall through. `None`
/// means the table carried no aggregate at all, i.e. nothing was tracked.
#[must_use]
pub fn scan_summary(text: &str) -> Option<TrackedTime> {
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(label) = tokens.next() else {
            continue;
        };
        if !label.eq_ignore_ascii_case("total") {
            continue;
        }

        let Some(token) = line.split_whitespace().rev().find(|t| t.contains(':')) else {
            tracing::trace!(line, "total-labeled line without a time token");
            continue;
        };
        match token.parse::<TrackedTime>() {
            Ok(time) => return Some(time),
            Err(err) => {
                tracing::debug!(%err, token, "unparseable time token on aggregate line");
            }
        }
    }
    None
}
