use tracing::{debug, warn};

use edit_directives::{EditDirective, EditKind};

use crate::report::{ApplyReport, SkipReason, SkippedEdit};

/// Application output: the patched text plus its diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdits {
    pub text: String,
    pub report: ApplyReport,
}

/// Applies an already-ordered directive list to the original text.
///
/// Degenerate inputs (empty original, empty list) return the original
/// unchanged. Line numbers are 1-based against the original buffer; the list
/// must be sorted descending by `start_line` (see
/// [`edit_directives::sort_for_application`]).
#[must_use]
pub fn apply_edit_directives(original: &str, directives: &[EditDirective]) -> AppliedEdits {
    if original.is_empty() || directives.is_empty() {
        return AppliedEdits {
            text: original.to_string(),
            report: ApplyReport::default(),
        };
    }

    // Split on '\n' only; any '\r' stays inside its line and survives the
    // round trip, so the original line-break convention is preserved.
    let mut lines: Vec<String> = original.split('\n').map(str::to_string).collect();
    let mut report = ApplyReport::default();

    debug!(
        original_lines = lines.len(),
        directives = directives.len(),
        "applying edit directives"
    );

    for (index, directive) in directives.iter().enumerate() {
        match apply_one(&mut lines, directive) {
            Ok(()) => {
                debug!(
                    kind = directive.kind.as_str(),
                    start_line = directive.start_line,
                    end_line = directive.end_line,
                    buffer_lines = lines.len(),
                    "applied directive"
                );
                report.applied += 1;
            }
            Err(reason) => {
                warn!(
                    label = directive.label.as_str(),
                    reason = %reason,
                    "skipped directive"
                );
                report.skipped.push(SkippedEdit {
                    index,
                    label: directive.label.clone(),
                    reason,
                });
            }
        }
    }

    AppliedEdits {
        text: lines.join("\n"),
        report,
    }
}

fn apply_one(lines: &mut Vec<String>, directive: &EditDirective) -> Result<(), SkipReason> {
    let start_index = directive.start_line.saturating_sub(1) as usize;
    let end_index = directive.end_line.saturating_sub(1) as usize;

    match directive.kind {
        EditKind::Insert => {
            if directive.payload_is_empty() {
                return Err(SkipReason::EmptyPayload);
            }
            // Inserting immediately after the last line is valid.
            if directive.start_line < 1 || start_index > lines.len() {
                return Err(SkipReason::InsertOutOfRange {
                    start_line: directive.start_line,
                    buffer_len_plus_one: lines.len() + 1,
                });
            }
            let payload = directive.text.split('\n').map(str::to_string);
            lines.splice(start_index..start_index, payload);
            Ok(())
        }
        EditKind::Replace => {
            if directive.payload_is_empty() {
                return Err(SkipReason::EmptyPayload);
            }
            check_range(lines.len(), directive)?;
            let payload = directive.text.split('\n').map(str::to_string);
            lines.splice(start_index..=end_index, payload);
            Ok(())
        }
        EditKind::Delete => {
            check_range(lines.len(), directive)?;
            lines.drain(start_index..=end_index);
            Ok(())
        }
    }
}

fn check_range(buffer_len: usize, directive: &EditDirective) -> Result<(), SkipReason> {
    let start = directive.start_line;
    let end = directive.end_line;
    if start < 1 || end < start || (end as usize) > buffer_len {
        return Err(SkipReason::RangeOutOfBounds {
            start_line: start,
            end_line: end,
            buffer_len,
        });
    }
    Ok(())
}
