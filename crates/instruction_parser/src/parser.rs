use tracing::{debug, warn};

use edit_directives::{sort_for_application, EditDirective, EditKind};

use crate::markup;
use crate::report::{BlockOutcome, ParseReport, RejectReason, RejectedBlock};

/// Parse output: the ordered directive list plus its diagnostic report.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDirectives {
    /// Accepted directives, sorted descending by `start_line`, ready for
    /// application against the original buffer.
    pub directives: Vec<EditDirective>,
    pub report: ParseReport,
}

/// Returns true when the text contains a structured-instruction heading.
#[must_use]
pub fn has_edit_instructions(text: &str) -> bool {
    markup::has_section_heading(text)
}

/// Extracts edit directives from a completed assistant reply.
///
/// Absent section or malformed blocks are reported, never raised: a block
/// missing a required field is rejected and parsing continues with the next
/// one. The returned list is sorted descending by `start_line`.
#[must_use]
pub fn parse_edit_directives(text: &str) -> ParsedDirectives {
    let Some(section) = markup::locate_section(text) else {
        debug!("no structured-instruction heading found");
        return ParsedDirectives {
            directives: Vec::new(),
            report: ParseReport::default(),
        };
    };

    let blocks = markup::split_blocks(section);
    if blocks.is_empty() {
        warn!("instruction heading present but no instruction blocks matched");
    }

    let mut report = ParseReport {
        blocks_found: blocks.len(),
        ..ParseReport::default()
    };
    let mut directives = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        match parse_block(block, index + 1) {
            BlockOutcome::Accepted(directive) => {
                debug!(
                    kind = directive.kind.as_str(),
                    start_line = directive.start_line,
                    end_line = directive.end_line,
                    "accepted instruction block"
                );
                report.accepted += 1;
                directives.push(directive);
            }
            BlockOutcome::Rejected { label, reason } => {
                warn!(%label, reason = reason.as_str(), "rejected instruction block");
                report.rejected.push(RejectedBlock {
                    index: index + 1,
                    label,
                    reason,
                });
            }
        }
    }

    sort_for_application(&mut directives);
    debug!(
        blocks = report.blocks_found,
        accepted = report.accepted,
        "instruction parse finished"
    );

    ParsedDirectives { directives, report }
}

/// Extracts one directive from one instruction block.
#[must_use]
pub fn parse_block(block: &str, index: usize) -> BlockOutcome {
    let label = markup::description_regex()
        .captures(block)
        .map(|captures| captures[2].trim().to_string())
        .unwrap_or_else(|| format!("Modification {index}"));

    let Some(kind_token) = markup::operation_type_regex()
        .captures(block)
        .map(|captures| captures[1].to_string())
    else {
        return BlockOutcome::Rejected {
            label,
            reason: RejectReason::MissingOperationType,
        };
    };
    // The regex alternation only admits tokens parse_token understands.
    let Some(kind) = EditKind::parse_token(&kind_token) else {
        return BlockOutcome::Rejected {
            label,
            reason: RejectReason::MissingOperationType,
        };
    };

    let Some(position) = markup::position_regex().captures(block) else {
        return BlockOutcome::Rejected {
            label,
            reason: RejectReason::MissingPosition,
        };
    };
    let Ok(start_line) = position[1].parse::<u32>() else {
        return BlockOutcome::Rejected {
            label,
            reason: RejectReason::InvalidPosition,
        };
    };
    let end_line = match position.get(2) {
        Some(end) => match end.as_str().parse::<u32>() {
            Ok(end) => end,
            Err(_) => {
                return BlockOutcome::Rejected {
                    label,
                    reason: RejectReason::InvalidPosition,
                }
            }
        },
        None => start_line,
    };

    // Leading indentation of the payload matters; only trailing whitespace of
    // the fenced block is dropped.
    let text = markup::content_regex()
        .captures(block)
        .map(|captures| captures[1].trim_end().to_string())
        .unwrap_or_default();

    let directive = match kind {
        EditKind::Insert => EditDirective::insert(start_line, text, label),
        EditKind::Replace => EditDirective::replace(start_line, end_line, text, label),
        EditKind::Delete => EditDirective::delete(start_line, end_line, label),
    };
    BlockOutcome::Accepted(directive)
}
