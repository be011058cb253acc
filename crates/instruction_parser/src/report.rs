use serde::{Deserialize, Serialize};

use edit_directives::EditDirective;

/// Why a single instruction block could not become a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No recognizable action-type field in the block.
    MissingOperationType,
    /// No recognizable position field in the block.
    MissingPosition,
    /// A position field was present but its numbers do not fit a line index.
    InvalidPosition,
}

impl RejectReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingOperationType => "missing operation type",
            Self::MissingPosition => "missing position",
            Self::InvalidPosition => "invalid position",
        }
    }
}

/// Per-block extraction result.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    Accepted(EditDirective),
    Rejected { label: String, reason: RejectReason },
}

/// One rejected block, retained for the caller's "N applied, M skipped" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedBlock {
    /// 1-based position of the block within the instruction section.
    pub index: usize,
    pub label: String,
    pub reason: RejectReason,
}

/// Diagnostic summary of one parse run. Never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Instruction blocks located in the section, accepted or not.
    pub blocks_found: usize,
    /// Blocks that produced a directive.
    pub accepted: usize,
    pub rejected: Vec<RejectedBlock>,
}

impl ParseReport {
    /// Returns true when the text carried a section but no usable block.
    #[must_use]
    pub fn all_rejected(&self) -> bool {
        self.blocks_found > 0 && self.accepted == 0
    }
}
