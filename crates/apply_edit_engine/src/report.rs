use thiserror::Error;

/// Why one directive was skipped during application. Diagnostic, not fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("insert/replace payload is empty")]
    EmptyPayload,

    #[error("insert position {start_line} is outside 1..={buffer_len_plus_one}")]
    InsertOutOfRange {
        start_line: u32,
        buffer_len_plus_one: usize,
    },

    #[error("line range {start_line}-{end_line} is invalid for a {buffer_len}-line buffer")]
    RangeOutOfBounds {
        start_line: u32,
        end_line: u32,
        buffer_len: usize,
    },
}

/// One skipped directive, with its position in the applied list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEdit {
    /// 0-based index into the directive list handed to the engine.
    pub index: usize,
    pub label: String,
    pub reason: SkipReason,
}

/// Diagnostic summary of one application run.
///
/// `applied + skipped.len()` always equals the number of directives given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub skipped: Vec<SkippedEdit>,
}

impl ApplyReport {
    /// Returns true when every directive was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
