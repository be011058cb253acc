//! Line-indexed application of edit directives to an original text buffer.
//!
//! Directives address 1-based lines of the original, unmodified buffer and
//! must arrive sorted descending by `start_line`; applied in that order, a
//! mutation never shifts the lines any remaining directive refers to. An
//! individually invalid directive is skipped with a diagnostic and never
//! aborts the rest.

mod apply;
mod preview;
mod report;

pub use apply::{apply_edit_directives, AppliedEdits};
pub use preview::diff_preview;
pub use report::{ApplyReport, SkipReason, SkippedEdit};
