//! One review turn, end to end: stream the assistant reply, persist the
//! accumulated text, extract edit directives, and apply them to the reviewed
//! buffer.
//!
//! Persistence and file content are outbound collaborators reached through
//! the [`MessageSink`] and [`FileStore`] traits; this crate never talks to
//! their backing services itself.

mod boundary;
mod recorder;
mod turn;

pub use boundary::{BoundaryError, FileStore, MessageSink, PersistedTurn};
pub use recorder::TurnRecorder;
pub use turn::{process_completed_turn, run_review_turn, ReviewTurnError, TurnOutcome};
