use serde::{Deserialize, Serialize};
use thiserror::Error;

use review_api::StreamPhase;

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("message persistence failed: {0}")]
    Persistence(String),

    #[error("file content unavailable for '{file_id}': {reason}")]
    FileUnavailable { file_id: String, reason: String },
}

/// One finished (or interrupted) assistant turn, as handed to persistence.
///
/// Partial content from an aborted or failed stream is persisted too; the
/// terminal phase tells the store which case it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTurn {
    pub session_id: String,
    pub message_id: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    pub phase: StreamPhase,
}

/// Message-persistence boundary: receives the assembled turn for durable
/// storage after a stream ends or is aborted.
pub trait MessageSink: Send {
    fn persist_turn(&mut self, turn: &PersistedTurn) -> Result<(), BoundaryError>;
}

/// File-content boundary: supplies the original text for a reviewed file.
pub trait FileStore: Send {
    fn load(&mut self, session_id: &str, file_id: &str) -> Result<String, BoundaryError>;
}
