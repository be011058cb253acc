use serde::{Deserialize, Serialize};

/// Canonical request payload shape for the streaming chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStreamRequest {
    pub session_id: String,
    pub message: String,
    /// File identifiers the turn should review; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
}

impl ChatStreamRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            file_ids: Vec::new(),
        }
    }

    pub fn with_file_ids(mut self, file_ids: impl IntoIterator<Item = String>) -> Self {
        self.file_ids = file_ids.into_iter().collect();
        self
    }
}
