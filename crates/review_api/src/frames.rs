use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of frame kinds dispatched by the transport.
///
/// The wire only ever carries the first six; `Closed` and `Aborted` are
/// synthesized locally when the stream ends cleanly or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Start,
    ContentDelta,
    ThinkingDelta,
    UserEcho,
    Done,
    Error,
    Closed,
    Aborted,
}

impl FrameKind {
    /// Maps a wire `type` discriminator to its kind.
    ///
    /// Returns `None` for unknown discriminators and for the synthesized
    /// kinds, which are never read off the wire.
    #[must_use]
    pub fn parse_wire(value: &str) -> Option<Self> {
        Some(match value {
            "start" => Self::Start,
            "content" => Self::ContentDelta,
            "thinking" => Self::ThinkingDelta,
            "user_message" => Self::UserEcho,
            "done" => Self::Done,
            "error" => Self::Error,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ContentDelta => "content_delta",
            Self::ThinkingDelta => "thinking_delta",
            Self::UserEcho => "user_echo",
            Self::Done => "done",
            Self::Error => "error",
            Self::Closed => "closed",
            Self::Aborted => "aborted",
        }
    }
}

/// One decoded unit of the streaming protocol.
///
/// Owned by the transport until handed to listeners; listeners may retain or
/// discard it. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFrame {
    pub kind: FrameKind,
    pub payload: Value,
}

impl StreamFrame {
    /// Builds a frame from a decoded wire object, keyed by its `type` field.
    #[must_use]
    pub fn from_wire(payload: Value) -> Option<Self> {
        let kind = payload
            .get("type")
            .and_then(Value::as_str)
            .and_then(FrameKind::parse_wire)?;
        Some(Self { kind, payload })
    }

    /// Builds a locally synthesized frame with no wire payload.
    #[must_use]
    pub fn synthesized(kind: FrameKind) -> Self {
        Self {
            kind,
            payload: Value::Null,
        }
    }

    /// Text delta carried by content/thinking frames.
    #[must_use]
    pub fn delta(&self) -> Option<&str> {
        self.payload.get("delta").and_then(Value::as_str)
    }

    /// Message identifier carried by start/done/user-echo frames.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.payload.get("message_id").and_then(Value::as_str)
    }

    /// Error text carried by error frames.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.payload.get("error").and_then(Value::as_str)
    }
}

/// Connection lifecycle phase.
///
/// `Completed`, `Aborted`, and `Failed` are terminal: no further frames are
/// dispatched once any of them is reached, and later transition attempts are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    Idle,
    Connecting,
    Streaming,
    Completed,
    Aborted,
    Failed,
}

impl StreamPhase {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted | Self::Failed)
    }
}

/// Accumulates one assistant turn out of dispatched frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnAccumulator {
    pub content: String,
    pub thinking: String,
    pub message_id: Option<String>,
    pub completed: bool,
}

impl TurnAccumulator {
    /// Folds one frame into the accumulated turn.
    pub fn observe(&mut self, frame: &StreamFrame) {
        match frame.kind {
            FrameKind::Start => {
                if let Some(message_id) = frame.message_id() {
                    self.message_id = Some(message_id.to_string());
                }
            }
            FrameKind::ContentDelta => {
                if let Some(delta) = frame.delta() {
                    self.content.push_str(delta);
                }
            }
            FrameKind::ThinkingDelta => {
                if let Some(delta) = frame.delta() {
                    self.thinking.push_str(delta);
                }
            }
            FrameKind::Done => {
                self.completed = true;
                if self.message_id.is_none() {
                    self.message_id = frame.message_id().map(str::to_string);
                }
            }
            FrameKind::UserEcho
            | FrameKind::Error
            | FrameKind::Closed
            | FrameKind::Aborted => {}
        }
    }
}
