/// Default base URL for the review backend.
pub const DEFAULT_REVIEW_BASE_URL: &str = "http://localhost:8000";

/// Path of the streaming chat endpoint under the versioned API root.
pub const CHAT_STREAM_PATH: &str = "/api/v1/code/chat/stream";

/// Normalize a base URL to the chat-stream endpoint.
///
/// Normalization rules:
/// 1) keep a URL already ending in `/code/chat/stream` unchanged
/// 2) append `/code/chat/stream` when the path ends in `/api/v1`
/// 3) append `/api/v1/code/chat/stream` otherwise
pub fn normalize_chat_stream_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_REVIEW_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/code/chat/stream") {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/api/v1") {
        return format!("{trimmed}/code/chat/stream");
    }
    format!("{trimmed}{CHAT_STREAM_PATH}")
}
