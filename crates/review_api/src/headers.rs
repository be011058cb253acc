use std::collections::BTreeMap;

use crate::config::ReviewApiConfig;

pub const HEADER_SESSION_ID: &str = "session_id";
pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "User-Agent";

/// Build a deterministic header map for chat-stream requests.
pub fn build_headers(config: &ReviewApiConfig, user_agent: Option<&str>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), "text/event-stream".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = match (user_agent, config.user_agent.as_deref()) {
        (Some(explicit), _) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        (None, Some(explicit)) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        _ => default_user_agent(),
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    if let Some(session_id) = &config.session_id {
        if !session_id.trim().is_empty() {
            headers.insert(HEADER_SESSION_ID.to_owned(), session_id.trim().to_owned());
        }
    }

    headers
}

fn default_user_agent() -> String {
    format!(
        "review-client ({}; {})",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
