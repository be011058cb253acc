use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_REVIEW_BASE_URL;

/// Transport configuration for review chat-stream requests.
#[derive(Debug, Clone)]
pub struct ReviewApiConfig {
    /// Base URL for the review backend.
    pub base_url: String,
    /// Optional `session_id` request header value.
    pub session_id: Option<String>,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout covering connection establishment.
    ///
    /// Left unset by default: a streaming body stays open for the whole
    /// assistant turn and must not be bounded by a whole-request timeout.
    pub connect_timeout: Option<Duration>,
}

impl Default for ReviewApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REVIEW_BASE_URL.to_string(),
            session_id: None,
            user_agent: None,
            extra_headers: BTreeMap::new(),
            connect_timeout: None,
        }
    }
}

impl ReviewApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.extra_headers.extend(headers);
        self
    }
}
