use review_api::normalize_chat_stream_url;
use review_api::url::DEFAULT_REVIEW_BASE_URL;

#[test]
fn url_already_at_stream_endpoint_is_unchanged() {
    assert_eq!(
        normalize_chat_stream_url("http://localhost:8000/api/v1/code/chat/stream"),
        "http://localhost:8000/api/v1/code/chat/stream"
    );
}

#[test]
fn url_at_api_root_gets_stream_path() {
    assert_eq!(
        normalize_chat_stream_url("http://localhost:8000/api/v1"),
        "http://localhost:8000/api/v1/code/chat/stream"
    );
}

#[test]
fn bare_host_gets_full_path() {
    assert_eq!(
        normalize_chat_stream_url("https://review.example.com"),
        "https://review.example.com/api/v1/code/chat/stream"
    );
}

#[test]
fn trailing_slashes_are_trimmed() {
    assert_eq!(
        normalize_chat_stream_url("http://localhost:8000/"),
        "http://localhost:8000/api/v1/code/chat/stream"
    );
}

#[test]
fn empty_input_falls_back_to_the_default_base() {
    assert_eq!(
        normalize_chat_stream_url("   "),
        format!("{DEFAULT_REVIEW_BASE_URL}/api/v1/code/chat/stream")
    );
}
