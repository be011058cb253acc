use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use apply_edit_engine::diff_preview;
use edit_directives::application_plan;
use review_api::{CancelHandle, ChatStreamRequest, ReviewApiClient, ReviewApiConfig};
use review_session::{
    run_review_turn, BoundaryError, FileStore, MessageSink, PersistedTurn,
};

/// Headless driver for one review turn against a live backend.
///
/// Usage: `review_session <session-id> <message> [file-path]`
///
/// `REVIEW_BASE_URL` selects the backend (default `http://localhost:8000`).
/// Ctrl-C cancels the stream; the partial turn is still printed and
/// "persisted" to stdout.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (session_id, message, file_path) = match args.as_slice() {
        [session_id, message] => (session_id.clone(), message.clone(), None),
        [session_id, message, file_path] => {
            (session_id.clone(), message.clone(), Some(file_path.clone()))
        }
        _ => bail!("usage: review_session <session-id> <message> [file-path]"),
    };

    let base_url =
        std::env::var("REVIEW_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = ReviewApiClient::new(
        ReviewApiConfig::new(base_url).with_session_id(session_id.clone()),
    )?;

    let mut request = ChatStreamRequest::new(session_id, message);
    if let Some(path) = file_path {
        request = request.with_file_ids(vec![path]);
    }

    let cancellation = CancelHandle::new();
    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("cancellation requested");
                cancellation.cancel();
            }
        }
    });

    let mut file_store = FsFileStore;
    let mut sink = ConsoleSink;
    let outcome = run_review_turn(
        &client,
        &request,
        &mut file_store,
        &mut sink,
        Some(&cancellation),
    )
    .await
    .context("review turn failed")?;

    println!("--- assistant reply ({:?}) ---", outcome.phase);
    println!("{}", outcome.content);
    println!(
        "--- directives: {} accepted, {} rejected ---",
        outcome.parsed.report.accepted,
        outcome.parsed.report.rejected.len()
    );
    println!("{}", application_plan(&outcome.parsed.directives));
    if let Some(applied) = &outcome.applied {
        let file_id = request.file_ids.first().map(String::as_str).unwrap_or("");
        let original = std::fs::read_to_string(file_id)
            .with_context(|| format!("failed to re-read {file_id}"))?;
        println!("{}", diff_preview(&original, &applied.text));
        println!(
            "--- applied {} edit(s), skipped {} ---",
            applied.report.applied,
            applied.report.skipped.len()
        );
    }

    Ok(())
}

/// Reads the reviewed buffer straight from the local filesystem; the file id
/// is a path in this headless setup.
struct FsFileStore;

impl FileStore for FsFileStore {
    fn load(&mut self, _session_id: &str, file_id: &str) -> Result<String, BoundaryError> {
        std::fs::read_to_string(file_id).map_err(|error| BoundaryError::FileUnavailable {
            file_id: file_id.to_string(),
            reason: error.to_string(),
        })
    }
}

/// Stand-in persistence: one JSON line per turn on stdout.
struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn persist_turn(&mut self, turn: &PersistedTurn) -> Result<(), BoundaryError> {
        let line = serde_json::to_string(turn)
            .map_err(|error| BoundaryError::Persistence(error.to_string()))?;
        println!("{line}");
        Ok(())
    }
}
