use thiserror::Error;
use tracing::{debug, info, warn};

use apply_edit_engine::{apply_edit_directives, AppliedEdits};
use instruction_parser::{parse_edit_directives, ParsedDirectives};
use review_api::{
    CancelHandle, ChatStreamRequest, FrameRouter, ReviewApiClient, ReviewApiError, StreamPhase,
    TurnAccumulator,
};

use crate::boundary::{BoundaryError, FileStore, MessageSink, PersistedTurn};
use crate::recorder::TurnRecorder;

#[derive(Debug, Error)]
pub enum ReviewTurnError {
    #[error("stream transport error: {0}")]
    Transport(#[from] ReviewApiError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}

/// Everything one review turn produced, handed to the UI/diff renderer.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Terminal phase the stream reached.
    pub phase: StreamPhase,
    pub content: String,
    pub thinking: String,
    pub message_id: Option<String>,
    pub parsed: ParsedDirectives,
    /// Patched buffer plus its report; `None` when the turn carried no
    /// directives or named no reviewed file.
    pub applied: Option<AppliedEdits>,
    pub decode_warnings: usize,
}

/// Runs one review turn end to end.
///
/// The accumulated text is persisted through `sink` before any parsing
/// happens, for every terminal outcome — partial content from an aborted or
/// failed stream is never discarded. Directives are then extracted from the
/// content and applied to the first reviewed file's buffer.
pub async fn run_review_turn(
    client: &ReviewApiClient,
    request: &ChatStreamRequest,
    file_store: &mut dyn FileStore,
    sink: &mut dyn MessageSink,
    cancellation: Option<&CancelHandle>,
) -> Result<TurnOutcome, ReviewTurnError> {
    let mut router = FrameRouter::new();
    let recorder = TurnRecorder::new();
    recorder.attach(&mut router);

    let end = match client
        .stream_chat(request, &mut router, cancellation)
        .await
    {
        Ok(end) => end,
        Err(error) => {
            // Mid-stream failure: keep whatever already streamed. A connect
            // failure has nothing to keep.
            let turn = recorder.snapshot();
            if !turn.content.is_empty() || !turn.thinking.is_empty() {
                warn!(%error, "stream failed; persisting partial turn");
                persist(sink, request, &turn, StreamPhase::Failed)?;
            }
            return Err(error.into());
        }
    };

    let turn = recorder.snapshot();
    persist(sink, request, &turn, end.phase)?;

    let (parsed, applied) = process_completed_turn(&turn.content, request, file_store)?;
    info!(
        phase = ?end.phase,
        directives = parsed.directives.len(),
        rejected = parsed.report.rejected.len(),
        "review turn finished"
    );

    Ok(TurnOutcome {
        phase: end.phase,
        content: turn.content,
        thinking: turn.thinking,
        message_id: turn.message_id,
        parsed,
        applied,
        decode_warnings: end.decode_warnings,
    })
}

/// Parses directives out of the accumulated content and applies them to the
/// reviewed buffer.
///
/// Single-buffer pipeline: the first file id names the reviewed buffer; the
/// original text is only fetched when there is something to apply.
pub fn process_completed_turn(
    content: &str,
    request: &ChatStreamRequest,
    file_store: &mut dyn FileStore,
) -> Result<(ParsedDirectives, Option<AppliedEdits>), ReviewTurnError> {
    let parsed = parse_edit_directives(content);
    if parsed.directives.is_empty() {
        debug!("turn carried no edit directives");
        return Ok((parsed, None));
    }

    let Some(file_id) = request.file_ids.first() else {
        warn!(
            directives = parsed.directives.len(),
            "directives present but the turn names no reviewed file"
        );
        return Ok((parsed, None));
    };

    let original = file_store.load(&request.session_id, file_id)?;
    let applied = apply_edit_directives(&original, &parsed.directives);
    Ok((parsed, Some(applied)))
}

fn persist(
    sink: &mut dyn MessageSink,
    request: &ChatStreamRequest,
    turn: &TurnAccumulator,
    phase: StreamPhase,
) -> Result<(), ReviewTurnError> {
    let persisted = PersistedTurn {
        session_id: request.session_id.clone(),
        message_id: turn.message_id.clone(),
        content: turn.content.clone(),
        thinking: (!turn.thinking.is_empty()).then(|| turn.thinking.clone()),
        phase,
    };
    sink.persist_turn(&persisted)?;
    Ok(())
}
