use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde_json::json;
use tracing::debug;

use crate::config::ReviewApiConfig;
use crate::dispatch::FrameRouter;
use crate::error::{parse_error_message, ReviewApiError};
use crate::frames::{FrameKind, StreamFrame, StreamPhase};
use crate::headers::build_headers;
use crate::payload::ChatStreamRequest;
use crate::sse::SseFrameDecoder;
use crate::url::normalize_chat_stream_url;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Cooperative cancellation signal shared between the caller and a stream.
///
/// Cancellation is a flag checked at suspension points, never forced
/// preemption. `cancel` is idempotent; clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    signal: Arc<AtomicBool>,
}

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Safe to call from any thread, any number of
    /// times; calls after the first (or after natural completion) change
    /// nothing.
    pub fn cancel(&self) {
        self.signal.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.signal.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct ReviewApiClient {
    http: Client,
    config: ReviewApiConfig,
}

/// Terminal summary of one streamed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamEnd {
    /// Terminal phase: `Completed`, `Aborted`, or `Failed`.
    pub phase: StreamPhase,
    /// Frames dispatched to listeners, synthesized notifications included.
    pub frames: usize,
    /// Segments dropped by the decoder.
    pub decode_warnings: usize,
}

impl ReviewApiClient {
    pub fn new(config: ReviewApiConfig) -> Result<Self, ReviewApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build().map_err(ReviewApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ReviewApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_chat_stream_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, ReviewApiError> {
        let headers = build_headers(&self.config, None);
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    ReviewApiError::InvalidBaseUrl(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    ReviewApiError::InvalidBaseUrl(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &ChatStreamRequest,
    ) -> Result<reqwest::RequestBuilder, ReviewApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Opens a streaming connection: `Idle → Connecting → Streaming`.
    ///
    /// A request error or non-success status is the `Connecting → Failed`
    /// edge and surfaces as the returned error; no frames were dispatched at
    /// that point. Cancellation observed while connecting surfaces as
    /// [`ReviewApiError::Cancelled`].
    pub async fn open(
        &self,
        request: &ChatStreamRequest,
        cancellation: Option<&CancelHandle>,
    ) -> Result<ChatStream, ReviewApiError> {
        if is_cancelled(cancellation) {
            return Err(ReviewApiError::Cancelled);
        }

        let response = self.build_request(request)?.send();
        let response = await_or_cancel(response, cancellation)
            .await?
            .map_err(ReviewApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = await_or_cancel(response.text(), cancellation)
                .await?
                .unwrap_or_default();
            return Err(ReviewApiError::Status(status, parse_error_message(status, &body)));
        }

        debug!(endpoint = %self.normalized_endpoint(), "chat stream connected");
        Ok(ChatStream {
            response: Some(response),
            decoder: SseFrameDecoder::default(),
            phase: StreamPhase::Streaming,
            cancel: cancellation.cloned().unwrap_or_default(),
            frames: 0,
        })
    }

    /// Opens a connection and drives it to its terminal state.
    pub async fn stream_chat(
        &self,
        request: &ChatStreamRequest,
        router: &mut FrameRouter,
        cancellation: Option<&CancelHandle>,
    ) -> Result<StreamEnd, ReviewApiError> {
        let mut stream = self.open(request, cancellation).await?;
        stream.run(router).await
    }
}

/// One live streaming connection in the `Streaming` phase.
///
/// Exclusively owns its decoder state and the underlying response body; no
/// two decode cycles overlap because `run` is the only reader.
#[derive(Debug)]
pub struct ChatStream {
    response: Option<Response>,
    decoder: SseFrameDecoder,
    phase: StreamPhase,
    cancel: CancelHandle,
    frames: usize,
}

impl ChatStream {
    #[must_use]
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Shared handle for cancelling this connection from another task.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Requests cancellation of this connection. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Reads the body to its end, dispatching each decoded frame in order.
    ///
    /// Frame N is fully dispatched before frame N+1 is decoded. Terminal
    /// outcomes:
    /// - clean end of body: `Completed`, one synthesized `Closed` frame,
    ///   `Ok`; a cancel racing the natural end loses once end-of-data has
    ///   been observed;
    /// - cancellation observed at a suspension point: `Aborted`, exactly one
    ///   synthesized `Aborted` frame, `Ok` — cancellation is an outcome, not
    ///   an error;
    /// - read failure: `Failed`, one synthesized `Error` frame, `Err`.
    ///
    /// Calling `run` again after a terminal state returns the terminal
    /// summary without dispatching anything.
    pub async fn run(&mut self, router: &mut FrameRouter) -> Result<StreamEnd, ReviewApiError> {
        let Some(response) = self.response.take() else {
            return Ok(self.snapshot());
        };
        let mut body = response.bytes_stream();
        let cancel = self.cancel.clone();

        loop {
            if cancel.is_cancelled() {
                return Ok(self.finish_aborted(router));
            }

            match await_or_cancel(body.next(), Some(&cancel)).await {
                Err(ReviewApiError::Cancelled) => return Ok(self.finish_aborted(router)),
                Err(other) => return Err(other),
                Ok(None) => break,
                Ok(Some(Err(error))) => return Err(self.finish_failed(router, error)),
                Ok(Some(Ok(chunk))) => {
                    self.decoder.feed(&chunk);
                    while let Some(frame) = self.decoder.next_frame() {
                        self.dispatch(router, &frame);
                    }
                }
            }
        }

        // End-of-data observed cleanly: Completed wins any in-flight cancel.
        self.phase = StreamPhase::Completed;
        self.dispatch(router, &StreamFrame::synthesized(FrameKind::Closed));
        debug!(frames = self.frames, "chat stream completed");
        Ok(self.snapshot())
    }

    fn dispatch(&mut self, router: &mut FrameRouter, frame: &StreamFrame) {
        router.dispatch(frame);
        self.frames += 1;
    }

    fn finish_aborted(&mut self, router: &mut FrameRouter) -> StreamEnd {
        if !self.phase.is_terminal() {
            self.phase = StreamPhase::Aborted;
            self.dispatch(router, &StreamFrame::synthesized(FrameKind::Aborted));
            debug!(frames = self.frames, "chat stream aborted");
        }
        self.snapshot()
    }

    fn finish_failed(&mut self, router: &mut FrameRouter, error: reqwest::Error) -> ReviewApiError {
        let message = error.to_string();
        if !self.phase.is_terminal() {
            self.phase = StreamPhase::Failed;
            let frame = StreamFrame {
                kind: FrameKind::Error,
                payload: json!({ "type": "error", "error": message }),
            };
            self.dispatch(router, &frame);
        }
        ReviewApiError::StreamFailed {
            code: None,
            message,
        }
    }

    fn snapshot(&self) -> StreamEnd {
        StreamEnd {
            phase: self.phase,
            frames: self.frames,
            decode_warnings: self.decoder.decode_warnings(),
        }
    }
}

fn is_cancelled(cancel: Option<&CancelHandle>) -> bool {
    cancel.is_some_and(CancelHandle::is_cancelled)
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancelHandle>,
) -> Result<F::Output, ReviewApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(ReviewApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(ReviewApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
