//! Transport-only streaming client for the review assistant chat endpoint.
//!
//! This crate owns request building, SSE frame decoding, typed frame
//! dispatch, and cooperative cancellation for the chat-stream endpoint only.
//! It contains no persistence, no directive parsing, and no UI coupling.
//!
//! The wire contract is line-framed SSE: each `data: `-prefixed line carries
//! one JSON object with a `type` discriminator. `close` and `abort` frames
//! never appear on the wire; the transport synthesizes them locally so
//! listeners observe every terminal outcome on the same channel surface.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod frames;
pub mod headers;
pub mod payload;
pub mod sse;
pub mod url;

pub use client::{CancelHandle, ChatStream, ReviewApiClient, StreamEnd};
pub use config::ReviewApiConfig;
pub use dispatch::{FrameRouter, ListenerId};
pub use error::ReviewApiError;
pub use frames::{FrameKind, StreamFrame, StreamPhase, TurnAccumulator};
pub use payload::ChatStreamRequest;
pub use sse::SseFrameDecoder;
pub use url::normalize_chat_stream_url;
