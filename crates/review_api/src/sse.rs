use tracing::warn;

use crate::frames::StreamFrame;

const DATA_PREFIX: &str = "data: ";

/// Incremental decoder for the line-framed SSE byte stream.
///
/// One decoder instance per connection. The undecoded tail is buffered as raw
/// bytes across chunk arrivals, so chunk boundaries — including boundaries
/// inside a multi-byte UTF-8 sequence — never change which frames come out.
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    buffer: Vec<u8>,
    warnings: usize,
}

impl SseFrameDecoder {
    /// Feeds arbitrary bytes into the decoder.
    ///
    /// Drain completed frames with [`SseFrameDecoder::next_frame`]; a frame
    /// only becomes available once its full line has been observed.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Pops the next complete frame, if one is buffered.
    pub fn next_frame(&mut self) -> Option<StreamFrame> {
        while let Some(newline) = self.buffer.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line[..newline]);

            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                // Lines without the marker carry no frame.
                continue;
            };

            match serde_json::from_str(payload) {
                Ok(value) => match StreamFrame::from_wire(value) {
                    Some(frame) => return Some(frame),
                    None => {
                        self.warnings += 1;
                        warn!(payload, "dropping frame with unknown type discriminator");
                    }
                },
                Err(error) => {
                    self.warnings += 1;
                    warn!(%error, "dropping malformed frame payload");
                }
            }
        }
        None
    }

    /// Decodes a complete payload string in one shot.
    #[must_use]
    pub fn parse_frames(input: &str) -> Vec<StreamFrame> {
        let mut decoder = Self::default();
        decoder.feed(input.as_bytes());
        let mut frames = Vec::new();
        while let Some(frame) = decoder.next_frame() {
            frames.push(frame);
        }
        frames
    }

    /// Count of dropped segments (malformed JSON or unknown discriminator).
    #[must_use]
    pub fn decode_warnings(&self) -> usize {
        self.warnings
    }

    #[must_use]
    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.iter().all(u8::is_ascii_whitespace)
    }
}
