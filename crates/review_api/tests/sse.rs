use review_api::{FrameKind, SseFrameDecoder};

fn drain(decoder: &mut SseFrameDecoder) -> Vec<FrameKind> {
    let mut kinds = Vec::new();
    while let Some(frame) = decoder.next_frame() {
        kinds.push(frame.kind);
    }
    kinds
}

#[test]
fn sse_framing_parses_each_data_line() {
    let payload = concat!(
        "data: {\"type\":\"start\",\"message_id\":\"m1\"}\n",
        "data: {\"type\":\"content\",\"delta\":\"hel\"}\n",
        "data: {\"type\":\"content\",\"delta\":\"lo\"}\n",
        "data: {\"type\":\"done\",\"message_id\":\"m1\"}\n",
    );

    let frames = SseFrameDecoder::parse_frames(payload);
    let kinds: Vec<FrameKind> = frames.iter().map(|frame| frame.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FrameKind::Start,
            FrameKind::ContentDelta,
            FrameKind::ContentDelta,
            FrameKind::Done,
        ]
    );
    assert_eq!(frames[1].delta(), Some("hel"));
}

#[test]
fn chunk_boundaries_never_change_the_frame_sequence() {
    let payload = concat!(
        "data: {\"type\":\"content\",\"delta\":\"第一段\"}\n",
        ": keep-alive\n",
        "data: {\"type\":\"thinking\",\"delta\":\"思考中\"}\n",
        "data: {\"type\":\"done\",\"message_id\":\"m9\"}\n",
    )
    .as_bytes();

    let expected = SseFrameDecoder::parse_frames(std::str::from_utf8(payload).expect("utf8"));
    assert_eq!(expected.len(), 3);

    // Every split point, including splits inside multi-byte UTF-8 sequences.
    for split in 0..payload.len() {
        let mut decoder = SseFrameDecoder::default();
        decoder.feed(&payload[..split]);
        let mut frames = Vec::new();
        while let Some(frame) = decoder.next_frame() {
            frames.push(frame);
        }
        decoder.feed(&payload[split..]);
        while let Some(frame) = decoder.next_frame() {
            frames.push(frame);
        }

        assert_eq!(frames, expected, "split at byte {split}");
        assert_eq!(decoder.decode_warnings(), 0, "split at byte {split}");
    }
}

#[test]
fn lines_without_the_data_marker_are_ignored() {
    let payload = concat!(
        "event: ping\n",
        "\n",
        "data: {\"type\":\"content\",\"delta\":\"x\"}\n",
    );

    let frames = SseFrameDecoder::parse_frames(payload);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].kind, FrameKind::ContentDelta);
}

#[test]
fn malformed_json_is_a_warning_and_the_stream_continues() {
    let mut decoder = SseFrameDecoder::default();
    decoder.feed(b"data: {nope\ndata: {\"type\":\"content\",\"delta\":\"y\"}\n");

    assert_eq!(drain(&mut decoder), vec![FrameKind::ContentDelta]);
    assert_eq!(decoder.decode_warnings(), 1);
}

#[test]
fn unknown_type_discriminator_is_a_warning() {
    let mut decoder = SseFrameDecoder::default();
    decoder.feed(b"data: {\"type\":\"telemetry\",\"x\":1}\ndata: {\"type\":\"done\"}\n");

    assert_eq!(drain(&mut decoder), vec![FrameKind::Done]);
    assert_eq!(decoder.decode_warnings(), 1);
}

#[test]
fn incomplete_trailing_line_stays_buffered() {
    let mut decoder = SseFrameDecoder::default();
    decoder.feed(b"data: {\"type\":\"content\",\"delta\":\"tail\"}");

    assert!(decoder.next_frame().is_none());
    assert!(!decoder.is_empty_buffer());

    decoder.feed(b"\n");
    assert_eq!(drain(&mut decoder), vec![FrameKind::ContentDelta]);
    assert!(decoder.is_empty_buffer());
}

#[test]
fn blank_lines_are_not_meaningful() {
    let frames = SseFrameDecoder::parse_frames("\n\n\ndata: {\"type\":\"start\"}\n\n");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].kind, FrameKind::Start);
}
