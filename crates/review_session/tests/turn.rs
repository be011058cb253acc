use std::collections::HashMap;

use review_api::{FrameRouter, ChatStreamRequest, StreamFrame};
use review_session::{process_completed_turn, BoundaryError, FileStore, TurnRecorder};
use serde_json::json;

#[derive(Default)]
struct InMemoryFileStore {
    files: HashMap<String, String>,
    loads: usize,
}

impl FileStore for InMemoryFileStore {
    fn load(&mut self, _session_id: &str, file_id: &str) -> Result<String, BoundaryError> {
        self.loads += 1;
        self.files
            .get(file_id)
            .cloned()
            .ok_or_else(|| BoundaryError::FileUnavailable {
                file_id: file_id.to_string(),
                reason: "not uploaded".to_string(),
            })
    }
}

fn wire_frame(payload: serde_json::Value) -> StreamFrame {
    StreamFrame::from_wire(payload).expect("test frame maps to a kind")
}

#[test]
fn recorder_accumulates_frames_dispatched_through_the_router() {
    let mut router = FrameRouter::new();
    let recorder = TurnRecorder::new();
    recorder.attach(&mut router);

    router.dispatch(&wire_frame(json!({"type":"start","message_id":"m7"})));
    router.dispatch(&wire_frame(json!({"type":"thinking","delta":"checking bounds"})));
    router.dispatch(&wire_frame(json!({"type":"content","delta":"All "})));
    router.dispatch(&wire_frame(json!({"type":"content","delta":"good."})));
    router.dispatch(&wire_frame(json!({"type":"done","message_id":"m7"})));

    let turn = recorder.snapshot();
    assert_eq!(turn.content, "All good.");
    assert_eq!(turn.thinking, "checking bounds");
    assert_eq!(turn.message_id.as_deref(), Some("m7"));
    assert!(turn.completed);
}

#[test]
fn turn_with_directives_loads_and_patches_the_reviewed_file() {
    let content = concat!(
        "发现一个问题。\n\n",
        "#### 🔧 结构化修改指令\n\n",
        "**修改1：替换第二行**\n",
        "- 操作类型：替换\n",
        "- 位置：第2行\n",
        "- 内容：\n",
        "```\nB\n```\n",
    );
    let request = ChatStreamRequest::new("sess-1", "review")
        .with_file_ids(vec!["f1".to_string()]);
    let mut store = InMemoryFileStore::default();
    store.files.insert("f1".to_string(), "a\nb\nc".to_string());

    let (parsed, applied) =
        process_completed_turn(content, &request, &mut store).expect("turn should process");

    assert_eq!(parsed.report.accepted, 1);
    let applied = applied.expect("reviewed file should be patched");
    assert_eq!(applied.text, "a\nB\nc");
    assert_eq!(store.loads, 1);
}

#[test]
fn turn_without_directives_never_touches_the_file_store() {
    let request = ChatStreamRequest::new("sess-1", "review")
        .with_file_ids(vec!["f1".to_string()]);
    let mut store = InMemoryFileStore::default();

    let (parsed, applied) =
        process_completed_turn("looks fine to me", &request, &mut store)
            .expect("turn should process");

    assert!(parsed.directives.is_empty());
    assert!(applied.is_none());
    assert_eq!(store.loads, 0);
}

#[test]
fn directives_without_a_reviewed_file_are_parsed_but_not_applied() {
    let content = concat!(
        "#### 结构化修改指令\n\n",
        "**修改1：删除**\n",
        "- 操作类型：删除\n",
        "- 位置：第1行\n",
    );
    let request = ChatStreamRequest::new("sess-1", "review");
    let mut store = InMemoryFileStore::default();

    let (parsed, applied) =
        process_completed_turn(content, &request, &mut store).expect("turn should process");

    assert_eq!(parsed.directives.len(), 1);
    assert!(applied.is_none());
    assert_eq!(store.loads, 0);
}

#[test]
fn missing_file_surfaces_a_boundary_error() {
    let content = concat!(
        "#### 结构化修改指令\n\n",
        "**修改1：删除**\n",
        "- 操作类型：删除\n",
        "- 位置：第1行\n",
    );
    let request = ChatStreamRequest::new("sess-1", "review")
        .with_file_ids(vec!["missing".to_string()]);
    let mut store = InMemoryFileStore::default();

    let error = process_completed_turn(content, &request, &mut store)
        .expect_err("missing file should fail");
    assert!(error.to_string().contains("missing"));
}
