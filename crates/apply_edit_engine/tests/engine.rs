use apply_edit_engine::{apply_edit_directives, diff_preview, SkipReason};
use assert_matches::assert_matches;
use edit_directives::{sort_for_application, EditDirective};
use pretty_assertions::assert_eq;

#[test]
fn replace_single_line() {
    let applied = apply_edit_directives("a\nb\nc", &[EditDirective::replace(2, 2, "B", "swap b")]);

    assert_eq!(applied.text, "a\nB\nc");
    assert_eq!(applied.report.applied, 1);
    assert!(applied.report.is_clean());
}

#[test]
fn insert_multi_line_payload_before_line() {
    let applied = apply_edit_directives("a\nb", &[EditDirective::insert(2, "x\ny", "expand")]);

    assert_eq!(applied.text, "a\nx\ny\nb");
}

#[test]
fn descending_delete_then_replace_leaves_original_line_numbers_valid() {
    let directives = vec![
        EditDirective::delete(3, 4, "drop tail"),
        EditDirective::replace(1, 1, "A", "retitle"),
    ];

    let applied = apply_edit_directives("a\nb\nc\nd", &directives);

    assert_eq!(applied.text, "A\nb");
    assert_eq!(applied.report.applied, 2);
}

#[test]
fn empty_directive_list_returns_text_unchanged() {
    let applied = apply_edit_directives("x\ny\nz", &[]);

    assert_eq!(applied.text, "x\ny\nz");
    assert!(applied.report.is_clean());
}

#[test]
fn empty_original_returns_unchanged() {
    let applied = apply_edit_directives("", &[EditDirective::insert(1, "new", "seed")]);

    assert_eq!(applied.text, "");
    assert_eq!(applied.report.applied, 0);
}

#[test]
fn insert_after_last_line_is_valid() {
    let applied = apply_edit_directives("a\nb", &[EditDirective::insert(3, "c", "append")]);

    assert_eq!(applied.text, "a\nb\nc");
}

#[test]
fn insert_beyond_end_is_skipped_with_diagnostic() {
    let applied = apply_edit_directives("a\nb", &[EditDirective::insert(9, "c", "too far")]);

    assert_eq!(applied.text, "a\nb");
    assert_eq!(applied.report.skipped.len(), 1);
    assert_matches!(
        applied.report.skipped[0].reason,
        SkipReason::InsertOutOfRange { start_line: 9, .. }
    );
}

#[test]
fn empty_payload_insert_and_replace_are_skipped() {
    let directives = vec![
        EditDirective::replace(2, 2, "", "empty replace"),
        EditDirective::insert(1, "", "empty insert"),
    ];

    let applied = apply_edit_directives("a\nb", &directives);

    assert_eq!(applied.text, "a\nb");
    assert_eq!(applied.report.applied, 0);
    assert!(applied
        .report
        .skipped
        .iter()
        .all(|skipped| skipped.reason == SkipReason::EmptyPayload));
}

#[test]
fn delete_needs_no_payload() {
    let applied = apply_edit_directives("a\nb\nc\nd", &[EditDirective::delete(2, 3, "drop middle")]);

    assert_eq!(applied.text, "a\nd");
    assert!(applied.report.is_clean());
}

#[test]
fn out_of_range_directive_does_not_abort_the_rest() {
    let directives = vec![
        EditDirective::delete(10, 12, "beyond end"),
        EditDirective::replace(1, 1, "A", "still applies"),
    ];

    let applied = apply_edit_directives("a\nb", &directives);

    assert_eq!(applied.text, "A\nb");
    assert_eq!(applied.report.applied, 1);
    assert_eq!(applied.report.skipped.len(), 1);
    assert_matches!(
        applied.report.skipped[0].reason,
        SkipReason::RangeOutOfBounds {
            start_line: 10,
            end_line: 12,
            buffer_len: 2
        }
    );
}

#[test]
fn inverted_range_is_skipped() {
    let applied = apply_edit_directives("a\nb\nc", &[EditDirective::replace(3, 1, "X", "bad range")]);

    assert_eq!(applied.text, "a\nb\nc");
    assert_matches!(
        applied.report.skipped[0].reason,
        SkipReason::RangeOutOfBounds { .. }
    );
}

#[test]
fn report_accounts_for_every_directive() {
    let directives = vec![
        EditDirective::delete(9, 9, "skip: range"),
        EditDirective::replace(2, 2, "", "skip: payload"),
        EditDirective::insert(1, "top", "applies"),
    ];

    let applied = apply_edit_directives("a\nb\nc", &directives);

    assert_eq!(
        applied.report.applied + applied.report.skipped.len(),
        directives.len()
    );
    assert_eq!(applied.report.skipped[0].index, 0);
    assert_eq!(applied.report.skipped[1].index, 1);
}

#[test]
fn crlf_bytes_ride_along_inside_lines() {
    let applied =
        apply_edit_directives("a\r\nb\r\nc", &[EditDirective::delete(2, 2, "drop b")]);

    assert_eq!(applied.text, "a\r\nc");
}

#[test]
fn valid_descending_directives_never_skip() {
    let original = (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
    let mut directives = vec![
        EditDirective::insert(21, "tail", "append at end"),
        EditDirective::replace(14, 16, "squashed", "squash range"),
        EditDirective::delete(8, 9, "drop pair"),
        EditDirective::insert(5, "pre-five", "insert early"),
        EditDirective::replace(1, 1, "head", "retitle"),
    ];
    sort_for_application(&mut directives);

    let applied = apply_edit_directives(&original, &directives);

    assert!(applied.report.is_clean(), "{:?}", applied.report.skipped);
    assert_eq!(applied.report.applied, 5);
    assert!(applied.text.starts_with("head\n"));
    assert!(applied.text.ends_with("\ntail"));
}

#[test]
fn diff_preview_renders_unified_hunks() {
    let applied = apply_edit_directives("a\nb\nc", &[EditDirective::replace(2, 2, "B", "swap")]);
    let preview = diff_preview("a\nb\nc", &applied.text);

    assert!(preview.contains("--- original"));
    assert!(preview.contains("+++ patched"));
    assert!(preview.contains("-b"));
    assert!(preview.contains("+B"));
}
