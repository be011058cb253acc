use similar::TextDiff;

/// Renders a unified diff of the original against the patched text.
///
/// The pipeline itself never consumes this; it exists for the preview surface
/// that shows a patched-vs-original comparison before the caller persists
/// anything.
#[must_use]
pub fn diff_preview(original: &str, patched: &str) -> String {
    TextDiff::from_lines(original, patched)
        .unified_diff()
        .context_radius(3)
        .header("original", "patched")
        .to_string()
}
