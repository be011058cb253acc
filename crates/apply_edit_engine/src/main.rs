use std::io::Write;

use anyhow::{bail, Context};

use apply_edit_engine::apply_edit_directives;
use edit_directives::{sort_for_application, EditDirective};

/// Applies a JSON directive list to a file and writes the result to stdout.
///
/// Usage: `apply_edits <original-file> <directives-json-file>`
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [original_path, directives_path] = args.as_slice() else {
        bail!("usage: apply_edits <original-file> <directives-json-file>");
    };

    let original = std::fs::read_to_string(original_path)
        .with_context(|| format!("failed to read original file {original_path}"))?;
    let directives_json = std::fs::read_to_string(directives_path)
        .with_context(|| format!("failed to read directives file {directives_path}"))?;
    let mut directives: Vec<EditDirective> = serde_json::from_str(&directives_json)
        .with_context(|| format!("failed to parse directives in {directives_path}"))?;

    sort_for_application(&mut directives);
    let applied = apply_edit_directives(&original, &directives);

    let mut stderr = std::io::stderr();
    for skipped in &applied.report.skipped {
        writeln!(
            stderr,
            "skipped directive {} ({}): {}",
            skipped.index + 1,
            skipped.label,
            skipped.reason
        )?;
    }
    writeln!(
        stderr,
        "applied {} of {} directive(s)",
        applied.report.applied,
        directives.len()
    )?;

    print!("{}", applied.text);
    Ok(())
}
