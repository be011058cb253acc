//! Markup recognition for the structured-instruction section.
//!
//! The accepted shapes mirror the prompt contract the assistant is driven
//! with: a level-3/4 heading containing the section title (optionally behind
//! a decorative glyph), bolded `**修改 N：…**` / `**Modification N: …**` block
//! markers, labeled `操作类型`/`位置`/`内容` field lines, and a fenced code
//! payload. English label synonyms are accepted alongside the Chinese ones.

use std::sync::OnceLock;

use regex::Regex;

fn section_heading_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)#{3,4}[ \t]*(?:🔧[ \t]*)?(?:结构化修改指令|structured\s+edit\s+instructions)")
            .expect("section heading regex must compile")
    })
}

fn block_marker_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)\*\*(?:修改|modification)\s*\d+\s*[：:]")
            .expect("block marker regex must compile")
    })
}

fn notes_marker_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)\*\*(?:注意|note)").expect("notes marker regex must compile")
    })
}

pub(crate) fn description_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)\*\*(?:修改|modification)\s*(\d+)\s*[：:]\s*([^\n*]+)\*\*")
            .expect("description regex must compile")
    })
}

pub(crate) fn operation_type_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)-?\s*(?:操作类型|operation\s*type)\s*[：:]\s*(插入|替换|删除|INSERT|REPLACE|DELETE)")
            .expect("operation type regex must compile")
    })
}

pub(crate) fn position_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        // The range separator synonyms are equal alternatives in one class.
        Regex::new(r"(?i)-?\s*(?:位置|position)\s*[：:]\s*第?\s*(\d+)\s*(?:[-到至~]\s*(\d+))?\s*行?")
            .expect("position regex must compile")
    })
}

pub(crate) fn content_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?is)-?\s*(?:内容|content)\s*[：:]\s*\n```[^\n]*\n(.*?)```")
            .expect("content regex must compile")
    })
}

/// Locates the structured-instruction section, returned as a slice of `text`.
///
/// The section spans from the end of its heading to the next `###` heading or
/// end of input. Absent heading means "no directives present", not an error.
pub(crate) fn locate_section(text: &str) -> Option<&str> {
    let heading = section_heading_regex().find(text)?;
    let body = &text[heading.end()..];
    match body.find("###") {
        Some(next_heading) => Some(&body[..next_heading]),
        None => Some(body),
    }
}

/// Splits the section into instruction blocks.
///
/// A block spans from one marker to the next marker, a trailing notes marker,
/// or the end of the section, whichever comes first. The section itself was
/// already cut at the next heading by [`locate_section`].
pub(crate) fn split_blocks(section: &str) -> Vec<&str> {
    let starts: Vec<usize> = block_marker_regex()
        .find_iter(section)
        .map(|marker| marker.start())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let hard_end = starts.get(index + 1).copied().unwrap_or(section.len());
            let body = &section[start..hard_end];
            // The notes marker is searched past the block's own marker so the
            // marker's bold asterisks cannot terminate the block early.
            let marker_len = block_marker_regex()
                .find(body)
                .map(|found| found.end())
                .unwrap_or(0);
            match notes_marker_regex().find(&body[marker_len..]) {
                Some(notes) => &body[..marker_len + notes.start()],
                None => body,
            }
        })
        .collect()
}

/// Returns true when the text contains a structured-instruction heading.
pub(crate) fn has_section_heading(text: &str) -> bool {
    section_heading_regex().is_match(text)
}
