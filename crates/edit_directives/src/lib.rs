//! Minimal shared contract for a single source-code edit instruction.
//!
//! This crate intentionally defines only the directive data types exchanged
//! between the instruction parser and the line patch engine. It excludes
//! parsing, application, and transport concerns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind discriminator for one edit directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Insert,
    Replace,
    Delete,
}

impl EditKind {
    /// Normalizes a free-form action token to its canonical kind.
    ///
    /// Accepts the English keywords and their Chinese synonyms emitted by the
    /// assistant, case-insensitively.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("insert") || token == "插入" {
            return Some(Self::Insert);
        }
        if token.eq_ignore_ascii_case("replace") || token == "替换" {
            return Some(Self::Replace);
        }
        if token.eq_ignore_ascii_case("delete") || token == "删除" {
            return Some(Self::Delete);
        }
        None
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Replace => "replace",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed edit instruction targeting 1-based lines of the original buffer.
///
/// Immutable once produced; `label` is a human-readable description and does
/// not affect application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDirective {
    pub kind: EditKind,
    pub start_line: u32,
    pub end_line: u32,
    pub text: String,
    pub label: String,
}

impl EditDirective {
    /// Constructs an insertion before `start_line`.
    ///
    /// Insertion is a zero-width range, so `end_line` always equals
    /// `start_line`.
    #[must_use]
    pub fn insert(start_line: u32, text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            start_line,
            end_line: start_line,
            text: text.into(),
            label: label.into(),
        }
    }

    /// Constructs a replacement of the inclusive line range.
    #[must_use]
    pub fn replace(
        start_line: u32,
        end_line: u32,
        text: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::Replace,
            start_line,
            end_line,
            text: text.into(),
            label: label.into(),
        }
    }

    /// Constructs a deletion of the inclusive line range. Carries no payload.
    #[must_use]
    pub fn delete(start_line: u32, end_line: u32, label: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            start_line,
            end_line,
            text: String::new(),
            label: label.into(),
        }
    }

    /// Returns true when the directive carries no replacement payload.
    #[must_use]
    pub fn payload_is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Orders directives for application: descending by `start_line`, stable.
///
/// Line numbers refer to the original buffer, so later-line edits must be
/// applied first; every remaining directive then targets a strictly smaller
/// line and is unaffected by the mutation.
pub fn sort_for_application(directives: &mut [EditDirective]) {
    directives.sort_by(|a, b| b.start_line.cmp(&a.start_line));
}

/// Renders a short human-readable plan for a directive list.
#[must_use]
pub fn application_plan(directives: &[EditDirective]) -> String {
    if directives.is_empty() {
        return "No edit directives.".to_string();
    }

    let mut plan = format!("{} edit(s) to apply:\n", directives.len());
    for (index, directive) in directives.iter().enumerate() {
        let action = match directive.kind {
            EditKind::Insert => format!("insert before line {}", directive.start_line),
            EditKind::Replace => format!(
                "replace lines {}-{}",
                directive.start_line, directive.end_line
            ),
            EditKind::Delete => format!(
                "delete lines {}-{}",
                directive.start_line, directive.end_line
            ),
        };
        plan.push_str(&format!("{}. {}: {}\n", index + 1, action, directive.label));
    }
    plan
}
