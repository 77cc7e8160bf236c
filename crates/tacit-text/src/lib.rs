//! Line-vector document storage.
//!
//! A `Document` is an ordered sequence of text lines plus a dirty flag. It
//! owns the character-level mutation primitives (insert/delete/split/merge)
//! and the whole-line splice operations the operator layer builds on. All
//! policy — which mutation happens in which mode, where the cursor lands —
//! lives above this crate; a `Document` only guarantees its own invariants:
//!
//! * it always contains at least one line (possibly empty);
//! * line indices are contiguous from 0;
//! * every content mutation sets the dirty flag, which only an external
//!   persistence step clears;
//! * every structural mutation records an advisory [`ChangeEvent`] hint for
//!   the renderer's per-line caches.
//!
//! Columns are character indices (not bytes): `col` addresses the `col`-th
//! `char` of a line and may equal the line's character length to denote the
//! end-of-line insertion point.

use anyhow::Result;
use tacit_events::{ChangeEvent, ChangeLog};

pub mod motion;

/// A position inside a document expressed as (line index, character column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }
}

/// In-memory text document: a non-empty vector of lines.
#[derive(Debug)]
pub struct Document {
    lines: Vec<String>,
    dirty: bool,
    changes: ChangeLog,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding a single zero-length line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            dirty: false,
            changes: ChangeLog::new(),
        }
    }

    /// Construct a document from an in-memory string slice.
    pub fn from_str(content: &str) -> Result<Self> {
        let mut doc = Self::new();
        doc.load_from_string(content);
        Ok(doc)
    }

    /// Replace the whole content, splitting on line breaks. An empty input
    /// still yields one empty line. Resets the dirty flag: freshly seeded
    /// content is in sync with its external source by definition.
    pub fn load_from_string(&mut self, text: &str) {
        self.lines = text.lines().map(|l| l.to_string()).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.dirty = false;
    }

    /// Serialize for the persistence collaborator: lines joined with `\n`,
    /// with a trailing newline unless the document is a single empty line.
    pub fn export_as_string(&self) -> String {
        if self.lines.len() == 1 && self.lines[0].is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The requested line, or `None` out of range.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|s| s.as_str())
    }

    /// Character length of a line (0 for out-of-range indices).
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(|s| s.chars().count()).unwrap_or(0)
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Cleared only by the persistence collaborator after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Take the pending advisory change hints (renderer cache maintenance).
    pub fn drain_changes(&mut self) -> Vec<ChangeEvent> {
        self.changes.drain()
    }

    /// Insert `ch` before column `col`. Out-of-range lines are a no-op; the
    /// column is clamped to the end-of-line insertion point.
    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        let Some(text) = self.lines.get_mut(line) else {
            return;
        };
        let byte = byte_of_col(text, col);
        text.insert(byte, ch);
        self.dirty = true;
        self.changes.record(ChangeEvent::LineInvalidated { line });
    }

    /// Delete the character immediately before `col` (backspace semantics).
    /// At column 0 of a non-first line the line merges into its predecessor.
    /// Returns whether anything changed.
    pub fn delete_before(&mut self, line: usize, col: usize) -> bool {
        let Some(text) = self.lines.get(line) else {
            return false;
        };
        let len = text.chars().count();
        if col > 0 && col <= len {
            let text = &mut self.lines[line];
            let start = byte_of_col(text, col - 1);
            let end = byte_of_col(text, col);
            text.replace_range(start..end, "");
            self.dirty = true;
            self.changes.record(ChangeEvent::LineInvalidated { line });
            return true;
        }
        if col == 0 && line > 0 {
            let tail = self.lines.remove(line);
            self.lines[line - 1].push_str(&tail);
            self.dirty = true;
            self.changes
                .record(ChangeEvent::LinesDeleted { at: line, count: 1 });
            self.changes
                .record(ChangeEvent::LineInvalidated { line: line - 1 });
            return true;
        }
        false
    }

    /// Delete the character at `col` (not before it); never merges lines.
    /// Returns whether anything changed.
    pub fn delete_at(&mut self, line: usize, col: usize) -> bool {
        let Some(text) = self.lines.get_mut(line) else {
            return false;
        };
        let len = text.chars().count();
        if col >= len {
            return false;
        }
        let start = byte_of_col(text, col);
        let end = byte_of_col(text, col + 1);
        text.replace_range(start..end, "");
        self.dirty = true;
        self.changes.record(ChangeEvent::LineInvalidated { line });
        true
    }

    /// Split a line in two at `col`; the suffix becomes a new line
    /// immediately after. Out-of-range lines are a no-op.
    pub fn split_line(&mut self, line: usize, col: usize) {
        let Some(text) = self.lines.get_mut(line) else {
            return;
        };
        let byte = byte_of_col(text, col);
        let tail = text.split_off(byte);
        self.lines.insert(line + 1, tail);
        self.dirty = true;
        self.changes.record(ChangeEvent::LineInvalidated { line });
        self.changes.record(ChangeEvent::LinesInserted {
            at: line + 1,
            count: 1,
        });
    }

    /// Splice a whole line in at `at` (clamped to `0..=line_count`).
    pub fn insert_line(&mut self, at: usize, text: impl Into<String>) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, text.into());
        self.dirty = true;
        self.changes
            .record(ChangeEvent::LinesInserted { at, count: 1 });
    }

    /// Remove a whole line, returning its content. Removing the last
    /// remaining line leaves one empty line in its place.
    pub fn remove_line(&mut self, at: usize) -> Option<String> {
        if at >= self.lines.len() {
            return None;
        }
        self.dirty = true;
        if self.lines.len() == 1 {
            let old = std::mem::take(&mut self.lines[0]);
            self.changes.record(ChangeEvent::LineInvalidated { line: 0 });
            return Some(old);
        }
        let old = self.lines.remove(at);
        self.changes
            .record(ChangeEvent::LinesDeleted { at, count: 1 });
        Some(old)
    }

    /// Replace a line's content in place. Out-of-range lines are a no-op.
    pub fn set_line(&mut self, at: usize, text: impl Into<String>) {
        let Some(slot) = self.lines.get_mut(at) else {
            return;
        };
        *slot = text.into();
        self.dirty = true;
        self.changes.record(ChangeEvent::LineInvalidated { line: at });
    }
}

/// Byte offset of character column `col` within `line`, clamped to the end.
fn byte_of_col(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(b, _)| b)
        .unwrap_or(line.len())
}
