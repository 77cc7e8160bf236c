//! Cursor motion algorithms.
//!
//! These operate purely on a `Document` + `Position` pair and never mutate
//! the document. Mode-dependent differences — whether `left`/`right` wrap
//! across line boundaries, and where "end of line" is — are captured by a
//! [`MotionContext`] passed in by the dispatcher rather than read from any
//! global state, keeping every function here independently testable.
//!
//! The two meanings of "end of line" are deliberately funneled through one
//! policy function ([`eol_col`]): in Normal context the cursor rests *on* the
//! last character of a non-empty line; in Insert and Free contexts it may sit
//! one past it (the insertion point / exclusive range endpoint). Getting this
//! split wrong is the classic off-by-one of modal editors, so no caller does
//! the arithmetic inline.
//!
//! Word motions use the simplified single-class definition: any run of
//! non-whitespace characters is a word, and line breaks count as whitespace
//! when a scan crosses lines.

use crate::{Document, Position};

/// Which column regime a motion operates under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionContext {
    /// Normal mode: block cursor rests on a character; `h`/`l` never wrap.
    Normal,
    /// Insert mode: insertion point may sit past the last character and
    /// horizontal motion wraps across line boundaries.
    Insert,
    /// Visual selections and operator targets: insertion-point column bound,
    /// no horizontal wrap.
    Free,
}

/// Maximum legal column on a line of `len` characters under `ctx`. This is
/// simultaneously the "end of line" target: the dual inclusive/exclusive
/// meaning lives here and nowhere else.
pub fn eol_col(len: usize, ctx: MotionContext) -> usize {
    match ctx {
        MotionContext::Normal => len.saturating_sub(1),
        MotionContext::Insert | MotionContext::Free => len,
    }
}

/// Re-clamp a position into the document after any operation that may have
/// invalidated it (line deletions, joins, mode changes).
pub fn clamp_position(doc: &Document, pos: &mut Position, ctx: MotionContext) {
    if pos.line >= doc.line_count() {
        pos.line = doc.line_count() - 1;
    }
    let max = eol_col(doc.line_len(pos.line), ctx);
    if pos.col > max {
        pos.col = max;
    }
}

/// Move left one column. In Insert context column 0 wraps to the end of the
/// previous line; in Normal context `h` never wraps.
pub fn left(doc: &Document, pos: &mut Position, ctx: MotionContext) {
    if pos.col > 0 {
        pos.col -= 1;
    } else if matches!(ctx, MotionContext::Insert) && pos.line > 0 {
        pos.line -= 1;
        pos.col = doc.line_len(pos.line);
    }
}

/// Move right one column. Normal context stops on the last character of a
/// non-empty line; Insert context may pass it and wraps to the next line;
/// Free context may pass it but never wraps.
pub fn right(doc: &Document, pos: &mut Position, ctx: MotionContext) {
    let len = doc.line_len(pos.line);
    match ctx {
        MotionContext::Normal => {
            if pos.col < eol_col(len, ctx) {
                pos.col += 1;
            }
        }
        MotionContext::Insert => {
            if pos.col < len {
                pos.col += 1;
            } else if pos.col == len && pos.line + 1 < doc.line_count() {
                pos.line += 1;
                pos.col = 0;
            }
        }
        MotionContext::Free => {
            if pos.col < len {
                pos.col += 1;
            }
        }
    }
}

/// Move up one line, clamping the column to the destination line.
pub fn up(doc: &Document, pos: &mut Position, ctx: MotionContext) {
    if pos.line == 0 {
        return;
    }
    pos.line -= 1;
    pos.col = pos.col.min(eol_col(doc.line_len(pos.line), ctx));
}

/// Move down one line, clamping the column to the destination line. Vertical
/// motion never crosses past the last line.
pub fn down(doc: &Document, pos: &mut Position, ctx: MotionContext) {
    if pos.line + 1 >= doc.line_count() {
        return;
    }
    pos.line += 1;
    pos.col = pos.col.min(eol_col(doc.line_len(pos.line), ctx));
}

/// Column 0.
pub fn line_start(_doc: &Document, pos: &mut Position) {
    pos.col = 0;
}

/// Column of the first non-whitespace character, 0 if the line is blank.
pub fn first_non_blank(doc: &Document, pos: &mut Position) {
    pos.col = doc
        .line(pos.line)
        .and_then(|l| l.chars().position(|c| !c.is_whitespace()))
        .unwrap_or(0);
}

/// End of line under the given context (see [`eol_col`]).
pub fn line_end(doc: &Document, pos: &mut Position, ctx: MotionContext) {
    pos.col = eol_col(doc.line_len(pos.line), ctx);
}

fn char_at(doc: &Document, line: usize, col: usize) -> Option<char> {
    doc.line(line).and_then(|l| l.chars().nth(col))
}

/// Move to the start of the next word. If currently inside a word, first
/// skip the remainder of that run, then skip whitespace (crossing line
/// breaks), landing on the first non-blank character found. Running out of
/// document lands at the end of the last line scanned.
pub fn word_forward(doc: &Document, pos: &mut Position) {
    let mut line = pos.line;
    let mut col = pos.col;
    // Skip the remainder of the current non-blank run, if we start on one.
    while let Some(ch) = char_at(doc, line, col) {
        if ch.is_whitespace() {
            break;
        }
        col += 1;
    }
    // Skip separators until the next word start, crossing lines.
    loop {
        match char_at(doc, line, col) {
            Some(ch) if ch.is_whitespace() => col += 1,
            Some(_) => {
                pos.line = line;
                pos.col = col;
                return;
            }
            None => {
                if line + 1 < doc.line_count() {
                    line += 1;
                    col = 0;
                } else {
                    // End of document without finding a word.
                    pos.line = line;
                    pos.col = col.min(doc.line_len(line));
                    return;
                }
            }
        }
    }
}

/// Move to the last character of the next word: advance one position, skip
/// whitespace to the next word, then run to that word's final character.
pub fn word_end(doc: &Document, pos: &mut Position) {
    let mut line = pos.line;
    let mut col = pos.col + 1;
    loop {
        match char_at(doc, line, col) {
            Some(ch) if ch.is_whitespace() => col += 1,
            Some(_) => break,
            None => {
                if line + 1 < doc.line_count() {
                    line += 1;
                    col = 0;
                } else {
                    pos.line = line;
                    pos.col = col.min(doc.line_len(line));
                    return;
                }
            }
        }
    }
    // On a word character; run forward while the next one is still non-blank.
    while let Some(next) = char_at(doc, line, col + 1) {
        if next.is_whitespace() {
            break;
        }
        col += 1;
    }
    pos.line = line;
    pos.col = col;
}

/// Move to the first character of the previous word: step back one position,
/// skip whitespace backward (crossing line breaks), then walk to the start
/// of the non-blank run. Clamps to the document origin.
pub fn word_backward(doc: &Document, pos: &mut Position) {
    let mut line = pos.line;
    let mut col = pos.col;
    // Step back one position; the end-of-line slot counts as a separator.
    if col > 0 {
        col -= 1;
    } else if line > 0 {
        line -= 1;
        col = doc.line_len(line);
    } else {
        pos.col = 0;
        return;
    }
    // Skip separators backward.
    loop {
        match char_at(doc, line, col) {
            Some(ch) if !ch.is_whitespace() => break,
            _ => {
                if col > 0 {
                    col -= 1;
                } else if line > 0 {
                    line -= 1;
                    col = doc.line_len(line);
                } else {
                    pos.line = 0;
                    pos.col = 0;
                    return;
                }
            }
        }
    }
    // Walk back to the start of this run.
    while col > 0 {
        match char_at(doc, line, col - 1) {
            Some(ch) if !ch.is_whitespace() => col -= 1,
            _ => break,
        }
    }
    pos.line = line;
    pos.col = col;
}
