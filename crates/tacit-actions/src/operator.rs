//! Operator engine: resolves an operator target and applies
//! delete/change/yank against the document and register.
//!
//! Targets come from three places — the doubled operator key (linewise,
//! current line), a completed motion, or a visual selection — and collapse
//! into one [`Target`] shape here so the application code has a single
//! locus for the range edge cases:
//!
//! * linewise ranges cover whole lines, both endpoints inclusive;
//! * charwise motion targets are half-open at the motion landing (`dw`
//!   removes up to, not including, the next word start) except for
//!   inclusive motions (`e`), whose landing character is part of the range
//!   — see [`MotionKind::inclusive`];
//! * charwise visual selections include the character at the later
//!   endpoint, so a one-character selection removes exactly that character.
//!
//! Register capture always happens before any mutation, with the matching
//! linewise/charwise classification. Put (`p`/`P`) is the register-consuming
//! counterpart and lives here for symmetry.

use tacit_state::{EditorState, Mode, OperatorKind, SelectionSpan, SpanKind};
use tacit_text::motion::{self, MotionContext};
use tacit_text::{Document, Position};

use crate::MotionKind;
use crate::dispatcher::DispatchResult;

/// A resolved operand range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Whole lines `first..=last`.
    Linewise { first: usize, last: usize },
    /// Characters from `start` (inclusive) to `end` (exclusive), possibly
    /// spanning lines. Normalized: `start <= end`.
    Charwise { start: Position, end: Position },
}

/// Resolve the doubled-operator-key target: the current line, linewise.
pub fn doubled_target(start: Position, cursor: Position) -> Target {
    Target::Linewise {
        first: start.line.min(cursor.line),
        last: start.line.max(cursor.line),
    }
}

/// Resolve a completed motion into an operand range. The motion is replayed
/// from `start` on a scratch position under the Free column regime (operator
/// targets may reach one past the last character).
pub fn motion_target(doc: &Document, start: Position, kind: MotionKind) -> Target {
    let mut end = start;
    apply_motion(doc, &mut end, kind);
    if kind.linewise() {
        // A vertical motion that could not move (dj on the last line, dk on
        // the first) resolves to nothing rather than the current line.
        if end.line == start.line {
            return Target::Charwise { start, end: start };
        }
        return Target::Linewise {
            first: start.line.min(end.line),
            last: start.line.max(end.line),
        };
    }
    let (a, mut b) = if start <= end { (start, end) } else { (end, start) };
    if kind.inclusive() && a != b {
        b.col = (b.col + 1).min(doc.line_len(b.line));
    }
    Target::Charwise { start: a, end: b }
}

/// Resolve a visual selection into an operand range.
pub fn selection_target(doc: &Document, span: SelectionSpan) -> Target {
    match span.kind {
        SpanKind::Linewise => Target::Linewise {
            first: span.start.line,
            last: span.end.line,
        },
        SpanKind::Charwise => {
            let mut end = span.end;
            end.col = (end.col + 1).min(doc.line_len(end.line));
            Target::Charwise {
                start: span.start,
                end,
            }
        }
    }
}

fn apply_motion(doc: &Document, pos: &mut Position, kind: MotionKind) {
    let ctx = MotionContext::Free;
    match kind {
        MotionKind::Left => motion::left(doc, pos, ctx),
        MotionKind::Right => motion::right(doc, pos, ctx),
        MotionKind::Up => motion::up(doc, pos, ctx),
        MotionKind::Down => motion::down(doc, pos, ctx),
        MotionKind::LineStart => motion::line_start(doc, pos),
        MotionKind::LineEnd => motion::line_end(doc, pos, ctx),
        MotionKind::FirstNonBlank => motion::first_non_blank(doc, pos),
        MotionKind::WordForward => motion::word_forward(doc, pos),
        MotionKind::WordBackward => motion::word_backward(doc, pos),
        MotionKind::WordEnd => motion::word_end(doc, pos),
    }
}

/// Apply `op` over `target`: capture the register, mutate for delete/change,
/// place the cursor, and set the resulting mode on `state`.
pub fn apply(
    op: OperatorKind,
    target: Target,
    state: &mut EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    match target {
        Target::Linewise { first, last } => apply_linewise(op, first, last, state, cursor),
        Target::Charwise { start, end } => apply_charwise(op, start, end, state, cursor),
    }
}

fn apply_linewise(
    op: OperatorKind,
    first: usize,
    last: usize,
    state: &mut EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    let line_count = state.doc.line_count();
    let first = first.min(line_count - 1);
    let last = last.min(line_count - 1);
    let text = (first..=last)
        .filter_map(|l| state.doc.line(l))
        .collect::<Vec<_>>()
        .join("\n");
    state.register.record(text, SpanKind::Linewise);
    tracing::trace!(target: "actions.operator", op = ?op, first, last, kind = "linewise", "apply");
    if matches!(op, OperatorKind::Yank) {
        state.mode = Mode::Normal;
        return DispatchResult::dirty();
    }
    let count = last - first + 1;
    for _ in 0..count {
        state.doc.remove_line(first);
    }
    state.shift_for_removed_lines(first, count, cursor);
    cursor.line = first.min(state.doc.line_count() - 1);
    cursor.col = 0;
    if matches!(op, OperatorKind::Change) {
        // Change needs somewhere to insert: splice a blank line back in,
        // unless the deletion already collapsed the document to one.
        if count < line_count {
            let at = first.min(state.doc.line_count());
            state.doc.insert_line(at, "");
            cursor.line = at;
            cursor.col = 0;
        }
        state.mode = Mode::Insert;
    } else {
        state.mode = Mode::Normal;
        motion::clamp_position(&state.doc, cursor, MotionContext::Normal);
    }
    DispatchResult::buffer_replaced()
}

fn apply_charwise(
    op: OperatorKind,
    start: Position,
    end: Position,
    state: &mut EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    if start == end {
        return DispatchResult::clean();
    }
    let text = collect_charwise(&state.doc, start, end);
    state.register.record(text, SpanKind::Charwise);
    tracing::trace!(
        target: "actions.operator",
        op = ?op,
        from = ?(start.line, start.col),
        to = ?(end.line, end.col),
        kind = "charwise",
        "apply"
    );
    if matches!(op, OperatorKind::Yank) {
        state.mode = Mode::Normal;
        return DispatchResult::dirty();
    }
    let structural = start.line != end.line;
    if structural {
        // Splice retained prefix of the first line with the retained suffix
        // of the last, then drop every line strictly between.
        let prefix = char_prefix(state.doc.line(start.line).unwrap_or(""), start.col);
        let suffix = char_suffix(state.doc.line(end.line).unwrap_or(""), end.col);
        state.doc.set_line(start.line, format!("{prefix}{suffix}"));
        let removed = end.line - start.line;
        for _ in 0..removed {
            state.doc.remove_line(start.line + 1);
        }
        state.shift_for_removed_lines(start.line + 1, removed, cursor);
    } else {
        let line = state.doc.line(start.line).unwrap_or("");
        let prefix = char_prefix(line, start.col);
        let suffix = char_suffix(line, end.col);
        state.doc.set_line(start.line, format!("{prefix}{suffix}"));
    }
    *cursor = start;
    if matches!(op, OperatorKind::Change) {
        state.mode = Mode::Insert;
        motion::clamp_position(&state.doc, cursor, MotionContext::Insert);
    } else {
        state.mode = Mode::Normal;
        motion::clamp_position(&state.doc, cursor, MotionContext::Normal);
    }
    if structural {
        DispatchResult::buffer_replaced()
    } else {
        DispatchResult::dirty()
    }
}

/// Consume the register at the cursor. `after` selects `p` (linewise: below
/// the cursor line; charwise: one column past the cursor) over `P`. An empty
/// register is a no-op.
pub fn put(state: &mut EditorState, cursor: &mut Position, after: bool) -> DispatchResult {
    if state.register.is_empty() {
        return DispatchResult::clean();
    }
    let text = state.register.text().to_string();
    match state.register.kind() {
        Some(SpanKind::Linewise) => {
            let at = if after {
                cursor.line + 1
            } else {
                cursor.line
            };
            for (i, line) in text.split('\n').enumerate() {
                state.doc.insert_line(at + i, line);
            }
            cursor.line = at;
            cursor.col = 0;
            tracing::trace!(target: "actions.operator", at, kind = "linewise", "put");
            DispatchResult::buffer_replaced()
        }
        Some(SpanKind::Charwise) => {
            let line_len = state.doc.line_len(cursor.line);
            let col = if after {
                (cursor.col + 1).min(line_len)
            } else {
                cursor.col.min(line_len)
            };
            let line = state.doc.line(cursor.line).unwrap_or("").to_string();
            let prefix = char_prefix(&line, col);
            let suffix = char_suffix(&line, col);
            let pieces: Vec<&str> = text.split('\n').collect();
            let structural = pieces.len() > 1;
            if structural {
                state.doc.set_line(cursor.line, format!("{prefix}{}", pieces[0]));
                for (i, piece) in pieces[1..].iter().enumerate() {
                    state.doc.insert_line(cursor.line + 1 + i, *piece);
                }
                let last = cursor.line + pieces.len() - 1;
                let last_piece = pieces[pieces.len() - 1];
                state.doc.set_line(last, format!("{last_piece}{suffix}"));
                cursor.line = last;
                cursor.col = last_piece.chars().count().saturating_sub(1);
            } else {
                state
                    .doc
                    .set_line(cursor.line, format!("{prefix}{text}{suffix}"));
                cursor.col = col + text.chars().count() - 1;
            }
            motion::clamp_position(&state.doc, cursor, MotionContext::Normal);
            tracing::trace!(target: "actions.operator", kind = "charwise", structural, "put");
            if structural {
                DispatchResult::buffer_replaced()
            } else {
                DispatchResult::dirty()
            }
        }
        None => DispatchResult::clean(),
    }
}

/// Gather the text of a charwise range (end exclusive), joining crossed
/// lines with `\n`.
fn collect_charwise(doc: &Document, start: Position, end: Position) -> String {
    if start.line == end.line {
        return char_slice(doc.line(start.line).unwrap_or(""), start.col, end.col);
    }
    let mut out = String::new();
    out.push_str(&char_suffix(doc.line(start.line).unwrap_or(""), start.col));
    for l in start.line + 1..end.line {
        out.push('\n');
        out.push_str(doc.line(l).unwrap_or(""));
    }
    out.push('\n');
    out.push_str(&char_prefix(doc.line(end.line).unwrap_or(""), end.col));
    out
}

fn char_prefix(line: &str, col: usize) -> String {
    line.chars().take(col).collect()
}

fn char_suffix(line: &str, col: usize) -> String {
    line.chars().skip(col).collect()
}

fn char_slice(line: &str, from: usize, to: usize) -> String {
    line.chars().skip(from).take(to.saturating_sub(from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacit_text::Document;

    fn state(text: &str) -> EditorState {
        EditorState::new(Document::from_str(text).unwrap())
    }

    #[test]
    fn motion_target_word_forward_is_exclusive() {
        let st = state("hello world");
        let target = motion_target(&st.doc, Position::origin(), MotionKind::WordForward);
        assert_eq!(
            target,
            Target::Charwise {
                start: Position::new(0, 0),
                end: Position::new(0, 6),
            }
        );
    }

    #[test]
    fn motion_target_word_end_is_inclusive() {
        let st = state("hello world");
        let target = motion_target(&st.doc, Position::origin(), MotionKind::WordEnd);
        // e lands on 'o' (col 4); the inclusive policy extends past it.
        assert_eq!(
            target,
            Target::Charwise {
                start: Position::new(0, 0),
                end: Position::new(0, 5),
            }
        );
    }

    #[test]
    fn motion_target_vertical_resolves_linewise() {
        let st = state("a\nb\nc");
        let target = motion_target(&st.doc, Position::new(1, 0), MotionKind::Down);
        assert_eq!(target, Target::Linewise { first: 1, last: 2 });
    }

    #[test]
    fn motion_target_backward_normalizes() {
        let st = state("one two");
        let target = motion_target(&st.doc, Position::new(0, 4), MotionKind::WordBackward);
        assert_eq!(
            target,
            Target::Charwise {
                start: Position::new(0, 0),
                end: Position::new(0, 4),
            }
        );
    }

    #[test]
    fn delete_charwise_single_line() {
        let mut st = state("hello world");
        let mut cursor = Position::origin();
        let target = motion_target(&st.doc, cursor, MotionKind::WordForward);
        apply(OperatorKind::Delete, target, &mut st, &mut cursor);
        assert_eq!(st.doc.line(0), Some("world"));
        assert_eq!(st.register.text(), "hello ");
        assert_eq!(st.register.kind(), Some(SpanKind::Charwise));
        assert_eq!(cursor, Position::origin());
    }

    #[test]
    fn delete_charwise_multiline_splices() {
        let mut st = state("alpha\nbeta\ngamma");
        let mut cursor = Position::new(0, 2);
        let target = Target::Charwise {
            start: Position::new(0, 2),
            end: Position::new(2, 3),
        };
        apply(OperatorKind::Delete, target, &mut st, &mut cursor);
        assert_eq!(st.doc.line_count(), 1);
        assert_eq!(st.doc.line(0), Some("alma"));
        assert_eq!(st.register.text(), "pha\nbeta\ngam");
    }

    #[test]
    fn yank_linewise_leaves_document_untouched() {
        let mut st = state("one\ntwo");
        let mut cursor = Position::new(0, 1);
        let before = cursor;
        apply(
            OperatorKind::Yank,
            Target::Linewise { first: 0, last: 1 },
            &mut st,
            &mut cursor,
        );
        assert_eq!(st.doc.line_count(), 2);
        assert_eq!(st.register.text(), "one\ntwo");
        assert_eq!(st.register.kind(), Some(SpanKind::Linewise));
        assert_eq!(cursor, before);
        assert!(!st.doc.dirty());
    }

    #[test]
    fn change_linewise_leaves_blank_line_for_insertion() {
        let mut st = state("one\ntwo\nthree");
        let mut cursor = Position::new(1, 2);
        apply(
            OperatorKind::Change,
            Target::Linewise { first: 1, last: 1 },
            &mut st,
            &mut cursor,
        );
        assert_eq!(st.doc.line_count(), 3);
        assert_eq!(st.doc.line(1), Some(""));
        assert_eq!(cursor, Position::new(1, 0));
        assert_eq!(st.mode, Mode::Insert);
        assert_eq!(st.register.text(), "two");
    }

    #[test]
    fn delete_every_line_leaves_single_empty_line() {
        let mut st = state("a\nb");
        let mut cursor = Position::origin();
        apply(
            OperatorKind::Delete,
            Target::Linewise { first: 0, last: 1 },
            &mut st,
            &mut cursor,
        );
        assert_eq!(st.doc.line_count(), 1);
        assert_eq!(st.doc.line(0), Some(""));
        assert_eq!(cursor, Position::origin());
    }

    #[test]
    fn change_every_line_does_not_add_a_second_blank() {
        let mut st = state("solo");
        let mut cursor = Position::origin();
        apply(
            OperatorKind::Change,
            Target::Linewise { first: 0, last: 0 },
            &mut st,
            &mut cursor,
        );
        assert_eq!(st.doc.line_count(), 1);
        assert_eq!(st.doc.line(0), Some(""));
        assert_eq!(st.mode, Mode::Insert);
    }

    #[test]
    fn put_linewise_after_and_before() {
        let mut st = state("one\nthree");
        st.register.record("two", SpanKind::Linewise);
        let mut cursor = Position::new(0, 0);
        put(&mut st, &mut cursor, true);
        assert_eq!(st.doc.line(1), Some("two"));
        assert_eq!(cursor, Position::new(1, 0));

        let mut st = state("two\nthree");
        st.register.record("one", SpanKind::Linewise);
        let mut cursor = Position::new(0, 2);
        put(&mut st, &mut cursor, false);
        assert_eq!(st.doc.line(0), Some("one"));
        assert_eq!(st.doc.line(1), Some("two"));
        assert_eq!(cursor, Position::new(0, 0));
    }

    #[test]
    fn put_charwise_lands_on_last_inserted_char() {
        let mut st = state("abc");
        st.register.record("XY", SpanKind::Charwise);
        let mut cursor = Position::new(0, 1);
        put(&mut st, &mut cursor, true);
        assert_eq!(st.doc.line(0), Some("abXYc"));
        assert_eq!(cursor, Position::new(0, 3));
    }

    #[test]
    fn put_charwise_with_embedded_newlines_splits_line() {
        let mut st = state("headtail");
        st.register.record("one\ntwo", SpanKind::Charwise);
        let mut cursor = Position::new(0, 3);
        put(&mut st, &mut cursor, true);
        assert_eq!(st.doc.line_count(), 2);
        assert_eq!(st.doc.line(0), Some("headone"));
        assert_eq!(st.doc.line(1), Some("twotail"));
        assert_eq!(cursor, Position::new(1, 2));
    }

    #[test]
    fn put_empty_register_is_noop() {
        let mut st = state("abc");
        let mut cursor = Position::origin();
        let res = put(&mut st, &mut cursor, true);
        assert!(!res.dirty);
        assert_eq!(st.doc.line(0), Some("abc"));
    }

    #[test]
    fn selection_target_single_char_is_that_char() {
        let st = state("abc");
        let span = SelectionSpan::new(Position::new(0, 1), Position::new(0, 1), SpanKind::Charwise);
        let target = selection_target(&st.doc, span);
        assert_eq!(
            target,
            Target::Charwise {
                start: Position::new(0, 1),
                end: Position::new(0, 2),
            }
        );
    }
}
