//! Text edit action handling (insert/backspace/newline/delete-under).
//!
//! Mutations flow through the `Document` primitives and update the active
//! view cursor in the same step. Each edit is gated on the mode it belongs
//! to (the insert family in Insert, delete-under in Normal); an edit intent
//! arriving in any other mode is absorbed as a clean no-op.

use super::DispatchResult;
use crate::EditKind;
use tacit_model::View;
use tacit_state::{EditorState, Mode, SpanKind};

/// Spaces substituted for a tab intent.
const TAB_SPACES: usize = 4;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    match kind {
        EditKind::InsertChar(ch) => {
            if !matches!(state.mode, Mode::Insert) {
                return DispatchResult::clean();
            }
            state
                .doc
                .insert_char(view.cursor.line, view.cursor.col, ch);
            view.cursor.col += 1;
            tracing::trace!(
                target: "actions.dispatch",
                op = "insert_char",
                line = view.cursor.line,
                col = view.cursor.col,
                "edit"
            );
            DispatchResult::dirty()
        }
        EditKind::InsertTab => {
            if !matches!(state.mode, Mode::Insert) {
                return DispatchResult::clean();
            }
            for _ in 0..TAB_SPACES {
                state
                    .doc
                    .insert_char(view.cursor.line, view.cursor.col, ' ');
                view.cursor.col += 1;
            }
            DispatchResult::dirty()
        }
        EditKind::InsertNewline => {
            if !matches!(state.mode, Mode::Insert) {
                return DispatchResult::clean();
            }
            state.doc.split_line(view.cursor.line, view.cursor.col);
            view.cursor.line += 1;
            view.cursor.col = 0;
            tracing::trace!(
                target: "actions.dispatch",
                op = "insert_newline",
                to_line = view.cursor.line,
                "edit"
            );
            DispatchResult::buffer_replaced()
        }
        EditKind::Backspace => {
            if !matches!(state.mode, Mode::Insert) {
                return DispatchResult::clean();
            }
            let merging = view.cursor.col == 0 && view.cursor.line > 0;
            let prev_len = if merging {
                state.doc.line_len(view.cursor.line - 1)
            } else {
                0
            };
            if !state.doc.delete_before(view.cursor.line, view.cursor.col) {
                return DispatchResult::clean();
            }
            if merging {
                view.cursor.line -= 1;
                view.cursor.col = prev_len;
                DispatchResult::buffer_replaced()
            } else {
                view.cursor.col -= 1;
                DispatchResult::dirty()
            }
        }
        EditKind::DeleteUnder => {
            if !matches!(state.mode, Mode::Normal) {
                return DispatchResult::clean();
            }
            let removed = state
                .doc
                .line(view.cursor.line)
                .and_then(|l| l.chars().nth(view.cursor.col));
            if !state.doc.delete_at(view.cursor.line, view.cursor.col) {
                return DispatchResult::clean();
            }
            if let Some(ch) = removed {
                state.register.record(ch.to_string(), SpanKind::Charwise);
            }
            // Retreat if the delete left the cursor past the new end.
            let len = state.doc.line_len(view.cursor.line);
            if view.cursor.col >= len && view.cursor.col > 0 {
                view.cursor.col -= 1;
            }
            tracing::trace!(
                target: "actions.dispatch",
                op = "delete_under",
                line = view.cursor.line,
                col = view.cursor.col,
                "edit"
            );
            DispatchResult::dirty()
        }
    }
}
