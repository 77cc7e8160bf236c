//! Mode transition handling, including the mode-dependent Cancel.
//!
//! Each transition clears whatever transient state stops applying in the new
//! mode: leaving the visual modes drops the anchor, leaving OperatorPending
//! discards the pending operator, leaving Command abandons the buffer. The
//! insert-entry variants carry their conventional cursor side effects (the
//! append column bump, the open-line splice).

use super::DispatchResult;
use crate::ModeChange;
use tacit_model::View;
use tacit_state::{EditorState, Mode};
use tacit_text::motion::{self, MotionContext};

pub(crate) fn handle_mode_change(
    mc: ModeChange,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    match mc {
        ModeChange::EnterInsert => {
            if !matches!(state.mode, Mode::Normal) {
                return DispatchResult::clean();
            }
            state.mode = Mode::Insert;
            DispatchResult::dirty()
        }
        ModeChange::EnterInsertAppend => {
            if !matches!(state.mode, Mode::Normal) {
                return DispatchResult::clean();
            }
            // Append inserts after the cursor character: advance one column,
            // clamped to the insertion point bound.
            let len = state.doc.line_len(view.cursor.line);
            if view.cursor.col < len {
                view.cursor.col += 1;
            }
            state.mode = Mode::Insert;
            DispatchResult::dirty()
        }
        ModeChange::OpenLineBelow => {
            if !matches!(state.mode, Mode::Normal) {
                return DispatchResult::clean();
            }
            let at = view.cursor.line + 1;
            state.doc.insert_line(at, "");
            view.cursor.line = at;
            view.cursor.col = 0;
            state.mode = Mode::Insert;
            DispatchResult::buffer_replaced()
        }
        ModeChange::OpenLineAbove => {
            if !matches!(state.mode, Mode::Normal) {
                return DispatchResult::clean();
            }
            let at = view.cursor.line;
            state.doc.insert_line(at, "");
            view.cursor.col = 0;
            state.mode = Mode::Insert;
            DispatchResult::buffer_replaced()
        }
        ModeChange::EnterVisual => match state.mode {
            Mode::Normal => {
                state.anchor = Some(view.cursor);
                state.mode = Mode::Visual;
                DispatchResult::dirty()
            }
            // Toggling the same visual kind leaves visual mode entirely.
            Mode::Visual => {
                state.clear_visual();
                state.mode = Mode::Normal;
                DispatchResult::dirty()
            }
            // Switching kinds keeps the anchor.
            Mode::VisualLine => {
                state.mode = Mode::Visual;
                DispatchResult::dirty()
            }
            _ => DispatchResult::clean(),
        },
        ModeChange::EnterVisualLine => match state.mode {
            Mode::Normal => {
                state.anchor = Some(view.cursor);
                state.mode = Mode::VisualLine;
                DispatchResult::dirty()
            }
            Mode::VisualLine => {
                state.clear_visual();
                state.mode = Mode::Normal;
                DispatchResult::dirty()
            }
            Mode::Visual => {
                state.mode = Mode::VisualLine;
                DispatchResult::dirty()
            }
            _ => DispatchResult::clean(),
        },
    }
}

/// Escape. What gets abandoned depends on where we are.
pub(crate) fn handle_cancel(state: &mut EditorState, view: &mut View) -> DispatchResult {
    match state.mode {
        Mode::Insert => {
            state.mode = Mode::Normal;
            // The cursor retreats over the last typed character.
            if view.cursor.col > 0 {
                view.cursor.col -= 1;
            }
            motion::clamp_position(&state.doc, &mut view.cursor, MotionContext::Normal);
            DispatchResult::dirty()
        }
        Mode::Visual | Mode::VisualLine => {
            state.clear_visual();
            state.mode = Mode::Normal;
            DispatchResult::dirty()
        }
        Mode::OperatorPending => {
            state.take_pending();
            state.mode = Mode::Normal;
            DispatchResult::dirty()
        }
        Mode::Command => {
            state.command_line.clear();
            state.mode = state.command_return;
            DispatchResult::dirty()
        }
        Mode::Normal => DispatchResult::clean(),
    }
}
