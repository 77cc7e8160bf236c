//! Motion sub-dispatch.
//!
//! Pure cursor movement: no side effects beyond the cursor itself. The
//! column regime comes from the active mode (Normal clamps onto a real
//! character, Insert wraps and may rest past the line end, the visual modes
//! use the free bound). In OperatorPending a motion is not movement at all —
//! it is the operator's target and is routed to the operator engine with the
//! cursor left at the range start by the application code.

use super::DispatchResult;
use crate::MotionKind;
use tacit_model::View;
use tacit_state::{EditorState, Mode};
use tacit_text::motion::{self, MotionContext};
use tacit_text::{Document, Position};

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    match state.mode {
        Mode::Command => DispatchResult::clean(),
        Mode::OperatorPending => {
            let Some(pending) = state.take_pending() else {
                state.mode = Mode::Normal;
                return DispatchResult::clean();
            };
            state.mode = Mode::Normal;
            let target = crate::operator::motion_target(&state.doc, pending.start, kind);
            crate::operator::apply(pending.op, target, state, &mut view.cursor)
        }
        mode => {
            let ctx = context_for(mode);
            let before = view.cursor;
            apply_motion(&state.doc, &mut view.cursor, kind, ctx);
            if matches!(mode, Mode::Normal) {
                motion::clamp_position(&state.doc, &mut view.cursor, MotionContext::Normal);
            }
            if before != view.cursor {
                tracing::trace!(
                    target: "actions.dispatch",
                    motion = ?kind,
                    line = before.line,
                    col = before.col,
                    to_line = view.cursor.line,
                    to_col = view.cursor.col,
                    "motion"
                );
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
    }
}

fn context_for(mode: Mode) -> MotionContext {
    match mode {
        Mode::Insert => MotionContext::Insert,
        Mode::Visual | Mode::VisualLine => MotionContext::Free,
        _ => MotionContext::Normal,
    }
}

fn apply_motion(doc: &Document, pos: &mut Position, kind: MotionKind, ctx: MotionContext) {
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
