//! Dispatcher applying an [`Action`] to the editor model.
//!
//! Decomposed by concern:
//! * `motion`  - cursor movement, including motions as operator targets
//! * `mode`    - mode transitions and the mode-dependent Cancel
//! * `command` - command-line editing & execution (:q, :q!, :w, :wq, :e)
//! * `edit`    - text mutation (insert/backspace/newline/delete-under)
//!
//! Operator application itself lives in `crate::operator`; the dispatcher
//! only decides *when* an operator fires (doubled key, completed motion, or
//! visual selection) and with which target.
//!
//! Exactly one intent is processed per `dispatch` call, synchronously: by
//! the time it returns, every state transition and document/cursor/register
//! mutation for that intent has happened and positions referencing shifted
//! line indices have been re-adjusted.

use crate::{Action, OperatorKind};
use tacit_model::EditorModel;
use tacit_state::{Mode, PendingOperator};
use tacit_text::motion::MotionContext;

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;

pub use command_parser::{CommandParser, ParsedCommand};

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A repaint is needed.
    pub dirty: bool,
    /// The editor should exit.
    pub quit: bool,
    /// A structural buffer replacement occurred (file load, line splices):
    /// per-line render caches must be treated as invalid wholesale rather
    /// than patched from the advisory change hints.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: true,
        }
    }
}

/// Apply an action to the editor model. Returns whether a render is needed
/// (`dirty`), the editor should exit (`quit`), or render caches are invalid
/// (`buffer_replaced`).
pub fn dispatch(action: Action, model: &mut EditorModel) -> DispatchResult {
    let (state, view) = model.split_state_and_active_view();
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, view),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state, view),
        Action::Cancel => mode::handle_cancel(state, view),
        Action::Operator(op) => handle_operator_key(op, state, view),
        Action::Edit(kind) => edit::handle_edit(kind, state, view),
        Action::PasteAfter => {
            if matches!(state.mode, Mode::Normal) {
                crate::operator::put(state, &mut view.cursor, true)
            } else {
                DispatchResult::clean()
            }
        }
        Action::PasteBefore => {
            if matches!(state.mode, Mode::Normal) {
                crate::operator::put(state, &mut view.cursor, false)
            } else {
                DispatchResult::clean()
            }
        }
        Action::CommandStart
        | Action::CommandChar(_)
        | Action::CommandBackspace
        | Action::CommandCursorLeft
        | Action::CommandCursorRight
        | Action::CommandExecute => command::handle_command_action(action, state, view),
    }
}

/// An operator key means three different things depending on the mode:
/// start pending from Normal, complete a doubled linewise operation inside
/// OperatorPending, or apply immediately to the visual selection.
fn handle_operator_key(
    op: OperatorKind,
    state: &mut tacit_state::EditorState,
    view: &mut tacit_model::View,
) -> DispatchResult {
    match state.mode {
        Mode::Normal => {
            state.pending = Some(PendingOperator {
                op,
                start: view.cursor,
            });
            state.mode = Mode::OperatorPending;
            tracing::trace!(target: "actions.dispatch", op = ?op, "operator_pending");
            DispatchResult::dirty()
        }
        Mode::OperatorPending => {
            let pending = state.take_pending();
            state.mode = Mode::Normal;
            match pending {
                Some(p) if p.op == op => {
                    let target = crate::operator::doubled_target(p.start, view.cursor);
                    crate::operator::apply(op, target, state, &mut view.cursor)
                }
                _ => {
                    // Mismatched operator key: discard, no mutation.
                    tracing::trace!(target: "actions.dispatch", op = ?op, "operator_discarded");
                    DispatchResult::dirty()
                }
            }
        }
        Mode::Visual | Mode::VisualLine => {
            let span = state.selection_span(view.cursor);
            state.clear_visual();
            state.mode = Mode::Normal;
            match span {
                Some(span) => {
                    let target = crate::operator::selection_target(&state.doc, span);
                    let res = crate::operator::apply(op, target, state, &mut view.cursor);
                    if matches!(op, OperatorKind::Yank) {
                        // Yank leaves the cursor at the selection start.
                        view.cursor = span.start;
                        tacit_text::motion::clamp_position(
                            &state.doc,
                            &mut view.cursor,
                            MotionContext::Normal,
                        );
                    }
                    res
                }
                None => DispatchResult::clean(),
            }
        }
        _ => DispatchResult::clean(),
    }
}
