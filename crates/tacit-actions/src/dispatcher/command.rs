//! Command-line editing & execution (:q, :q!, :w, :wq, :e).
//!
//! Errors never escape as values: a failed command writes an inline notice
//! into the command buffer and Command mode stays active to display it (the
//! preserve path — re-entering without reseeding the buffer). Successful
//! commands return to the mode that was active before the command line was
//! opened, unless they quit or replace the buffer.

use super::DispatchResult;
use super::command_parser::{CommandParser, ParsedCommand};
use crate::Action;
use crate::io_ops::{OpenFileResult, WriteFileResult, open_file, write_file};
use tacit_model::View;
use tacit_state::{EditorState, Mode};
use tacit_text::Position;

pub(crate) fn handle_command_action(
    action: Action,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    match action {
        Action::CommandStart => {
            if !matches!(state.mode, Mode::Normal) {
                return DispatchResult::clean();
            }
            state.command_return = state.mode;
            state.command_line.begin();
            state.mode = Mode::Command;
            DispatchResult::dirty()
        }
        Action::CommandChar(ch) => {
            if !matches!(state.mode, Mode::Command) {
                return DispatchResult::clean();
            }
            state.command_line.insert_char(ch);
            DispatchResult::dirty()
        }
        Action::CommandBackspace => {
            if !matches!(state.mode, Mode::Command) {
                return DispatchResult::clean();
            }
            state.command_line.backspace();
            DispatchResult::dirty()
        }
        Action::CommandCursorLeft => {
            if !matches!(state.mode, Mode::Command) {
                return DispatchResult::clean();
            }
            state.command_line.cursor_left();
            DispatchResult::dirty()
        }
        Action::CommandCursorRight => {
            if !matches!(state.mode, Mode::Command) {
                return DispatchResult::clean();
            }
            state.command_line.cursor_right();
            DispatchResult::dirty()
        }
        Action::CommandExecute => {
            if !matches!(state.mode, Mode::Command) {
                return DispatchResult::clean();
            }
            execute_command(state, view)
        }
        _ => unreachable!("non-command action routed to command handler"),
    }
}

fn execute_command(state: &mut EditorState, view: &mut View) -> DispatchResult {
    let parsed = CommandParser::parse(state.command_line.body());
    tracing::info!(target: "runtime.command", cmd = ?parsed, "execute");
    match parsed {
        ParsedCommand::Quit { force } => {
            if state.doc.dirty() && !force {
                notice(state, "No write since last change (add ! to override)")
            } else {
                leave_command(state);
                DispatchResult::quit()
            }
        }
        ParsedCommand::Write { path } => match write_file(state, path.as_deref()) {
            WriteFileResult::Success => {
                leave_command(state);
                DispatchResult::dirty()
            }
            WriteFileResult::NoFilename => notice(state, "No file name"),
            WriteFileResult::Error => notice(state, "Write failed"),
        },
        ParsedCommand::WriteQuit { path } => match write_file(state, path.as_deref()) {
            WriteFileResult::Success => {
                leave_command(state);
                DispatchResult::quit()
            }
            WriteFileResult::NoFilename => notice(state, "No file name"),
            WriteFileResult::Error => notice(state, "Write failed"),
        },
        ParsedCommand::Edit { path: None } => notice(state, "No file name"),
        ParsedCommand::Edit { path: Some(path) } => match open_file(&path) {
            OpenFileResult::Success(s) => {
                state.doc = s.doc;
                state.file_name = Some(s.file_name);
                state.original_line_ending = s.original_line_ending;
                state.had_trailing_newline = s.had_trailing_newline;
                view.cursor = Position::origin();
                view.viewport_first_line = 0;
                if s.mixed_line_endings {
                    tracing::warn!(target: "io", "mixed_line_endings_detected");
                }
                leave_command(state);
                DispatchResult::buffer_replaced()
            }
            OpenFileResult::Error => {
                notice(state, format!("Can't open file {}", path.display()))
            }
        },
        ParsedCommand::Unknown(cmd) => {
            tracing::error!(target: "runtime.command", %cmd, "unknown_command");
            notice(state, format!("Not an editor command: {cmd}"))
        }
    }
}

/// Surface an inline error: the buffer becomes the notice and Command mode
/// stays active (preserve) so the message is displayed for correction.
fn notice(state: &mut EditorState, msg: impl Into<String>) -> DispatchResult {
    state.command_line.show_notice(msg);
    state.mode = Mode::Command;
    DispatchResult::dirty()
}

fn leave_command(state: &mut EditorState) {
    state.command_line.clear();
    state.mode = state.command_return;
}
