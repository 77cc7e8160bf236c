//! Editor session state: mode machine data, register, command line, and the
//! shared context object every dispatch operates on.
//!
//! `EditorState` is deliberately a plain context struct passed by reference
//! into the dispatcher — never a global — so the engine stays embeddable and
//! testable without process-wide singletons. It owns the document plus all
//! mode-transient state (pending operator, visual anchor, command buffer);
//! the cursor itself lives in the view layer (`tacit-model`) so presentation
//! concerns stay out of this crate.
//!
//! Transient-state invariant: the pending operator is only meaningful in
//! OperatorPending, the anchor only in the visual modes, the command buffer
//! only in Command. The dispatcher clears whichever of these stops applying
//! on every transition; the helpers here (`take_pending`, `clear_visual`)
//! keep those sites one-liners.

use std::path::PathBuf;

use tacit_text::{Document, Position};

/// Current editor mode. Exactly one is active at a time; OperatorPending is
/// layered on top of Normal conceptually but modeled as its own state so the
/// doubled-operator-key recognition is an explicit machine, not string
/// matching over accumulated keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    /// Characterwise visual selection.
    Visual,
    /// Linewise visual selection.
    VisualLine,
    /// Operator captured, awaiting a motion or the doubled operator key.
    OperatorPending,
    /// Command-line entry (`:` commands).
    Command,
}

/// The three operators the engine composes with motions or selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Delete,
    Change,
    Yank,
}

/// Transient OperatorPending payload: which operator, and the cursor
/// position captured when it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperator {
    pub op: OperatorKind,
    pub start: Position,
}

/// Unit of an operation or of register content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Charwise,
    Linewise,
}

/// A normalized span between two positions (start <= end in document order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub start: Position,
    pub end: Position,
    pub kind: SpanKind,
}

impl SelectionSpan {
    /// Construct a span, swapping endpoints so that `start <= end`.
    pub fn new(a: Position, b: Position, kind: SpanKind) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self { start, end, kind }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Single-slot register: last yanked/deleted text plus its classification.
/// Last write wins; every successful yank, delete or change overwrites it.
#[derive(Debug, Clone, Default)]
pub struct Register {
    text: String,
    kind: Option<SpanKind>,
}

impl Register {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
    }

    /// Overwrite the slot. Empty charwise payloads are ignored; only an
    /// operation that actually captured text counts as a write.
    pub fn record(&mut self, text: impl Into<String>, kind: SpanKind) {
        let text = text.into();
        if text.is_empty() && matches!(kind, SpanKind::Charwise) {
            return;
        }
        tracing::trace!(target: "state.register", kind = ?kind, len = text.len(), "record");
        self.text = text;
        self.kind = Some(kind);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> Option<SpanKind> {
        self.kind
    }
}

/// Command-line buffer with its own edit cursor.
///
/// The buffer always starts with the `:` prefix while a command is being
/// composed; editing operations can never remove or cross the prefix. When a
/// command fails, the buffer is replaced by a notice (the inline error
/// surface) and the notice flag set; the next editing keystroke discards the
/// notice and starts a fresh command.
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
    cursor: usize, // char index into buf
    notice: bool,
}

pub const COMMAND_PREFIX: char = ':';

impl CommandLineState {
    /// Begin a new command: buffer seeded with the prefix, cursor just past it.
    pub fn begin(&mut self) {
        self.buf.clear();
        self.buf.push(COMMAND_PREFIX);
        self.cursor = 1;
        self.notice = false;
    }

    /// Replace the buffer with an inline error/status message. Displayed by
    /// (re-)entering Command mode with the preserve flag.
    pub fn show_notice(&mut self, msg: impl Into<String>) {
        self.buf = msg.into();
        self.cursor = self.buf.chars().count();
        self.notice = true;
    }

    pub fn is_notice(&self) -> bool {
        self.notice
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.notice = false;
    }

    /// Raw buffer content including the prefix (or the notice text).
    pub fn buffer(&self) -> &str {
        &self.buf
    }

    /// The command body after the prefix.
    pub fn body(&self) -> &str {
        self.buf.strip_prefix(COMMAND_PREFIX).unwrap_or(&self.buf)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.notice {
            self.begin();
        }
        let byte = byte_of_char(&self.buf, self.cursor.max(1));
        self.buf.insert(byte, ch);
        self.cursor = self.cursor.max(1) + 1;
    }

    /// Backspace within the buffer; the prefix character is untouchable.
    pub fn backspace(&mut self) {
        if self.notice {
            self.begin();
            return;
        }
        if self.cursor > 1 {
            let start = byte_of_char(&self.buf, self.cursor - 1);
            let end = byte_of_char(&self.buf, self.cursor);
            self.buf.replace_range(start..end, "");
            self.cursor -= 1;
        }
    }

    pub fn cursor_left(&mut self) {
        if !self.notice && self.cursor > 1 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_right(&mut self) {
        let len = self.buf.chars().count();
        if !self.notice && self.cursor < len {
            self.cursor += 1;
        }
    }
}

fn byte_of_char(s: &str, idx: usize) -> usize {
    s.char_indices().nth(idx).map(|(b, _)| b).unwrap_or(s.len())
}

/// Line ending style detected from seeded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Result of normalizing line endings to the LF-only internal form.
pub struct NormalizedText {
    pub normalized: String,
    pub original: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed: bool,
}

/// Detect and normalize line endings of `input`. Counts CRLF, LF and lone CR
/// occurrences; the majority style wins (ties resolved CRLF > LF > CR).
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    crlf += 1;
                    i += 2;
                } else {
                    cr += 1;
                    i += 1;
                }
            }
            b'\n' => {
                lf += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    let had_trailing_newline =
        input.ends_with("\r\n") || input.ends_with('\n') || input.ends_with('\r');
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let non_zero = [crlf, lf, cr].iter().filter(|c| **c > 0).count();
    let mixed = non_zero > 1;
    if crlf == 0 && cr == 0 {
        return NormalizedText {
            normalized: input.to_string(),
            original,
            had_trailing_newline,
            mixed,
        };
    }
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    NormalizedText {
        normalized,
        original,
        had_trailing_newline,
        mixed,
    }
}

/// Top-level session context: the document plus every piece of shared
/// editing state the dispatcher and operator engine act on.
pub struct EditorState {
    pub doc: Document,
    pub mode: Mode,
    /// OperatorPending payload; `None` outside that mode.
    pub pending: Option<PendingOperator>,
    /// Visual-mode anchor; `None` outside the visual modes. The selection is
    /// always derived from anchor + cursor, never stored.
    pub anchor: Option<Position>,
    pub register: Register,
    pub command_line: CommandLineState,
    /// Mode to return to when the command line is left.
    pub command_return: Mode,
    pub file_name: Option<PathBuf>,
    pub original_line_ending: LineEnding,
    pub had_trailing_newline: bool,
    /// Viewport line capacity last reported by the renderer; consumed by
    /// scroll-into-view decisions.
    pub last_text_height: usize,
    /// Vertical scroll margin knob (rows kept visible around the cursor).
    pub config_vertical_margin: usize,
}

impl EditorState {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            mode: Mode::Normal,
            pending: None,
            anchor: None,
            register: Register::default(),
            command_line: CommandLineState::default(),
            command_return: Mode::Normal,
            file_name: None,
            original_line_ending: LineEnding::Lf,
            had_trailing_newline: true,
            last_text_height: 0,
            config_vertical_margin: 0,
        }
    }

    /// Consume the pending operator (leaving OperatorPending).
    pub fn take_pending(&mut self) -> Option<PendingOperator> {
        self.pending.take()
    }

    /// Drop the visual anchor (leaving Visual/VisualLine).
    pub fn clear_visual(&mut self) {
        self.anchor = None;
    }

    /// The derived visual selection between anchor and `cursor`, classified
    /// by the active visual mode. `None` outside visual modes.
    pub fn selection_span(&self, cursor: Position) -> Option<SelectionSpan> {
        let anchor = self.anchor?;
        let kind = match self.mode {
            Mode::Visual => SpanKind::Charwise,
            Mode::VisualLine => SpanKind::Linewise,
            _ => return None,
        };
        Some(SelectionSpan::new(anchor, cursor, kind))
    }

    /// Shift every tracked position after `count` lines were spliced in at
    /// `at`. Must run in the same dispatch step as the mutation.
    pub fn shift_for_inserted_lines(&mut self, at: usize, count: usize, cursor: &mut Position) {
        shift_insert(&mut cursor.line, at, count);
        if let Some(p) = self.pending.as_mut() {
            shift_insert(&mut p.start.line, at, count);
        }
        if let Some(a) = self.anchor.as_mut() {
            shift_insert(&mut a.line, at, count);
        }
    }

    /// Shift every tracked position after `count` lines were removed at
    /// `at`, clamping into the shrunken document.
    pub fn shift_for_removed_lines(&mut self, at: usize, count: usize, cursor: &mut Position) {
        let last = self.doc.line_count().saturating_sub(1);
        shift_remove(&mut cursor.line, at, count, last);
        if let Some(p) = self.pending.as_mut() {
            shift_remove(&mut p.start.line, at, count, last);
        }
        if let Some(a) = self.anchor.as_mut() {
            shift_remove(&mut a.line, at, count, last);
        }
    }
}

fn shift_insert(line: &mut usize, at: usize, count: usize) {
    if *line >= at {
        *line += count;
    }
}

fn shift_remove(line: &mut usize, at: usize, count: usize, last_valid: usize) {
    if *line >= at + count {
        *line -= count;
    } else if *line >= at {
        *line = at;
    }
    if *line > last_valid {
        *line = last_valid;
    }
}
