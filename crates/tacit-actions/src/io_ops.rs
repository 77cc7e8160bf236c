//! File IO for command execution.
//!
//! The engine outside this module never touches the filesystem; `:e` and
//! `:w` funnel through these helpers, which also own line-ending
//! normalization on the way in and re-expansion on the way out. Results are
//! plain enums — the command layer converts them into inline notices.

use std::path::{Path, PathBuf};

use tacit_state::{EditorState, LineEnding, normalize_line_endings};
use tacit_text::Document;

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Success(OpenSuccess),
    Error,
}

#[derive(Debug)]
pub struct OpenSuccess {
    pub doc: Document,
    pub file_name: PathBuf,
    pub original_line_ending: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed_line_endings: bool,
}

/// Open a path into a fresh `Document`, normalizing line endings to the
/// LF-only internal form and recording the original style for save.
pub fn open_file(path: &Path) -> OpenFileResult {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let norm = normalize_line_endings(&content);
            match Document::from_str(&norm.normalized) {
                Ok(doc) => OpenFileResult::Success(OpenSuccess {
                    doc,
                    file_name: path.to_path_buf(),
                    original_line_ending: norm.original,
                    had_trailing_newline: norm.had_trailing_newline,
                    mixed_line_endings: norm.mixed,
                }),
                Err(e) => {
                    tracing::error!(target: "io", ?e, "document_create_failed");
                    OpenFileResult::Error
                }
            }
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "file_open_error");
            OpenFileResult::Error
        }
    }
}

/// Result of a write attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Success,
    NoFilename,
    Error,
}

/// Serialize the document to `target` (or the session's known file name),
/// re-expanding the original line-ending style and restoring the original
/// trailing-newline presence. Clears the dirty flag on success and adopts
/// an explicit target as the new file name.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> WriteFileResult {
    let path = if let Some(p) = target {
        p.to_path_buf()
    } else if let Some(existing) = state.file_name.clone() {
        existing
    } else {
        return WriteFileResult::NoFilename;
    };
    let line_ending = state.original_line_ending.as_str();
    let last = state.doc.line_count();
    let mut content = String::new();
    for i in 0..last {
        if let Some(l) = state.doc.line(i) {
            content.push_str(l);
            if i + 1 < last || (state.had_trailing_newline && i + 1 == last) {
                content.push_str(line_ending);
            }
        }
    }
    match std::fs::write(&path, content.as_bytes()) {
        Ok(_) => {
            state.doc.mark_clean();
            state.file_name = Some(path);
            WriteFileResult::Success
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "file_write_error");
            WriteFileResult::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacit_text::Document;

    #[test]
    fn open_file_normalizes_and_sets_metadata() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "line1\r\nline2\nline3\r\n").unwrap();
        }
        match open_file(&path) {
            OpenFileResult::Success(s) => {
                assert_eq!(s.doc.line(0), Some("line1"));
                assert_eq!(s.doc.line_count(), 3);
                assert!(s.mixed_line_endings, "should detect mixed endings");
                assert!(s.had_trailing_newline);
                assert_eq!(s.original_line_ending, LineEnding::Crlf);
            }
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn open_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_file(&dir.path().join("nope.txt")),
            OpenFileResult::Error
        ));
    }

    #[test]
    fn write_file_preserves_original_style() {
        let mut state = EditorState::new(Document::from_str("a\nb").unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        state.file_name = Some(path.clone());
        state.original_line_ending = LineEnding::Crlf;
        state.had_trailing_newline = true;
        state.doc.insert_char(0, 1, 'x');
        assert!(state.doc.dirty());
        let res = write_file(&mut state, None);
        assert!(matches!(res, WriteFileResult::Success));
        assert!(!state.doc.dirty(), "dirty cleared after write");
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "ax\r\nb\r\n");
    }

    #[test]
    fn write_file_adopts_explicit_target_as_file_name() {
        let mut state = EditorState::new(Document::from_str("x").unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.txt");
        let res = write_file(&mut state, Some(&path));
        assert!(matches!(res, WriteFileResult::Success));
        assert_eq!(state.file_name.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn write_file_no_filename() {
        let mut state = EditorState::new(Document::from_str("x").unwrap());
        state.doc.insert_char(0, 0, 'y');
        let res = write_file(&mut state, None);
        assert!(matches!(res, WriteFileResult::NoFilename));
        assert!(state.doc.dirty(), "dirty unchanged when no filename");
    }
}
