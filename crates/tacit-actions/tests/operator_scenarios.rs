//! Operator + motion scenarios driven through the public dispatch surface.

use tacit_actions::dispatcher::dispatch;
use tacit_actions::{Action, MotionKind, OperatorKind};
use tacit_model::EditorModel;
use tacit_state::{EditorState, Mode, SpanKind};
use tacit_text::{Document, Position};

fn model(text: &str) -> EditorModel {
    EditorModel::new(EditorState::new(Document::from_str(text).unwrap()))
}

fn op(model: &mut EditorModel, kind: OperatorKind) {
    dispatch(Action::Operator(kind), model);
}

fn motion(model: &mut EditorModel, kind: MotionKind) {
    dispatch(Action::Motion(kind), model);
}

#[test]
fn dw_deletes_word_plus_following_space() {
    let mut m = model("hello world");
    op(&mut m, OperatorKind::Delete);
    motion(&mut m, MotionKind::WordForward);
    assert_eq!(m.state().doc.line_count(), 1);
    assert_eq!(m.state().doc.line(0), Some("world"));
    assert_eq!(m.state().register.text(), "hello ");
    assert_eq!(m.state().register.kind(), Some(SpanKind::Charwise));
    assert_eq!(m.active_view().cursor, Position::origin());
    assert_eq!(m.state().mode, Mode::Normal);
}

#[test]
fn dd_removes_current_line_linewise() {
    let mut m = model("one\ntwo\nthree");
    m.active_view_mut().cursor = Position::new(1, 0);
    op(&mut m, OperatorKind::Delete);
    op(&mut m, OperatorKind::Delete);
    assert_eq!(m.state().doc.line_count(), 2);
    assert_eq!(m.state().doc.line(0), Some("one"));
    assert_eq!(m.state().doc.line(1), Some("three"));
    assert_eq!(m.active_view().cursor, Position::new(1, 0));
    assert_eq!(m.state().register.text(), "two");
    assert_eq!(m.state().register.kind(), Some(SpanKind::Linewise));
}

#[test]
fn dd_on_last_remaining_line_leaves_empty_document() {
    let mut m = model("solo");
    op(&mut m, OperatorKind::Delete);
    op(&mut m, OperatorKind::Delete);
    assert_eq!(m.state().doc.line_count(), 1);
    assert_eq!(m.state().doc.line(0), Some(""));
    assert_eq!(m.active_view().cursor, Position::origin());
    assert_eq!(m.state().register.text(), "solo");
}

#[test]
fn de_includes_word_end_character() {
    let mut m = model("hello world");
    op(&mut m, OperatorKind::Delete);
    motion(&mut m, MotionKind::WordEnd);
    assert_eq!(m.state().doc.line(0), Some(" world"));
    assert_eq!(m.state().register.text(), "hello");
}

#[test]
fn d_dollar_deletes_through_last_character() {
    let mut m = model("hello world");
    m.active_view_mut().cursor = Position::new(0, 5);
    op(&mut m, OperatorKind::Delete);
    motion(&mut m, MotionKind::LineEnd);
    assert_eq!(m.state().doc.line(0), Some("hello"));
    assert_eq!(m.state().register.text(), " world");
    // Cursor clamps back onto the last remaining character.
    assert_eq!(m.active_view().cursor, Position::new(0, 4));
}

#[test]
fn db_deletes_backward_leaving_cursor_word() {
    let mut m = model("alpha beta");
    m.active_view_mut().cursor = Position::new(0, 6);
    op(&mut m, OperatorKind::Delete);
    motion(&mut m, MotionKind::WordBackward);
    assert_eq!(m.state().doc.line(0), Some("beta"));
    assert_eq!(m.state().register.text(), "alpha ");
    assert_eq!(m.active_view().cursor, Position::origin());
}

#[test]
fn dj_removes_two_lines_linewise() {
    let mut m = model("one\ntwo\nthree");
    op(&mut m, OperatorKind::Delete);
    motion(&mut m, MotionKind::Down);
    assert_eq!(m.state().doc.line_count(), 1);
    assert_eq!(m.state().doc.line(0), Some("three"));
    assert_eq!(m.state().register.text(), "one\ntwo");
    assert_eq!(m.state().register.kind(), Some(SpanKind::Linewise));
}

#[test]
fn yy_yanks_without_mutation() {
    let mut m = model("keep\nme");
    op(&mut m, OperatorKind::Yank);
    op(&mut m, OperatorKind::Yank);
    assert_eq!(m.state().doc.line_count(), 2);
    assert_eq!(m.state().doc.line(0), Some("keep"));
    assert!(!m.state().doc.dirty());
    assert_eq!(m.state().register.text(), "keep");
    assert_eq!(m.state().register.kind(), Some(SpanKind::Linewise));
    assert_eq!(m.active_view().cursor, Position::origin());
}

#[test]
fn yank_is_idempotent_over_repetition() {
    let mut m = model("alpha beta");
    for _ in 0..3 {
        op(&mut m, OperatorKind::Yank);
        motion(&mut m, MotionKind::WordForward);
        assert_eq!(m.state().doc.line(0), Some("alpha beta"));
        assert_eq!(m.state().register.text(), "alpha ");
        assert_eq!(m.active_view().cursor, Position::origin());
        assert!(!m.state().doc.dirty());
    }
}

#[test]
fn cc_changes_line_into_insert_with_blank() {
    let mut m = model("one\ntwo\nthree");
    m.active_view_mut().cursor = Position::new(1, 1);
    op(&mut m, OperatorKind::Change);
    op(&mut m, OperatorKind::Change);
    assert_eq!(m.state().doc.line_count(), 3);
    assert_eq!(m.state().doc.line(1), Some(""));
    assert_eq!(m.state().mode, Mode::Insert);
    assert_eq!(m.active_view().cursor, Position::new(1, 0));
    assert_eq!(m.state().register.text(), "two");
    assert_eq!(m.state().register.kind(), Some(SpanKind::Linewise));
}

#[test]
fn cw_changes_word_charwise_without_blank_splice() {
    let mut m = model("hello world");
    op(&mut m, OperatorKind::Change);
    motion(&mut m, MotionKind::WordForward);
    assert_eq!(m.state().doc.line_count(), 1);
    assert_eq!(m.state().doc.line(0), Some("world"));
    assert_eq!(m.state().mode, Mode::Insert);
    assert_eq!(m.active_view().cursor, Position::origin());
    assert_eq!(m.state().register.text(), "hello ");
}

#[test]
fn operator_with_stationary_motion_is_a_noop() {
    let mut m = model("abc");
    // Left at column 0 cannot move; the operator must not fire.
    op(&mut m, OperatorKind::Delete);
    let res = dispatch(Action::Motion(MotionKind::Left), &mut m);
    assert!(!res.dirty);
    assert_eq!(m.state().doc.line(0), Some("abc"));
    assert!(m.state().register.is_empty());
    assert_eq!(m.state().mode, Mode::Normal);
}

#[test]
fn dj_on_last_line_is_a_noop() {
    let mut m = model("one\ntwo");
    m.active_view_mut().cursor = Position::new(1, 0);
    op(&mut m, OperatorKind::Delete);
    let res = dispatch(Action::Motion(MotionKind::Down), &mut m);
    assert!(!res.dirty);
    assert_eq!(m.state().doc.line_count(), 2);
    assert!(m.state().register.is_empty());
    assert_eq!(m.state().mode, Mode::Normal);
}

#[test]
fn multiline_charwise_delete_splices_outer_lines() {
    let mut m = model("alpha\nbeta\ngamma");
    m.active_view_mut().cursor = Position::new(0, 2);
    op(&mut m, OperatorKind::Delete);
    // w from (0,2) crosses to 'beta' on the next line.
    motion(&mut m, MotionKind::WordForward);
    assert_eq!(m.state().doc.line_count(), 2);
    assert_eq!(m.state().doc.line(0), Some("albeta"));
    assert_eq!(m.state().doc.line(1), Some("gamma"));
    assert_eq!(m.state().register.text(), "pha\n");
}

#[test]
fn register_overwritten_by_every_successful_operation() {
    let mut m = model("one two three");
    op(&mut m, OperatorKind::Yank);
    motion(&mut m, MotionKind::WordForward);
    assert_eq!(m.state().register.text(), "one ");
    op(&mut m, OperatorKind::Delete);
    motion(&mut m, MotionKind::WordForward);
    assert_eq!(m.state().register.text(), "one ");
    assert_eq!(m.state().doc.line(0), Some("two three"));
}
