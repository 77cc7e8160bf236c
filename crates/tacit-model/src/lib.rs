//! Editor model: the view layer over the session state.
//!
//! A `View` owns presentation-side position state — the cursor and the first
//! visible line — keeping it out of `EditorState` so document-editing
//! semantics stay decoupled from viewport and focus concerns. The engine
//! itself renders nothing; the embedding renderer reports its line capacity
//! and the view answers scroll-into-view questions with a pure intent
//! computation.
//!
//! Invariants after every public call:
//! * the view collection is never empty and the active index is in range;
//! * the active view's cursor line is a valid document line index except
//!   transiently inside mutation helpers before re-clamp;
//! * auto-scroll never underflows and clamps to the valid first-line range.

use tacit_state::EditorState;
use tacit_text::Position;

/// Stable identifier for a `View`. Currently wraps the slot index; a
/// generational scheme can replace it if view closure ever lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub usize);

#[derive(Debug, Clone)]
pub struct View {
    pub id: ViewId,
    pub cursor: Position,
    pub viewport_first_line: usize,
}

impl View {
    pub fn new(id: ViewId, cursor: Position, viewport_first_line: usize) -> Self {
        Self {
            id,
            cursor,
            viewport_first_line,
        }
    }

    /// Auto-scroll this view so the cursor stays within the vertical
    /// viewport. `text_height` is the renderer's line capacity (excluding
    /// any status row); zero is a no-op. Returns true if the first visible
    /// line changed. Records the height for later scroll decisions.
    pub fn auto_scroll(&mut self, state: &mut EditorState, text_height: usize) -> bool {
        if text_height == 0 {
            return false;
        }
        debug_assert!(
            self.cursor.line < state.doc.line_count(),
            "cursor line within document"
        );
        state.last_text_height = text_height;
        let maybe_new = compute_scroll_intent(
            self.viewport_first_line,
            self.cursor.line,
            text_height,
            state.config_vertical_margin,
        );
        if let Some(new_first) = maybe_new {
            self.viewport_first_line = new_first;
            true
        } else {
            false
        }
    }
}

/// Owner of the view collection. Single-view today; the indirection keeps
/// every call site stable if splits ever arrive.
#[derive(Debug)]
pub struct ViewManager {
    views: Vec<View>,
    active: usize,
}

impl ViewManager {
    pub fn new_single(initial: View) -> Self {
        Self {
            views: vec![initial],
            active: 0,
        }
    }
    pub fn active_view(&self) -> &View {
        debug_assert!(self.active < self.views.len(), "active index in range");
        &self.views[self.active]
    }
    pub fn active_view_mut(&mut self) -> &mut View {
        debug_assert!(self.active < self.views.len(), "active index in range");
        &mut self.views[self.active]
    }
    pub fn views(&self) -> &[View] {
        &self.views
    }
}

/// Session state plus its views: the unit the dispatcher operates on.
pub struct EditorModel {
    state: EditorState,
    view_mgr: ViewManager,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        let v = View::new(ViewId(0), Position::origin(), 0);
        Self {
            state,
            view_mgr: ViewManager::new_single(v),
        }
    }

    /// Construct with an already prepared view (cursor/viewport seeded).
    pub fn with_view(view: View, state: EditorState) -> Self {
        Self {
            state,
            view_mgr: ViewManager::new_single(view),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn active_view(&self) -> &View {
        self.view_mgr.active_view()
    }
    pub fn active_view_mut(&mut self) -> &mut View {
        self.view_mgr.active_view_mut()
    }
    pub fn views(&self) -> &[View] {
        self.view_mgr.views()
    }

    /// Obtain mutable references to the session state and the active view in
    /// one call. `state` and the view vector are distinct non-overlapping
    /// fields, so handing out disjoint `&mut`s is sound; Rust cannot express
    /// the split directly, so the raw-pointer dance is encapsulated here.
    pub fn split_state_and_active_view(&mut self) -> (&mut EditorState, &mut View) {
        debug_assert!(
            self.view_mgr.active < self.view_mgr.views.len(),
            "active index in range"
        );
        // SAFETY: no other &mut to state or the active view is alive while
        // the returned borrows exist; both point into distinct fields of
        // self and carry the lifetime of &mut self.
        let state_ptr: *mut EditorState = &mut self.state;
        let view_ptr = unsafe {
            self.view_mgr
                .views
                .as_mut_ptr()
                .add(self.view_mgr.active)
        };
        unsafe { (&mut *state_ptr, &mut *view_ptr) }
    }
}

/// Compute the new first visible line needed to keep the cursor inside the
/// viewport, subject to a top/bottom margin (conservatively clamped to at
/// most half the height). Returns `None` when no scroll is needed.
pub fn compute_scroll_intent(
    first: usize,
    cursor_line: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min(text_height / 2);
    let top = first;
    let bottom = first + text_height;
    if cursor_line < top + m {
        let new_first = cursor_line.saturating_sub(m);
        if new_first != first {
            return Some(new_first);
        }
    } else if cursor_line + m >= bottom {
        let new_first = cursor_line + m + 1 - text_height;
        if new_first != first {
            return Some(new_first);
        }
    }
    None
}
