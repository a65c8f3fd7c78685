//! Interaction mode state machine.
//!
//! The page has one mode, shared by whichever element is selected. For every
//! rendered element the mode and the selection together pick one of three
//! view variants; everything that is not the selection renders as a preview.
//!
//! ```text
//!                click / tap               dbl-click (text)
//!   none ───────────────────▶ transforming ───────────────▶ editing
//!    ▲                            │   ▲                        │
//!    │  background click,         │   └── click ───────────────┤
//!    └──── Enter / Escape, ◀──────┴────────────────────────────┘
//!          add, remove
//! ```
//!
//! Gesture handlers here are pure: they map a gesture on an element to the
//! action the host should dispatch.

use serde::{Deserialize, Serialize};

use crate::{
    Action, Element, ElementKind, ElementRef, ImagePatch, LinePatch, Mode, PageState, TextPatch,
};

/// Which variant of an element the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewVariant {
    /// Plain draggable element.
    Preview,
    /// Element with resize handles and a delete handle.
    Transformer,
    /// Inline text editor.
    Editor,
}

/// Pick the variant for one element.
#[must_use]
pub fn view_variant(state: &PageState, target: &ElementRef) -> ViewVariant {
    if !state.is_selected(target) {
        return ViewVariant::Preview;
    }
    match state.mode {
        Mode::Transforming => ViewVariant::Transformer,
        Mode::Editing if target.kind.supports_editing() => ViewVariant::Editor,
        Mode::Editing | Mode::Preview | Mode::None => ViewVariant::Preview,
    }
}

/// One entry of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    /// The element with its current values.
    pub element: Element,
    /// The variant to draw.
    pub variant: ViewVariant,
}

/// Every element with its variant, in paint order.
#[must_use]
pub fn render_plan(state: &PageState) -> Vec<RenderItem> {
    state
        .elements()
        .map(|element| {
            let variant = view_variant(state, &element.to_ref());
            RenderItem { element, variant }
        })
        .collect()
}

/// Pointer gestures the canvas reports on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Mouse click.
    Click,
    /// Touch tap.
    Tap,
    /// Mouse double click.
    DoubleClick,
    /// Touch double tap.
    DoubleTap,
}

impl Gesture {
    /// Whether this is a double click or double tap.
    #[must_use]
    pub fn is_double(self) -> bool {
        matches!(self, Self::DoubleClick | Self::DoubleTap)
    }
}

/// Map a gesture on an element to an action.
///
/// A single click or tap attaches the transformer; a double click or tap
/// opens the editor on text. Elements without an editor treat a double
/// gesture like a single one.
#[must_use]
pub fn on_element_gesture(element: &Element, gesture: Gesture) -> Action {
    if gesture.is_double() && element.kind().supports_editing() {
        Action::start_editing(element)
    } else {
        Action::start_transforming(element)
    }
}

/// A click that landed on the canvas background releases the selection.
#[must_use]
pub fn on_background_click() -> Action {
    Action::ReleaseSelected
}

/// Commit the position of a dragged element.
#[must_use]
pub fn on_drag_end(element: &Element, x: f64, y: f64) -> Action {
    let id = element.id().clone();
    match element.kind() {
        ElementKind::Text => Action::update_text(
            id,
            TextPatch {
                x: Some(x),
                y: Some(y),
                ..TextPatch::default()
            },
        ),
        ElementKind::Image => Action::update_image(
            id,
            ImagePatch {
                x: Some(x),
                y: Some(y),
                ..ImagePatch::default()
            },
        ),
        ElementKind::Line => Action::update_line(
            id,
            LinePatch {
                x: Some(x),
                y: Some(y),
                ..LinePatch::default()
            },
        ),
    }
}

/// The delete handle on the transformer removes the element.
#[must_use]
pub fn on_delete_handle(target: &ElementRef) -> Action {
    Action::remove(target)
}

/// Keys the inline text editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKey {
    /// Enter, with or without Shift held.
    Enter {
        /// Shift modifier.
        shift: bool,
    },
    /// Escape.
    Escape,
    /// Any other key.
    Other,
}

/// Map a key press in the inline editor to an action.
///
/// Enter without Shift and Escape both finish editing, keeping whatever text
/// has been typed. Shift+Enter inserts a newline through the normal input
/// path.
#[must_use]
pub fn on_editor_key(key: EditorKey) -> Option<Action> {
    match key {
        EditorKey::Enter { shift: false } | EditorKey::Escape => Some(Action::ReleaseSelected),
        EditorKey::Enter { shift: true } | EditorKey::Other => None,
    }
}

/// Map a content change in the inline editor to an action.
///
/// Only the text box currently being edited accepts input.
#[must_use]
pub fn on_editor_input(state: &PageState, text: &str) -> Option<Action> {
    if state.mode != Mode::Editing {
        return None;
    }
    match state.selected_element()? {
        Element::Text(element) => Some(Action::update_text(
            element.id,
            TextPatch {
                text: Some(text.to_string()),
                ..TextPatch::default()
            },
        )),
        Element::Image(_) | Element::Line(_) => None,
    }
}
