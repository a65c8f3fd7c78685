//! Page state and the transition function over it.

use serde::{Deserialize, Serialize};

use crate::action::{RemoveTarget, Update};
use crate::{
    Action, CreationId, Element, ElementKind, ElementRef, IdGenerator, ImageElement,
    LineElement, SlideResult, TextElement,
};

/// Page-wide interaction phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Nothing selected.
    #[default]
    None,
    /// An element is selected but not being manipulated.
    Preview,
    /// The selected text box has its inline editor open.
    Editing,
    /// The selected element has resize handles attached.
    Transforming,
}

/// The complete page state.
///
/// Collections are kept in insertion order, which is also paint order
/// (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    /// Weak reference to the selected element.
    pub selected: Option<ElementRef>,
    /// Interaction mode of the selection.
    pub mode: Mode,
    /// Text boxes.
    pub texts: Vec<TextElement>,
    /// Images.
    pub images: Vec<ImageElement>,
    /// Lines.
    pub lines: Vec<LineElement>,
}

impl PageState {
    /// An empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an element by reference.
    #[must_use]
    pub fn get(&self, target: &ElementRef) -> Option<Element> {
        match target.kind {
            ElementKind::Text => self
                .texts
                .iter()
                .find(|e| e.id == target.id)
                .cloned()
                .map(Element::Text),
            ElementKind::Image => self
                .images
                .iter()
                .find(|e| e.id == target.id)
                .cloned()
                .map(Element::Image),
            ElementKind::Line => self
                .lines
                .iter()
                .find(|e| e.id == target.id)
                .cloned()
                .map(Element::Line),
        }
    }

    /// Whether an element with this reference exists.
    #[must_use]
    pub fn contains(&self, target: &ElementRef) -> bool {
        match target.kind {
            ElementKind::Text => self.texts.iter().any(|e| e.id == target.id),
            ElementKind::Image => self.images.iter().any(|e| e.id == target.id),
            ElementKind::Line => self.lines.iter().any(|e| e.id == target.id),
        }
    }

    /// The selected element with its current values.
    #[must_use]
    pub fn selected_element(&self) -> Option<Element> {
        self.selected.as_ref().and_then(|target| self.get(target))
    }

    /// Whether the given element is the selected one.
    #[must_use]
    pub fn is_selected(&self, target: &ElementRef) -> bool {
        self.selected.as_ref() == Some(target)
    }

    /// All elements in paint order: texts, then images, then lines.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        let texts = self.texts.iter().cloned().map(Element::Text);
        let images = self.images.iter().cloned().map(Element::Image);
        let lines = self.lines.iter().cloned().map(Element::Line);
        texts.chain(images).chain(lines)
    }

    /// Total number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.texts.len() + self.images.len() + self.lines.len()
    }

    /// Whether the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Every creation id on the page.
    pub fn ids(&self) -> impl Iterator<Item = &CreationId> + '_ {
        let texts = self.texts.iter().map(|e| &e.id);
        let images = self.images.iter().map(|e| &e.id);
        let lines = self.lines.iter().map(|e| &e.id);
        texts.chain(images).chain(lines)
    }

    /// Human-readable JSON view of the state, indented by four spaces.
    ///
    /// This is a diagnostic view, not a persistence format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> SlideResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn select(&self, target: ElementRef, mode: Mode) -> Self {
        if !self.contains(&target) {
            tracing::debug!(
                kind = %target.kind,
                id = %target.id,
                "ignoring selection of unknown element"
            );
            return self.clone();
        }
        Self {
            selected: Some(target),
            mode,
            ..self.clone()
        }
    }

    fn released(&self) -> Self {
        Self {
            selected: None,
            mode: Mode::None,
            ..self.clone()
        }
    }
}

/// Compute the state that follows `state` after `action`.
///
/// Every action is total: unknown ids and stale targets leave the
/// collections untouched. `ids` is only consulted by ADD actions.
#[must_use]
pub fn reduce(state: &PageState, action: Action, ids: &mut IdGenerator) -> PageState {
    match action {
        Action::Init => PageState::new(),
        Action::SetSelected(target) => state.select(target, Mode::Preview),
        Action::ReleaseSelected => state.released(),
        Action::StartEditing(target) => state.select(target, Mode::Editing),
        Action::StartTransforming(target) => state.select(target, Mode::Transforming),
        Action::AddText(draft) => {
            let mut next = state.released();
            let element = draft.into_element(ids.next_id());
            tracing::info!(id = %element.id, "added text");
            next.texts.push(element);
            next
        }
        Action::AddImage(draft) => {
            let mut next = state.released();
            let element = draft.into_element(ids.next_id());
            tracing::info!(id = %element.id, "added image");
            next.images.push(element);
            next
        }
        Action::AddLine(draft) => {
            let mut next = state.released();
            let element = draft.into_element(ids.next_id());
            tracing::info!(id = %element.id, "added line");
            next.lines.push(element);
            next
        }
        Action::RemoveText(RemoveTarget { id }) => {
            let mut next = state.released();
            remove_by_id(&mut next.texts, &id, |e| &e.id, ElementKind::Text);
            next
        }
        Action::RemoveImage(RemoveTarget { id }) => {
            let mut next = state.released();
            remove_by_id(&mut next.images, &id, |e| &e.id, ElementKind::Image);
            next
        }
        Action::RemoveLine(RemoveTarget { id }) => {
            let mut next = state.released();
            remove_by_id(&mut next.lines, &id, |e| &e.id, ElementKind::Line);
            next
        }
        Action::UpdateSelectedText(Update { id, patch }) => {
            let mut next = state.clone();
            match next.texts.iter_mut().find(|e| e.id == id) {
                Some(element) => patch.apply_to(element),
                None => log_stale_update(ElementKind::Text, &id),
            }
            next
        }
        Action::UpdateSelectedImage(Update { id, patch }) => {
            let mut next = state.clone();
            match next.images.iter_mut().find(|e| e.id == id) {
                Some(element) => patch.apply_to(element),
                None => log_stale_update(ElementKind::Image, &id),
            }
            next
        }
        Action::UpdateSelectedLine(Update { id, patch }) => {
            let mut next = state.clone();
            match next.lines.iter_mut().find(|e| e.id == id) {
                Some(element) => patch.apply_to(element),
                None => log_stale_update(ElementKind::Line, &id),
            }
            next
        }
    }
}

fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: &CreationId,
    id_of: impl Fn(&T) -> &CreationId,
    kind: ElementKind,
) {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    if items.len() == before {
        tracing::debug!(%kind, %id, "remove target not found");
    } else {
        tracing::info!(%kind, %id, "removed element");
    }
}

fn log_stale_update(kind: ElementKind, id: &CreationId) {
    tracing::debug!(%kind, %id, "ignoring update for unknown element");
}
