//! Actions accepted by the page store.

use serde::{Deserialize, Serialize};

use crate::{
    CreationId, Element, ElementRef, ImageDraft, ImagePatch, LineDraft, LinePatch, SlideError,
    SlideResult, TextDraft, TextPatch,
};

/// Target of a REMOVE action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveTarget {
    /// Creation id of the element to remove.
    pub id: CreationId,
}

/// UPDATE payload: the id to match plus the fields to merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update<P> {
    /// Creation id of the element to update.
    pub id: CreationId,
    /// Fields to merge.
    #[serde(flatten)]
    pub patch: P,
}

/// Every state transition the page store understands.
///
/// Serialized as `{"type": "SET_SELECTED", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Reset to the empty page.
    Init,
    /// Select an element in preview mode.
    SetSelected(ElementRef),
    /// Clear the selection.
    ReleaseSelected,
    /// Select an element and open its inline editor.
    StartEditing(ElementRef),
    /// Select an element and attach resize handles.
    StartTransforming(ElementRef),
    /// Append a text box.
    AddText(TextDraft),
    /// Append an image.
    AddImage(ImageDraft),
    /// Append a line.
    AddLine(LineDraft),
    /// Remove a text box.
    RemoveText(RemoveTarget),
    /// Remove an image.
    RemoveImage(RemoveTarget),
    /// Remove a line.
    RemoveLine(RemoveTarget),
    /// Merge fields into a text box.
    UpdateSelectedText(Update<TextPatch>),
    /// Merge fields into an image.
    UpdateSelectedImage(Update<ImagePatch>),
    /// Merge fields into a line.
    UpdateSelectedLine(Update<LinePatch>),
}

impl Action {
    /// `SET_SELECTED` for the given element.
    #[must_use]
    pub fn select(element: &Element) -> Self {
        Self::SetSelected(element.to_ref())
    }

    /// `START_EDITING` for the given element.
    #[must_use]
    pub fn start_editing(element: &Element) -> Self {
        Self::StartEditing(element.to_ref())
    }

    /// `START_TRANSFORMING` for the given element.
    #[must_use]
    pub fn start_transforming(element: &Element) -> Self {
        Self::StartTransforming(element.to_ref())
    }

    /// The matching `REMOVE_*` action for a reference.
    #[must_use]
    pub fn remove(target: &ElementRef) -> Self {
        let payload = RemoveTarget {
            id: target.id.clone(),
        };
        match target.kind {
            crate::ElementKind::Text => Self::RemoveText(payload),
            crate::ElementKind::Image => Self::RemoveImage(payload),
            crate::ElementKind::Line => Self::RemoveLine(payload),
        }
    }

    /// `UPDATE_SELECTED_TEXT`.
    #[must_use]
    pub fn update_text(id: CreationId, patch: TextPatch) -> Self {
        Self::UpdateSelectedText(Update { id, patch })
    }

    /// `UPDATE_SELECTED_IMAGE`.
    #[must_use]
    pub fn update_image(id: CreationId, patch: ImagePatch) -> Self {
        Self::UpdateSelectedImage(Update { id, patch })
    }

    /// `UPDATE_SELECTED_LINE`.
    #[must_use]
    pub fn update_line(id: CreationId, patch: LinePatch) -> Self {
        Self::UpdateSelectedLine(Update { id, patch })
    }

    /// Upper-case action name, as used on the wire and in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::SetSelected(_) => "SET_SELECTED",
            Self::ReleaseSelected => "RELEASE_SELECTED",
            Self::StartEditing(_) => "START_EDITING",
            Self::StartTransforming(_) => "START_TRANSFORMING",
            Self::AddText(_) => "ADD_TEXT",
            Self::AddImage(_) => "ADD_IMAGE",
            Self::AddLine(_) => "ADD_LINE",
            Self::RemoveText(_) => "REMOVE_TEXT",
            Self::RemoveImage(_) => "REMOVE_IMAGE",
            Self::RemoveLine(_) => "REMOVE_LINE",
            Self::UpdateSelectedText(_) => "UPDATE_SELECTED_TEXT",
            Self::UpdateSelectedImage(_) => "UPDATE_SELECTED_IMAGE",
            Self::UpdateSelectedLine(_) => "UPDATE_SELECTED_LINE",
        }
    }

    /// Decode an action from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::InvalidAction`] if the JSON is not a known action.
    pub fn from_json(json: &str) -> SlideResult<Self> {
        serde_json::from_str(json).map_err(|e| SlideError::InvalidAction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    #[test]
    fn action_uses_screaming_snake_case_tag() {
        let action = Action::ReleaseSelected;
        let json = serde_json::to_value(&action).expect("serialize");
        assert_eq!(json["type"], "RELEASE_SELECTED");
        assert_eq!(action.name(), "RELEASE_SELECTED");
    }

    #[test]
    fn update_payload_is_flat() {
        let action = Action::update_text(
            CreationId::new("2024-01-01 00:00:00.000"),
            TextPatch {
                font_size: Some(25.0),
                ..TextPatch::default()
            },
        );
        let json = serde_json::to_value(&action).expect("serialize");
        assert_eq!(json["type"], "UPDATE_SELECTED_TEXT");
        assert_eq!(json["payload"]["id"], "2024-01-01 00:00:00.000");
        assert_eq!(json["payload"]["font_size"], 25.0);
        assert!(json["payload"].get("width").is_none());
    }

    #[test]
    fn from_json_parses_add_text() {
        let action = Action::from_json(
            r#"{"type":"ADD_TEXT","payload":{"x":100,"y":100,"font_size":20,"width":200,"text":"hello","is_bold":false}}"#,
        )
        .expect("parse");
        match action {
            Action::AddText(draft) => {
                assert_eq!(draft.text, "hello");
                assert!((draft.line_height - 1.4).abs() < f64::EPSILON);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_unknown_type() {
        let result = Action::from_json(r#"{"type":"ADD_VIDEO","payload":{}}"#);
        assert!(matches!(result, Err(SlideError::InvalidAction(_))));
    }

    #[test]
    fn remove_picks_collection_by_kind() {
        let target = ElementRef::new(ElementKind::Line, CreationId::new("a"));
        assert_eq!(Action::remove(&target).name(), "REMOVE_LINE");
    }
}
