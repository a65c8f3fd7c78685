//! Drag-and-drop and toolbar ingestion of new elements.
//!
//! A template button starts a drag by writing a `type` entry (and `src` for
//! images) into the drag data transfer. When the drag is dropped on the canvas
//! the rendering surface translates the pointer into canvas coordinates and
//! the matching ADD action is built from [`ElementTemplates`].

use serde::{Deserialize, Serialize};

use crate::{Action, ElementKind, ImageDraft, LineDraft, StrokeColor, TextDraft};

/// Drag data key holding the element type.
pub const TYPE_KEY: &str = "type";
/// Drag data key holding an image source.
pub const SRC_KEY: &str = "src";

/// What a drop carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPayload {
    /// Element type, as written by the drag source.
    #[serde(rename = "type")]
    pub kind: String,
    /// Image source (empty when absent).
    #[serde(default)]
    pub src: String,
}

impl DropPayload {
    /// Read a payload from a drag data transfer.
    ///
    /// `get` looks up a key and returns `None` when it was never set.
    pub fn from_transfer(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            kind: get(TYPE_KEY).unwrap_or_default(),
            src: get(SRC_KEY).unwrap_or_default(),
        }
    }

    /// The element kind, if the type is recognised.
    #[must_use]
    pub fn element_kind(&self) -> Option<ElementKind> {
        ElementKind::parse(&self.kind)
    }
}

/// Rendering surface that maps client coordinates into canvas space.
pub trait CanvasSurface {
    /// Translate a client point, or `None` if no pointer position is known.
    fn to_canvas(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)>;
}

/// A stage positioned at `(left, top)` on the page and drawn at `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageSurface {
    /// Left edge of the stage's bounding rect.
    pub left: f64,
    /// Top edge of the stage's bounding rect.
    pub top: f64,
    /// Display scale of the stage.
    pub scale: f64,
}

impl StageSurface {
    /// A stage at the given offset with unit scale.
    #[must_use]
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            scale: 1.0,
        }
    }
}

impl CanvasSurface for StageSurface {
    fn to_canvas(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return None;
        }
        Some((
            (client_x - self.left) / self.scale,
            (client_y - self.top) / self.scale,
        ))
    }
}

/// A drop on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Pointer x in client coordinates.
    pub client_x: f64,
    /// Pointer y in client coordinates.
    pub client_y: f64,
    /// Drag data.
    pub payload: DropPayload,
}

/// Text box template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextTemplate {
    /// Font size.
    pub font_size: f64,
    /// Line height multiple.
    pub line_height: f64,
    /// Wrap width.
    pub width: f64,
    /// Placeholder content.
    pub text: String,
    /// Bold weight.
    pub is_bold: bool,
}

impl Default for TextTemplate {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            line_height: 1.4,
            width: 200.0,
            text: "Type something here".to_string(),
            is_bold: false,
        }
    }
}

/// Image template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTemplate {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Source used by the toolbar button.
    pub src: String,
}

impl Default for ImageTemplate {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            src: "https://konvajs.org/assets/lion.png".to_string(),
        }
    }
}

/// Line template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineTemplate {
    /// Length.
    pub width: f64,
    /// Stroke thickness.
    pub height: f64,
    /// Stroke color.
    pub stroke: StrokeColor,
}

impl Default for LineTemplate {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 3.0,
            stroke: StrokeColor::Black,
        }
    }
}

/// Default attributes for newly added elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementTemplates {
    /// Text box defaults.
    pub text: TextTemplate,
    /// Image defaults.
    pub image: ImageTemplate,
    /// Line defaults.
    pub line: LineTemplate,
    /// Where toolbar clicks place new elements.
    pub click_position: (f64, f64),
}

impl Default for ElementTemplates {
    fn default() -> Self {
        Self {
            text: TextTemplate::default(),
            image: ImageTemplate::default(),
            line: LineTemplate::default(),
            click_position: (100.0, 100.0),
        }
    }
}

impl ElementTemplates {
    /// ADD action for a kind at a canvas position.
    ///
    /// `src` is only used for images.
    #[must_use]
    pub fn draft_action(&self, kind: ElementKind, x: f64, y: f64, src: &str) -> Action {
        match kind {
            ElementKind::Text => Action::AddText(TextDraft {
                x,
                y,
                font_size: self.text.font_size,
                width: self.text.width,
                line_height: self.text.line_height,
                text: self.text.text.clone(),
                is_bold: self.text.is_bold,
            }),
            ElementKind::Image => Action::AddImage(ImageDraft {
                x,
                y,
                width: self.image.width,
                height: self.image.height,
                src: src.to_string(),
            }),
            ElementKind::Line => Action::AddLine(LineDraft {
                x,
                y,
                width: self.line.width,
                height: self.line.height,
                stroke: self.line.stroke,
            }),
        }
    }

    /// ADD action for a toolbar button click.
    #[must_use]
    pub fn click_action(&self, kind: ElementKind) -> Action {
        let (x, y) = self.click_position;
        self.draft_action(kind, x, y, &self.image.src)
    }
}

/// Turn a drop into an ADD action.
///
/// Returns `None` when the surface is not mounted yet, the pointer position
/// cannot be translated, or the payload type is unknown.
#[must_use]
pub fn ingest_drop(
    surface: Option<&dyn CanvasSurface>,
    event: &DropEvent,
    templates: &ElementTemplates,
) -> Option<Action> {
    let Some(surface) = surface else {
        tracing::debug!("dropping payload: canvas surface not mounted");
        return None;
    };
    let Some((x, y)) = surface.to_canvas(event.client_x, event.client_y) else {
        tracing::debug!("dropping payload: no pointer position");
        return None;
    };
    let Some(kind) = event.payload.element_kind() else {
        tracing::debug!(kind = %event.payload.kind, "dropping payload of unknown type");
        return None;
    };
    Some(templates.draft_action(kind, x, y, &event.payload.src))
}
