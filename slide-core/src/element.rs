//! Slide elements - the building blocks of a page.
//!
//! Three element kinds exist: text boxes, images and horizontal rule lines.
//! Each kind comes in three shapes:
//!
//! - the element itself ([`TextElement`], ...), carrying its creation id,
//! - a draft without an id ([`TextDraft`], ...), the payload of an ADD action,
//! - a patch with every field optional ([`TextPatch`], ...), the payload of
//!   an UPDATE action.

use serde::{Deserialize, Serialize};

use crate::CreationId;

/// Discriminator for the element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A wrapping text box.
    Text,
    /// A bitmap image.
    Image,
    /// A horizontal rule line.
    Line,
}

impl ElementKind {
    /// All kinds, in paint order.
    pub const ALL: [Self; 3] = [Self::Text, Self::Image, Self::Line];

    /// Whether elements of this kind have an inline editor variant.
    #[must_use]
    pub fn supports_editing(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Parse the drag-and-drop type discriminator (`text`, `image`, `line`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "line" => Some(Self::Line),
            _ => None,
        }
    }

    /// Lowercase name, as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Line => "line",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weak reference to an element: its kind plus its creation id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Collection the element lives in.
    pub kind: ElementKind,
    /// Creation id of the element.
    pub id: CreationId,
}

impl ElementRef {
    /// Create a reference.
    #[must_use]
    pub fn new(kind: ElementKind, id: CreationId) -> Self {
        Self { kind, id }
    }
}

/// Stroke color of a line. Only black is offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
    /// Solid black.
    #[default]
    Black,
}

impl StrokeColor {
    /// CSS color name.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Black => "black",
        }
    }
}

/// A text box. Its height is never stored: it follows from wrapping `text`
/// at `width` with the given font size and line height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Creation id.
    pub id: CreationId,
    /// X position in canvas space.
    pub x: f64,
    /// Y position in canvas space.
    pub y: f64,
    /// Font size in pixels.
    pub font_size: f64,
    /// Wrap width in pixels.
    pub width: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    /// Text content.
    pub text: String,
    /// Bold font weight.
    pub is_bold: bool,
}

/// An image with an explicit box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Creation id.
    pub id: CreationId,
    /// X position in canvas space.
    pub x: f64,
    /// Y position in canvas space.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Image URL or data URL.
    pub src: String,
}

/// A horizontal rule line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    /// Creation id.
    pub id: CreationId,
    /// X position in canvas space.
    pub x: f64,
    /// Y position in canvas space.
    pub y: f64,
    /// Length in pixels.
    pub width: f64,
    /// Stroke thickness in pixels.
    pub height: f64,
    /// Stroke color.
    pub stroke: StrokeColor,
}

/// Any element on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    /// A text box.
    Text(TextElement),
    /// An image.
    Image(ImageElement),
    /// A line.
    Line(LineElement),
}

impl Element {
    /// The element's kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Image(_) => ElementKind::Image,
            Self::Line(_) => ElementKind::Line,
        }
    }

    /// The element's creation id.
    #[must_use]
    pub fn id(&self) -> &CreationId {
        match self {
            Self::Text(e) => &e.id,
            Self::Image(e) => &e.id,
            Self::Line(e) => &e.id,
        }
    }

    /// A weak reference to this element.
    #[must_use]
    pub fn to_ref(&self) -> ElementRef {
        ElementRef::new(self.kind(), self.id().clone())
    }

    /// Position in canvas space.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        match self {
            Self::Text(e) => (e.x, e.y),
            Self::Image(e) => (e.x, e.y),
            Self::Line(e) => (e.x, e.y),
        }
    }

    /// Stored width.
    #[must_use]
    pub fn width(&self) -> f64 {
        match self {
            Self::Text(e) => e.width,
            Self::Image(e) => e.width,
            Self::Line(e) => e.width,
        }
    }

    /// Stored height, if this kind stores one explicitly.
    #[must_use]
    pub fn stored_height(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Image(e) => Some(e.height),
            Self::Line(e) => Some(e.height),
        }
    }
}

/// ADD payload for a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDraft {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Font size in pixels.
    pub font_size: f64,
    /// Wrap width.
    pub width: f64,
    /// Line height multiple.
    #[serde(default = "TextDraft::default_line_height")]
    pub line_height: f64,
    /// Initial content.
    pub text: String,
    /// Bold font weight.
    #[serde(default)]
    pub is_bold: bool,
}

impl TextDraft {
    const fn default_line_height() -> f64 {
        1.4
    }

    /// Attach a creation id.
    #[must_use]
    pub fn into_element(self, id: CreationId) -> TextElement {
        TextElement {
            id,
            x: self.x,
            y: self.y,
            font_size: self.font_size,
            width: self.width,
            line_height: self.line_height,
            text: self.text,
            is_bold: self.is_bold,
        }
    }
}

/// ADD payload for an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDraft {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Image URL or data URL.
    pub src: String,
}

impl ImageDraft {
    /// Attach a creation id.
    #[must_use]
    pub fn into_element(self, id: CreationId) -> ImageElement {
        ImageElement {
            id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            src: self.src,
        }
    }
}

/// ADD payload for a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDraft {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Length.
    pub width: f64,
    /// Stroke thickness.
    pub height: f64,
    /// Stroke color.
    #[serde(default)]
    pub stroke: StrokeColor,
}

impl LineDraft {
    /// Attach a creation id.
    #[must_use]
    pub fn into_element(self, id: CreationId) -> LineElement {
        LineElement {
            id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            stroke: self.stroke,
        }
    }
}

/// UPDATE payload for a text box. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPatch {
    /// New x.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// New wrap width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New line height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// New content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
}

impl TextPatch {
    /// Merge into an element.
    pub fn apply_to(&self, element: &mut TextElement) {
        merge(&mut element.x, self.x);
        merge(&mut element.y, self.y);
        merge(&mut element.font_size, self.font_size);
        merge(&mut element.width, self.width);
        merge(&mut element.line_height, self.line_height);
        merge(&mut element.text, self.text.clone());
        merge(&mut element.is_bold, self.is_bold);
    }
}

/// UPDATE payload for an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePatch {
    /// New x.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ImagePatch {
    /// Merge into an element.
    pub fn apply_to(&self, element: &mut ImageElement) {
        merge(&mut element.x, self.x);
        merge(&mut element.y, self.y);
        merge(&mut element.width, self.width);
        merge(&mut element.height, self.height);
        merge(&mut element.src, self.src.clone());
    }
}

/// UPDATE payload for a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinePatch {
    /// New x.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New stroke thickness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeColor>,
}

impl LinePatch {
    /// Merge into an element.
    pub fn apply_to(&self, element: &mut LineElement) {
        merge(&mut element.x, self.x);
        merge(&mut element.y, self.y);
        merge(&mut element.width, self.width);
        merge(&mut element.height, self.height);
        merge(&mut element.stroke, self.stroke);
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
