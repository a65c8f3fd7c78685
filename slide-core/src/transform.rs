//! Resize handles and transform sync.
//!
//! While a resize handle is dragged the rendering engine scales the node
//! freely. When the drag ends it reports a [`TransformEnd`]: the node's
//! unscaled size plus the scale factors it accumulated. [`sync_resize`] folds
//! those factors into absolute dimensions and tells the host to put the
//! node's scale back to identity, so the stored model never carries a scale
//! and wrapped text re-flows at the new width on the next render.

use serde::{Deserialize, Serialize};

use crate::{Action, ElementKind, ElementRef, ImagePatch, LinePatch, TextPatch};

/// Resize handle positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Top edge center.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Left edge center.
    MiddleLeft,
    /// Right edge center.
    MiddleRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge center.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Whether dragging this handle can change the height.
    #[must_use]
    pub fn resizes_height(self) -> bool {
        !matches!(self, Self::MiddleLeft | Self::MiddleRight)
    }
}

const HORIZONTAL_ANCHORS: &[Anchor] = &[Anchor::MiddleLeft, Anchor::MiddleRight];
const IMAGE_ANCHORS: &[Anchor] = &[
    Anchor::MiddleLeft,
    Anchor::MiddleRight,
    Anchor::BottomRight,
];

/// Live box reported while a handle is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in radians (always zero while rotation is disabled).
    #[serde(default)]
    pub rotation: f64,
}

/// Handle configuration of the transformer attached to a selected element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformerConfig {
    /// Handles the user may drag.
    pub enabled_anchors: &'static [Anchor],
    /// Rotation handle shown.
    pub rotate_enabled: bool,
    /// Dragging past the opposite edge mirrors the node.
    pub flip_enabled: bool,
    /// Smallest width the live box may shrink to.
    pub min_width: f64,
    /// Largest width the live box may grow to.
    pub max_width: f64,
}

impl TransformerConfig {
    /// Configuration for an element kind on a stage of the given width.
    ///
    /// Text and lines only resize horizontally; images also get a corner
    /// handle that scales width and height independently.
    #[must_use]
    pub fn for_kind(kind: ElementKind, stage_width: f64, min_width: f64) -> Self {
        let enabled_anchors = match kind {
            ElementKind::Text | ElementKind::Line => HORIZONTAL_ANCHORS,
            ElementKind::Image => IMAGE_ANCHORS,
        };
        Self {
            enabled_anchors,
            rotate_enabled: false,
            flip_enabled: false,
            min_width,
            max_width: stage_width.max(min_width),
        }
    }

    /// Whether a handle is available.
    #[must_use]
    pub fn allows(&self, anchor: Anchor) -> bool {
        self.enabled_anchors.contains(&anchor)
    }

    /// Clamp the live drag box.
    ///
    /// Only the width is bounded; this is a visual clamp applied during the
    /// drag and independent of the style editor's ranges.
    #[must_use]
    pub fn bound_box(&self, _old: BoundBox, new: BoundBox) -> BoundBox {
        BoundBox {
            width: new.width.clamp(self.min_width, self.max_width),
            ..new
        }
    }
}

/// What the rendering engine reports when a transform ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformEnd {
    /// Node x after the transform.
    pub x: f64,
    /// Node y after the transform.
    pub y: f64,
    /// Unscaled node width.
    pub width: f64,
    /// Unscaled node height.
    pub height: f64,
    /// Accumulated horizontal scale.
    pub scale_x: f64,
    /// Accumulated vertical scale.
    pub scale_y: f64,
}

/// Scale to write back onto the rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeScale {
    /// Horizontal scale.
    pub x: f64,
    /// Vertical scale.
    pub y: f64,
}

impl NodeScale {
    /// Unit scale.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };
}

/// Outcome of a transform sync.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSync {
    /// Absolute width to store.
    pub new_width: f64,
    /// Absolute height to store (ignored for text).
    pub new_height: f64,
    /// UPDATE action carrying the absolute dimensions.
    pub action: Action,
    /// Scale the host must apply to the node before the next render.
    pub node_scale: NodeScale,
}

/// Fold a transform's scale into absolute dimensions.
///
/// Text stores only its width (height follows from wrapping); lines and
/// images store both width and height. A line's height is its stroke, which
/// the horizontal-only handles leave at scale 1. The reported position
/// is committed as well, since dragging a left handle moves the node.
///
/// Returns `None` if the reported scale is not a finite positive number,
/// which leaves the model untouched.
#[must_use]
pub fn sync_resize(target: &ElementRef, end: &TransformEnd) -> Option<ResizeSync> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(end.scale_x) || !valid(end.scale_y) {
        tracing::debug!(
            id = %target.id,
            scale_x = end.scale_x,
            scale_y = end.scale_y,
            "ignoring degenerate transform"
        );
        return None;
    }

    let new_width = end.width * end.scale_x;
    let new_height = end.height * end.scale_y;
    let id = target.id.clone();
    let action = match target.kind {
        ElementKind::Text => Action::update_text(
            id,
            TextPatch {
                x: Some(end.x),
                y: Some(end.y),
                width: Some(new_width),
                ..TextPatch::default()
            },
        ),
        ElementKind::Image => Action::update_image(
            id,
            ImagePatch {
                x: Some(end.x),
                y: Some(end.y),
                width: Some(new_width),
                height: Some(new_height),
                ..ImagePatch::default()
            },
        ),
        ElementKind::Line => Action::update_line(
            id,
            LinePatch {
                x: Some(end.x),
                y: Some(end.y),
                width: Some(new_width),
                height: Some(new_height),
                ..LinePatch::default()
            },
        ),
    };

    tracing::debug!(
        kind = %target.kind,
        id = %target.id,
        new_width,
        new_height,
        "synced transform"
    );

    Some(ResizeSync {
        new_width,
        new_height,
        action,
        node_scale: NodeScale::IDENTITY,
    })
}
