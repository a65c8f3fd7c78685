//! # Slide Canvas Core
//!
//! Editor logic for slide-like canvases built from text boxes, images and
//! horizontal lines. Compiles to WASM so the same state machine drives the
//! browser editor and headless tooling.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               slide-core.wasm               │
//! ├─────────────────────────────────────────────┤
//! │  Page Store      │  Interaction             │
//! │  - Elements      │  - Selection + mode      │
//! │  - Actions       │  - Gestures, keys        │
//! │  - Reducer       │  - View variants         │
//! ├─────────────────────────────────────────────┤
//! │  Transform Sync  │  Style Editor / Ingest   │
//! │  - Resize handles│  - Clamped numeric input │
//! │  - Scale folding │  - Drop + templates      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod id;
pub mod ingest;
pub mod interaction;
pub mod state;
pub mod store;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{Action, RemoveTarget, Update};
pub use config::{EditorConfig, StageSize};
pub use editor::{EditorSettings, FieldRange, NumericField, StepDirection, StyleEditor};
pub use element::{
    Element, ElementKind, ElementRef, ImageDraft, ImageElement, ImagePatch, LineDraft,
    LineElement, LinePatch, StrokeColor, TextDraft, TextElement, TextPatch,
};
pub use error::{SlideError, SlideResult};
pub use id::{Clock, CreationId, FixedClock, IdGenerator, SystemClock, CREATION_ID_FORMAT};
pub use ingest::{
    ingest_drop, CanvasSurface, DropEvent, DropPayload, ElementTemplates, StageSurface,
};
pub use interaction::{
    on_background_click, on_delete_handle, on_drag_end, on_editor_input, on_editor_key,
    on_element_gesture, render_plan, view_variant, EditorKey, Gesture, RenderItem, ViewVariant,
};
pub use state::{reduce, Mode, PageState};
pub use store::PageStore;
pub use transform::{
    sync_resize, Anchor, BoundBox, NodeScale, ResizeSync, TransformEnd, TransformerConfig,
};

/// Slide core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
