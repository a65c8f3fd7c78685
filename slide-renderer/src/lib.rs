//! # Slide Canvas Renderer
//!
//! Export side of the slide editor. Turns a page snapshot into SVG, PNG or
//! JPEG for download, drawing every element the way it looks unselected.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   ┌──────────┐   ┌─────────────┐   ┌──────────────┐
//! │ PageState  │──▶│ SVG text │──▶│ usvg/resvg  │──▶│ PNG / JPEG / │
//! │ (snapshot) │   │ + layout │   │ tiny-skia   │   │ data URL     │
//! └────────────┘   └──────────┘   └─────────────┘   └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod layout;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SlideExporter};
pub use layout::{wrap, TextLayout};
