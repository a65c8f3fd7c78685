//! # Slide CLI
//!
//! Headless driver for the slide editor. Replays a script of user steps
//! against a page store, then prints the state and exports the page.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p slide-cli -- --script steps.json --print-state --png stage.png
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `Script` / `ScriptStep` - JSON gesture scripts
//! - `ScriptRunner` - Replays steps through the same handlers the browser host uses

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod script;

pub use script::{RunSummary, Script, ScriptError, ScriptRunner, ScriptStep, Target};

use std::path::PathBuf;

use clap::Parser;
use slide_core::{EditorConfig, SlideResult};
use slide_renderer::ExportConfig;

/// Command-line arguments for slide-cli.
#[derive(Debug, Clone, Parser)]
#[command(name = "slide-cli")]
#[command(about = "Replay slide editor scripts and export the page")]
#[command(version)]
pub struct CliArgs {
    /// Script of editor steps (JSON)
    #[arg(long, env = "SLIDE_SCRIPT")]
    pub script: PathBuf,

    /// Editor configuration (JSON); defaults apply when omitted
    #[arg(long, env = "SLIDE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the final page as PNG
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Write the final page as SVG
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Print the final state as indented JSON
    #[arg(long)]
    pub print_state: bool,

    /// Pixel ratio of exported images
    #[arg(long, default_value = "1.0")]
    pub pixel_ratio: f32,
}

impl CliArgs {
    /// Load the editor configuration named on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or is invalid.
    pub fn editor_config(&self) -> SlideResult<EditorConfig> {
        match &self.config {
            Some(path) => EditorConfig::load(path),
            None => Ok(EditorConfig::default()),
        }
    }

    /// Export settings for the given editor configuration.
    #[must_use]
    pub fn export_config(&self, config: &EditorConfig) -> ExportConfig {
        ExportConfig {
            stage: config.stage,
            scale: self.pixel_ratio,
            ..ExportConfig::default()
        }
    }
}
