//! Editor configuration.
//!
//! Every section is optional in the JSON form; missing fields fall back to
//! the defaults the editor ships with.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editor::EditorSettings;
use crate::ingest::ElementTemplates;
use crate::transform::TransformerConfig;
use crate::{ElementKind, SlideError, SlideResult};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for StageSize {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 1000.0,
        }
    }
}

/// Complete editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas size.
    pub stage: StageSize,
    /// Smallest width a resize drag may shrink an element to.
    pub min_transform_width: f64,
    /// Style editor ranges.
    pub editor: EditorSettings,
    /// New element defaults.
    pub templates: ElementTemplates,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stage: StageSize::default(),
            min_transform_width: 30.0,
            editor: EditorSettings::default(),
            templates: ElementTemplates::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are
    /// inconsistent.
    pub fn from_json_str(json: &str) -> SlideResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or fails to parse or
    /// validate.
    pub fn load(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Check that sizes are positive and every range is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> SlideResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.stage.width) || !positive(self.stage.height) {
            return Err(SlideError::InvalidConfig(format!(
                "stage size must be positive, got {}x{}",
                self.stage.width, self.stage.height
            )));
        }
        if !positive(self.min_transform_width) || self.min_transform_width > self.stage.width {
            return Err(SlideError::InvalidConfig(format!(
                "min_transform_width must be in (0, {}], got {}",
                self.stage.width, self.min_transform_width
            )));
        }
        for (field, range) in self.editor.ranges() {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(SlideError::InvalidConfig(format!(
                    "{field:?} range [{}, {}] is empty",
                    range.min, range.max
                )));
            }
            if !positive(range.step) {
                return Err(SlideError::InvalidConfig(format!(
                    "{field:?} step must be positive, got {}",
                    range.step
                )));
            }
        }
        Ok(())
    }

    /// Transformer handles for an element kind on this stage.
    #[must_use]
    pub fn transformer(&self, kind: ElementKind) -> TransformerConfig {
        TransformerConfig::for_kind(kind, self.stage.width, self.min_transform_width)
    }
}
