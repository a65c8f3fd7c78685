//! Gesture scripts.
//!
//! A script is a JSON document listing what a user did in the editor, one
//! step per gesture, key press or panel operation. Steps are replayed
//! against a [`PageStore`] through the same handlers the browser host uses.

use std::path::Path;

use serde::{Deserialize, Serialize};
use slide_core::{
    ingest_drop, on_background_click, on_delete_handle, on_drag_end, on_editor_input,
    on_editor_key, on_element_gesture, sync_resize, Action, CanvasSurface, DropEvent,
    DropPayload, EditorConfig, EditorKey, Element, ElementKind, Gesture, NumericField,
    PageStore, StageSurface, StepDirection, StyleEditor, TransformEnd,
};
use thiserror::Error;

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON or has an unknown step.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A step names an element that does not exist.
    #[error("step {step}: no {kind} at index {index}")]
    MissingElement {
        /// Zero-based step number.
        step: usize,
        /// Requested kind.
        kind: ElementKind,
        /// Requested index within the kind.
        index: usize,
    },
}

/// An element addressed by kind and position in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Element kind.
    pub kind: ElementKind,
    /// Index within that kind, in insertion order.
    #[serde(default)]
    pub index: usize,
}

/// One user step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Toolbar button click.
    Add {
        /// Element kind to add.
        kind: ElementKind,
    },
    /// Drop from a template button, in client coordinates.
    Drop {
        /// Drag data type.
        #[serde(rename = "type")]
        kind: String,
        /// Image source.
        #[serde(default)]
        src: String,
        /// Pointer x.
        client_x: f64,
        /// Pointer y.
        client_y: f64,
    },
    /// Click, tap, double click or double tap on an element.
    Gesture {
        /// Element hit.
        target: Target,
        /// Gesture performed.
        gesture: Gesture,
    },
    /// Click on the canvas background.
    ClickBackground,
    /// Drag an element to a new position.
    Drag {
        /// Element dragged.
        target: Target,
        /// New x.
        x: f64,
        /// New y.
        y: f64,
    },
    /// Resize the selected element by dragging a handle.
    Resize {
        /// Horizontal scale at the end of the drag.
        scale_x: f64,
        /// Vertical scale at the end of the drag.
        #[serde(default = "unit_scale")]
        scale_y: f64,
        /// Node x after the drag (defaults to the current x).
        #[serde(default)]
        x: Option<f64>,
        /// Node y after the drag (defaults to the current y).
        #[serde(default)]
        y: Option<f64>,
    },
    /// Style editor stepper.
    Step {
        /// Field stepped.
        field: NumericField,
        /// Button pressed.
        direction: StepDirection,
    },
    /// Style editor direct entry.
    Enter {
        /// Field typed into.
        field: NumericField,
        /// Raw text typed.
        value: String,
    },
    /// Style editor bold toggle.
    ToggleBold,
    /// Content change in the inline text editor.
    Type {
        /// Full new content.
        text: String,
    },
    /// Key press in the inline text editor.
    Key {
        /// Key pressed.
        key: EditorKey,
    },
    /// Delete handle on the transformer.
    Delete {
        /// Element deleted.
        target: Target,
    },
    /// Raw action dispatch.
    Dispatch {
        /// Action to dispatch.
        action: Action,
    },
}

fn unit_scale() -> f64 {
    1.0
}

/// A full script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Where the stage sits on the page. `null` replays drops as if the
    /// canvas were not mounted yet.
    #[serde(default = "default_surface")]
    pub surface: Option<StageSurface>,
    /// Steps in order.
    pub steps: Vec<ScriptStep>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_surface() -> Option<StageSurface> {
    Some(StageSurface::at(0.0, 0.0))
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps replayed.
    pub steps: usize,
    /// Steps that dispatched an action.
    pub dispatched: usize,
    /// Store revision after the replay.
    pub revision: u64,
}

/// Replays scripts against a page store.
#[derive(Debug)]
pub struct ScriptRunner {
    store: PageStore,
    config: EditorConfig,
}

impl ScriptRunner {
    /// Create a runner with an empty page.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::with_store(PageStore::new(), config)
    }

    /// Create a runner around an existing store.
    #[must_use]
    pub fn with_store(store: PageStore, config: EditorConfig) -> Self {
        Self { store, config }
    }

    /// The store being driven.
    #[must_use]
    pub fn store(&self) -> &PageStore {
        &self.store
    }

    /// The editor configuration in use.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replay every step of a script.
    ///
    /// Steps that the editor ignores (a drop of an unknown type, a stepper
    /// with nothing selected) are not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if a step targets an element that does not exist.
    pub fn run(&mut self, script: &Script) -> Result<RunSummary, ScriptError> {
        let surface = script.surface.as_ref().map(|s| s as &dyn CanvasSurface);
        let mut dispatched = 0;
        for (index, step) in script.steps.iter().enumerate() {
            let applied = self.apply(index, step, surface)?;
            tracing::debug!(step = index, ?step, applied, "replayed step");
            if applied {
                dispatched += 1;
            }
        }
        let summary = RunSummary {
            steps: script.steps.len(),
            dispatched,
            revision: self.store.revision(),
        };
        tracing::info!(
            steps = summary.steps,
            dispatched = summary.dispatched,
            revision = summary.revision,
            "script finished"
        );
        Ok(summary)
    }

    fn apply(
        &mut self,
        index: usize,
        step: &ScriptStep,
        surface: Option<&dyn CanvasSurface>,
    ) -> Result<bool, ScriptError> {
        let action = match step {
            ScriptStep::Add { kind } => Some(self.config.templates.click_action(*kind)),
            ScriptStep::Drop {
                kind,
                src,
                client_x,
                client_y,
            } => {
                let event = DropEvent {
                    client_x: *client_x,
                    client_y: *client_y,
                    payload: DropPayload {
                        kind: kind.clone(),
                        src: src.clone(),
                    },
                };
                ingest_drop(surface, &event, &self.config.templates)
            }
            ScriptStep::Gesture { target, gesture } => {
                let element = self.resolve(index, *target)?;
                Some(on_element_gesture(&element, *gesture))
            }
            ScriptStep::ClickBackground => Some(on_background_click()),
            ScriptStep::Drag { target, x, y } => {
                let element = self.resolve(index, *target)?;
                Some(on_drag_end(&element, *x, *y))
            }
            ScriptStep::Resize {
                scale_x,
                scale_y,
                x,
                y,
            } => self.resize(*scale_x, *scale_y, *x, *y),
            ScriptStep::Step { field, direction } => {
                let mut editor = StyleEditor::new(&mut self.store, &self.config.editor);
                return Ok(editor.step(*field, *direction));
            }
            ScriptStep::Enter { field, value } => {
                let mut editor = StyleEditor::new(&mut self.store, &self.config.editor);
                return Ok(editor.enter(*field, value));
            }
            ScriptStep::ToggleBold => {
                let mut editor = StyleEditor::new(&mut self.store, &self.config.editor);
                return Ok(editor.toggle_bold());
            }
            ScriptStep::Type { text } => on_editor_input(self.store.state(), text),
            ScriptStep::Key { key } => on_editor_key(*key),
            ScriptStep::Delete { target } => {
                let element = self.resolve(index, *target)?;
                Some(on_delete_handle(&element.to_ref()))
            }
            ScriptStep::Dispatch { action } => Some(action.clone()),
        };

        Ok(match action {
            Some(action) => {
                self.store.dispatch(action);
                true
            }
            None => false,
        })
    }

    /// Simulate a handle drag on the selected element.
    fn resize(
        &self,
        scale_x: f64,
        scale_y: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Option<Action> {
        let element = self.store.selected_element()?;
        let (cur_x, cur_y) = element.position();
        let height = match &element {
            Element::Text(text) => {
                slide_renderer::wrap(
                    &text.text,
                    text.width,
                    text.font_size,
                    text.line_height,
                    text.is_bold,
                )
                .height()
            }
            Element::Image(image) => image.height,
            Element::Line(line) => line.height,
        };

        // The live box is clamped while dragging, so the committed scale is too.
        let transformer = self.config.transformer(element.kind());
        let live_width = element.width() * scale_x;
        let clamped = transformer.bound_box(
            slide_core::BoundBox {
                x: cur_x,
                y: cur_y,
                width: element.width(),
                height,
                rotation: 0.0,
            },
            slide_core::BoundBox {
                x: x.unwrap_or(cur_x),
                y: y.unwrap_or(cur_y),
                width: live_width,
                height: height * scale_y,
                rotation: 0.0,
            },
        );
        let scale_x = if element.width() > 0.0 {
            clamped.width / element.width()
        } else {
            scale_x
        };

        let end = TransformEnd {
            x: clamped.x,
            y: clamped.y,
            width: element.width(),
            height,
            scale_x,
            scale_y,
        };
        sync_resize(&element.to_ref(), &end).map(|sync| sync.action)
    }

    fn resolve(&self, step: usize, target: Target) -> Result<Element, ScriptError> {
        self.store
            .state()
            .elements()
            .filter(|e| e.kind() == target.kind)
            .nth(target.index)
            .ok_or(ScriptError::MissingElement {
                step,
                kind: target.kind,
                index: target.index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_core::Mode;

    fn run(json: &str) -> ScriptRunner {
        let script = Script::from_json_str(json).expect("valid script");
        let mut runner = ScriptRunner::new(EditorConfig::default());
        runner.run(&script).expect("replay");
        runner
    }

    #[test]
    fn add_select_edit_and_finish() {
        let runner = run(
            r#"{"steps": [
                {"op": "add", "kind": "text"},
                {"op": "gesture", "target": {"kind": "text"}, "gesture": "double_click"},
                {"op": "type", "text": "Quarterly results"},
                {"op": "key", "key": {"enter": {"shift": false}}}
            ]}"#,
        );
        let state = runner.store().state();
        assert_eq!(state.texts[0].text, "Quarterly results");
        assert_eq!(state.mode, Mode::None);
    }

    #[test]
    fn resize_commits_absolute_width() {
        let runner = run(
            r#"{"steps": [
                {"op": "add", "kind": "text"},
                {"op": "gesture", "target": {"kind": "text", "index": 0}, "gesture": "click"},
                {"op": "resize", "scale_x": 1.5}
            ]}"#,
        );
        assert!((runner.store().state().texts[0].width - 300.0).abs() < 1e-9);
    }

    #[test]
    fn resize_is_clamped_to_stage_width() {
        let runner = run(
            r#"{"steps": [
                {"op": "add", "kind": "line"},
                {"op": "gesture", "target": {"kind": "line"}, "gesture": "tap"},
                {"op": "resize", "scale_x": 10}
            ]}"#,
        );
        assert!((runner.store().state().lines[0].width - 600.0).abs() < 1e-9);
    }

    #[test]
    fn panel_steps_and_bold() {
        let runner = run(
            r#"{"steps": [
                {"op": "add", "kind": "text"},
                {"op": "gesture", "target": {"kind": "text"}, "gesture": "click"},
                {"op": "step", "field": "font_size", "direction": "up"},
                {"op": "enter", "field": "x", "value": "-40"},
                {"op": "toggle_bold"}
            ]}"#,
        );
        let text = &runner.store().state().texts[0];
        assert!((text.font_size - 21.0).abs() < f64::EPSILON);
        assert!(text.x.abs() < f64::EPSILON);
        assert!(text.is_bold);
    }

    #[test]
    fn drops_use_surface_offset() {
        let runner = run(
            r#"{"surface": {"left": 10, "top": 20, "scale": 1},
                "steps": [{"op": "drop", "type": "image", "src": "cat.png", "client_x": 110, "client_y": 220}]}"#,
        );
        let image = &runner.store().state().images[0];
        assert!((image.x - 100.0).abs() < f64::EPSILON);
        assert!((image.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn drops_without_surface_are_discarded() {
        let script = Script::from_json_str(
            r#"{"surface": null,
                "steps": [{"op": "drop", "type": "line", "client_x": 0, "client_y": 0}]}"#,
        )
        .expect("valid script");
        let mut runner = ScriptRunner::new(EditorConfig::default());
        let summary = runner.run(&script).expect("replay");
        assert_eq!(summary.dispatched, 0);
        assert!(runner.store().state().is_empty());
    }

    #[test]
    fn missing_target_is_an_error() {
        let script = Script::from_json_str(
            r#"{"steps": [{"op": "gesture", "target": {"kind": "image", "index": 2}, "gesture": "click"}]}"#,
        )
        .expect("valid script");
        let mut runner = ScriptRunner::new(EditorConfig::default());
        let err = runner.run(&script).expect_err("no image");
        assert!(matches!(
            err,
            ScriptError::MissingElement {
                step: 0,
                kind: ElementKind::Image,
                index: 2
            }
        ));
    }

    #[test]
    fn raw_actions_and_delete() {
        let runner = run(
            r#"{"steps": [
                {"op": "dispatch", "action": {"type": "ADD_LINE", "payload": {"x": 0, "y": 0, "width": 100, "height": 2}}},
                {"op": "add", "kind": "image"},
                {"op": "delete", "target": {"kind": "line"}}
            ]}"#,
        );
        let state = runner.store().state();
        assert!(state.lines.is_empty());
        assert_eq!(state.images.len(), 1);
    }

    #[test]
    fn unknown_op_fails_to_parse() {
        assert!(matches!(
            Script::from_json_str(r#"{"steps": [{"op": "explode"}]}"#),
            Err(ScriptError::Parse(_))
        ));
    }
}
