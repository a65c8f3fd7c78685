//! Style editor panel logic.
//!
//! The panel shows numeric controls for the selected element: a `-` / `+`
//! stepper and a direct-entry field per attribute. Each attribute has its own
//! [`FieldRange`]; every candidate value is clamped into it before an UPDATE
//! is dispatched against the selected element's id.

use serde::{Deserialize, Serialize};

use crate::{Action, Element, ElementKind, ImagePatch, LinePatch, PageStore, TextPatch};

/// Allowed range and stepper increment of one numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Stepper increment.
    pub step: f64,
}

impl FieldRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp a value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Add one step, then clamp.
    #[must_use]
    pub fn step_up(&self, value: f64) -> f64 {
        self.clamp(value + self.step)
    }

    /// Subtract one step, then clamp.
    #[must_use]
    pub fn step_down(&self, value: f64) -> f64 {
        self.clamp(value - self.step)
    }

    /// Round onto the step grid anchored at `min`, then clamp.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if self.step <= 0.0 {
            return self.clamp(value);
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(steps.mul_add(self.step, self.min))
    }

    /// Parse direct text entry. Empty or non-numeric input yields `None`.
    #[must_use]
    pub fn parse_entry(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Numeric attributes the panel can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Width (wrap width for text, length for lines).
    Width,
    /// Image height.
    Height,
    /// Text font size.
    FontSize,
    /// Text line height.
    LineHeight,
    /// Line stroke thickness (stored as the line's height).
    StrokeWidth,
}

const TEXT_FIELDS: &[NumericField] = &[
    NumericField::Width,
    NumericField::X,
    NumericField::Y,
    NumericField::FontSize,
    NumericField::LineHeight,
];
const IMAGE_FIELDS: &[NumericField] = &[
    NumericField::Width,
    NumericField::Height,
    NumericField::X,
    NumericField::Y,
];
const LINE_FIELDS: &[NumericField] = &[
    NumericField::Width,
    NumericField::StrokeWidth,
    NumericField::X,
    NumericField::Y,
];

impl NumericField {
    /// Fields the panel shows for an element kind, in display order.
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> &'static [Self] {
        match kind {
            ElementKind::Text => TEXT_FIELDS,
            ElementKind::Image => IMAGE_FIELDS,
            ElementKind::Line => LINE_FIELDS,
        }
    }

    /// Read this field from an element, if it has it.
    #[must_use]
    pub fn read(self, element: &Element) -> Option<f64> {
        match (self, element) {
            (Self::X, _) => Some(element.position().0),
            (Self::Y, _) => Some(element.position().1),
            (Self::Width, _) => Some(element.width()),
            (Self::Height, Element::Image(e)) => Some(e.height),
            (Self::FontSize, Element::Text(e)) => Some(e.font_size),
            (Self::LineHeight, Element::Text(e)) => Some(e.line_height),
            (Self::StrokeWidth, Element::Line(e)) => Some(e.height),
            _ => None,
        }
    }

    /// UPDATE action writing `value` into this field of `element`.
    #[must_use]
    pub fn update(self, element: &Element, value: f64) -> Option<Action> {
        let id = element.id().clone();
        match element {
            Element::Text(_) => {
                let mut patch = TextPatch::default();
                match self {
                    Self::X => patch.x = Some(value),
                    Self::Y => patch.y = Some(value),
                    Self::Width => patch.width = Some(value),
                    Self::FontSize => patch.font_size = Some(value),
                    Self::LineHeight => patch.line_height = Some(value),
                    Self::Height | Self::StrokeWidth => return None,
                }
                Some(Action::update_text(id, patch))
            }
            Element::Image(_) => {
                let mut patch = ImagePatch::default();
                match self {
                    Self::X => patch.x = Some(value),
                    Self::Y => patch.y = Some(value),
                    Self::Width => patch.width = Some(value),
                    Self::Height => patch.height = Some(value),
                    Self::FontSize | Self::LineHeight | Self::StrokeWidth => return None,
                }
                Some(Action::update_image(id, patch))
            }
            Element::Line(_) => {
                let mut patch = LinePatch::default();
                match self {
                    Self::X => patch.x = Some(value),
                    Self::Y => patch.y = Some(value),
                    Self::Width => patch.width = Some(value),
                    Self::StrokeWidth => patch.height = Some(value),
                    Self::Height | Self::FontSize | Self::LineHeight => return None,
                }
                Some(Action::update_line(id, patch))
            }
        }
    }
}

/// Per-field ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font size range.
    pub font_size: FieldRange,
    /// Line height range.
    pub line_height: FieldRange,
    /// Line stroke thickness range.
    pub stroke_width: FieldRange,
    /// Width range.
    pub width: FieldRange,
    /// Height range.
    pub height: FieldRange,
    /// X range.
    pub x: FieldRange,
    /// Y range.
    pub y: FieldRange,
    /// Snap direct entry onto the step grid as well as clamping it.
    pub snap_entry_to_step: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: FieldRange::new(4.0, 40.0, 1.0),
            line_height: FieldRange::new(0.5, 3.0, 0.1),
            stroke_width: FieldRange::new(1.0, 5.0, 0.1),
            width: FieldRange::new(10.0, 1000.0, 1.0),
            height: FieldRange::new(10.0, 1000.0, 1.0),
            x: FieldRange::new(0.0, 1000.0, 1.0),
            y: FieldRange::new(0.0, 1000.0, 1.0),
            snap_entry_to_step: false,
        }
    }
}

impl EditorSettings {
    /// The range configured for a field.
    #[must_use]
    pub fn range(&self, field: NumericField) -> FieldRange {
        match field {
            NumericField::X => self.x,
            NumericField::Y => self.y,
            NumericField::Width => self.width,
            NumericField::Height => self.height,
            NumericField::FontSize => self.font_size,
            NumericField::LineHeight => self.line_height,
            NumericField::StrokeWidth => self.stroke_width,
        }
    }

    /// Iterate over every field with its range.
    pub fn ranges(&self) -> impl Iterator<Item = (NumericField, FieldRange)> + '_ {
        [
            NumericField::X,
            NumericField::Y,
            NumericField::Width,
            NumericField::Height,
            NumericField::FontSize,
            NumericField::LineHeight,
            NumericField::StrokeWidth,
        ]
        .into_iter()
        .map(|field| (field, self.range(field)))
    }
}

/// Stepper direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    /// The `+` button.
    Up,
    /// The `-` button.
    Down,
}

/// Style editor panel bound to a page store.
#[derive(Debug)]
pub struct StyleEditor<'a> {
    store: &'a mut PageStore,
    settings: &'a EditorSettings,
}

impl<'a> StyleEditor<'a> {
    /// Bind the panel to a store.
    pub fn new(store: &'a mut PageStore, settings: &'a EditorSettings) -> Self {
        Self { store, settings }
    }

    /// Whether the panel is active (an element is selected).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.state().selected.is_some()
    }

    /// Fields shown for the current selection.
    #[must_use]
    pub fn fields(&self) -> &'static [NumericField] {
        match &self.store.state().selected {
            Some(target) => NumericField::for_kind(target.kind),
            None => &[],
        }
    }

    /// Current value of a field of the selected element.
    #[must_use]
    pub fn value(&self, field: NumericField) -> Option<f64> {
        field.read(&self.store.selected_element()?)
    }

    /// Press a stepper button. Returns whether an update was dispatched.
    pub fn step(&mut self, field: NumericField, direction: StepDirection) -> bool {
        let Some(element) = self.store.selected_element() else {
            return false;
        };
        let Some(current) = field.read(&element) else {
            return false;
        };
        let range = self.settings.range(field);
        let value = match direction {
            StepDirection::Up => range.step_up(current),
            StepDirection::Down => range.step_down(current),
        };
        self.commit(&element, field, value)
    }

    /// Type into a direct-entry field. Returns whether an update was
    /// dispatched; empty or non-numeric input is ignored.
    pub fn enter(&mut self, field: NumericField, raw: &str) -> bool {
        let Some(parsed) = FieldRange::parse_entry(raw) else {
            tracing::debug!(?field, raw, "ignoring non-numeric entry");
            return false;
        };
        let Some(element) = self.store.selected_element() else {
            return false;
        };
        let range = self.settings.range(field);
        let value = if self.settings.snap_entry_to_step {
            range.snap(parsed)
        } else {
            range.clamp(parsed)
        };
        self.commit(&element, field, value)
    }

    /// Toggle bold on the selected text box.
    pub fn toggle_bold(&mut self) -> bool {
        let Some(Element::Text(text)) = self.store.selected_element() else {
            return false;
        };
        self.store.dispatch(Action::update_text(
            text.id,
            TextPatch {
                is_bold: Some(!text.is_bold),
                ..TextPatch::default()
            },
        ));
        true
    }

    fn commit(&mut self, element: &Element, field: NumericField, value: f64) -> bool {
        match field.update(element, value) {
            Some(action) => {
                self.store.dispatch(action);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageDraft, LineDraft, StrokeColor, TextDraft};

    const WIDTH: FieldRange = FieldRange::new(10.0, 1000.0, 1.0);

    fn store_with_text() -> PageStore {
        let mut store = PageStore::new();
        store.dispatch(Action::AddText(TextDraft {
            x: 100.0,
            y: 100.0,
            font_size: 20.0,
            width: 200.0,
            line_height: 1.4,
            text: "hello".to_string(),
            is_bold: false,
        }));
        let element = store.state().elements().next().expect("text");
        store.dispatch(Action::select(&element));
        store
    }

    #[test]
    fn clamp_holds_floor_and_ceiling() {
        assert!((WIDTH.step_down(10.0) - 10.0).abs() < f64::EPSILON);
        assert!((WIDTH.step_up(1000.0) - 1000.0).abs() < f64::EPSILON);
        assert!((WIDTH.step_up(500.0) - 501.0).abs() < f64::EPSILON);
        assert!((WIDTH.clamp(-5.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn snap_rounds_onto_grid() {
        let range = FieldRange::new(0.5, 3.0, 0.1);
        assert!((range.snap(1.44) - 1.4).abs() < 1e-9);
        assert!((range.snap(9.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn parse_entry_rejects_empty_and_garbage() {
        assert_eq!(FieldRange::parse_entry(""), None);
        assert_eq!(FieldRange::parse_entry("   "), None);
        assert_eq!(FieldRange::parse_entry("abc"), None);
        assert_eq!(FieldRange::parse_entry("NaN"), None);
        assert_eq!(FieldRange::parse_entry(" 42 "), Some(42.0));
    }

    #[test]
    fn stepper_updates_selected_text() {
        let mut store = store_with_text();
        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(editor.step(NumericField::FontSize, StepDirection::Up));
        assert_eq!(editor.value(NumericField::FontSize), Some(21.0));
    }

    #[test]
    fn entry_is_clamped_not_snapped_by_default() {
        let mut store = store_with_text();
        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(editor.enter(NumericField::FontSize, "99"));
        assert_eq!(editor.value(NumericField::FontSize), Some(40.0));
        assert!(editor.enter(NumericField::LineHeight, "1.44"));
        assert_eq!(editor.value(NumericField::LineHeight), Some(1.44));
    }

    #[test]
    fn entry_snaps_when_configured() {
        let mut store = store_with_text();
        let settings = EditorSettings {
            snap_entry_to_step: true,
            ..EditorSettings::default()
        };
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(editor.enter(NumericField::X, "10.6"));
        assert_eq!(editor.value(NumericField::X), Some(11.0));
    }

    #[test]
    fn garbage_entry_dispatches_nothing() {
        let mut store = store_with_text();
        let revision = store.revision();
        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(!editor.enter(NumericField::Width, "wide"));
        assert!(!editor.enter(NumericField::Width, ""));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn nothing_happens_without_selection() {
        let mut store = PageStore::new();
        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(!editor.is_enabled());
        assert!(editor.fields().is_empty());
        assert!(!editor.step(NumericField::X, StepDirection::Up));
        assert!(!editor.toggle_bold());
    }

    #[test]
    fn fields_follow_selected_kind() {
        let mut store = PageStore::new();
        store.dispatch(Action::AddLine(LineDraft {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 3.0,
            stroke: StrokeColor::Black,
        }));
        let line = store.state().elements().next().expect("line");
        store.dispatch(Action::start_transforming(&line));

        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(editor.fields().contains(&NumericField::StrokeWidth));
        assert!(!editor.fields().contains(&NumericField::FontSize));
        assert!(!editor.step(NumericField::FontSize, StepDirection::Up));

        assert!(editor.step(NumericField::StrokeWidth, StepDirection::Up));
        let stroke = editor.value(NumericField::StrokeWidth).expect("stroke");
        assert!((stroke - 3.1).abs() < 1e-9);
    }

    #[test]
    fn image_height_uses_height_range() {
        let mut store = PageStore::new();
        store.dispatch(Action::AddImage(ImageDraft {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 10.0,
            src: String::new(),
        }));
        let image = store.state().elements().next().expect("image");
        store.dispatch(Action::select(&image));

        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(editor.step(NumericField::Height, StepDirection::Down));
        assert_eq!(editor.value(NumericField::Height), Some(10.0));
    }

    #[test]
    fn toggle_bold_flips_weight() {
        let mut store = store_with_text();
        let settings = EditorSettings::default();
        let mut editor = StyleEditor::new(&mut store, &settings);
        assert!(editor.toggle_bold());
        assert!(store.state().texts[0].is_bold);
    }
}
