//! WebAssembly bindings for slide-core.
//!
//! The browser host owns the rendering surface and forwards user events here
//! as JSON or primitive arguments; the page state comes back as JSON.

use wasm_bindgen::prelude::*;

use crate::{
    ingest_drop, on_background_click, on_delete_handle, on_drag_end, on_editor_input,
    on_editor_key, on_element_gesture, sync_resize, view_variant, Action, BoundBox, CreationId,
    DropEvent, DropPayload, EditorConfig, EditorKey, ElementKind, ElementRef, Gesture,
    NumericField, PageStore, StageSurface, StepDirection, StyleEditor, TransformEnd,
};

/// Initialize the slide WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Editable page for WASM.
#[wasm_bindgen]
pub struct WasmPage {
    store: PageStore,
    config: EditorConfig,
}

#[wasm_bindgen]
impl WasmPage {
    /// Create an empty page with the default configuration.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: PageStore::new(),
            config: EditorConfig::default(),
        }
    }

    /// Create an empty page with a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error string if the configuration is malformed or invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WasmPage, String> {
        let config = EditorConfig::from_json_str(json).map_err(|e| e.to_string())?;
        Ok(Self {
            store: PageStore::new(),
            config,
        })
    }

    /// Dispatch a JSON-encoded action.
    ///
    /// # Errors
    ///
    /// Returns an error string if the action can't be decoded.
    pub fn dispatch(&mut self, json: &str) -> Result<(), String> {
        let action = Action::from_json(json).map_err(|e| e.to_string())?;
        self.store.dispatch(action);
        Ok(())
    }

    /// Get the current page state as indented JSON.
    #[wasm_bindgen(js_name = stateJson)]
    #[must_use]
    pub fn state_json(&self) -> String {
        self.store.state().to_pretty_json().unwrap_or_default()
    }

    /// Number of dispatches that changed the page.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Which variant to draw for an element: `preview`, `transformer` or
    /// `editor`.
    #[wasm_bindgen(js_name = viewVariant)]
    #[must_use]
    pub fn view_variant(&self, kind: &str, id: &str) -> String {
        let Some(kind) = ElementKind::parse(kind) else {
            return "preview".to_string();
        };
        let target = ElementRef::new(kind, CreationId::new(id));
        let variant = view_variant(self.store.state(), &target);
        serde_json::to_value(variant)
            .ok()
            .and_then(|v| v.as_str().map(ToString::to_string))
            .unwrap_or_default()
    }

    /// Forward a click or tap on an element.
    #[wasm_bindgen(js_name = elementGesture)]
    pub fn element_gesture(&mut self, kind: &str, id: &str, double: bool) {
        let Some(kind) = ElementKind::parse(kind) else {
            return;
        };
        let Some(element) = self
            .store
            .state()
            .get(&ElementRef::new(kind, CreationId::new(id)))
        else {
            return;
        };
        let gesture = if double {
            Gesture::DoubleClick
        } else {
            Gesture::Click
        };
        self.store.dispatch(on_element_gesture(&element, gesture));
    }

    /// Forward the end of a drag. Returns `false` if the element is gone.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, kind: &str, id: &str, x: f64, y: f64) -> bool {
        let Some(kind) = ElementKind::parse(kind) else {
            return false;
        };
        let Some(element) = self
            .store
            .state()
            .get(&ElementRef::new(kind, CreationId::new(id)))
        else {
            return false;
        };
        self.store.dispatch(on_drag_end(&element, x, y));
        true
    }

    /// Forward a press on the transformer's delete handle.
    #[wasm_bindgen(js_name = deleteHandle)]
    pub fn delete_handle(&mut self, kind: &str, id: &str) {
        let Some(kind) = ElementKind::parse(kind) else {
            return;
        };
        let target = ElementRef::new(kind, CreationId::new(id));
        self.store.dispatch(on_delete_handle(&target));
    }

    /// Transformer handles for an element kind, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the kind is unknown.
    #[wasm_bindgen(js_name = transformerConfig)]
    pub fn transformer_config(&self, kind: &str) -> Result<String, String> {
        let kind = ElementKind::parse(kind).ok_or_else(|| format!("unknown kind: {kind}"))?;
        serde_json::to_string(&self.config.transformer(kind)).map_err(|e| e.to_string())
    }

    /// Clamp the live drag box. Takes and returns `BoundBox` JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the kind is unknown or a box can't be
    /// decoded.
    #[wasm_bindgen(js_name = boundBox)]
    pub fn bound_box(&self, kind: &str, old_json: &str, new_json: &str) -> Result<String, String> {
        let kind = ElementKind::parse(kind).ok_or_else(|| format!("unknown kind: {kind}"))?;
        let old: BoundBox = serde_json::from_str(old_json).map_err(|e| e.to_string())?;
        let new: BoundBox = serde_json::from_str(new_json).map_err(|e| e.to_string())?;
        let clamped = self.config.transformer(kind).bound_box(old, new);
        serde_json::to_string(&clamped).map_err(|e| e.to_string())
    }

    /// Forward a click on the canvas background.
    #[wasm_bindgen(js_name = backgroundClick)]
    pub fn background_click(&mut self) {
        self.store.dispatch(on_background_click());
    }

    /// Forward a key press in the inline text editor.
    #[wasm_bindgen(js_name = editorKey)]
    pub fn editor_key(&mut self, key: &str, shift: bool) {
        let key = match key {
            "Enter" => EditorKey::Enter { shift },
            "Escape" => EditorKey::Escape,
            _ => EditorKey::Other,
        };
        if let Some(action) = on_editor_key(key) {
            self.store.dispatch(action);
        }
    }

    /// Forward a content change in the inline text editor.
    #[wasm_bindgen(js_name = editorInput)]
    pub fn editor_input(&mut self, text: &str) {
        if let Some(action) = on_editor_input(self.store.state(), text) {
            self.store.dispatch(action);
        }
    }

    /// Forward the end of a resize. Returns `true` if the host must reset
    /// the node's scale to 1.
    ///
    /// # Errors
    ///
    /// Returns an error string if the transform can't be decoded.
    #[wasm_bindgen(js_name = transformEnd)]
    pub fn transform_end(&mut self, kind: &str, id: &str, json: &str) -> Result<bool, String> {
        let end: TransformEnd = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let Some(kind) = ElementKind::parse(kind) else {
            return Ok(false);
        };
        let target = ElementRef::new(kind, CreationId::new(id));
        match sync_resize(&target, &end) {
            Some(sync) => {
                self.store.dispatch(sync.action);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Press a style editor stepper. `field` uses snake case names such as
    /// `font_size`.
    #[wasm_bindgen(js_name = editorStep)]
    pub fn editor_step(&mut self, field: &str, up: bool) -> bool {
        let Some(field) = parse_field(field) else {
            return false;
        };
        let direction = if up {
            StepDirection::Up
        } else {
            StepDirection::Down
        };
        StyleEditor::new(&mut self.store, &self.config.editor).step(field, direction)
    }

    /// Type into a style editor field.
    #[wasm_bindgen(js_name = editorEnter)]
    pub fn editor_enter(&mut self, field: &str, raw: &str) -> bool {
        let Some(field) = parse_field(field) else {
            return false;
        };
        StyleEditor::new(&mut self.store, &self.config.editor).enter(field, raw)
    }

    /// Toggle bold on the selected text box.
    #[wasm_bindgen(js_name = toggleBold)]
    pub fn toggle_bold(&mut self) -> bool {
        StyleEditor::new(&mut self.store, &self.config.editor).toggle_bold()
    }

    /// Forward a drop. `left`/`top` are the stage's bounding rect offsets.
    #[wasm_bindgen(js_name = dropElement)]
    pub fn drop_element(
        &mut self,
        kind: &str,
        src: &str,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
    ) -> bool {
        let surface = StageSurface::at(left, top);
        let event = DropEvent {
            client_x,
            client_y,
            payload: DropPayload {
                kind: kind.to_string(),
                src: src.to_string(),
            },
        };
        match ingest_drop(Some(&surface), &event, &self.config.templates) {
            Some(action) => {
                self.store.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Add an element from a toolbar button.
    #[wasm_bindgen(js_name = addFromToolbar)]
    pub fn add_from_toolbar(&mut self, kind: &str) -> bool {
        let Some(kind) = ElementKind::parse(kind) else {
            return false;
        };
        self.store.dispatch(self.config.templates.click_action(kind));
        true
    }
}

impl Default for WasmPage {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field(name: &str) -> Option<NumericField> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;

    fn first_text_id(page: &WasmPage) -> String {
        page.store.state().texts[0].id.to_string()
    }

    #[test]
    fn new_page_is_empty() {
        let page = WasmPage::new();
        assert!(page.store.state().is_empty());
        assert_eq!(page.revision(), 0);
    }

    #[test]
    fn state_json_is_valid_json() {
        let page = WasmPage::default();
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&page.state_json());
        assert!(parsed.is_ok());
    }

    #[test]
    fn dispatch_accepts_action_json() {
        let mut page = WasmPage::new();
        let result = page.dispatch(
            r#"{"type":"ADD_LINE","payload":{"x":0,"y":0,"width":200,"height":3,"stroke":"black"}}"#,
        );
        assert!(result.is_ok());
        assert_eq!(page.store.state().lines.len(), 1);
    }

    #[test]
    fn dispatch_rejects_garbage() {
        let mut page = WasmPage::new();
        assert!(page.dispatch("{ not json }").is_err());
        assert!(page.dispatch(r#"{"type":"EXPLODE"}"#).is_err());
    }

    #[test]
    fn gestures_drive_view_variant() {
        let mut page = WasmPage::new();
        assert!(page.add_from_toolbar("text"));
        let id = first_text_id(&page);
        assert_eq!(page.view_variant("text", &id), "preview");

        page.element_gesture("text", &id, false);
        assert_eq!(page.view_variant("text", &id), "transformer");

        page.element_gesture("text", &id, true);
        assert_eq!(page.view_variant("text", &id), "editor");

        page.editor_input("edited");
        page.editor_key("Escape", false);
        assert_eq!(page.store.state().mode, Mode::None);
        assert_eq!(page.store.state().texts[0].text, "edited");
    }

    #[test]
    fn transform_end_syncs_width() {
        let mut page = WasmPage::new();
        page.add_from_toolbar("text");
        let id = first_text_id(&page);
        let reset = page
            .transform_end(
                "text",
                &id,
                r#"{"x":100,"y":100,"width":200,"height":28,"scale_x":1.5,"scale_y":1}"#,
            )
            .expect("valid transform");
        assert!(reset);
        assert!((page.store.state().texts[0].width - 300.0).abs() < 1e-9);
    }

    #[test]
    fn editor_calls_use_snake_case_fields() {
        let mut page = WasmPage::new();
        page.add_from_toolbar("text");
        let id = first_text_id(&page);
        page.element_gesture("text", &id, false);
        assert!(page.editor_step("font_size", true));
        assert!(page.editor_enter("line_height", "2"));
        assert!(!page.editor_enter("nope", "2"));
        assert!(page.toggle_bold());
        let text = &page.store.state().texts[0];
        assert!((text.font_size - 21.0).abs() < f64::EPSILON);
        assert!((text.line_height - 2.0).abs() < f64::EPSILON);
        assert!(text.is_bold);
    }

    #[test]
    fn drop_adds_at_translated_point() {
        let mut page = WasmPage::new();
        assert!(page.drop_element("image", "cat.png", 150.0, 120.0, 50.0, 20.0));
        assert!(!page.drop_element("video", "", 0.0, 0.0, 0.0, 0.0));
        let image = &page.store.state().images[0];
        assert!((image.x - 100.0).abs() < f64::EPSILON);
        assert!((image.y - 100.0).abs() < f64::EPSILON);
        assert_eq!(image.src, "cat.png");
    }

    #[test]
    fn drag_end_moves_element() {
        let mut page = WasmPage::new();
        page.add_from_toolbar("line");
        let id = page.store.state().lines[0].id.to_string();
        assert!(page.drag_end("line", &id, 40.0, 75.0));
        assert!(!page.drag_end("line", "1999-01-01 00:00:00.000", 0.0, 0.0));
        let line = &page.store.state().lines[0];
        assert!((line.x - 40.0).abs() < f64::EPSILON);
        assert!((line.y - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn delete_handle_removes_and_releases() {
        let mut page = WasmPage::new();
        page.add_from_toolbar("text");
        let id = first_text_id(&page);
        page.element_gesture("text", &id, false);
        page.delete_handle("text", &id);
        assert!(page.store.state().texts.is_empty());
        assert_eq!(page.store.state().mode, Mode::None);
    }

    #[test]
    fn transformer_bindings_expose_anchors_and_clamp() {
        let page = WasmPage::new();
        let config: serde_json::Value =
            serde_json::from_str(&page.transformer_config("text").expect("text config"))
                .expect("json");
        assert_eq!(
            config["enabled_anchors"],
            serde_json::json!(["middle-left", "middle-right"])
        );
        assert!(page.transformer_config("video").is_err());

        let old = r#"{"x":0,"y":0,"width":200,"height":40}"#;
        let clamped: BoundBox = serde_json::from_str(
            &page
                .bound_box("text", old, r#"{"x":0,"y":0,"width":5,"height":40}"#)
                .expect("valid boxes"),
        )
        .expect("json");
        assert!((clamped.width - 30.0).abs() < f64::EPSILON);
        assert!(page.bound_box("text", old, "{").is_err());
    }
}
