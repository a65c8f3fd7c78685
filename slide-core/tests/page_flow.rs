//! End-to-end page editing flows
//!
//! Drives a store the way the browser editor does:
//! - Adding elements from the toolbar and by drop
//! - Selecting, editing and removing
//! - Resizing through transform sync
//! - Style editor stepping and direct entry

use std::collections::HashSet;

use chrono::NaiveDate;
use slide_core::{
    ingest_drop, on_background_click, on_delete_handle, on_editor_input, on_editor_key,
    on_element_gesture, sync_resize, Action, DropEvent, DropPayload, EditorConfig, EditorKey,
    Element, ElementKind, FixedClock, Gesture, Mode, NumericField, PageStore, StageSurface,
    StepDirection, StyleEditor, TextPatch, TransformEnd,
};

fn fixed_store() -> PageStore {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date");
    PageStore::with_clock(FixedClock(start))
}

fn first(store: &PageStore, kind: ElementKind) -> Element {
    store
        .state()
        .elements()
        .find(|e| e.kind() == kind)
        .expect("element of kind")
}

#[test]
fn add_select_update_remove_scenario() {
    let config = EditorConfig::default();
    let mut store = fixed_store();

    store.dispatch(config.templates.click_action(ElementKind::Text));
    let text = first(&store, ElementKind::Text);
    let id = text.id().clone();

    store.dispatch(Action::select(&text));
    assert_eq!(store.state().mode, Mode::Preview);
    assert_eq!(store.state().selected, Some(text.to_ref()));

    store.dispatch(Action::update_text(
        id.clone(),
        TextPatch {
            font_size: Some(24.0),
            ..TextPatch::default()
        },
    ));
    match store.selected_element() {
        Some(Element::Text(selected)) => {
            assert!((selected.font_size - 24.0).abs() < f64::EPSILON);
            assert_eq!(selected.id, id);
        }
        other => panic!("unexpected selection {other:?}"),
    }

    store.dispatch(Action::remove(&text.to_ref()));
    assert!(store.state().texts.is_empty());
    assert_eq!(store.state().selected, None);
    assert_eq!(store.state().mode, Mode::None);
}

#[test]
fn rapid_adds_get_distinct_ids() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    for _ in 0..100 {
        store.dispatch(config.templates.click_action(ElementKind::Text));
    }
    let ids: HashSet<_> = store.state().ids().cloned().collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn ids_stay_distinct_with_system_clock() {
    let config = EditorConfig::default();
    let mut store = PageStore::new();
    for kind in ElementKind::ALL.iter().cycle().take(60) {
        store.dispatch(config.templates.click_action(*kind));
    }
    let ids: HashSet<_> = store.state().ids().cloned().collect();
    assert_eq!(ids.len(), 60);
}

#[test]
fn update_is_idempotent() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    store.dispatch(config.templates.click_action(ElementKind::Text));
    let id = first(&store, ElementKind::Text).id().clone();
    let update = Action::update_text(
        id,
        TextPatch {
            text: Some("same".to_string()),
            width: Some(320.0),
            ..TextPatch::default()
        },
    );

    store.dispatch(update.clone());
    let once = store.snapshot();
    let revision = store.revision();
    store.dispatch(update);
    assert_eq!(*once, *store.state());
    assert_eq!(store.revision(), revision);
}

#[test]
fn removal_clears_selection_even_for_other_elements() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    store.dispatch(config.templates.click_action(ElementKind::Image));
    store.dispatch(config.templates.click_action(ElementKind::Line));
    let image = first(&store, ElementKind::Image);
    let line = first(&store, ElementKind::Line);

    store.dispatch(on_element_gesture(&image, Gesture::Click));
    store.dispatch(on_delete_handle(&line.to_ref()));
    assert_eq!(store.state().images.len(), 1);
    assert!(store.state().lines.is_empty());
    assert_eq!(store.state().selected, None);
    assert_eq!(store.state().mode, Mode::None);
}

#[test]
fn resize_then_edit_keeps_the_new_width() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    store.dispatch(config.templates.click_action(ElementKind::Text));
    let text = first(&store, ElementKind::Text);
    store.dispatch(on_element_gesture(&text, Gesture::Click));

    let end = TransformEnd {
        x: 90.0,
        y: 100.0,
        width: 200.0,
        height: 28.0,
        scale_x: 1.5,
        scale_y: 1.0,
    };
    let sync = sync_resize(&text.to_ref(), &end).expect("valid scale");
    store.dispatch(sync.action);
    assert!((store.state().texts[0].width - 300.0).abs() < 1e-9);
    assert!((store.state().texts[0].x - 90.0).abs() < f64::EPSILON);
    assert_eq!(store.state().mode, Mode::Transforming);

    store.dispatch(on_element_gesture(&text, Gesture::DoubleClick));
    let input = on_editor_input(store.state(), "wrapped at three hundred").expect("editing");
    store.dispatch(input);
    store.dispatch(on_editor_key(EditorKey::Enter { shift: false }).expect("finish"));

    let stored = &store.state().texts[0];
    assert!((stored.width - 300.0).abs() < 1e-9);
    assert_eq!(stored.text, "wrapped at three hundred");
    assert_eq!(store.state().mode, Mode::None);
}

#[test]
fn style_editor_clamps_at_both_ends() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    store.dispatch(config.templates.click_action(ElementKind::Image));
    let image = first(&store, ElementKind::Image);
    store.dispatch(Action::select(&image));

    let mut editor = StyleEditor::new(&mut store, &config.editor);
    assert!(editor.enter(NumericField::Width, "10"));
    assert!(editor.step(NumericField::Width, StepDirection::Down));
    assert_eq!(editor.value(NumericField::Width), Some(10.0));

    assert!(editor.enter(NumericField::Width, "5000"));
    assert_eq!(editor.value(NumericField::Width), Some(1000.0));
    assert!(editor.step(NumericField::Width, StepDirection::Up));
    assert_eq!(editor.value(NumericField::Width), Some(1000.0));
}

#[test]
fn drop_then_background_click() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    let surface = StageSurface::at(20.0, 40.0);
    let event = DropEvent {
        client_x: 220.0,
        client_y: 340.0,
        payload: DropPayload {
            kind: "line".to_string(),
            src: String::new(),
        },
    };
    let action = ingest_drop(Some(&surface), &event, &config.templates).expect("line drop");
    store.dispatch(action);

    let line = first(&store, ElementKind::Line);
    assert_eq!(line.position(), (200.0, 300.0));

    store.dispatch(on_element_gesture(&line, Gesture::Tap));
    assert_eq!(store.state().mode, Mode::Transforming);
    store.dispatch(on_background_click());
    assert_eq!(store.state().mode, Mode::None);
}

#[test]
fn actions_round_trip_through_json() {
    let config = EditorConfig::default();
    let mut store = fixed_store();
    let add = config.templates.click_action(ElementKind::Line);
    let json = serde_json::to_string(&add).expect("serialize");
    assert!(json.starts_with(r#"{"type":"ADD_LINE""#));
    store.dispatch(Action::from_json(&json).expect("decode"));
    assert_eq!(store.state().lines.len(), 1);

    let state_json = store.state().to_pretty_json().expect("state json");
    assert!(state_json.contains("\"lines\": ["));
}
