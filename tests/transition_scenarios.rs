//! End-to-end behaviour of the reducer and the store.

use formstate::core::{get_at_path, ConditionEvaluator, RecordingSink};
use formstate::{
    Action, FormReducer, FormState, FormStore, ImmutableValue, Path, ValidationResult,
};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Evaluator that records its inputs and marks the model with the value's keys.
#[derive(Default)]
struct KeyEchoEvaluator {
    calls: Mutex<Vec<(Value, Value)>>,
}

impl ConditionEvaluator for KeyEchoEvaluator {
    fn evaluate(&self, base_model: &Value, value: &ImmutableValue) -> Value {
        self.calls
            .lock()
            .unwrap()
            .push((base_model.clone(), value.to_json()));
        let keys: Vec<&str> = value
            .as_object()
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default();
        let mut model = base_model.clone();
        model["present"] = json!(keys);
        model
    }
}

fn path(id: &str) -> Path {
    Path::parse(id).unwrap()
}

#[test]
fn init_then_replace_value_scenario() {
    let evaluator = Arc::new(KeyEchoEvaluator::default());
    let reducer = FormReducer::builder()
        .shared_evaluator(evaluator.clone())
        .build();
    let base = json!({"type": "object"});

    let state = reducer.transition(
        Arc::new(FormState::with_base_model(base.clone())),
        &Action::init(),
    );
    assert_eq!(*state.model, json!({"type": "object", "present": []}));
    assert_eq!(state.value, Some(ImmutableValue::Null));

    let state = reducer.transition(state, &Action::replace_value(json!({"x": 1, "y": ""})));
    assert_eq!(state.value_or_null().to_json(), json!({"x": 1}));
    assert_eq!(*state.model, json!({"type": "object", "present": ["x"]}));

    let calls = evaluator.calls.lock().unwrap();
    assert_eq!(calls[0], (base.clone(), json!({})));
    assert_eq!(calls[1], (base, json!({"x": 1})));
}

#[test]
fn clearing_semantics_by_path() {
    let reducer = FormReducer::new();
    let state = reducer.transition(Arc::new(FormState::default()), &Action::init());
    let state = reducer.transition(
        state,
        &Action::replace_value(json!({"foo": {"bar": "x", "keep": 1}})),
    );

    let cleared = reducer.transition(
        Arc::clone(&state),
        &Action::change_value("foo.bar", Value::Null).unwrap(),
    );
    let falsy = reducer.transition(state, &Action::change_value("foo.bar", false).unwrap());

    assert!(get_at_path(&cleared.value_or_null(), &path("foo.bar")).is_none());
    assert_eq!(
        get_at_path(&falsy.value_or_null(), &path("foo.bar")),
        Some(&ImmutableValue::from(false))
    );
}

#[test]
fn unknown_action_is_reported_exactly_once() {
    let sink = Arc::new(RecordingSink::new());
    let reducer = FormReducer::builder()
        .shared_diagnostics(sink.clone())
        .build();
    let state = reducer.transition(Arc::new(FormState::default()), &Action::init());
    let bogus: Action = serde_json::from_value(json!({"type": "BOGUS"})).unwrap();

    let next = reducer.transition(Arc::clone(&state), &bogus);

    assert!(Arc::ptr_eq(&state, &next));
    assert_eq!(sink.reports(), vec!["BOGUS".to_string()]);
}

#[test]
fn reinit_routes_existing_value_through_change_value() {
    let reducer = FormReducer::new();
    let seed: FormState = serde_json::from_value(json!({
        "baseModel": {"type": "object"},
        "value": {"name": "Ada", "nick": ""},
        "model": {"stale": true},
    }))
    .unwrap();

    let state = reducer.transition(Arc::new(seed), &Action::init());

    assert_eq!(state.value, Some(ImmutableValue::Null));
    assert_eq!(*state.model, json!({"type": "object"}));
}

#[test]
fn change_model_then_value_keeps_base_model() {
    let reducer = FormReducer::new();
    let state = reducer.transition(Arc::new(FormState::default()), &Action::init());
    let state = reducer.transition(state, &Action::change_model(json!({"v": 1})));
    let base = state.base_model.clone().unwrap();

    let state = reducer.transition(state, &Action::change_value("a", 1_i64).unwrap());
    let state = reducer.transition(
        state,
        &Action::validation_resolved(ValidationResult::default(), Map::new()),
    );

    assert!(Arc::ptr_eq(&base, state.base_model.as_ref().unwrap()));
}

#[test]
fn actions_decoded_from_json_drive_a_store() {
    let mut store = FormStore::new(
        FormReducer::new(),
        FormState::with_base_model(json!({"type": "object"})),
    );
    let wire = json!([
        {"type": "CHANGE_VALUE", "bunsenId": null, "value": {"items": ["a", "", "b"]}},
        {"type": "CHANGE_VALUE", "bunsenId": "items[1]", "value": "B"},
        {"type": "CHANGE_VALUE", "bunsenId": "contact.email", "value": "a@b.c"},
        {"type": "VALIDATION_RESOLVED",
         "validationResult": {"warnings": [], "errors": [{"path": "#/contact"}]},
         "errors": {"#/contact": "bad"}},
    ]);

    let actions: Vec<Action> = serde_json::from_value(wire).unwrap();
    for action in &actions {
        store.dispatch(action);
    }

    let state = store.state();
    assert_eq!(
        state.value_or_null().to_json(),
        json!({"items": ["a", "B"], "contact": {"email": "a@b.c"}})
    );
    assert_eq!(state.errors["#/contact"], json!("bad"));
    assert_eq!(state.validation_result.errors.len(), 1);
    assert_eq!(store.history().len(), 5);
}

#[test]
fn state_serializes_back_to_plain_json() {
    let reducer = FormReducer::new();
    let seed = FormState::with_base_model(json!({"type": "object"}))
        .extra_field("renderers", json!({}));
    let state = reducer.transition(Arc::new(seed), &Action::init());
    let state = reducer.transition(state, &Action::change_value("a.b", 0_i64).unwrap());

    assert_eq!(
        serde_json::to_value(&*state).unwrap(),
        json!({
            "value": {"a": {"b": 0}},
            "baseModel": {"type": "object"},
            "model": {"type": "object"},
            "errors": {},
            "validationResult": {"warnings": [], "errors": []},
            "renderers": {},
        })
    );
}

#[test]
fn huge_index_from_the_wire_leaves_value_unchanged() {
    let reducer = FormReducer::new();
    let state = reducer.transition(Arc::new(FormState::default()), &Action::init());
    let state = reducer.transition(state, &Action::replace_value(json!({"a": [1]})));

    for id in ["a.18446744073709551615", "a[4000000000]"] {
        let action: Action = serde_json::from_value(json!({
            "type": "CHANGE_VALUE",
            "bunsenId": id,
            "value": 1,
        }))
        .unwrap();

        let next = reducer.transition(Arc::clone(&state), &action);

        assert_eq!(next.value_or_null().to_json(), json!({"a": [1]}));
        assert!(Arc::ptr_eq(&state.model, &next.model));
    }
}

#[test]
fn zero_padded_segments_address_their_own_key() {
    let reducer = FormReducer::new();
    let state = reducer.transition(Arc::new(FormState::default()), &Action::init());
    let state = reducer.transition(
        state,
        &Action::replace_value(json!({"codes": {"007": "bond", "7": "seven"}})),
    );

    let renamed = reducer.transition(
        Arc::clone(&state),
        &Action::change_value("codes.007", "james").unwrap(),
    );
    assert_eq!(
        renamed.value_or_null().to_json(),
        json!({"codes": {"007": "james", "7": "seven"}})
    );

    let cleared = reducer.transition(
        state,
        &Action::change_value("codes.007", Value::Null).unwrap(),
    );
    assert!(get_at_path(&cleared.value_or_null(), &path("codes.007")).is_none());
    assert_eq!(
        cleared.value_or_null().to_json(),
        json!({"codes": {"7": "seven"}})
    );
}
