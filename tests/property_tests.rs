//! Property-based tests for the sanitizer, the path mutator and the reducer.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated value trees and paths.

use formstate::core::{clean, get_at_path, is_droppable, set_at_path, unset_at_path, NoopSink};
use formstate::{Action, FormReducer, FormState, ImmutableValue, Path};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

fn arbitrary_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-3i64..3).prop_map(|n| json!(n)),
        prop::sample::select(vec!["", "a", "bc"]).prop_map(|s| json!(s)),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
        ]
    })
}

prop_compose! {
    fn arbitrary_bunsen_id()(keys in prop::collection::vec("[a-c]", 1..4)) -> String {
        keys.join(".")
    }
}

fn quiet_reducer() -> FormReducer {
    FormReducer::builder().diagnostics(NoopSink).build()
}

fn initialized(reducer: &FormReducer, value: Value) -> Arc<FormState> {
    let state = reducer.transition(
        Arc::new(FormState::with_base_model(json!({"type": "object"}))),
        &Action::init(),
    );
    reducer.transition(state, &Action::replace_value(value))
}

fn has_no_droppable_descendants(value: &ImmutableValue) -> bool {
    match value {
        ImmutableValue::Array(items) => items
            .iter()
            .all(|item| !is_droppable(item) && has_no_droppable_descendants(item)),
        ImmutableValue::Object(fields) => fields
            .values()
            .all(|field| !is_droppable(field) && has_no_droppable_descendants(field)),
        _ => true,
    }
}

proptest! {
    #[test]
    fn clean_is_idempotent(value in arbitrary_json()) {
        let once = clean(&ImmutableValue::from(value));
        let twice = clean(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn clean_leaves_nothing_droppable(value in arbitrary_json()) {
        let cleaned = clean(&ImmutableValue::from(value));
        prop_assert!(has_no_droppable_descendants(&cleaned));
    }

    #[test]
    fn clean_keeps_booleans_and_numbers(
        fields in prop::collection::btree_map("[a-e]", arbitrary_json(), 0..6)
    ) {
        let source = Value::Object(fields.clone().into_iter().collect());
        let cleaned = clean(&ImmutableValue::from(source));

        for (key, field) in &fields {
            if field.is_boolean() || field.is_number() {
                prop_assert_eq!(
                    cleaned.get(key).map(ImmutableValue::to_json),
                    Some(field.clone())
                );
            }
        }
    }

    #[test]
    fn set_then_get_returns_value(
        tree in arbitrary_json(),
        id in arbitrary_bunsen_id(),
        value in arbitrary_json(),
    ) {
        let path = Path::parse(&id).unwrap();
        let value = ImmutableValue::from(value);
        let next = set_at_path(&ImmutableValue::from(tree), &path, value.clone());

        prop_assert_eq!(get_at_path(&next, &path), Some(&value));
    }

    #[test]
    fn unset_then_get_is_absent(tree in arbitrary_json(), id in arbitrary_bunsen_id()) {
        let path = Path::parse(&id).unwrap();
        let next = unset_at_path(&ImmutableValue::from(tree), &path);

        prop_assert!(get_at_path(&next, &path).is_none());
    }

    #[test]
    fn change_value_is_idempotent(
        start in arbitrary_json(),
        id in arbitrary_bunsen_id(),
        value in arbitrary_json(),
    ) {
        let reducer = quiet_reducer();
        let state = initialized(&reducer, start);
        let action = Action::change_value(&id, value).unwrap();

        let once = reducer.transition(state, &action);
        let twice = reducer.transition(Arc::clone(&once), &action);

        prop_assert_eq!(&*twice, &*once);
    }

    #[test]
    fn equal_model_keeps_identity(
        start in arbitrary_json(),
        id in arbitrary_bunsen_id(),
        value in arbitrary_json(),
    ) {
        let reducer = quiet_reducer();
        let state = initialized(&reducer, start);
        let model = Arc::clone(&state.model);

        let next = reducer.transition(state, &Action::change_value(&id, value).unwrap());

        prop_assert!(Arc::ptr_eq(&model, &next.model));
    }

    #[test]
    fn replaced_value_is_clean(value in arbitrary_json()) {
        let reducer = quiet_reducer();
        let state = initialized(&reducer, value);
        let stored = state.value_or_null();

        prop_assert_eq!(clean(&stored), stored);
    }
}
