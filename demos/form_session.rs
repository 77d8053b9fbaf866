//! Form Session Example
//!
//! This example demonstrates:
//! - Bootstrapping a store from a base model
//! - A condition evaluator that reveals a field based on the value
//! - Clearing fields versus storing falsy values
//! - Model identity being kept when nothing in the model changed
//! - Unrecognized actions being reported through tracing

use formstate::core::ImmutableValue;
use formstate::{Action, FormReducer, FormState, FormStore};
use serde_json::{json, Value};
use std::sync::Arc;

/// Adds a `shippingAddress` property when `shipSeparately` is true.
fn reveal_shipping(base: &Value, value: &ImmutableValue) -> Value {
    let mut model = base.clone();
    if value.get("shipSeparately").and_then(ImmutableValue::as_bool) == Some(true) {
        model["properties"]["shippingAddress"] = json!({"type": "string"});
    }
    model
}

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Form Session Example ===\n");

    let base_model = json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "shipSeparately": {"type": "boolean"},
        }
    });
    let reducer = FormReducer::builder()
        .evaluate_with(reveal_shipping)
        .build();
    let mut store = FormStore::new(reducer, FormState::with_base_model(base_model));

    store.subscribe(|state| {
        println!("  -> value is now {}", state.value_or_null().to_json());
    });

    println!("Setting name:");
    let before = store.state();
    let after = store.dispatch(&Action::change_value("name", "Ada").unwrap());
    println!(
        "  model kept its identity: {}\n",
        Arc::ptr_eq(&before.model, &after.model)
    );

    println!("Opting into separate shipping:");
    let after = store.dispatch(&Action::change_value("shipSeparately", true).unwrap());
    println!("  model now has: {}\n", after.model["properties"]);

    println!("Storing false keeps the field:");
    store.dispatch(&Action::change_value("shipSeparately", false).unwrap());

    println!("Clearing the name removes it:");
    store.dispatch(&Action::change_value("name", "").unwrap());

    println!("\nDispatching an action this crate does not know:");
    let unknown: Action = serde_json::from_value(json!({"type": "FORM_FOCUSED"})).unwrap();
    store.dispatch(&unknown);

    println!("\n=== History ===");
    for record in store.history().records() {
        println!(
            "  {:<20} state_changed={} model_changed={}",
            record.kind, record.state_changed, record.model_changed
        );
    }
}
