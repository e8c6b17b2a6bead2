//! Failure policy: the error producer determines whether validation
//! short-circuits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use chrono::Utc;
use json_shape::{compile, compile_with, ErrorCollector, Options, ValidationError, Value};
use serde_json::json;

fn post_shape() -> serde_json::Value {
    json!({
        "title": "string",
        "tags": "string[]",
        "author": { "id": "number", "name": "string" }
    })
}

// ── Abort (default) ──────────────────────────────────────────────────────────

#[test]
fn default_policy_stops_at_first_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = Options::new().with_error_producer(move |field, expected| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(ValidationError::new(field, expected))
    });
    let schema = compile_with(post_shape(), options).unwrap();

    let result = schema.validate_json(&json!({ "title": 1, "tags": [2, 3], "author": {} }));
    assert_eq!(result, Err(ValidationError::new("value.title", "string")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn default_options_raise_validation_error() {
    let schema = compile(post_shape()).unwrap();
    let err = schema
        .validate_json(&json!({ "title": "t", "tags": ["a", 2] }))
        .unwrap_err();
    assert_eq!(err.field, "value.tags.$");
    assert_eq!(err.expected, "string");
    assert_eq!(err.to_string(), "value.tags.$ is not a string.");
}

// ── Accumulate ───────────────────────────────────────────────────────────────

#[test]
fn collector_gathers_every_failure_in_order() {
    let collector = ErrorCollector::new();
    let schema = compile_with(post_shape(), collector.options()).unwrap();

    schema
        .validate_json(&json!({ "title": 1, "tags": ["a", 2, false], "author": { "id": "x" } }))
        .unwrap();
    assert_eq!(
        collector.take(),
        vec![
            ValidationError::new("value.title", "string"),
            ValidationError::new("value.tags.$", "string"),
            ValidationError::new("value.tags.$", "string"),
            ValidationError::new("value.author.id", "number"),
            ValidationError::new("value.author.name", "string"),
        ]
    );
    assert!(collector.is_empty());
}

#[test]
fn structural_failure_skips_children_even_when_accumulating() {
    let collector = ErrorCollector::new();
    let schema = compile_with(post_shape(), collector.options()).unwrap();

    schema
        .validate_json(&json!({ "title": "t", "tags": "a,b", "author": 7 }))
        .unwrap();
    assert_eq!(
        collector.take(),
        vec![
            ValidationError::new("value.tags", "Array"),
            ValidationError::new("value.author", "Object"),
        ]
    );
}

#[test]
fn conforming_value_collects_nothing() {
    let collector = ErrorCollector::new();
    let schema = compile_with(post_shape(), collector.options()).unwrap();
    schema
        .validate_json(&json!({ "title": "t", "tags": [], "author": { "id": 1, "name": "n" } }))
        .unwrap();
    assert_eq!(collector.len(), 0);
}

// ── Custom producers ─────────────────────────────────────────────────────────

#[test]
fn producer_may_return_its_own_error_type() {
    let options =
        Options::new().with_error_producer(|field, expected| Err(format!("{field}!{expected}")));
    let schema = compile_with(json!({ "n": "number" }), options).unwrap();
    assert_eq!(
        schema.validate_json(&json!({ "n": "1" })),
        Err("value.n!number".to_string())
    );
    assert_eq!(schema.validate_json(&json!({ "n": 1 })), Ok(()));
}

#[test]
fn producer_may_abort_selectively() {
    // Tolerate bad dates, stop on anything else.
    let options = Options::new().with_error_producer(|field, expected| {
        if expected == "Date" {
            Ok(())
        } else {
            Err(field.to_string())
        }
    });
    let schema = compile_with(json!({ "at": "date", "id": "number" }), options).unwrap();
    assert_eq!(schema.validate_json(&json!({ "at": "never", "id": 1 })), Ok(()));
    assert_eq!(
        schema.validate_json(&json!({ "at": "never", "id": "1" })),
        Err("value.id".to_string())
    );
}

// ── Date parser ──────────────────────────────────────────────────────────────

#[test]
fn custom_date_parser_replaces_the_default() {
    let options = Options::new().with_date_parser(|raw| match raw {
        Value::String(s) if s == "epoch" => Some(0.0),
        _ => None,
    });
    let schema = compile_with("date", options).unwrap();
    schema.validate_json(&json!("epoch")).unwrap();
    schema.validate(&Value::Date(Utc::now())).unwrap();
    assert_eq!(
        schema.validate_json(&json!("2017-11-11")),
        Err(ValidationError::new("value", "Date"))
    );
}

#[test]
fn date_parser_is_not_consulted_for_instances() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = Options::new().with_date_parser(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        None
    });
    let schema = compile_with("date[]", options).unwrap();
    schema
        .validate(&Value::from(vec![Value::Date(Utc::now()), Value::Date(Utc::now())]))
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(schema.validate_json(&json!(["x"])).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn options_keep_defaults_for_unset_fields() {
    let options = Options::new().with_error_producer(|field, _| Err(field.len()));
    let schema = compile_with(json!({ "at": "date" }), options).unwrap();
    schema.validate_json(&json!({ "at": "2017-11" })).unwrap();
    assert_eq!(schema.validate_json(&json!({ "at": "no" })), Err("value.at".len()));
}

// ── Concurrency ──────────────────────────────────────────────────────────────

#[test]
fn compiled_schema_is_shared_across_threads() {
    let schema = compile(post_shape()).unwrap();
    thread::scope(|scope| {
        for i in 0..8 {
            let schema = schema.clone();
            scope.spawn(move || {
                for _ in 0..100 {
                    let good = json!({ "title": "t", "tags": ["x"], "author": { "id": i, "name": "n" } });
                    assert!(schema.validate_json(&good).is_ok());
                    let bad = json!({ "title": "t", "tags": ["x"], "author": { "id": "i", "name": "n" } });
                    assert_eq!(
                        schema.validate_json(&bad),
                        Err(ValidationError::new("value.author.id", "number"))
                    );
                }
            });
        }
    });
}
