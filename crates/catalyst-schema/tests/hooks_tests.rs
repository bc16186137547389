//! Hook Integration Tests
//!
//! Pre and post hooks wrap every dump and load. A failing hook replaces the
//! whole result with a single error keyed by the hook (or its alias).

use catalyst_core::{FieldError, FieldResult, InvalidData, Value};
use catalyst_schema::{Catalyst, Field, HookKind, Hooks, SchemaDefinition};
use rstest::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// Hook Implementations
// =============================================================================

/// Trims string inputs before loading and stamps the output afterwards
struct Normalize;

impl Hooks for Normalize {
	fn pre_load(&self, _catalyst: &Catalyst, data: Value) -> FieldResult<Value> {
		match data {
			Value::Map(map) => Ok(Value::Map(
				map.into_iter()
					.map(|(k, v)| match v {
						Value::String(s) => (k, Value::from(s.trim())),
						other => (k, other),
					})
					.collect(),
			)),
			other => Ok(other),
		}
	}

	fn post_load(&self, catalyst: &Catalyst, data: Value, original: &Value) -> FieldResult<Value> {
		let mut map = data.as_map().cloned().unwrap_or_default();
		map.insert("schema".to_string(), Value::from(catalyst.name()));
		map.insert("original_len".to_string(), Value::from(original.len().unwrap_or(0) as i64));
		Ok(Value::Map(map))
	}
}

/// Fails the hook named by `kind`
struct FailAt(HookKind);

impl FailAt {
	fn fail(&self, kind: HookKind, data: Value) -> FieldResult<Value> {
		if self.0 == kind {
			Err(FieldError::hook(format!("{} failed", kind)))
		} else {
			Ok(data)
		}
	}
}

impl Hooks for FailAt {
	fn pre_dump(&self, _: &Catalyst, data: Value) -> FieldResult<Value> {
		self.fail(HookKind::PreDump, data)
	}

	fn post_dump(&self, _: &Catalyst, data: Value, _: &Value) -> FieldResult<Value> {
		self.fail(HookKind::PostDump, data)
	}

	fn pre_load(&self, _: &Catalyst, data: Value) -> FieldResult<Value> {
		self.fail(HookKind::PreLoad, data)
	}

	fn post_load(&self, _: &Catalyst, data: Value, _: &Value) -> FieldResult<Value> {
		self.fail(HookKind::PostLoad, data)
	}

	fn pre_dump_many(&self, _: &Catalyst, data: Value) -> FieldResult<Value> {
		self.fail(HookKind::PreDumpMany, data)
	}

	fn post_dump_many(&self, _: &Catalyst, data: Value, _: &Value) -> FieldResult<Value> {
		self.fail(HookKind::PostDumpMany, data)
	}

	fn pre_load_many(&self, _: &Catalyst, data: Value) -> FieldResult<Value> {
		self.fail(HookKind::PreLoadMany, data)
	}

	fn post_load_many(&self, _: &Catalyst, data: Value, _: &Value) -> FieldResult<Value> {
		self.fail(HookKind::PostLoadMany, data)
	}
}

/// Records which hooks ran
#[derive(Default)]
struct Recorder {
	calls: Mutex<Vec<&'static str>>,
	post_runs: AtomicUsize,
}

impl Recorder {
	fn record(&self, name: &'static str) {
		if let Ok(mut calls) = self.calls.lock() {
			calls.push(name);
		}
	}
}

/// Local handle so the foreign `Hooks` trait can be implemented (orphan rule)
struct Recording(Arc<Recorder>);

impl std::ops::Deref for Recording {
	type Target = Recorder;

	fn deref(&self) -> &Recorder {
		&self.0
	}
}

impl Hooks for Recording {
	fn pre_load(&self, _: &Catalyst, data: Value) -> FieldResult<Value> {
		self.record("pre_load");
		Ok(data)
	}

	fn post_load(&self, _: &Catalyst, data: Value, _: &Value) -> FieldResult<Value> {
		self.record("post_load");
		self.post_runs.fetch_add(1, Ordering::SeqCst);
		Ok(data)
	}

	fn pre_load_many(&self, _: &Catalyst, data: Value) -> FieldResult<Value> {
		self.record("pre_load_many");
		Ok(data)
	}

	fn post_load_many(&self, _: &Catalyst, data: Value, _: &Value) -> FieldResult<Value> {
		self.record("post_load_many");
		Ok(data)
	}
}

fn schema(hooks: impl Hooks + 'static) -> Catalyst {
	Catalyst::builder("Hooked")
		.field("name", Field::string().load_required(true))
		.hooks(hooks)
		.build()
		.unwrap()
}

// =============================================================================
// Data Flow Through Hooks
// =============================================================================

#[rstest]
fn test_pre_and_post_load_transform_data() {
	// Arrange
	let catalyst = Catalyst::builder("Person")
		.field("name", Field::string().with_length(Some(1), None))
		.hooks(Normalize)
		.build()
		.unwrap();

	// Act
	let result = catalyst.load(json!({"name": "  ada  ", "extra": 1})).unwrap();

	// Assert
	assert_eq!(
		result.valid_data().to_json().unwrap(),
		json!({"name": "ada", "schema": "Person", "original_len": 2})
	);
}

#[rstest]
fn test_post_hook_is_skipped_when_fields_fail() {
	// Arrange
	let recorder = Arc::new(Recorder::default());
	let catalyst = schema(Recording(Arc::clone(&recorder)));

	// Act
	let result = catalyst.load(json!({})).unwrap();

	// Assert
	assert!(result.error("name").is_some());
	assert_eq!(recorder.post_runs.load(Ordering::SeqCst), 0);
	assert_eq!(*recorder.calls.lock().unwrap(), ["pre_load"]);
}

#[rstest]
fn test_many_runs_item_hooks_inside_batch_hooks() {
	let recorder = Arc::new(Recorder::default());
	let catalyst = schema(Recording(Arc::clone(&recorder)));

	let result = catalyst.load_many(json!([{"name": "a"}, {"name": "b"}])).unwrap();

	assert!(result.is_valid());
	assert_eq!(
		*recorder.calls.lock().unwrap(),
		["pre_load_many", "pre_load", "post_load", "pre_load", "post_load", "post_load_many"]
	);
}

// =============================================================================
// Hook Failures
// =============================================================================

#[rstest]
#[case(HookKind::PreLoad)]
#[case(HookKind::PostLoad)]
fn test_single_hook_failure_replaces_result(#[case] kind: HookKind) {
	// Arrange
	let catalyst = schema(FailAt(kind));
	let data = json!({"name": "ada"});

	// Act
	let result = catalyst.load(data.clone()).unwrap();

	// Assert
	assert_eq!(result.errors().len(), 1);
	assert_eq!(
		result.error(kind.error_key()).unwrap().format(),
		format!("{} failed", kind)
	);
	assert_eq!(result.error(kind.error_key()).unwrap().as_leaf().unwrap().kind(), "hook");
	assert_eq!(result.valid_data(), &Value::empty_map());
	assert_eq!(result.invalid_data(), &InvalidData::Value(Value::from(data)));
}

#[rstest]
#[case(HookKind::PreDumpMany)]
#[case(HookKind::PostDumpMany)]
fn test_batch_hook_failure_replaces_result(#[case] kind: HookKind) {
	let catalyst = schema(FailAt(kind));

	let result = catalyst.dump_many(json!([{"name": "a"}])).unwrap();

	assert!(result.error(kind.error_key()).is_some());
	assert_eq!(result.valid_data(), &Value::List(vec![]));
}

#[rstest]
fn test_item_hook_failure_is_reported_per_index() {
	// Arrange
	let catalyst = schema(FailAt(HookKind::PreDump));

	// Act
	let result = catalyst.dump_many(json!([{"name": "a"}, {"name": "b"}])).unwrap();

	// Assert
	assert_eq!(
		result.format_errors(),
		json!({"0": {"pre_dump": "pre_dump failed"}, "1": {"pre_dump": "pre_dump failed"}})
	);
	assert_eq!(result.valid_data(), &Value::List(vec![Value::empty_map(), Value::empty_map()]));
}

#[rstest]
fn test_hook_error_key_alias() {
	let catalyst = Catalyst::builder("Aliased")
		.field("name", Field::string())
		.hooks(FailAt(HookKind::PostLoad))
		.hook_error_key(HookKind::PostLoad, "_schema")
		.build()
		.unwrap();

	let result = catalyst.load(json!({"name": "x"})).unwrap();

	assert!(result.error("_schema").is_some());
	assert!(result.error("post_load").is_none());
}

#[rstest]
fn test_hooks_are_inherited_from_definitions() {
	// Arrange
	let base = Arc::new(SchemaDefinition::new("Base").hooks(FailAt(HookKind::PreLoad)));
	let child = Arc::new(
		SchemaDefinition::new("Child")
			.extends(base)
			.field("name", Field::string()),
	);

	// Act
	let result = Catalyst::from_definition(child)
		.unwrap()
		.load(json!({"name": "x"}))
		.unwrap();

	// Assert
	assert!(result.error("pre_load").is_some());
}
