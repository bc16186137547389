//! Batch Processing Tests
//!
//! `dump_many` and `load_many` run the single-item flow over every item of a
//! list and key the failures by item index.

use catalyst_core::{ErrorKey, InvalidData, Value};
use catalyst_schema::{Catalyst, Field, ProcessOptions};
use rstest::*;
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn item() -> Catalyst {
	Catalyst::builder("Item")
		.field("a", Field::integer().load_required(true))
		.build()
		.unwrap()
}

// =============================================================================
// Indexing
// =============================================================================

#[rstest]
fn test_errors_are_keyed_by_index(item: Catalyst) {
	// Act
	let result = item.load_many(json!([{"a": 1}, {}])).unwrap();

	// Assert
	assert_eq!(
		result.errors().keys().collect::<Vec<_>>(),
		[&ErrorKey::Index(1)]
	);
	assert_eq!(
		result.format_errors(),
		json!({"1": {"a": "Missing data for required field."}})
	);
}

#[rstest]
fn test_valid_data_stays_index_aligned(item: Catalyst) {
	let result = item.load_many(json!([{"a": "x"}, {"a": "2"}])).unwrap();

	assert_eq!(
		result.valid_data(),
		&Value::List(vec![Value::empty_map(), Value::map([("a", 2)])])
	);
	assert_eq!(
		result.invalid_data().get(0usize).and_then(|item| item.get("a")),
		Some(&InvalidData::Value(Value::from("x")))
	);
	assert!(result.invalid_data().get(1usize).is_none());
}

#[rstest]
fn test_empty_batch_is_valid(item: Catalyst) {
	let result = item.dump_many(json!([])).unwrap();

	assert!(result.is_valid());
	assert_eq!(result.valid_data(), &Value::List(vec![]));
}

// =============================================================================
// Error Collection
// =============================================================================

#[rstest]
#[case(true, 2, 3)]
#[case(false, 1, 2)]
fn test_fail_fast_stops_at_first_bad_item(
	item: Catalyst,
	#[case] all_errors: bool,
	#[case] error_count: usize,
	#[case] item_count: usize,
) {
	// Arrange
	let data = json!([{"a": 1}, {}, {}]);

	// Act
	let result = item
		.load_many_with(data, ProcessOptions::new().all_errors(all_errors))
		.unwrap();

	// Assert
	assert_eq!(result.errors().len(), error_count);
	assert_eq!(result.valid_data().len(), Some(item_count));
}

#[rstest]
fn test_items_never_raise_on_their_own() {
	let raising = Catalyst::builder("Raising")
		.field("a", Field::integer().load_required(true))
		.raise_error(true)
		.build()
		.unwrap();

	let result = raising
		.load_many_with(json!([{}, {}]), ProcessOptions::new().raise_error(false))
		.unwrap();

	assert_eq!(result.errors().len(), 2);
}

#[rstest]
fn test_batch_raises_once_with_every_item(item: Catalyst) {
	let error = item
		.load_many_with(json!([{}, {"a": 1}, {}]), ProcessOptions::new().raise_error(true))
		.unwrap_err();

	let result = error.into_result().unwrap();
	assert_eq!(result.errors().len(), 2);
	assert!(result.error(2usize).is_some());
}

// =============================================================================
// Malformed Input
// =============================================================================

#[rstest]
#[case(json!({"a": 1}), "Expected a list, got map.")]
#[case(json!(3), "Expected a list, got int.")]
fn test_non_list_input_fails_the_main_process(
	item: Catalyst,
	#[case] data: serde_json::Value,
	#[case] message: &str,
) {
	// Act
	let result = item.load_many(data.clone()).unwrap();

	// Assert
	assert_eq!(result.error("load_many").unwrap().format(), message);
	assert_eq!(result.invalid_data(), &InvalidData::Value(Value::from(data)));
	assert_eq!(result.valid_data(), &Value::List(vec![]));
}

#[rstest]
fn test_non_mapping_item_is_reported_at_its_index(item: Catalyst) {
	let result = item.load_many(json!([{"a": 1}, "oops"])).unwrap();

	assert_eq!(
		result.format_errors(),
		json!({"1": {"load": "Expected a mapping, got string."}})
	);
	assert_eq!(
		result.invalid_data().get(1usize).and_then(InvalidData::as_value),
		Some(&Value::from("oops"))
	);
}
