//! Facade Integration Tests
//!
//! Exercises the public surface re-exported by the `catalyst` crate the way
//! an application would use it.

use catalyst::prelude::*;
use catalyst::{ErrorTree, HookKind, InvalidData};
use rstest::*;
use serde_json::json;
use std::sync::Arc;

// =============================================================================
// Fixtures
// =============================================================================

struct StampOutput;

impl Hooks for StampOutput {
	fn post_dump(&self, _catalyst: &Catalyst, data: Value, _original: &Value) -> FieldResult<Value> {
		let mut map = data.as_map().cloned().unwrap_or_default();
		map.insert("version".to_string(), Value::Int(1));
		Ok(Value::Map(map))
	}
}

#[fixture]
fn article() -> Catalyst {
	let author = Arc::new(
		SchemaDefinition::new("Author")
			.field("display_name", Field::string().with_length(Some(2), None).load_required(true))
			.format_field_key(snake_to_camel),
	);
	let base = Arc::new(
		SchemaDefinition::new("Base")
			.field("id", Field::integer().no_load())
			.hooks(StampOutput),
	);
	let article = SchemaDefinition::new("Article")
		.extends(base)
		.field("title", Field::string().load_required(true))
		.field("author", author)
		.field("tags", Field::list(Field::string()).load_default(Value::List(vec![])));

	Catalyst::from_definition(Arc::new(article)).unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[rstest]
fn test_load_through_the_prelude(article: Catalyst) {
	// Act
	let result = article
		.load(json!({"id": 9, "title": "Hello", "author": {"displayName": "Ada"}}))
		.unwrap();

	// Assert
	assert!(result.is_valid());
	assert_eq!(
		result.valid_data().to_json().unwrap(),
		json!({"title": "Hello", "author": {"display_name": "Ada"}, "tags": []})
	);
}

#[rstest]
fn test_nested_errors_render_for_clients(article: Catalyst) {
	// Act
	let result = article
		.load(json!({"author": {"displayName": "A"}}))
		.unwrap();

	// Assert
	assert_eq!(
		result.format_errors(),
		json!({
			"title": "Missing data for required field.",
			"author": {"displayName": "Ensure length >= 2."}
		})
	);
	assert!(matches!(result.error("author"), Some(ErrorTree::Nested(_))));
	assert_eq!(
		result
			.invalid_data()
			.get("author")
			.and_then(|author| author.get("displayName")),
		Some(&InvalidData::Value(Value::from("A")))
	);
}

// =============================================================================
// Dumping
// =============================================================================

#[rstest]
fn test_dump_runs_inherited_hooks(article: Catalyst) {
	let result = article
		.dump(json!({
			"id": 1,
			"title": "Hi",
			"author": {"display_name": "Ada"},
			"tags": ["a"]
		}))
		.unwrap();

	assert_eq!(
		result.valid_data().to_json().unwrap(),
		json!({
			"id": 1,
			"title": "Hi",
			"author": {"displayName": "Ada"},
			"tags": ["a"],
			"version": 1
		})
	);
}

#[rstest]
fn test_dump_many_with_hook_alias() {
	// Arrange
	let catalyst = Catalyst::builder("Row")
		.field("n", Field::integer())
		.hooks(StampOutput)
		.hook_error_key(HookKind::PreDumpMany, "rows")
		.build()
		.unwrap();

	// Act
	let result = catalyst.dump_many(json!([{"n": 1}, {"n": "2"}])).unwrap();

	// Assert
	assert_eq!(
		result.valid_data().to_json().unwrap(),
		json!([{"n": 1, "version": 1}, {"n": 2, "version": 1}])
	);
}

// =============================================================================
// Argument Validation
// =============================================================================

#[rstest]
fn test_load_args_validate_before_calling(article: Catalyst) {
	// Arrange
	let create = article.load_args(["title", "author"], |args| {
		format!("{} by {}", args["title"], args["author"])
	});

	// Act
	let created = create.call(vec![Value::from("Hi"), Value::map([("displayName", "Ada")])]);
	let rejected = create.call(vec![Value::from("Hi"), Value::map([("displayName", "A")])]);

	// Assert
	assert_eq!(created.unwrap(), r#"Hi by {"display_name": "Ada"}"#);
	let Err(CatalystError::Invalid(result)) = rejected else {
		panic!("expected the arguments to be rejected");
	};
	assert!(!result.is_valid());
	assert!(matches!(result.error("author"), Some(ErrorTree::Nested(_))));
}
