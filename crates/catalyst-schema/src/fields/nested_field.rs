//! Nested field: delegates to an inner schema

use crate::catalyst::{Catalyst, ProcessOptions};
use crate::field::{Field, FieldKind};
use catalyst_core::{CatalystError, CatalystResult, FieldError, FieldResult, OptionLayer, Value};

// An invalid inner result travels as `FieldError::Nested` so that the outer
// schema can splice it in.
fn valid_data(outcome: Result<CatalystResult, CatalystError>) -> FieldResult<Value> {
	match outcome {
		Ok(result) => Ok(result.into_valid_data()),
		Err(CatalystError::Invalid(result)) => Err(FieldError::Nested(result)),
		Err(other) => Err(FieldError::transform(other.to_string())),
	}
}

impl Field {
	/// Field whose value is dumped and loaded by `catalyst`, always raising
	pub fn nested(catalyst: Catalyst) -> Self {
		let mut field = Field::with_kind(
			FieldKind::Nested,
			OptionLayer::new("NestedField"),
			OptionLayer::new("NestedField"),
		);
		let dumper = catalyst.clone();
		field.set_formatter(move |_, value| {
			valid_data(dumper.dump_with(value, ProcessOptions::new().raise_error(true)))
		});
		field.set_parser(move |_, value| {
			valid_data(catalyst.load_with(value, ProcessOptions::new().raise_error(true)))
		});
		field
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn user() -> Catalyst {
		Catalyst::builder("User")
			.field("name", Field::string().load_required(true))
			.field("age", Field::integer())
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_valid_data_is_returned() {
		let field = Field::nested(user());

		let loaded = field.load(Value::map([("name", Value::from("bob")), ("age", Value::from("3"))]));

		assert_eq!(
			loaded,
			Ok(Value::map([("name", Value::from("bob")), ("age", Value::Int(3))]))
		);
	}

	#[rstest]
	fn test_inner_failure_carries_result() {
		// Arrange
		let field = Field::nested(user());

		// Act
		let error = field.load(Value::map([("age", "x")])).unwrap_err();

		// Assert
		let inner = error.as_nested().unwrap();
		assert_eq!(inner.errors().len(), 2);
		assert!(inner.error("name").is_some());
		assert!(inner.error("age").is_some());
		assert_eq!(inner.valid_data(), &Value::empty_map());
	}

	#[rstest]
	fn test_inner_schema_raises_even_when_it_defaults_to_not_raising() {
		let inner = Catalyst::builder("Inner")
			.field("x", Field::integer())
			.raise_error(false)
			.build()
			.unwrap();

		let error = Field::nested(inner).dump(Value::map([("x", "?")])).unwrap_err();

		assert_eq!(error.kind(), "nested");
	}
}
