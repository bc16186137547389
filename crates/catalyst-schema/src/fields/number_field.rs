//! Float and integer fields

use crate::field::{Field, FieldKind};
use catalyst_core::{FieldError, FieldResult, OptionLayer, Value};

fn invalid(field: &Field, value: &Value) -> FieldError {
	field.transform_error("invalid", &[("value", value.to_string())])
}

fn to_float(field: &Field, value: Value) -> FieldResult<Value> {
	match value {
		Value::Float(f) => Ok(Value::Float(f)),
		Value::Int(i) => Ok(Value::Float(i as f64)),
		Value::Bool(b) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
		Value::String(ref s) => s
			.trim()
			.parse::<f64>()
			.map(Value::Float)
			.map_err(|_| invalid(field, &value)),
		other => Err(invalid(field, &other)),
	}
}

fn to_integer(field: &Field, value: Value) -> FieldResult<Value> {
	match value {
		Value::Int(i) => Ok(Value::Int(i)),
		// `as` saturates, so out-of-range floats must be rejected first
		Value::Float(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
			Ok(Value::Int(f.trunc() as i64))
		}
		Value::Bool(b) => Ok(Value::Int(i64::from(b))),
		Value::String(ref s) => s
			.trim()
			.parse::<i64>()
			.map(Value::Int)
			.map_err(|_| invalid(field, &value)),
		other => Err(invalid(field, &other)),
	}
}

impl Field {
	/// Field coercing numbers and numeric strings to floats
	pub fn float() -> Self {
		let mut field = Field::with_kind(
			FieldKind::Float,
			OptionLayer::new("FloatField"),
			OptionLayer::<String>::new("FloatField").with("invalid", "Not a valid number: {value}."),
		);
		field.set_formatter(to_float);
		field.set_parser(to_float);
		field
	}

	/// Field coercing to integers; floats are truncated toward zero
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	/// use catalyst_schema::Field;
	///
	/// let field = Field::integer().with_range(Some(Value::Int(0)), None);
	/// assert_eq!(field.load(Value::from(" 12 ")), Ok(Value::Int(12)));
	/// assert_eq!(field.load(Value::Float(3.9)), Ok(Value::Int(3)));
	/// assert!(field.load(Value::from("1.5")).is_err());
	/// assert!(field.load(Value::Int(-1)).is_err());
	/// ```
	pub fn integer() -> Self {
		let mut field = Field::with_kind(
			FieldKind::Integer,
			OptionLayer::new("IntegerField"),
			OptionLayer::<String>::new("IntegerField").with("invalid", "Not a valid integer: {value}."),
		);
		field.set_formatter(to_integer);
		field.set_parser(to_integer);
		field
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Value::Int(2), Value::Float(2.0))]
	#[case(Value::Float(2.5), Value::Float(2.5))]
	#[case(Value::from("1e3"), Value::Float(1000.0))]
	#[case(Value::Bool(true), Value::Float(1.0))]
	fn test_float_coercion(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(Field::float().load(input), Ok(expected));
	}

	#[rstest]
	#[case(Value::from(""))]
	#[case(Value::from("abc"))]
	#[case(Value::List(vec![]))]
	#[case(Value::empty_map())]
	fn test_float_rejects(#[case] input: Value) {
		let error = Field::float().load(input).unwrap_err();
		assert_eq!(error.kind(), "transform");
	}

	#[rstest]
	#[case(Value::Int(7), Value::Int(7))]
	#[case(Value::Float(-2.7), Value::Int(-2))]
	#[case(Value::from("42"), Value::Int(42))]
	#[case(Value::Bool(false), Value::Int(0))]
	fn test_integer_coercion(#[case] input: Value, #[case] expected: Value) {
		assert_eq!(Field::integer().dump(input), Ok(expected));
	}

	#[rstest]
	fn test_integer_error_message() {
		// Arrange
		let field = Field::integer();

		// Act
		let error = field.load(Value::from("x1")).unwrap_err();

		// Assert
		assert_eq!(error.to_string(), "Not a valid integer: x1.");
	}

	#[rstest]
	#[case(Value::Float(f64::NAN))]
	#[case(Value::Float(f64::INFINITY))]
	#[case(Value::Float(1e30))]
	#[case(Value::Float(-1e30))]
	#[case(Value::Float(9_223_372_036_854_775_808.0))]
	#[case(Value::from(serde_json::json!(u64::MAX)))]
	#[case(Value::List(vec![]))]
	fn test_integer_rejects(#[case] input: Value) {
		let error = Field::integer().load(input).unwrap_err();
		assert_eq!(error.kind(), "transform");
	}

	#[rstest]
	fn test_integer_accepts_float_at_lower_bound() {
		assert_eq!(
			Field::integer().load(Value::Float(i64::MIN as f64)),
			Ok(Value::Int(i64::MIN))
		);
	}

	#[rstest]
	fn test_range_applies_after_parse() {
		let field = Field::float().with_range(Some(Value::Int(0)), Some(Value::Int(1)));
		assert_eq!(field.load(Value::from("0.5")), Ok(Value::Float(0.5)));
		assert_eq!(
			field.load(Value::from("1.5")).unwrap_err().to_string(),
			"Ensure value <= 1."
		);
	}

	#[rstest]
	fn test_invalid_message_override() {
		let field = Field::integer().error_message("invalid", "Bad number.");
		assert_eq!(field.load(Value::from("?")).unwrap_err().to_string(), "Bad number.");
	}
}
