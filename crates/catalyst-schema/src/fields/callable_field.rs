//! Callable field: dumps the result of calling the value

use crate::field::{Field, FieldKind, NO_LOAD};
use catalyst_core::{FieldError, FieldResult, OptionLayer, Value};

const FUNC_ARGS: &str = "func_args";

fn call(field: &Field, value: Value) -> FieldResult<Value> {
	let Value::Callable(func) = &value else {
		return Err(field.transform_error("not_callable", &[("type", value.type_name().to_string())]));
	};
	let args = match field.get_option(FUNC_ARGS) {
		Some(Value::List(args)) => args,
		_ => Vec::new(),
	};
	func.call(&args).map_err(FieldError::transform)
}

impl Field {
	/// Dump-only field that calls the value with fixed positional arguments
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	/// use catalyst_schema::Field;
	///
	/// let field = Field::callable(vec![Value::Int(2)]);
	/// let double = Value::callable(|args| Ok(Value::Int(args[0].as_i64().unwrap_or(0) * 2)));
	///
	/// assert_eq!(field.dump(double), Ok(Value::Int(4)));
	/// assert!(field.is_no_load());
	/// ```
	pub fn callable(args: Vec<Value>) -> Self {
		let mut field = Field::with_kind(
			FieldKind::Callable,
			OptionLayer::<Value>::new("CallableField")
				.with(NO_LOAD, true)
				.with(FUNC_ARGS, Value::List(args)),
			OptionLayer::<String>::new("CallableField")
				.with("not_callable", "Object of type {type} is not callable."),
		);
		field.set_formatter(call);
		field
	}

	/// Replaces the arguments passed to the callable
	pub fn set_args(&mut self, args: Vec<Value>) {
		self.set_option(FUNC_ARGS, Value::List(args));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn join() -> Value {
		Value::callable(|args| {
			Ok(Value::from(
				args.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join("-"),
			))
		})
	}

	#[rstest]
	fn test_calls_with_args() {
		// Arrange
		let mut field = Field::callable(vec![Value::from("a"), Value::Int(1)]);

		// Act & Assert
		assert_eq!(field.dump(join()), Ok(Value::from("a-1")));
		field.set_args(vec![]);
		assert_eq!(field.dump(join()), Ok(Value::from("")));
	}

	#[rstest]
	fn test_no_load_cannot_be_disabled() {
		let field = Field::callable(vec![]).option(NO_LOAD, false);
		assert!(field.is_no_load());
		assert!(!field.is_no_dump());
	}

	#[rstest]
	fn test_non_callable_value() {
		let error = Field::callable(vec![]).dump(Value::Int(1)).unwrap_err();
		assert_eq!(error.to_string(), "Object of type int is not callable.");
	}

	#[rstest]
	fn test_call_failure_is_transform_error() {
		let failing = Value::callable(|_| Err("division by zero".to_string()));
		let error = Field::callable(vec![]).dump(failing).unwrap_err();
		assert_eq!(error, FieldError::transform("division by zero"));
	}
}
