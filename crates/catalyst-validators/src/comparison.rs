//! Inclusive comparison bounds

use crate::Validator;
use catalyst_core::{
	OptionBox, OptionLayer, UNKNOWN_MESSAGE, ValidationError, ValidationResult, Value,
	render_template,
};
use std::cmp::Ordering;

/// Ensures `min <= value <= max` using the partial order of [`Value`].
///
/// Ints and floats compare with each other; temporal bounds only compare with
/// values of the same temporal kind. Incomparable operands are rejected.
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_validators::{ComparisonValidator, Validator};
///
/// let validator = ComparisonValidator::new(Some(Value::Int(0)), Some(Value::Float(1.5)));
/// assert!(validator.validate(&Value::Int(1)).is_ok());
/// assert_eq!(
///     validator.validate(&Value::Int(2)).unwrap_err().to_string(),
///     "Ensure value <= 1.5."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonValidator {
	min: Option<Value>,
	max: Option<Value>,
	messages: OptionBox<String>,
}

impl ComparisonValidator {
	pub fn new(min: Option<Value>, max: Option<Value>) -> Self {
		let defaults = OptionLayer::<String>::new("ComparisonValidator")
			.with("min_value", "Ensure value >= {min}.")
			.with("max_value", "Ensure value <= {max}.");
		Self {
			min,
			max,
			messages: OptionBox::from_layers([defaults]),
		}
	}

	pub fn min(min: impl Into<Value>) -> Self {
		Self::new(Some(min.into()), None)
	}

	pub fn max(max: impl Into<Value>) -> Self {
		Self::new(None, Some(max.into()))
	}

	/// Replaces the template for `min_value` or `max_value` failures
	pub fn with_message(mut self, kind: &str, template: impl Into<String>) -> Self {
		self.messages.set(kind, template.into());
		self
	}

	fn message(&self, kind: &str) -> String {
		self.messages
			.resolve(kind)
			.unwrap_or_else(|| UNKNOWN_MESSAGE.to_string())
	}
}

fn compare(value: &Value, bound: &Value) -> ValidationResult<Ordering> {
	value
		.compare(bound)
		.ok_or(ValidationError::Incomparable {
			left: value.type_name(),
			right: bound.type_name(),
		})
}

impl Validator for ComparisonValidator {
	fn validate(&self, value: &Value) -> ValidationResult<()> {
		if let Some(min) = &self.min
			&& compare(value, min)? == Ordering::Less
		{
			return Err(ValidationError::TooSmall {
				value: value.to_string(),
				min: min.to_string(),
				message: render_template(&self.message("min_value"), &[("min", min.to_string())]),
			});
		}
		if let Some(max) = &self.max
			&& compare(value, max)? == Ordering::Greater
		{
			return Err(ValidationError::TooLarge {
				value: value.to_string(),
				max: max.to_string(),
				message: render_template(&self.message("max_value"), &[("max", max.to_string())]),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use rstest::rstest;

	#[rstest]
	#[case(Value::Int(-1), true)]
	#[case(Value::Int(0), false)]
	#[case(Value::Float(5.5), false)]
	#[case(Value::Int(10), false)]
	#[case(Value::Float(10.01), true)]
	fn test_numeric_bounds_are_inclusive(#[case] value: Value, #[case] fails: bool) {
		let validator = ComparisonValidator::new(Some(Value::Int(0)), Some(Value::Int(10)));
		assert_eq!(validator.validate(&value).is_err(), fails);
	}

	#[rstest]
	fn test_too_small_reports_bound() {
		// Arrange
		let validator = ComparisonValidator::min(0);

		// Act
		let error = validator.validate(&Value::Int(-3)).unwrap_err();

		// Assert
		assert_eq!(error.kind(), "min_value");
		assert_eq!(error.to_string(), "Ensure value >= 0.");
	}

	#[rstest]
	fn test_date_bounds() {
		let validator = ComparisonValidator::new(
			Some(Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())),
			Some(Value::from(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap())),
		);

		assert!(validator
			.validate(&Value::from(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()))
			.is_ok());
		assert_eq!(
			validator
				.validate(&Value::from(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()))
				.unwrap_err()
				.to_string(),
			"Ensure value <= 2020-12-31."
		);
	}

	#[rstest]
	fn test_incomparable_operands() {
		let validator = ComparisonValidator::max(3);
		let error = validator.validate(&Value::from("3")).unwrap_err();
		assert_eq!(
			error,
			ValidationError::Incomparable {
				left: "string",
				right: "int",
			}
		);
	}

	#[rstest]
	fn test_custom_message_template() {
		let validator = ComparisonValidator::max(1).with_message("max_value", "At most {max}.");
		assert_eq!(
			validator.validate(&Value::Int(2)).unwrap_err().to_string(),
			"At most 1."
		);
	}
}
