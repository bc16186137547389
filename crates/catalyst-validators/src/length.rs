//! Length bounds

use crate::Validator;
use catalyst_core::{
	OptionBox, OptionLayer, UNKNOWN_MESSAGE, ValidationError, ValidationResult, Value,
	render_template,
};

/// Ensures `min <= len(value) <= max`; either bound may be omitted.
///
/// Strings are measured in characters, lists and mappings by item count.
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_validators::{LengthValidator, Validator};
///
/// let validator = LengthValidator::new(Some(2), Some(4));
/// assert!(validator.validate(&Value::from("abc")).is_ok());
/// assert_eq!(
///     validator.validate(&Value::from("a")).unwrap_err().to_string(),
///     "Ensure length >= 2."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct LengthValidator {
	min: Option<usize>,
	max: Option<usize>,
	messages: OptionBox<String>,
}

impl LengthValidator {
	pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
		let defaults = OptionLayer::<String>::new("LengthValidator")
			.with("min_length", "Ensure length >= {min}.")
			.with("max_length", "Ensure length <= {max}.");
		Self {
			min,
			max,
			messages: OptionBox::from_layers([defaults]),
		}
	}

	pub fn min(min: usize) -> Self {
		Self::new(Some(min), None)
	}

	pub fn max(max: usize) -> Self {
		Self::new(None, Some(max))
	}

	/// Replaces the template for `min_length` or `max_length` failures
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

impl Validator for LengthValidator {
	fn validate(&self, value: &Value) -> ValidationResult<()> {
		let length = value.len().ok_or(ValidationError::NotSized {
			type_name: value.type_name(),
		})?;

		if let Some(min) = self.min
			&& length < min
		{
			return Err(ValidationError::TooShort {
				length,
				min,
				message: render_template(&self.message("min_length"), &[("min", min.to_string())]),
			});
		}
		if let Some(max) = self.max
			&& length > max
		{
			return Err(ValidationError::TooLong {
				length,
				max,
				message: render_template(&self.message("max_length"), &[("max", max.to_string())]),
			});
		}
		Ok(())
	}
}
