//! Regular expression matching for string values

use crate::Validator;
use catalyst_core::{SetupError, SetupResult, ValidationError, ValidationResult, Value};
use regex::Regex;

const DEFAULT_MESSAGE: &str = "String does not match expected pattern.";

/// Ensures a string value matches a regular expression.
///
/// Non-string values never match.
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_validators::{PatternValidator, Validator};
///
/// let validator = PatternValidator::new(r"^\d{3}-\d{4}$").unwrap();
/// assert!(validator.validate(&Value::from("123-4567")).is_ok());
/// assert!(validator.validate(&Value::from("invalid")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternValidator {
	pattern: Regex,
	inverse_match: bool,
	message: String,
}

impl PatternValidator {
	/// Compiles the pattern.
	///
	/// # Errors
	///
	/// Returns [`SetupError::InvalidPattern`] if the pattern does not compile.
	pub fn new(pattern: &str) -> SetupResult<Self> {
		let regex = Regex::new(pattern).map_err(|e| SetupError::InvalidPattern {
			pattern: pattern.to_string(),
			message: e.to_string(),
		})?;
		Ok(Self {
			pattern: regex,
			inverse_match: false,
			message: DEFAULT_MESSAGE.to_string(),
		})
	}

	/// Validation fails when the pattern matches instead
	pub fn inverse_match(mut self) -> Self {
		self.inverse_match = true;
		self
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}

	pub fn as_str(&self) -> &str {
		self.pattern.as_str()
	}
}

impl Validator for PatternValidator {
	fn validate(&self, value: &Value) -> ValidationResult<()> {
		let matched = value
			.as_str()
			.is_some_and(|s| self.pattern.is_match(s));
		let accepted = value.as_str().is_some() && matched != self.inverse_match;
		if accepted {
			Ok(())
		} else {
			Err(ValidationError::PatternMismatch {
				pattern: self.pattern.as_str().to_string(),
				message: self.message.clone(),
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("abc123", true)]
	#[case("abc-123", false)]
	#[case("", false)]
	fn test_match(#[case] input: &str, #[case] ok: bool) {
		let validator = PatternValidator::new(r"^[a-z0-9]+$").unwrap();
		assert_eq!(validator.validate(&Value::from(input)).is_ok(), ok);
	}

	#[rstest]
	fn test_inverse_match_rejects_matches() {
		let validator = PatternValidator::new(r"[!@#]").unwrap().inverse_match();
		assert!(validator.validate(&Value::from("hello")).is_ok());
		assert!(validator.validate(&Value::from("hello!")).is_err());
	}

	#[rstest]
	fn test_non_string_never_matches() {
		let validator = PatternValidator::new(r".*").unwrap().inverse_match();
		assert!(validator.validate(&Value::Int(1)).is_err());
	}

	#[rstest]
	fn test_invalid_pattern_is_setup_error() {
		let error = PatternValidator::new("(").unwrap_err();
		assert!(matches!(error, SetupError::InvalidPattern { ref pattern, .. } if pattern == "("));
	}

	#[rstest]
	fn test_custom_message() {
		let validator = PatternValidator::new(r"^\d+$")
			.unwrap()
			.with_message("Digits only.");
		match validator.validate(&Value::from("abc")) {
			Err(ValidationError::PatternMismatch { message, pattern }) => {
				assert_eq!(message, "Digits only.");
				assert_eq!(pattern, r"^\d+$");
			}
			other => panic!("Expected PatternMismatch, got {:?}", other),
		}
	}
}
