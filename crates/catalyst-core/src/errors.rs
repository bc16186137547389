//! Error taxonomy
//!
//! Failures are values. A validator rejection is a [`ValidationError`], a
//! per-field failure is a [`FieldError`], a construction problem is a
//! [`SetupError`], and a whole dump/load that was asked to raise produces a
//! [`CatalystError`] carrying the aggregated [`CatalystResult`].

use crate::result::{CatalystResult, Direction};
use thiserror::Error;

/// Message for a field marked required whose input was missing
pub const REQUIRED_MESSAGE: &str = "Missing data for required field.";
/// Message for a field that received null while `allow_none` is off
pub const NONE_MESSAGE: &str = "Field may not be None.";
/// Fallback when a message kind has no entry in a message table
pub const UNKNOWN_MESSAGE: &str = "Unknown error.";

/// Result type for validators
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type for schema construction
pub type SetupResult<T> = Result<T, SetupError>;

/// A validator rejected a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
	#[error("{message}")]
	TooShort {
		length: usize,
		min: usize,
		message: String,
	},
	#[error("{message}")]
	TooLong {
		length: usize,
		max: usize,
		message: String,
	},
	#[error("{message}")]
	TooSmall {
		value: String,
		min: String,
		message: String,
	},
	#[error("{message}")]
	TooLarge {
		value: String,
		max: String,
		message: String,
	},
	#[error("{message}")]
	PatternMismatch { pattern: String, message: String },
	#[error("Value of type {type_name} has no length.")]
	NotSized { type_name: &'static str },
	#[error("Cannot compare {left} with {right}.")]
	Incomparable {
		left: &'static str,
		right: &'static str,
	},
	#[error("{0}")]
	Custom(String),
}

impl ValidationError {
	/// Creates a free-form validation error
	pub fn custom(message: impl Into<String>) -> Self {
		ValidationError::Custom(message.into())
	}

	pub fn kind(&self) -> &'static str {
		match self {
			ValidationError::TooShort { .. } => "min_length",
			ValidationError::TooLong { .. } => "max_length",
			ValidationError::TooSmall { .. } => "min_value",
			ValidationError::TooLarge { .. } => "max_value",
			ValidationError::PatternMismatch { .. } => "pattern",
			ValidationError::NotSized { .. } => "not_sized",
			ValidationError::Incomparable { .. } => "incomparable",
			ValidationError::Custom(_) => "custom",
		}
	}
}

/// Failure of a single field, or of a hook, inside a dump/load run.
///
/// `Nested` carries the inner schema's aggregated result so that the outer
/// schema splices its errors and invalid data instead of wrapping them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
	#[error("{message}")]
	Required { message: String },
	#[error("{message}")]
	NoneNotAllowed { message: String },
	#[error(transparent)]
	Validator(#[from] ValidationError),
	#[error("{message}")]
	Transform { message: String },
	#[error("{message}")]
	Hook { message: String },
	#[error("{}", .0.format_errors())]
	Nested(Box<CatalystResult>),
}

impl FieldError {
	/// A formatter or parser failed to convert the value
	pub fn transform(message: impl Into<String>) -> Self {
		FieldError::Transform {
			message: message.into(),
		}
	}

	/// A pre or post hook rejected the data
	pub fn hook(message: impl Into<String>) -> Self {
		FieldError::Hook {
			message: message.into(),
		}
	}

	pub fn kind(&self) -> &'static str {
		match self {
			FieldError::Required { .. } => "required",
			FieldError::NoneNotAllowed { .. } => "none",
			FieldError::Validator(_) => "validator",
			FieldError::Transform { .. } => "transform",
			FieldError::Hook { .. } => "hook",
			FieldError::Nested(_) => "nested",
		}
	}

	/// The inner result of a failed nested schema, if this is one
	pub fn as_nested(&self) -> Option<&CatalystResult> {
		match self {
			FieldError::Nested(result) => Some(result),
			_ => None,
		}
	}
}

/// Invalid configuration detected while building a field or schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
	#[error("Field '{name}' does not exist.")]
	UnknownField { name: String },
	#[error("Attribute `{direction}_method` must be in ({expected}), got '{method}'.")]
	InvalidMethod {
		direction: Direction,
		method: String,
		expected: &'static str,
	},
	#[error("Option `{key}` expects {expected}.")]
	InvalidOption { key: String, expected: &'static str },
	#[error("Invalid pattern '{pattern}': {message}")]
	InvalidPattern { pattern: String, message: String },
}

/// Top-level error returned by schema operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalystError {
	/// The run produced errors and was asked to raise
	#[error("Invalid {} data: {}", .0.direction(), .0.format_errors())]
	Invalid(Box<CatalystResult>),
	#[error(transparent)]
	Setup(#[from] SetupError),
	/// Arguments could not be bound to parameter names
	#[error("Invalid arguments: {message}")]
	Arguments { message: String },
}

impl CatalystError {
	/// The aggregated result carried by an `Invalid` error
	pub fn result(&self) -> Option<&CatalystResult> {
		match self {
			CatalystError::Invalid(result) => Some(result),
			_ => None,
		}
	}

	pub fn into_result(self) -> Option<CatalystResult> {
		match self {
			CatalystError::Invalid(result) => Some(*result),
			_ => None,
		}
	}
}

impl From<CatalystResult> for CatalystError {
	fn from(result: CatalystResult) -> Self {
		CatalystError::Invalid(Box::new(result))
	}
}

/// Substitutes `{name}` placeholders in a message template.
///
/// Unknown placeholders are left untouched.
///
/// # Examples
///
/// ```
/// use catalyst_core::render_template;
///
/// let message = render_template("Ensure length >= {min}.", &[("min", 3.to_string())]);
/// assert_eq!(message, "Ensure length >= 3.");
/// ```
pub fn render_template(template: &str, params: &[(&str, String)]) -> String {
	let mut rendered = template.to_string();
	for (name, value) in params {
		let placeholder = format!("{{{}}}", name);
		if rendered.contains(&placeholder) {
			rendered = rendered.replace(&placeholder, value);
		}
	}
	rendered
}
