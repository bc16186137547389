//! Validators for Catalyst fields
//!
//! A validator is a stateless predicate over a [`Value`]: it returns `Ok(())`
//! when the value satisfies its constraint and a [`ValidationError`] otherwise.
//! Fields run their validators in order and stop at the first failure.
//!
//! Every message template can be replaced with `with_message(kind, template)`;
//! placeholders such as `{min}` and `{max}` are filled in when the error is
//! produced.

pub mod comparison;
pub mod length;
pub mod pattern;

pub use catalyst_core::{ValidationError, ValidationResult};
pub use comparison::ComparisonValidator;
pub use length::LengthValidator;
pub use pattern::PatternValidator;

use catalyst_core::Value;
use std::fmt;
use std::sync::Arc;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::comparison::*;
	pub use crate::length::*;
	pub use crate::pattern::*;
	pub use crate::{FnValidator, Validator};
	pub use catalyst_core::{ValidationError, ValidationResult};
}

/// Trait for validators
pub trait Validator: Send + Sync + fmt::Debug {
	fn validate(&self, value: &Value) -> ValidationResult<()>;
}

type ValidateFn = dyn Fn(&Value) -> ValidationResult<()> + Send + Sync;

/// Validator backed by a closure
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_validators::{FnValidator, ValidationError, Validator};
///
/// let even = FnValidator::new("even", |value| match value.as_i64() {
///     Some(i) if i % 2 == 0 => Ok(()),
///     _ => Err(ValidationError::custom("Ensure value is even.")),
/// });
/// assert!(even.validate(&Value::Int(4)).is_ok());
/// assert!(even.validate(&Value::Int(3)).is_err());
/// ```
#[derive(Clone)]
pub struct FnValidator {
	name: String,
	func: Arc<ValidateFn>,
}

impl FnValidator {
	pub fn new<F>(name: impl Into<String>, func: F) -> Self
	where
		F: Fn(&Value) -> ValidationResult<()> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			func: Arc::new(func),
		}
	}
}

impl fmt::Debug for FnValidator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnValidator")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

impl Validator for FnValidator {
	fn validate(&self, value: &Value) -> ValidationResult<()> {
		(self.func)(value)
	}
}
