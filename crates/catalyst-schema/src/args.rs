//! Argument validation for plain functions
//!
//! An [`ArgBinder`] binds positional and keyword arguments to an ordered list
//! of parameter names, runs them through a schema with `raise_error` forced
//! on, and calls the wrapped function with the validated values merged back
//! into the bound arguments.

use crate::catalyst::{Catalyst, ProcessOptions};
use catalyst_core::{CatalystError, Direction, Map, Value};
use std::fmt;

/// A function whose arguments are validated by a schema before every call
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_schema::{Catalyst, Field};
///
/// let catalyst = Catalyst::builder("Args")
///     .field("a", Field::integer())
///     .field("b", Field::integer())
///     .build()
///     .unwrap();
///
/// let add = catalyst.load_args(["a", "b"], |args| {
///     args["a"].as_i64().unwrap_or(0) + args["b"].as_i64().unwrap_or(0)
/// });
///
/// assert_eq!(add.call(vec![Value::from("1"), Value::Int(2)]).unwrap(), 3);
/// assert!(add.call(vec![Value::from("x"), Value::Int(2)]).is_err());
/// ```
pub struct ArgBinder<F> {
	catalyst: Catalyst,
	direction: Direction,
	params: Vec<String>,
	func: F,
}

impl<F, R> ArgBinder<F>
where
	F: Fn(Map) -> R,
{
	pub(crate) fn new<I, S>(catalyst: Catalyst, direction: Direction, params: I, func: F) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			catalyst,
			direction,
			params: params.into_iter().map(Into::into).collect(),
			func,
		}
	}

	/// Parameter names of the wrapped function, in order
	pub fn params(&self) -> &[String] {
		&self.params
	}

	/// Calls the function with positional arguments only
	pub fn call(&self, args: Vec<Value>) -> Result<R, CatalystError> {
		self.call_with(args, Map::new())
	}

	/// Calls the function with positional and keyword arguments
	///
	/// # Errors
	///
	/// - [`CatalystError::Arguments`] when the arguments cannot be bound.
	/// - [`CatalystError::Invalid`] when the bound arguments fail validation.
	pub fn call_with(&self, args: Vec<Value>, kwargs: Map) -> Result<R, CatalystError> {
		let mut bound = self.bind(args, kwargs)?;
		let result = self.catalyst.process(
			self.direction,
			false,
			Value::Map(bound.clone()),
			ProcessOptions::new().raise_error(true),
		)?;
		if let Value::Map(valid) = result.into_valid_data() {
			bound.extend(valid);
		}
		Ok((self.func)(bound))
	}

	fn bind(&self, args: Vec<Value>, kwargs: Map) -> Result<Map, CatalystError> {
		if args.len() > self.params.len() {
			return Err(CatalystError::Arguments {
				message: format!(
					"takes {} positional arguments but {} were given",
					self.params.len(),
					args.len()
				),
			});
		}

		let mut bound: Map = self.params.iter().cloned().zip(args).collect();
		for (name, value) in kwargs {
			if !self.params.contains(&name) {
				return Err(CatalystError::Arguments {
					message: format!("got an unexpected keyword argument '{}'", name),
				});
			}
			if bound.contains_key(&name) {
				return Err(CatalystError::Arguments {
					message: format!("got multiple values for argument '{}'", name),
				});
			}
			bound.insert(name, value);
		}
		Ok(bound)
	}
}

impl<F> fmt::Debug for ArgBinder<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArgBinder")
			.field("catalyst", &self.catalyst.name())
			.field("direction", &self.direction)
			.field("params", &self.params)
			.finish_non_exhaustive()
	}
}
