//! Reading field values out of input data
//!
//! Dumping reads from in-memory data, which may be a mapping or an object
//! exposing attributes. Loading reads from raw external data, which must be a
//! mapping.

use catalyst_core::{FieldError, FieldResult, Value};
use std::fmt;

/// Strategy for pulling a named value out of the data being processed
pub trait DataSource: Send + Sync + fmt::Debug {
	/// Returns the value stored under `name`; `None` when it is missing
	fn get(&self, data: &Value, name: &str) -> Option<Value>;

	/// Rejects data this source cannot read from at all
	fn check(&self, _data: &Value) -> FieldResult<()> {
		Ok(())
	}

	/// Like [`get`](Self::get), falling back to `default` when missing
	fn get_or(&self, data: &Value, name: &str, default: Option<Value>) -> Option<Value> {
		self.get(data, name).or(default)
	}
}

/// Reads mapping keys, or attributes of objects
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_schema::{AttrOrItemSource, DataSource};
///
/// let data = Value::map([("a", 1)]);
/// assert_eq!(AttrOrItemSource.get(&data, "a"), Some(Value::Int(1)));
/// assert_eq!(AttrOrItemSource.get(&data, "b"), None);
/// assert_eq!(AttrOrItemSource.get(&Value::Int(1), "a"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrOrItemSource;

impl DataSource for AttrOrItemSource {
	fn get(&self, data: &Value, name: &str) -> Option<Value> {
		match data {
			Value::Map(map) => map.get(name).cloned(),
			Value::Object(object) => object.get_attr(name),
			_ => None,
		}
	}
}

/// Reads mapping keys only; anything but a mapping is rejected
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemSource;

impl DataSource for ItemSource {
	fn get(&self, data: &Value, name: &str) -> Option<Value> {
		data.get(name).cloned()
	}

	fn check(&self, data: &Value) -> FieldResult<()> {
		match data {
			Value::Map(_) => Ok(()),
			other => Err(FieldError::transform(format!(
				"Expected a mapping, got {}.",
				other.type_name()
			))),
		}
	}
}
