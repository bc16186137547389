//! Outcome of a dump or load run
//!
//! A [`CatalystResult`] is the immutable record of one run: the data that
//! converted successfully, the errors keyed by field identifier (or item index
//! in batch mode), and the offending raw input under the same keys.

use crate::errors::FieldError;
use crate::value::Value;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::fmt;

/// Direction of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// In-memory value to external representation
	Dump,
	/// External representation to validated in-memory value
	Load,
}

impl Direction {
	pub fn as_str(&self) -> &'static str {
		match self {
			Direction::Dump => "dump",
			Direction::Load => "load",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Key of an error or invalid-data entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
	/// Field identifier or process name
	Name(String),
	/// Item position in batch mode
	Index(usize),
}

impl fmt::Display for ErrorKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ErrorKey::Name(name) => f.write_str(name),
			ErrorKey::Index(index) => write!(f, "{}", index),
		}
	}
}

impl From<&str> for ErrorKey {
	fn from(name: &str) -> Self {
		ErrorKey::Name(name.to_string())
	}
}

impl From<String> for ErrorKey {
	fn from(name: String) -> Self {
		ErrorKey::Name(name)
	}
}

impl From<usize> for ErrorKey {
	fn from(index: usize) -> Self {
		ErrorKey::Index(index)
	}
}

impl Serialize for ErrorKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			ErrorKey::Name(name) => serializer.serialize_str(name),
			ErrorKey::Index(index) => serializer.serialize_u64(*index as u64),
		}
	}
}

/// Ordered error mapping
pub type ErrorMap = IndexMap<ErrorKey, ErrorTree>;

/// A leaf error or the error mapping of a nested run
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorTree {
	Leaf(FieldError),
	Nested(ErrorMap),
}

impl ErrorTree {
	pub fn as_leaf(&self) -> Option<&FieldError> {
		match self {
			ErrorTree::Leaf(error) => Some(error),
			ErrorTree::Nested(_) => None,
		}
	}

	pub fn as_nested(&self) -> Option<&ErrorMap> {
		match self {
			ErrorTree::Nested(map) => Some(map),
			ErrorTree::Leaf(_) => None,
		}
	}

	/// Looks up a child entry of a nested tree
	pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&ErrorTree> {
		self.as_nested().and_then(|map| map.get(&key.into()))
	}

	/// Stringified form suitable for client display
	pub fn format(&self) -> serde_json::Value {
		match self {
			ErrorTree::Leaf(error) => serde_json::Value::String(error.to_string()),
			ErrorTree::Nested(map) => format_error_map(map),
		}
	}
}

impl From<FieldError> for ErrorTree {
	fn from(error: FieldError) -> Self {
		ErrorTree::Leaf(error)
	}
}

impl Serialize for ErrorTree {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			ErrorTree::Leaf(error) => serializer.collect_str(error),
			ErrorTree::Nested(map) => {
				let mut state = serializer.serialize_map(Some(map.len()))?;
				for (key, tree) in map {
					state.serialize_entry(key, tree)?;
				}
				state.end()
			}
		}
	}
}

fn format_error_map(map: &ErrorMap) -> serde_json::Value {
	serde_json::Value::Object(
		map.iter()
			.map(|(key, tree)| (key.to_string(), tree.format()))
			.collect(),
	)
}

/// Raw input echoed back for every failed key
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidData {
	/// The raw value itself
	Value(Value),
	/// Offending values keyed like the errors
	Map(IndexMap<ErrorKey, InvalidData>),
}

impl Default for InvalidData {
	fn default() -> Self {
		InvalidData::Map(IndexMap::new())
	}
}

impl InvalidData {
	pub fn is_empty(&self) -> bool {
		matches!(self, InvalidData::Map(map) if map.is_empty())
	}

	pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&InvalidData> {
		match self {
			InvalidData::Map(map) => map.get(&key.into()),
			InvalidData::Value(_) => None,
		}
	}

	pub fn as_value(&self) -> Option<&Value> {
		match self {
			InvalidData::Value(value) => Some(value),
			InvalidData::Map(_) => None,
		}
	}

	/// Inserts an entry, turning a raw value into a mapping first
	pub fn insert(&mut self, key: impl Into<ErrorKey>, data: InvalidData) {
		if let InvalidData::Value(_) = self {
			*self = InvalidData::default();
		}
		if let InvalidData::Map(map) = self {
			map.insert(key.into(), data);
		}
	}
}

impl From<Value> for InvalidData {
	fn from(value: Value) -> Self {
		InvalidData::Value(value)
	}
}

impl Serialize for InvalidData {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			InvalidData::Value(value) => value.serialize(serializer),
			InvalidData::Map(map) => {
				let mut state = serializer.serialize_map(Some(map.len()))?;
				for (key, data) in map {
					state.serialize_entry(key, data)?;
				}
				state.end()
			}
		}
	}
}

/// Immutable record of one dump or load run
///
/// # Examples
///
/// ```
/// use catalyst_core::{CatalystResult, Direction, ErrorMap, InvalidData, Value};
///
/// let result = CatalystResult::new(
///     Direction::Load,
///     Value::map([("name", "alice")]),
///     ErrorMap::new(),
///     InvalidData::default(),
/// );
/// assert!(result.is_valid());
/// assert_eq!(result.to_string(), r#"{"name": "alice"}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalystResult {
	direction: Direction,
	valid_data: Value,
	errors: ErrorMap,
	invalid_data: InvalidData,
}

impl CatalystResult {
	pub fn new(
		direction: Direction,
		valid_data: Value,
		errors: ErrorMap,
		invalid_data: InvalidData,
	) -> Self {
		Self {
			direction,
			valid_data,
			errors,
			invalid_data,
		}
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}

	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn valid_data(&self) -> &Value {
		&self.valid_data
	}

	pub fn errors(&self) -> &ErrorMap {
		&self.errors
	}

	pub fn invalid_data(&self) -> &InvalidData {
		&self.invalid_data
	}

	/// Looks up the error recorded under a field identifier or item index
	pub fn error(&self, key: impl Into<ErrorKey>) -> Option<&ErrorTree> {
		self.errors.get(&key.into())
	}

	pub fn into_valid_data(self) -> Value {
		self.valid_data
	}

	pub fn into_parts(self) -> (Value, ErrorMap, InvalidData) {
		(self.valid_data, self.errors, self.invalid_data)
	}

	/// Errors with every leaf stringified, keyed like [`errors`](Self::errors)
	pub fn format_errors(&self) -> serde_json::Value {
		format_error_map(&self.errors)
	}
}

impl fmt::Display for CatalystResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_valid() {
			write!(f, "{}", self.valid_data)
		} else {
			write!(f, "{}", self.format_errors())
		}
	}
}

impl Serialize for CatalystResult {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("CatalystResult", 4)?;
		state.serialize_field("is_valid", &self.is_valid())?;
		state.serialize_field("valid_data", &self.valid_data)?;
		state.serialize_field("errors", &self.errors)?;
		state.serialize_field("invalid_data", &self.invalid_data)?;
		state.end()
	}
}
