//! Dynamic value model
//!
//! Both sides of a conversion flow through [`Value`]: the in-memory side may
//! carry temporal values, callables and arbitrary objects, while the external
//! side is usually plain JSON-like data.
//!
//! An absent value (a key that is not present in the source data) is never a
//! `Value`. It is represented as `Option::<Value>::None` wherever a raw value or
//! a default is looked up, so [`Value::Null`] always means "present, but null".

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Ordered string-keyed mapping used for mapping values
pub type Map = IndexMap<String, Value>;

/// Result of invoking a [`Callable`]
pub type CallResult = Result<Value, String>;

type CallFn = dyn Fn(&[Value]) -> CallResult + Send + Sync;

/// An in-memory object exposing named attributes.
///
/// Dumping reads values either by mapping key or, for objects, through this
/// trait.
///
/// # Examples
///
/// ```
/// use catalyst_core::{Attributes, Value};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct User {
///     name: String,
/// }
///
/// impl Attributes for User {
///     fn get_attr(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::from(self.name.as_str())),
///             _ => None,
///         }
///     }
/// }
///
/// let value = Value::object(User { name: "alice".to_string() });
/// assert_eq!(value.type_name(), "object");
/// ```
pub trait Attributes: Send + Sync + fmt::Debug {
	/// Returns the attribute value, or `None` when the attribute does not exist
	fn get_attr(&self, name: &str) -> Option<Value>;
}

/// A shared function value, invoked by callable fields with fixed arguments
#[derive(Clone)]
pub struct Callable {
	func: Arc<CallFn>,
}

impl Callable {
	/// Wraps a function taking positional arguments
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::{Callable, Value};
	///
	/// let sum = Callable::new(|args| {
	///     Ok(Value::Int(args.iter().filter_map(Value::as_i64).sum()))
	/// });
	/// assert_eq!(sum.call(&[Value::Int(1), Value::Int(2)]), Ok(Value::Int(3)));
	/// ```
	pub fn new<F>(func: F) -> Self
	where
		F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
	{
		Self {
			func: Arc::new(func),
		}
	}

	pub fn call(&self, args: &[Value]) -> CallResult {
		(self.func)(args)
	}
}

impl fmt::Debug for Callable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Callable(..)")
	}
}

impl PartialEq for Callable {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.func, &other.func)
	}
}

/// Dynamic value passed through fields and schemas
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// Present but null
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	DateTime(NaiveDateTime),
	Date(NaiveDate),
	Time(NaiveTime),
	List(Vec<Value>),
	Map(Map),
	Callable(Callable),
	Object(Arc<dyn Attributes>),
}

impl Value {
	/// Wraps an object exposing attributes
	pub fn object<T: Attributes + 'static>(object: T) -> Self {
		Value::Object(Arc::new(object))
	}

	/// Wraps a function as a callable value
	pub fn callable<F>(func: F) -> Self
	where
		F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
	{
		Value::Callable(Callable::new(func))
	}

	/// Builds a mapping value from key/value pairs, keeping their order
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	///
	/// let value = Value::map([("a", 1), ("b", 2)]);
	/// assert_eq!(value.get("b"), Some(&Value::Int(2)));
	/// ```
	pub fn map<K, V, I>(entries: I) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
		I: IntoIterator<Item = (K, V)>,
	{
		Value::Map(
			entries
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}

	/// An empty mapping
	pub fn empty_map() -> Self {
		Value::Map(Map::new())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Truthiness: null, false, zero and empty containers are falsy
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	///
	/// assert!(!Value::from("").is_truthy());
	/// assert!(Value::from("xxx").is_truthy());
	/// assert!(!Value::List(vec![]).is_truthy());
	/// assert!(Value::Int(-1).is_truthy());
	/// ```
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Int(i) => *i != 0,
			Value::Float(f) => *f != 0.0,
			Value::String(s) => !s.is_empty(),
			Value::List(items) => !items.is_empty(),
			Value::Map(map) => !map.is_empty(),
			Value::DateTime(_)
			| Value::Date(_)
			| Value::Time(_)
			| Value::Callable(_)
			| Value::Object(_) => true,
		}
	}

	/// Short type name used in error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::DateTime(_) => "datetime",
			Value::Date(_) => "date",
			Value::Time(_) => "time",
			Value::List(_) => "list",
			Value::Map(_) => "map",
			Value::Callable(_) => "callable",
			Value::Object(_) => "object",
		}
	}

	/// Length of sized values; strings are measured in characters
	pub fn len(&self) -> Option<usize> {
		match self {
			Value::String(s) => Some(s.chars().count()),
			Value::List(items) => Some(items.len()),
			Value::Map(map) => Some(map.len()),
			_ => None,
		}
	}

	/// Looks up a key in a mapping value
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Map(map) => map.get(key),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Numeric view of ints and floats
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Int(i) => Some(*i as f64),
			Value::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Converts into JSON; callables and objects cannot be represented
	pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
		serde_json::to_value(self)
	}

	/// Partial ordering over comparable pairs.
	///
	/// Ints and floats compare numerically, strings lexicographically and
	/// temporal values only against the same temporal kind.
	pub fn compare(&self, other: &Value) -> Option<Ordering> {
		match (self, other) {
			(Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
			(Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
				self.as_f64()?.partial_cmp(&other.as_f64()?)
			}
			(Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
			(Value::String(a), Value::String(b)) => Some(a.cmp(b)),
			(Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
			(Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
			(Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
			_ => None,
		}
	}

	fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::String(s) => write!(f, "{:?}", s),
			other => write!(f, "{}", other),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
				self.as_f64() == other.as_f64()
			}
			(Value::String(a), Value::String(b)) => a == b,
			(Value::DateTime(a), Value::DateTime(b)) => a == b,
			(Value::Date(a), Value::Date(b)) => a == b,
			(Value::Time(a), Value::Time(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Callable(a), Value::Callable(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
			_ => false,
		}
	}
}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.compare(other)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Int(i) => write!(f, "{}", i),
			Value::Float(x) => write!(f, "{:?}", x),
			Value::String(s) => f.write_str(s),
			Value::DateTime(dt) => write!(f, "{}", dt),
			Value::Date(d) => write!(f, "{}", d),
			Value::Time(t) => write!(f, "{}", t),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					item.write_repr(f)?;
				}
				f.write_str("]")
			}
			Value::Map(map) => {
				f.write_str("{")?;
				for (i, (key, item)) in map.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{:?}: ", key)?;
					item.write_repr(f)?;
				}
				f.write_str("}")
			}
			Value::Callable(_) => f.write_str("<callable>"),
			Value::Object(_) => f.write_str("<object>"),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_none(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(i) => serializer.serialize_i64(*i),
			Value::Float(x) => serializer.serialize_f64(*x),
			Value::String(s) => serializer.serialize_str(s),
			Value::DateTime(dt) => serializer.collect_str(dt),
			Value::Date(d) => serializer.collect_str(d),
			Value::Time(t) => serializer.collect_str(t),
			Value::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Map(map) => {
				let mut out = serializer.serialize_map(Some(map.len()))?;
				for (key, item) in map {
					out.serialize_entry(key, item)?;
				}
				out.end()
			}
			Value::Callable(_) | Value::Object(_) => Err(S::Error::custom(format!(
				"{} values cannot be serialized",
				self.type_name()
			))),
		}
	}
}

/// Numbers that do not fit an `i64` (large unsigned integers included)
/// become `Value::Float` and may lose precision.
impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Int(i),
				None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => {
				Value::List(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => {
				Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Float(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(value: NaiveDateTime) -> Self {
		Value::DateTime(value)
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Value::Date(value)
	}
}

impl From<NaiveTime> for Value {
	fn from(value: NaiveTime) -> Self {
		Value::Time(value)
	}
}

impl From<Callable> for Value {
	fn from(value: Callable) -> Self {
		Value::Callable(value)
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Value::Map(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Value::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}
