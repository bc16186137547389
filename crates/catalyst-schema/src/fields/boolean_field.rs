//! Boolean field

use crate::field::{Field, FieldKind};
use catalyst_core::{OptionLayer, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Raw tokens read as `true` by default
pub const TRUE_VALUES: &[&str] = &["1", "y", "yes", "true", "True"];

/// Raw tokens read as `false` by default
pub const FALSE_VALUES: &[&str] = &["0", "n", "no", "false", "False"];

impl Field {
	/// Boolean field with the default token groups
	pub fn boolean() -> Self {
		Self::boolean_with(TRUE_VALUES, FALSE_VALUES)
	}

	/// Boolean field mapping the given raw tokens to `true` and `false`.
	///
	/// Strings found in the lookup table map to their boolean; anything else
	/// falls back to truthiness.
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	/// use catalyst_schema::Field;
	///
	/// let field = Field::boolean_with(&["on"], &["off"]);
	/// assert_eq!(field.load(Value::from("off")), Ok(Value::Bool(false)));
	/// assert_eq!(field.load(Value::from("no")), Ok(Value::Bool(true)));
	/// assert_eq!(field.load(Value::Int(0)), Ok(Value::Bool(false)));
	/// ```
	pub fn boolean_with(truthy: &[&str], falsy: &[&str]) -> Self {
		let lookup: HashMap<String, bool> = truthy
			.iter()
			.map(|raw| (raw.to_string(), true))
			.chain(falsy.iter().map(|raw| (raw.to_string(), false)))
			.collect();
		let lookup = Arc::new(lookup);

		let mut field = Field::with_kind(
			FieldKind::Bool,
			OptionLayer::new("BoolField"),
			OptionLayer::new("BoolField"),
		);
		let table = Arc::clone(&lookup);
		field.set_formatter(move |_, value| Ok(Value::Bool(to_bool(&table, &value))));
		field.set_parser(move |_, value| Ok(Value::Bool(to_bool(&lookup, &value))));
		field
	}
}

fn to_bool(lookup: &HashMap<String, bool>, value: &Value) -> bool {
	match value {
		Value::String(raw) => lookup.get(raw).copied().unwrap_or_else(|| value.is_truthy()),
		other => other.is_truthy(),
	}
}
