//! String field

use crate::field::{Field, FieldKind};
use catalyst_core::{FieldResult, OptionLayer, Value};

fn to_string(_: &Field, value: Value) -> FieldResult<Value> {
	match value {
		Value::String(_) => Ok(value),
		other => Ok(Value::String(other.to_string())),
	}
}

impl Field {
	/// Field converting values to strings in both directions
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	/// use catalyst_schema::Field;
	///
	/// let field = Field::string().with_length(None, Some(3));
	/// assert_eq!(field.dump(Value::Float(1.5)), Ok(Value::from("1.5")));
	/// assert!(field.load(Value::from("abcd")).is_err());
	/// ```
	pub fn string() -> Self {
		let mut field = Field::with_kind(
			FieldKind::String,
			OptionLayer::new("StringField"),
			OptionLayer::new("StringField"),
		);
		field.set_formatter(to_string);
		field.set_parser(to_string);
		field
	}
}
