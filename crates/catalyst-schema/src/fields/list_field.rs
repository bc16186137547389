//! List field: maps an item field over every element

use crate::field::{Field, FieldKind};
use catalyst_core::{FieldResult, OptionLayer, Value};

fn items(field: &Field, value: Value) -> FieldResult<Vec<Value>> {
	match value {
		Value::List(items) => Ok(items),
		other => Err(field.transform_error("not_a_list", &[("type", other.type_name().to_string())])),
	}
}

impl Field {
	/// List of values converted by `item`.
	///
	/// The first failing element fails the whole field; errors are not
	/// collected per element.
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	/// use catalyst_schema::Field;
	///
	/// let field = Field::list(Field::integer());
	/// assert_eq!(
	///     field.load(Value::from(vec!["1", "2"])),
	///     Ok(Value::from(vec![1, 2]))
	/// );
	/// assert!(field.load(Value::from(vec!["1", "x"])).is_err());
	/// ```
	pub fn list(item: Field) -> Self {
		let mut field = Field::with_kind(
			FieldKind::List,
			OptionLayer::new("ListField"),
			OptionLayer::<String>::new("ListField").with("not_a_list", "Expected a list, got {type}."),
		);
		let dump_item = item.clone();
		field.set_formatter(move |field, value| {
			items(field, value)?
				.into_iter()
				.map(|element| dump_item.dump(element))
				.collect::<FieldResult<Vec<_>>>()
				.map(Value::List)
		});
		field.set_parser(move |field, value| {
			items(field, value)?
				.into_iter()
				.map(|element| item.load(element))
				.collect::<FieldResult<Vec<_>>>()
				.map(Value::List)
		});
		field
	}
}
