//! Schema definitions
//!
//! A [`SchemaDefinition`] plays the role of a schema class body: an ordered
//! list of field declarations, ancestors whose declarations it inherits,
//! option defaults, name/key formatting and hooks. Definitions are immutable
//! once shared behind an `Arc`, so an ancestor chain can never loop back on
//! itself.

use crate::catalyst::Catalyst;
use crate::field::Field;
use crate::hooks::Hooks;
use crate::naming::{self, NameFormatter};
use catalyst_core::{OptionLayer, SetupResult, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Something declared under an attribute name
#[derive(Clone)]
pub enum FieldDecl {
	Field(Field),
	/// Wrapped in a nested field
	Catalyst(Catalyst),
	/// Built into a schema, then wrapped in a nested field
	Definition(Arc<SchemaDefinition>),
}

impl FieldDecl {
	/// Resolves the declaration into a field
	pub fn into_field(self) -> SetupResult<Field> {
		match self {
			FieldDecl::Field(field) => Ok(field),
			FieldDecl::Catalyst(catalyst) => Ok(Field::nested(catalyst)),
			FieldDecl::Definition(definition) => {
				Ok(Field::nested(Catalyst::from_definition(definition)?))
			}
		}
	}
}

impl fmt::Debug for FieldDecl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldDecl::Field(field) => f.debug_tuple("Field").field(field).finish(),
			FieldDecl::Catalyst(catalyst) => f.debug_tuple("Catalyst").field(&catalyst.name()).finish(),
			FieldDecl::Definition(definition) => {
				f.debug_tuple("Definition").field(&definition.name()).finish()
			}
		}
	}
}

impl From<Field> for FieldDecl {
	fn from(field: Field) -> Self {
		FieldDecl::Field(field)
	}
}

impl From<Catalyst> for FieldDecl {
	fn from(catalyst: Catalyst) -> Self {
		FieldDecl::Catalyst(catalyst)
	}
}

impl From<Arc<SchemaDefinition>> for FieldDecl {
	fn from(definition: Arc<SchemaDefinition>) -> Self {
		FieldDecl::Definition(definition)
	}
}

impl From<SchemaDefinition> for FieldDecl {
	fn from(definition: SchemaDefinition) -> Self {
		FieldDecl::Definition(Arc::new(definition))
	}
}

/// An external object acting as a source of field declarations
pub trait FieldSource {
	fn field_decls(&self) -> Vec<(String, FieldDecl)>;
}

impl FieldSource for IndexMap<String, Field> {
	fn field_decls(&self) -> Vec<(String, FieldDecl)> {
		self.iter()
			.map(|(attr, field)| (attr.clone(), FieldDecl::Field(field.clone())))
			.collect()
	}
}

impl FieldSource for IndexMap<String, FieldDecl> {
	fn field_decls(&self) -> Vec<(String, FieldDecl)> {
		self.iter()
			.map(|(attr, decl)| (attr.clone(), decl.clone()))
			.collect()
	}
}

impl<S: AsRef<str>, D: Clone + Into<FieldDecl>> FieldSource for Vec<(S, D)> {
	fn field_decls(&self) -> Vec<(String, FieldDecl)> {
		self.iter()
			.map(|(attr, decl)| (attr.as_ref().to_string(), decl.clone().into()))
			.collect()
	}
}

impl FieldSource for SchemaDefinition {
	fn field_decls(&self) -> Vec<(String, FieldDecl)> {
		self.declarations().into_iter().collect()
	}
}

impl FieldSource for Arc<SchemaDefinition> {
	fn field_decls(&self) -> Vec<(String, FieldDecl)> {
		self.as_ref().field_decls()
	}
}

/// Declarative description of a schema
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_schema::{Catalyst, Field, SchemaDefinition, naming::snake_to_camel};
/// use std::sync::Arc;
///
/// let base = Arc::new(
///     SchemaDefinition::new("Base")
///         .field("id", Field::integer())
///         .format_field_key(snake_to_camel),
/// );
/// let user = SchemaDefinition::new("User")
///     .extends(base)
///     .field("user_name", Field::string())
///     .option("raise_error", true);
///
/// let catalyst = Catalyst::from_definition(Arc::new(user)).unwrap();
/// let dumped = catalyst.dump(Value::map([("id", Value::Int(1)), ("user_name", Value::from("a"))])).unwrap();
///
/// assert_eq!(
///     dumped.valid_data(),
///     &Value::map([("id", Value::Int(1)), ("userName", Value::from("a"))])
/// );
/// ```
#[derive(Clone)]
pub struct SchemaDefinition {
	name: String,
	parents: Vec<Arc<SchemaDefinition>>,
	fields: Vec<(String, FieldDecl)>,
	options: OptionLayer<Value>,
	format_field_name: Option<NameFormatter>,
	format_field_key: Option<NameFormatter>,
	hooks: Option<Arc<dyn Hooks>>,
}

impl SchemaDefinition {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			options: OptionLayer::new(name.clone()),
			name,
			parents: Vec::new(),
			fields: Vec::new(),
			format_field_name: None,
			format_field_key: None,
			hooks: None,
		}
	}

	/// Inherits the declarations of `parent`; later parents win over earlier ones
	pub fn extends(mut self, parent: Arc<SchemaDefinition>) -> Self {
		self.parents.push(parent);
		self
	}

	/// Declares a field; redeclaring an attribute replaces it in place
	pub fn field(mut self, attr: impl Into<String>, decl: impl Into<FieldDecl>) -> Self {
		let attr = attr.into();
		let decl = decl.into();
		match self.fields.iter_mut().find(|(name, _)| *name == attr) {
			Some(entry) => entry.1 = decl,
			None => self.fields.push((attr, decl)),
		}
		self
	}

	/// Declares every field of an external source
	pub fn fields_from(mut self, source: &dyn FieldSource) -> Self {
		for (attr, decl) in source.field_decls() {
			self = self.field(attr, decl);
		}
		self
	}

	/// Default for a schema option such as `raise_error` or `dump_method`
	pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.options = self.options.with(key, value);
		self
	}

	pub fn format_field_name(mut self, formatter: NameFormatter) -> Self {
		self.format_field_name = Some(formatter);
		self
	}

	pub fn format_field_key(mut self, formatter: NameFormatter) -> Self {
		self.format_field_key = Some(formatter);
		self
	}

	pub fn hooks(mut self, hooks: impl Hooks + 'static) -> Self {
		self.hooks = Some(Arc::new(hooks));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn parents(&self) -> &[Arc<SchemaDefinition>] {
		&self.parents
	}

	/// Name formatter of this definition or its nearest ancestor declaring one
	pub fn name_formatter(&self) -> NameFormatter {
		self.inherited(|definition| definition.format_field_name)
			.unwrap_or(naming::identity)
	}

	/// Key formatter of this definition or its nearest ancestor declaring one
	pub fn key_formatter(&self) -> NameFormatter {
		self.inherited(|definition| definition.format_field_key)
			.unwrap_or(naming::identity)
	}

	/// Hooks of this definition or its nearest ancestor declaring some
	pub fn effective_hooks(&self) -> Option<Arc<dyn Hooks>> {
		self.inherited(|definition| definition.hooks.clone())
	}

	// Nearest declaration wins: self, then parents from the last declared.
	fn inherited<T>(&self, get: impl Fn(&SchemaDefinition) -> Option<T> + Copy) -> Option<T> {
		get(self).or_else(|| {
			self.parents
				.iter()
				.rev()
				.find_map(|parent| parent.inherited(get))
		})
	}

	/// Option layers from the oldest ancestor to this definition
	pub fn option_layers(&self) -> Vec<OptionLayer<Value>> {
		let mut layers: Vec<OptionLayer<Value>> = self
			.parents
			.iter()
			.flat_map(|parent| parent.option_layers())
			.collect();
		layers.push(self.options.clone());
		layers
	}

	/// Unbound declarations, ancestors first, with last-write-wins merging
	pub fn declarations(&self) -> IndexMap<String, FieldDecl> {
		let mut declarations = IndexMap::new();
		for parent in &self.parents {
			declarations.extend(parent.declarations());
		}
		for (attr, decl) in &self.fields {
			declarations.insert(attr.clone(), decl.clone());
		}
		declarations
	}

	/// Resolved fields, ancestors first, with last-write-wins merging.
	///
	/// Each definition names its own fields with its effective formatters, so
	/// inherited fields keep the identifiers their declaring definition gave
	/// them.
	pub fn fields(&self) -> SetupResult<IndexMap<String, Field>> {
		let mut fields = IndexMap::new();
		for parent in &self.parents {
			fields.extend(parent.fields()?);
		}
		let format_name = self.name_formatter();
		let format_key = self.key_formatter();
		for (attr, decl) in &self.fields {
			let mut field = decl.clone().into_field()?;
			field.bind(format_name(attr), format_key(attr));
			fields.insert(attr.clone(), field);
		}
		Ok(fields)
	}
}

impl fmt::Debug for SchemaDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaDefinition")
			.field("name", &self.name)
			.field("parents", &self.parents.iter().map(|p| p.name()).collect::<Vec<_>>())
			.field("fields", &self.fields.iter().map(|(attr, _)| attr).collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}
