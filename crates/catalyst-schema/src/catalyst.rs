//! The `Catalyst` orchestration engine
//!
//! A [`Catalyst`] owns a registry of fields and runs every dump or load
//! through the same flow: pre hook, per-field (or per-item) processing, post
//! hook. Field failures never escape the loop; they are collected into a
//! [`CatalystResult`], which is returned or, when `raise_error` resolves true,
//! carried by [`CatalystError::Invalid`].

use crate::args::ArgBinder;
use crate::definition::{FieldDecl, FieldSource, SchemaDefinition};
use crate::field::{Field, FieldMethod};
use crate::hooks::{HookKind, Hooks, NoHooks, run_hook};
use crate::naming::{self, NameFormatter};
use crate::source::{AttrOrItemSource, DataSource, ItemSource};
use catalyst_core::{
	CatalystError, CatalystResult, Direction, ErrorMap, ErrorTree, FieldError, FieldResult,
	InvalidData, Map, OptionBox, OptionLayer, SetupError, SetupResult, Value,
};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::sync::Arc;

const RAISE_ERROR: &str = "raise_error";
const ALL_ERRORS: &str = "all_errors";
const DUMP_METHOD: &str = "dump_method";
const LOAD_METHOD: &str = "load_method";

/// Names of every processing stage, usable as alias sources
pub const PROCESS_NAMES: [&str; 12] = [
	"pre_dump",
	"dump",
	"post_dump",
	"pre_dump_many",
	"dump_many",
	"post_dump_many",
	"pre_load",
	"load",
	"post_load",
	"pre_load_many",
	"load_many",
	"post_load_many",
];

fn base_options() -> OptionLayer<Value> {
	OptionLayer::new("Catalyst")
		.with(RAISE_ERROR, false)
		.with(ALL_ERRORS, true)
		.with(DUMP_METHOD, "dump")
		.with(LOAD_METHOD, "load")
}

fn main_process_name(direction: Direction, many: bool) -> &'static str {
	match (direction, many) {
		(Direction::Dump, false) => "dump",
		(Direction::Dump, true) => "dump_many",
		(Direction::Load, false) => "load",
		(Direction::Load, true) => "load_many",
	}
}

/// Per-call overrides of the schema options
///
/// Unset values fall back to the options the schema was built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOptions {
	pub raise_error: Option<bool>,
	pub all_errors: Option<bool>,
}

impl ProcessOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn raise_error(mut self, raise_error: bool) -> Self {
		self.raise_error = Some(raise_error);
		self
	}

	pub fn all_errors(mut self, all_errors: bool) -> Self {
		self.all_errors = Some(all_errors);
		self
	}
}

// A field prepared for one direction.
struct Slot {
	attr: String,
	field: Field,
	source: String,
	target: String,
}

struct Inner {
	name: String,
	fields: IndexMap<String, Field>,
	dump_slots: Vec<Slot>,
	load_slots: Vec<Slot>,
	opts: OptionBox<Value>,
	dump_method: FieldMethod,
	load_method: FieldMethod,
	aliases: IndexMap<String, String>,
	hooks: Arc<dyn Hooks>,
	dump_source: Arc<dyn DataSource>,
	load_source: Arc<dyn DataSource>,
}

/// Converts data in both directions through a registry of fields.
///
/// Cloning is cheap; clones share the same immutable registry, so one
/// instance can serve concurrent callers.
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_schema::{Catalyst, Field};
///
/// let catalyst = Catalyst::builder("User")
///     .field("name", Field::string().with_length(Some(1), None).load_required(true))
///     .field("age", Field::integer().load_default(0))
///     .build()
///     .unwrap();
///
/// let result = catalyst.load(Value::map([("name", "alice")])).unwrap();
/// assert!(result.is_valid());
/// assert_eq!(
///     result.valid_data(),
///     &Value::map([("name", Value::from("alice")), ("age", Value::Int(0))])
/// );
///
/// let result = catalyst.load(Value::map([("age", "x")])).unwrap();
/// assert!(!result.is_valid());
/// assert_eq!(result.errors().len(), 2);
/// ```
#[derive(Clone)]
pub struct Catalyst {
	inner: Arc<Inner>,
}

impl Catalyst {
	pub fn builder(name: impl Into<String>) -> CatalystBuilder {
		CatalystBuilder::new(name)
	}

	/// Builds a schema straight from a definition
	pub fn from_definition(definition: Arc<SchemaDefinition>) -> SetupResult<Self> {
		let name = definition.name().to_string();
		CatalystBuilder::new(name).definition(definition).build()
	}

	pub fn name(&self) -> &str {
		&self.inner.name
	}

	/// Every declared field, keyed by attribute name
	pub fn fields(&self) -> &IndexMap<String, Field> {
		&self.inner.fields
	}

	/// Attribute names of the fields used when dumping, in processing order
	pub fn dump_fields(&self) -> Vec<&str> {
		self.slot_names(Direction::Dump)
	}

	/// Attribute names of the fields used when loading, in processing order
	pub fn load_fields(&self) -> Vec<&str> {
		self.slot_names(Direction::Load)
	}

	/// Resolved schema options
	pub fn opts(&self) -> &OptionBox<Value> {
		&self.inner.opts
	}

	pub fn dump_method(&self) -> FieldMethod {
		self.inner.dump_method
	}

	pub fn load_method(&self) -> FieldMethod {
		self.inner.load_method
	}

	pub fn dump(&self, data: impl Into<Value>) -> Result<CatalystResult, CatalystError> {
		self.dump_with(data, ProcessOptions::new())
	}

	pub fn dump_with(
		&self,
		data: impl Into<Value>,
		options: ProcessOptions,
	) -> Result<CatalystResult, CatalystError> {
		self.process(Direction::Dump, false, data.into(), options)
	}

	pub fn load(&self, data: impl Into<Value>) -> Result<CatalystResult, CatalystError> {
		self.load_with(data, ProcessOptions::new())
	}

	pub fn load_with(
		&self,
		data: impl Into<Value>,
		options: ProcessOptions,
	) -> Result<CatalystResult, CatalystError> {
		self.process(Direction::Load, false, data.into(), options)
	}

	/// Dumps every item of a list; errors are keyed by item index
	pub fn dump_many(&self, data: impl Into<Value>) -> Result<CatalystResult, CatalystError> {
		self.dump_many_with(data, ProcessOptions::new())
	}

	pub fn dump_many_with(
		&self,
		data: impl Into<Value>,
		options: ProcessOptions,
	) -> Result<CatalystResult, CatalystError> {
		self.process(Direction::Dump, true, data.into(), options)
	}

	/// Loads every item of a list; errors are keyed by item index
	pub fn load_many(&self, data: impl Into<Value>) -> Result<CatalystResult, CatalystError> {
		self.load_many_with(data, ProcessOptions::new())
	}

	pub fn load_many_with(
		&self,
		data: impl Into<Value>,
		options: ProcessOptions,
	) -> Result<CatalystResult, CatalystError> {
		self.process(Direction::Load, true, data.into(), options)
	}

	/// Wraps `func` so that its arguments are dumped before every call
	pub fn dump_args<F, R, I, S>(&self, params: I, func: F) -> ArgBinder<F>
	where
		F: Fn(Map) -> R,
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		ArgBinder::new(self.clone(), Direction::Dump, params, func)
	}

	/// Wraps `func` so that its arguments are loaded before every call
	pub fn load_args<F, R, I, S>(&self, params: I, func: F) -> ArgBinder<F>
	where
		F: Fn(Map) -> R,
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		ArgBinder::new(self.clone(), Direction::Load, params, func)
	}

	/// Runs one flow and raises when it failed and `raise_error` resolves true
	pub(crate) fn process(
		&self,
		direction: Direction,
		many: bool,
		data: Value,
		options: ProcessOptions,
	) -> Result<CatalystResult, CatalystError> {
		let opts = &self.inner.opts;
		let raise_error = opts.get_bool(RAISE_ERROR, options.raise_error).unwrap_or(false);
		let all_errors = opts.get_bool(ALL_ERRORS, options.all_errors).unwrap_or(true);

		let result = self.run_flow(direction, many, data, all_errors);
		if !result.is_valid() {
			tracing::debug!(
				catalyst = %self.inner.name,
				process = main_process_name(direction, many),
				errors = result.errors().len(),
				"processing finished with errors"
			);
			if raise_error {
				return Err(CatalystError::Invalid(Box::new(result)));
			}
		}
		Ok(result)
	}

	fn run_flow(&self, direction: Direction, many: bool, data: Value, all_errors: bool) -> CatalystResult {
		let hooks = self.inner.hooks.as_ref();
		let original = data.clone();

		let pre = HookKind::pre(direction, many);
		let data = match run_hook(hooks, pre, self, data, &original) {
			Ok(data) => data,
			Err(error) => return self.stage_failure(direction, many, pre.error_key(), error, original),
		};

		let processed = if many {
			self.process_many(direction, data, all_errors)
		} else {
			self.process_one(direction, data, all_errors)
		};
		let (valid_data, errors, invalid_data) = match processed {
			Ok(parts) => parts,
			Err(error) => {
				let stage = main_process_name(direction, many);
				return self.stage_failure(direction, many, stage, error, original);
			}
		};
		if !errors.is_empty() {
			return CatalystResult::new(direction, valid_data, errors, invalid_data);
		}

		let post = HookKind::post(direction, many);
		match run_hook(hooks, post, self, valid_data, &original) {
			Ok(valid_data) => CatalystResult::new(direction, valid_data, errors, invalid_data),
			Err(error) => self.stage_failure(direction, many, post.error_key(), error, original),
		}
	}

	// A failed stage replaces the whole result.
	fn stage_failure(
		&self,
		direction: Direction,
		many: bool,
		stage: &str,
		error: FieldError,
		original: Value,
	) -> CatalystResult {
		let key = self
			.inner
			.aliases
			.get(stage)
			.map(String::as_str)
			.unwrap_or(stage);
		tracing::warn!(catalyst = %self.inner.name, stage, key, "{}", error);

		let mut errors = ErrorMap::new();
		errors.insert(key.into(), ErrorTree::Leaf(error));
		let valid_data = if many {
			Value::List(Vec::new())
		} else {
			Value::empty_map()
		};
		CatalystResult::new(direction, valid_data, errors, InvalidData::Value(original))
	}

	fn process_one(
		&self,
		direction: Direction,
		data: Value,
		all_errors: bool,
	) -> FieldResult<(Value, ErrorMap, InvalidData)> {
		let (slots, source, method) = match direction {
			Direction::Dump => (&self.inner.dump_slots, &self.inner.dump_source, self.inner.dump_method),
			Direction::Load => (&self.inner.load_slots, &self.inner.load_source, self.inner.load_method),
		};
		source.check(&data)?;

		let mut valid_data = Map::new();
		let mut errors = ErrorMap::new();
		let mut invalid_data = InvalidData::default();

		for slot in slots {
			let raw = source.get_or(&data, &slot.source, slot.field.default_for(direction));
			let Some(raw) = raw else {
				if slot.field.is_required(direction) {
					errors.insert(slot.source.as_str().into(), slot.field.required_error().into());
					if !all_errors {
						break;
					}
				}
				continue;
			};

			match slot.field.apply(method, raw.clone()) {
				Ok(value) => {
					valid_data.insert(slot.target.clone(), value);
				}
				Err(FieldError::Nested(result)) => {
					tracing::trace!(catalyst = %self.inner.name, field = %slot.source, "splicing nested result");
					let (nested_valid, nested_errors, nested_invalid) = result.into_parts();
					valid_data.insert(slot.target.clone(), nested_valid);
					errors.insert(slot.source.as_str().into(), ErrorTree::Nested(nested_errors));
					invalid_data.insert(slot.source.as_str(), nested_invalid);
				}
				Err(error) => {
					tracing::trace!(catalyst = %self.inner.name, field = %slot.source, "{}", error);
					errors.insert(slot.source.as_str().into(), ErrorTree::Leaf(error));
					invalid_data.insert(slot.source.as_str(), InvalidData::Value(raw));
				}
			}
			if !errors.is_empty() && !all_errors {
				break;
			}
		}

		Ok((Value::Map(valid_data), errors, invalid_data))
	}

	fn process_many(
		&self,
		direction: Direction,
		data: Value,
		all_errors: bool,
	) -> FieldResult<(Value, ErrorMap, InvalidData)> {
		let items = match data {
			Value::List(items) => items,
			other => {
				return Err(FieldError::transform(format!(
					"Expected a list, got {}.",
					other.type_name()
				)));
			}
		};

		let mut valid_data = Vec::with_capacity(items.len());
		let mut errors = ErrorMap::new();
		let mut invalid_data = InvalidData::default();

		for (index, item) in items.into_iter().enumerate() {
			let result = self.run_flow(direction, false, item, all_errors);
			let valid = result.is_valid();
			let (item_valid, item_errors, item_invalid) = result.into_parts();
			valid_data.push(item_valid);
			if !valid {
				errors.insert(index.into(), ErrorTree::Nested(item_errors));
				invalid_data.insert(index, item_invalid);
				if !all_errors {
					break;
				}
			}
		}

		Ok((Value::List(valid_data), errors, invalid_data))
	}

	fn slot_names(&self, direction: Direction) -> Vec<&str> {
		let slots = match direction {
			Direction::Dump => &self.inner.dump_slots,
			Direction::Load => &self.inner.load_slots,
		};
		slots.iter().map(|slot| slot.attr.as_str()).collect()
	}
}

impl fmt::Debug for Catalyst {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Catalyst")
			.field("name", &self.inner.name)
			.field("fields", &self.inner.fields.keys().collect::<Vec<_>>())
			.field("dump_method", &self.inner.dump_method)
			.field("load_method", &self.inner.load_method)
			.finish_non_exhaustive()
	}
}

/// Construction-time configuration of a [`Catalyst`]
///
/// Include lists (`fields`, `dump_fields`, `load_fields`) and exclude lists
/// combine like set operations: `used = declared & include - exclude`. A
/// direction-specific list replaces the general one for that direction.
pub struct CatalystBuilder {
	name: String,
	definition: Option<Arc<SchemaDefinition>>,
	declarations: Vec<(String, FieldDecl)>,
	options: OptionLayer<Value>,
	include: Option<Vec<String>>,
	dump_include: Option<Vec<String>>,
	load_include: Option<Vec<String>>,
	exclude: Option<Vec<String>>,
	dump_exclude: Option<Vec<String>>,
	load_exclude: Option<Vec<String>>,
	aliases: IndexMap<String, String>,
	hooks: Option<Arc<dyn Hooks>>,
	format_field_name: Option<NameFormatter>,
	format_field_key: Option<NameFormatter>,
	dump_source: Option<Arc<dyn DataSource>>,
	load_source: Option<Arc<dyn DataSource>>,
}

fn names<I, S>(names: I) -> Option<Vec<String>>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	Some(names.into_iter().map(Into::into).collect())
}

/// An empty include list selects every declared field
fn include_names<I, S>(names: I) -> Option<Vec<String>>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let names: Vec<String> = names.into_iter().map(Into::into).collect();
	(!names.is_empty()).then_some(names)
}

impl CatalystBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			options: OptionLayer::new(name.clone()),
			name,
			definition: None,
			declarations: Vec::new(),
			include: None,
			dump_include: None,
			load_include: None,
			exclude: None,
			dump_exclude: None,
			load_exclude: None,
			aliases: IndexMap::new(),
			hooks: None,
			format_field_name: None,
			format_field_key: None,
			dump_source: None,
			load_source: None,
		}
	}

	/// Starts from a definition's fields, options, naming, and hooks
	pub fn definition(mut self, definition: Arc<SchemaDefinition>) -> Self {
		self.definition = Some(definition);
		self
	}

	/// Declares a field after the definition's own fields
	pub fn field(mut self, attr: impl Into<String>, decl: impl Into<FieldDecl>) -> Self {
		self.declarations.push((attr.into(), decl.into()));
		self
	}

	/// Harvests every declaration of an external field source
	pub fn schema(mut self, source: &dyn FieldSource) -> Self {
		self.declarations.extend(source.field_decls());
		self
	}

	/// Include list for both directions
	pub fn fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.include = include_names(fields);
		self
	}

	pub fn dump_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.dump_include = include_names(fields);
		self
	}

	pub fn load_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.load_include = include_names(fields);
		self
	}

	/// Exclude list for both directions
	pub fn exclude<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude = names(fields);
		self
	}

	pub fn dump_exclude<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.dump_exclude = names(fields);
		self
	}

	pub fn load_exclude<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.load_exclude = names(fields);
		self
	}

	/// Sets a schema option such as `raise_error` or `dump_method`
	pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.options = self.options.with(key, value);
		self
	}

	pub fn raise_error(self, raise_error: bool) -> Self {
		self.option(RAISE_ERROR, raise_error)
	}

	pub fn all_errors(self, all_errors: bool) -> Self {
		self.option(ALL_ERRORS, all_errors)
	}

	/// One of `dump`, `format`, `validate`
	pub fn dump_method(self, method: &str) -> Self {
		self.option(DUMP_METHOD, method)
	}

	/// One of `load`, `parse`, `validate`
	pub fn load_method(self, method: &str) -> Self {
		self.option(LOAD_METHOD, method)
	}

	/// Records failures of the `process` stage under `alias`
	pub fn process_alias(mut self, process: impl Into<String>, alias: impl Into<String>) -> Self {
		self.aliases.insert(process.into(), alias.into());
		self
	}

	/// Records failures of a hook under `key` instead of the hook name
	pub fn hook_error_key(self, hook: HookKind, key: impl Into<String>) -> Self {
		self.process_alias(hook.error_key(), key)
	}

	pub fn hooks(mut self, hooks: impl Hooks + 'static) -> Self {
		self.hooks = Some(Arc::new(hooks));
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

	/// Replaces the getter used when dumping
	pub fn dump_source(mut self, source: impl DataSource + 'static) -> Self {
		self.dump_source = Some(Arc::new(source));
		self
	}

	/// Replaces the getter used when loading
	pub fn load_source(mut self, source: impl DataSource + 'static) -> Self {
		self.load_source = Some(Arc::new(source));
		self
	}

	/// Resolves the registry and validates the configuration
	///
	/// # Errors
	///
	/// - [`SetupError::UnknownField`] when an include or exclude list names an
	///   undeclared field.
	/// - [`SetupError::InvalidMethod`] for an unsupported field method.
	/// - [`SetupError::InvalidOption`] for an option of the wrong type or an
	///   alias of an unknown process.
	pub fn build(self) -> SetupResult<Catalyst> {
		let definition = self.definition.as_deref();

		let mut fields = match definition {
			Some(definition) => definition.fields()?,
			None => IndexMap::new(),
		};
		let format_name = self
			.format_field_name
			.or(definition.map(SchemaDefinition::name_formatter))
			.unwrap_or(naming::identity);
		let format_key = self
			.format_field_key
			.or(definition.map(SchemaDefinition::key_formatter))
			.unwrap_or(naming::identity);
		for (attr, decl) in self.declarations {
			let mut field = decl.into_field()?;
			field.bind(format_name(&attr), format_key(&attr));
			fields.insert(attr, field);
		}

		let mut layers = vec![base_options()];
		if let Some(definition) = definition {
			layers.extend(definition.option_layers());
		}
		layers.push(self.options);
		let opts = OptionBox::from_layers(layers);

		for key in [RAISE_ERROR, ALL_ERRORS] {
			if opts.resolve(key).is_some_and(|value| value.as_bool().is_none()) {
				return Err(SetupError::InvalidOption {
					key: key.to_string(),
					expected: "a boolean",
				});
			}
		}
		let dump_method = resolve_method(&opts, Direction::Dump)?;
		let load_method = resolve_method(&opts, Direction::Load)?;

		if let Some(process) = self
			.aliases
			.keys()
			.find(|process| !PROCESS_NAMES.contains(&process.as_str()))
		{
			return Err(SetupError::InvalidOption {
				key: format!("process_aliases.{}", process),
				expected: "a process name such as 'pre_dump' or 'load_many'",
			});
		}

		let dump_slots = slots(
			&fields,
			Direction::Dump,
			self.dump_include.as_ref().or(self.include.as_ref()),
			self.dump_exclude.as_ref().or(self.exclude.as_ref()),
		)?;
		let load_slots = slots(
			&fields,
			Direction::Load,
			self.load_include.as_ref().or(self.include.as_ref()),
			self.load_exclude.as_ref().or(self.exclude.as_ref()),
		)?;

		let hooks = self
			.hooks
			.or_else(|| definition.and_then(SchemaDefinition::effective_hooks))
			.unwrap_or_else(|| Arc::new(NoHooks));

		tracing::debug!(
			catalyst = %self.name,
			fields = fields.len(),
			dump_fields = dump_slots.len(),
			load_fields = load_slots.len(),
			"built field registry"
		);

		Ok(Catalyst {
			inner: Arc::new(Inner {
				name: self.name,
				fields,
				dump_slots,
				load_slots,
				opts,
				dump_method,
				load_method,
				aliases: self.aliases,
				hooks,
				dump_source: self.dump_source.unwrap_or_else(|| Arc::new(AttrOrItemSource)),
				load_source: self.load_source.unwrap_or_else(|| Arc::new(ItemSource)),
			}),
		})
	}
}

impl fmt::Debug for CatalystBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CatalystBuilder")
			.field("name", &self.name)
			.field("declarations", &self.declarations)
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

fn resolve_method(opts: &OptionBox<Value>, direction: Direction) -> SetupResult<FieldMethod> {
	let key = match direction {
		Direction::Dump => DUMP_METHOD,
		Direction::Load => LOAD_METHOD,
	};
	let method = opts.get_string(key).ok_or_else(|| SetupError::InvalidOption {
		key: key.to_string(),
		expected: "a method name",
	})?;
	FieldMethod::for_direction(direction, &method)
}

fn slots(
	fields: &IndexMap<String, Field>,
	direction: Direction,
	include: Option<&Vec<String>>,
	exclude: Option<&Vec<String>>,
) -> SetupResult<Vec<Slot>> {
	let unknown = include
		.into_iter()
		.chain(exclude)
		.flatten()
		.find(|name| !fields.contains_key(name.as_str()));
	if let Some(name) = unknown {
		return Err(SetupError::UnknownField { name: name.clone() });
	}

	let excluded: IndexSet<&str> = exclude.into_iter().flatten().map(String::as_str).collect();
	let included: IndexSet<&str> = match include {
		Some(include) => include.iter().map(String::as_str).collect(),
		None => fields.keys().map(String::as_str).collect(),
	};

	Ok(included
		.into_iter()
		.filter(|attr| !excluded.contains(attr))
		.filter_map(|attr| fields.get(attr).map(|field| (attr, field)))
		.filter(|(_, field)| !field.is_skipped(direction))
		.map(|(attr, field)| {
			let name = field.get_name().unwrap_or(attr).to_string();
			let key = field.get_key().unwrap_or(attr).to_string();
			let (source, target) = match direction {
				Direction::Dump => (name, key),
				Direction::Load => (key, name),
			};
			Slot {
				attr: attr.to_string(),
				field: field.clone(),
				source,
				target,
			}
		})
		.collect())
}
