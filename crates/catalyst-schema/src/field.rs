//! Field: a named, bidirectional conversion and validation unit
//!
//! A field converts one value in both directions. Dumping validates the
//! in-memory value and then formats it; loading parses the external value and
//! then validates the result. Each direction has its own required flag,
//! default, and skip flag.
//!
//! Options are kept in an [`OptionBox`] whose layers go from the base field
//! defaults, through the variant defaults (string, integer, ...), to the
//! values set with the builder methods.

use catalyst_core::{
	Direction, FieldError, FieldResult, NONE_MESSAGE, OptionBox, OptionDefault, OptionLayer,
	REQUIRED_MESSAGE, SetupError, SetupResult, UNKNOWN_MESSAGE, Value,
};
use catalyst_validators::{ComparisonValidator, LengthValidator, PatternValidator, Validator};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Formatter or parser of a field
///
/// The field is passed in so that a transform can read options such as `fmt`
/// and build errors from the field's message table.
pub type Transform = Arc<dyn Fn(&Field, Value) -> FieldResult<Value> + Send + Sync>;

pub(crate) const FORMAT_NONE: &str = "format_none";
pub(crate) const DUMP_REQUIRED: &str = "dump_required";
pub(crate) const DUMP_DEFAULT: &str = "dump_default";
pub(crate) const NO_DUMP: &str = "no_dump";
pub(crate) const PARSE_NONE: &str = "parse_none";
pub(crate) const LOAD_REQUIRED: &str = "load_required";
pub(crate) const LOAD_DEFAULT: &str = "load_default";
pub(crate) const NO_LOAD: &str = "no_load";
pub(crate) const ALLOW_NONE: &str = "allow_none";

/// Which variant a field was built as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	Raw,
	String,
	Float,
	Integer,
	Bool,
	Callable,
	DateTime,
	Date,
	Time,
	List,
	Nested,
}

/// Field operation a schema invokes per field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMethod {
	Dump,
	Format,
	Load,
	Parse,
	Validate,
}

impl FieldMethod {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldMethod::Dump => "dump",
			FieldMethod::Format => "format",
			FieldMethod::Load => "load",
			FieldMethod::Parse => "parse",
			FieldMethod::Validate => "validate",
		}
	}

	/// Parses a method name, accepting only the operations valid for `direction`
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Direction;
	/// use catalyst_schema::FieldMethod;
	///
	/// assert_eq!(FieldMethod::for_direction(Direction::Dump, "format"), Ok(FieldMethod::Format));
	/// assert!(FieldMethod::for_direction(Direction::Dump, "parse").is_err());
	/// ```
	pub fn for_direction(direction: Direction, method: &str) -> SetupResult<Self> {
		let expected = match direction {
			Direction::Dump => "'dump', 'format', 'validate'",
			Direction::Load => "'load', 'parse', 'validate'",
		};
		let invalid = || SetupError::InvalidMethod {
			direction,
			method: method.to_string(),
			expected,
		};
		let parsed = method.parse::<FieldMethod>().map_err(|_| invalid())?;
		match (direction, parsed) {
			(_, FieldMethod::Validate)
			| (Direction::Dump, FieldMethod::Dump | FieldMethod::Format)
			| (Direction::Load, FieldMethod::Load | FieldMethod::Parse) => Ok(parsed),
			_ => Err(invalid()),
		}
	}
}

impl FromStr for FieldMethod {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"dump" => Ok(FieldMethod::Dump),
			"format" => Ok(FieldMethod::Format),
			"load" => Ok(FieldMethod::Load),
			"parse" => Ok(FieldMethod::Parse),
			"validate" => Ok(FieldMethod::Validate),
			other => Err(format!("unknown field method '{}'", other)),
		}
	}
}

impl fmt::Display for FieldMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

fn identity(_: &Field, value: Value) -> FieldResult<Value> {
	Ok(value)
}

/// A single named conversion and validation unit
///
/// `name` is the attribute used on the in-memory side and `key` the one used
/// on the external side. Both stay unset until the field is declared in a
/// schema, which fills them from the declaration's attribute name.
///
/// # Examples
///
/// ```
/// use catalyst_core::Value;
/// use catalyst_schema::Field;
///
/// let field = Field::string().with_length(Some(2), None).allow_none(false);
///
/// assert_eq!(field.load(Value::Int(42)), Ok(Value::from("42")));
/// assert!(field.load(Value::from("x")).is_err());
/// assert_eq!(field.load(Value::Null).unwrap_err().kind(), "none");
/// ```
#[derive(Clone)]
pub struct Field {
	name: Option<String>,
	key: Option<String>,
	kind: FieldKind,
	formatter: Transform,
	parser: Transform,
	validators: Vec<Arc<dyn Validator>>,
	opts: OptionBox<Value>,
	messages: OptionBox<String>,
}

impl Default for Field {
	fn default() -> Self {
		Self::new()
	}
}

impl Field {
	/// A field with identity formatter and parser and no validators
	pub fn new() -> Self {
		Self::with_kind(FieldKind::Raw, OptionLayer::new("Field"), OptionLayer::new("Field"))
	}

	/// Builds a variant on top of the base defaults
	pub(crate) fn with_kind(
		kind: FieldKind,
		options: OptionLayer<Value>,
		messages: OptionLayer<String>,
	) -> Self {
		let base_options = OptionLayer::<Value>::new("Field")
			.with(FORMAT_NONE, false)
			.with(DUMP_REQUIRED, true)
			.with(NO_DUMP, false)
			.with(PARSE_NONE, false)
			.with(LOAD_REQUIRED, false)
			.with(NO_LOAD, false)
			.with(ALLOW_NONE, true);
		let base_messages = OptionLayer::<String>::new("Field")
			.with("required", REQUIRED_MESSAGE)
			.with("none", NONE_MESSAGE);
		Self {
			name: None,
			key: None,
			kind,
			formatter: Arc::new(identity),
			parser: Arc::new(identity),
			validators: Vec::new(),
			opts: OptionBox::from_layers([base_options, options]),
			messages: OptionBox::from_layers([base_messages, messages]),
		}
	}

	// Builders

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	pub fn dump_required(self, required: bool) -> Self {
		self.option(DUMP_REQUIRED, required)
	}

	pub fn load_required(self, required: bool) -> Self {
		self.option(LOAD_REQUIRED, required)
	}

	/// Value substituted when the field is missing from dumped data
	pub fn dump_default(self, default: impl Into<Value>) -> Self {
		self.option(DUMP_DEFAULT, default)
	}

	/// Default produced on every dump where the field is missing
	pub fn dump_default_with<F>(mut self, factory: F) -> Self
	where
		F: Fn() -> Value + Send + Sync + 'static,
	{
		self.opts.set_default(DUMP_DEFAULT, OptionDefault::factory(factory));
		self
	}

	/// Value substituted when the field is missing from loaded data
	pub fn load_default(self, default: impl Into<Value>) -> Self {
		self.option(LOAD_DEFAULT, default)
	}

	/// Default produced on every load where the field is missing
	pub fn load_default_with<F>(mut self, factory: F) -> Self
	where
		F: Fn() -> Value + Send + Sync + 'static,
	{
		self.opts.set_default(LOAD_DEFAULT, OptionDefault::factory(factory));
		self
	}

	/// Excludes the field from dumping
	pub fn no_dump(self) -> Self {
		self.option(NO_DUMP, true)
	}

	/// Excludes the field from loading
	pub fn no_load(self) -> Self {
		self.option(NO_LOAD, true)
	}

	pub fn allow_none(self, allow: bool) -> Self {
		self.option(ALLOW_NONE, allow)
	}

	/// Passes null values through the formatter instead of returning them unchanged
	pub fn format_none(self, format: bool) -> Self {
		self.option(FORMAT_NONE, format)
	}

	/// Passes null values through the parser instead of returning them unchanged
	pub fn parse_none(self, parse: bool) -> Self {
		self.option(PARSE_NONE, parse)
	}

	/// Sets an arbitrary option, e.g. a variant-specific one such as `fmt`
	pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.opts.set(key, value.into());
		self
	}

	pub fn with_formatter<F>(mut self, formatter: F) -> Self
	where
		F: Fn(&Field, Value) -> FieldResult<Value> + Send + Sync + 'static,
	{
		self.set_formatter(formatter);
		self
	}

	pub fn with_parser<F>(mut self, parser: F) -> Self
	where
		F: Fn(&Field, Value) -> FieldResult<Value> + Send + Sync + 'static,
	{
		self.set_parser(parser);
		self
	}

	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.add_validator(validator);
		self
	}

	/// Adds a [`LengthValidator`]
	pub fn with_length(self, min: Option<usize>, max: Option<usize>) -> Self {
		self.with_validator(LengthValidator::new(min, max))
	}

	/// Adds a [`ComparisonValidator`]
	pub fn with_range(self, min: Option<Value>, max: Option<Value>) -> Self {
		self.with_validator(ComparisonValidator::new(min, max))
	}

	/// Adds a [`PatternValidator`]
	///
	/// # Errors
	///
	/// Returns [`SetupError::InvalidPattern`] if the pattern does not compile.
	pub fn with_pattern(self, pattern: &str) -> SetupResult<Self> {
		Ok(self.with_validator(PatternValidator::new(pattern)?))
	}

	/// Overrides the message used for an error kind such as `required` or `none`
	pub fn error_message(mut self, kind: &str, message: impl Into<String>) -> Self {
		self.messages.set(kind, message.into());
		self
	}

	// Setup-time mutators

	pub fn set_formatter<F>(&mut self, formatter: F)
	where
		F: Fn(&Field, Value) -> FieldResult<Value> + Send + Sync + 'static,
	{
		self.formatter = Arc::new(formatter);
	}

	pub fn set_parser<F>(&mut self, parser: F)
	where
		F: Fn(&Field, Value) -> FieldResult<Value> + Send + Sync + 'static,
	{
		self.parser = Arc::new(parser);
	}

	/// Replaces every validator
	pub fn set_validators(&mut self, validators: Vec<Arc<dyn Validator>>) {
		self.validators = validators;
	}

	pub fn add_validator(&mut self, validator: impl Validator + 'static) {
		self.validators.push(Arc::new(validator));
	}

	pub fn set_option(&mut self, key: &str, value: impl Into<Value>) {
		self.opts.set(key, value.into());
	}

	/// Fills `name` and `key` where they are still unset
	pub(crate) fn bind(&mut self, name: String, key: String) {
		if self.name.is_none() {
			self.name = Some(name);
		}
		if self.key.is_none() {
			self.key = Some(key);
		}
	}

	// Accessors

	pub fn get_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn get_key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn validators(&self) -> &[Arc<dyn Validator>] {
		&self.validators
	}

	pub fn options(&self) -> &OptionBox<Value> {
		&self.opts
	}

	/// Resolves an option; `None` when it was never declared
	pub fn get_option(&self, key: &str) -> Option<Value> {
		self.opts.resolve(key)
	}

	fn flag(&self, key: &str) -> bool {
		self.opts.get_bool(key, None).unwrap_or(false)
	}

	pub fn is_dump_required(&self) -> bool {
		self.flag(DUMP_REQUIRED)
	}

	pub fn is_load_required(&self) -> bool {
		self.flag(LOAD_REQUIRED)
	}

	pub fn is_no_dump(&self) -> bool {
		self.flag(NO_DUMP)
	}

	/// Callable fields are dump-only whatever their options say
	pub fn is_no_load(&self) -> bool {
		self.kind == FieldKind::Callable || self.flag(NO_LOAD)
	}

	pub fn allows_none(&self) -> bool {
		self.flag(ALLOW_NONE)
	}

	pub fn is_required(&self, direction: Direction) -> bool {
		match direction {
			Direction::Dump => self.is_dump_required(),
			Direction::Load => self.is_load_required(),
		}
	}

	pub fn is_skipped(&self, direction: Direction) -> bool {
		match direction {
			Direction::Dump => self.is_no_dump(),
			Direction::Load => self.is_no_load(),
		}
	}

	/// Resolved dump default; `None` means missing
	pub fn get_dump_default(&self) -> Option<Value> {
		self.opts.resolve(DUMP_DEFAULT)
	}

	/// Resolved load default; `None` means missing
	pub fn get_load_default(&self) -> Option<Value> {
		self.opts.resolve(LOAD_DEFAULT)
	}

	pub fn default_for(&self, direction: Direction) -> Option<Value> {
		match direction {
			Direction::Dump => self.get_dump_default(),
			Direction::Load => self.get_load_default(),
		}
	}

	/// Message for an error kind, falling back to a generic message
	pub fn error(&self, kind: &str) -> String {
		self.messages
			.resolve(kind)
			.unwrap_or_else(|| UNKNOWN_MESSAGE.to_string())
	}

	pub fn required_error(&self) -> FieldError {
		FieldError::Required {
			message: self.error("required"),
		}
	}

	/// Transform error built from the message table
	pub(crate) fn transform_error(&self, kind: &str, params: &[(&str, String)]) -> FieldError {
		FieldError::transform(catalyst_core::render_template(&self.error(kind), params))
	}

	// Operations

	/// Passes null through when allowed, otherwise runs every validator in order
	pub fn validate(&self, value: Value) -> FieldResult<Value> {
		if value.is_null() {
			if self.allows_none() {
				return Ok(value);
			}
			return Err(FieldError::NoneNotAllowed {
				message: self.error("none"),
			});
		}
		for validator in &self.validators {
			validator.validate(&value)?;
		}
		Ok(value)
	}

	pub fn format(&self, value: Value) -> FieldResult<Value> {
		if value.is_null() && !self.flag(FORMAT_NONE) {
			return Ok(value);
		}
		(self.formatter)(self, value)
	}

	pub fn parse(&self, value: Value) -> FieldResult<Value> {
		if value.is_null() && !self.flag(PARSE_NONE) {
			return Ok(value);
		}
		(self.parser)(self, value)
	}

	/// Validates, then formats
	pub fn dump(&self, value: Value) -> FieldResult<Value> {
		let value = self.validate(value)?;
		self.format(value)
	}

	/// Parses, then validates
	pub fn load(&self, value: Value) -> FieldResult<Value> {
		let value = self.parse(value)?;
		self.validate(value)
	}

	pub fn apply(&self, method: FieldMethod, value: Value) -> FieldResult<Value> {
		match method {
			FieldMethod::Dump => self.dump(value),
			FieldMethod::Format => self.format(value),
			FieldMethod::Load => self.load(value),
			FieldMethod::Parse => self.parse(value),
			FieldMethod::Validate => self.validate(value),
		}
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("key", &self.key)
			.field("kind", &self.kind)
			.field("validators", &self.validators)
			.field("opts", &self.opts)
			.finish_non_exhaustive()
	}
}
