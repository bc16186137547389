//! Layered option tables
//!
//! An [`OptionBox`] resolves configuration the way class attributes resolve
//! through an inheritance chain: layers are applied from the most general to
//! the most specific, and the last layer that declares a key wins. Per-call
//! overrides take precedence over every layer.
//!
//! # Examples
//!
//! ```
//! use catalyst_core::{OptionBox, OptionLayer};
//!
//! let base = OptionLayer::<bool>::new("Field")
//!     .with("allow_none", true)
//!     .with("dump_required", true);
//! let callable = OptionLayer::<bool>::new("CallableField").with("dump_required", false);
//!
//! let opts = OptionBox::from_layers([base, callable]);
//! assert_eq!(opts.resolve("dump_required"), Some(false));
//! assert_eq!(opts.get("allow_none", Some(false)), Some(false));
//! assert_eq!(opts.resolve("no_such_option"), None);
//! ```

use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

type Factory<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A declared default: either a plain value or a producer evaluated on every access
pub enum OptionDefault<T> {
	Value(T),
	Factory(Factory<T>),
}

impl<T: Clone> OptionDefault<T> {
	/// Wraps a producer so that every access yields a fresh value
	pub fn factory<F>(factory: F) -> Self
	where
		F: Fn() -> T + Send + Sync + 'static,
	{
		OptionDefault::Factory(Arc::new(factory))
	}

	pub fn resolve(&self) -> T {
		match self {
			OptionDefault::Value(value) => value.clone(),
			OptionDefault::Factory(factory) => factory(),
		}
	}
}

impl<T: Clone> Clone for OptionDefault<T> {
	fn clone(&self) -> Self {
		match self {
			OptionDefault::Value(value) => OptionDefault::Value(value.clone()),
			OptionDefault::Factory(factory) => OptionDefault::Factory(Arc::clone(factory)),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for OptionDefault<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
			OptionDefault::Factory(_) => f.write_str("Factory(..)"),
		}
	}
}

/// One level of declared defaults
#[derive(Clone, Debug)]
pub struct OptionLayer<T> {
	name: String,
	entries: Vec<(String, OptionDefault<T>)>,
}

impl<T: Clone> OptionLayer<T> {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			entries: Vec::new(),
		}
	}

	/// Declares a plain default value
	pub fn with(mut self, key: impl Into<String>, value: impl Into<T>) -> Self {
		self.set(key, OptionDefault::Value(value.into()));
		self
	}

	/// Declares a default produced on every access
	pub fn with_factory<F>(mut self, key: impl Into<String>, factory: F) -> Self
	where
		F: Fn() -> T + Send + Sync + 'static,
	{
		self.set(key, OptionDefault::factory(factory));
		self
	}

	/// Declares or replaces a default within this layer
	pub fn set(&mut self, key: impl Into<String>, default: OptionDefault<T>) {
		let key = key.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => entry.1 = default,
			None => self.entries.push((key, default)),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionDefault<T>)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}
}

/// Flattened option table built from layers ordered general to specific
#[derive(Clone, Debug)]
pub struct OptionBox<T> {
	layers: Vec<String>,
	table: IndexMap<String, OptionDefault<T>>,
}

impl<T: Clone> Default for OptionBox<T> {
	fn default() -> Self {
		Self {
			layers: Vec::new(),
			table: IndexMap::new(),
		}
	}
}

impl<T: Clone> OptionBox<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Flattens layers once; later layers overwrite keys of earlier ones
	pub fn from_layers<I>(layers: I) -> Self
	where
		I: IntoIterator<Item = OptionLayer<T>>,
	{
		let mut options = Self::new();
		for layer in layers {
			options.push_layer(layer);
		}
		options
	}

	/// Applies a more specific layer on top of the current table
	pub fn push_layer(&mut self, layer: OptionLayer<T>) {
		self.layers.push(layer.name);
		for (key, default) in layer.entries {
			self.table.insert(key, default);
		}
	}

	/// Returns a copy with an extra, most specific layer applied
	pub fn with_overrides(&self, layer: OptionLayer<T>) -> Self {
		let mut options = self.clone();
		options.push_layer(layer);
		options
	}

	/// Resolves `key`, letting a set override win over the declared default.
	///
	/// `None` means the key is absent from every layer and was not overridden.
	pub fn get(&self, key: &str, override_value: Option<T>) -> Option<T> {
		override_value.or_else(|| self.resolve(key))
	}

	/// Resolves the declared default of `key`, evaluating factories
	pub fn resolve(&self, key: &str) -> Option<T> {
		self.table.get(key).map(OptionDefault::resolve)
	}

	/// Resolves every declared key, applying the given overrides
	pub fn resolve_all<'a, I>(&self, overrides: I) -> IndexMap<String, T>
	where
		T: 'a,
		I: IntoIterator<Item = (&'a str, T)>,
	{
		let mut resolved: IndexMap<String, T> = self
			.table
			.iter()
			.map(|(key, default)| (key.clone(), default.resolve()))
			.collect();
		for (key, value) in overrides {
			resolved.insert(key.to_string(), value);
		}
		resolved
	}

	pub fn set(&mut self, key: impl Into<String>, value: T) {
		self.table.insert(key.into(), OptionDefault::Value(value));
	}

	pub fn set_default(&mut self, key: impl Into<String>, default: OptionDefault<T>) {
		self.table.insert(key.into(), default);
	}

	/// Makes `key` absent again
	pub fn remove(&mut self, key: &str) -> bool {
		self.table.shift_remove(key).is_some()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.table.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.table.keys().map(String::as_str)
	}

	/// Names of the layers applied so far, general first
	pub fn layer_names(&self) -> &[String] {
		&self.layers
	}
}

impl OptionBox<Value> {
	/// Resolves a boolean option; non-boolean values count as absent
	pub fn get_bool(&self, key: &str, override_value: Option<bool>) -> Option<bool> {
		override_value.or_else(|| self.resolve(key).and_then(|value| value.as_bool()))
	}

	/// Resolves a string option; non-string values count as absent
	pub fn get_string(&self, key: &str) -> Option<String> {
		match self.resolve(key) {
			Some(Value::String(s)) => Some(s),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicI64, Ordering};

	fn field_layer() -> OptionLayer<Value> {
		OptionLayer::<Value>::new("Field")
			.with("dump_required", true)
			.with("load_required", false)
			.with("allow_none", true)
	}

	#[rstest]
	fn test_specific_layer_overrides_general_layer() {
		// Arrange
		let specific = OptionLayer::<Value>::new("CallableField").with("load_required", true);

		// Act
		let opts = OptionBox::from_layers([field_layer(), specific]);

		// Assert
		assert_eq!(opts.resolve("load_required"), Some(Value::Bool(true)));
		assert_eq!(opts.resolve("dump_required"), Some(Value::Bool(true)));
		assert_eq!(opts.layer_names(), ["Field", "CallableField"]);
	}

	#[rstest]
	fn test_override_wins_over_default() {
		let opts = OptionBox::from_layers([field_layer()]);

		assert_eq!(opts.get_bool("allow_none", Some(false)), Some(false));
		assert_eq!(opts.get_bool("allow_none", None), Some(true));
	}

	#[rstest]
	fn test_null_is_not_absent() {
		let opts = OptionBox::from_layers([OptionLayer::<Value>::new("Field").with("load_default", Value::Null)]);

		assert_eq!(opts.resolve("load_default"), Some(Value::Null));
		assert_eq!(opts.resolve("dump_default"), None);
		assert!(opts.contains("load_default"));
	}

	#[rstest]
	fn test_factory_is_evaluated_on_each_access() {
		// Arrange
		let counter = Arc::new(AtomicI64::new(0));
		let shared = Arc::clone(&counter);
		let layer = OptionLayer::<Value>::new("Field").with_factory("now", move || {
			Value::Int(shared.fetch_add(1, Ordering::SeqCst))
		});
		let opts = OptionBox::from_layers([layer]);

		// Act & Assert
		assert_eq!(opts.resolve("now"), Some(Value::Int(0)));
		assert_eq!(opts.resolve("now"), Some(Value::Int(1)));
		assert_eq!(counter.load(Ordering::SeqCst), 2);
	}

	#[rstest]
	fn test_with_overrides_leaves_original_untouched() {
		let opts = OptionBox::from_layers([field_layer()]);
		let overridden = opts.with_overrides(OptionLayer::<Value>::new("instance").with("allow_none", false));

		assert_eq!(opts.get_bool("allow_none", None), Some(true));
		assert_eq!(overridden.get_bool("allow_none", None), Some(false));
	}

	#[rstest]
	fn test_resolve_all_applies_overrides() {
		let opts = OptionBox::from_layers([field_layer()]);

		let resolved = opts.resolve_all([("allow_none", Value::Bool(false))]);

		assert_eq!(resolved.len(), 3);
		assert_eq!(resolved["allow_none"], Value::Bool(false));
		assert_eq!(resolved["dump_required"], Value::Bool(true));
	}

	#[rstest]
	fn test_remove_makes_key_absent() {
		let mut opts = OptionBox::from_layers([field_layer()]);
		assert!(opts.remove("allow_none"));
		assert!(!opts.remove("allow_none"));
		assert_eq!(opts.resolve("allow_none"), None);
	}

	#[rstest]
	fn test_set_within_layer_replaces_entry() {
		let mut layer = OptionLayer::<String>::new("messages").with("required", "a");
		layer.set("required", OptionDefault::Value("b".to_string()));

		let opts = OptionBox::from_layers([layer]);
		assert_eq!(opts.resolve("required"), Some("b".to_string()));
	}
}
