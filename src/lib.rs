//! # Catalyst
//!
//! Declarative schemas for converting data in two directions.
//!
//! *Dumping* turns in-memory values (mappings or objects exposing attributes)
//! into their external representation. *Loading* turns raw external data back
//! into validated in-memory values. Both directions run every field of a
//! schema and aggregate all failures into one result, including the failures
//! of nested schemas and of every item of a batch.
//!
//! ## Crates
//!
//! - [`core`]: the dynamic [`Value`] model, layered option tables, errors and
//!   the [`CatalystResult`] model
//! - [`validators`]: length, range, and pattern validators
//! - [`schema`]: fields, schema definitions, and the [`Catalyst`] engine
//!
//! ## Quick Example
//!
//! ```
//! use catalyst::prelude::*;
//! use serde_json::json;
//!
//! let catalyst = Catalyst::builder("Article")
//!     .field("title", Field::string().with_length(Some(1), Some(40)).load_required(true))
//!     .field("published_at", Field::datetime().load_required(true))
//!     .field("tags", Field::list(Field::string()).load_default(Value::List(vec![])))
//!     .format_field_key(snake_to_camel)
//!     .build()
//!     .unwrap();
//!
//! let result = catalyst
//!     .load(json!({"title": "", "publishedAt": "yesterday"}))
//!     .unwrap();
//!
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.format_errors(),
//!     json!({
//!         "title": "Ensure length >= 1.",
//!         "publishedAt": "Time data 'yesterday' does not match format '%Y-%m-%d %H:%M:%S%.6f'."
//!     })
//! );
//! assert_eq!(result.valid_data(), &Value::map([("tags", Value::List(vec![]))]));
//! ```
//!
//! ## Error handling
//!
//! Field failures are collected, never raised one by one. Set `raise_error`
//! on the schema or per call to receive the aggregated result as
//! [`CatalystError::Invalid`] instead:
//!
//! ```
//! use catalyst::prelude::*;
//!
//! let catalyst = Catalyst::builder("Point")
//!     .field("x", Field::integer().load_required(true))
//!     .build()
//!     .unwrap();
//!
//! let error = catalyst
//!     .load_with(Value::empty_map(), ProcessOptions::new().raise_error(true))
//!     .unwrap_err();
//! assert!(!error.result().unwrap().is_valid());
//! ```

pub use catalyst_core as core;
pub use catalyst_schema as schema;
pub use catalyst_validators as validators;

pub use catalyst_core::{
	Attributes, Callable, CatalystError, CatalystResult, Direction, ErrorKey, ErrorMap, ErrorTree,
	FieldError, FieldResult, InvalidData, Map, OptionBox, OptionDefault, OptionLayer, SetupError,
	SetupResult, ValidationError, ValidationResult, Value,
};
pub use catalyst_schema::{
	ArgBinder, AttrOrItemSource, Catalyst, CatalystBuilder, DataSource, Field, FieldDecl, FieldKind,
	FieldMethod, FieldSource, HookKind, Hooks, ItemSource, NoHooks, ProcessOptions,
	SchemaDefinition, naming,
};
pub use catalyst_validators::{
	ComparisonValidator, FnValidator, LengthValidator, PatternValidator, Validator,
};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::{
		ArgBinder, Catalyst, CatalystBuilder, CatalystError, CatalystResult, Field, FieldError,
		FieldResult, Hooks, ProcessOptions, SchemaDefinition, Validator, Value,
	};
	pub use catalyst_schema::naming::snake_to_camel;
	pub use catalyst_validators::prelude::*;
}
