//! Fields and the schema engine of Catalyst
//!
//! A [`Field`] converts one value in both directions: dumping turns in-memory
//! data into its external representation, loading turns external data back
//! into validated in-memory values. A [`Catalyst`] runs a whole registry of
//! fields over a mapping (or a list of mappings), collecting every failure
//! into a [`CatalystResult`](catalyst_core::CatalystResult) instead of
//! stopping at the first one.
//!
//! ## Example
//!
//! ```
//! use catalyst_core::Value;
//! use catalyst_schema::prelude::*;
//!
//! let address = Catalyst::builder("Address")
//!     .field("city", Field::string().load_required(true))
//!     .build()
//!     .unwrap();
//! let user = Catalyst::builder("User")
//!     .field("name", Field::string())
//!     .field("address", address)
//!     .build()
//!     .unwrap();
//!
//! let result = user
//!     .load(Value::map([("name", Value::from("bob")), ("address", Value::empty_map())]))
//!     .unwrap();
//!
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.format_errors(),
//!     serde_json::json!({"address": {"city": "Missing data for required field."}})
//! );
//! ```

pub mod args;
pub mod catalyst;
pub mod definition;
pub mod field;
pub mod fields;
pub mod hooks;
pub mod naming;
pub mod source;

pub use args::ArgBinder;
pub use catalyst::{Catalyst, CatalystBuilder, PROCESS_NAMES, ProcessOptions};
pub use definition::{FieldDecl, FieldSource, SchemaDefinition};
pub use field::{Field, FieldKind, FieldMethod, Transform};
pub use fields::{DATE_FORMAT, DATETIME_FORMAT, FALSE_VALUES, TIME_FORMAT, TRUE_VALUES};
pub use hooks::{HookKind, Hooks, NoHooks};
pub use source::{AttrOrItemSource, DataSource, ItemSource};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::{
		ArgBinder, AttrOrItemSource, Catalyst, CatalystBuilder, DataSource, Field, FieldDecl,
		FieldKind, FieldMethod, FieldSource, HookKind, Hooks, ItemSource, NoHooks,
		ProcessOptions, SchemaDefinition,
	};
	pub use crate::naming::snake_to_camel;
}
