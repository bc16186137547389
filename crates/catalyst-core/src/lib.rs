//! Core types for Catalyst
//!
//! This crate holds the pieces every other Catalyst crate builds on:
//!
//! - [`Value`]: the dynamic value flowing through fields and schemas
//! - [`OptionBox`]: layered option tables with per-call overrides
//! - the error taxonomy ([`ValidationError`], [`FieldError`], [`SetupError`],
//!   [`CatalystError`])
//! - [`CatalystResult`]: the aggregated outcome of a dump or load run

pub mod errors;
pub mod options;
pub mod result;
pub mod value;

pub use errors::{
	CatalystError, FieldError, FieldResult, NONE_MESSAGE, REQUIRED_MESSAGE, SetupError,
	SetupResult, UNKNOWN_MESSAGE, ValidationError, ValidationResult, render_template,
};
pub use options::{OptionBox, OptionDefault, OptionLayer};
pub use result::{CatalystResult, Direction, ErrorKey, ErrorMap, ErrorTree, InvalidData};
pub use value::{Attributes, CallResult, Callable, Map, Value};
