//! Pre and post processing hooks
//!
//! Every dump or load runs a pre hook on the input before the fields are
//! processed and, when processing produced no errors, a post hook on the
//! output. A hook failure is recorded under the hook's error key (its name
//! unless aliased) and replaces the whole result.

use crate::catalyst::Catalyst;
use catalyst_core::{Direction, FieldResult, Value};
use std::fmt;

/// The eight hook points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
	PreDump,
	PostDump,
	PreLoad,
	PostLoad,
	PreDumpMany,
	PostDumpMany,
	PreLoadMany,
	PostLoadMany,
}

impl HookKind {
	pub const ALL: [HookKind; 8] = [
		HookKind::PreDump,
		HookKind::PostDump,
		HookKind::PreLoad,
		HookKind::PostLoad,
		HookKind::PreDumpMany,
		HookKind::PostDumpMany,
		HookKind::PreLoadMany,
		HookKind::PostLoadMany,
	];

	/// Default error key of the hook
	pub fn error_key(&self) -> &'static str {
		match self {
			HookKind::PreDump => "pre_dump",
			HookKind::PostDump => "post_dump",
			HookKind::PreLoad => "pre_load",
			HookKind::PostLoad => "post_load",
			HookKind::PreDumpMany => "pre_dump_many",
			HookKind::PostDumpMany => "post_dump_many",
			HookKind::PreLoadMany => "pre_load_many",
			HookKind::PostLoadMany => "post_load_many",
		}
	}

	pub fn pre(direction: Direction, many: bool) -> Self {
		match (direction, many) {
			(Direction::Dump, false) => HookKind::PreDump,
			(Direction::Dump, true) => HookKind::PreDumpMany,
			(Direction::Load, false) => HookKind::PreLoad,
			(Direction::Load, true) => HookKind::PreLoadMany,
		}
	}

	pub fn post(direction: Direction, many: bool) -> Self {
		match (direction, many) {
			(Direction::Dump, false) => HookKind::PostDump,
			(Direction::Dump, true) => HookKind::PostDumpMany,
			(Direction::Load, false) => HookKind::PostLoad,
			(Direction::Load, true) => HookKind::PostLoadMany,
		}
	}

	pub fn is_pre(&self) -> bool {
		matches!(
			self,
			HookKind::PreDump | HookKind::PreLoad | HookKind::PreDumpMany | HookKind::PreLoadMany
		)
	}
}

impl fmt::Display for HookKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.error_key())
	}
}

/// Hook implementations of a schema; every hook defaults to identity.
///
/// Post hooks also receive the input the run started from.
///
/// # Examples
///
/// ```
/// use catalyst_core::{FieldError, FieldResult, Value};
/// use catalyst_schema::{Catalyst, Field, Hooks};
///
/// struct RejectEmpty;
///
/// impl Hooks for RejectEmpty {
///     fn pre_load(&self, _catalyst: &Catalyst, data: Value) -> FieldResult<Value> {
///         match data.len() {
///             Some(0) => Err(FieldError::hook("No data provided.")),
///             _ => Ok(data),
///         }
///     }
/// }
///
/// let catalyst = Catalyst::builder("Form")
///     .field("name", Field::string())
///     .hooks(RejectEmpty)
///     .build()
///     .unwrap();
///
/// let result = catalyst.load(Value::empty_map()).unwrap();
/// assert_eq!(result.error("pre_load").unwrap().format(), "No data provided.");
/// ```
#[allow(unused_variables)]
pub trait Hooks: Send + Sync {
	fn pre_dump(&self, catalyst: &Catalyst, data: Value) -> FieldResult<Value> {
		Ok(data)
	}

	fn post_dump(&self, catalyst: &Catalyst, data: Value, original: &Value) -> FieldResult<Value> {
		Ok(data)
	}

	fn pre_load(&self, catalyst: &Catalyst, data: Value) -> FieldResult<Value> {
		Ok(data)
	}

	fn post_load(&self, catalyst: &Catalyst, data: Value, original: &Value) -> FieldResult<Value> {
		Ok(data)
	}

	fn pre_dump_many(&self, catalyst: &Catalyst, data: Value) -> FieldResult<Value> {
		Ok(data)
	}

	fn post_dump_many(
		&self,
		catalyst: &Catalyst,
		data: Value,
		original: &Value,
	) -> FieldResult<Value> {
		Ok(data)
	}

	fn pre_load_many(&self, catalyst: &Catalyst, data: Value) -> FieldResult<Value> {
		Ok(data)
	}

	fn post_load_many(
		&self,
		catalyst: &Catalyst,
		data: Value,
		original: &Value,
	) -> FieldResult<Value> {
		Ok(data)
	}
}

/// Identity hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl Hooks for NoHooks {}

/// Runs the hook selected by `kind`
pub(crate) fn run_hook(
	hooks: &dyn Hooks,
	kind: HookKind,
	catalyst: &Catalyst,
	data: Value,
	original: &Value,
) -> FieldResult<Value> {
	match kind {
		HookKind::PreDump => hooks.pre_dump(catalyst, data),
		HookKind::PostDump => hooks.post_dump(catalyst, data, original),
		HookKind::PreLoad => hooks.pre_load(catalyst, data),
		HookKind::PostLoad => hooks.post_load(catalyst, data, original),
		HookKind::PreDumpMany => hooks.pre_dump_many(catalyst, data),
		HookKind::PostDumpMany => hooks.post_dump_many(catalyst, data, original),
		HookKind::PreLoadMany => hooks.pre_load_many(catalyst, data),
		HookKind::PostLoadMany => hooks.post_load_many(catalyst, data, original),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Direction::Dump, false, "pre_dump", "post_dump")]
	#[case(Direction::Dump, true, "pre_dump_many", "post_dump_many")]
	#[case(Direction::Load, false, "pre_load", "post_load")]
	#[case(Direction::Load, true, "pre_load_many", "post_load_many")]
	fn test_hook_selection(
		#[case] direction: Direction,
		#[case] many: bool,
		#[case] pre: &str,
		#[case] post: &str,
	) {
		assert_eq!(HookKind::pre(direction, many).error_key(), pre);
		assert_eq!(HookKind::post(direction, many).error_key(), post);
		assert!(HookKind::pre(direction, many).is_pre());
		assert!(!HookKind::post(direction, many).is_pre());
	}

	#[rstest]
	fn test_error_keys_are_distinct() {
		let mut keys: Vec<_> = HookKind::ALL.iter().map(HookKind::error_key).collect();
		keys.sort_unstable();
		keys.dedup();
		assert_eq!(keys.len(), 8);
	}
}
