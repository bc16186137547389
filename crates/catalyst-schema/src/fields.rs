// Scalar fields
pub mod boolean_field;
pub mod callable_field;
pub mod number_field;
pub mod string_field;
pub mod temporal_field;

// Composite fields
pub mod list_field;
pub mod nested_field;

pub use boolean_field::{FALSE_VALUES, TRUE_VALUES};
pub use temporal_field::{DATE_FORMAT, DATETIME_FORMAT, TIME_FORMAT};
