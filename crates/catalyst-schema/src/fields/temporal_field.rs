//! Datetime, date and time fields
//!
//! Values are formatted and parsed with strftime-style patterns read from the
//! `fmt` option.

use crate::field::{Field, FieldKind};
use catalyst_core::{FieldResult, OptionLayer, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{Display, Write};

/// Default pattern of datetime fields (microsecond precision)
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
/// Default pattern of date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Default pattern of time fields (microsecond precision)
pub const TIME_FORMAT: &str = "%H:%M:%S%.6f";

const FMT: &str = "fmt";

fn pattern(field: &Field, fallback: &str) -> String {
	match field.get_option(FMT) {
		Some(Value::String(fmt)) => fmt,
		_ => fallback.to_string(),
	}
}

// chrono reports an unsupported specifier as a formatting error, so write into
// a buffer instead of calling `to_string`.
fn render(field: &Field, formatted: impl Display, fmt: &str) -> FieldResult<Value> {
	let mut out = String::new();
	write!(out, "{}", formatted)
		.map_err(|_| field.transform_error("bad_format", &[("fmt", fmt.to_string())]))?;
	Ok(Value::String(out))
}

fn wrong_type(field: &Field, value: &Value) -> catalyst_core::FieldError {
	field.transform_error("invalid", &[("value", value.to_string())])
}

fn parse_error(field: &Field, raw: &str, fmt: &str) -> catalyst_core::FieldError {
	field.transform_error(
		"mismatch",
		&[("value", raw.to_string()), ("fmt", fmt.to_string())],
	)
}

fn format_datetime(field: &Field, value: Value) -> FieldResult<Value> {
	let fmt = pattern(field, DATETIME_FORMAT);
	match value {
		Value::DateTime(dt) => render(field, dt.format(&fmt), &fmt),
		other => Err(wrong_type(field, &other)),
	}
}

fn parse_datetime(field: &Field, value: Value) -> FieldResult<Value> {
	let fmt = pattern(field, DATETIME_FORMAT);
	match value {
		Value::String(raw) => NaiveDateTime::parse_from_str(&raw, &fmt)
			.map(Value::DateTime)
			.map_err(|_| parse_error(field, &raw, &fmt)),
		other => Err(wrong_type(field, &other)),
	}
}

fn format_date(field: &Field, value: Value) -> FieldResult<Value> {
	let fmt = pattern(field, DATE_FORMAT);
	match value {
		Value::Date(d) => render(field, d.format(&fmt), &fmt),
		Value::DateTime(dt) => render(field, dt.date().format(&fmt), &fmt),
		other => Err(wrong_type(field, &other)),
	}
}

fn parse_date(field: &Field, value: Value) -> FieldResult<Value> {
	let fmt = pattern(field, DATE_FORMAT);
	match value {
		Value::String(raw) => NaiveDate::parse_from_str(&raw, &fmt)
			.map(Value::Date)
			.map_err(|_| parse_error(field, &raw, &fmt)),
		other => Err(wrong_type(field, &other)),
	}
}

fn format_time(field: &Field, value: Value) -> FieldResult<Value> {
	let fmt = pattern(field, TIME_FORMAT);
	match value {
		Value::Time(t) => render(field, t.format(&fmt), &fmt),
		other => Err(wrong_type(field, &other)),
	}
}

fn parse_time(field: &Field, value: Value) -> FieldResult<Value> {
	let fmt = pattern(field, TIME_FORMAT);
	match value {
		Value::String(raw) => NaiveTime::parse_from_str(&raw, &fmt)
			.map(Value::Time)
			.map_err(|_| parse_error(field, &raw, &fmt)),
		other => Err(wrong_type(field, &other)),
	}
}

fn temporal(kind: FieldKind, layer: &str, fmt: &str, type_name: &str) -> Field {
	Field::with_kind(
		kind,
		OptionLayer::<Value>::new(layer).with(FMT, fmt),
		OptionLayer::<String>::new(layer)
			.with("invalid", format!("Not a valid {}: {{value}}.", type_name))
			.with("mismatch", "Time data '{value}' does not match format '{fmt}'.")
			.with("bad_format", "Invalid format pattern '{fmt}'."),
	)
}

impl Field {
	/// Datetime field; dumps to a string and loads from one
	///
	/// # Examples
	///
	/// ```
	/// use catalyst_core::Value;
	/// use catalyst_schema::Field;
	/// use chrono::NaiveDate;
	///
	/// let field = Field::datetime();
	/// let dt = NaiveDate::from_ymd_opt(2020, 1, 2)
	///     .unwrap()
	///     .and_hms_micro_opt(3, 4, 5, 6)
	///     .unwrap();
	///
	/// assert_eq!(field.dump(Value::from(dt)), Ok(Value::from("2020-01-02 03:04:05.000006")));
	/// assert_eq!(field.load(Value::from("2020-01-02 03:04:05.000006")), Ok(Value::from(dt)));
	/// ```
	pub fn datetime() -> Self {
		let mut field = temporal(FieldKind::DateTime, "DatetimeField", DATETIME_FORMAT, "datetime");
		field.set_formatter(format_datetime);
		field.set_parser(parse_datetime);
		field
	}

	pub fn date() -> Self {
		let mut field = temporal(FieldKind::Date, "DateField", DATE_FORMAT, "date");
		field.set_formatter(format_date);
		field.set_parser(parse_date);
		field
	}

	pub fn time() -> Self {
		let mut field = temporal(FieldKind::Time, "TimeField", TIME_FORMAT, "time");
		field.set_formatter(format_time);
		field.set_parser(parse_time);
		field
	}

	/// Sets the strftime-style pattern of a temporal field
	pub fn with_fmt(self, fmt: impl Into<String>) -> Self {
		self.option(FMT, fmt.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn sample() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2021, 12, 31)
			.unwrap()
			.and_hms_micro_opt(23, 59, 1, 250)
			.unwrap()
	}

	#[rstest]
	fn test_datetime_with_custom_fmt() {
		// Arrange
		let field = Field::datetime().with_fmt("%d/%m/%Y %H:%M");

		// Act
		let dumped = field.dump(Value::from(sample())).unwrap();
		let loaded = field.load(dumped.clone()).unwrap();

		// Assert
		assert_eq!(dumped, Value::from("31/12/2021 23:59"));
		assert_eq!(
			loaded,
			Value::from(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap().and_hms_opt(23, 59, 0).unwrap())
		);
	}

	#[rstest]
	fn test_date_field() {
		let field = Field::date();
		let date = NaiveDate::from_ymd_opt(2000, 2, 29).unwrap();

		assert_eq!(field.dump(Value::from(date)), Ok(Value::from("2000-02-29")));
		assert_eq!(field.dump(Value::from(sample())), Ok(Value::from("2021-12-31")));
		assert_eq!(field.load(Value::from("2000-02-29")), Ok(Value::from(date)));
	}

	#[rstest]
	fn test_time_field() {
		let field = Field::time();
		let time = NaiveTime::from_hms_micro_opt(1, 2, 3, 4).unwrap();

		assert_eq!(field.dump(Value::from(time)), Ok(Value::from("01:02:03.000004")));
		assert_eq!(field.load(Value::from("01:02:03.000004")), Ok(Value::from(time)));
	}

	#[rstest]
	#[case(Value::from("2020-13-01"))]
	#[case(Value::from("not a date"))]
	#[case(Value::Int(20200101))]
	fn test_date_parse_failures(#[case] input: Value) {
		let error = Field::date().load(input).unwrap_err();
		assert_eq!(error.kind(), "transform");
	}

	#[rstest]
	fn test_mismatch_message() {
		let error = Field::date().load(Value::from("01/02/2020")).unwrap_err();
		assert_eq!(
			error.to_string(),
			"Time data '01/02/2020' does not match format '%Y-%m-%d'."
		);
	}

	#[rstest]
	fn test_range_on_loaded_value() {
		let field = Field::date().with_range(
			Some(Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())),
			None,
		);
		assert!(field.load(Value::from("2020-01-01")).is_ok());
		assert_eq!(
			field.load(Value::from("2019-12-31")).unwrap_err().to_string(),
			"Ensure value >= 2020-01-01."
		);
	}

	#[rstest]
	fn test_invalid_pattern_is_transform_error() {
		let field = Field::date().with_fmt("%Q");
		let error = field
			.dump(Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()))
			.unwrap_err();
		assert_eq!(error.to_string(), "Invalid format pattern '%Q'.");
	}
}
