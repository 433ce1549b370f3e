//! Single-token keywords: booleans, integers, doubles, and strings.

use tessera_primitives::EntityDirectory;

use crate::base::impl_keyword_base;
use crate::cursor::{ArgumentCursor, LineSink, quote_argument, write_arguments};
use crate::error::KeywordError;
use crate::{DataKind, Keyword, KeywordBase};

/// Parses a boolean from its common spellings, case-insensitively.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!("invalid boolean: '{value}' (expected true/false, yes/no, on/off, 1/0)")),
	}
}

/// Parses a signed integer.
pub fn parse_int(value: &str) -> Result<i64, String> {
	value.parse::<i64>().map_err(|_| format!("invalid integer: '{value}'"))
}

/// Parses a finite floating point number.
pub fn parse_double(value: &str) -> Result<f64, String> {
	match value.parse::<f64>() {
		Ok(v) if v.is_finite() => Ok(v),
		Ok(_) => Err(format!("non-finite number: '{value}'")),
		Err(_) => Err(format!("invalid number: '{value}'")),
	}
}

/// Largest magnitude below which every integer has an exact `f64`.
const MAX_EXACT_INT: u64 = 1 << 53;

/// Widens `value` to a double, or `None` if that would round it.
pub fn exact_double(value: i64) -> Option<f64> {
	(value.unsigned_abs() <= MAX_EXACT_INT).then_some(value as f64)
}

fn check_bounds<T: PartialOrd + std::fmt::Display>(value: T, min: Option<T>, max: Option<T>) -> Result<T, String> {
	if let Some(min) = min
		&& value < min
	{
		return Err(format!("{value} is below the minimum of {min}"));
	}
	if let Some(max) = max
		&& value > max
	{
		return Err(format!("{value} is above the maximum of {max}"));
	}
	Ok(value)
}

/// Keyword holding a single boolean.
#[derive(Debug, Clone)]
pub struct BoolKeyword {
	base: KeywordBase,
	value: bool,
}

impl BoolKeyword {
	pub fn new(default: bool) -> Self {
		Self {
			base: KeywordBase::new(DataKind::BoolData),
			value: default,
		}
	}

	pub fn value(&self) -> bool {
		self.value
	}

	/// Sets the value and marks the keyword as modified.
	pub fn set_value(&mut self, value: bool) {
		self.value = value;
		self.base.mark_modified();
	}
}

impl Keyword for BoolKeyword {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(1)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let token = cursor.argument(start).unwrap_or_default();
		self.value = parse_bool(token).map_err(|reason| self.base.format_error(reason))?;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		write_arguments(sink, prefix, keyword_name, [if self.value { "true" } else { "false" }])?;
		Ok(())
	}

	fn as_bool(&self) -> Result<bool, KeywordError> {
		Ok(self.value)
	}

	fn as_int(&self) -> Result<i64, KeywordError> {
		Ok(i64::from(self.value))
	}
}

/// Keyword holding a single integer, optionally bounded.
#[derive(Debug, Clone)]
pub struct IntegerKeyword {
	base: KeywordBase,
	value: i64,
	min: Option<i64>,
	max: Option<i64>,
}

impl IntegerKeyword {
	pub fn new(default: i64) -> Self {
		Self {
			base: KeywordBase::new(DataKind::IntegerData),
			value: default,
			min: None,
			max: None,
		}
	}

	/// Rejects parsed values below `min`.
	pub fn with_min(mut self, min: i64) -> Self {
		self.min = Some(min);
		self
	}

	/// Rejects parsed values above `max`.
	pub fn with_max(mut self, max: i64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn value(&self) -> i64 {
		self.value
	}

	/// Sets the value and marks the keyword as modified.
	///
	/// Returns `false` and leaves the value unchanged if it is out of bounds.
	pub fn set_value(&mut self, value: i64) -> bool {
		if check_bounds(value, self.min, self.max).is_err() {
			return false;
		}
		self.value = value;
		self.base.mark_modified();
		true
	}
}

impl Keyword for IntegerKeyword {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(1)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let token = cursor.argument(start).unwrap_or_default();
		let value = parse_int(token)
			.and_then(|v| check_bounds(v, self.min, self.max))
			.map_err(|reason| self.base.format_error(reason))?;
		self.value = value;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		write_arguments(sink, prefix, keyword_name, [self.value.to_string()])?;
		Ok(())
	}

	fn as_int(&self) -> Result<i64, KeywordError> {
		Ok(self.value)
	}

	fn as_double(&self) -> Result<f64, KeywordError> {
		exact_double(self.value).ok_or_else(|| self.base.inexact_error(self.value, "double"))
	}
}

/// Keyword holding a single finite double, optionally bounded.
#[derive(Debug, Clone)]
pub struct DoubleKeyword {
	base: KeywordBase,
	value: f64,
	min: Option<f64>,
	max: Option<f64>,
}

impl DoubleKeyword {
	pub fn new(default: f64) -> Self {
		Self {
			base: KeywordBase::new(DataKind::DoubleData),
			value: default,
			min: None,
			max: None,
		}
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn value(&self) -> f64 {
		self.value
	}

	/// Sets the value and marks the keyword as modified.
	///
	/// Returns `false` and leaves the value unchanged if it is out of bounds.
	pub fn set_value(&mut self, value: f64) -> bool {
		if check_bounds(value, self.min, self.max).is_err() {
			return false;
		}
		self.value = value;
		self.base.mark_modified();
		true
	}
}

impl Keyword for DoubleKeyword {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(1)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let token = cursor.argument(start).unwrap_or_default();
		let value = parse_double(token)
			.and_then(|v| check_bounds(v, self.min, self.max))
			.map_err(|reason| self.base.format_error(reason))?;
		self.value = value;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		// `Display` for f64 prints the shortest text that parses back to the same value.
		write_arguments(sink, prefix, keyword_name, [self.value.to_string()])?;
		Ok(())
	}

	fn as_double(&self) -> Result<f64, KeywordError> {
		Ok(self.value)
	}
}

/// Keyword holding a single string.
#[derive(Debug, Clone)]
pub struct StringKeyword {
	base: KeywordBase,
	value: String,
}

impl StringKeyword {
	pub fn new(default: impl Into<String>) -> Self {
		Self {
			base: KeywordBase::new(DataKind::StringData),
			value: default.into(),
		}
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	/// Sets the value and marks the keyword as modified.
	///
	/// Returns `false` and leaves the value unchanged if it could not be read
	/// back as one token: it contains a line break, or both quote characters.
	pub fn set_value(&mut self, value: impl Into<String>) -> bool {
		let value = value.into();
		if value.contains(['\n', '\r']) || (value.contains('"') && value.contains('\'')) {
			return false;
		}
		self.value = value;
		self.base.mark_modified();
		true
	}
}

impl Keyword for StringKeyword {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(1)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		self.value = cursor.argument(start).unwrap_or_default().to_string();
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		write_arguments(sink, prefix, keyword_name, [quote_argument(&self.value)])?;
		Ok(())
	}

	fn as_string(&self) -> Result<String, KeywordError> {
		Ok(self.value.clone())
	}
}
