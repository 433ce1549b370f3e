use std::fmt::Display;

use tessera_primitives::{EntityDirectory, Vec3};

use crate::base::impl_keyword_base;
use crate::cursor::{ArgumentCursor, LineSink, write_arguments};
use crate::error::KeywordError;
use crate::types::scalar::{exact_double, parse_double, parse_int};
use crate::{DataKind, Keyword, KeywordBase};

/// Component type of a [`Vec3Keyword`].
pub trait Vec3Component: Copy + PartialOrd + Display + 'static {
	const DATA_KIND: DataKind;

	fn parse(token: &str) -> Result<Self, String>;

	fn to_vec3_int(value: Vec3<Self>) -> Option<Vec3<i64>>;

	/// `None` if any component would lose precision.
	fn to_vec3_double(value: Vec3<Self>) -> Option<Vec3<f64>>;
}

impl Vec3Component for i64 {
	const DATA_KIND: DataKind = DataKind::Vec3IntegerData;

	fn parse(token: &str) -> Result<Self, String> {
		parse_int(token)
	}

	fn to_vec3_int(value: Vec3<Self>) -> Option<Vec3<i64>> {
		Some(value)
	}

	fn to_vec3_double(value: Vec3<Self>) -> Option<Vec3<f64>> {
		value.iter().all(|&c| exact_double(c).is_some()).then(|| value.into())
	}
}

impl Vec3Component for f64 {
	const DATA_KIND: DataKind = DataKind::Vec3DoubleData;

	fn parse(token: &str) -> Result<Self, String> {
		parse_double(token)
	}

	fn to_vec3_int(_value: Vec3<Self>) -> Option<Vec3<i64>> {
		None
	}

	fn to_vec3_double(value: Vec3<Self>) -> Option<Vec3<f64>> {
		Some(value)
	}
}

/// Keyword holding a three-component vector, read from exactly three tokens.
#[derive(Debug, Clone)]
pub struct Vec3Keyword<T> {
	base: KeywordBase,
	value: Vec3<T>,
	bounds: Option<(T, T)>,
}

pub type Vec3IntegerKeyword = Vec3Keyword<i64>;
pub type Vec3DoubleKeyword = Vec3Keyword<f64>;

impl<T: Vec3Component> Vec3Keyword<T> {
	pub fn new(default: Vec3<T>) -> Self {
		Self {
			base: KeywordBase::new(T::DATA_KIND),
			value: default,
			bounds: None,
		}
	}

	/// Rejects parsed vectors with any component outside `[min, max]`.
	pub fn with_bounds(mut self, min: T, max: T) -> Self {
		self.bounds = Some((min, max));
		self
	}

	pub fn value(&self) -> Vec3<T> {
		self.value
	}

	/// Sets the value and marks the keyword as modified.
	///
	/// Returns `false` and leaves the value unchanged if it is out of bounds.
	pub fn set_value(&mut self, value: Vec3<T>) -> bool {
		if !self.in_bounds(&value) {
			return false;
		}
		self.value = value;
		self.base.mark_modified();
		true
	}

	fn in_bounds(&self, value: &Vec3<T>) -> bool {
		self.bounds.is_none_or(|(min, max)| value.within(min, max))
	}
}

impl<T: Vec3Component> Keyword for Vec3Keyword<T> {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		3
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(3)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let mut components = [self.value.x; 3];
		for (i, component) in components.iter_mut().enumerate() {
			let token = cursor.argument(start + i).unwrap_or_default();
			*component = T::parse(token).map_err(|reason| self.base.format_error(reason))?;
		}

		let value = Vec3::from(components);
		if let Some((min, max)) = self.bounds
			&& !value.within(min, max)
		{
			return Err(self.base.format_error(format!("({value}) has a component outside [{min}, {max}]")));
		}
		self.value = value;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		write_arguments(sink, prefix, keyword_name, self.value.iter().map(ToString::to_string))?;
		Ok(())
	}

	fn as_vec3_int(&self) -> Result<Vec3<i64>, KeywordError> {
		T::to_vec3_int(self.value).ok_or_else(|| self.base.conversion_error("Vec3<int>"))
	}

	fn as_vec3_double(&self) -> Result<Vec3<f64>, KeywordError> {
		T::to_vec3_double(self.value).ok_or_else(|| self.base.inexact_error(self.value, "Vec3<double>"))
	}
}
