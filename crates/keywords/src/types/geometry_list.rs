use smallvec::SmallVec;
use tessera_primitives::EntityDirectory;

use crate::base::impl_keyword_base;
use crate::cursor::{ArgumentCursor, LineSink};
use crate::error::KeywordError;
use crate::types::scalar::parse_double;
use crate::{DataKind, Keyword, KeywordBase};

/// Number of site indices on each line of a [`GeometryListKeyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum GeometryArity {
	Distance,
	Angle,
	Torsion,
}

impl GeometryArity {
	pub fn indices(self) -> usize {
		match self {
			Self::Distance => 2,
			Self::Angle => 3,
			Self::Torsion => 4,
		}
	}
}

/// One reference geometry term: site indices and a target value.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryEntry {
	pub indices: SmallVec<[usize; 4]>,
	pub value: f64,
}

/// Block keyword holding a list of geometry terms.
///
/// The keyword line takes no arguments. Each following line holds the site
/// indices and the value; the block closes at `End<keyword>`. The previous
/// list is kept if any line in the block fails. A failing body is still read
/// through to its end marker, so the cursor never stops mid-block. Any other
/// line starting with `End` stops the read with an error and is left as the
/// cursor's current line.
#[derive(Debug, Clone)]
pub struct GeometryListKeyword {
	base: KeywordBase,
	arity: GeometryArity,
	entries: Vec<GeometryEntry>,
}

const BODY_INDENT: &str = "  ";

impl GeometryListKeyword {
	pub fn new(arity: GeometryArity) -> Self {
		Self {
			base: KeywordBase::new(DataKind::GeometryListData),
			arity,
			entries: Vec::new(),
		}
	}

	pub fn arity(&self) -> GeometryArity {
		self.arity
	}

	pub fn entries(&self) -> &[GeometryEntry] {
		&self.entries
	}

	/// Appends a term and marks the keyword as modified.
	///
	/// Returns `false` if the index count does not match the arity.
	pub fn push(&mut self, indices: &[usize], value: f64) -> bool {
		if indices.len() != self.arity.indices() {
			return false;
		}
		self.entries.push(GeometryEntry {
			indices: SmallVec::from_slice(indices),
			value,
		});
		self.base.mark_modified();
		true
	}

	fn read_entry(&self, cursor: &dyn ArgumentCursor) -> Result<GeometryEntry, KeywordError> {
		let expected = self.arity.indices() + 1;
		if cursor.argument_count() != expected {
			return Err(self.base.format_error(format!(
				"line {}: {} term needs {expected} values, got {}",
				cursor.line_number(),
				self.arity,
				cursor.argument_count()
			)));
		}

		let tokens = cursor.arguments(0);
		let Some((value, indices)) = tokens.split_last() else {
			return Err(self.base.format_error("empty geometry line"));
		};
		let indices = indices
			.iter()
			.map(|token| match token.parse::<usize>() {
				Ok(index) if index > 0 => Ok(index),
				_ => Err(self.base.format_error(format!("line {}: invalid site index '{token}'", cursor.line_number()))),
			})
			.collect::<Result<SmallVec<[usize; 4]>, _>>()?;
		let value = parse_double(value).map_err(|reason| self.base.format_error(format!("line {}: {reason}", cursor.line_number())))?;
		Ok(GeometryEntry { indices, value })
	}
}

impl Keyword for GeometryListKeyword {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		0
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(0)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, _start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let end_marker = format!("End{}", self.base.name());
		let mut entries = Vec::new();
		let mut first_error: Option<KeywordError> = None;

		loop {
			let more = cursor.next_line().map_err(|source| KeywordError::Cursor {
				keyword: self.base.name().to_string(),
				source,
			})?;
			if !more {
				return Err(first_error.unwrap_or_else(|| self.base.format_error(format!("input ended before '{end_marker}'"))));
			}
			match cursor.argument(0) {
				Some(token) if token == end_marker => break,
				// Another block's end marker; the cursor stays on it for the enclosing reader.
				Some(token) if token.starts_with("End") => {
					return Err(first_error.unwrap_or_else(|| {
						self.base
							.format_error(format!("line {}: '{token}' reached before '{end_marker}'", cursor.line_number()))
					}));
				}
				_ => {}
			}
			match self.read_entry(cursor) {
				Ok(entry) => entries.push(entry),
				Err(err) => {
					first_error.get_or_insert(err);
				}
			}
		}

		if let Some(err) = first_error {
			return Err(err);
		}
		self.entries = entries;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		if self.entries.is_empty() {
			return Ok(());
		}
		sink.write_line(prefix, keyword_name)?;
		let body_prefix = format!("{prefix}{BODY_INDENT}");
		for entry in &self.entries {
			let mut line = entry.indices.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
			line.push(' ');
			line.push_str(&entry.value.to_string());
			sink.write_line(&body_prefix, &line)?;
		}
		sink.write_line(prefix, &format!("End{keyword_name}"))?;
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
