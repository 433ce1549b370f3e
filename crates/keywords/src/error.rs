use tessera_primitives::EntityKind;

use crate::kind::DataKind;

/// Failures raised by the line parser.
#[derive(Debug, thiserror::Error)]
pub enum CursorError {
	/// A quoted argument was not closed before the end of the line.
	#[error("line {line}: unterminated quote")]
	UnterminatedQuote { line: usize },

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Keyword parse, write, and conversion failures.
///
/// None of these are fatal to the process; the caller decides whether a failed
/// keyword aborts the surrounding load.
#[derive(Debug, thiserror::Error)]
pub enum KeywordError {
	/// Token count outside the keyword's accepted range.
	#[error("keyword '{keyword}' expects {expected} argument(s), got {got}")]
	Arity { keyword: String, expected: String, got: usize },

	/// A token was present but is not a valid literal or option.
	#[error("invalid value for keyword '{keyword}': {reason}")]
	Format { keyword: String, reason: String },

	/// A token names no live entity of the required kind.
	#[error("keyword '{keyword}': no {kind} named '{name}'")]
	Resolution { keyword: String, kind: EntityKind, name: String },

	/// A typed accessor does not apply to the keyword's data kind.
	#[error("keyword '{keyword}' holds {data_kind} and cannot be read as {requested}")]
	Conversion {
		keyword: String,
		data_kind: DataKind,
		requested: &'static str,
	},

	/// The value does not convert to the requested type without loss.
	#[error("keyword '{keyword}': value {value} is not exactly representable as {requested}")]
	Inexact {
		keyword: String,
		value: String,
		requested: &'static str,
	},

	/// The keyword holds no value to convert.
	#[error("keyword '{keyword}' has no value")]
	NoValue { keyword: String },

	/// The cursor failed while a keyword was consuming further lines.
	#[error("keyword '{keyword}': {source}")]
	Cursor {
		keyword: String,
		#[source]
		source: CursorError,
	},

	/// The output sink failed.
	#[error("write failed: {0}")]
	Io(#[from] std::io::Error),
}

impl KeywordError {
	/// Name of the keyword that raised the error, if known.
	pub fn keyword(&self) -> Option<&str> {
		match self {
			Self::Arity { keyword, .. }
			| Self::Format { keyword, .. }
			| Self::Resolution { keyword, .. }
			| Self::Conversion { keyword, .. }
			| Self::Inexact { keyword, .. }
			| Self::NoValue { keyword }
			| Self::Cursor { keyword, .. } => Some(keyword),
			Self::Io(_) => None,
		}
	}
}

/// Describes an accepted argument range for error messages.
pub(crate) fn describe_arity(min: usize, max: Option<usize>) -> String {
	match max {
		Some(max) if max == min => min.to_string(),
		Some(max) => format!("{min} to {max}"),
		None => format!("at least {min}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arity_descriptions() {
		assert_eq!(describe_arity(1, Some(1)), "1");
		assert_eq!(describe_arity(1, Some(4)), "1 to 4");
		assert_eq!(describe_arity(1, None), "at least 1");
	}

	#[test]
	fn conversion_message_names_kind() {
		let err = KeywordError::Conversion {
			keyword: "Iterations".into(),
			data_kind: DataKind::IntegerData,
			requested: "string",
		};
		assert_eq!(err.to_string(), "keyword 'Iterations' holds IntegerData and cannot be read as string");
		assert_eq!(err.keyword(), Some("Iterations"));
	}
}
