use tessera_primitives::EntityKind;

use crate::error::KeywordError;
use crate::kind::DataKind;

bitflags::bitflags! {
	/// Behavioural flags attached to a keyword.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct KeywordOptions: u8 {
		/// The keyword's value belongs in restart (persisted state) files.
		const IN_RESTART_FILE = 1 << 0;
		/// Changing the value means the owning object must be set up again.
		const MODIFICATION_REQUIRES_SET_UP = 1 << 1;
	}
}

/// Identity and state shared by every keyword variant.
#[derive(Debug, Clone)]
pub struct KeywordBase {
	data_kind: DataKind,
	name: String,
	description: String,
	arguments_usage: String,
	options: KeywordOptions,
	identified: bool,
	set: bool,
}

impl KeywordBase {
	/// Creates an unidentified, unset base for the given data kind.
	pub fn new(data_kind: DataKind) -> Self {
		Self {
			data_kind,
			name: String::new(),
			description: String::new(),
			arguments_usage: String::new(),
			options: KeywordOptions::empty(),
			identified: false,
			set: false,
		}
	}

	/// Assigns name, description, usage string, and options.
	///
	/// # Panics
	///
	/// Panics if the keyword has already been identified.
	pub fn identify(&mut self, name: &str, description: &str, arguments_usage: &str, options: KeywordOptions) {
		assert!(!self.identified, "keyword '{}' identified twice (as '{name}')", self.name);
		self.name = name.to_string();
		self.description = description.to_string();
		self.arguments_usage = arguments_usage.to_string();
		self.options = options;
		self.identified = true;
	}

	pub fn is_identified(&self) -> bool {
		self.identified
	}

	/// Flags the value as explicitly set without going through parsing.
	pub fn mark_modified(&mut self) {
		self.set = true;
	}

	/// Returns true once a parse succeeded or [`mark_modified`](Self::mark_modified) was called.
	pub fn is_set(&self) -> bool {
		self.set
	}

	pub fn data_kind(&self) -> DataKind {
		self.data_kind
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn arguments_usage(&self) -> &str {
		&self.arguments_usage
	}

	pub fn options(&self) -> KeywordOptions {
		self.options
	}

	pub fn format_error(&self, reason: impl Into<String>) -> KeywordError {
		KeywordError::Format {
			keyword: self.name.clone(),
			reason: reason.into(),
		}
	}

	pub fn resolution_error(&self, kind: EntityKind, name: &str) -> KeywordError {
		KeywordError::Resolution {
			keyword: self.name.clone(),
			kind,
			name: name.to_string(),
		}
	}

	pub fn conversion_error(&self, requested: &'static str) -> KeywordError {
		KeywordError::Conversion {
			keyword: self.name.clone(),
			data_kind: self.data_kind,
			requested,
		}
	}

	pub fn inexact_error(&self, value: impl ToString, requested: &'static str) -> KeywordError {
		KeywordError::Inexact {
			keyword: self.name.clone(),
			value: value.to_string(),
			requested,
		}
	}

	pub fn no_value_error(&self) -> KeywordError {
		KeywordError::NoValue { keyword: self.name.clone() }
	}
}

/// Implements the [`Keyword`](crate::Keyword) base accessors for a struct with a `base` field.
macro_rules! impl_keyword_base {
	() => {
		fn base(&self) -> &$crate::KeywordBase {
			&self.base
		}

		fn base_mut(&mut self) -> &mut $crate::KeywordBase {
			&mut self.base
		}
	};
}

pub(crate) use impl_keyword_base;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identify_assigns_metadata() {
		let mut base = KeywordBase::new(DataKind::IntegerData);
		assert!(!base.is_identified());
		base.identify("Iterations", "Number of iterations", "<n>", KeywordOptions::IN_RESTART_FILE);
		assert_eq!(base.name(), "Iterations");
		assert_eq!(base.description(), "Number of iterations");
		assert_eq!(base.arguments_usage(), "<n>");
		assert!(base.options().contains(KeywordOptions::IN_RESTART_FILE));
		assert!(!base.is_set());
	}

	#[test]
	#[should_panic(expected = "identified twice")]
	fn identify_twice_panics() {
		let mut base = KeywordBase::new(DataKind::BoolData);
		base.identify("A", "", "", KeywordOptions::empty());
		base.identify("B", "", "", KeywordOptions::empty());
	}

	#[test]
	fn options_combine() {
		let both = KeywordOptions::IN_RESTART_FILE | KeywordOptions::MODIFICATION_REQUIRES_SET_UP;
		assert!(both.contains(KeywordOptions::IN_RESTART_FILE));
		assert!(both.contains(KeywordOptions::MODIFICATION_REQUIRES_SET_UP));
	}
}
