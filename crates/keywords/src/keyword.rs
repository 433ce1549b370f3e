use tessera_primitives::{EntityDirectory, EntityId, EntityKind, Vec3};

use crate::base::{KeywordBase, KeywordOptions};
use crate::cursor::{ArgumentCursor, LineSink};
use crate::error::{KeywordError, describe_arity};
use crate::kind::DataKind;

/// A named, typed configuration entry.
///
/// Variants embed a [`KeywordBase`] and own their payload; the trait never
/// exposes the payload directly, only typed converters that each variant
/// opts into.
///
/// # Parsing
///
/// Callers drive [`parse`](Self::parse), which validates the argument count
/// against [`min_arguments`](Self::min_arguments) and
/// [`max_arguments`](Self::max_arguments) before the variant's
/// [`read`](Self::read) sees a single token. `read` must leave the payload
/// untouched when it fails.
///
/// # Invalidation
///
/// [`prune`](Self::prune) is the hook used by
/// [`KeywordRegistry::notify_entity_invalid`](crate::KeywordRegistry::notify_entity_invalid).
/// Variants that cannot reference the given kind keep the default no-op.
pub trait Keyword {
	fn base(&self) -> &KeywordBase;

	fn base_mut(&mut self) -> &mut KeywordBase;

	/// Minimum number of arguments accepted after the keyword name.
	fn min_arguments(&self) -> usize;

	/// Maximum number of arguments accepted, `None` if unbounded.
	fn max_arguments(&self) -> Option<usize>;

	/// Reads the payload from the cursor, starting at argument `start`.
	///
	/// Only called with an argument count already validated by
	/// [`valid_argument_count`](Self::valid_argument_count).
	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, directory: &dyn EntityDirectory) -> Result<(), KeywordError>;

	/// Writes the current value under `keyword_name`, each line preceded by `prefix`.
	///
	/// Fails only when the sink does.
	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError>;

	/// Whether the payload is in a logically empty state.
	fn is_empty(&self) -> bool {
		false
	}

	/// Removes every reference to the entity `(kind, id)` from the payload.
	///
	/// Returns the number of references removed. Never fails.
	fn prune(&mut self, kind: EntityKind, id: EntityId) -> usize {
		let _ = (kind, id);
		0
	}

	fn as_bool(&self) -> Result<bool, KeywordError> {
		Err(self.base().conversion_error("bool"))
	}

	fn as_int(&self) -> Result<i64, KeywordError> {
		Err(self.base().conversion_error("int"))
	}

	fn as_double(&self) -> Result<f64, KeywordError> {
		Err(self.base().conversion_error("double"))
	}

	fn as_string(&self) -> Result<String, KeywordError> {
		Err(self.base().conversion_error("string"))
	}

	fn as_vec3_int(&self) -> Result<Vec3<i64>, KeywordError> {
		Err(self.base().conversion_error("Vec3<int>"))
	}

	fn as_vec3_double(&self) -> Result<Vec3<f64>, KeywordError> {
		Err(self.base().conversion_error("Vec3<double>"))
	}

	/// Assigns name, description, usage string, and options.
	///
	/// # Panics
	///
	/// Panics if called more than once.
	fn identify(&mut self, name: &str, description: &str, arguments_usage: &str, options: KeywordOptions) {
		self.base_mut().identify(name, description, arguments_usage, options);
	}

	/// Flags the value as set without parsing, e.g. after a programmatic change.
	fn mark_modified(&mut self) {
		self.base_mut().mark_modified();
	}

	fn data_kind(&self) -> DataKind {
		self.base().data_kind()
	}

	fn data_kind_name(&self) -> &'static str {
		self.data_kind().name()
	}

	fn name(&self) -> &str {
		self.base().name()
	}

	fn description(&self) -> &str {
		self.base().description()
	}

	fn arguments_usage(&self) -> &str {
		self.base().arguments_usage()
	}

	fn options(&self) -> KeywordOptions {
		self.base().options()
	}

	fn has_option(&self, option: KeywordOptions) -> bool {
		self.options().contains(option)
	}

	/// True once explicitly set, unless the payload is currently empty.
	fn has_been_set(&self) -> bool {
		self.base().is_set() && !self.is_empty()
	}

	fn valid_argument_count(&self, provided: usize) -> bool {
		provided >= self.min_arguments() && self.max_arguments().is_none_or(|max| provided <= max)
	}

	/// Parses the arguments from `start` onward and marks the keyword set.
	///
	/// An out-of-range argument count fails with [`KeywordError::Arity`]
	/// before any token is inspected. On any failure the previous payload is
	/// kept.
	fn parse(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let provided = cursor.argument_count().saturating_sub(start);
		if !self.valid_argument_count(provided) {
			return Err(KeywordError::Arity {
				keyword: self.name().to_string(),
				expected: describe_arity(self.min_arguments(), self.max_arguments()),
				got: provided,
			});
		}

		self.read(cursor, start, directory)?;
		self.mark_modified();
		tracing::trace!(domain = "keywords", keyword = self.name(), data_kind = self.data_kind_name(), "keyword parsed");
		Ok(())
	}
}
