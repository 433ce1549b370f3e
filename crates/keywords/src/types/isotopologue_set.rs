use tessera_primitives::{EntityDirectory, EntityId, EntityKind, EntityRef};

use crate::base::impl_keyword_base;
use crate::cursor::{ArgumentCursor, LineSink, quote_argument, write_arguments};
use crate::error::KeywordError;
use crate::types::scalar::parse_double;
use crate::{DataKind, Keyword, KeywordBase};

/// Relative weight of one isotopologue of a species within a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopologueWeight {
	pub configuration: EntityRef,
	pub species: EntityRef,
	pub isotopologue: EntityRef,
	pub weight: f64,
}

impl IsotopologueWeight {
	fn same_target(&self, other: &IsotopologueWeight) -> bool {
		self.configuration.id() == other.configuration.id()
			&& self.species.id() == other.species.id()
			&& self.isotopologue.id() == other.isotopologue.id()
	}

	fn references(&self, kind: EntityKind, id: EntityId) -> bool {
		self.configuration.refers_to(kind, id) || self.species.refers_to(kind, id) || self.isotopologue.refers_to(kind, id)
	}
}

/// Keyword collecting isotopologue weights, one entry per line.
///
/// Each line reads `<configuration> <species> <isotopologue> <weight>`.
/// Repeated lines accumulate; a line naming an existing triple replaces its
/// weight.
#[derive(Debug, Clone)]
pub struct IsotopologueSetKeyword {
	base: KeywordBase,
	entries: Vec<IsotopologueWeight>,
}

impl Default for IsotopologueSetKeyword {
	fn default() -> Self {
		Self::new()
	}
}

impl IsotopologueSetKeyword {
	pub fn new() -> Self {
		Self {
			base: KeywordBase::new(DataKind::IsotopologueSetData),
			entries: Vec::new(),
		}
	}

	pub fn entries(&self) -> &[IsotopologueWeight] {
		&self.entries
	}

	/// Entries belonging to one configuration.
	pub fn for_configuration(&self, id: EntityId) -> impl Iterator<Item = &IsotopologueWeight> {
		self.entries.iter().filter(move |e| e.configuration.id() == id)
	}

	/// Adds or updates an entry and marks the keyword as modified.
	pub fn set(&mut self, entry: IsotopologueWeight) {
		self.upsert(entry);
		self.base.mark_modified();
	}

	fn upsert(&mut self, entry: IsotopologueWeight) {
		match self.entries.iter_mut().find(|e| e.same_target(&entry)) {
			Some(existing) => existing.weight = entry.weight,
			None => self.entries.push(entry),
		}
	}
}

impl Keyword for IsotopologueSetKeyword {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		4
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(4)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let tokens = cursor.arguments(start);
		let &[configuration, species, isotopologue, weight] = tokens.as_slice() else {
			return Err(self.base.format_error(format!("expected 4 arguments, got {}", tokens.len())));
		};
		let lookup = |kind: EntityKind, token: &str| directory.resolve(kind, token).ok_or_else(|| self.base.resolution_error(kind, token));

		let configuration = lookup(EntityKind::Configuration, configuration)?;
		let species = lookup(EntityKind::Species, species)?;
		let isotopologue = lookup(EntityKind::Isotopologue, isotopologue)?;
		let weight = parse_double(weight).map_err(|reason| self.base.format_error(reason))?;
		if weight < 0.0 {
			return Err(self.base.format_error(format!("isotopologue weight must not be negative, got {weight}")));
		}

		self.upsert(IsotopologueWeight {
			configuration,
			species,
			isotopologue,
			weight,
		});
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		for entry in &self.entries {
			let weight = entry.weight.to_string();
			let arguments = [
				quote_argument(entry.configuration.name()),
				quote_argument(entry.species.name()),
				quote_argument(entry.isotopologue.name()),
				weight.as_str().into(),
			];
			write_arguments(sink, prefix, keyword_name, arguments)?;
		}
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn prune(&mut self, kind: EntityKind, id: EntityId) -> usize {
		if !matches!(kind, EntityKind::Configuration | EntityKind::Species | EntityKind::Isotopologue) {
			return 0;
		}
		let before = self.entries.len();
		self.entries.retain(|e| !e.references(kind, id));
		before - self.entries.len()
	}
}
