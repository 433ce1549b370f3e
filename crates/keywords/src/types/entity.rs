//! Keywords holding references to domain entities.
//!
//! Each entity kind gets a zero-sized marker type; the generic
//! [`EntityKeyword`] and [`EntityVectorKeyword`] are instantiated per marker
//! so every alias reports its own [`DataKind`] and prunes only its own
//! [`EntityKind`].

use std::marker::PhantomData;

use tessera_primitives::{EntityDirectory, EntityId, EntityKind, EntityRef};

use crate::base::impl_keyword_base;
use crate::cursor::{ArgumentCursor, LineSink, quote_argument, write_arguments};
use crate::error::KeywordError;
use crate::{DataKind, Keyword, KeywordBase};

/// Binds a marker type to an entity kind and its list data kind.
pub trait EntityMarker: 'static {
	const KIND: EntityKind;
	const VECTOR_DATA_KIND: DataKind;
}

/// Marker kinds that also have a single-reference data kind.
pub trait SingleEntityMarker: EntityMarker {
	const DATA_KIND: DataKind;
}

pub mod marker {
	//! Marker types selecting the entity kind of an entity keyword.

	use super::{EntityMarker, SingleEntityMarker};
	use crate::DataKind;
	use tessera_primitives::EntityKind;

	macro_rules! entity_marker {
		($name:ident, $kind:ident, $vector:ident $(, $single:ident)?) => {
			#[derive(Debug, Clone, Copy)]
			pub struct $name;

			impl EntityMarker for $name {
				const KIND: EntityKind = EntityKind::$kind;
				const VECTOR_DATA_KIND: DataKind = DataKind::$vector;
			}

			$(
				impl SingleEntityMarker for $name {
					const DATA_KIND: DataKind = DataKind::$single;
				}
			)?
		};
	}

	entity_marker!(AtomTypes, AtomType, AtomTypeRefListData);
	entity_marker!(Configurations, Configuration, ConfigurationVectorData);
	entity_marker!(Modules, Module, ModuleRefListData, ModuleData);
	entity_marker!(SpeciesEntities, Species, SpeciesVectorData, SpeciesData);
	entity_marker!(SpeciesSites, SpeciesSite, SpeciesSiteVectorData, SpeciesSiteData);
	entity_marker!(ProcedureNodes, ProcedureNode, NodeVectorData, NodeData);
}

pub type ModuleKeyword = EntityKeyword<marker::Modules>;
pub type SpeciesKeyword = EntityKeyword<marker::SpeciesEntities>;
pub type SpeciesSiteKeyword = EntityKeyword<marker::SpeciesSites>;
pub type NodeKeyword = EntityKeyword<marker::ProcedureNodes>;

pub type AtomTypeVectorKeyword = EntityVectorKeyword<marker::AtomTypes>;
pub type ConfigurationVectorKeyword = EntityVectorKeyword<marker::Configurations>;
pub type ModuleVectorKeyword = EntityVectorKeyword<marker::Modules>;
pub type SpeciesVectorKeyword = EntityVectorKeyword<marker::SpeciesEntities>;
pub type SpeciesSiteVectorKeyword = EntityVectorKeyword<marker::SpeciesSites>;
pub type NodeVectorKeyword = EntityVectorKeyword<marker::ProcedureNodes>;

/// Resolves `token` as an entity of kind `M::KIND`.
fn resolve<M: EntityMarker>(base: &KeywordBase, directory: &dyn EntityDirectory, token: &str) -> Result<EntityRef, KeywordError> {
	directory.resolve(M::KIND, token).ok_or_else(|| base.resolution_error(M::KIND, token))
}

/// Keyword holding at most one entity reference.
#[derive(Debug, Clone)]
pub struct EntityKeyword<M> {
	base: KeywordBase,
	value: Option<EntityRef>,
	_marker: PhantomData<M>,
}

impl<M: SingleEntityMarker> Default for EntityKeyword<M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M: SingleEntityMarker> EntityKeyword<M> {
	pub fn new() -> Self {
		Self {
			base: KeywordBase::new(M::DATA_KIND),
			value: None,
			_marker: PhantomData,
		}
	}

	pub fn value(&self) -> Option<&EntityRef> {
		self.value.as_ref()
	}

	/// Sets the reference and marks the keyword as modified.
	///
	/// Returns `false` and leaves the value unchanged if `entity` is of the wrong kind.
	pub fn set_value(&mut self, entity: Option<EntityRef>) -> bool {
		if entity.as_ref().is_some_and(|e| e.kind() != M::KIND) {
			return false;
		}
		self.value = entity;
		self.base.mark_modified();
		true
	}
}

impl<M: SingleEntityMarker> Keyword for EntityKeyword<M> {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(1)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let token = cursor.argument(start).unwrap_or_default();
		self.value = Some(resolve::<M>(&self.base, directory, token)?);
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		if let Some(entity) = &self.value {
			write_arguments(sink, prefix, keyword_name, [quote_argument(entity.name())])?;
		}
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.value.is_none()
	}

	fn prune(&mut self, kind: EntityKind, id: EntityId) -> usize {
		if self.value.as_ref().is_some_and(|e| e.refers_to(kind, id)) {
			self.value = None;
			return 1;
		}
		0
	}

	fn as_string(&self) -> Result<String, KeywordError> {
		self.value.as_ref().map(|e| e.name().to_string()).ok_or_else(|| self.base.no_value_error())
	}
}

/// Keyword holding an ordered list of distinct entity references.
#[derive(Debug, Clone)]
pub struct EntityVectorKeyword<M> {
	base: KeywordBase,
	values: Vec<EntityRef>,
	limit: Option<usize>,
	_marker: PhantomData<M>,
}

impl<M: EntityMarker> Default for EntityVectorKeyword<M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M: EntityMarker> EntityVectorKeyword<M> {
	pub fn new() -> Self {
		Self {
			base: KeywordBase::new(M::VECTOR_DATA_KIND),
			values: Vec::new(),
			limit: None,
			_marker: PhantomData,
		}
	}

	/// Caps the number of references the list accepts.
	///
	/// # Panics
	///
	/// Panics if `limit` is zero.
	pub fn with_limit(mut self, limit: usize) -> Self {
		assert!(limit > 0, "entity list limit must be at least 1");
		self.limit = Some(limit);
		self
	}

	pub fn values(&self) -> &[EntityRef] {
		&self.values
	}

	pub fn contains(&self, id: EntityId) -> bool {
		self.values.iter().any(|e| e.refers_to(M::KIND, id))
	}

	/// Appends a reference and marks the keyword as modified.
	///
	/// Returns `false` if the entity is of the wrong kind, already present,
	/// or the list is full.
	pub fn push(&mut self, entity: EntityRef) -> bool {
		if entity.kind() != M::KIND || self.contains(entity.id()) || self.limit.is_some_and(|l| self.values.len() >= l) {
			return false;
		}
		self.values.push(entity);
		self.base.mark_modified();
		true
	}

	pub fn clear(&mut self) {
		self.values.clear();
	}
}

impl<M: EntityMarker> Keyword for EntityVectorKeyword<M> {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		self.limit
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let mut values: Vec<EntityRef> = Vec::new();
		for token in cursor.arguments(start) {
			let entity = resolve::<M>(&self.base, directory, token)?;
			if values.iter().any(|e| e.id() == entity.id()) {
				return Err(self.base.format_error(format!("{} '{token}' listed more than once", M::KIND)));
			}
			values.push(entity);
		}
		self.values = values;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		if self.values.is_empty() {
			return Ok(());
		}
		write_arguments(sink, prefix, keyword_name, self.values.iter().map(|e| quote_argument(e.name())))?;
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	fn prune(&mut self, kind: EntityKind, id: EntityId) -> usize {
		let before = self.values.len();
		self.values.retain(|e| !e.refers_to(kind, id));
		before - self.values.len()
	}
}
