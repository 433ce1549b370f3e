//! Domain entities referenced by keywords.
//!
//! Keywords never own the entities they refer to. They hold an [`EntityRef`],
//! whose [`EntityId`] carries a generation counter: once the entity is
//! destroyed the slot generation moves on and every outstanding id resolves to
//! `None` instead of aliasing whatever reuses the slot.

mod store;

pub use store::EntityStore;

/// The kinds of domain entity a keyword payload can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumCount, strum::VariantArray)]
pub enum EntityKind {
	AtomType,
	Configuration,
	Isotopologue,
	Module,
	Species,
	SpeciesSite,
	ProcedureNode,
}

impl EntityKind {
	/// Dense index of this kind, usable for per-kind tables.
	pub const fn index(self) -> usize {
		self as usize
	}
}

/// A generational slot identifier.
///
/// Unlike a bare index, an `EntityId` stops matching its slot as soon as the
/// entity in that slot is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
	pub(crate) index: u32,
	pub(crate) generation: u32,
}

impl EntityId {
	pub(crate) const fn new(index: u32, generation: u32) -> Self {
		Self { index, generation }
	}

	/// Slot index in the owning table.
	pub const fn index(self) -> u32 {
		self.index
	}

	/// Generation of the slot when this id was issued.
	pub const fn generation(self) -> u32 {
		self.generation
	}
}

/// A non-owning reference to a domain entity.
///
/// The name is captured when the reference is resolved and is what gets
/// written back to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
	kind: EntityKind,
	id: EntityId,
	name: String,
}

impl EntityRef {
	pub fn new(kind: EntityKind, id: EntityId, name: impl Into<String>) -> Self {
		Self { kind, id, name: name.into() }
	}

	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	pub fn id(&self) -> EntityId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns true if this reference points at the given entity.
	pub fn refers_to(&self, kind: EntityKind, id: EntityId) -> bool {
		self.kind == kind && self.id == id
	}
}

/// Name-to-entity lookup used while parsing keyword arguments.
pub trait EntityDirectory {
	/// Resolves `name` among live entities of `kind`.
	///
	/// When several live entities share a name the first one created wins.
	fn resolve(&self, kind: EntityKind, name: &str) -> Option<EntityRef>;
}

/// Receiver of entity invalidation notices.
///
/// [`EntityStore::destroy`] calls [`entity_invalid`](Self::entity_invalid)
/// exactly once, before the entity's slot is released.
pub trait InvalidationSink {
	fn entity_invalid(&self, entity: &EntityRef);
}

impl<F: Fn(&EntityRef)> InvalidationSink for F {
	fn entity_invalid(&self, entity: &EntityRef) {
		self(entity)
	}
}
