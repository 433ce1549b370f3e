use strum::EnumCount;

use super::{EntityDirectory, EntityId, EntityKind, EntityRef, InvalidationSink};

#[cfg(test)]
mod tests;

/// A slot in an entity table with generational tracking.
#[derive(Debug, Default)]
struct EntitySlot {
	/// Incremented each time the slot is vacated.
	generation: u32,
	/// Name of the live entity, `None` if the slot is free.
	name: Option<String>,
}

#[derive(Debug, Default)]
struct EntityTable {
	slots: Vec<EntitySlot>,
	free: Vec<u32>,
	/// Live ids in creation order; drives first-match-wins resolution.
	live: Vec<EntityId>,
}

impl EntityTable {
	fn validate(&self, id: EntityId) -> Option<&EntitySlot> {
		let slot = self.slots.get(id.index as usize)?;
		(slot.generation == id.generation && slot.name.is_some()).then_some(slot)
	}

	fn insert(&mut self, name: String) -> EntityId {
		let index = match self.free.pop() {
			Some(index) => index,
			None => {
				self.slots.push(EntitySlot::default());
				(self.slots.len() - 1) as u32
			}
		};
		let slot = &mut self.slots[index as usize];
		slot.name = Some(name);
		let id = EntityId::new(index, slot.generation);
		self.live.push(id);
		id
	}

	fn remove(&mut self, id: EntityId) -> Option<String> {
		self.validate(id)?;
		let slot = &mut self.slots[id.index as usize];
		let name = slot.name.take();
		slot.generation = slot.generation.wrapping_add(1);
		self.free.push(id.index);
		self.live.retain(|&live| live != id);
		name
	}
}

/// In-memory store of live domain entities, one generational table per kind.
///
/// This is the reference [`EntityDirectory`]: names resolve to the earliest
/// created live entity of the requested kind.
#[derive(Debug)]
pub struct EntityStore {
	tables: [EntityTable; EntityKind::COUNT],
}

impl Default for EntityStore {
	fn default() -> Self {
		Self {
			tables: std::array::from_fn(|_| EntityTable::default()),
		}
	}
}

impl EntityStore {
	pub fn new() -> Self {
		Self::default()
	}

	fn table(&self, kind: EntityKind) -> &EntityTable {
		&self.tables[kind.index()]
	}

	fn table_mut(&mut self, kind: EntityKind) -> &mut EntityTable {
		&mut self.tables[kind.index()]
	}

	/// Creates a new entity and returns a reference to it.
	pub fn create(&mut self, kind: EntityKind, name: impl Into<String>) -> EntityRef {
		let name = name.into();
		let id = self.table_mut(kind).insert(name.clone());
		tracing::trace!(domain = "entities", %kind, name = %name, index = id.index, "entity created");
		EntityRef::new(kind, id, name)
	}

	/// Returns true if `id` still names a live entity of `kind`.
	pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
		self.table(kind).validate(id).is_some()
	}

	/// Returns the current name of a live entity, `None` for stale ids.
	pub fn name(&self, kind: EntityKind, id: EntityId) -> Option<&str> {
		self.table(kind).validate(id)?.name.as_deref()
	}

	/// Returns a fresh reference to a live entity carrying its current name.
	pub fn get(&self, kind: EntityKind, id: EntityId) -> Option<EntityRef> {
		self.name(kind, id).map(|name| EntityRef::new(kind, id, name))
	}

	/// Renames a live entity. Returns false for stale ids.
	pub fn rename(&mut self, kind: EntityKind, id: EntityId, name: impl Into<String>) -> bool {
		let table = self.table_mut(kind);
		if table.validate(id).is_none() {
			return false;
		}
		table.slots[id.index as usize].name = Some(name.into());
		true
	}

	/// Destroys an entity.
	///
	/// `sink` is notified before the slot is released, so every holder of a
	/// reference can prune it while the id is still current. Returns the
	/// destroyed entity's name, or `None` if `id` was already stale (in which
	/// case `sink` is not called).
	pub fn destroy(&mut self, kind: EntityKind, id: EntityId, sink: &dyn InvalidationSink) -> Option<String> {
		let entity = self.get(kind, id)?;
		sink.entity_invalid(&entity);
		let name = self.table_mut(kind).remove(id);
		tracing::trace!(domain = "entities", %kind, name = entity.name(), index = id.index, "entity destroyed");
		name
	}

	/// Number of live entities of `kind`.
	pub fn len(&self, kind: EntityKind) -> usize {
		self.table(kind).live.len()
	}

	/// Returns true if no entity of any kind is live.
	pub fn is_empty(&self) -> bool {
		self.tables.iter().all(|t| t.live.is_empty())
	}

	/// Iterates live entities of `kind` in creation order.
	pub fn iter(&self, kind: EntityKind) -> impl Iterator<Item = EntityRef> + '_ {
		self.table(kind).live.iter().filter_map(move |&id| self.get(kind, id))
	}
}

impl EntityDirectory for EntityStore {
	fn resolve(&self, kind: EntityKind, name: &str) -> Option<EntityRef> {
		let table = self.table(kind);
		table
			.live
			.iter()
			.find(|&&id| table.validate(id).and_then(|s| s.name.as_deref()) == Some(name))
			.map(|&id| EntityRef::new(kind, id, name))
	}
}
