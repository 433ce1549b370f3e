use std::cell::Cell;
use std::rc::Rc;

use tessera_primitives::{EntityKind, EntityStore};

use super::*;
use crate::{IntegerKeyword, KeywordOptions, SpeciesKeyword, SpeciesVectorKeyword};

fn species_keyword(store: &EntityStore, name: &str) -> SpeciesKeyword {
	let mut keyword = SpeciesKeyword::new();
	keyword.identify("Target", "", "", KeywordOptions::empty());
	let entity = store.iter(EntityKind::Species).find(|e| e.name() == name);
	assert!(keyword.set_value(entity));
	keyword
}

#[test]
fn guard_drop_deregisters() {
	let registry = KeywordRegistry::new();
	let a = registry.register(IntegerKeyword::new(1));
	let b = registry.register(IntegerKeyword::new(2));
	assert_eq!(registry.len(), 2);
	assert!(registry.contains(&a));

	drop(a);
	assert_eq!(registry.len(), 1);
	assert!(registry.contains(&b));

	drop(b);
	assert!(registry.is_empty());
}

#[test]
fn shared_handle_outliving_guard_is_not_notified() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	let registry = KeywordRegistry::new();

	let guard = registry.register(species_keyword(&store, "Water"));
	let handle = guard.shared();
	drop(guard);

	assert_eq!(registry.notify_entity_invalid(&water), 0);
	assert!(handle.borrow().value().is_some());
}

#[test]
fn into_dyn_keeps_registration() {
	let registry = KeywordRegistry::new();
	let typed = registry.register(IntegerKeyword::new(4));
	let erased = typed.into_dyn();
	assert_eq!(registry.len(), 1);
	assert!(registry.contains(&erased));
	assert_eq!(erased.borrow().as_int().unwrap(), 4);
	drop(erased);
	assert!(registry.is_empty());
}

#[test]
fn contains_is_scoped_to_registry() {
	let first = KeywordRegistry::new();
	let second = KeywordRegistry::new();
	let keyword = first.register(IntegerKeyword::new(0));
	assert!(first.contains(&keyword));
	assert!(!second.contains(&keyword));
	assert!(first.clone().contains(&keyword));
}

#[test]
fn notify_prunes_every_reference() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	store.create(EntityKind::Species, "Argon");
	let registry = KeywordRegistry::new();

	let single = registry.register(species_keyword(&store, "Water"));
	let other = registry.register(species_keyword(&store, "Argon"));
	let list = registry.register(SpeciesVectorKeyword::new());
	for entity in store.iter(EntityKind::Species) {
		list.borrow_mut().push(entity);
	}
	let unrelated = registry.register(IntegerKeyword::new(9));

	assert_eq!(registry.notify_entity_invalid(&water), 2);
	assert!(single.borrow().value().is_none());
	assert_eq!(other.borrow().as_string().unwrap(), "Argon");
	assert_eq!(list.borrow().values().len(), 1);
	assert_eq!(unrelated.borrow().value(), 9);

	assert_eq!(registry.notify_entity_invalid(&water), 0);
}

#[test]
fn busy_keyword_is_pruned_once_released() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	let registry = KeywordRegistry::new();

	let held = registry.register(species_keyword(&store, "Water"));
	let free = registry.register(species_keyword(&store, "Water"));

	let borrowed = held.borrow();
	assert_eq!(registry.notify_entity_invalid(&water), 1);
	assert!(borrowed.value().is_some());
	assert_eq!(registry.deferred_len(), 1);
	assert_eq!(registry.settle_deferred(), 0);
	drop(borrowed);

	assert!(held.borrow().value().is_none());
	assert_eq!(registry.deferred_len(), 0);
	assert!(free.borrow().value().is_none());
}

#[test]
fn settle_applies_deferred_prunes_through_shared_handles() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	let registry = KeywordRegistry::new();

	let guard = registry.register(species_keyword(&store, "Water"));
	let handle = guard.shared();
	{
		let _busy = handle.borrow_mut();
		store.destroy(EntityKind::Species, water.id(), &registry);
	}
	assert!(handle.borrow().value().is_some());

	assert_eq!(registry.settle_deferred(), 1);
	assert!(handle.borrow().value().is_none());
	assert_eq!(registry.settle_deferred(), 0);
}

#[test]
fn deferred_prune_dropped_with_registration() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	let registry = KeywordRegistry::new();

	let guard = registry.register(species_keyword(&store, "Water"));
	let handle = guard.shared();
	let busy = handle.borrow();
	registry.notify_entity_invalid(&water);
	drop(busy);
	drop(guard);

	assert_eq!(registry.settle_deferred(), 0);
	assert_eq!(registry.deferred_len(), 0);
	assert!(handle.borrow().value().is_some());
}

#[test]
fn store_destroy_drives_registry() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	let registry = KeywordRegistry::new();
	let target = registry.register(species_keyword(&store, "Water"));

	assert_eq!(store.destroy(EntityKind::Species, water.id(), &registry).as_deref(), Some("Water"));
	assert!(target.borrow().value().is_none());
	assert!(!store.contains(EntityKind::Species, water.id()));
}

/// Drops another registration from inside a prune.
struct Dropper {
	base: crate::KeywordBase,
	victim: Option<Registered<IntegerKeyword>>,
	calls: Rc<Cell<usize>>,
}

impl Keyword for Dropper {
	crate::base::impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		0
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(0)
	}

	fn read(
		&mut self,
		_cursor: &mut dyn crate::ArgumentCursor,
		_start: usize,
		_directory: &dyn tessera_primitives::EntityDirectory,
	) -> Result<(), crate::KeywordError> {
		Ok(())
	}

	fn write(&self, _sink: &mut dyn crate::LineSink, _keyword_name: &str, _prefix: &str) -> Result<(), crate::KeywordError> {
		Ok(())
	}

	fn prune(&mut self, _kind: EntityKind, _id: tessera_primitives::EntityId) -> usize {
		self.calls.set(self.calls.get() + 1);
		self.victim.take();
		0
	}
}

#[test]
fn registration_changes_during_broadcast_are_safe() {
	let mut store = EntityStore::new();
	let water = store.create(EntityKind::Species, "Water");
	let registry = KeywordRegistry::new();
	let calls = Rc::new(Cell::new(0));

	let dropper = registry.register(Dropper {
		base: crate::KeywordBase::new(crate::DataKind::IntegerData),
		victim: None,
		calls: calls.clone(),
	});
	let victim = registry.register(IntegerKeyword::new(1));
	dropper.borrow_mut().victim = Some(victim);
	assert_eq!(registry.len(), 2);

	registry.notify_entity_invalid(&water);
	assert_eq!(calls.get(), 1);
	assert_eq!(registry.len(), 1);
}

#[test]
fn global_registry_is_shared_per_thread() {
	let before = KeywordRegistry::global().len();
	let keyword = KeywordRegistry::global().register(IntegerKeyword::new(0));
	assert_eq!(KeywordRegistry::global().len(), before + 1);
	assert!(KeywordRegistry::global().contains(&keyword));
	drop(keyword);
	assert_eq!(KeywordRegistry::global().len(), before);

	let other_thread = std::thread::spawn(|| KeywordRegistry::global().len()).join().unwrap();
	assert_eq!(other_thread, 0);
}
