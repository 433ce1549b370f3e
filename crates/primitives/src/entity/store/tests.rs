use std::cell::RefCell;

use rstest::{fixture, rstest};
use strum::VariantArray;

use super::*;

#[fixture]
fn store() -> EntityStore {
	let mut store = EntityStore::new();
	store.create(EntityKind::Species, "Water");
	store.create(EntityKind::Species, "Methanol");
	store.create(EntityKind::Module, "Energy01");
	store
}

#[rstest]
fn resolve_finds_live_entity(store: EntityStore) {
	let water = store.resolve(EntityKind::Species, "Water").unwrap();
	assert_eq!(water.kind(), EntityKind::Species);
	assert_eq!(water.name(), "Water");
	assert!(store.contains(EntityKind::Species, water.id()));
}

#[rstest]
fn resolve_is_scoped_by_kind(store: EntityStore) {
	assert!(store.resolve(EntityKind::Module, "Water").is_none());
	assert!(store.resolve(EntityKind::Species, "Energy01").is_none());
}

#[rstest]
fn duplicate_names_resolve_to_first_created(mut store: EntityStore) {
	let second = store.create(EntityKind::Species, "Water");
	let found = store.resolve(EntityKind::Species, "Water").unwrap();
	assert_ne!(found.id(), second.id());
}

#[rstest]
fn destroy_notifies_before_release(mut store: EntityStore) {
	let water = store.resolve(EntityKind::Species, "Water").unwrap();
	let seen = RefCell::new(Vec::new());
	let destroyed = store.destroy(EntityKind::Species, water.id(), &|e: &EntityRef| seen.borrow_mut().push(e.clone()));

	assert_eq!(destroyed.as_deref(), Some("Water"));
	assert_eq!(seen.into_inner(), vec![water.clone()]);
	assert!(!store.contains(EntityKind::Species, water.id()));
	assert!(store.resolve(EntityKind::Species, "Water").is_none());
}

#[rstest]
fn stale_id_never_aliases_reused_slot(mut store: EntityStore) {
	let water = store.resolve(EntityKind::Species, "Water").unwrap();
	store.destroy(EntityKind::Species, water.id(), &|_: &EntityRef| {});

	let ethanol = store.create(EntityKind::Species, "Ethanol");
	assert_eq!(ethanol.id().index(), water.id().index());
	assert_ne!(ethanol.id(), water.id());
	assert!(store.get(EntityKind::Species, water.id()).is_none());
	assert_eq!(store.name(EntityKind::Species, ethanol.id()), Some("Ethanol"));
}

#[rstest]
fn destroying_stale_id_does_not_notify(mut store: EntityStore) {
	let water = store.resolve(EntityKind::Species, "Water").unwrap();
	store.destroy(EntityKind::Species, water.id(), &|_: &EntityRef| {});

	let calls = RefCell::new(0);
	let again = store.destroy(EntityKind::Species, water.id(), &|_: &EntityRef| *calls.borrow_mut() += 1);
	assert!(again.is_none());
	assert_eq!(calls.into_inner(), 0);
}

#[rstest]
fn rename_changes_resolution(mut store: EntityStore) {
	let water = store.resolve(EntityKind::Species, "Water").unwrap();
	assert!(store.rename(EntityKind::Species, water.id(), "H2O"));
	assert!(store.resolve(EntityKind::Species, "Water").is_none());
	assert_eq!(store.resolve(EntityKind::Species, "H2O").map(|e| e.id()), Some(water.id()));
}

#[rstest]
fn iter_preserves_creation_order(store: EntityStore) {
	let names: Vec<_> = store.iter(EntityKind::Species).map(|e| e.name().to_string()).collect();
	assert_eq!(names, ["Water", "Methanol"]);
	assert_eq!(store.len(EntityKind::Module), 1);
}

#[test]
fn every_kind_has_its_own_table() {
	let mut store = EntityStore::new();
	for &kind in EntityKind::VARIANTS {
		store.create(kind, "Shared");
	}
	for &kind in EntityKind::VARIANTS {
		assert_eq!(store.len(kind), 1, "{kind}");
		assert_eq!(store.resolve(kind, "Shared").map(|e| e.kind()), Some(kind));
	}
	assert!(!store.is_empty());
}
