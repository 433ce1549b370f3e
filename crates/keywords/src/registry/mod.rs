//! Process-wide registry of live keywords and the invalidation broadcast.
//!
//! The registry holds only [`Weak`] references; ownership stays with whoever
//! registered the keyword. Registration is scoped: the [`Registered`] guard
//! removes its entry when dropped, before the keyword itself is released.
//!
//! # Threading
//!
//! The registry is built on [`Rc`] and [`RefCell`] and is therefore neither
//! `Send` nor `Sync`. [`KeywordRegistry::global`] hands out the instance for
//! the calling thread; all keyword work is expected to happen on one
//! controlling thread.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use slab::Slab;
use tessera_primitives::{EntityId, EntityKind, EntityRef, InvalidationSink};

use crate::Keyword;

#[cfg(test)]
mod tests;

type Entries = RefCell<Slab<Weak<RefCell<dyn Keyword>>>>;

/// A prune skipped because its keyword was borrowed during the broadcast.
struct DeferredPrune {
	key: usize,
	keyword: Weak<RefCell<dyn Keyword>>,
	kind: EntityKind,
	id: EntityId,
}

#[derive(Default)]
struct RegistryInner {
	entries: Entries,
	deferred: RefCell<Vec<DeferredPrune>>,
}

impl RegistryInner {
	fn is_registered(&self, key: usize, keyword: &Weak<RefCell<dyn Keyword>>) -> bool {
		self.entries.try_borrow().is_ok_and(|entries| entries.get(key).is_some_and(|weak| weak.ptr_eq(keyword)))
	}

	fn settle(&self) -> usize {
		let pending = match self.deferred.try_borrow_mut() {
			Ok(mut deferred) if !deferred.is_empty() => std::mem::take(&mut *deferred),
			_ => return 0,
		};

		let mut removed = 0;
		let mut busy = Vec::new();
		for prune in pending {
			if !self.is_registered(prune.key, &prune.keyword) {
				continue;
			}
			let Some(keyword) = prune.keyword.upgrade() else {
				continue;
			};
			let Ok(mut keyword) = keyword.try_borrow_mut() else {
				busy.push(prune);
				continue;
			};
			removed += keyword.prune(prune.kind, prune.id);
		}

		if let Ok(mut deferred) = self.deferred.try_borrow_mut() {
			deferred.extend(busy);
		}
		if removed > 0 {
			tracing::trace!(domain = "keywords", removed, "applied deferred prunes");
		}
		removed
	}
}

thread_local! {
	static GLOBAL: KeywordRegistry = KeywordRegistry::new();
}

/// Collection of every live, registered keyword.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct KeywordRegistry {
	inner: Rc<RegistryInner>,
}

impl std::fmt::Debug for KeywordRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KeywordRegistry").field("len", &self.len()).finish()
	}
}

impl KeywordRegistry {
	/// Creates an empty, independent registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the registry shared by everything on the current thread.
	pub fn global() -> Self {
		GLOBAL.with(Self::clone)
	}

	/// Takes ownership of `keyword` and registers it.
	///
	/// Registration is the final step of building a keyword: the returned
	/// guard deregisters on drop.
	pub fn register<K: Keyword + 'static>(&self, keyword: K) -> Registered<K> {
		let keyword = Rc::new(RefCell::new(keyword));
		let erased: Rc<RefCell<dyn Keyword>> = keyword.clone();
		let key = self.inner.entries.borrow_mut().insert(Rc::downgrade(&erased));
		Registered {
			registration: Registration {
				registry: Rc::downgrade(&self.inner),
				key,
			},
			keyword,
		}
	}

	/// Number of live registrations.
	pub fn len(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns true if `keyword` is registered here.
	pub fn contains<K: Keyword + ?Sized>(&self, keyword: &Registered<K>) -> bool {
		Weak::ptr_eq(&keyword.registration.registry, &Rc::downgrade(&self.inner))
			&& self.inner.entries.borrow().contains(keyword.registration.key)
	}

	/// Prunes every reference to `entity` held by any registered keyword.
	///
	/// Must be called before the entity is destroyed. Dispatch is directed by
	/// `entity.kind()`: only keywords able to reference that kind do any work.
	/// Returns the total number of references removed.
	///
	/// The broadcast iterates a snapshot taken up front, so keywords created
	/// or dropped while it runs are safe. A keyword that is currently borrowed
	/// elsewhere is pruned later, by [`settle_deferred`](Self::settle_deferred)
	/// or the next access through its [`Registered`] guard; those references
	/// are not part of the returned count.
	pub fn notify_entity_invalid(&self, entity: &EntityRef) -> usize {
		let live: Vec<_> = self.inner.entries.borrow().iter().map(|(key, weak)| (key, weak.clone())).collect();

		let mut removed = 0;
		for (key, weak) in live {
			let Some(keyword) = weak.upgrade() else {
				continue;
			};
			let Ok(mut keyword) = keyword.try_borrow_mut() else {
				tracing::warn!(
					domain = "keywords",
					kind = %entity.kind(),
					entity = entity.name(),
					"keyword busy during invalidation; prune deferred",
				);
				self.inner.deferred.borrow_mut().push(DeferredPrune {
					key,
					keyword: weak,
					kind: entity.kind(),
					id: entity.id(),
				});
				continue;
			};
			let count = keyword.prune(entity.kind(), entity.id());
			if count > 0 {
				tracing::trace!(domain = "keywords", keyword = keyword.name(), count, "pruned entity references");
			}
			removed += count;
		}

		tracing::debug!(domain = "keywords", kind = %entity.kind(), entity = entity.name(), removed, "entity invalidated");
		removed
	}

	/// Applies prunes deferred because their keyword was busy.
	///
	/// Keywords still borrowed stay pending. Returns the number of references removed.
	pub fn settle_deferred(&self) -> usize {
		self.inner.settle()
	}

	/// Number of prunes still waiting for a busy keyword.
	pub fn deferred_len(&self) -> usize {
		self.inner.deferred.borrow().len()
	}
}

impl InvalidationSink for KeywordRegistry {
	fn entity_invalid(&self, entity: &EntityRef) {
		self.notify_entity_invalid(entity);
	}
}

/// Removes a registry entry when dropped.
struct Registration {
	registry: Weak<RegistryInner>,
	key: usize,
}

impl Registration {
	fn settle(&self) {
		if let Some(inner) = self.registry.upgrade() {
			inner.settle();
		}
	}
}

impl Drop for Registration {
	fn drop(&mut self) {
		if let Some(inner) = self.registry.upgrade()
			&& let Ok(mut entries) = inner.entries.try_borrow_mut()
		{
			entries.try_remove(self.key);
		}
	}
}

/// A keyword owned by its creator and visible to the registry.
///
/// Dropping the guard deregisters the keyword first and then releases it.
pub struct Registered<K: ?Sized> {
	// Declared first so it drops first.
	registration: Registration,
	keyword: Rc<RefCell<K>>,
}

impl<K: ?Sized> Registered<K> {
	/// Borrows the keyword after applying any prunes deferred while it was busy.
	pub fn borrow(&self) -> Ref<'_, K> {
		self.registration.settle();
		self.keyword.borrow()
	}

	pub fn borrow_mut(&self) -> RefMut<'_, K> {
		self.registration.settle();
		self.keyword.borrow_mut()
	}

	/// Returns a shared handle to the keyword.
	///
	/// The handle does not extend the registration: once the guard is
	/// dropped the keyword no longer receives invalidation notices.
	pub fn shared(&self) -> Rc<RefCell<K>> {
		self.keyword.clone()
	}
}

impl<K: Keyword + 'static> Registered<K> {
	/// Erases the concrete keyword type, keeping the registration.
	pub fn into_dyn(self) -> Registered<dyn Keyword> {
		let Registered { registration, keyword } = self;
		Registered {
			registration,
			keyword: keyword as Rc<RefCell<dyn Keyword>>,
		}
	}
}

impl<K: ?Sized + Keyword> std::fmt::Debug for Registered<K> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Registered");
		s.field("key", &self.registration.key);
		if let Ok(keyword) = self.keyword.try_borrow() {
			s.field("name", &keyword.name()).field("data_kind", &keyword.data_kind());
		}
		s.finish()
	}
}
