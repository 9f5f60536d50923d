//! Association Store.
//!
//! Identity-keyed pairing of real instances with their shadows for one run.
//! Entries are keyed by [`ObjectId`], never by value, and are immutable once
//! inserted.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use umbra_catalog::ShadowTypeDef;
use umbra_primitives::{ObjectId, Real, ShadowObject};

/// One real/shadow pairing.
#[derive(Clone)]
pub(crate) struct Association {
	pub(crate) shadow: Rc<dyn ShadowObject>,
	pub(crate) shadow_type: &'static ShadowTypeDef,
	pub(crate) real: Weak<dyn Real>,
}

/// Single-threaded store owned by one runtime.
#[derive(Default)]
pub(crate) struct AssociationStore {
	entries: RefCell<FxHashMap<ObjectId, Association>>,
}

impl AssociationStore {
	pub(crate) fn get(&self, id: ObjectId) -> Option<Association> {
		self.entries.borrow().get(&id).cloned()
	}

	/// Inserts `association` unless `id` is already paired.
	///
	/// Returns the association that is stored afterwards, so a caller that
	/// lost a race with a re-entrant lookup still sees the first shadow.
	pub(crate) fn insert(&self, id: ObjectId, association: Association) -> Association {
		self.entries
			.borrow_mut()
			.entry(id)
			.or_insert(association)
			.clone()
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Drops every pairing and disarms the hooks of real instances still alive.
	///
	/// Returns the number of pairings dropped.
	pub(crate) fn clear(&self) -> usize {
		let drained: Vec<Association> = self.entries.borrow_mut().drain().map(|(_, a)| a).collect();
		for association in &drained {
			if let Some(real) = association.real.upgrade() {
				real.header().clear();
			}
		}
		drained.len()
	}
}

impl fmt::Debug for AssociationStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AssociationStore")
			.field("entries", &self.len())
			.finish()
	}
}
