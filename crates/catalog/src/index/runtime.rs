//! Published catalog with atomic snapshot swaps.
//!
//! # Role
//!
//! This module provides the thread-safe entrypoint for reading and extending
//! the catalog. It handles the CAS-based extension loop.
//!
//! # Invariants
//!
//! - Concurrent registrations must be linearizable (see `invariants::test_no_lost_updates`).
//! - A pinned snapshot never observes later registrations (see
//!   `invariants::test_pinned_snapshot_isolated_from_register`).

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use umbra_primitives::{ApiLevel, TypeDef};

use super::build::CatalogBuilder;
use super::snapshot::{Candidate, Snapshot};
use crate::descriptor::ShadowDescriptor;
use crate::error::CatalogError;
use crate::resolve::Resolution;

/// Process-wide catalog container.
///
/// Reads are wait-free loads of the current [`Snapshot`]. Writes build an
/// extended copy and publish it with compare-and-swap, retrying on contention.
pub struct ShadowCatalog {
	label: &'static str,
	snap: ArcSwap<Snapshot>,
}

impl ShadowCatalog {
	/// Creates a catalog serving `snapshot`.
	pub fn new(label: &'static str, snapshot: Snapshot) -> Self {
		Self {
			label,
			snap: ArcSwap::from_pointee(snapshot),
		}
	}

	/// Creates a catalog with no descriptors.
	pub fn empty(label: &'static str) -> Self {
		Self::new(label, Snapshot::default())
	}

	/// Returns the current snapshot. Holding it pins that state.
	#[inline]
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.snap.load_full()
	}

	/// Resolves against the current snapshot.
	pub fn resolve(&self, real_type: &'static TypeDef, level: ApiLevel) -> Result<Resolution, CatalogError> {
		self.snap.load().resolve(real_type, level)
	}

	/// Returns candidates for `real_type` and its ancestors from the current snapshot.
	pub fn lookup(&self, real_type: &'static TypeDef) -> Vec<Candidate> {
		self.snap.load().lookup(real_type)
	}

	/// Registers a descriptor with linearizable semantics.
	///
	/// Runs that already pinned a snapshot keep their view; the new entry is
	/// visible to snapshots taken afterwards.
	pub fn register(&self, descriptor: ShadowDescriptor) -> Result<u32, CatalogError> {
		loop {
			let old = self.snap.load_full();

			let mut next = Snapshot::clone(&old);
			let ordinal = match next.insert(descriptor) {
				Ok(ordinal) => ordinal,
				Err(err) => {
					tracing::warn!(catalog = self.label, %descriptor, error = %err, "registration rejected");
					return Err(err);
				}
			};

			let next = Arc::new(next);
			let prev = self.snap.compare_and_swap(&old, next);
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(catalog = self.label, %descriptor, ordinal, "registered shadow");
				return Ok(ordinal);
			}
			// CAS failed, retry with updated snapshot
		}
	}

	/// Makes `real_type` and its ancestors resolvable by name in later snapshots.
	pub fn register_type(&self, real_type: &'static TypeDef) {
		loop {
			let old = self.snap.load_full();
			if old.real_type(real_type.name).is_some() {
				return;
			}

			let mut next = Snapshot::clone(&old);
			next.insert_type(real_type);
			let prev = self.snap.compare_and_swap(&old, Arc::new(next));
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(catalog = self.label, real_type = real_type.name, "registered real type");
				return;
			}
		}
	}

	/// Returns the number of registered descriptors.
	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	/// Returns true if the catalog has no descriptors.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

static GLOBAL: LazyLock<Arc<ShadowCatalog>> = LazyLock::new(|| {
	let snapshot = CatalogBuilder::new("shadows")
		.extend_inventory()
		.sort_default()
		.build()
		.unwrap_or_else(|err| panic!("shadow catalog: {err}"));
	Arc::new(ShadowCatalog::new("shadows", snapshot))
});

/// Returns the process-wide catalog seeded from every submitted descriptor.
///
/// # Panics
///
/// On first use, if statically submitted descriptors conflict. A conflicting
/// static catalog is a build configuration error.
pub fn global() -> Arc<ShadowCatalog> {
	GLOBAL.clone()
}
