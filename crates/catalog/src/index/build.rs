use std::cmp::Ordering;

use super::snapshot::Snapshot;
use umbra_primitives::TypeDef;

use crate::descriptor::{RealTypeReg, ShadowDescriptor, ShadowReg};
use crate::error::CatalogError;

/// Builder for the initial catalog [`Snapshot`].
///
/// Collects descriptors and declared real types from inventory or explicit
/// pushes, fixes the descriptors' ingest order, and validates them in that order.
///
/// ```rust,ignore
/// let snapshot = CatalogBuilder::new("shadows")
///     .extend_inventory()
///     .sort_default()
///     .build()?;
/// ```
pub struct CatalogBuilder {
	label: &'static str,
	defs: Vec<ShadowDescriptor>,
	types: Vec<&'static TypeDef>,
}

impl CatalogBuilder {
	/// Creates a new builder with the given label for diagnostics.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			defs: Vec::new(),
			types: Vec::new(),
		}
	}

	/// Returns the number of descriptors collected so far.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Returns true if no descriptors have been collected.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}

	/// Adds a single descriptor.
	pub fn push(mut self, def: ShadowDescriptor) -> Self {
		self.defs.push(def);
		self
	}

	/// Adds multiple descriptors.
	pub fn extend<I: IntoIterator<Item = ShadowDescriptor>>(mut self, defs: I) -> Self {
		self.defs.extend(defs);
		self
	}

	/// Declares a real type that no descriptor needs to mention.
	pub fn push_type(mut self, real_type: &'static TypeDef) -> Self {
		self.types.push(real_type);
		self
	}

	/// Collects every descriptor submitted through [`ShadowReg`] and every
	/// type submitted through [`RealTypeReg`].
	pub fn extend_inventory(mut self) -> Self {
		for reg in inventory::iter::<ShadowReg> {
			self.defs.push(*reg.0);
		}
		for reg in inventory::iter::<RealTypeReg> {
			self.types.push(reg.0);
		}
		self
	}

	/// Sorts descriptors using the provided comparison function.
	pub fn sort_by<F: FnMut(&ShadowDescriptor, &ShadowDescriptor) -> Ordering>(mut self, cmp: F) -> Self {
		self.defs.sort_by(cmp);
		self
	}

	/// Sorts by real type name, then shadow name.
	///
	/// Inventory iteration order depends on link order; sorting first makes
	/// ordinal tie-breaks reproducible across builds.
	pub fn sort_default(self) -> Self {
		self.sort_by(|a, b| {
			a.real_type
				.name
				.cmp(b.real_type.name)
				.then_with(|| a.shadow.name.cmp(b.shadow.name))
		})
	}

	/// Validates and ingests every descriptor in the current order.
	pub fn build(self) -> Result<Snapshot, CatalogError> {
		let mut snapshot = Snapshot::default();
		for def in self.defs {
			snapshot.insert(def)?;
		}
		let declared_types = self.types.len();
		for ty in self.types {
			snapshot.insert_type(ty);
		}
		tracing::debug!(
			catalog = self.label,
			descriptors = snapshot.len(),
			declared_types,
			"built shadow catalog"
		);
		Ok(snapshot)
	}
}
