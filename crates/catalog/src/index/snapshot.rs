//! Immutable catalog state.
//!
//! # Role
//!
//! A [`Snapshot`] is the unit of publication: the global catalog swaps whole
//! snapshots, and every run pins one for its duration. Mutation only happens
//! on private copies before they are published or pinned.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use umbra_primitives::{ApiLevel, TypeDef};

use super::precedence::{check_conflict, cmp_candidates};
use crate::descriptor::{DescriptorSource, ShadowDescriptor, ShadowTypeDef};
use crate::error::CatalogError;
use crate::resolve::{self, Resolution};

/// A registered descriptor with its stable ingest ordinal.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
	pub descriptor: ShadowDescriptor,
	/// Position in registration order. Later registrations have higher ordinals.
	pub ordinal: u32,
}

/// Point-in-time view of every registered descriptor.
#[derive(Clone, Default)]
pub struct Snapshot {
	/// Ingest order.
	entries: Vec<Candidate>,
	/// Exact real type name to positions in `entries`.
	by_type: FxHashMap<&'static str, Vec<usize>>,
	/// Every nameable real type: descriptor targets, declared types, and their ancestors.
	known_types: FxHashMap<&'static str, &'static TypeDef>,
	next_ordinal: u32,
}

impl Snapshot {
	/// Adds a descriptor, rejecting range conflicts. Returns its ordinal.
	pub(crate) fn insert(&mut self, descriptor: ShadowDescriptor) -> Result<u32, CatalogError> {
		check_conflict(self.exact(descriptor.real_type.name), &descriptor)?;

		let ordinal = self.next_ordinal;
		self.next_ordinal += 1;
		self.insert_type(descriptor.real_type);
		self.by_type
			.entry(descriptor.real_type.name)
			.or_default()
			.push(self.entries.len());
		self.entries.push(Candidate { descriptor, ordinal });
		Ok(ordinal)
	}

	/// Makes `real_type` and its ancestors resolvable by name.
	pub(crate) fn insert_type(&mut self, real_type: &'static TypeDef) {
		for ty in real_type.ancestors() {
			self.known_types.insert(ty.name, ty);
		}
	}

	fn exact(&self, name: &str) -> impl Iterator<Item = &Candidate> {
		self.by_type
			.get(name)
			.into_iter()
			.flatten()
			.map(|&idx| &self.entries[idx])
	}

	/// Returns the descriptors registered for exactly `real_type`, winner first.
	pub fn candidates(&self, real_type: &TypeDef) -> Vec<Candidate> {
		let mut found: Vec<Candidate> = self.exact(real_type.name).copied().collect();
		found.sort_by(|a, b| cmp_candidates(b, a));
		found
	}

	/// Returns the descriptors applicable to `real_type` or any ancestor.
	///
	/// Ordered from the most specific type to the least; within a type, by
	/// precedence (narrowest range first).
	pub fn lookup(&self, real_type: &'static TypeDef) -> Vec<Candidate> {
		real_type
			.ancestors()
			.flat_map(|ty| self.candidates(ty))
			.collect()
	}

	/// Selects the single shadow for `real_type` at `level`.
	pub fn resolve(
		&self,
		real_type: &'static TypeDef,
		level: ApiLevel,
	) -> Result<Resolution, CatalogError> {
		resolve::resolve(self, real_type, level)
	}

	/// Returns a private copy with `overrides` layered on top.
	///
	/// Every override is force-registered with [`DescriptorSource::Override`],
	/// so it outranks any catalog entry for its real type. Overlapping
	/// overrides for the same exact type are rejected.
	pub fn with_overrides<I>(&self, overrides: I) -> Result<Snapshot, CatalogError>
	where
		I: IntoIterator<Item = ShadowDescriptor>,
	{
		let mut next = self.clone();
		for descriptor in overrides {
			next.insert(descriptor.with_source(DescriptorSource::Override))?;
		}
		Ok(next)
	}

	/// Finds a shadow type by name.
	pub fn shadow_type(&self, name: &str) -> Option<&'static ShadowTypeDef> {
		self.entries
			.iter()
			.map(|c| c.descriptor.shadow)
			.find(|shadow| shadow.name == name)
	}

	/// Finds a real type by name.
	///
	/// Knows every type a descriptor targets, every type declared through
	/// [`RealTypeReg`](crate::RealTypeReg) or [`ShadowCatalog::register_type`](crate::ShadowCatalog::register_type),
	/// and all of their ancestors.
	pub fn real_type(&self, name: &str) -> Option<&'static TypeDef> {
		self.known_types.get(name).copied()
	}

	/// Returns each distinct shadow resetter, in registration order.
	pub fn resetters(&self) -> Vec<(&'static str, fn())> {
		let mut seen = FxHashSet::default();
		self.entries
			.iter()
			.filter_map(|c| {
				let shadow = c.descriptor.shadow;
				let reset = shadow.resetter?;
				seen.insert(shadow.name).then_some((shadow.name, reset))
			})
			.collect()
	}

	/// Iterates every descriptor in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for Snapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Snapshot")
			.field("descriptors", &self.entries.len())
			.field("shadowed_types", &self.by_type.len())
			.field("known_types", &self.known_types.len())
			.field("next_ordinal", &self.next_ordinal)
			.finish()
	}
}
