//! Conflict detection and candidate precedence.
//!
//! # Role
//!
//! This module defines the canonical ordering used to choose among candidates
//! for one real type, and the registration-time check that rejects ambiguous
//! catalogs.

use std::cmp::Ordering;

use super::snapshot::Candidate;
use crate::descriptor::ShadowDescriptor;
use crate::error::CatalogError;

/// Compares two candidates for the same real type.
///
/// Precedence hierarchy:
/// 1. Tier (per-run overrides outrank catalog entries)
/// 2. Version specificity (narrower range wins)
/// 3. Ingest ordinal (higher/later wins)
///
/// `Greater` means `a` wins.
pub(crate) fn cmp_candidates(a: &Candidate, b: &Candidate) -> Ordering {
	a.descriptor
		.source
		.tier()
		.cmp(&b.descriptor.source.tier())
		.then_with(|| b.descriptor.range.width().cmp(&a.descriptor.range.width()))
		.then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Rejects `incoming` if it overlaps a non-default descriptor already
/// registered for the same exact real type in the same tier.
pub(crate) fn check_conflict<'a>(
	existing: impl IntoIterator<Item = &'a Candidate>,
	incoming: &ShadowDescriptor,
) -> Result<(), CatalogError> {
	if incoming.is_default {
		return Ok(());
	}
	let tier = incoming.source.tier();
	for candidate in existing {
		let current = &candidate.descriptor;
		if current.is_default
			|| current.real_type.name != incoming.real_type.name
			|| current.source.tier() != tier
		{
			continue;
		}
		if current.range.overlaps(incoming.range) {
			return Err(CatalogError::ConflictingRange {
				real_type: incoming.real_type.name,
				existing: current.shadow.name,
				existing_range: current.range,
				incoming: incoming.shadow.name,
				incoming_range: incoming.range,
			});
		}
	}
	Ok(())
}
