//! Shadow resolution.
//!
//! Deterministic, pure function of snapshot state and input:
//!
//! 1. Walk from the real type up through its ancestors and stop at the first
//!    type with any registered descriptor. A subtype without its own shadow
//!    inherits its nearest ancestor's.
//! 2. Keep descriptors whose range contains the active level.
//! 3. Pick the winner by candidate precedence: overrides first, then the
//!    narrowest range, then the latest registration.
//! 4. With no match, fall back to the latest `is_default` descriptor for that
//!    type; otherwise fail with [`CatalogError::NoShadowFound`].

use umbra_primitives::{ApiLevel, TypeDef};

use crate::descriptor::ShadowDescriptor;
use crate::error::CatalogError;
use crate::index::Snapshot;

/// Outcome of resolving one real type.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
	pub descriptor: ShadowDescriptor,
	/// The type in the hierarchy that owned the candidate set.
	pub matched_type: &'static TypeDef,
	/// True when no range matched and the default descriptor was used.
	pub via_default: bool,
}

pub(crate) fn resolve(
	snapshot: &Snapshot,
	real_type: &'static TypeDef,
	level: ApiLevel,
) -> Result<Resolution, CatalogError> {
	let Some((matched_type, candidates)) = real_type
		.ancestors()
		.map(|ty| (ty, snapshot.candidates(ty)))
		.find(|(_, found)| !found.is_empty())
	else {
		tracing::trace!(real_type = real_type.name, "no candidates in hierarchy");
		return Err(CatalogError::NoShadowFound {
			real_type: real_type.name,
			version: level,
		});
	};

	// Candidates arrive winner first, so the first range match is the answer.
	if let Some(winner) = candidates.iter().find(|c| c.descriptor.range.contains(level)) {
		tracing::debug!(
			real_type = real_type.name,
			matched = matched_type.name,
			shadow = winner.descriptor.shadow.name,
			%level,
			"resolved shadow"
		);
		return Ok(Resolution {
			descriptor: winner.descriptor,
			matched_type,
			via_default: false,
		});
	}

	let fallback = candidates
		.iter()
		.filter(|c| c.descriptor.is_default)
		.max_by_key(|c| c.ordinal);
	match fallback {
		Some(default) => {
			tracing::debug!(
				real_type = real_type.name,
				matched = matched_type.name,
				shadow = default.descriptor.shadow.name,
				%level,
				"resolved default shadow"
			);
			Ok(Resolution {
				descriptor: default.descriptor,
				matched_type,
				via_default: true,
			})
		}
		None => Err(CatalogError::NoShadowFound {
			real_type: real_type.name,
			version: level,
		}),
	}
}
