use thiserror::Error;
use umbra_primitives::{ApiLevel, VersionRange};

/// Catalog configuration and resolution errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
	/// Two non-default descriptors for the same exact real type claim
	/// overlapping version ranges.
	#[error(
		"conflicting shadows for {real_type}: {incoming} {incoming_range} overlaps {existing} {existing_range}"
	)]
	ConflictingRange {
		real_type: &'static str,
		existing: &'static str,
		existing_range: VersionRange,
		incoming: &'static str,
		incoming_range: VersionRange,
	},
	/// No candidate covers the level and no default exists.
	#[error("no shadow for {real_type} at API level {version}")]
	NoShadowFound {
		real_type: &'static str,
		version: ApiLevel,
	},
	/// A shadow type name is not known to the catalog.
	#[error("unknown shadow type: {name}")]
	UnknownShadow { name: String },
	/// A real type name is not known to the catalog.
	#[error("unknown real type: {name}")]
	UnknownRealType { name: String },
}
